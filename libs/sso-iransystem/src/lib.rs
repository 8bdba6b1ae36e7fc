//! # Purpose:
//! "Iran System" text encoding support for the SSO disk-file writer.
//!
//! Iran System is a single-byte legacy code page used by DOS-era Iranian
//! business software. Unlike every modern encoding it stores Persian text in
//! *visual* order (the order glyphs appear on screen, left to right) and each
//! letter is stored as one of up to four positional glyphs selected from its
//! in-word neighbours.
//!
//! The [Codec] in this crate implements both directions:
//! - [encode](Codec::encode) runs a small shaping engine over CP-1256 indexed
//!   tables and reverses the result into visual order;
//! - [decode](Codec::decode) collapses positional glyphs back to base letters
//!   for inspection. Decoding is lossy by design and must not be used to
//!   re-encode.
//!
//! ## Examples:
//! ```
//! use sso_iransystem::Codec;
//!
//! let codec = Codec::new();
//!
//! // "Ali" in Persian, as found in a production DSKWOR00 record:
//! assert_eq!(codec.encode("علی"), b"\xFC\xF3\xE4");
//! assert_eq!(codec.decode(b"\xFC\xF3\xE4"), "علی");
//!
//! // Digits shift into the 0x80.. range and keep logical order:
//! assert_eq!(codec.encode("09"), b"\x80\x89");
//! ```

pub mod ascii;
pub mod char_class;
mod codec;
pub(crate) mod tables;

pub use codec::Codec;
pub use codec::Config;
