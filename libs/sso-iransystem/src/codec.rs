use crate::{
    ascii,
    char_class,
    tables::{constants::*, cp1256, shaping, shaping::Form, unicode},
};
use tracing::warn;

/// An Iran System text encoder and decoder
///
/// The encoder implements the exact byte behaviour the SSO disk-file
/// consumer expects, including the positional-glyph selection, the `لا`
/// ligature and the visual-order reversal. The decoder is the pragmatic
/// inverse used for inspecting produced files; it collapses positional
/// glyphs to base letters and is therefore lossy.
///
/// ## Examples:
/// ```
/// use sso_iransystem::{Codec, Config};
///
/// let codec = Codec::new();
/// assert_eq!(codec.encode("علی"), b"\xFC\xF3\xE4");
///
/// // Keep the on-disk (visual) order when inspecting raw bytes:
/// let raw = Codec::with_config(Config { decode_to_logical: false, ..Config::new() });
/// assert_eq!(raw.decode(b"\xFC\xF3\xE4"), "یلع");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: Config,
}

/// Configuration for [Codec] instantiation
#[derive(Debug, Clone)]
pub struct Config {
    /// Reverse decoded text back to logical order.
    ///
    /// Iran System stores text visually (left to right as displayed), so this
    /// is what callers almost always want. Disable it to see the byte order
    /// of the stored field when debugging a produced file.
    pub decode_to_logical: bool,

    /// Disables the [tracing::warn!] message emitted when an input scalar
    /// falls outside the CP-1256 repertoire and is replaced.
    pub disable_tracing: bool,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            decode_to_logical: true,
            disable_tracing: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration this codec was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes a Unicode string into Iran System bytes.
    ///
    /// # Params:
    /// - `text` - Persian/Arabic text, mixed with ASCII as it appears in
    ///   payroll exports.
    ///
    /// # Returns:
    /// The byte sequence the legacy consumer expects for this string, in
    /// visual order. Purely numeric strings (digits with optional
    /// whitespace) keep their logical order. The output length may differ
    /// from the character count because of the `لا` ligature; the caller is
    /// responsible for field padding and truncation.
    ///
    /// This function never fails: scalars outside the repertoire are
    /// replaced by `?` (with a warning unless
    /// [disabled](Config::disable_tracing)).
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut shaped = self.shape(text);
        if !ascii::is_numeric_text(text) {
            shaped.reverse();
        }
        shaped
    }

    /// Shapes a Unicode string into Iran System bytes in logical order.
    ///
    /// This is [encode](Self::encode) without the final visual-order
    /// reversal. Exposed separately because the reversal is a property of
    /// the storage format, not of the glyph selection.
    pub fn shape(&self, text: &str) -> Vec<u8> {
        // Wrapping spaces give the first and last letter real neighbours, so
        // the selection below needs no boundary cases. They are dropped again
        // at the end.
        let mut padded = Vec::with_capacity(text.len() + 2);
        padded.push(b' ');
        for c in text.chars() {
            let c = normalize(c);
            match cp1256::backward_cp_1256(c as u32) {
                Some(b) => padded.push(b),
                None => {
                    if !self.config.disable_tracing {
                        warn!("no CP-1256 form for U+{:04X}, storing '?'", c as u32);
                    }
                    padded.push(ASCII_REPLACEMENT);
                }
            }
        }
        padded.push(b' ');

        let mut out: Vec<u8> = Vec::with_capacity(padded.len());
        for i in 0..padded.len() {
            let b = padded[i];
            if char_class::is_latin(b) {
                out.push(ascii::latin_glyph(b));
            } else if i > 0 && i + 1 < padded.len() {
                let glyph = shaping::glyph(select_form(padded[i - 1], padded[i + 1]), b);
                match out.last_mut() {
                    // A final ALEF right after a joining LAM forms the
                    // mandatory ligature.
                    Some(last) if glyph == ALEF_FINAL && *last == LAM_JOINING => {
                        *last = LAM_ALEF;
                    }
                    _ => out.push(glyph),
                }
            }
        }

        // Drop the wrapping spaces.
        out.pop();
        if !out.is_empty() {
            out.remove(0);
        }
        out
    }

    /// Decodes Iran System bytes into a Unicode string.
    ///
    /// # Params:
    /// - `bytes` - The stored bytes, visual order.
    ///
    /// # Returns:
    /// The text in logical order (unless
    /// [decode_to_logical](Config::decode_to_logical) is off). Positional
    /// glyph identity is discarded and the `لا` ligature is split, so
    /// decoded text identifies a record but re-encoding it is not guaranteed
    /// to reproduce the input bytes.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut chars: Vec<char> = Vec::with_capacity(bytes.len() + 1);
        for &b in bytes {
            chars.push(
                char::from_u32(unicode::IRAN_SYSTEM[b as usize] as u32)
                    .unwrap_or(CHAR_REPLACEMENT),
            );
            if b == LAM_ALEF {
                chars.push('\u{0627}');
            }
        }
        if self.config.decode_to_logical {
            chars.reverse();
        }
        chars.into_iter().collect()
    }

    /// Decodes a fixed-width field payload, ignoring the trailing space/NUL
    /// padding the writer adds.
    pub fn decode_field(&self, bytes: &[u8]) -> String {
        let mut end = bytes.len();
        while end > 0 && (bytes[end - 1] == b' ' || bytes[end - 1] == 0) {
            end -= 1;
        }
        self.decode(&bytes[..end])
    }
}

/// Folds the two Persian letters with a dedicated Unicode block onto their
/// Arabic forms that CP-1256 indexes; `گ پ چ ژ` have table slots of their
/// own and stay untouched.
fn normalize(c: char) -> char {
    match c {
        '\u{06CC}' => '\u{064A}', // ی -> ي
        '\u{06A9}' => '\u{0643}', // ک -> ك
        _ => c,
    }
}

fn select_form(prev: u8, next: u8) -> Form {
    let prev_breaks = char_class::is_join_breaker(prev) || char_class::is_right_joining(prev);
    let next_breaks = char_class::is_join_breaker(next);
    match (prev_breaks, next_breaks) {
        (true, true) => Form::Isolated,
        (true, false) => Form::Final,
        (false, true) => Form::Initial,
        (false, false) => Form::Medial,
    }
}
