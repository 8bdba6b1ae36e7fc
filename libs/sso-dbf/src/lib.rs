//! # Purpose:
//! Core of the SSO disk-file converter: schemas, record projection and the
//! binary dBase III writer for the two month-end files the Social Security
//! Organization consumes (`DSKKAR00.DBF`, one summary record, and
//! `DSKWOR00.DBF`, one record per worker).
//!
//! The consumer is a legacy DOS-era application that does not implement
//! dBase faithfully, so emission here is byte-exact: fixed header layout,
//! language driver `0x7E`, Persian character fields in Iran System bytes
//! (see [sso_iransystem]) and the field-level quirks the consumer insists
//! on.
//!
//! ## Examples:
//! ```
//! use sso_dbf::{Cell, FileDate, ListParams, Projector, Record, schema, writer};
//!
//! let mut worker = Record::new();
//! worker.set("DSW_FNAME", Cell::from_raw("علی"));
//! worker.set("DSW_DD", Cell::from_raw("30"));
//!
//! let params = ListParams::new("853900011", 3, 9, "1");
//! let projector = Projector::new(params);
//! let workers = projector.project_workers(&[worker]);
//! let header = projector.project_header(&Record::new(), &workers);
//!
//! let date = FileDate { year: 2024, month: 11, day: 30 };
//! let bytes = writer::to_bytes(&schema::HEADER, &[header], date);
//! assert_eq!(bytes[0], 0x03);
//! assert_eq!(bytes[29], 0x7E);
//!
//! let bytes = writer::to_bytes(&schema::WORKERS, &workers, date);
//! assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
//! ```

// Module declarations
pub mod cell;
pub mod formula;
pub mod project;
pub mod record;
pub mod schema;
pub mod validate;
pub mod writer;

// Public re-exports
#[doc(no_inline)]
pub use cell::Cell;
#[doc(no_inline)]
pub use project::ListParams;
#[doc(no_inline)]
pub use project::Projector;
#[doc(no_inline)]
pub use record::Record;
#[doc(no_inline)]
pub use schema::Schema;
#[doc(no_inline)]
pub use writer::FileDate;
