//! Byte-exact dBase III emission.
//!
//! The SSO consumer is not a real dBase implementation: it reads fixed
//! offsets and insists on the exact header below (language driver `0x7E`,
//! no MDX, one terminator byte, `0x1A` after the last record). Everything
//! here is therefore spelled out byte by byte instead of going through a
//! generic dBase crate.

use crate::{
    cell::Cell,
    record::Record,
    schema::{FieldDescriptor, FieldKind, Schema},
};
use snafu::{ResultExt, Snafu};
use sso_iransystem::Codec;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("unable to create \"{}\": {}", path.display(), source))]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("unable to write \"{}\": {}", path.display(), source))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The last-update stamp stored in bytes 1–3 of the file header.
///
/// Callers pass the process wall-clock date; the writer itself stays a pure
/// function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct FileDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Renders a whole table into memory.
///
/// Layout: 32-byte file header, one 32-byte descriptor per field, a `0x0D`
/// terminator, the fixed-width records, and a trailing `0x1A`.
pub fn to_bytes(schema: &Schema, records: &[Record], date: FileDate) -> Vec<u8> {
    let codec = Codec::new();
    let capacity =
        schema.header_len() as usize + records.len() * schema.record_len() as usize + 1;
    let mut buf = Vec::with_capacity(capacity);

    // File header.
    buf.push(0x03); // dBase III, no memo
    buf.push((date.year % 100) as u8);
    buf.push(date.month);
    buf.push(date.day);
    buf.extend_from_slice(&(records.len() as u32).to_le_bytes());
    buf.extend_from_slice(&schema.header_len().to_le_bytes());
    buf.extend_from_slice(&schema.record_len().to_le_bytes());
    buf.extend_from_slice(&[0u8; 16]); // reserved
    buf.push(0x00); // no MDX
    buf.push(0x7E); // language driver the consumer uses for Iran System
    buf.extend_from_slice(&[0u8; 2]);

    // Field descriptors.
    for field in schema.fields {
        let mut name = [0u8; 11];
        name[..field.name.len()].copy_from_slice(field.name.as_bytes());
        buf.extend_from_slice(&name);
        buf.push(field.kind.code());
        buf.extend_from_slice(&[0u8; 4]);
        buf.push(field.width);
        buf.push(field.decimals);
        buf.extend_from_slice(&[0u8; 14]);
    }
    buf.push(0x0D);

    for record in records {
        buf.push(b' '); // not deleted
        for field in schema.fields {
            let cell = record.get(field.name);
            match field.kind {
                FieldKind::Character => character_payload(&mut buf, field, cell, &codec),
                FieldKind::Numeric => numeric_payload(&mut buf, field, cell),
            }
        }
    }

    buf.push(0x1A);
    buf
}

/// Writes a whole table to `path`.
///
/// The file is created, written sequentially, flushed and closed before
/// this returns; on any error the partial file is removed so a failed run
/// never leaves output behind.
pub fn write_file(
    path: &Path,
    schema: &Schema,
    records: &[Record],
    date: FileDate,
) -> Result<()> {
    let bytes = to_bytes(schema, records, date);

    let result = (|| {
        let file = std::fs::File::create(path).context(CreateSnafu { path })?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(&bytes).context(WriteSnafu { path })?;
        writer.flush().context(WriteSnafu { path })
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(path);
    }
    result
}

fn character_payload(buf: &mut Vec<u8>, field: &FieldDescriptor, cell: &Cell, codec: &Codec) {
    let width = field.width as usize;

    if field.blank_zero && cell.is_empty_or_zero() {
        buf.extend(std::iter::repeat(b' ').take(width));
        return;
    }

    let text = cell.as_text();
    if field.persian && !text.trim().is_empty() {
        let mut encoded = codec.encode(&text);
        encoded.truncate(width);
        buf.extend_from_slice(&encoded);
        buf.extend(std::iter::repeat(b' ').take(width - encoded.len()));
        return;
    }

    // Plain text: ASCII, left-justified. Anything outside ASCII has no
    // meaning in these fields and degrades to '?'.
    let mut written = 0;
    for c in text.chars().take(width) {
        buf.push(if c.is_ascii() { c as u8 } else { b'?' });
        written += 1;
    }
    buf.extend(std::iter::repeat(b' ').take(width - written));
}

fn numeric_payload(buf: &mut Vec<u8>, field: &FieldDescriptor, cell: &Cell) {
    let width = field.width as usize;

    let formatted = if field.decimals > 0 {
        cell.as_decimal()
            .map(|v| format!("{:>w$.p$}", v, w = width, p = field.decimals as usize))
    } else {
        cell.as_integer().map(|v| format!("{:>w$}", v, w = width))
    };

    match formatted {
        Some(s) => {
            let bytes = s.as_bytes();
            // An over-wide number keeps its rightmost digits; the field is
            // unusable either way, but the record must stay aligned.
            let start = bytes.len().saturating_sub(width);
            buf.extend_from_slice(&bytes[start..]);
        }
        None => {
            if !cell.is_absent() {
                warn!("field {} holds non-numeric {cell:?}, storing blanks", field.name);
            }
            buf.extend(std::iter::repeat(b' ').take(width));
        }
    }
}
