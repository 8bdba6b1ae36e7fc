use clap::Parser;
use log::{info, warn};
use snafu::{prelude::*, Whatever};
use sso_dbf::{schema, writer, Cell, FileDate, ListParams, Projector, Record};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

type Result<T, E = Whatever> = std::result::Result<T, E>;

const EXIT_BAD_ARGUMENTS: u8 = 1;
const EXIT_INPUT_NOT_FOUND: u8 = 2;
const EXIT_CONVERSION_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Cli {
    /// DSKKAR00 export (tab- or comma-delimited, one data row)
    header_input: PathBuf,

    /// DSKWOR00 export (tab- or comma-delimited, one row per worker)
    workers_input: PathBuf,

    /// Directory receiving DSKKAR00.DBF and DSKWOR00.DBF
    output_dir: PathBuf,

    /// Workshop id (max 10 digits); taken from the header row's DSK_ID when omitted
    #[arg(long)]
    workshop_id: Option<String>,

    /// Two-digit SSO year; taken from the header row's DSK_YY when omitted
    #[arg(long)]
    year: Option<u16>,

    /// Month 1-12; taken from the header row's DSK_MM when omitted
    #[arg(long)]
    month: Option<u8>,

    /// List number; taken from the header row's DSK_LISTNO when omitted
    #[arg(long)]
    list_no: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_BAD_ARGUMENTS);
        }
    };

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "mk_sso_dbf=info");
    }
    if pretty_env_logger::try_init().is_err() {
        eprintln!("Error: could not initialize logger");
        return ExitCode::from(EXIT_CONVERSION_FAILED);
    }

    if let Some(code) = validate_arguments(&cli) {
        return ExitCode::from(code);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(EXIT_CONVERSION_FAILED)
        }
    }
}

fn validate_arguments(cli: &Cli) -> Option<u8> {
    if let Some(id) = &cli.workshop_id {
        if id.is_empty() || id.len() > 10 || !id.bytes().all(|b| b.is_ascii_digit()) {
            log::error!("invalid workshop id {id:?} (must be max 10 digits)");
            return Some(EXIT_BAD_ARGUMENTS);
        }
    }
    if let Some(month) = cli.month {
        if !(1..=12).contains(&month) {
            log::error!("invalid month {month} (must be 1-12)");
            return Some(EXIT_BAD_ARGUMENTS);
        }
    }
    if let Some(year) = cli.year {
        if year > 99 {
            log::error!("invalid year {year} (must be the two-digit SSO year)");
            return Some(EXIT_BAD_ARGUMENTS);
        }
    }

    for path in [&cli.header_input, &cli.workers_input] {
        if !path.exists() {
            log::error!("input not found: {}", path.display());
            return Some(EXIT_INPUT_NOT_FOUND);
        }
    }
    None
}

fn run(cli: Cli) -> Result<()> {
    info!("Reading {} ...", cli.header_input.display());
    let header_rows = read_table(&cli.header_input)?;
    let header_row = header_rows.into_iter().next().unwrap_or_default();

    info!("Reading {} ...", cli.workers_input.display());
    let worker_rows = read_table(&cli.workers_input)?;
    info!("Loaded header + {} workers", worker_rows.len());

    let params = resolve_params(&cli, &header_row);
    info!(
        "Workshop: {}, Year: {:02}, Month: {:02}",
        params.workshop_id, params.year, params.month
    );

    let projector = Projector::new(params);
    let workers = projector.project_workers(&worker_rows);
    let header = projector.project_header(&header_row, &workers);

    std::fs::create_dir_all(&cli.output_dir).with_whatever_context(|e| {
        format!("unable to create output directory {}: {e}", cli.output_dir.display())
    })?;

    let now = chrono::Local::now();
    let date = FileDate {
        year: chrono::Datelike::year(&now) as u16,
        month: chrono::Datelike::month(&now) as u8,
        day: chrono::Datelike::day(&now) as u8,
    };

    let kar_path = cli.output_dir.join(schema::HEADER.file_name);
    let wor_path = cli.output_dir.join(schema::WORKERS.file_name);

    writer::write_file(&kar_path, &schema::HEADER, &[header], date)
        .with_whatever_context(|e| format!("header file: {e}"))?;
    if let Err(e) = writer::write_file(&wor_path, &schema::WORKERS, &workers, date) {
        // Don't leave a half-converted pair behind.
        let _ = std::fs::remove_file(&kar_path);
        whatever!("workers file: {e}");
    }

    info!("Created {}", kar_path.display());
    info!("Created {}", wor_path.display());
    Ok(())
}

/// Fills the per-list parameters from the flags, falling back to the header
/// row the way the SAP wrapper invokes us (without flags).
fn resolve_params(cli: &Cli, header: &Record) -> ListParams {
    let workshop_id = cli
        .workshop_id
        .clone()
        .unwrap_or_else(|| header.get("DSK_ID").as_text().into_owned());
    let year = cli.year.unwrap_or_else(|| {
        fallback_number(header, "DSK_YY", "year") as u16
    });
    let month = cli.month.unwrap_or_else(|| {
        fallback_number(header, "DSK_MM", "month") as u8
    });
    let list_no = cli
        .list_no
        .clone()
        .unwrap_or_else(|| header.get("DSK_LISTNO").as_text().into_owned());

    if workshop_id.is_empty() {
        warn!("no workshop id given and the header row has no DSK_ID");
    }
    ListParams::new(workshop_id, year, month, list_no)
}

fn fallback_number(header: &Record, field: &str, what: &str) -> i64 {
    match header.get(field).as_integer() {
        Some(v) => v,
        None => {
            warn!("no {what} given and the header row has no usable {field}; using 0");
            0
        }
    }
}

/// Reads a delimited export into one [Record] per data row.
///
/// The first line names the columns. SAP "XLS" exports are tab-delimited;
/// hand-made files are usually comma-delimited, so the delimiter is taken
/// from the first line.
fn read_table(path: &Path) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path)
        .with_whatever_context(|e| format!("unable to read {}: {e}", path.display()))?;
    let text = decode_text(&bytes)
        .with_whatever_context(|| format!("unrecognized text encoding in {}", path.display()))?;

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let Some(first) = lines.next() else {
        return Ok(Vec::new());
    };
    let delimiter = if first.contains('\t') { '\t' } else { ',' };
    let columns: Vec<String> = split_delimited(first, delimiter)
        .into_iter()
        .map(|c| c.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for line in lines {
        let cells = split_delimited(line, delimiter);
        let record: Record = columns
            .iter()
            .zip(cells)
            .map(|(name, value)| (name.clone(), Cell::from_raw(&value)))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Decodes raw input bytes, trying the encodings SAP exports show up in:
/// UTF-16 (by BOM), UTF-8, windows-1252, then latin-1 as a last resort.
fn decode_text(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (text, _, malformed) = encoding_rs::UTF_16LE.decode(&bytes[2..]);
        if !malformed {
            return Some(text.into_owned());
        }
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (text, _, malformed) = encoding_rs::UTF_16BE.decode(&bytes[2..]);
        if !malformed {
            return Some(text.into_owned());
        }
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }
    if let Some(text) = encoding_rs::WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
    {
        return Some(text.into_owned());
    }
    // latin-1 maps every byte; nothing can fail past this point.
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// Splits one delimited line, honouring double-quoted cells (`""` is an
/// escaped quote).
fn split_delimited(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_and_quoted() {
        assert_eq!(split_delimited("a,b,c", ','), ["a", "b", "c"]);
        assert_eq!(split_delimited("a\tb\t", '\t'), ["a", "b", ""]);
        assert_eq!(
            split_delimited("\"x,y\",z", ','),
            ["x,y", "z"]
        );
        assert_eq!(
            split_delimited("\"he said \"\"hi\"\"\",1", ','),
            ["he said \"hi\"", "1"]
        );
    }

    #[test]
    fn decode_utf8_and_utf16() {
        assert_eq!(decode_text("علی\t30".as_bytes()).as_deref(), Some("علی\t30"));

        let mut utf16 = vec![0xFF, 0xFE];
        for unit in "علی".encode_utf16() {
            utf16.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&utf16).as_deref(), Some("علی"));

        // Invalid UTF-8 falls back to a single-byte encoding and never fails.
        assert!(decode_text(&[0x41, 0xE9, 0x42]).is_some());
    }
}
