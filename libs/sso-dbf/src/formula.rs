//! Resolution of the zero-padding formulas SAP leaves in its exports.
//!
//! The tab-delimited XLS exports carry `REPT`-based formulas instead of
//! literal values wherever a number must keep its leading zeros. Only the
//! three shapes below are produced; anything else is kept as text.

use tracing::warn;

/// Resolves a SAP zero-padding formula.
///
/// # Returns:
/// - `Some(value)` for the three known shapes:
///   - `=REPT(0,N-LEN("V"))&"V"`: `V` left-padded with zeros to `N`;
///   - `=REPT(0,N)&"V"`: `N` zeros followed by `V`;
///   - `=REPT(0,N)`: `N` zeros.
/// - `None` when `text` is not a `=REPT` formula at all.
///
/// An unrecognized `=REPT` variant is returned verbatim (as `Some`) with a
/// warning, mirroring the pass-through contract of the upstream reader.
pub fn resolve(text: &str) -> Option<String> {
    if !text.starts_with("=REPT") {
        return None;
    }
    match parse(text) {
        Some(value) => Some(value),
        None => {
            warn!("unknown formula pattern: {text}");
            Some(text.to_string())
        }
    }
}

fn parse(text: &str) -> Option<String> {
    let rest = text.strip_prefix("=REPT(0,")?;
    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    let width: usize = rest[..digits_end].parse().ok()?;
    let rest = &rest[digits_end..];

    // =REPT(0,N)
    if rest == ")" {
        return Some("0".repeat(width));
    }

    // =REPT(0,N)&"V"
    if let Some(rest) = rest.strip_prefix(")&\"") {
        let value = rest.strip_suffix('"')?;
        if value.contains('"') {
            return None;
        }
        return Some(format!("{}{}", "0".repeat(width), value));
    }

    // =REPT(0,N-LEN("V"))&"V"
    let rest = rest.strip_prefix("-LEN(\"")?;
    let (len_arg, rest) = rest.split_once("\"))&\"")?;
    let value = rest.strip_suffix('"')?;
    if len_arg.is_empty() || value.is_empty() || len_arg.contains('"') || value.contains('"') {
        return None;
    }
    if value.len() >= width {
        Some(value.to_string())
    } else {
        Some(format!("{}{}", "0".repeat(width - value.len()), value))
    }
}
