//! Plausibility checks for worker rows.
//!
//! The SSO portal rejects whole lists over bad identity data, so the
//! projector flags suspicious values early. Checks here never reject a row;
//! callers log and keep going.

/// Checks the Iranian national-id (کد ملی) mod-11 checksum.
///
/// Ten digits, not all identical; the last digit verifies
/// `Σ dᵢ·(10-i) mod 11`.
pub fn is_valid_national_id(id: &str) -> bool {
    let digits: Vec<u32> = id.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 10 || id.len() != 10 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check_sum: u32 = digits[..9]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (10 - i as u32))
        .sum();
    let remainder = check_sum % 11;
    if remainder < 2 {
        digits[9] == remainder
    } else {
        digits[9] == 11 - remainder
    }
}

/// Returns `true` when the Jalali `year` is a leap year (33-year cycle).
pub fn is_jalali_leap(year: u16) -> bool {
    matches!(year % 33, 1 | 5 | 9 | 13 | 17 | 22 | 26 | 30)
}

/// Validates a Jalali date in `YYYYMMDD` form.
///
/// Months 1–6 have 31 days, 7–11 have 30, Esfand has 29 or 30 depending on
/// [is_jalali_leap]. Years outside 1300–1500 are rejected as implausible
/// for payroll data.
pub fn is_valid_jalali_date(date: &str) -> bool {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let year: u16 = match date[0..4].parse() {
        Ok(y) => y,
        Err(_) => return false,
    };
    let month: u8 = match date[4..6].parse() {
        Ok(m) => m,
        Err(_) => return false,
    };
    let day: u8 = match date[6..8].parse() {
        Ok(d) => d,
        Err(_) => return false,
    };

    if !(1300..=1500).contains(&year) || !(1..=12).contains(&month) {
        return false;
    }
    let max_days = match month {
        1..=6 => 31,
        7..=11 => 30,
        _ => {
            if is_jalali_leap(year) {
                30
            } else {
                29
            }
        }
    };
    (1..=max_days).contains(&day)
}

/// Brings a date cell into the `YYYYMMDD` form the files store.
///
/// Separators (`-`, `/`) are dropped; six-digit `YYMMDD` values get the
/// `13` century the exports abbreviate. Anything else is not a date.
pub fn normalize_jalali_date(raw: &str) -> Option<String> {
    let clean: String = raw
        .trim()
        .chars()
        .filter(|&c| c != '-' && c != '/')
        .collect();
    if !clean.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match clean.len() {
        8 => Some(clean),
        6 => Some(format!("13{clean}")),
        _ => None,
    }
}
