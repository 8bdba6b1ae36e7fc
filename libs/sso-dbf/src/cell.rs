//! The loose cell model handed over by tabular readers.
//!
//! Upstream rows arrive as field-name → cell mappings with mixed text and
//! number content. Coercion to the declared field kind happens once, here
//! and in the writer; downstream code never sees the raw upstream shape.

use crate::formula;
use std::borrow::Cow;

/// A single upstream cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value was provided for this field.
    #[default]
    Absent,
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl Cell {
    /// Builds a cell from raw reader output.
    ///
    /// Leading/trailing whitespace is not significant in the exports and is
    /// trimmed; SAP zero-padding formulas are resolved (see
    /// [formula::resolve]); an empty string becomes [Absent](Cell::Absent).
    pub fn from_raw(text: &str) -> Cell {
        let text = text.trim();
        if text.is_empty() {
            return Cell::Absent;
        }
        match formula::resolve(text) {
            Some(resolved) => Cell::Text(resolved),
            None => Cell::Text(text.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    /// Returns `true` for the values the consumer treats as "no payment
    /// month": absent, empty text, `"0"`, or a numeric zero.
    pub fn is_empty_or_zero(&self) -> bool {
        match self {
            Cell::Absent => true,
            Cell::Text(s) => {
                let s = s.trim();
                s.is_empty() || s.parse::<f64>().map(|v| v == 0.0).unwrap_or(false)
            }
            Cell::Integer(v) => *v == 0,
            Cell::Decimal(v) => *v == 0.0,
        }
    }

    /// The cell as text, the way it is written into a Character field.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Absent => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Integer(v) => Cow::Owned(v.to_string()),
            Cell::Decimal(v) => Cow::Owned(v.to_string()),
        }
    }

    /// The cell as a whole number, the way it enters Numeric fields and
    /// aggregate totals. Fractional text is accepted and truncated toward
    /// zero.
    ///
    /// # Returns:
    /// `None` when the cell is absent or its text does not parse as a
    /// number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Absent => None,
            Cell::Integer(v) => Some(*v),
            Cell::Decimal(v) => Some(*v as i64),
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|v| v as i64))
            }
        }
    }

    /// The cell as a floating-point number, for Numeric fields that carry
    /// decimals.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Cell::Absent => None,
            Cell::Integer(v) => Some(*v as f64),
            Cell::Decimal(v) => Some(*v),
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse::<f64>().ok()
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::from_raw(s)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Integer(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Decimal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_text_is_trimmed_and_classified() {
        assert_eq!(Cell::from_raw(""), Cell::Absent);
        assert_eq!(Cell::from_raw("   "), Cell::Absent);
        assert_eq!(Cell::from_raw(" 30 "), Cell::Text("30".into()));
        assert_eq!(Cell::from_raw("علی"), Cell::Text("علی".into()));
    }

    #[test]
    fn raw_formulas_resolve() {
        assert_eq!(
            Cell::from_raw("=REPT(0,10-LEN(\"0853900011\"))&\"0853900011\""),
            Cell::Text("0853900011".into())
        );
        assert_eq!(Cell::from_raw("=REPT(0,3)"), Cell::Text("000".into()));
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(Cell::from_raw("30").as_integer(), Some(30));
        assert_eq!(Cell::from_raw("-4").as_integer(), Some(-4));
        assert_eq!(Cell::from_raw("12.9").as_integer(), Some(12));
        assert_eq!(Cell::Decimal(7.8).as_integer(), Some(7));
        assert_eq!(Cell::Absent.as_integer(), None);
        assert_eq!(Cell::from_raw("abc").as_integer(), None);
    }

    #[test]
    fn empty_or_zero_detection() {
        assert!(Cell::Absent.is_empty_or_zero());
        assert!(Cell::from_raw("0").is_empty_or_zero());
        assert!(Cell::from_raw("0.0").is_empty_or_zero());
        assert!(Cell::Integer(0).is_empty_or_zero());
        assert!(!Cell::from_raw("9").is_empty_or_zero());
        assert!(!Cell::from_raw("x").is_empty_or_zero());
    }

    #[test]
    fn text_rendering() {
        assert_eq!(Cell::Integer(42).as_text(), "42");
        assert_eq!(Cell::Absent.as_text(), "");
        assert_eq!(Cell::from_raw("مرد").as_text(), "مرد");
    }
}
