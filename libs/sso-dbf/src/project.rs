//! Projection of loose upstream rows into writable records.
//!
//! The projector owns everything that has to happen between the tabular
//! reader and the writer: per-list constants, date clean-up, the derived
//! insurance premium, and the header row's aggregate totals.

use crate::{cell::Cell, record::Record, validate};
use tracing::warn;

/// Header totals and the worker field each one sums.
const TOTALS: &[(&str, &str)] = &[
    ("DSK_TDD", "DSW_DD"),
    ("DSK_TROOZ", "DSW_ROOZ"),
    ("DSK_TMAH", "DSW_MAH"),
    ("DSK_TMAZ", "DSW_MAZ"),
    ("DSK_TMASH", "DSW_MASH"),
    ("DSK_TTOTL", "DSW_TOTL"),
    ("DSK_TBIME", "DSW_BIME"),
    ("DSK_TKOSO", "DSW_KOSO"),
];

/// Worker fields that hold Jalali dates.
const WORKER_DATES: &[&str] = &["DSW_IDATE", "DSW_BDATE", "DSW_SDATE", "DSW_EDATE"];

/// The default employee share of the insurance rate, percent.
const DEFAULT_PREMIUM_RATE: i64 = 7;

/// Identification of one monthly list.
///
/// These four values recur in every record of both files; they are fixed
/// once per conversion and threaded through the [Projector] instead of
/// living in globals.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Workshop id (کد کارگاه), up to 10 digits.
    pub workshop_id: String,
    /// Two-digit SSO year (e.g. `3` for 1403).
    pub year: u16,
    /// Month 1–12.
    pub month: u8,
    /// List number within the month.
    pub list_no: String,
}

impl ListParams {
    pub fn new(
        workshop_id: impl Into<String>,
        year: u16,
        month: u8,
        list_no: impl Into<String>,
    ) -> Self {
        Self {
            workshop_id: workshop_id.into(),
            year,
            month,
            list_no: list_no.into(),
        }
    }
}

/// Builds writable header and worker records for one list.
#[derive(Debug, Clone)]
pub struct Projector {
    params: ListParams,
}

impl Projector {
    pub fn new(params: ListParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Projects the worker rows, preserving their input order.
    pub fn project_workers(&self, rows: &[Record]) -> Vec<Record> {
        rows.iter().map(|row| self.project_worker(row)).collect()
    }

    fn project_worker(&self, row: &Record) -> Record {
        let mut out = row.clone();

        out.set("DSW_ID", Cell::Text(zero_fill(&self.params.workshop_id, 10)));
        out.set("DSW_YY", Cell::Text(format!("{:02}", self.params.year)));
        out.set("DSW_MM", Cell::Text(format!("{:02}", self.params.month)));
        out.set("DSW_LISTNO", Cell::Text(zero_fill(&self.params.list_no, 11)));

        for &name in WORKER_DATES {
            let cell = out.get(name);
            if cell.is_absent() {
                continue;
            }
            let raw = cell.as_text().into_owned();
            match validate::normalize_jalali_date(&raw) {
                Some(date) => {
                    if !validate::is_valid_jalali_date(&date) {
                        warn!("{name} holds implausible date {date:?}");
                    }
                    out.set(name, Cell::Text(date));
                }
                None => {
                    warn!("{name} holds non-date {raw:?}, storing blanks");
                    out.set(name, Cell::Absent);
                }
            }
        }

        // The premium is derivable when the export leaves it out: 7% of the
        // insurable salary.
        if out.get("DSW_BIME").is_absent() {
            if let Some(mash) = out.get("DSW_MASH").as_integer() {
                out.set("DSW_BIME", Cell::Integer((mash as f64 * 0.07) as i64));
            }
        }
        if out.get("DSW_PRATE").is_absent() {
            out.set("DSW_PRATE", Cell::Integer(DEFAULT_PREMIUM_RATE));
        }

        let natcod = out.get("PER_NATCOD");
        if !natcod.is_absent() && !validate::is_valid_national_id(&natcod.as_text()) {
            warn!("PER_NATCOD {:?} fails the checksum", natcod.as_text());
        }

        out
    }

    /// Builds the single summary record from the input header row and the
    /// already-projected worker records.
    pub fn project_header(&self, row: &Record, workers: &[Record]) -> Record {
        let mut out = row.clone();

        // Some exports still carry the pre-2024 column names.
        out.rename("DSK_TINC", "DSK_INC");
        out.rename("DSK_TSPOUS", "DSK_SPOUSE");

        out.set("DSK_YY", Cell::Integer(self.params.year as i64));
        out.set("DSK_MM", Cell::Integer(self.params.month as i64));
        out.set("DSK_NUM", Cell::Integer(workers.len() as i64));

        for &(total, source) in TOTALS {
            out.set(total, Cell::Integer(sum_field(workers, source)));
        }

        if out.get("DSK_PRATE").is_absent() {
            out.set("DSK_PRATE", Cell::Integer(DEFAULT_PREMIUM_RATE));
        }

        out
    }
}

fn sum_field(workers: &[Record], name: &str) -> i64 {
    workers
        .iter()
        .map(|w| {
            let cell = w.get(name);
            cell.as_integer().unwrap_or_else(|| {
                if !cell.is_absent() {
                    warn!("{name} holds non-numeric {cell:?}, counting 0");
                }
                0
            })
        })
        .sum()
}

fn zero_fill(value: &str, width: usize) -> String {
    if value.len() >= width {
        value.to_string()
    } else {
        format!("{}{value}", "0".repeat(width - value.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(ListParams::new("853900011", 3, 9, "1"))
    }

    fn worker(fields: &[(&str, &str)]) -> Record {
        fields.iter().map(|&(n, v)| (n, v)).collect()
    }

    #[test]
    fn per_list_constants() {
        let projected = projector().project_workers(&[worker(&[("DSW_FNAME", "علی")])]);
        let w = &projected[0];
        assert_eq!(w.get("DSW_ID"), &Cell::Text("0853900011".into()));
        assert_eq!(w.get("DSW_YY"), &Cell::Text("03".into()));
        assert_eq!(w.get("DSW_MM"), &Cell::Text("09".into()));
        assert_eq!(w.get("DSW_LISTNO"), &Cell::Text("00000000001".into()));
        // The input cells survive.
        assert_eq!(w.get("DSW_FNAME"), &Cell::Text("علی".into()));
    }

    #[test]
    fn header_totals() {
        let p = projector();
        let workers = p.project_workers(&[
            worker(&[("DSW_DD", "30"), ("DSW_ROOZ", "1000000"), ("DSW_BIME", "70000")]),
            worker(&[("DSW_DD", "15"), ("DSW_ROOZ", "500000"), ("DSW_BIME", "35000")]),
            worker(&[("DSW_DD", "bad"), ("DSW_BIME", "5")]),
        ]);
        let header = p.project_header(&Record::new(), &workers);

        assert_eq!(header.get("DSK_NUM"), &Cell::Integer(3));
        assert_eq!(header.get("DSK_TDD"), &Cell::Integer(45)); // "bad" counts 0
        assert_eq!(header.get("DSK_TROOZ"), &Cell::Integer(1500000));
        assert_eq!(header.get("DSK_TBIME"), &Cell::Integer(105005));
        assert_eq!(header.get("DSK_TKOSO"), &Cell::Integer(0));
        assert_eq!(header.get("DSK_YY"), &Cell::Integer(3));
        assert_eq!(header.get("DSK_MM"), &Cell::Integer(9));
    }

    #[test]
    fn header_aliases_and_rate_default() {
        let p = projector();
        let row: Record = [("DSK_TINC", "100"), ("DSK_TSPOUS", "200")]
            .into_iter()
            .collect();
        let header = p.project_header(&row, &[]);
        assert_eq!(header.get("DSK_INC"), &Cell::Text("100".into()));
        assert_eq!(header.get("DSK_SPOUSE"), &Cell::Text("200".into()));
        assert_eq!(header.get("DSK_PRATE"), &Cell::Integer(7));

        let row: Record = [("DSK_PRATE", "20")].into_iter().collect();
        let header = p.project_header(&row, &[]);
        assert_eq!(header.get("DSK_PRATE"), &Cell::Text("20".into()));
    }

    #[test]
    fn premium_derived_from_insurable_salary() {
        let p = projector();
        let projected =
            p.project_workers(&[worker(&[("DSW_MASH", "1000000")])]);
        assert_eq!(projected[0].get("DSW_BIME"), &Cell::Integer(70000));
        assert_eq!(projected[0].get("DSW_PRATE"), &Cell::Integer(7));

        // A provided premium is left alone.
        let projected =
            p.project_workers(&[worker(&[("DSW_MASH", "1000000"), ("DSW_BIME", "123")])]);
        assert_eq!(projected[0].get("DSW_BIME"), &Cell::Text("123".into()));
    }

    #[test]
    fn dates_are_normalized() {
        let p = projector();
        let projected = p.project_workers(&[worker(&[
            ("DSW_BDATE", "1365/05/23"),
            ("DSW_SDATE", "650523"),
            ("DSW_EDATE", "whenever"),
        ])]);
        let w = &projected[0];
        assert_eq!(w.get("DSW_BDATE"), &Cell::Text("13650523".into()));
        assert_eq!(w.get("DSW_SDATE"), &Cell::Text("13650523".into()));
        assert_eq!(w.get("DSW_EDATE"), &Cell::Absent);
        assert_eq!(w.get("DSW_IDATE"), &Cell::Absent);
    }

    #[test]
    fn worker_order_is_preserved() {
        let p = projector();
        let rows: Vec<Record> = (0..20)
            .map(|i| {
                let id = i.to_string();
                worker(&[("DSW_ID1", id.as_str())])
            })
            .collect();
        let projected = p.project_workers(&rows);
        for (i, w) in projected.iter().enumerate() {
            assert_eq!(w.get("DSW_ID1"), &Cell::Text(i.to_string()));
        }
    }
}
