//! The two SSO table layouts (2024 revision).
//!
//! Field order, widths and the Persian-shaped subset were extracted from
//! known-good files accepted by the SSO consumer. Position is significant:
//! the consumer reads records by offset, not by name.

/// Storage class of a field. The SSO files use no other dBase kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Character,
    Numeric,
}

impl FieldKind {
    /// The type byte stored in the field descriptor.
    pub fn code(self) -> u8 {
        match self {
            FieldKind::Character => b'C',
            FieldKind::Numeric => b'N',
        }
    }
}

/// One column of a table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name, at most 10 ASCII bytes.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Payload width in bytes, `1..=255`.
    pub width: u8,
    /// Decimal places for [Numeric](FieldKind::Numeric) fields.
    pub decimals: u8,
    /// Character content is Persian and must be shaped through the Iran
    /// System codec.
    pub persian: bool,
    /// The consumer rejects a zero in this field; empty, `"0"` and numeric
    /// zero are all stored as spaces.
    pub blank_zero: bool,
}

/// An ordered table layout.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// On-disk file name of this table.
    pub file_name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Byte length of one record: the deletion flag plus all field widths.
    pub fn record_len(&self) -> u16 {
        1 + self
            .fields
            .iter()
            .map(|f| f.width as u16)
            .sum::<u16>()
    }

    /// Byte length of the file header including the terminator.
    pub fn header_len(&self) -> u16 {
        32 + 32 * self.fields.len() as u16 + 1
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

macro_rules! declare_fields {
    ($( $name:literal $kind:ident $width:literal $(, $flag:ident)* ; )*) => {
        &[ $(
            FieldDescriptor {
                name: $name,
                kind: FieldKind::$kind,
                width: $width,
                decimals: 0,
                persian: false $( || declare_fields!(@is persian $flag) )*,
                blank_zero: false $( || declare_fields!(@is blank_zero $flag) )*,
            },
        )* ]
    };
    (@is persian persian) => { true };
    (@is persian blank_zero) => { false };
    (@is blank_zero blank_zero) => { true };
    (@is blank_zero persian) => { false };
}

/// `DSKKAR00.DBF`: the one-record list summary table.
pub static HEADER: Schema = Schema {
    file_name: "DSKKAR00.DBF",
    fields: declare_fields! {
        "DSK_ID"     Character 10;
        "DSK_NAME"   Character 30, persian;
        "DSK_FARM"   Character 30, persian;
        "DSK_ADRS"   Character 40, persian;
        "DSK_KIND"   Numeric    1;
        "DSK_YY"     Numeric    2;
        "DSK_MM"     Numeric    2;
        "DSK_LISTNO" Character 12;
        "DSK_DISC"   Character 30, persian;
        "DSK_NUM"    Numeric    5;
        "DSK_TDD"    Numeric    6;
        "DSK_TROOZ"  Numeric   12;
        "DSK_TMAH"   Numeric   12;
        "DSK_TMAZ"   Numeric   12;
        "DSK_TMASH"  Numeric   12;
        "DSK_TTOTL"  Numeric   12;
        "DSK_TBIME"  Numeric   12;
        "DSK_TKOSO"  Numeric   12;
        "DSK_BIC"    Numeric   12;
        "DSK_RATE"   Numeric    5;
        "DSK_PRATE"  Numeric    2;
        "DSK_BIMH"   Numeric   12;
        "MON_PYM"    Character  3, blank_zero;
        "DSK_INC"    Numeric   12;
        "DSK_SPOUSE" Numeric   12;
    },
};

/// `DSKWOR00.DBF`: one record per insured worker.
///
/// `DSW_YY`/`DSW_MM` are Character here although their header counterparts
/// are Numeric; the consumer expects exactly that asymmetry.
pub static WORKERS: Schema = Schema {
    file_name: "DSKWOR00.DBF",
    fields: declare_fields! {
        "DSW_ID"     Character 10;
        "DSW_YY"     Character  2;
        "DSW_MM"     Character  2;
        "DSW_LISTNO" Character 11;
        "DSW_ID1"    Character 10;
        "DSW_FNAME"  Character 30, persian;
        "DSW_LNAME"  Character 40, persian;
        "DSW_DNAME"  Character 30, persian;
        "DSW_IDNO"   Character 20;
        "DSW_IDPLC"  Character 30, persian;
        "DSW_IDATE"  Character  8;
        "DSW_BDATE"  Character  8;
        "DSW_SEX"    Character  6, persian;
        "DSW_NAT"    Character 12, persian;
        "DSW_OCP"    Character 40, persian;
        "DSW_SDATE"  Character  8;
        "DSW_EDATE"  Character  8;
        "DSW_DD"     Numeric    2;
        "DSW_ROOZ"   Numeric   13;
        "DSW_MAH"    Numeric   13;
        "DSW_MAZ"    Numeric   13;
        "DSW_MASH"   Numeric   13;
        "DSW_TOTL"   Numeric   13;
        "DSW_BIME"   Numeric   13;
        "DSW_PRATE"  Character  2;
        "DSW_JOB"    Character  6;
        "PER_NATCOD" Character 10;
        "DSW_INC"    Numeric   13;
        "DSW_SPOUSE" Numeric   13;
    },
};
