use crate::tables::constants::*;

/// Returns `true` for the byte values the shaper treats as whitespace.
///
/// Besides the usual ASCII blanks this includes NUL and ESC, which show up in
/// fixed-width records coming from legacy readers.
pub fn is_white(c: u8) -> bool {
    matches!(c, 0 | 8 | 9 | 10 | 13 | 27 | 32)
}

/// Returns `true` for the ASCII range the shaper passes through verbatim
/// (`0x20..=0x7F`).
///
/// Such bytes bypass the shaper entirely and go through
/// [latin_glyph](crate::ascii::latin_glyph) instead.
pub fn is_latin(c: u8) -> bool {
    matches!(c, 0x20..=0x7F)
}

/// CP-1256 bytes of the letters that never connect to the letter after them
/// (to the left in logical order): `ء آ أ ؤ إ ا د ذ ر ز ژ و`.
pub static RIGHT_JOINING: [u8; 12] = [
    0x8E, // ژ
    0xC1, // ء
    0xC2, // آ
    0xC3, // أ
    0xC4, // ؤ
    0xC5, // إ
    0xC7, // ا
    0xCF, // د
    0xD0, // ذ
    0xD1, // ر
    0xD2, // ز
    0xE6, // و
];

pub fn is_right_joining(c: u8) -> bool {
    RIGHT_JOINING.contains(&c)
}

/// Returns `true` when a neighbouring byte interrupts cursive joining on its
/// own: whitespace, printable ASCII, or `؟`.
///
/// A *preceding* right-joining letter interrupts joining too; that case is
/// checked separately because it only applies on the right-hand side.
pub fn is_join_breaker(c: u8) -> bool {
    is_white(c) || is_latin(c) || c == CP1256_QUESTION_MARK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_and_latin_classes() {
        assert!(is_white(b' '));
        assert!(is_white(0));
        assert!(is_white(27));
        assert!(!is_white(b'A'));

        assert!(is_latin(b' '));
        assert!(is_latin(b'z'));
        assert!(is_latin(b'0'));
        assert!(!is_latin(0x1F));
        assert!(!is_latin(0x80));
        assert!(!is_latin(0xC7));
    }

    #[test]
    fn right_joining_letters() {
        // ا and د interrupt joining, ب and ل do not.
        assert!(is_right_joining(0xC7));
        assert!(is_right_joining(0xCF));
        assert!(!is_right_joining(0xC8));
        assert!(!is_right_joining(0xE1));
    }

    #[test]
    fn question_mark_breaks_joining() {
        assert!(is_join_breaker(CP1256_QUESTION_MARK));
        assert!(is_join_breaker(b' '));
        assert!(!is_join_breaker(0xE1));
    }
}
