use crate::tables::constants::*;

/// Rewrites a printable ASCII byte for storage inside an Iran System stream.
///
/// - digits `'0'..='9'` shift by 80 into the Iran System digit row
///   (`0x80..=0x89`);
/// - the bracket pairs `( ) [ ] { }` are mirror-swapped so that they still
///   open toward the text after the visual-order reversal;
/// - everything else passes through unchanged.
pub fn latin_glyph(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c + DIGIT_SHIFT,
        b'(' => b')',
        b')' => b'(',
        b'[' => b']',
        b']' => b'[',
        b'{' => b'}',
        b'}' => b'{',
        _ => c,
    }
}

/// Returns `true` when `text` is a number and nothing else: at least one
/// digit, with optional whitespace anywhere.
///
/// Numbers keep their logical order on disk, so the encoder skips the
/// visual-order reversal for such strings. Persian and Arabic-Indic digits
/// count as digits here.
pub fn is_numeric_text(text: &str) -> bool {
    let mut seen_digit = false;
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_ascii_digit() || ('\u{06F0}'..='\u{06F9}').contains(&c) || ('\u{0660}'..='\u{0669}').contains(&c) {
            seen_digit = true;
        } else {
            return false;
        }
    }
    seen_digit
}
