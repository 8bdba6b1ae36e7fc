#![cfg_attr(rustfmt, rustfmt_skip)]

use crate::tables::constants::*;
use crate::tables::cp1256::backward_cp_1256;
use crate::tables::shaping::{glyph, Form};
use crate::tables::unicode::IRAN_SYSTEM;

#[test]
fn cp1256_backward_covers_the_repertoire() {
    // ASCII is identity.
    assert_eq!(backward_cp_1256('A' as u32), Some(0x41));
    assert_eq!(backward_cp_1256(' ' as u32), Some(0x20));

    // The letters the shaper relies on.
    assert_eq!(backward_cp_1256('ع' as u32), Some(0xDA));
    assert_eq!(backward_cp_1256('ل' as u32), Some(0xE1));
    assert_eq!(backward_cp_1256('ي' as u32), Some(0xED));
    assert_eq!(backward_cp_1256('ا' as u32), Some(0xC7));
    assert_eq!(backward_cp_1256('و' as u32), Some(0xE6));
    assert_eq!(backward_cp_1256('؟' as u32), Some(CP1256_QUESTION_MARK));

    // The four Persian letters with dedicated slots.
    assert_eq!(backward_cp_1256('پ' as u32), Some(0x81));
    assert_eq!(backward_cp_1256('چ' as u32), Some(0x8D));
    assert_eq!(backward_cp_1256('ژ' as u32), Some(0x8E));
    assert_eq!(backward_cp_1256('گ' as u32), Some(0x90));

    // Outside the repertoire.
    assert_eq!(backward_cp_1256('Ш' as u32), None);
    assert_eq!(backward_cp_1256(0x1F4A9), None);
}

#[test]
fn shaping_tables_digit_rows_agree() {
    for form in [Form::Isolated, Form::Final, Form::Initial, Form::Medial] {
        for d in 0x30..=0x39u8 {
            assert_eq!(glyph(form, d), d + DIGIT_SHIFT);
        }
    }
}

#[test]
fn shaping_tables_pass_unmapped_bytes_through() {
    // ASCII and bytes without a positional glyph keep their value.
    for form in [Form::Isolated, Form::Final, Form::Initial, Form::Medial] {
        assert_eq!(glyph(form, b'A'), b'A');
        assert_eq!(glyph(form, 0xC0), 0xC0); // ہ has no Iran System slot
        assert_eq!(glyph(form, 0xD7), 0xD7); // ×
    }
}

#[test]
fn alef_positional_glyphs() {
    // ا only distinguishes final (0x90) from joined-to (0x91); an isolated
    // ا has no dedicated slot and passes through.
    assert_eq!(glyph(Form::Final, 0xC7), 0x90);
    assert_eq!(glyph(Form::Initial, 0xC7), ALEF_FINAL);
    assert_eq!(glyph(Form::Medial, 0xC7), ALEF_FINAL);
    assert_eq!(glyph(Form::Isolated, 0xC7), 0xC7);
}

#[test]
fn decode_table_is_total_and_ascii_clean() {
    for (i, &v) in IRAN_SYSTEM.iter().enumerate() {
        assert!(
            char::from_u32(v as u32).is_some(),
            "slot 0x{i:02X} holds an invalid scalar"
        );
        if i < 0x80 {
            assert_eq!(v as usize, i, "ASCII slot 0x{i:02X} must be identity");
        }
    }
}

#[test]
fn decode_table_known_slots() {
    assert_eq!(IRAN_SYSTEM[0x80], 0x06F0); // ۰
    assert_eq!(IRAN_SYSTEM[0x89], 0x06F9); // ۹
    assert_eq!(IRAN_SYSTEM[0x8A], 0x060C); // ،
    assert_eq!(IRAN_SYSTEM[0x90], 0x0627); // ا
    assert_eq!(IRAN_SYSTEM[ALEF_FINAL as usize], 0x0627);
    assert_eq!(IRAN_SYSTEM[LAM_ALEF as usize], 0x0644); // decoder appends the ALEF
    assert_eq!(IRAN_SYSTEM[0xB0], 0x2591); // ░
    assert_eq!(IRAN_SYSTEM[0xDB], 0x2588); // █
    assert_eq!(IRAN_SYSTEM[0xED], 0x06A9); // ک
    assert_eq!(IRAN_SYSTEM[0xFC], 0x06CC); // ی
    assert_eq!(IRAN_SYSTEM[0xFF], 0x00A0); // NBSP
}

#[test]
fn shaped_glyphs_decode_back_to_their_letter() {
    // For every joining letter the four positional glyphs must collapse to
    // the same base letter on decode. (ة and ى share glyph rows with ه and
    // ی, so they come back as those.)
    let letters: &[(u8, u16)] = &[
        (0xC8, 0x0628), // ب
        (0xCA, 0x062A), // ت
        (0xCC, 0x062C), // ج
        (0xCD, 0x062D), // ح
        (0xD3, 0x0633), // س
        (0xD5, 0x0635), // ص
        (0xDA, 0x0639), // ع
        (0xDD, 0x0641), // ف
        (0xE3, 0x0645), // م
        (0xE4, 0x0646), // ن
        (0x81, 0x067E), // پ
        (0x8D, 0x0686), // چ
    ];
    for &(byte, base) in letters {
        for form in [Form::Isolated, Form::Final, Form::Initial, Form::Medial] {
            let g = glyph(form, byte);
            assert_eq!(
                IRAN_SYSTEM[g as usize], base,
                "byte 0x{byte:02X} {form:?} glyph 0x{g:02X}"
            );
        }
    }
}
