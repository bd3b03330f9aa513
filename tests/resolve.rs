// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tests of code → glyph and code ↔ Unicode mapping of resolved fonts

mod common;

use common::{tag_of, MockProgram, MockSystem};
use pdf_font_map::cid::{CidToGid, WidthItem};
use pdf_font_map::document::{CMapSource, Document, FontDescription, FontIdentity};
use pdf_font_map::font::{BaseEncoding, FontSubtype};
use pdf_font_map::fonts::{Charset, EnumeratedFace, StyleFlags};
use pdf_font_map::GlyphId;
use std::rc::Rc;

#[test]
fn unicode_round_trip() {
    let program = MockProgram::new(1)
        .named("A", 3)
        .named("eacute", 4)
        .named("Euro", 5)
        .shared();
    let ctx = MockSystem::new().embed(b"type1", program).context();
    let mut doc = Document::new();
    let desc = FontDescription::new("ABCDEF+Minion", FontSubtype::Type1)
        .with_flags(StyleFlags::NONSYMBOLIC)
        .with_encoding(BaseEncoding::WinAnsi)
        .with_program(b"type1".to_vec());
    let font = doc.resolve(FontIdentity::from(2), &desc, &ctx);
    assert!(font.is_embedded());
    assert!(font.is_unicode_compatible());

    for ch in ['A', 'é', '€'] {
        let code = font.char_code_from_unicode(ch).unwrap();
        assert_eq!(font.unicode_from_char_code(code), Some(ch.to_string()));
    }
    assert_eq!(font.char_code_from_unicode('€'), Some(0x80));
    assert_eq!(font.glyph_from_char_code(0xE9), Some(GlyphId(4)));

    assert_eq!(font.char_code_from_unicode('Ж'), None);
    assert_eq!(font.unicode_from_char_code(0x81), None);
}

#[test]
fn independent_lookups() {
    let program = MockProgram::new(1).symbol(&[0x41]).shared();
    let ctx = MockSystem::new().embed(b"symbol", program).context();
    let mut doc = Document::new();
    let desc = FontDescription::new("Pictos", FontSubtype::TrueType)
        .with_flags(StyleFlags::SYMBOLIC)
        .with_program(b"symbol".to_vec());
    let font = doc.resolve(FontIdentity::from(2), &desc, &ctx);

    assert!(!font.is_unicode_compatible());
    assert_eq!(font.unicode_from_char_code(0x41), None);
    assert_eq!(font.glyph_from_char_code(0x41), Some(GlyphId(1)));
    assert_eq!(font.glyph_from_char_code(0x42), None);
}

#[test]
fn to_unicode_precedence() {
    let program = MockProgram::new(1).symbol(&[0x41]).shared();
    let ctx = MockSystem::new().embed(b"symbol", program).context();
    let mut doc = Document::new();
    let desc = FontDescription::new("Pictos", FontSubtype::TrueType)
        .with_flags(StyleFlags::SYMBOLIC)
        .with_program(b"symbol".to_vec())
        .with_to_unicode(&b"1 beginbfchar <41> <0058> endbfchar"[..]);
    let font = doc.resolve(FontIdentity::from(2), &desc, &ctx);

    assert!(font.is_unicode_compatible());
    assert_eq!(font.unicode_from_char_code(0x41).as_deref(), Some("X"));
    assert_eq!(font.char_code_from_unicode('X'), Some(0x41));
    assert_eq!(font.glyph_from_char_code(0x41), Some(GlyphId(1)));
}

#[test]
fn program_widths() {
    let program = MockProgram::new(1).named("A", 3).shared();
    let ctx = MockSystem::new().embed(b"type1", program).context();
    let mut doc = Document::new();
    let desc = FontDescription::new("Minion", FontSubtype::Type1).with_program(b"type1".to_vec());
    let font = doc.resolve(FontIdentity::from(2), &desc, &ctx);

    // Advance 600 at 2000 units per em
    assert_eq!(font.char_width(0x41), 300);
    assert_eq!(font.char_width(0x42), 0);
}

fn cid_font(ctx: &pdf_font_map::fonts::FontManagerContext, cmap: &str) -> pdf_font_map::font::FontRef {
    let mut doc = Document::new();
    let desc = FontDescription::new("ABCDEF+KozMin", FontSubtype::Type0)
        .with_cmap(CMapSource::Name(cmap.into()))
        .with_ordering("Japan1")
        .with_program(b"cid".to_vec())
        .with_cid_to_gid(CidToGid::Stream(Rc::from(&[0u8, 5, 0, 7][..])))
        .with_cid_widths(
            Some(800),
            vec![WidthItem::Num(1), WidthItem::Array(vec![500, 600])],
        );
    doc.resolve(FontIdentity::from(9), &desc, ctx)
}

#[test]
fn cid_to_gid() {
    let ctx = MockSystem::new()
        .embed(b"cid", MockProgram::new(6).shared())
        .context();
    let font = cid_font(&ctx, "Identity-H");
    assert!(font.is_embedded());
    assert!(!font.is_vertical());

    assert_eq!(font.glyph_from_char_code(0), Some(GlyphId(5)));
    assert_eq!(font.glyph_from_char_code(1), Some(GlyphId(7)));
    // Beyond the end of the stream: identity
    assert_eq!(font.glyph_from_char_code(2), Some(GlyphId(2)));
    assert_eq!(font.glyph_from_char_code(0x1234), Some(GlyphId(0x1234)));
    assert_eq!(font.cid_from_char_code(0x1234), Some(0x1234));

    assert_eq!(font.char_width(1), 500);
    assert_eq!(font.char_width(2), 600);
    assert_eq!(font.char_width(3), 800);

    let bytes = [0x00, 0x01, 0x12, 0x34];
    assert_eq!(font.count_char(&bytes), 2);
    let mut offset = 0;
    assert_eq!(font.next_char(&bytes, &mut offset), Some(1));
    assert_eq!(font.next_char(&bytes, &mut offset), Some(0x1234));
    assert_eq!(offset, 4);
    assert_eq!(font.next_char(&bytes, &mut offset), None);
}

#[test]
fn cid_vertical() {
    let ctx = MockSystem::new()
        .embed(b"cid", MockProgram::new(6).shared())
        .context();
    let font = cid_font(&ctx, "Identity-V");
    assert!(font.is_vertical());
    assert_eq!(font.vertical_origin(1), Some((250, 880)));
    assert_eq!(font.vertical_origin(3), Some((400, 880)));
    assert_eq!(font.vertical_advance(1), Some(-1000));
}

#[test]
fn cid_ucs2_substitution() {
    let ctx = MockSystem::new()
        .install(
            EnumeratedFace::new("SimSun")
                .with_charset(Charset::ChineseSimplified)
                .with_unicode_bits(&[59]),
            MockProgram::new(3).unicode("中文").shared(),
        )
        .context();
    let mut doc = Document::new();
    let desc = FontDescription::new("SimSun", FontSubtype::Type0)
        .with_cmap(CMapSource::Name("UniGB-UCS2-H".into()))
        .with_ordering("GB1");
    let font = doc.resolve(FontIdentity::from(4), &desc, &ctx);

    assert!(font.is_substituted());
    assert_eq!(tag_of(font.program()), Some(3));
    assert!(font.is_unicode_compatible());
    assert_eq!(font.glyph_from_char_code(0x4E2D), Some(GlyphId(1)));
    assert_eq!(font.unicode_from_char_code(0x6587).as_deref(), Some("文"));
    assert_eq!(font.char_code_from_unicode('文'), Some(0x6587));
    assert_eq!(font.char_width(0x4E2D), 1000);
}

#[test]
fn cid_japan1_backslash() {
    let ctx = MockSystem::new()
        .install(
            EnumeratedFace::new("MS Gothic")
                .with_charset(Charset::ShiftJis)
                .with_unicode_bits(&[0]),
            MockProgram::new(3).unicode("/\\").shared(),
        )
        .context();
    let mut doc = Document::new();
    let desc = FontDescription::new("MS-Gothic", FontSubtype::Type0)
        .with_cmap(CMapSource::Name("UniJIS-UCS2-H".into()))
        .with_ordering("Japan1");
    let font = doc.resolve(FontIdentity::from(4), &desc, &ctx);

    assert_eq!(tag_of(font.program()), Some(3));
    assert_eq!(font.glyph_from_char_code(0x5C), Some(GlyphId(1)));
    assert_eq!(font.glyph_from_char_code(0xA5), Some(GlyphId(2)));
}

#[test]
fn cid_substitute_through_cmap() {
    let ctx = MockSystem::new()
        .install(
            EnumeratedFace::new("MS Gothic")
                .with_charset(Charset::ShiftJis)
                .with_unicode_bits(&[0]),
            MockProgram::new(3).unicode("A").shared(),
        )
        .context();
    let cmap = b"/CMapName /Test-H def
1 begincodespacerange <8140> <9FFC> endcodespacerange
1 begincidrange <8140> <817E> 633 endcidrange";
    let mut doc = Document::new();
    let desc = FontDescription::new("MS-Gothic", FontSubtype::Type0)
        .with_cmap(CMapSource::Stream(cmap.to_vec()))
        .with_ordering("Japan1");
    let font = doc.resolve(FontIdentity::from(5), &desc, &ctx);

    assert!(font.is_substituted());
    assert_eq!(font.cid_from_char_code(0x8140), Some(633));
    assert_eq!(font.glyph_from_char_code(0x8140), Some(GlyphId(633)));
    assert_eq!(font.glyph_from_char_code(0x8141), Some(GlyphId(634)));
}

#[test]
fn cid_embedded_ucs2() {
    let ctx = MockSystem::new()
        .embed(b"gb", MockProgram::new(1).unicode("AB").shared())
        .context();
    let mut doc = Document::new();
    let desc = FontDescription::new("ABCDEF+SimHei", FontSubtype::Type0)
        .with_cmap(CMapSource::Name("UniGB-UCS2-H".into()))
        .with_ordering("GB1")
        .with_program(b"gb".to_vec())
        .with_cid_widths(None, vec![WidthItem::Num(0x41), WidthItem::Array(vec![500])]);
    let font = doc.resolve(FontIdentity::from(6), &desc, &ctx);

    assert!(!font.is_substituted());
    assert_eq!(font.cid_from_char_code(0x41), Some(0x41));
    assert_eq!(font.glyph_from_char_code(0x41), Some(GlyphId(1)));
    assert_eq!(font.glyph_from_char_code(0x42), Some(GlyphId(2)));
    assert_eq!(font.char_width(0x41), 500);
    assert_eq!(font.char_width(0x42), 1000);
}

#[test]
fn type3() {
    let ctx = MockSystem::new().context();
    let mut doc = Document::new();
    let desc = FontDescription::new("T3", FontSubtype::Type3)
        .with_differences(vec![
            pdf_font_map::font::Difference::Code(0x61),
            pdf_font_map::font::Difference::Name("a".into()),
            pdf_font_map::font::Difference::Name("b".into()),
        ])
        .with_char_procs(vec!["b".into(), "a".into()])
        .with_widths(0x61, vec![250.0, 500.0], 0.0)
        .with_font_matrix([0.002, 0.0, 0.0, 0.002, 0.0, 0.0]);
    let font = doc.resolve(FontIdentity::from(5), &desc, &ctx);

    assert!(font.program().is_none());
    assert_eq!(font.glyph_from_char_code(0x61), Some(GlyphId(1)));
    assert_eq!(font.glyph_from_char_code(0x62), Some(GlyphId(0)));
    assert_eq!(font.glyph_from_char_code(0x63), None);
    assert_eq!(font.char_width(0x62), 1000);
    assert_eq!(font.unicode_from_char_code(0x61).as_deref(), Some("a"));
}
