// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tests of installed-font substitution

mod common;

use common::{tag_of, MockProgram, MockSystem, LATIN};
use pdf_font_map::document::{Document, FontDescription, FontIdentity};
use pdf_font_map::font::FontSubtype;
use pdf_font_map::fonts::{Charset, Codepage, EnumeratedFace, MatchRequest, StyleFlags};
use pdf_font_map::GlyphId;
use std::rc::Rc;

fn latin(family: &str, subfamily: &str) -> EnumeratedFace {
    EnumeratedFace::new(family)
        .with_subfamily(subfamily)
        .with_charset(Charset::Ansi)
        .with_unicode_bits(&[0, 1])
}

fn system() -> MockSystem {
    MockSystem::new()
        .install(latin("Arial", "Regular"), MockProgram::new(1).unicode(LATIN).shared())
        .install(latin("Arial", "Bold"), MockProgram::new(2).unicode(LATIN).shared())
        .install(
            latin("Times New Roman", "Regular"),
            MockProgram::new(3).unicode(LATIN).shared(),
        )
        .install(
            EnumeratedFace::new("Wingdings")
                .with_style(StyleFlags::SYMBOLIC)
                .with_charset(Charset::Symbol),
            MockProgram::new(4).symbol(&[0x41, 0x42]).shared(),
        )
        .install(
            EnumeratedFace::new("Cyrillic Sans")
                .with_codepages(&[Codepage::MSWIN_CYRILLIC])
                .with_unicode_bits(&[9]),
            MockProgram::new(5).unicode("АБВЖ").shared(),
        )
}

#[test]
fn helvetica_bold() {
    let ctx = system().context();
    let mut doc = Document::new();
    let desc = FontDescription::new("Helvetica-Bold", FontSubtype::Type1)
        .with_flags(StyleFlags::NONSYMBOLIC);

    let font = doc.resolve(FontIdentity::new(7, 0), &desc, &ctx);
    assert!(font.is_substituted());
    assert!(font.style().contains(StyleFlags::BOLD));
    assert_eq!(tag_of(font.program()), Some(2));
    assert_eq!(font.glyph_from_char_code(0x41), Some(GlyphId(1)));
    assert_eq!(font.glyph_from_char_code(0x80), None);
}

#[test]
fn wingdings() {
    let ctx = system().context();

    let request = MatchRequest::new().with_style(StyleFlags::SYMBOLIC);
    let candidates = ctx.match_system_font(&request);
    assert_eq!(candidates.len(), 1);
    assert_eq!(ctx.system_font(candidates[0].index).unwrap().name(), "Wingdings");

    // Non-symbolic requests never yield the symbolic face
    let candidates = ctx.match_system_font(&MatchRequest::new());
    assert!(!candidates.is_empty());
    for c in candidates.iter() {
        assert_ne!(ctx.system_font(c.index).unwrap().name(), "Wingdings");
    }

    let mut doc = Document::new();
    let desc = FontDescription::new("Wingdings", FontSubtype::TrueType)
        .with_flags(StyleFlags::SYMBOLIC);
    let font = doc.resolve(FontIdentity::from(3), &desc, &ctx);
    assert_eq!(tag_of(font.program()), Some(4));
    assert_eq!(font.glyph_from_char_code(0x42), Some(GlyphId(2)));
    assert_eq!(font.unicode_from_char_code(0x42), None);
}

#[test]
fn matcher_cache() {
    let ctx = system().context();
    let request = MatchRequest::new()
        .with_family("Arial")
        .with_style(StyleFlags::BOLD)
        .with_codepage(Codepage::MSWIN_WESTERN_EUROPEAN);

    let a = ctx.match_system_font(&request);
    let scans = ctx.scan_count();
    let b = ctx.match_system_font(&request);
    assert_eq!(ctx.scan_count(), scans);
    assert_eq!(a, b);
    assert_eq!(ctx.system_font(a[0].index).unwrap().name(), "Arial Bold");

    ctx.refresh_catalog();
    let c = ctx.match_system_font(&request);
    assert_eq!(ctx.scan_count(), scans + 1);
    assert_eq!(a, c);
}

#[test]
fn glyph_substitution() {
    let ctx = system()
        .embed(b"embedded", MockProgram::new(9).unicode(LATIN).shared())
        .context();
    let mut doc = Document::new();
    let desc = FontDescription::new("ABCDEF+Custom", FontSubtype::TrueType)
        .with_flags(StyleFlags::NONSYMBOLIC)
        .with_program(b"embedded".to_vec());
    let font = doc.resolve(FontIdentity::from(1), &desc, &ctx);
    assert!(font.is_embedded());

    let own = font.glyph_for_unicode('B', &ctx).unwrap();
    assert!(Rc::ptr_eq(&own.font, &font));
    assert_eq!(own.glyph, GlyphId(2));

    let sub = font.glyph_for_unicode('Ж', &ctx).unwrap();
    assert_eq!(sub.glyph, GlyphId(4));
    assert_eq!(tag_of(sub.font.program()), Some(5));
    assert_eq!(font.substitute_count(), 1);
    assert!(Rc::ptr_eq(&font.substitute(1).unwrap(), &sub.font));

    // The recorded substitute is reused for its Unicode range
    let again = font.glyph_for_unicode('Б', &ctx).unwrap();
    assert!(Rc::ptr_eq(&again.font, &sub.font));
    assert_eq!(font.substitute_count(), 1);

    // No font appears in its own chain
    assert_ne!(sub.font.id(), font.id());
    assert_eq!(sub.font.substitute_count(), 0);
}

#[test]
fn failure_memo() {
    let ctx = system().context();
    assert!(ctx.get_font_by_unicode('ก', StyleFlags::empty(), None).is_none());
    assert_eq!(ctx.failed_count(), 1);
    let scans = ctx.scan_count();
    assert!(ctx.get_font_by_unicode('ก', StyleFlags::BOLD, None).is_none());
    assert_eq!(ctx.scan_count(), scans);

    // A miss restricted to a family is not memoized
    assert!(ctx.get_font_by_unicode('ข', StyleFlags::empty(), Some("Arial")).is_none());
    assert_eq!(ctx.failed_count(), 1);

    ctx.refresh_catalog();
    assert_eq!(ctx.failed_count(), 0);
}

#[test]
fn failure_memo_survives_registration() {
    let ctx = system().context();
    assert!(ctx.get_font_by_unicode('ก', StyleFlags::empty(), None).is_none());
    assert_eq!(ctx.failed_count(), 1);

    let thai = EnumeratedFace::new("Thai Sans")
        .with_codepages(&[Codepage::MSDOS_THAI])
        .with_unicode_bits(&[24]);
    assert!(ctx.register_enumerated(thai));
    assert_eq!(ctx.failed_count(), 1);
    let scans = ctx.scan_count();
    assert!(ctx.get_font_by_unicode('ก', StyleFlags::empty(), None).is_none());
    assert_eq!(ctx.scan_count(), scans);

    // The catalog itself did change
    let request = MatchRequest::new().with_codepage(Codepage::MSDOS_THAI).with_unicode('ก');
    let candidates = ctx.match_system_font(&request);
    assert_eq!(ctx.scan_count(), scans + 1);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].index, 5);

    ctx.refresh_catalog();
    assert_eq!(ctx.failed_count(), 0);
}

#[test]
fn hyphenated_family_name() {
    let ctx = MockSystem::new()
        .install(latin("Helvetica", "Regular"), MockProgram::new(1).unicode(LATIN).shared())
        .install(
            EnumeratedFace::new("Helvetica-Bold")
                .with_style(StyleFlags::BOLD)
                .with_charset(Charset::Ansi)
                .with_unicode_bits(&[0, 1]),
            MockProgram::new(2).unicode(LATIN).shared(),
        )
        .install(latin("Arial", "Bold"), MockProgram::new(3).unicode(LATIN).shared())
        .context();

    let request = MatchRequest::new()
        .with_family("Helvetica")
        .with_style(StyleFlags::BOLD)
        .with_codepage(Codepage::MSWIN_WESTERN_EUROPEAN);
    let candidates = ctx.match_system_font(&request);
    let found: Vec<_> = candidates
        .iter()
        .map(|c| (ctx.system_font(c.index).unwrap().name().to_string(), c.penalty))
        .collect();
    assert_eq!(
        found,
        [("Helvetica-Bold".to_string(), -56000), ("Helvetica".to_string(), -55500)]
    );
}

#[test]
fn unicode_cache() {
    let ctx = system().context();
    let a = ctx.get_font_by_unicode('Ж', StyleFlags::empty(), None).unwrap();
    let b = ctx.get_font_by_unicode('В', StyleFlags::empty(), None).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    // Cached, but without a glyph for this code point
    assert!(ctx.get_font_by_unicode('Щ', StyleFlags::empty(), None).is_none());
}

#[test]
fn derive_font() {
    let ctx = system().context();
    let font = ctx.get_font_by_charset(Charset::Ansi, StyleFlags::empty()).unwrap();
    assert_eq!(font.name(), "Arial");
    assert_eq!(tag_of(font.program()), Some(1));

    let same = ctx.derive_font(&font, StyleFlags::empty(), Codepage::MSWIN_WESTERN_EUROPEAN);
    assert!(Rc::ptr_eq(&font, &same));

    let bold = ctx.derive_font(&font, StyleFlags::BOLD, Codepage::MSWIN_WESTERN_EUROPEAN);
    assert_eq!(bold.style(), StyleFlags::BOLD);
    assert_eq!(tag_of(bold.program()), Some(2));
    assert_ne!(bold.id(), font.id());
    let again = ctx.derive_font(&font, StyleFlags::BOLD, Codepage::MSWIN_WESTERN_EUROPEAN);
    assert!(Rc::ptr_eq(&bold, &again));
}

#[test]
fn derive_embedded() {
    let ctx = system()
        .embed(b"embedded", MockProgram::new(9).unicode(LATIN).shared())
        .context();
    let mut doc = Document::new();
    let desc = FontDescription::new("Custom", FontSubtype::TrueType).with_program(b"embedded".to_vec());
    let font = doc.resolve(FontIdentity::from(1), &desc, &ctx);
    let derived = ctx.derive_font(&font, StyleFlags::ITALIC, Codepage::DEF_ANSI);
    assert!(Rc::ptr_eq(&font, &derived));
}

#[test]
fn remove_font() {
    let ctx = system().context();
    let font = ctx.get_font_by_charset(Charset::Ansi, StyleFlags::empty()).unwrap();
    let cached = ctx.cached_font_count();
    assert!(cached > 0);
    assert!(Rc::ptr_eq(
        &font,
        &ctx.get_font_by_charset(Charset::Ansi, StyleFlags::empty()).unwrap()
    ));

    ctx.remove_font(&font);
    assert!(ctx.cached_font_count() < cached);
    let other = ctx.get_font_by_charset(Charset::Ansi, StyleFlags::empty()).unwrap();
    assert!(!Rc::ptr_eq(&font, &other));
    // The removed font stays valid while referenced
    assert_eq!(font.glyph_from_char_code(u32::from('z')), Some(GlyphId(52)));
}

#[test]
fn universal_fallback() {
    let ctx = MockSystem::new()
        .install(
            EnumeratedFace::new("Arial Unicode MS").with_charset(Charset::ChineseSimplified),
            MockProgram::new(8).unicode(LATIN).shared(),
        )
        .context();
    let font = ctx
        .substitute_font("Frutiger-Roman", StyleFlags::empty(), Charset::Ansi)
        .unwrap();
    assert_eq!(font.name(), "Arial Unicode MS");

    let empty = MockSystem::new().context();
    assert!(empty
        .substitute_font("Frutiger", StyleFlags::empty(), Charset::Ansi)
        .is_none());
    assert_eq!(empty.catalog_len(), 0);
}
