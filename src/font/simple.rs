// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Single-byte fonts: Type1, MMType1 and TrueType

use super::{FontEncoding, FontSubtype};
use super::encoding::BaseEncoding;
use crate::conv::to_usize;
use crate::fonts::{CharmapId, GlyphIndexResolver};
use crate::GlyphId;

/// Prefixes tried for codes in a (3, 0) Symbol character map
const SYMBOL_PREFIXES: [u32; 4] = [0, 0xF000, 0xF100, 0xF200];

/// Data specific to simple fonts
#[derive(Clone, Debug)]
pub struct SimpleFont {
    subtype: FontSubtype,
    encoding: FontEncoding,
    first_char: u32,
    widths: Vec<i32>,
    missing_width: i32,
    system: bool,
}

impl SimpleFont {
    /// Construct
    pub fn new(subtype: FontSubtype, encoding: FontEncoding) -> Self {
        SimpleFont {
            subtype,
            encoding,
            first_char: 0,
            widths: vec![],
            missing_width: 0,
            system: false,
        }
    }

    /// Construct the data of a system font
    ///
    /// Codes of a system font are Unicode values and are not limited to a
    /// single byte.
    pub fn system() -> Self {
        SimpleFont {
            system: true,
            ..SimpleFont::new(FontSubtype::TrueType, FontEncoding::default())
        }
    }

    /// Set `FirstChar`, `Widths` and `MissingWidth`
    pub fn with_widths(mut self, first_char: u32, widths: Vec<i32>, missing_width: i32) -> Self {
        self.first_char = first_char;
        self.widths = widths;
        self.missing_width = missing_width;
        self
    }

    /// The font subtype
    #[inline]
    pub fn subtype(&self) -> FontSubtype {
        self.subtype
    }

    /// The encoding
    #[inline]
    pub fn encoding(&self) -> &FontEncoding {
        &self.encoding
    }

    /// True for a system font, whose codes are Unicode values
    #[inline]
    pub fn is_system(&self) -> bool {
        self.system
    }

    /// True if widths were declared
    #[inline]
    pub fn has_widths(&self) -> bool {
        !self.widths.is_empty()
    }

    /// Declared width of `code`, else `MissingWidth`
    pub fn width(&self, code: u32) -> i32 {
        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(to_usize(i)))
            .copied()
            .unwrap_or(self.missing_width)
    }

    /// `MissingWidth`
    #[inline]
    pub fn missing_width(&self) -> i32 {
        self.missing_width
    }

    /// Unicode value of a code
    pub fn unicode(&self, code: u32) -> Option<char> {
        if self.system {
            return char::from_u32(code);
        }
        self.encoding.unicode(u8::try_from(code).ok()?)
    }

    /// Code of a Unicode value
    pub fn char_code(&self, ch: char) -> Option<u32> {
        if self.system {
            return Some(u32::from(ch));
        }
        self.encoding.char_code(ch).map(u32::from)
    }

    /// True unless the encoding is built into the program or symbolic
    pub fn is_unicode_compatible(&self) -> bool {
        self.system
            || !matches!(
                self.encoding.base(),
                BaseEncoding::Builtin | BaseEncoding::Symbol | BaseEncoding::ZapfDingbats
            )
    }

    /// Look up a glyph
    ///
    /// `embedded` is false when `resolver` wraps a substitute program.
    pub fn glyph(
        &self,
        resolver: &GlyphIndexResolver,
        code: u32,
        symbolic: bool,
        embedded: bool,
    ) -> Option<GlyphId> {
        if self.system {
            return resolver.glyph_from_char_code(code, symbolic);
        }
        let byte = u8::try_from(code).ok()?;

        if !embedded {
            let unicode = self.encoding.unicode(byte);
            if let Some(glyph) = unicode.and_then(|ch| resolver.glyph_from_unicode(ch)) {
                return Some(glyph);
            }
            if unicode.is_some() && !symbolic {
                return None;
            }
            return self.symbol_glyph(resolver, code);
        }

        match self.subtype {
            FontSubtype::TrueType => self.truetype_glyph(resolver, byte, symbolic),
            _ => self.type1_glyph(resolver, byte, symbolic),
        }
    }

    fn symbol_glyph(&self, resolver: &GlyphIndexResolver, code: u32) -> Option<GlyphId> {
        SYMBOL_PREFIXES
            .iter()
            .find_map(|prefix| resolver.glyph_from_char_code(prefix | code, true))
    }

    fn truetype_glyph(
        &self,
        resolver: &GlyphIndexResolver,
        code: u8,
        symbolic: bool,
    ) -> Option<GlyphId> {
        let program = resolver.program();
        let ms_unicode = program.find_charmap(CharmapId::MS_UNICODE);
        let unicode = self.encoding.unicode(code);

        if let Some(index) = program.find_charmap(CharmapId::MS_SYMBOL) {
            if symbolic || ms_unicode.is_none() {
                let code = u32::from(code);
                let glyph = SYMBOL_PREFIXES
                    .iter()
                    .find_map(|prefix| program.glyph_index(index, prefix | code));
                if glyph.is_some() {
                    return glyph;
                }
            }
        }

        if let Some(index) = program.find_charmap(CharmapId::APPLE_ROMAN) {
            let mac_code = match unicode {
                Some(ch) => BaseEncoding::MacRoman.char_code(ch),
                None => Some(code),
            };
            if let Some(glyph) = mac_code.and_then(|c| program.glyph_index(index, u32::from(c))) {
                return Some(glyph);
            }
        }

        if let (Some(index), Some(ch)) = (ms_unicode, unicode) {
            if let Some(glyph) = program.glyph_index(index, u32::from(ch)) {
                return Some(glyph);
            }
        }

        self.glyph_by_name(resolver, code)
    }

    fn type1_glyph(
        &self,
        resolver: &GlyphIndexResolver,
        code: u8,
        symbolic: bool,
    ) -> Option<GlyphId> {
        self.glyph_by_name(resolver, code)
            .or_else(|| {
                let ch = self.encoding.unicode(code)?;
                resolver.glyph_from_unicode(ch)
            })
            .or_else(|| resolver.glyph_from_char_code(u32::from(code), symbolic))
    }

    fn glyph_by_name(&self, resolver: &GlyphIndexResolver, code: u8) -> Option<GlyphId> {
        let name = self.encoding.glyph_name(code)?;
        resolver.program().glyph_index_by_name(&name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font::Difference;
    use crate::fonts::{FaceMetrics, GlyphProgram};
    use std::rc::Rc;
    use ttf_parser::Rect;

    // 'A' → 1 in the Unicode and Mac maps, 0xF041 → 2 in the Symbol map,
    // glyph "bullet" → 3 by name.
    struct Program {
        charmaps: Vec<CharmapId>,
    }

    impl GlyphProgram for Program {
        fn charmaps(&self) -> &[CharmapId] {
            &self.charmaps
        }
        fn glyph_index(&self, charmap: usize, code: u32) -> Option<GlyphId> {
            match (self.charmaps.get(charmap)?, code) {
                (&CharmapId::MS_UNICODE | &CharmapId::APPLE_ROMAN, 0x41) => Some(GlyphId(1)),
                (&CharmapId::APPLE_ROMAN, 0xA5) => Some(GlyphId(4)),
                (&CharmapId::MS_SYMBOL, 0xF041) => Some(GlyphId(2)),
                _ => None,
            }
        }
        fn glyph_index_by_name(&self, name: &str) -> Option<GlyphId> {
            (name == "bullet").then_some(GlyphId(3))
        }
        fn num_glyphs(&self) -> u16 {
            5
        }
        fn metrics(&self) -> FaceMetrics {
            FaceMetrics {
                units_per_em: 1000,
                ascent: 800,
                descent: -200,
                bbox: Rect {
                    x_min: 0,
                    y_min: -200,
                    x_max: 1000,
                    y_max: 800,
                },
            }
        }
        fn advance(&self, _: GlyphId) -> Option<u16> {
            Some(600)
        }
        fn glyph_bbox(&self, _: GlyphId) -> Option<Rect> {
            None
        }
    }

    fn resolver(charmaps: Vec<CharmapId>) -> GlyphIndexResolver {
        GlyphIndexResolver::new(Rc::new(Program { charmaps }))
    }

    #[test]
    fn widths() {
        let font = SimpleFont::new(FontSubtype::Type1, FontEncoding::new(BaseEncoding::WinAnsi))
            .with_widths(32, vec![250, 333], 500);
        assert_eq!(font.width(32), 250);
        assert_eq!(font.width(33), 333);
        assert_eq!(font.width(34), 500);
        assert_eq!(font.width(10), 500);
        assert_eq!(font.width(0x1234), 500);
    }

    #[test]
    fn truetype_symbolic() {
        let font = SimpleFont::new(FontSubtype::TrueType, FontEncoding::default());
        let r = resolver(vec![CharmapId::MS_SYMBOL]);
        assert_eq!(font.glyph(&r, 0x41, true, true), Some(GlyphId(2)));
        assert_eq!(font.glyph(&r, 0x42, true, true), None);
        assert_eq!(font.glyph(&r, 0x141, true, true), None);
    }

    #[test]
    fn truetype_mac_roman() {
        // WinAnsi 0xA5 is yen, at 0xB4 in Mac-Roman
        let font = SimpleFont::new(FontSubtype::TrueType, FontEncoding::new(BaseEncoding::WinAnsi));
        let r = resolver(vec![CharmapId::APPLE_ROMAN]);
        assert_eq!(font.glyph(&r, 0x41, false, true), Some(GlyphId(1)));
        assert_eq!(font.glyph(&r, 0xA5, false, true), None);

        // Builtin encoding: the code is used directly
        let font = SimpleFont::new(FontSubtype::TrueType, FontEncoding::default());
        assert_eq!(font.glyph(&r, 0xA5, false, true), Some(GlyphId(4)));
    }

    #[test]
    fn truetype_unicode_then_name() {
        let encoding = FontEncoding::new(BaseEncoding::WinAnsi).with_differences(&[
            Difference::Code(0x80),
            Difference::Name("bullet".into()),
        ]);
        let font = SimpleFont::new(FontSubtype::TrueType, encoding);
        let r = resolver(vec![CharmapId::MS_UNICODE]);
        assert_eq!(font.glyph(&r, 0x41, false, true), Some(GlyphId(1)));
        // "bullet" is U+2022, absent from the map but found by name
        assert_eq!(font.glyph(&r, 0x80, false, true), Some(GlyphId(3)));
    }

    #[test]
    fn type1_by_name() {
        let encoding = FontEncoding::new(BaseEncoding::Standard)
            .with_differences(&[Difference::Code(0x41), Difference::Name("bullet".into())]);
        let font = SimpleFont::new(FontSubtype::Type1, encoding);
        let r = resolver(vec![CharmapId::MS_UNICODE]);
        assert_eq!(font.glyph(&r, 0x41, false, true), Some(GlyphId(3)));
    }

    #[test]
    fn substituted() {
        let font = SimpleFont::new(FontSubtype::Type1, FontEncoding::new(BaseEncoding::WinAnsi));
        let r = resolver(vec![CharmapId::MS_UNICODE]);
        assert_eq!(font.glyph(&r, 0x41, false, false), Some(GlyphId(1)));
        assert_eq!(font.glyph(&r, 0x42, false, false), None);

        let system = SimpleFont::system();
        assert!(system.is_unicode_compatible());
        assert_eq!(system.char_code('A'), Some(0x41));
        assert_eq!(system.glyph(&r, 0x41, false, false), Some(GlyphId(1)));
    }

    #[test]
    fn unicode_compatibility() {
        let builtin = SimpleFont::new(FontSubtype::Type1, FontEncoding::default());
        assert!(!builtin.is_unicode_compatible());
        let symbol = SimpleFont::new(FontSubtype::Type1, FontEncoding::new(BaseEncoding::Symbol));
        assert!(!symbol.is_unicode_compatible());
        let win = SimpleFont::new(FontSubtype::Type1, FontEncoding::new(BaseEncoding::WinAnsi));
        assert!(win.is_unicode_compatible());
        assert_eq!(win.unicode(0x80), Some('€'));
        assert_eq!(win.char_code('€'), Some(0x80));
        assert_eq!(win.unicode(0x180), None);
    }
}
