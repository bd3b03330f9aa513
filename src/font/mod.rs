// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Resolved fonts
//!
//! A [`Font`] is the resolved form of a [`FontDescription`]: it pairs the
//! description's encoding data with a loaded glyph program (embedded, or
//! installed and substituted) and exposes a uniform contract for mapping
//! character codes to glyphs, widths and Unicode text.
//!
//! Fonts are shared as [`FontRef`] (`Rc<Font>`). A font which cannot supply
//! a glyph for some character may borrow one from a substitute font; such
//! substitutes are recorded in the font's substitute chain.

mod encoding;
mod simple;
mod to_unicode;
mod type3;

pub use encoding::{name_for_unicode, unicode_from_name, BaseEncoding, Difference, FontEncoding};
pub use simple::SimpleFont;
pub use to_unicode::ToUnicodeMap;
pub use type3::{Type3Font, DEFAULT_MATRIX};

use crate::cid::{CMap, CidCollection, CidExtension, CidToGid};
use crate::conv::to_font_units;
use crate::document::{CMapSource, FontDescription};
use crate::fonts::{
    glyph_width, split_style, standard_font, strip_subset_prefix, unicode_bit, Base14, Charset,
    FontManagerContext, GlyphIndexResolver, GlyphProgram, ResolverMode, StyleFlags,
};
use crate::GlyphId;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Shared reference to a [`Font`]
pub type FontRef = Rc<Font>;

/// Font identifier
///
/// Identifiers are unique within one [`FontManagerContext`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontId(pub(crate) u32);

impl FontId {
    /// Get as `u32`
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Font type, as declared by the `Subtype` entry
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontSubtype {
    #[default]
    Type1,
    MmType1,
    TrueType,
    Type3,
    /// A composite (CID-keyed) font
    Type0,
}

/// Metrics declared by a font descriptor
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DeclaredMetrics {
    pub italic_angle: f32,
    pub stem_v: i32,
    pub bbox: [f32; 4],
    pub ascent: f32,
    pub descent: f32,
}

/// Kind-specific data of a [`Font`]
#[derive(Clone, Debug)]
pub enum FontKind {
    Simple(SimpleFont),
    Cid(CidExtension),
    Type3(Type3Font),
}

/// A glyph together with the font supplying it
#[derive(Clone, Debug)]
pub struct GlyphRef {
    pub glyph: GlyphId,
    pub font: FontRef,
}

impl PartialEq for GlyphRef {
    fn eq(&self, other: &Self) -> bool {
        self.glyph == other.glyph && Rc::ptr_eq(&self.font, &other.font)
    }
}

/// Fonts borrowed for characters a font cannot supply itself
///
/// The chain only grows. Slot numbers are 1-based; slot 0 refers to the
/// owning font.
#[derive(Debug, Default)]
pub struct SubstituteChain {
    fonts: Vec<FontRef>,
    by_bit: HashMap<u16, usize>,
}

impl SubstituteChain {
    /// Number of substitutes
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True if there are no substitutes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Get the substitute in `slot` (1-based)
    pub fn get(&self, slot: usize) -> Option<&FontRef> {
        self.fonts.get(slot.checked_sub(1)?)
    }

    /// Iterate over substitutes
    pub fn iter(&self) -> impl Iterator<Item = &FontRef> {
        self.fonts.iter()
    }

    fn for_bit(&self, bit: u16) -> Option<&FontRef> {
        self.get(*self.by_bit.get(&bit)?)
    }

    // Returns the slot of `font`, appending if not already present.
    fn insert(&mut self, font: FontRef, bit: Option<u16>) -> usize {
        let slot = match self.fonts.iter().position(|f| Rc::ptr_eq(f, &font)) {
            Some(i) => i + 1,
            None => {
                self.fonts.push(font);
                self.fonts.len()
            }
        };
        if let Some(bit) = bit {
            self.by_bit.entry(bit).or_insert(slot);
        }
        slot
    }
}

/// A resolved font
#[derive(Debug)]
pub struct Font {
    id: FontId,
    name: String,
    family: String,
    style: StyleFlags,
    metrics: DeclaredMetrics,
    resolver: Option<GlyphIndexResolver>,
    embedded: bool,
    to_unicode: Option<ToUnicodeMap>,
    chain: RefCell<SubstituteChain>,
    kind: FontKind,
}

impl Font {
    /// Construct a system font over an installed program
    ///
    /// Codes of a system font are Unicode values.
    pub fn system(
        id: FontId,
        name: impl Into<String>,
        family: impl Into<String>,
        style: StyleFlags,
        program: Rc<dyn GlyphProgram>,
    ) -> Self {
        Font {
            id,
            name: name.into(),
            family: family.into(),
            style,
            metrics: DeclaredMetrics::default(),
            resolver: Some(GlyphIndexResolver::extended(program)),
            embedded: false,
            to_unicode: None,
            chain: Default::default(),
            kind: FontKind::Simple(SimpleFont::system()),
        }
    }

    /// Resolve a font description
    ///
    /// An embedded program is loaded through the context's backend. If
    /// there is none, or loading fails, an installed font is substituted.
    /// A font without any program still resolves: its lookups then fail.
    pub fn from_description(
        id: FontId,
        desc: &FontDescription,
        ctx: &FontManagerContext,
    ) -> Self {
        let name = strip_subset_prefix(desc.base_font()).to_string();
        let (family, mut style) = match standard_font(&name) {
            Some(base14) => (base14.family(), base14.style()),
            None => split_style(&name),
        };
        let family = family.to_string();
        style |= desc.flags();
        if desc.metrics().stem_v >= 140 {
            style |= StyleFlags::BOLD;
        }

        let kind = match desc.subtype() {
            FontSubtype::Type0 => FontKind::Cid(cid_extension(desc)),
            FontSubtype::Type3 => {
                let encoding = font_encoding(desc, &name, style);
                let t3 = Type3Font::new(encoding, desc.char_procs().to_vec())
                    .with_widths(desc.first_char(), desc.widths().to_vec())
                    .with_matrix(desc.font_matrix().unwrap_or(DEFAULT_MATRIX));
                FontKind::Type3(t3)
            }
            subtype => {
                let encoding = font_encoding(desc, &name, style);
                let widths = desc.widths().iter().map(|w| to_font_units(*w)).collect();
                let missing = to_font_units(desc.missing_width());
                let simple = SimpleFont::new(subtype, encoding);
                FontKind::Simple(simple.with_widths(desc.first_char(), widths, missing))
            }
        };

        let mut embedded = false;
        let mut program = None;
        if !matches!(kind, FontKind::Type3(_)) {
            if let Some(data) = desc.program() {
                match ctx.backend().load(data.clone(), 0) {
                    Ok(p) => {
                        embedded = true;
                        program = Some(p);
                    }
                    Err(err) => log::warn!("Font::from_description: {name}: {err}"),
                }
            }
            if program.is_none() {
                let charset = match &kind {
                    FontKind::Cid(ext) => ext.collection().charset(),
                    _ => None,
                };
                let charset = charset.unwrap_or(if style.contains(StyleFlags::SYMBOLIC) {
                    Charset::Symbol
                } else {
                    Charset::Ansi
                });
                program = ctx
                    .substitute_font(&name, style, charset)
                    .and_then(|font| font.program().cloned());
                if program.is_none() {
                    log::warn!("Font::from_description: no substitute for {name}");
                }
            }
        }

        let mode = match &kind {
            FontKind::Cid(_) => ResolverMode::Extended,
            _ if !embedded => ResolverMode::Extended,
            _ => ResolverMode::Unicode,
        };
        let resolver = program.map(|p| GlyphIndexResolver::with_mode(p, mode));

        let to_unicode = desc
            .to_unicode()
            .map(ToUnicodeMap::parse)
            .filter(|map| !map.is_empty());

        Font {
            id,
            name,
            family,
            style,
            metrics: desc.metrics(),
            resolver,
            embedded,
            to_unicode,
            chain: Default::default(),
            kind,
        }
    }

    /// Construct a copy of this font with a different style
    ///
    /// The program is shared unless `program` is given. The substitute chain
    /// is not shared.
    pub fn restyled(
        &self,
        id: FontId,
        style: StyleFlags,
        program: Option<Rc<dyn GlyphProgram>>,
    ) -> Self {
        let resolver = self.resolver.as_ref().map(|r| {
            let program = program.unwrap_or_else(|| r.program().clone());
            GlyphIndexResolver::with_mode(program, r.mode())
        });
        Font {
            id,
            name: self.name.clone(),
            family: self.family.clone(),
            style,
            metrics: self.metrics,
            resolver,
            embedded: self.embedded,
            to_unicode: self.to_unicode.clone(),
            chain: Default::default(),
            kind: self.kind.clone(),
        }
    }

    /// Identifier
    #[inline]
    pub fn id(&self) -> FontId {
        self.id
    }

    /// Font name, without any subset prefix
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Family name, without style suffix
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Style flags
    #[inline]
    pub fn style(&self) -> StyleFlags {
        self.style
    }

    /// Metrics declared by the font descriptor
    #[inline]
    pub fn declared_metrics(&self) -> &DeclaredMetrics {
        &self.metrics
    }

    /// Kind-specific data
    #[inline]
    pub fn kind(&self) -> &FontKind {
        &self.kind
    }

    /// True if glyphs come from an embedded program
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// True if glyphs come from a substituted installed program
    #[inline]
    pub fn is_substituted(&self) -> bool {
        !self.embedded && self.resolver.is_some()
    }

    /// The glyph program, if any
    pub fn program(&self) -> Option<&Rc<dyn GlyphProgram>> {
        self.resolver.as_ref().map(GlyphIndexResolver::program)
    }

    /// The glyph index resolver, if any
    #[inline]
    pub fn resolver(&self) -> Option<&GlyphIndexResolver> {
        self.resolver.as_ref()
    }

    /// The parsed `ToUnicode` map, if any
    #[inline]
    pub fn to_unicode(&self) -> Option<&ToUnicodeMap> {
        self.to_unicode.as_ref()
    }

    /// Number of substitute fonts recorded
    pub fn substitute_count(&self) -> usize {
        self.chain.borrow().len()
    }

    /// Get the substitute in `slot` (1-based)
    pub fn substitute(&self, slot: usize) -> Option<FontRef> {
        self.chain.borrow().get(slot).cloned()
    }

    fn is_symbolic(&self) -> bool {
        self.style.contains(StyleFlags::SYMBOLIC)
    }

    /// Map a character code to a glyph index
    ///
    /// Returns `None` (NOTFOUND) when no glyph exists.
    pub fn glyph_from_char_code(&self, code: u32) -> Option<GlyphId> {
        match &self.kind {
            FontKind::Simple(simple) => {
                let resolver = self.resolver.as_ref()?;
                simple.glyph(resolver, code, self.is_symbolic(), self.embedded)
            }
            FontKind::Cid(ext) => self.cid_glyph(ext, code),
            FontKind::Type3(t3) => t3.glyph(code),
        }
    }

    fn cid_glyph(&self, ext: &CidExtension, code: u32) -> Option<GlyphId> {
        let resolver = self.resolver.as_ref()?;
        let cid = ext.cid_from_code(code);

        // An embedded program under a UCS-2 CMap is searched by Unicode
        // unless a CIDToGIDMap stream is given.
        let by_cid = ext.cid_is_gid()
            || (self.embedded
                && (!ext.is_ucs2() || matches!(ext.cid_to_gid(), Some(CidToGid::Stream(_)))));
        if by_cid {
            let gid = ext.gid_from_cid(cid);
            return (gid != 0).then_some(GlyphId(gid));
        }

        let unicode = self
            .to_unicode
            .as_ref()
            .and_then(|map| map.lookup(code))
            .and_then(|s| s.chars().next())
            .or_else(|| ext.is_ucs2().then(|| char::from_u32(code)).flatten());

        let Some(mut ch) = unicode else {
            let gid = ext.gid_from_cid(cid);
            return (gid != 0).then_some(GlyphId(gid));
        };
        if ext.collection() == CidCollection::Japan1 {
            ch = match ch {
                '\\' => '/',
                '\u{A5}' => '\\',
                ch => ch,
            };
        }
        resolver.glyph_from_unicode(ch)
    }

    /// Horizontal advance of a code, in glyph space (1/1000 em)
    pub fn char_width(&self, code: u32) -> i32 {
        match &self.kind {
            FontKind::Simple(simple) if simple.has_widths() => simple.width(code),
            FontKind::Simple(simple) => self
                .glyph_from_char_code(code)
                .and_then(|glyph| glyph_width(&**self.program()?, glyph))
                .unwrap_or(simple.missing_width()),
            FontKind::Cid(ext) => ext.width(ext.cid_from_code(code)),
            FontKind::Type3(t3) => t3.width(code),
        }
    }

    /// Text of a code
    ///
    /// The `ToUnicode` map takes precedence over the encoding.
    pub fn unicode_from_char_code(&self, code: u32) -> Option<String> {
        if let Some(s) = self.to_unicode.as_ref().and_then(|map| map.lookup(code)) {
            return Some(s);
        }
        let ch = match &self.kind {
            FontKind::Simple(simple) => simple.unicode(code),
            FontKind::Cid(ext) => ext.is_ucs2().then(|| char::from_u32(code)).flatten(),
            FontKind::Type3(t3) => t3.encoding().unicode(u8::try_from(code).ok()?),
        };
        ch.map(String::from)
    }

    /// Code of a character
    ///
    /// The `ToUnicode` map is searched first; the first matching code wins.
    pub fn char_code_from_unicode(&self, ch: char) -> Option<u32> {
        if let Some(code) = self.to_unicode.as_ref().and_then(|map| map.reverse_lookup(ch)) {
            return Some(code);
        }
        match &self.kind {
            FontKind::Simple(simple) => simple.char_code(ch),
            FontKind::Cid(ext) if ext.is_ucs2() => {
                u16::try_from(u32::from(ch)).ok().map(u32::from)
            }
            FontKind::Cid(_) => None,
            FontKind::Type3(t3) => t3.encoding().char_code(ch).map(u32::from),
        }
    }

    /// True if codes have known Unicode values
    pub fn is_unicode_compatible(&self) -> bool {
        if self.to_unicode.is_some() {
            return true;
        }
        match &self.kind {
            FontKind::Simple(simple) => simple.is_unicode_compatible(),
            FontKind::Cid(ext) => ext.is_ucs2(),
            FontKind::Type3(_) => false,
        }
    }

    /// Read the next code from `bytes`, advancing `offset`
    ///
    /// Simple and Type3 fonts use one byte per code; CID fonts read codes
    /// per the codespace of their CMap.
    pub fn next_char(&self, bytes: &[u8], offset: &mut usize) -> Option<u32> {
        match &self.kind {
            FontKind::Cid(ext) => ext.cmap().next_code(bytes, offset),
            _ => {
                let b = *bytes.get(*offset)?;
                *offset += 1;
                Some(u32::from(b))
            }
        }
    }

    /// Count the codes in `bytes`
    pub fn count_char(&self, bytes: &[u8]) -> usize {
        match &self.kind {
            FontKind::Cid(ext) => ext.cmap().count_codes(bytes),
            _ => bytes.len(),
        }
    }

    /// Map a code to a CID
    ///
    /// Returns `None` for fonts which are not CID-keyed.
    pub fn cid_from_char_code(&self, code: u32) -> Option<u16> {
        match &self.kind {
            FontKind::Cid(ext) => Some(ext.cid_from_code(code)),
            _ => None,
        }
    }

    /// True for vertical writing mode
    pub fn is_vertical(&self) -> bool {
        matches!(&self.kind, FontKind::Cid(ext) if ext.is_vertical())
    }

    /// Vertical origin of a CID, relative to the horizontal origin
    pub fn vertical_origin(&self, cid: u16) -> Option<(i32, i32)> {
        match &self.kind {
            FontKind::Cid(ext) => Some(ext.vertical_origin(cid)),
            _ => None,
        }
    }

    /// Vertical advance of a CID
    pub fn vertical_advance(&self, cid: u16) -> Option<i32> {
        match &self.kind {
            FontKind::Cid(ext) => Some(ext.vertical_advance(cid)),
            _ => None,
        }
    }

    fn own_glyph_for_unicode(&self, ch: char) -> Option<GlyphId> {
        let code = self.char_code_from_unicode(ch)?;
        self.glyph_from_char_code(code)
    }

    /// Find a glyph for a character, substituting fonts as required
    ///
    /// The font's own program is tried first, then the substitute recorded
    /// for the character's Unicode range, then fonts supplied by `ctx` (by
    /// this font's family, then by any family). A new substitute is
    /// appended to the chain.
    ///
    /// This lazily populates the substitute chain; repeated calls with the
    /// same input return the same result.
    pub fn glyph_for_unicode(
        self: &Rc<Self>,
        ch: char,
        ctx: &FontManagerContext,
    ) -> Option<GlyphRef> {
        if let Some(glyph) = self.own_glyph_for_unicode(ch) {
            return Some(GlyphRef {
                glyph,
                font: self.clone(),
            });
        }

        let bit = unicode_bit(ch);
        let known = bit.and_then(|bit| self.chain.borrow().for_bit(bit).cloned());
        if let Some(font) = known {
            if let Some(glyph) = font.own_glyph_for_unicode(ch) {
                return Some(GlyphRef { glyph, font });
            }
        }

        for family in [Some(self.family.as_str()), None] {
            let Some(font) = ctx.get_font_by_unicode(ch, self.style, family) else {
                continue;
            };
            if !self.accepts_substitute(&font) {
                log::debug!(
                    "Font::glyph_for_unicode: rejecting {} for {}",
                    font.name(),
                    self.name
                );
                continue;
            }
            let Some(glyph) = font.own_glyph_for_unicode(ch) else {
                continue;
            };
            self.chain.borrow_mut().insert(font.clone(), bit);
            return Some(GlyphRef { glyph, font });
        }

        None
    }

    // A substitute may not be this font, nor (transitively) use it.
    fn accepts_substitute(&self, font: &FontRef) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![font.clone()];
        while let Some(f) = stack.pop() {
            if f.id == self.id {
                return false;
            }
            if visited.insert(f.id) {
                stack.extend(f.chain.borrow().iter().cloned());
            }
        }
        true
    }
}

fn font_encoding(desc: &FontDescription, name: &str, style: StyleFlags) -> FontEncoding {
    let base = match desc.encoding() {
        Some(base) => base,
        None => match standard_font(name) {
            Some(Base14::Symbol) => BaseEncoding::Symbol,
            Some(Base14::ZapfDingbats) => BaseEncoding::ZapfDingbats,
            _ if style.contains(StyleFlags::SYMBOLIC) => BaseEncoding::Builtin,
            _ if desc.subtype() == FontSubtype::TrueType => BaseEncoding::WinAnsi,
            _ if desc.subtype() == FontSubtype::Type3 => BaseEncoding::Builtin,
            _ => BaseEncoding::Standard,
        },
    };
    FontEncoding::new(base).with_differences(desc.differences())
}

fn cid_extension(desc: &FontDescription) -> CidExtension {
    let cmap = match desc.cmap() {
        Some(CMapSource::Name(name)) => CMap::predefined(name).unwrap_or_else(|| {
            log::warn!("cid_extension: unsupported CMap {name}; using Identity-H");
            CMap::identity()
        }),
        Some(CMapSource::Stream(data)) => CMap::parse_or_identity(data),
        None => CMap::identity(),
    };
    let mut ext = CidExtension::new(cmap);
    if let Some(ordering) = desc.ordering() {
        ext = ext.with_collection(CidCollection::from_ordering(ordering));
    }
    ext.with_cid_to_gid(desc.cid_to_gid().cloned())
        .with_cid_is_gid(desc.cid_is_gid())
        .with_widths(desc.default_width(), desc.w())
        .with_vertical_metrics(desc.default_vertical(), desc.w2())
}
