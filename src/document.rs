// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Document font descriptions and the per-document font cache

use crate::cid::{CidToGid, WidthItem};
use crate::font::{BaseEncoding, DeclaredMetrics, Difference, Font, FontRef, FontSubtype};
use crate::fonts::{FontData, FontManagerContext, StyleFlags};
use std::collections::HashMap;

/// Identity of a font dictionary within a document
///
/// This is the indirect object reference of the font dictionary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontIdentity {
    pub object: u32,
    pub generation: u16,
}

impl FontIdentity {
    /// Construct
    #[inline]
    pub const fn new(object: u32, generation: u16) -> Self {
        FontIdentity { object, generation }
    }
}

impl From<u32> for FontIdentity {
    #[inline]
    fn from(object: u32) -> Self {
        FontIdentity::new(object, 0)
    }
}

/// The `Encoding` of a composite font
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CMapSource {
    /// A predefined CMap, e.g. `Identity-H`
    Name(String),
    /// An embedded CMap stream
    Stream(Vec<u8>),
}

/// A font description, as read from a document's font dictionary
///
/// Parsing of document objects is left to the caller; this type holds the
/// values read. For composite (`Type0`) fonts, the entries of the descendant
/// CID font and its descriptor are merged into the same description.
#[derive(Clone, Debug, Default)]
pub struct FontDescription {
    base_font: String,
    subtype: FontSubtype,
    flags: StyleFlags,
    metrics: DeclaredMetrics,
    program: Option<FontData>,
    first_char: u32,
    widths: Vec<f32>,
    missing_width: f32,
    encoding: Option<BaseEncoding>,
    differences: Vec<Difference>,
    to_unicode: Option<Vec<u8>>,
    cmap: Option<CMapSource>,
    ordering: Option<String>,
    cid_to_gid: Option<CidToGid>,
    cid_is_gid: bool,
    default_width: Option<i32>,
    w: Vec<WidthItem>,
    default_vertical: Option<[i32; 2]>,
    w2: Vec<WidthItem>,
    font_matrix: Option<[f32; 6]>,
    char_procs: Vec<String>,
}

impl FontDescription {
    /// Construct with `BaseFont` and `Subtype`
    pub fn new(base_font: impl Into<String>, subtype: FontSubtype) -> Self {
        FontDescription {
            base_font: base_font.into(),
            subtype,
            ..Default::default()
        }
    }

    /// Set descriptor `Flags`
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set descriptor metrics
    pub fn with_metrics(mut self, metrics: DeclaredMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the embedded font program (`FontFile`, `FontFile2` or `FontFile3`)
    pub fn with_program(mut self, data: impl Into<FontData>) -> Self {
        self.program = Some(data.into());
        self
    }

    /// Set `FirstChar`, `Widths` and `MissingWidth`
    pub fn with_widths(mut self, first_char: u32, widths: Vec<f32>, missing_width: f32) -> Self {
        self.first_char = first_char;
        self.widths = widths;
        self.missing_width = missing_width;
        self
    }

    /// Set `BaseEncoding` (or the `Encoding` name)
    pub fn with_encoding(mut self, encoding: BaseEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set `Differences`
    pub fn with_differences(mut self, differences: Vec<Difference>) -> Self {
        self.differences = differences;
        self
    }

    /// Set the `ToUnicode` stream
    pub fn with_to_unicode(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.to_unicode = Some(data.into());
        self
    }

    /// Set the `Encoding` of a composite font
    pub fn with_cmap(mut self, cmap: CMapSource) -> Self {
        self.cmap = Some(cmap);
        self
    }

    /// Set the `Ordering` of `CIDSystemInfo`
    pub fn with_ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Set `CIDToGIDMap`
    pub fn with_cid_to_gid(mut self, map: CidToGid) -> Self {
        self.cid_to_gid = Some(map);
        self
    }

    /// Treat CIDs as glyph indices
    ///
    /// This is the case for CFF-based CID fonts whose program is not
    /// CID-keyed.
    pub fn with_cid_is_gid(mut self, cid_is_gid: bool) -> Self {
        self.cid_is_gid = cid_is_gid;
        self
    }

    /// Set `DW` and `W`
    pub fn with_cid_widths(mut self, default_width: Option<i32>, w: Vec<WidthItem>) -> Self {
        self.default_width = default_width;
        self.w = w;
        self
    }

    /// Set `DW2` and `W2`
    pub fn with_cid_vertical(mut self, default: Option<[i32; 2]>, w2: Vec<WidthItem>) -> Self {
        self.default_vertical = default;
        self.w2 = w2;
        self
    }

    /// Set the `FontMatrix` of a Type3 font
    pub fn with_font_matrix(mut self, matrix: [f32; 6]) -> Self {
        self.font_matrix = Some(matrix);
        self
    }

    /// Set the glyph names of `CharProcs` of a Type3 font
    pub fn with_char_procs(mut self, names: Vec<String>) -> Self {
        self.char_procs = names;
        self
    }

    #[inline]
    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    #[inline]
    pub fn subtype(&self) -> FontSubtype {
        self.subtype
    }

    /// True for composite fonts
    #[inline]
    pub fn is_cid(&self) -> bool {
        self.subtype == FontSubtype::Type0
    }

    #[inline]
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    #[inline]
    pub fn metrics(&self) -> DeclaredMetrics {
        self.metrics
    }

    #[inline]
    pub fn program(&self) -> Option<&FontData> {
        self.program.as_ref()
    }

    #[inline]
    pub fn first_char(&self) -> u32 {
        self.first_char
    }

    #[inline]
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    #[inline]
    pub fn missing_width(&self) -> f32 {
        self.missing_width
    }

    #[inline]
    pub fn encoding(&self) -> Option<BaseEncoding> {
        self.encoding
    }

    #[inline]
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    #[inline]
    pub fn to_unicode(&self) -> Option<&[u8]> {
        self.to_unicode.as_deref()
    }

    #[inline]
    pub fn cmap(&self) -> Option<&CMapSource> {
        self.cmap.as_ref()
    }

    #[inline]
    pub fn ordering(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    #[inline]
    pub fn cid_to_gid(&self) -> Option<&CidToGid> {
        self.cid_to_gid.as_ref()
    }

    #[inline]
    pub fn cid_is_gid(&self) -> bool {
        self.cid_is_gid
    }

    #[inline]
    pub fn default_width(&self) -> Option<i32> {
        self.default_width
    }

    #[inline]
    pub fn w(&self) -> &[WidthItem] {
        &self.w
    }

    #[inline]
    pub fn default_vertical(&self) -> Option<[i32; 2]> {
        self.default_vertical
    }

    #[inline]
    pub fn w2(&self) -> &[WidthItem] {
        &self.w2
    }

    #[inline]
    pub fn font_matrix(&self) -> Option<[f32; 6]> {
        self.font_matrix
    }

    #[inline]
    pub fn char_procs(&self) -> &[String] {
        &self.char_procs
    }
}

/// The fonts of one document
///
/// Each [`FontIdentity`] resolves to one [`Font`] while cached. Fonts are
/// shared: releasing a font from the document does not invalidate
/// references held elsewhere.
#[derive(Debug, Default)]
pub struct Document {
    fonts: HashMap<FontIdentity, FontRef>,
}

impl Document {
    /// Construct an empty cache
    #[inline]
    pub fn new() -> Self {
        Document::default()
    }

    /// Number of cached fonts
    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True if no fonts are cached
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Get a cached font
    #[inline]
    pub fn get(&self, identity: FontIdentity) -> Option<&FontRef> {
        self.fonts.get(&identity)
    }

    /// Resolve the font of `identity`
    ///
    /// The first call constructs a font from `desc`; subsequent calls with
    /// the same identity return the same font, ignoring `desc`.
    pub fn resolve(
        &mut self,
        identity: FontIdentity,
        desc: &FontDescription,
        ctx: &FontManagerContext,
    ) -> FontRef {
        self.fonts
            .entry(identity)
            .or_insert_with(|| {
                let font = Font::from_description(ctx.new_font_id(), desc, ctx);
                log::debug!("Document::resolve({identity:?}): {}", font.name());
                FontRef::new(font)
            })
            .clone()
    }

    /// Release the font of `identity`
    ///
    /// Returns the released font, if any.
    pub fn release(&mut self, identity: FontIdentity) -> Option<FontRef> {
        self.fonts.remove(&identity)
    }

    /// Replace the description of `identity`
    ///
    /// Any cached font is released and a new font resolved from `desc`.
    pub fn replace(
        &mut self,
        identity: FontIdentity,
        desc: &FontDescription,
        ctx: &FontManagerContext,
    ) -> FontRef {
        self.release(identity);
        self.resolve(identity, desc, ctx)
    }

    /// Release all fonts
    #[inline]
    pub fn clear(&mut self) {
        self.fonts.clear();
    }
}
