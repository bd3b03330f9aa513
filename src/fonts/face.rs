// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font program types
//!
//! A *glyph program* is a loaded font file (or one face of a collection).
//! This module defines the [`GlyphProgram`] interface consumed by the rest of
//! the library together with a default implementation over `ttf-parser`.

use super::FontError;
use crate::GlyphId;
use smallvec::SmallVec;
use std::rc::Rc;
use ttf_parser::{Face, PlatformId, Rect};

/// Shared font program bytes
pub type FontData = Rc<[u8]>;

/// Identifies the encoding of a character map by its platform and encoding
/// identifiers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CharmapId {
    pub platform: u16,
    pub encoding: u16,
}

impl CharmapId {
    /// Windows Unicode BMP
    pub const MS_UNICODE: Self = Self::new(3, 1);
    /// Windows Symbol
    pub const MS_SYMBOL: Self = Self::new(3, 0);
    /// Windows Unicode full repertoire
    pub const MS_UCS4: Self = Self::new(3, 10);
    /// Macintosh Roman
    pub const APPLE_ROMAN: Self = Self::new(1, 0);

    /// Construct
    pub const fn new(platform: u16, encoding: u16) -> Self {
        CharmapId { platform, encoding }
    }

    /// True if this map is indexed by Unicode code point
    pub fn is_unicode(self) -> bool {
        match self.platform {
            0 => true,
            3 => matches!(self.encoding, 1 | 10),
            _ => false,
        }
    }
}

/// Global metrics of a font program, in font units
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceMetrics {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub bbox: Rect,
}

impl FaceMetrics {
    /// Scale a value in font units to glyph space (1000 units per em)
    pub fn to_glyph_space(&self, x: i32) -> i32 {
        if self.units_per_em == 0 {
            return x;
        }
        (i64::from(x) * 1000 / i64::from(self.units_per_em)) as i32
    }
}

/// A loaded font program
///
/// This is the interface of the glyph rendering backend. Character-map
/// indices refer to the order of [`GlyphProgram::charmaps`].
pub trait GlyphProgram {
    /// Character maps present in the program
    fn charmaps(&self) -> &[CharmapId];

    /// Look up `code` in character map `charmap`
    ///
    /// Returns `None` when the code is unmapped or maps to glyph 0.
    fn glyph_index(&self, charmap: usize, code: u32) -> Option<GlyphId>;

    /// Look up a glyph by PostScript name
    fn glyph_index_by_name(&self, name: &str) -> Option<GlyphId> {
        let _ = name;
        None
    }

    /// Number of glyphs in the program
    fn num_glyphs(&self) -> u16;

    /// Global metrics
    fn metrics(&self) -> FaceMetrics;

    /// Horizontal advance of a glyph in font units
    fn advance(&self, glyph: GlyphId) -> Option<u16>;

    /// Outline bounding box of a glyph in font units
    fn glyph_bbox(&self, glyph: GlyphId) -> Option<Rect>;

    /// Find the first character map with the given identifier
    fn find_charmap(&self, id: CharmapId) -> Option<usize> {
        self.charmaps().iter().position(|c| *c == id)
    }
}

impl std::fmt::Debug for dyn GlyphProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphProgram")
            .field("charmaps", &self.charmaps())
            .field("num_glyphs", &self.num_glyphs())
            .finish()
    }
}

/// Loads font programs from bytes
pub trait GlyphBackend {
    /// Load face `index` of `data`
    fn load(&self, data: FontData, index: u32) -> Result<Rc<dyn GlyphProgram>, FontError>;
}

/// The default backend, using `ttf-parser`
#[derive(Clone, Copy, Debug, Default)]
pub struct TtfBackend;

impl GlyphBackend for TtfBackend {
    fn load(&self, data: FontData, index: u32) -> Result<Rc<dyn GlyphProgram>, FontError> {
        Ok(Rc::new(TtfProgram::new(data, index)?))
    }
}

/// A font program parsed by `ttf-parser`
pub struct TtfProgram {
    // Declared before `data` so that it is dropped first.
    face: Face<'static>,
    charmaps: SmallVec<[CharmapId; 4]>,
    index: u32,
    data: FontData,
}

impl TtfProgram {
    /// Parse face `index` of `data`
    pub fn new(data: FontData, index: u32) -> Result<Self, FontError> {
        if let Some(count) = ttf_parser::fonts_in_collection(&data) {
            if index >= count {
                return Err(FontError::FaceIndex(index));
            }
        }

        // Safety: `face` borrows the heap allocation owned by `data`, which is
        // held by the same struct, never mutated and dropped after `face`.
        let bytes = unsafe { extend_lifetime(&*data) };
        let face = Face::parse(bytes, index)?;

        let mut charmaps = SmallVec::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                charmaps.push(CharmapId::new(
                    platform_to_u16(subtable.platform_id),
                    subtable.encoding_id,
                ));
            }
        }

        Ok(TtfProgram {
            face,
            charmaps,
            index,
            data,
        })
    }

    /// Access the [`Face`] object
    pub fn face(&self) -> &Face<'_> {
        &self.face
    }

    /// Get the face index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the source data
    pub fn data(&self) -> &FontData {
        &self.data
    }
}

impl GlyphProgram for TtfProgram {
    fn charmaps(&self) -> &[CharmapId] {
        &self.charmaps
    }

    fn glyph_index(&self, charmap: usize, code: u32) -> Option<GlyphId> {
        let cmap = self.face.tables().cmap?;
        let index = u16::try_from(charmap).ok()?;
        let subtable = cmap.subtables.get(index)?;
        subtable
            .glyph_index(code)
            .filter(|id| id.0 != 0)
            .map(|id| GlyphId(id.0))
    }

    fn glyph_index_by_name(&self, name: &str) -> Option<GlyphId> {
        self.face
            .glyph_index_by_name(name)
            .filter(|id| id.0 != 0)
            .map(|id| GlyphId(id.0))
    }

    fn num_glyphs(&self) -> u16 {
        self.face.number_of_glyphs()
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            units_per_em: self.face.units_per_em(),
            ascent: self.face.ascender(),
            descent: self.face.descender(),
            bbox: self.face.global_bounding_box(),
        }
    }

    fn advance(&self, glyph: GlyphId) -> Option<u16> {
        self.face.glyph_hor_advance(glyph.into())
    }

    fn glyph_bbox(&self, glyph: GlyphId) -> Option<Rect> {
        self.face.glyph_bounding_box(glyph.into())
    }
}

impl std::fmt::Debug for TtfProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfProgram")
            .field("index", &self.index)
            .field("len", &self.data.len())
            .field("charmaps", &self.charmaps)
            .finish()
    }
}

/// Number of faces in `data` (1 for a plain font file)
pub fn face_count(data: &[u8]) -> u32 {
    ttf_parser::fonts_in_collection(data).unwrap_or(1)
}

fn platform_to_u16(id: PlatformId) -> u16 {
    match id {
        PlatformId::Unicode => 0,
        PlatformId::Macintosh => 1,
        PlatformId::Iso => 2,
        PlatformId::Windows => 3,
        PlatformId::Custom => 4,
    }
}

/// Scaled advance of `glyph` in glyph space (1000 units per em)
pub(crate) fn glyph_width(program: &dyn GlyphProgram, glyph: GlyphId) -> Option<i32> {
    let advance = program.advance(glyph)?;
    Some(program.metrics().to_glyph_space(i32::from(advance)))
}

pub(crate) unsafe fn extend_lifetime<'b, T: ?Sized>(r: &'b T) -> &'static T {
    std::mem::transmute::<&'b T, &'static T>(r)
}
