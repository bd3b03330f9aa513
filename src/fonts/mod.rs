// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Installed fonts: enumeration, matching and loading
//!
//! Installed faces are described by a [`FontCatalog`], built through an
//! [`OsFontEnumerator`] ([`SystemFonts`] by default). The
//! [`SystemFontMatcher`] ranks catalog faces against a [`MatchRequest`].
//! Both are owned by the [`FontManagerContext`], which also caches the
//! system fonts it has loaded.
//!
//! ### Flags and ranges
//!
//! Faces declare their coverage through two bitfields of the OS/2 table:
//!
//! -   The *Unicode range* (`ulUnicodeRange1-4`): 128 bits, one per block
//!     (or group of blocks); see [`unicode_bit`]
//! -   The *codepage range* (`ulCodePageRange1-2`): 64 bits, one per
//!     Windows codepage; see [`codepage_bit`]
//!
//! Style is expressed with [`StyleFlags`], which mirror the `Flags` entry of
//! a PDF font descriptor, plus [`StyleFlags::BOLD`].
//!
//! ### Glyph programs
//!
//! Font programs are loaded through a [`GlyphBackend`] into a
//! [`GlyphProgram`]. The default backend, [`TtfBackend`], uses `ttf-parser`.

use crate::GlyphId;
use thiserror::Error;

mod attributes;
mod bitfield;
mod catalog;
mod charmap;
mod config;
mod face;
mod families;
mod manager;
mod matcher;
mod resolver;

pub use attributes::{Charset, Codepage, StyleFlags};
pub use bitfield::{
    charset_for_text, charset_from_unicode, codepage_bit, codepage_of_bit, unicode_bit,
    unicode_range, UnicodeRangeBit,
};
pub use catalog::{
    read_face, read_faces, CatalogError, EnumeratedFace, FaceSource, FontCatalog,
    FontDescriptorRecord, OsFontEnumerator, SystemFonts,
};
pub use charmap::{GlyphIndexResolver, ResolverMode};
pub use config::ManagerConfig;
pub(crate) use face::glyph_width;
pub use face::{
    face_count, CharmapId, FaceMetrics, FontData, GlyphBackend, GlyphProgram, TtfBackend,
    TtfProgram,
};
pub use families::{
    cjk_families, default_font_for_charset, normalize_name, split_style, standard_font,
    strip_subset_prefix, Base14, DEFAULT_ANSI_FONT, UNIVERSAL_DEFAULT_FONT,
};
pub use manager::FontManagerContext;
pub use matcher::{MatchCandidate, MatchRequest, SystemFontMatcher, MAX_CANDIDATES, PENALTY_CUTOFF};
pub use resolver::{Style, SubstituteSelector, Weight};

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font program could not be parsed")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[error("font collection index {0} out of range")]
    FaceIndex(u32),
}

/// No matching font found
///
/// This error is returned where no installed font can be selected.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no font match")]
pub struct NoFontMatch;

impl From<GlyphId> for ttf_parser::GlyphId {
    fn from(id: GlyphId) -> Self {
        ttf_parser::GlyphId(id.0)
    }
}
