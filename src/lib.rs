// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! PDF font identity and glyph mapping
//!
//! This library resolves the character codes of a PDF document's text to
//! glyphs of concrete font programs:
//!
//! -   [`document`]: font descriptions as read from a document, and the
//!     per-document font cache
//! -   [`font`]: resolved fonts and the code → glyph, width and Unicode
//!     mappings of simple, Type3 and composite fonts
//! -   [`cid`]: CMaps and the CID layer of composite fonts
//! -   [`fonts`]: installed fonts, the matcher used to substitute for fonts
//!     which are not embedded, and the [`fonts::FontManagerContext`]
//!
//! ```no_run
//! use pdf_font_map::document::{Document, FontDescription, FontIdentity};
//! use pdf_font_map::font::FontSubtype;
//! use pdf_font_map::fonts::{FontManagerContext, ManagerConfig};
//!
//! let ctx = FontManagerContext::new(ManagerConfig::default());
//! let mut doc = Document::new();
//! let desc = FontDescription::new("Helvetica-Bold", FontSubtype::Type1);
//! let font = doc.resolve(FontIdentity::new(5, 0), &desc, &ctx);
//! let glyph = font.glyph_from_char_code(u32::from(b'A'));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod conv;

pub mod cid;
pub mod document;
pub mod font;
pub mod fonts;

/// Glyph index within a font program
///
/// Glyph 0 is `.notdef`; lookups return `None` rather than glyph 0 where no
/// glyph exists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(pub u16);
