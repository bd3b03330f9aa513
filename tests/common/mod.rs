// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! In-memory font programs and an enumerator over them

#![allow(dead_code)]

use pdf_font_map::fonts::{
    CatalogError, CharmapId, EnumeratedFace, FaceMetrics, FaceSource, FontData, FontError,
    FontManagerContext, GlyphBackend, GlyphProgram, ManagerConfig, OsFontEnumerator,
};
use pdf_font_map::GlyphId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use ttf_parser::Rect;

/// A font program defined by tables
#[derive(Debug, Default)]
pub struct MockProgram {
    /// Distinguishes programs in tests
    pub tag: u16,
    pub charmaps: Vec<CharmapId>,
    pub maps: HashMap<(usize, u32), u16>,
    pub names: HashMap<String, u16>,
    pub advance: u16,
}

impl MockProgram {
    pub fn new(tag: u16) -> Self {
        MockProgram {
            tag,
            advance: 600,
            ..Default::default()
        }
    }

    /// Add a (3, 1) charmap covering `chars`; glyphs are numbered from 1
    pub fn unicode(mut self, chars: &str) -> Self {
        let index = self.charmaps.len();
        self.charmaps.push(CharmapId::MS_UNICODE);
        for (i, c) in chars.chars().enumerate() {
            self.maps.insert((index, u32::from(c)), i as u16 + 1);
        }
        self
    }

    /// Add a (3, 0) charmap covering `codes` in the 0xF000 private range
    pub fn symbol(mut self, codes: &[u8]) -> Self {
        let index = self.charmaps.len();
        self.charmaps.push(CharmapId::MS_SYMBOL);
        for (i, c) in codes.iter().enumerate() {
            self.maps
                .insert((index, 0xF000 + u32::from(*c)), i as u16 + 1);
        }
        self
    }

    /// Add a named glyph
    pub fn named(mut self, name: &str, glyph: u16) -> Self {
        self.names.insert(name.to_string(), glyph);
        self
    }

    pub fn shared(self) -> Rc<MockProgram> {
        Rc::new(self)
    }
}

impl GlyphProgram for MockProgram {
    fn charmaps(&self) -> &[CharmapId] {
        &self.charmaps
    }

    fn glyph_index(&self, charmap: usize, code: u32) -> Option<GlyphId> {
        self.maps.get(&(charmap, code)).copied().map(GlyphId)
    }

    fn glyph_index_by_name(&self, name: &str) -> Option<GlyphId> {
        self.names.get(name).copied().map(GlyphId)
    }

    fn num_glyphs(&self) -> u16 {
        self.tag
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            units_per_em: 2000,
            ascent: 1800,
            descent: -400,
            bbox: Rect {
                x_min: 0,
                y_min: -400,
                x_max: 2000,
                y_max: 1800,
            },
        }
    }

    fn advance(&self, glyph: GlyphId) -> Option<u16> {
        (glyph.0 != 0).then_some(self.advance)
    }

    fn glyph_bbox(&self, _: GlyphId) -> Option<Rect> {
        None
    }
}

/// Installed faces and the programs behind them
#[derive(Clone, Default)]
pub struct MockSystem {
    faces: Vec<EnumeratedFace>,
    programs: HashMap<Vec<u8>, Rc<MockProgram>>,
}

impl MockSystem {
    pub fn new() -> Self {
        MockSystem::default()
    }

    /// Install a face; `face.family` plus sub-family keys the program
    pub fn install(mut self, face: EnumeratedFace, program: Rc<MockProgram>) -> Self {
        let key = format!("{}/{}", face.family, face.subfamily);
        let face = face.with_source(FaceSource::Path(PathBuf::from(&key)), 0);
        self.programs.insert(key.into_bytes(), program);
        self.faces.push(face);
        self
    }

    /// Register bytes which load as `program`
    pub fn embed(mut self, data: &[u8], program: Rc<MockProgram>) -> Self {
        self.programs.insert(data.to_vec(), program);
        self
    }

    pub fn context(self) -> FontManagerContext {
        let backend = MockBackend {
            programs: self.programs.clone(),
        };
        FontManagerContext::with_enumerator(ManagerConfig::without_system_fonts(), self)
            .with_backend(backend)
    }
}

impl OsFontEnumerator for MockSystem {
    fn enumerate(&self) -> Result<Vec<EnumeratedFace>, CatalogError> {
        Ok(self.faces.clone())
    }

    fn face_data(&self, source: &FaceSource) -> Option<FontData> {
        match source {
            FaceSource::Path(path) => Some(FontData::from(path.to_str()?.as_bytes())),
            FaceSource::Data(data) => Some(data.clone()),
            FaceSource::System(_) => None,
        }
    }
}

pub struct MockBackend {
    programs: HashMap<Vec<u8>, Rc<MockProgram>>,
}

impl GlyphBackend for MockBackend {
    fn load(&self, data: FontData, index: u32) -> Result<Rc<dyn GlyphProgram>, FontError> {
        match self.programs.get(&*data) {
            Some(program) => Ok(program.clone()),
            None => Err(FontError::FaceIndex(index)),
        }
    }
}

/// Tag of the program used by a font
pub fn tag_of(program: Option<&Rc<dyn GlyphProgram>>) -> Option<u16> {
    program.map(|p| p.num_glyphs())
}

pub const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz ";
