// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font manager context

use super::families::{cjk_families, default_font_for_charset, DEFAULT_ANSI_FONT};
use super::{
    normalize_name, read_faces, split_style, standard_font, unicode_range, Charset, Codepage,
    EnumeratedFace, FaceSource, FontCatalog, FontData, GlyphBackend, GlyphProgram, ManagerConfig, MatchCandidate,
    MatchRequest, OsFontEnumerator, StyleFlags, SystemFontMatcher, SystemFonts, TtfBackend,
};
use crate::font::{Font, FontId, FontRef};
use std::cell::{Cell, RefCell};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

fn hash_value(value: impl Hash) -> u64 {
    let mut s = DefaultHasher::new();
    value.hash(&mut s);
    s.finish()
}

fn source_hash(source: &FaceSource, index: u32) -> u64 {
    let mut hasher = DefaultHasher::new();
    match source {
        FaceSource::Path(path) => path.hash(&mut hasher),
        FaceSource::Data(data) => (data.as_ptr() as usize).hash(&mut hasher),
        FaceSource::System(id) => id.hash(&mut hasher),
    }
    hasher.write_u32(index);
    hasher.finish()
}

// Loaded programs, shared between fonts using the same face
#[derive(Default)]
struct ProgramList {
    programs: Vec<Rc<dyn GlyphProgram>>,
    // A vec-map: the number of loaded faces is usually small.
    source_hash: Vec<(u64, usize)>,
}

impl ProgramList {
    fn find(&self, hash: u64) -> Option<Rc<dyn GlyphProgram>> {
        self.source_hash
            .iter()
            .find(|(h, _)| *h == hash)
            .map(|(_, i)| self.programs[*i].clone())
    }

    fn push(&mut self, program: Rc<dyn GlyphProgram>, hash: u64) {
        let index = self.programs.len();
        self.programs.push(program);
        self.source_hash.push((hash, index));
    }
}

#[derive(Default)]
struct FontCaches {
    cp_fonts: HashMap<(Codepage, StyleFlags), FontRef>,
    family_fonts: HashMap<u64, FontRef>,
    unicode_fonts: HashMap<u64, FontRef>,
    derived_fonts: HashMap<(FontId, StyleFlags, Codepage), FontRef>,
}

impl FontCaches {
    fn clear(&mut self) {
        self.cp_fonts.clear();
        self.family_fonts.clear();
        self.unicode_fonts.clear();
        self.derived_fonts.clear();
    }

    fn remove(&mut self, font: &FontRef) {
        self.cp_fonts.retain(|_, f| !Rc::ptr_eq(f, font));
        self.family_fonts.retain(|_, f| !Rc::ptr_eq(f, font));
        self.unicode_fonts.retain(|_, f| !Rc::ptr_eq(f, font));
        self.derived_fonts.retain(|_, f| !Rc::ptr_eq(f, font));
    }

    fn len(&self) -> usize {
        self.cp_fonts.len()
            + self.family_fonts.len()
            + self.unicode_fonts.len()
            + self.derived_fonts.len()
    }
}

/// Owner of installed-font state
///
/// The context owns the catalog of installed faces (enumerated lazily on
/// first use), the [`SystemFontMatcher`] with its candidate cache, loaded
/// programs and caches of system fonts keyed by codepage, family, Unicode
/// range and derivation.
///
/// All methods take `&self`; state is held in [`RefCell`]s. Methods never
/// hold a borrow while calling back into the context.
pub struct FontManagerContext {
    config: ManagerConfig,
    enumerator: Box<dyn OsFontEnumerator>,
    backend: Box<dyn GlyphBackend>,
    matcher: RefCell<Option<SystemFontMatcher>>,
    programs: RefCell<ProgramList>,
    caches: RefCell<FontCaches>,
    failed: RefCell<HashSet<char>>,
    next_id: Cell<u32>,
}

impl Default for FontManagerContext {
    fn default() -> Self {
        FontManagerContext::new(ManagerConfig::default())
    }
}

impl FontManagerContext {
    /// Construct
    ///
    /// System fonts are enumerated (on first use) only if
    /// [`ManagerConfig::load_system_fonts`] is true.
    pub fn new(config: ManagerConfig) -> Self {
        let enumerator = if config.load_system_fonts {
            SystemFonts::new()
        } else {
            SystemFonts::empty()
        };
        Self::with_enumerator(config, enumerator)
    }

    /// Construct with a custom enumerator
    pub fn with_enumerator(config: ManagerConfig, enumerator: impl OsFontEnumerator + 'static) -> Self {
        FontManagerContext {
            config,
            enumerator: Box::new(enumerator),
            backend: Box::new(TtfBackend),
            matcher: RefCell::new(None),
            programs: Default::default(),
            caches: Default::default(),
            failed: Default::default(),
            next_id: Cell::new(0),
        }
    }

    /// Replace the glyph backend
    pub fn with_backend(mut self, backend: impl GlyphBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Access the glyph backend
    #[inline]
    pub fn backend(&self) -> &dyn GlyphBackend {
        &*self.backend
    }

    /// Allocate a new font identifier
    pub fn new_font_id(&self) -> FontId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        FontId(id)
    }

    fn with_matcher<R>(&self, f: impl FnOnce(&mut SystemFontMatcher) -> R) -> R {
        let mut matcher = self.matcher.borrow_mut();
        let matcher = matcher
            .get_or_insert_with(|| SystemFontMatcher::new(FontCatalog::build(&*self.enumerator)));
        f(matcher)
    }

    /// Number of faces in the catalog
    pub fn catalog_len(&self) -> usize {
        self.with_matcher(|m| m.catalog().len())
    }

    /// Number of full catalog scans performed by the matcher
    pub fn scan_count(&self) -> u32 {
        self.with_matcher(|m| m.scan_count())
    }

    /// Number of fonts held by the system font caches
    pub fn cached_font_count(&self) -> usize {
        self.caches.borrow().len()
    }

    /// Number of code points memoized as unavailable
    pub fn failed_count(&self) -> usize {
        self.failed.borrow().len()
    }

    /// Find ranked candidates for a request
    pub fn match_system_font(&self, request: &MatchRequest) -> Rc<[MatchCandidate]> {
        self.with_matcher(|m| m.match_system_font(request))
    }

    /// Find the catalog face most similar to a style
    ///
    /// See [`SystemFontMatcher::match_default_font`].
    pub fn match_default_font(
        &self,
        family: Option<&str>,
        style: StyleFlags,
        charset: Charset,
        unicode: Option<char>,
        strict: bool,
    ) -> Option<usize> {
        self.with_matcher(|m| m.match_default_font(family, style, charset, unicode, strict))
    }

    fn load_program(&self, index: usize) -> Option<(Rc<dyn GlyphProgram>, String, String, StyleFlags)> {
        let (source, face_index, name, family, style) = self.with_matcher(|m| {
            m.record(index).map(|r| {
                (r.source.clone(), r.index, r.name.clone(), r.family.clone(), r.style)
            })
        })?;

        let hash = source_hash(&source, face_index);
        if let Some(program) = self.programs.borrow().find(hash) {
            return Some((program, name, family, style));
        }

        let data = self.enumerator.face_data(&source)?;
        match self.backend.load(data, face_index) {
            Ok(program) => {
                self.programs.borrow_mut().push(program.clone(), hash);
                Some((program, name, family, style))
            }
            Err(err) => {
                log::error!("Failed to load font {name}: {err}");
                None
            }
        }
    }

    /// Construct a system font over catalog face `index`
    pub fn system_font(&self, index: usize) -> Option<FontRef> {
        let (program, name, family, style) = self.load_program(index)?;
        Some(Rc::new(Font::system(
            self.new_font_id(),
            name,
            family,
            style,
            program,
        )))
    }

    fn first_loadable(&self, candidates: &[MatchCandidate]) -> Option<FontRef> {
        candidates.iter().find_map(|c| self.system_font(c.index))
    }

    /// Load the best installed font of a family
    ///
    /// Only faces whose name matches `family` and which support `codepage`
    /// are eligible. Results are cached.
    pub fn load_font(&self, family: &str, style: StyleFlags, codepage: Codepage) -> Option<FontRef> {
        let key = hash_value((normalize_name(family), style, codepage));
        if let Some(font) = self.caches.borrow().family_fonts.get(&key) {
            return Some(font.clone());
        }

        let request = MatchRequest::new()
            .with_family(family)
            .with_style(style)
            .with_codepage(codepage);
        let font = self.first_loadable(&self.match_system_font(&request))?;
        log::debug!("load_font({family}): {}", font.name());
        self.caches
            .borrow_mut()
            .family_fonts
            .insert(key, font.clone());
        Some(font)
    }

    /// Get an installed font supporting a codepage
    ///
    /// The configured (or default) family for the codepage's charset is
    /// preferred; otherwise the best face supporting the codepage is used.
    pub fn get_font_by_codepage(&self, codepage: Codepage, style: StyleFlags) -> Option<FontRef> {
        if let Some(font) = self.caches.borrow().cp_fonts.get(&(codepage, style)) {
            return Some(font.clone());
        }

        let charset = Charset::from_codepage(codepage).unwrap_or_default();
        let fallback = match default_font_for_charset(charset) {
            DEFAULT_ANSI_FONT => self.config.default_font.as_str(),
            family => family,
        };
        let font = self
            .config
            .fonts_for_charset(charset)
            .chain(std::iter::once(fallback))
            .find_map(|family| self.load_font(family, style, codepage))
            .or_else(|| {
                let request = MatchRequest::new().with_style(style).with_codepage(codepage);
                self.first_loadable(&self.match_system_font(&request))
            })?;

        self.caches
            .borrow_mut()
            .cp_fonts
            .insert((codepage, style), font.clone());
        Some(font)
    }

    /// Get an installed font supporting a charset
    #[inline]
    pub fn get_font_by_charset(&self, charset: Charset, style: StyleFlags) -> Option<FontRef> {
        self.get_font_by_codepage(charset.codepage(), style)
    }

    /// Get an installed font with a glyph for `ch`
    ///
    /// Candidates must declare support for the Unicode block of `ch` (and
    /// its associated codepage, if any). If `family` is given, only faces
    /// of that family are considered. The first candidate which actually
    /// maps `ch` to a glyph is returned and cached.
    ///
    /// A code point for which no font is found without a family hint is
    /// remembered; later requests for it fail immediately.
    pub fn get_font_by_unicode(
        &self,
        ch: char,
        style: StyleFlags,
        family: Option<&str>,
    ) -> Option<FontRef> {
        if self.failed.borrow().contains(&ch) {
            return None;
        }

        let range = unicode_range(ch);
        let codepage = range.and_then(|r| r.codepage);
        let family = family.map(normalize_name).filter(|s| !s.is_empty());
        let key = match codepage {
            Some(cp) => hash_value((0u8, cp, style, &family)),
            None => hash_value((1u8, range.map(|r| r.bit), style, &family)),
        };

        let cached = self.caches.borrow().unicode_fonts.get(&key).cloned();
        if let Some(font) = cached {
            if font.glyph_from_char_code(u32::from(ch)).is_some() {
                return Some(font);
            }
        }

        let mut request = MatchRequest::new().with_style(style).with_unicode(ch);
        if let Some(cp) = codepage {
            request = request.with_codepage(cp);
        }
        if let Some(family) = family.as_deref() {
            request = request.with_family(family);
        }

        for candidate in self.match_system_font(&request).iter() {
            let Some(font) = self.system_font(candidate.index) else {
                continue;
            };
            if font.glyph_from_char_code(u32::from(ch)).is_some() {
                log::debug!("get_font_by_unicode({ch:?}): {}", font.name());
                self.caches
                    .borrow_mut()
                    .unicode_fonts
                    .insert(key, font.clone());
                return Some(font);
            }
        }

        if family.is_none() {
            log::debug!("get_font_by_unicode: no font for {ch:?}");
            self.failed.borrow_mut().insert(ch);
        }
        None
    }

    /// Get a font with a different style
    ///
    /// Embedded fonts, and requests for the font's own style, return `font`
    /// itself. Otherwise a restyled font is constructed and cached; a
    /// substituted font takes the program of the best installed face for the
    /// new style.
    pub fn derive_font(&self, font: &FontRef, style: StyleFlags, codepage: Codepage) -> FontRef {
        if font.style() == style || font.is_embedded() {
            return font.clone();
        }

        let key = (font.id(), style, codepage);
        if let Some(derived) = self.caches.borrow().derived_fonts.get(&key) {
            return derived.clone();
        }

        let program = if font.is_substituted() {
            self.load_font(font.family(), style, codepage)
                .and_then(|f| f.program().cloned())
        } else {
            None
        };
        let derived = Rc::new(font.restyled(self.new_font_id(), style, program));
        self.caches
            .borrow_mut()
            .derived_fonts
            .insert(key, derived.clone());
        derived
    }

    /// Find an installed font to stand in for a document font
    ///
    /// Tried in order: the font's family, known substitutes for standard
    /// fonts, configured and known families for CJK charsets, the most
    /// similar face, and finally the universal font.
    pub fn substitute_font(&self, name: &str, style: StyleFlags, charset: Charset) -> Option<FontRef> {
        let (family, style, substitutes) = match standard_font(name) {
            Some(base14) => (base14.family(), style | base14.style(), base14.substitutes()),
            None => {
                let (family, name_style) = split_style(name);
                (family, style | name_style, &[][..])
            }
        };
        let codepage = charset.codepage();

        let mut families: Vec<&str> = vec![family];
        families.extend(substitutes.iter().copied());
        if charset.is_cjk() {
            families.extend(self.config.fonts_for_charset(charset));
            families.extend(cjk_families(charset).iter().copied());
        }

        for family in families {
            if let Some(font) = self.load_font(family, style, codepage) {
                return Some(font);
            }
        }

        if let Some(index) = self.match_default_font(None, style, charset, None, false) {
            if let Some(font) = self.system_font(index) {
                return Some(font);
            }
        }

        let universal = self.config.universal_font.clone();
        self.load_font(&universal, style, Codepage::DEF_ANSI)
            .or_else(|| self.load_font(&universal, StyleFlags::empty(), Codepage::DEF_ANSI))
    }

    /// Drop a font from all caches
    pub fn remove_font(&self, font: &FontRef) {
        self.caches.borrow_mut().remove(font);
    }

    /// Register a font file held in memory
    ///
    /// All faces of `data` are appended to the catalog and cached candidate
    /// lists are discarded. Memoized failures are kept until
    /// [`Self::refresh_catalog`]. Returns the number of faces added.
    pub fn register_face(&self, data: FontData) -> usize {
        read_faces(&data)
            .into_iter()
            .map(|face| self.register_enumerated(face))
            .filter(|&added| added)
            .count()
    }

    /// Append one face to the catalog
    ///
    /// Returns false if the face has no name.
    pub fn register_enumerated(&self, face: EnumeratedFace) -> bool {
        self.with_matcher(|m| m.push_face(face)).is_some()
    }

    /// Re-enumerate installed fonts
    ///
    /// All caches are cleared. Faces added by [`Self::register_face`] are
    /// discarded.
    pub fn refresh_catalog(&self) {
        let catalog = FontCatalog::build(&*self.enumerator);
        match &mut *self.matcher.borrow_mut() {
            Some(matcher) => matcher.set_catalog(catalog),
            slot => *slot = Some(SystemFontMatcher::new(catalog)),
        }
        self.caches.borrow_mut().clear();
        *self.programs.borrow_mut() = Default::default();
        self.failed.borrow_mut().clear();
    }

    /// Release all state
    ///
    /// The catalog is rebuilt on next use. Fonts still referenced elsewhere
    /// remain valid.
    pub fn teardown(&self) {
        *self.matcher.borrow_mut() = None;
        self.caches.borrow_mut().clear();
        *self.programs.borrow_mut() = Default::default();
        self.failed.borrow_mut().clear();
    }
}

impl std::fmt::Debug for FontManagerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontManagerContext")
            .field("config", &self.config)
            .field("cached_fonts", &self.caches.borrow().len())
            .field("failed", &self.failed.borrow().len())
            .finish_non_exhaustive()
    }
}
