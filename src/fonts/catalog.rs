// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Installed font catalog
//!
//! The catalog is a list of [`FontDescriptorRecord`]s: one per installed face,
//! reduced to the properties used by the matcher. It is built from the output
//! of an [`OsFontEnumerator`].

use super::bitfield::{codepage_bit, test_bit};
use super::face::{face_count, FontData};
use super::{Charset, Codepage, StyleFlags};
use crate::conv::be_u32;
use fontdb::Database;
use log::{debug, error, info};
use smallvec::SmallVec;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use ttf_parser::{name_id, Face, Tag};

/// Font enumeration failed
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no installed fonts found")]
    NoFonts,
}

/// Where a face's data may be loaded from
#[derive(Clone)]
pub enum FaceSource {
    /// A font file
    Path(PathBuf),
    /// Font data held in memory
    Data(FontData),
    /// A face of a [`fontdb::Database`]
    System(fontdb::ID),
}

impl fmt::Debug for FaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FaceSource::Data(data) => write!(f, "Data({} bytes)", data.len()),
            FaceSource::System(id) => f.debug_tuple("System").field(id).finish(),
        }
    }
}

/// A face as reported by an [`OsFontEnumerator`]
///
/// Construct with [`EnumeratedFace::new`] and the `with_*` methods, or with
/// [`read_faces`] from font data.
#[derive(Clone, Debug)]
pub struct EnumeratedFace {
    pub source: FaceSource,
    pub index: u32,
    /// Family name (name ID 1)
    pub family: String,
    /// Sub-family name (name ID 2), e.g. "Bold Italic"
    pub subfamily: String,
    /// Other family names (localized or typographic)
    pub alternates: Vec<String>,
    /// Style flags not implied by `subfamily`
    pub style: StyleFlags,
    /// Declared legacy charsets
    pub charsets: Vec<Charset>,
    /// OS/2 `ulUnicodeRange1..4`
    pub unicode_range: [u32; 4],
    /// OS/2 `ulCodePageRange1..2`
    pub codepage_range: [u32; 2],
}

impl EnumeratedFace {
    /// Construct with a family name and in-memory source
    pub fn new(family: impl Into<String>) -> Self {
        EnumeratedFace {
            source: FaceSource::Data(FontData::from(&[][..])),
            index: 0,
            family: family.into(),
            subfamily: String::new(),
            alternates: vec![],
            style: StyleFlags::empty(),
            charsets: vec![],
            unicode_range: [0; 4],
            codepage_range: [0; 2],
        }
    }

    /// Set the source and face index
    pub fn with_source(mut self, source: FaceSource, index: u32) -> Self {
        self.source = source;
        self.index = index;
        self
    }

    /// Set the sub-family name
    pub fn with_subfamily(mut self, subfamily: impl Into<String>) -> Self {
        self.subfamily = subfamily.into();
        self
    }

    /// Add an alternate family name
    pub fn with_alternate(mut self, name: impl Into<String>) -> Self {
        self.alternates.push(name.into());
        self
    }

    /// Add style flags
    pub fn with_style(mut self, style: StyleFlags) -> Self {
        self.style |= style;
        self
    }

    /// Add a declared charset
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charsets.push(charset);
        self
    }

    /// Set codepage-range bits for the given codepages
    pub fn with_codepages(mut self, codepages: &[Codepage]) -> Self {
        for cp in codepages {
            if let Some(bit) = codepage_bit(*cp) {
                self.codepage_range[usize::from(bit / 32)] |= 1u32 << (bit % 32);
            }
        }
        self
    }

    /// Set Unicode-range bits
    pub fn with_unicode_bits(mut self, bits: &[u16]) -> Self {
        for bit in bits {
            if *bit < 128 {
                self.unicode_range[usize::from(bit / 32)] |= 1u32 << (bit % 32);
            }
        }
        self
    }
}

/// An installed face, as used for matching
#[derive(Clone, Debug)]
pub struct FontDescriptorRecord {
    /// Face name: family plus any non-regular sub-family
    pub name: String,
    /// Family name
    pub family: String,
    /// Alternate family names
    pub alternates: Vec<String>,
    pub style: StyleFlags,
    pub unicode_range: [u32; 4],
    pub codepage_range: [u32; 2],
    pub charsets: SmallVec<[Charset; 4]>,
    pub index: u32,
    pub source: FaceSource,
}

impl FontDescriptorRecord {
    /// Reduce an enumerated face
    ///
    /// Returns `None` for faces without a family name.
    pub fn from_face(face: EnumeratedFace) -> Option<Self> {
        let family = face.family.trim().to_string();
        if family.is_empty() {
            return None;
        }

        let subfamily = face.subfamily.trim();
        let name = if subfamily.is_empty() || subfamily == "Regular" {
            family.clone()
        } else {
            format!("{family} {subfamily}")
        };

        let mut style = face.style;
        if subfamily.contains("Bold") {
            style |= StyleFlags::BOLD;
        }
        if subfamily.contains("Italic") || subfamily.contains("Oblique") {
            style |= StyleFlags::ITALIC;
        }
        if name.contains("Serif") && !name.contains("Sans") {
            style |= StyleFlags::SERIF;
        }

        let mut codepage_range = face.codepage_range;
        if codepage_range == [0; 2] {
            for charset in &face.charsets {
                if let Some(bit) = codepage_bit(charset.codepage()) {
                    codepage_range[usize::from(bit / 32)] |= 1u32 << (bit % 32);
                }
            }
        }

        let mut charsets: SmallVec<[Charset; 4]> = SmallVec::new();
        let mut add = |cs: Charset| {
            if !charsets.contains(&cs) {
                charsets.push(cs);
            }
        };
        for cs in &face.charsets {
            add(*cs);
        }
        for (bit, cs) in [
            (17, Charset::ShiftJis),
            (18, Charset::ChineseSimplified),
            (19, Charset::Hangul),
            (20, Charset::ChineseTraditional),
            (21, Charset::Hangul),
            (31, Charset::Symbol),
        ] {
            if test_bit(&codepage_range, bit) {
                add(cs);
            }
        }
        add(Charset::Ansi);

        if test_bit(&codepage_range, 31) && !test_bit(&codepage_range, 0) {
            style |= StyleFlags::SYMBOLIC;
        }

        let mut alternates = face.alternates;
        alternates.retain(|alt| !alt.is_empty() && *alt != family);
        alternates.dedup();

        Some(FontDescriptorRecord {
            name,
            family,
            alternates,
            style,
            unicode_range: face.unicode_range,
            codepage_range,
            charsets,
            index: face.index,
            source: face.source,
        })
    }

    /// True if the face declares support for `charset`
    #[inline]
    pub fn has_charset(&self, charset: Charset) -> bool {
        self.charsets.contains(&charset)
    }

    /// True if the codepage-range field includes `cp`
    ///
    /// [`Codepage::DEF_ANSI`] is always supported.
    pub fn supports_codepage(&self, cp: Codepage) -> bool {
        match codepage_bit(cp) {
            Some(bit) => test_bit(&self.codepage_range, bit),
            None => cp.is_unspecified(),
        }
    }

    /// True if the Unicode-range field includes `bit`
    #[inline]
    pub fn supports_unicode_bit(&self, bit: u16) -> bool {
        test_bit(&self.unicode_range, bit)
    }
}

/// Source of installed faces
pub trait OsFontEnumerator {
    /// Enumerate all installed faces
    fn enumerate(&self) -> Result<Vec<EnumeratedFace>, CatalogError>;

    /// Load the data of a face previously enumerated
    fn face_data(&self, source: &FaceSource) -> Option<FontData>;
}

/// An enumerator over a [`fontdb::Database`]
///
/// By default, system fonts are loaded.
pub struct SystemFonts {
    db: Database,
}

impl SystemFonts {
    /// Construct, loading system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        SystemFonts { db }
    }

    /// Construct with an empty database
    pub fn empty() -> Self {
        SystemFonts {
            db: Database::new(),
        }
    }

    /// Construct from an existing database
    pub fn from_database(db: Database) -> Self {
        SystemFonts { db }
    }

    /// Add fonts from a directory
    pub fn load_fonts_dir(&mut self, path: impl AsRef<std::path::Path>) {
        self.db.load_fonts_dir(path);
    }

    /// Access the database
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        SystemFonts::new()
    }
}

impl OsFontEnumerator for SystemFonts {
    fn enumerate(&self) -> Result<Vec<EnumeratedFace>, CatalogError> {
        if self.db.is_empty() {
            return Err(CatalogError::NoFonts);
        }

        let mut faces = Vec::with_capacity(self.db.len());
        for info in self.db.faces() {
            let face = self.db.with_face_data(info.id, |data, index| {
                read_face(data, index, FaceSource::System(info.id))
            });
            if let Some(face) = face.flatten() {
                faces.push(face);
            } else {
                debug!("SystemFonts: skipping unreadable face {:?}", info.id);
            }
        }
        Ok(faces)
    }

    fn face_data(&self, source: &FaceSource) -> Option<FontData> {
        match source {
            FaceSource::System(id) => self.db.with_face_data(*id, |data, _| FontData::from(data)),
            FaceSource::Data(data) => Some(data.clone()),
            FaceSource::Path(path) => match std::fs::read(path) {
                Ok(data) => Some(data.into()),
                Err(err) => {
                    error!("Failed to read font file {}: {err}", path.display());
                    None
                }
            },
        }
    }
}

/// Read all faces of a font file held in memory
pub fn read_faces(data: &FontData) -> Vec<EnumeratedFace> {
    (0..face_count(data))
        .filter_map(|index| read_face(data, index, FaceSource::Data(data.clone())))
        .collect()
}

/// Read the naming and signature properties of one face
pub fn read_face(data: &[u8], index: u32, source: FaceSource) -> Option<EnumeratedFace> {
    let face = Face::parse(data, index).ok()?;

    let mut families: Vec<String> = vec![];
    let mut subfamily = None;
    for name in face.names() {
        match name.name_id {
            name_id::FAMILY | name_id::TYPOGRAPHIC_FAMILY => {
                if let Some(s) = name.to_string() {
                    if !families.contains(&s) {
                        families.push(s);
                    }
                }
            }
            name_id::SUBFAMILY if subfamily.is_none() => {
                subfamily = name.to_string();
            }
            _ => (),
        }
    }
    if families.is_empty() {
        return None;
    }
    let family = families.remove(0);

    let mut style = StyleFlags::empty();
    if face.is_monospaced() {
        style |= StyleFlags::FIXED_PITCH;
    }
    if face.is_bold() {
        style |= StyleFlags::BOLD;
    }
    if face.is_italic() || face.is_oblique() {
        style |= StyleFlags::ITALIC;
    }

    let mut unicode_range = [0; 4];
    let mut codepage_range = [0; 2];
    if let Some(os2) = face.raw_face().table(Tag::from_bytes(b"OS/2")) {
        style |= panose_style(os2);
        for (i, word) in unicode_range.iter_mut().enumerate() {
            *word = be_u32(os2, 42 + 4 * i).unwrap_or(0);
        }
        // Version 0 tables end before the codepage range
        if be_u32(os2, 78).is_some() {
            codepage_range[0] = be_u32(os2, 78).unwrap_or(0);
            codepage_range[1] = be_u32(os2, 82).unwrap_or(0);
        }
    }

    Some(EnumeratedFace {
        source,
        index,
        family,
        subfamily: subfamily.unwrap_or_default(),
        alternates: families,
        style,
        charsets: vec![],
        unicode_range,
        codepage_range,
    })
}

// Style hints from the PANOSE classification at offset 32 of OS/2
fn panose_style(os2: &[u8]) -> StyleFlags {
    let mut style = StyleFlags::empty();
    let Some(panose) = os2.get(32..42) else {
        return style;
    };
    match panose[0] {
        // Latin text: inspect the serif style
        2 => {
            if (2..=10).contains(&panose[1]) {
                style |= StyleFlags::SERIF;
            }
        }
        3 => style |= StyleFlags::SCRIPT,
        5 => style |= StyleFlags::SYMBOLIC,
        _ => (),
    }
    if panose[0] == 2 && panose[3] == 9 {
        style |= StyleFlags::FIXED_PITCH;
    }
    style
}

/// The list of installed faces
#[derive(Debug, Default)]
pub struct FontCatalog {
    records: Vec<FontDescriptorRecord>,
}

impl FontCatalog {
    /// Build from an enumerator
    ///
    /// Enumeration failure is logged and yields an empty catalog.
    pub fn build(enumerator: &dyn OsFontEnumerator) -> Self {
        let mut catalog = FontCatalog::default();
        match enumerator.enumerate() {
            Ok(faces) => {
                for face in faces {
                    catalog.push(face);
                }
                info!("Found {} fonts", catalog.len());
            }
            Err(err) => error!("Font enumeration failed: {err}"),
        }
        catalog
    }

    /// Append a face
    ///
    /// Faces without a name are ignored. Returns the index of the new record.
    pub fn push(&mut self, face: EnumeratedFace) -> Option<usize> {
        let record = FontDescriptorRecord::from_face(face)?;
        let index = self.records.len();
        self.records.push(record);
        Some(index)
    }

    /// Get the number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the catalog is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&FontDescriptorRecord> {
        self.records.get(index)
    }

    /// Access all records
    #[inline]
    pub fn records(&self) -> &[FontDescriptorRecord] {
        &self.records
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reduce_name_and_style() {
        let face = EnumeratedFace::new("Liberation Serif")
            .with_subfamily("Bold Italic")
            .with_codepages(&[Codepage::MSWIN_WESTERN_EUROPEAN]);
        let record = FontDescriptorRecord::from_face(face).unwrap();
        assert_eq!(record.name, "Liberation Serif Bold Italic");
        assert_eq!(
            record.style,
            StyleFlags::BOLD | StyleFlags::ITALIC | StyleFlags::SERIF
        );
        assert_eq!(record.charsets.as_slice(), &[Charset::Ansi]);
        assert!(record.supports_codepage(Codepage::MSWIN_WESTERN_EUROPEAN));
        assert!(!record.supports_codepage(Codepage::SHIFT_JIS));
        assert!(record.supports_codepage(Codepage::DEF_ANSI));
    }

    #[test]
    fn symbol_codepage() {
        let face = EnumeratedFace::new("Wingdings").with_codepages(&[Codepage::SYMBOL]);
        let record = FontDescriptorRecord::from_face(face).unwrap();
        assert!(record.style.contains(StyleFlags::SYMBOLIC));
        assert!(record.has_charset(Charset::Symbol));
        assert!(record.has_charset(Charset::Ansi));
    }

    #[test]
    fn charsets_imply_codepages() {
        let face = EnumeratedFace::new("SimSun").with_charset(Charset::ChineseSimplified);
        let record = FontDescriptorRecord::from_face(face).unwrap();
        assert!(record.supports_codepage(Codepage::CHINESE_SIMPLIFIED));
        assert_eq!(
            record.charsets.as_slice(),
            &[Charset::ChineseSimplified, Charset::Ansi]
        );
    }

    #[test]
    fn unnamed_face() {
        assert!(FontDescriptorRecord::from_face(EnumeratedFace::new("  ")).is_none());
    }

    struct Failing;
    impl OsFontEnumerator for Failing {
        fn enumerate(&self) -> Result<Vec<EnumeratedFace>, CatalogError> {
            Err(CatalogError::NoFonts)
        }
        fn face_data(&self, _: &FaceSource) -> Option<FontData> {
            None
        }
    }

    #[test]
    fn failed_enumeration_is_empty() {
        assert!(FontCatalog::build(&Failing).is_empty());
    }

    #[test]
    fn garbage_data() {
        let data = FontData::from(&b"garbage"[..]);
        assert!(read_faces(&data).is_empty());
    }
}
