// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! System font matching
//!
//! Two strategies are provided:
//!
//! -   [`SystemFontMatcher::match_system_font`] scores every catalog record
//!     with a penalty (lower is better) and returns the ranked survivors.
//!     Results are cached per request.
//! -   [`SystemFontMatcher::match_default_font`] picks the single record most
//!     similar in style, for use when no particular family is wanted.

use super::bitfield::{codepage_bit, test_bit, unicode_bit};
use super::catalog::{EnumeratedFace, FontCatalog, FontDescriptorRecord};
use super::families::normalize_name;
use super::{Charset, Codepage, StyleFlags};
use log::debug;
use std::collections::hash_map::{DefaultHasher, HashMap};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Penalty at or above which a candidate is not a match
pub const PENALTY_CUTOFF: i32 = 0xFFFF;

/// Maximum number of candidates returned by one match
pub const MAX_CANDIDATES: usize = 0xFFFF;

const BASELINE: i32 = 30000;
const NAME_EXACT: i32 = 30000;
const NAME_ALTERNATE: i32 = 28000;
const NAME_PARTIAL: i32 = 26000;
const BOLD_MISMATCH: i32 = 4500;
const FIXED_PITCH_MISMATCH: i32 = 10000;
const ITALIC_MISMATCH: i32 = 10000;
const SERIF_MISMATCH: i32 = 500;
const CODEPAGE_MATCH: i32 = 60000;
const UNICODE_MATCH: i32 = 60000;

/// Parameters of a system font search
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatchRequest {
    /// Requested family name
    pub family: Option<String>,
    /// Requested style
    pub style: StyleFlags,
    /// Required codepage
    pub codepage: Option<Codepage>,
    /// Code point whose Unicode block must be supported
    pub unicode: Option<char>,
    /// Skip candidates whose paragraph style differs
    pub strict: bool,
}

impl MatchRequest {
    /// Construct an unconstrained request
    pub fn new() -> Self {
        MatchRequest::default()
    }

    /// Set the family name
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the style
    pub fn with_style(mut self, style: StyleFlags) -> Self {
        self.style = style;
        self
    }

    /// Set the codepage
    pub fn with_codepage(mut self, codepage: Codepage) -> Self {
        self.codepage = Some(codepage);
        self
    }

    /// Set the code point
    pub fn with_unicode(mut self, ch: char) -> Self {
        self.unicode = Some(ch);
        self
    }

    /// Enable strict style matching
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn key(&self) -> RequestKey {
        RequestKey {
            family: self
                .family
                .as_deref()
                .map(normalize_name)
                .filter(|s| !s.is_empty()),
            style: self.style,
            codepage_bit: self.codepage.and_then(codepage_bit),
            unicode_bit: self.unicode.and_then(unicode_bit),
            strict: self.strict,
        }
    }
}

// The effective parameters of a request: two requests with equal keys
// produce identical candidate lists.
#[derive(Debug, Hash)]
struct RequestKey {
    family: Option<String>,
    style: StyleFlags,
    codepage_bit: Option<u16>,
    unicode_bit: Option<u16>,
    strict: bool,
}

impl RequestKey {
    fn hash_value(&self) -> u64 {
        let mut s = DefaultHasher::new();
        self.hash(&mut s);
        s.finish()
    }
}

/// A ranked match result
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Index of the record in the catalog
    pub index: usize,
    /// Penalty: lower is better
    pub penalty: i32,
}

// How well a requested (normalized) name matches a record
fn name_bonus(family: &str, record: &FontDescriptorRecord) -> Option<i32> {
    let name = normalize_name(&record.name);
    if name == family {
        return Some(NAME_EXACT);
    }
    let mut alternates = std::iter::once(&record.family).chain(record.alternates.iter());
    if alternates.clone().any(|alt| normalize_name(alt) == family) {
        return Some(NAME_ALTERNATE);
    }
    let partial = |other: &str| {
        !other.is_empty() && (other.contains(family) || family.contains(other))
    };
    if partial(&name) || alternates.any(|alt| partial(&normalize_name(alt))) {
        return Some(NAME_PARTIAL);
    }
    None
}

/// Compute the penalty of a record
///
/// Returns `None` when the record is disqualified: on symbolic mismatch, a
/// family with no name match, a missing codepage bit, a missing Unicode bit,
/// or a penalty at or above [`PENALTY_CUTOFF`].
fn penalty(record: &FontDescriptorRecord, key: &RequestKey) -> Option<i32> {
    let mut penalty = BASELINE;

    if let Some(family) = key.family.as_deref() {
        penalty -= name_bonus(family, record)?;
    }

    let diff = record.style ^ key.style;
    if diff.contains(StyleFlags::SYMBOLIC) {
        return None;
    }
    if diff.contains(StyleFlags::BOLD) {
        penalty += BOLD_MISMATCH;
    }
    if diff.contains(StyleFlags::FIXED_PITCH) {
        penalty += FIXED_PITCH_MISMATCH;
    }
    if diff.contains(StyleFlags::ITALIC) {
        penalty += ITALIC_MISMATCH;
    }
    if diff.contains(StyleFlags::SERIF) {
        penalty += SERIF_MISMATCH;
    }
    if penalty >= PENALTY_CUTOFF {
        return None;
    }

    if let Some(bit) = key.codepage_bit {
        if !test_bit(&record.codepage_range, bit) {
            return None;
        }
        penalty -= CODEPAGE_MATCH;
    }

    if let Some(bit) = key.unicode_bit {
        if !test_bit(&record.unicode_range, bit) {
            return None;
        }
        penalty -= UNICODE_MATCH;
    }

    Some(penalty)
}

/// Selects installed fonts from a [`FontCatalog`]
#[derive(Debug, Default)]
pub struct SystemFontMatcher {
    catalog: FontCatalog,
    cache: HashMap<u64, Rc<[MatchCandidate]>>,
    scans: u32,
}

impl SystemFontMatcher {
    /// Construct over a catalog
    pub fn new(catalog: FontCatalog) -> Self {
        SystemFontMatcher {
            catalog,
            cache: HashMap::new(),
            scans: 0,
        }
    }

    /// Access the catalog
    #[inline]
    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Get a catalog record
    #[inline]
    pub fn record(&self, index: usize) -> Option<&FontDescriptorRecord> {
        self.catalog.get(index)
    }

    /// Number of full catalog scans performed by [`Self::match_system_font`]
    #[inline]
    pub fn scan_count(&self) -> u32 {
        self.scans
    }

    /// Append a face to the catalog
    ///
    /// This invalidates all cached candidate lists.
    pub fn push_face(&mut self, face: EnumeratedFace) -> Option<usize> {
        let index = self.catalog.push(face)?;
        self.cache.clear();
        Some(index)
    }

    /// Replace the catalog, invalidating all cached candidate lists
    pub fn set_catalog(&mut self, catalog: FontCatalog) {
        self.catalog = catalog;
        self.cache.clear();
    }

    /// Find ranked candidates for a request
    ///
    /// The result is sorted by ascending penalty; equal penalties keep
    /// catalog order. Results are cached: repeating an equivalent request
    /// returns the same list without scanning the catalog.
    pub fn match_system_font(&mut self, request: &MatchRequest) -> Rc<[MatchCandidate]> {
        let key = request.key();
        let hash = key.hash_value();
        if let Some(list) = self.cache.get(&hash) {
            return list.clone();
        }

        self.scans += 1;
        let mut list = Vec::new();
        for (index, record) in self.catalog.records().iter().enumerate() {
            if key.strict && record.style.paragraph() != key.style.paragraph() {
                continue;
            }
            if let Some(penalty) = penalty(record, &key) {
                list.push(MatchCandidate { index, penalty });
            }
        }
        list.sort_by_key(|c| c.penalty);
        list.truncate(MAX_CANDIDATES);

        if log::log_enabled!(log::Level::Debug) {
            let best = list.first().and_then(|c| self.catalog.get(c.index));
            debug!(
                "match_system_font({request:?}): {} candidates, best: {:?}",
                list.len(),
                best.map(|r| r.name.as_str())
            );
        }

        let list: Rc<[MatchCandidate]> = list.into();
        self.cache.insert(hash, list.clone());
        list
    }

    /// Find the record most similar to a style
    ///
    /// Faces that are both bold and italic are never chosen. If `family` is
    /// given, only faces of that name are eligible; otherwise faces declaring
    /// the symbol charset are skipped. Faces must support the codepage of
    /// `charset` and, if `unicode` is given, its Unicode block.
    ///
    /// With `strict`, the first face with the same paragraph style is
    /// returned, or `None` if there is no such face. Otherwise the face with
    /// best similarity score is returned, if that score is positive.
    pub fn match_default_font(
        &self,
        family: Option<&str>,
        style: StyleFlags,
        charset: Charset,
        unicode: Option<char>,
        strict: bool,
    ) -> Option<usize> {
        let family = family.map(normalize_name).filter(|s| !s.is_empty());
        let codepage = charset.codepage();
        let bit = unicode.and_then(unicode_bit).filter(|bit| *bit < 128);

        let mut best: Option<(usize, u32)> = None;
        for (index, record) in self.catalog.records().iter().enumerate() {
            if record.style.is_bold_italic() {
                continue;
            }

            let mut name_match = false;
            if let Some(family) = family.as_deref() {
                if normalize_name(&record.name) != family
                    && normalize_name(&record.family) != family
                {
                    continue;
                }
                name_match = true;
                if record.has_charset(Charset::Symbol) {
                    return Some(index);
                }
            }
            if record.has_charset(Charset::Symbol) {
                continue;
            }

            if !record.supports_codepage(codepage) {
                continue;
            }
            if let Some(bit) = bit {
                if !record.supports_unicode_bit(bit) {
                    continue;
                }
            }

            if strict {
                if record.style.paragraph() == style.paragraph() {
                    return Some(index);
                }
                continue;
            }
            if name_match {
                return Some(index);
            }

            let score = similarity(record.style, style);
            if best.map(|(_, s)| score > s).unwrap_or(true) {
                best = Some((index, score));
            }
        }

        best.filter(|(_, score)| *score >= 1).map(|(index, _)| index)
    }
}

/// Similarity of two styles
fn similarity(a: StyleFlags, b: StyleFlags) -> u32 {
    let mut score = 0;
    let same = |flag: StyleFlags| a.contains(flag) == b.contains(flag);
    if same(StyleFlags::SYMBOLIC) {
        score += 64;
    }
    if same(StyleFlags::FIXED_PITCH) {
        score += 32;
    }
    if same(StyleFlags::SERIF) {
        score += 16;
    }
    if same(StyleFlags::SCRIPT) {
        score += 8;
    }
    score
}

#[cfg(test)]
mod test {
    use super::*;

    fn catalog(faces: Vec<EnumeratedFace>) -> SystemFontMatcher {
        let mut catalog = FontCatalog::default();
        for face in faces {
            catalog.push(face);
        }
        SystemFontMatcher::new(catalog)
    }

    fn ansi(name: &str) -> EnumeratedFace {
        EnumeratedFace::new(name).with_codepages(&[Codepage::MSWIN_WESTERN_EUROPEAN])
    }

    fn names(m: &SystemFontMatcher, list: &[MatchCandidate]) -> Vec<String> {
        list.iter()
            .map(|c| m.record(c.index).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn name_bonuses() {
        let m = catalog(vec![
            ansi("Helvetica"),
            ansi("Nimbus Sans").with_alternate("Helvetica"),
            ansi("Helvetica Neue"),
        ]);
        let key = MatchRequest::new().with_family("Helvetica").key();
        let records = m.catalog().records();
        assert_eq!(name_bonus("helvetica", &records[0]), Some(NAME_EXACT));
        assert_eq!(name_bonus("helvetica", &records[1]), Some(NAME_ALTERNATE));
        assert_eq!(name_bonus("helvetica", &records[2]), Some(NAME_PARTIAL));
        assert_eq!(penalty(&records[0], &key), Some(0));
        assert_eq!(penalty(&records[1], &key), Some(2000));
        assert_eq!(penalty(&records[2], &key), Some(4000));
    }

    #[test]
    fn style_penalties() {
        let m = catalog(vec![ansi("A")
            .with_subfamily("Bold Italic")
            .with_style(StyleFlags::FIXED_PITCH | StyleFlags::SERIF)]);
        let key = MatchRequest::new().key();
        assert_eq!(
            penalty(&m.catalog().records()[0], &key),
            Some(BASELINE + 4500 + 10000 + 10000 + 500)
        );
    }

    #[test]
    fn family_without_match_is_excluded() {
        let mut m = catalog(vec![ansi("Arial"), ansi("Times")]);
        let list = m.match_system_font(&MatchRequest::new().with_family("Helvetica"));
        assert!(list.is_empty());
    }

    #[test]
    fn codepage_and_unicode() {
        let mut m = catalog(vec![
            ansi("Latin"),
            EnumeratedFace::new("Kanji")
                .with_codepages(&[Codepage::SHIFT_JIS])
                .with_unicode_bits(&[49, 59]),
        ]);
        let list = m.match_system_font(&MatchRequest::new().with_codepage(Codepage::SHIFT_JIS));
        assert_eq!(names(&m, &list), vec!["Kanji"]);
        assert_eq!(list[0].penalty, BASELINE - CODEPAGE_MATCH);

        let list = m.match_system_font(&MatchRequest::new().with_unicode('\u{4E2D}'));
        assert_eq!(names(&m, &list), vec!["Kanji"]);

        // An unspecified codepage constrains nothing
        let list = m.match_system_font(&MatchRequest::new().with_codepage(Codepage::DEF_ANSI));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn strict_paragraph_style() {
        let mut m = catalog(vec![
            ansi("Sans"),
            ansi("Serif Face").with_style(StyleFlags::SERIF),
        ]);
        let request = MatchRequest::new().with_style(StyleFlags::SERIF).strict();
        let list = m.match_system_font(&request);
        assert_eq!(names(&m, &list), vec!["Serif Face"]);

        let list = m.match_system_font(&MatchRequest::new().with_style(StyleFlags::SERIF));
        assert_eq!(names(&m, &list), vec!["Serif Face", "Sans"]);
    }

    #[test]
    fn stable_order() {
        let mut m = catalog(vec![ansi("One"), ansi("Two"), ansi("Three")]);
        let list = m.match_system_font(&MatchRequest::new());
        assert_eq!(names(&m, &list), vec!["One", "Two", "Three"]);
    }

    #[test]
    fn cache_invalidated_by_push() {
        let mut m = catalog(vec![ansi("One")]);
        let request = MatchRequest::new();
        assert_eq!(m.match_system_font(&request).len(), 1);
        assert_eq!(m.match_system_font(&request).len(), 1);
        assert_eq!(m.scan_count(), 1);

        m.push_face(ansi("Two"));
        assert_eq!(m.match_system_font(&request).len(), 2);
        assert_eq!(m.scan_count(), 2);
    }

    #[test]
    fn default_font_similarity() {
        let m = catalog(vec![
            ansi("Courier New").with_style(StyleFlags::FIXED_PITCH),
            ansi("Times New Roman").with_style(StyleFlags::SERIF),
            ansi("Arial"),
            ansi("Arial").with_subfamily("Bold Italic"),
            EnumeratedFace::new("Symbol").with_codepages(&[Codepage::SYMBOL]),
        ]);
        let get = |family, style, strict| {
            m.match_default_font(family, style, Charset::Ansi, None, strict)
                .map(|i| m.record(i).unwrap().name.clone())
        };
        assert_eq!(get(None, StyleFlags::SERIF, false).as_deref(), Some("Times New Roman"));
        assert_eq!(
            get(None, StyleFlags::FIXED_PITCH, false).as_deref(),
            Some("Courier New")
        );
        assert_eq!(get(None, StyleFlags::empty(), true).as_deref(), Some("Arial"));
        assert_eq!(get(Some("Symbol"), StyleFlags::empty(), false).as_deref(), Some("Symbol"));
        assert_eq!(get(Some("Arial"), StyleFlags::SERIF, false).as_deref(), Some("Arial"));
        assert_eq!(get(Some("Frutiger"), StyleFlags::empty(), false), None);
    }

    #[test]
    fn strict_default_font() {
        let m = catalog(vec![ansi("Arial")]);
        let get = |family, style| {
            m.match_default_font(family, style, Charset::Ansi, None, true)
        };
        assert_eq!(get(None, StyleFlags::SERIF), None);
        assert_eq!(get(Some("Arial"), StyleFlags::SERIF), None);
        assert_eq!(get(None, StyleFlags::ITALIC), Some(0));

        let m = catalog(vec![
            ansi("Courier New").with_style(StyleFlags::FIXED_PITCH),
            ansi("Times New Roman").with_style(StyleFlags::SERIF),
        ]);
        assert_eq!(
            m.match_default_font(None, StyleFlags::SERIF, Charset::Ansi, None, true),
            Some(1)
        );
    }

    #[test]
    fn default_font_requires_codepage() {
        let m = catalog(vec![ansi("Arial")]);
        assert_eq!(
            m.match_default_font(None, StyleFlags::empty(), Charset::ShiftJis, None, false),
            None
        );
    }
}
