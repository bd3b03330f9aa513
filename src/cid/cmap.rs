// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Code-to-CID maps

use super::lexer::{Lexer, Token};
use super::uncovered;
use smallvec::SmallVec;
use thiserror::Error;

/// CMap parsing error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CMapError {
    #[error("unexpected token in {0} section")]
    Syntax(&'static str),
    #[error("invalid codespace range")]
    Codespace,
    #[error("CMap declares no codespace ranges")]
    NoCodespace,
}

/// How codes of a CMap relate to Unicode
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CidCoding {
    /// No direct relation
    #[default]
    Unknown,
    /// Codes are CIDs (`Identity-H`, `Identity-V`)
    Identity,
    /// Codes are UCS-2 values (`Uni*-UCS2-H`, `Uni*-UCS2-V`)
    Ucs2,
}

/// A range of valid codes
///
/// Each byte of a code must lie within the corresponding bytes of `low`
/// and `high`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CodespaceRange {
    pub len: u8,
    pub low: [u8; 4],
    pub high: [u8; 4],
}

impl CodespaceRange {
    fn new(low: &[u8], high: &[u8]) -> Option<Self> {
        if low.is_empty() || low.len() > 4 || low.len() != high.len() {
            return None;
        }
        let mut range = CodespaceRange {
            len: low.len() as u8,
            low: [0; 4],
            high: [0; 4],
        };
        range.low[..low.len()].copy_from_slice(low);
        range.high[..high.len()].copy_from_slice(high);
        Some(range)
    }

    /// True if `bytes` is a code within this range
    pub fn contains(&self, bytes: &[u8]) -> bool {
        bytes.len() == usize::from(self.len)
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| self.low[i] <= *b && *b <= self.high[i])
    }
}

/// A contiguous run of codes mapped to consecutive CIDs
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CidRange {
    pub low: u32,
    pub high: u32,
    pub cid: u16,
}

impl CidRange {
    #[inline]
    fn map(&self, code: u32) -> u16 {
        self.cid.wrapping_add((code - self.low) as u16)
    }

    fn part(&self, low: u32, high: u32) -> Self {
        CidRange {
            low,
            high,
            cid: self.map(low),
        }
    }
}

/// A code-to-CID map
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CMap {
    name: String,
    coding: CidCoding,
    vertical: bool,
    ordering: Option<String>,
    codespace: SmallVec<[CodespaceRange; 2]>,
    ranges: Vec<CidRange>,
    notdef: Vec<CidRange>,
}

impl CMap {
    /// The predefined `Identity-H` map
    pub fn identity() -> Self {
        Self::identity_named("Identity-H", false)
    }

    fn identity_named(name: &str, vertical: bool) -> Self {
        let mut codespace = SmallVec::new();
        codespace.extend(CodespaceRange::new(&[0, 0], &[0xFF, 0xFF]));
        CMap {
            name: name.to_string(),
            coding: CidCoding::Identity,
            vertical,
            codespace,
            ..Default::default()
        }
    }

    /// Construct a predefined CMap by name
    ///
    /// Only the identity maps and the UCS-2 maps are recognised; the latter
    /// carry the two-byte codespace but no CID table.
    pub fn predefined(name: &str) -> Option<Self> {
        let vertical = name.ends_with("-V");
        match name {
            "Identity-H" | "Identity-V" => Some(Self::identity_named(name, vertical)),
            _ if name.starts_with("Uni") && name.contains("-UCS2-") => {
                let mut cmap = Self::identity_named(name, vertical);
                cmap.coding = CidCoding::Ucs2;
                Some(cmap)
            }
            _ => None,
        }
    }

    /// Parse an embedded CMap stream
    pub fn parse(data: &[u8]) -> Result<Self, CMapError> {
        let mut cmap = CMap::default();
        let mut ranges = Vec::new();
        let mut notdef = Vec::new();
        let mut tokens = Lexer::new(data).peekable();

        while let Some(token) = tokens.next() {
            match token {
                Token::Name("CMapName") => {
                    if let Some(Token::Name(name)) = tokens.peek() {
                        cmap.name = name.to_string();
                        tokens.next();
                    }
                }
                Token::Name("WMode") => {
                    if let Some(mode) = tokens.peek().and_then(Token::as_integer) {
                        cmap.vertical = mode == 1;
                        tokens.next();
                    }
                }
                Token::Name("Ordering") => {
                    if let Some(Token::LiteralString(s)) = tokens.peek() {
                        cmap.ordering = Some(String::from_utf8_lossy(s).into_owned());
                        tokens.next();
                    }
                }
                Token::Keyword("usecmap") => {
                    log::debug!("CMap::parse: ignoring usecmap");
                }
                Token::Keyword("begincodespacerange") => {
                    let items = section(&mut tokens, "endcodespacerange");
                    for pair in items.chunks(2) {
                        let [Token::HexString(low), Token::HexString(high)] = pair else {
                            return Err(CMapError::Syntax("codespacerange"));
                        };
                        let range =
                            CodespaceRange::new(low, high).ok_or(CMapError::Codespace)?;
                        cmap.codespace.push(range);
                    }
                }
                Token::Keyword(kw @ ("begincidrange" | "beginnotdefrange")) => {
                    let (end, label) = if kw == "begincidrange" {
                        ("endcidrange", "cidrange")
                    } else {
                        ("endnotdefrange", "notdefrange")
                    };
                    let target = if kw == "begincidrange" {
                        &mut ranges
                    } else {
                        &mut notdef
                    };
                    for triple in section(&mut tokens, end).chunks(3) {
                        let [low, high, cid] = triple else {
                            return Err(CMapError::Syntax(label));
                        };
                        let (Some((low, _)), Some((high, _)), Some(cid)) =
                            (low.as_code(), high.as_code(), cid.as_integer())
                        else {
                            return Err(CMapError::Syntax(label));
                        };
                        let Ok(cid) = u16::try_from(cid) else {
                            log::debug!("CMap::parse: CID {cid} out of range");
                            continue;
                        };
                        if low <= high {
                            target.push(CidRange { low, high, cid });
                        }
                    }
                }
                Token::Keyword(kw @ ("begincidchar" | "beginnotdefchar")) => {
                    let (end, label) = if kw == "begincidchar" {
                        ("endcidchar", "cidchar")
                    } else {
                        ("endnotdefchar", "notdefchar")
                    };
                    let target = if kw == "begincidchar" {
                        &mut ranges
                    } else {
                        &mut notdef
                    };
                    for pair in section(&mut tokens, end).chunks(2) {
                        let [code, cid] = pair else {
                            return Err(CMapError::Syntax(label));
                        };
                        let (Some((code, _)), Some(cid)) = (code.as_code(), cid.as_integer())
                        else {
                            return Err(CMapError::Syntax(label));
                        };
                        let Ok(cid) = u16::try_from(cid) else {
                            log::debug!("CMap::parse: CID {cid} out of range");
                            continue;
                        };
                        target.push(CidRange {
                            low: code,
                            high: code,
                            cid,
                        });
                    }
                }
                _ => (),
            }
        }

        if cmap.codespace.is_empty() {
            return Err(CMapError::NoCodespace);
        }
        if cmap.name.ends_with("-V") {
            cmap.vertical = true;
        }
        cmap.ranges = normalize(ranges);
        cmap.notdef = normalize(notdef);
        Ok(cmap)
    }

    /// Parse an embedded CMap, falling back to `Identity-H`
    pub fn parse_or_identity(data: &[u8]) -> Self {
        CMap::parse(data).unwrap_or_else(|err| {
            log::warn!("CMap::parse_or_identity: {err}; using Identity-H");
            CMap::identity()
        })
    }

    /// The declared `CMapName`
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relation of codes to Unicode
    #[inline]
    pub fn coding(&self) -> CidCoding {
        self.coding
    }

    /// True for the `Identity-H` and `Identity-V` maps
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.coding == CidCoding::Identity
    }

    /// True if writing mode is vertical
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// The `CIDSystemInfo` ordering declared within the CMap, if any
    pub fn ordering(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    /// Read the next code from `bytes` at `offset`, advancing `offset`
    ///
    /// Bytes are accumulated while no codespace range of the current length
    /// contains the prefix. A sequence matching no range consumes the
    /// length of the shortest range. Returns `None` at the end of input.
    pub fn next_code(&self, bytes: &[u8], offset: &mut usize) -> Option<u32> {
        let start = *offset;
        let rest = bytes.get(start..).filter(|rest| !rest.is_empty())?;

        for len in 1..=rest.len().min(4) {
            let prefix = &rest[..len];
            if self.codespace.iter().any(|r| r.contains(prefix)) {
                *offset = start + len;
                return Some(be_code(prefix));
            }
        }

        let min_len = self
            .codespace
            .iter()
            .map(|r| usize::from(r.len))
            .min()
            .unwrap_or(1)
            .min(rest.len());
        *offset = start + min_len;
        Some(be_code(&rest[..min_len]))
    }

    /// Count the codes in `bytes`
    pub fn count_codes(&self, bytes: &[u8]) -> usize {
        let mut offset = 0;
        let mut n = 0;
        while self.next_code(bytes, &mut offset).is_some() {
            n += 1;
        }
        n
    }

    /// Map a code to a CID
    ///
    /// Codes absent from the map resolve through the notdef ranges, then
    /// to CID 0. The identity and UCS-2 maps carry no table: their codes
    /// are taken as CIDs.
    pub fn cid_from_code(&self, code: u32) -> u16 {
        if let Some(range) = find(&self.ranges, code) {
            return range.map(code);
        }
        if self.coding != CidCoding::Unknown {
            return u16::try_from(code).unwrap_or(0);
        }
        find(&self.notdef, code).map(|r| r.cid).unwrap_or(0)
    }
}

fn section<'a>(tokens: &mut impl Iterator<Item = Token<'a>>, end: &str) -> Vec<Token<'a>> {
    let mut items = Vec::new();
    for token in tokens.by_ref() {
        if token == Token::Keyword(end) {
            break;
        }
        items.push(token);
    }
    items
}

fn be_code(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, b| acc << 8 | u32::from(*b))
}

// Sort by start code; where ranges overlap, the first declared wins.
fn normalize(ranges: Vec<CidRange>) -> Vec<CidRange> {
    let mut out: Vec<CidRange> = Vec::with_capacity(ranges.len());
    for r in ranges {
        for (low, high) in uncovered(&out, |o| (o.low, o.high), r.low, r.high) {
            let at = out.partition_point(|o| o.low < low);
            out.insert(at, r.part(low, high));
        }
    }
    out
}

fn find(ranges: &[CidRange], code: u32) -> Option<&CidRange> {
    let i = ranges.partition_point(|r| r.high < code);
    ranges.get(i).filter(|r| r.low <= code)
}
