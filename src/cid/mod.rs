// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! CID-keyed font support
//!
//! A CID font maps each character code to a Character ID through a
//! [`CMap`], then each CID to a glyph index through an optional
//! [`CidToGid`] table. Widths and vertical metrics are keyed by CID.

mod cmap;
pub(crate) mod lexer;

pub use cmap::{CMap, CMapError, CidCoding, CidRange, CodespaceRange};

use crate::conv::be_u16;
use crate::fonts::Charset;
use smallvec::SmallVec;
use std::rc::Rc;

/// Default glyph width (`DW`)
pub const DEFAULT_WIDTH: i32 = 1000;
/// Default vertical origin Y (`DW2[0]`)
pub const DEFAULT_VERTICAL_Y: i32 = 880;
/// Default vertical advance (`DW2[1]`)
pub const DEFAULT_VERTICAL_ADVANCE: i32 = -1000;

/// CID-to-glyph-index mapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CidToGid {
    /// Glyph index equals CID
    Identity,
    /// Big-endian `u16` glyph indices, indexed by CID
    Stream(Rc<[u8]>),
}

impl CidToGid {
    /// Map a CID to a glyph index
    ///
    /// CIDs beyond the end of a stream map to themselves.
    pub fn map(&self, cid: u16) -> u16 {
        match self {
            CidToGid::Identity => cid,
            CidToGid::Stream(data) => be_u16(data, 2 * usize::from(cid)).unwrap_or(cid),
        }
    }
}

/// Character collection of a CID font (`CIDSystemInfo` ordering)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CidCollection {
    /// Adobe-GB1 (simplified Chinese)
    Gb1,
    /// Adobe-CNS1 (traditional Chinese)
    Cns1,
    /// Adobe-Japan1
    Japan1,
    /// Adobe-Korea1
    Korea1,
    /// Adobe-Identity, `UCS` or anything else
    #[default]
    Unknown,
}

impl CidCollection {
    /// Identify from an ordering string
    pub fn from_ordering(ordering: &str) -> Self {
        match ordering {
            "GB1" => CidCollection::Gb1,
            "CNS1" => CidCollection::Cns1,
            "Japan1" => CidCollection::Japan1,
            "Korea1" => CidCollection::Korea1,
            _ => CidCollection::Unknown,
        }
    }

    /// The charset used to find a substitute font
    pub fn charset(self) -> Option<Charset> {
        Some(match self {
            CidCollection::Gb1 => Charset::ChineseSimplified,
            CidCollection::Cns1 => Charset::ChineseTraditional,
            CidCollection::Japan1 => Charset::ShiftJis,
            CidCollection::Korea1 => Charset::Hangul,
            CidCollection::Unknown => return None,
        })
    }
}

/// An item of a `W` or `W2` array
#[derive(Clone, Debug, PartialEq)]
pub enum WidthItem {
    Num(i32),
    Array(Vec<i32>),
}

impl From<i32> for WidthItem {
    fn from(n: i32) -> Self {
        WidthItem::Num(n)
    }
}

impl From<Vec<i32>> for WidthItem {
    fn from(v: Vec<i32>) -> Self {
        WidthItem::Array(v)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct WidthRun {
    low: u16,
    high: u16,
    width: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct VerticalRun {
    low: u16,
    high: u16,
    advance: i32,
    vx: i32,
    vy: i32,
}

/// Data specific to CID-keyed fonts
#[derive(Clone, Debug)]
pub struct CidExtension {
    cmap: CMap,
    cid_to_gid: Option<CidToGid>,
    cid_is_gid: bool,
    collection: CidCollection,
    default_width: i32,
    widths: Vec<WidthRun>,
    default_vertical_y: i32,
    default_vertical_advance: i32,
    vertical: Vec<VerticalRun>,
}

impl CidExtension {
    /// Construct with default metrics
    pub fn new(cmap: CMap) -> Self {
        let collection = cmap
            .ordering()
            .map(CidCollection::from_ordering)
            .unwrap_or_default();
        CidExtension {
            cmap,
            cid_to_gid: None,
            cid_is_gid: false,
            collection,
            default_width: DEFAULT_WIDTH,
            widths: vec![],
            default_vertical_y: DEFAULT_VERTICAL_Y,
            default_vertical_advance: DEFAULT_VERTICAL_ADVANCE,
            vertical: vec![],
        }
    }

    /// Set the CID-to-GID mapping
    pub fn with_cid_to_gid(mut self, map: Option<CidToGid>) -> Self {
        self.cid_to_gid = map;
        self
    }

    /// Declare that CIDs are glyph indices of the program
    ///
    /// This bypasses any CID-to-GID mapping.
    pub fn with_cid_is_gid(mut self, cid_is_gid: bool) -> Self {
        self.cid_is_gid = cid_is_gid;
        self
    }

    /// Set the character collection
    ///
    /// This overrides any ordering declared inside the CMap.
    pub fn with_collection(mut self, collection: CidCollection) -> Self {
        if collection != CidCollection::Unknown {
            self.collection = collection;
        }
        self
    }

    /// Set `DW` and the `W` array
    pub fn with_widths(mut self, default_width: Option<i32>, items: &[WidthItem]) -> Self {
        self.default_width = default_width.unwrap_or(DEFAULT_WIDTH);
        self.widths = parse_widths(items);
        self
    }

    /// Set `DW2` and the `W2` array
    pub fn with_vertical_metrics(
        mut self,
        defaults: Option<[i32; 2]>,
        items: &[WidthItem],
    ) -> Self {
        let [vy, advance] = defaults.unwrap_or([DEFAULT_VERTICAL_Y, DEFAULT_VERTICAL_ADVANCE]);
        self.default_vertical_y = vy;
        self.default_vertical_advance = advance;
        self.vertical = parse_vertical(items);
        self
    }

    /// Access the CMap
    #[inline]
    pub fn cmap(&self) -> &CMap {
        &self.cmap
    }

    /// Access the CID-to-GID mapping
    #[inline]
    pub fn cid_to_gid(&self) -> Option<&CidToGid> {
        self.cid_to_gid.as_ref()
    }

    /// True if CIDs are glyph indices
    #[inline]
    pub fn cid_is_gid(&self) -> bool {
        self.cid_is_gid
    }

    /// The character collection
    #[inline]
    pub fn collection(&self) -> CidCollection {
        self.collection
    }

    /// True if writing mode is vertical
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.cmap.is_vertical()
    }

    /// True if codes are UCS-2 values
    ///
    /// This holds for the `Uni*-UCS2` maps, and for the identity maps over
    /// a collection with ordering `UCS`.
    pub fn is_ucs2(&self) -> bool {
        match self.cmap.coding() {
            CidCoding::Ucs2 => true,
            CidCoding::Identity => self.cmap.ordering() == Some("UCS"),
            CidCoding::Unknown => false,
        }
    }

    /// Map a code to a CID
    #[inline]
    pub fn cid_from_code(&self, code: u32) -> u16 {
        self.cmap.cid_from_code(code)
    }

    /// Map a CID to a glyph index of the embedded program
    ///
    /// Without a CID-to-GID mapping, this is the identity.
    pub fn gid_from_cid(&self, cid: u16) -> u16 {
        match self.cid_to_gid.as_ref() {
            Some(map) if !self.cid_is_gid => map.map(cid),
            _ => cid,
        }
    }

    /// Horizontal advance of a CID, in glyph-space units (1/1000 em)
    pub fn width(&self, cid: u16) -> i32 {
        self.widths
            .iter()
            .find(|run| run.low <= cid && cid <= run.high)
            .map(|run| run.width)
            .unwrap_or(self.default_width)
    }

    /// Vertical origin of a CID, relative to the horizontal origin
    pub fn vertical_origin(&self, cid: u16) -> (i32, i32) {
        match self.find_vertical(cid) {
            Some(run) => (run.vx, run.vy),
            None => (self.width(cid) / 2, self.default_vertical_y),
        }
    }

    /// Vertical advance of a CID (negative: downwards)
    pub fn vertical_advance(&self, cid: u16) -> i32 {
        self.find_vertical(cid)
            .map(|run| run.advance)
            .unwrap_or(self.default_vertical_advance)
    }

    fn find_vertical(&self, cid: u16) -> Option<&VerticalRun> {
        self.vertical
            .iter()
            .find(|run| run.low <= cid && cid <= run.high)
    }
}

fn to_cid(n: i32) -> Option<u16> {
    u16::try_from(n).ok()
}

/// Parts of `low..=high` not covered by `taken`
///
/// `taken` must be sorted by start and non-overlapping; `span` gives the
/// inclusive bounds of an item.
pub(crate) fn uncovered<T>(
    taken: &[T],
    span: impl Fn(&T) -> (u32, u32),
    low: u32,
    high: u32,
) -> SmallVec<[(u32, u32); 2]> {
    let mut parts = SmallVec::new();
    let mut start = low;
    let first = taken.partition_point(|item| span(item).1 < low);
    for item in &taken[first..] {
        let (lo, hi) = span(item);
        if lo > high {
            break;
        }
        if start < lo {
            parts.push((start, lo - 1));
        }
        if hi >= high {
            return parts;
        }
        start = hi + 1;
    }
    parts.push((start, high));
    parts
}

// Forms: `c [w1 w2 ...]` and `c1 c2 w`
fn parse_widths(items: &[WidthItem]) -> Vec<WidthRun> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < items.len() {
        match (&items[i], items.get(i + 1), items.get(i + 2)) {
            (WidthItem::Num(c), Some(WidthItem::Array(ws)), _) => {
                if let Some(first) = to_cid(*c) {
                    for (j, w) in ws.iter().enumerate() {
                        let Some(cid) = u16::try_from(j).ok().and_then(|j| first.checked_add(j))
                        else {
                            break;
                        };
                        runs.push(WidthRun {
                            low: cid,
                            high: cid,
                            width: *w,
                        });
                    }
                }
                i += 2;
            }
            (WidthItem::Num(c1), Some(WidthItem::Num(c2)), Some(WidthItem::Num(w))) => {
                if let (Some(low), Some(high)) = (to_cid(*c1), to_cid(*c2)) {
                    runs.push(WidthRun {
                        low,
                        high,
                        width: *w,
                    });
                }
                i += 3;
            }
            _ => {
                log::warn!("CidExtension: malformed W array at item {i}");
                break;
            }
        }
    }
    runs
}

// Forms: `c [w1y vx vy ...]` and `c1 c2 w1y vx vy`
fn parse_vertical(items: &[WidthItem]) -> Vec<VerticalRun> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < items.len() {
        match (&items[i], items.get(i + 1)) {
            (WidthItem::Num(c), Some(WidthItem::Array(vs))) => {
                if let Some(first) = to_cid(*c) {
                    for (j, v) in vs.chunks_exact(3).enumerate() {
                        let Some(cid) = u16::try_from(j).ok().and_then(|j| first.checked_add(j))
                        else {
                            break;
                        };
                        runs.push(VerticalRun {
                            low: cid,
                            high: cid,
                            advance: v[0],
                            vx: v[1],
                            vy: v[2],
                        });
                    }
                }
                i += 2;
            }
            (WidthItem::Num(c1), Some(WidthItem::Num(c2))) => {
                let nums: Option<Vec<i32>> = items.get(i + 2..i + 5).and_then(|s| {
                    s.iter()
                        .map(|item| match item {
                            WidthItem::Num(n) => Some(*n),
                            WidthItem::Array(_) => None,
                        })
                        .collect()
                });
                let Some(nums) = nums else {
                    log::warn!("CidExtension: malformed W2 array at item {i}");
                    break;
                };
                if let (Some(low), Some(high)) = (to_cid(*c1), to_cid(*c2)) {
                    runs.push(VerticalRun {
                        low,
                        high,
                        advance: nums[0],
                        vx: nums[1],
                        vy: nums[2],
                    });
                }
                i += 5;
            }
            _ => {
                log::warn!("CidExtension: malformed W2 array at item {i}");
                break;
            }
        }
    }
    runs
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cid_to_gid() {
        let stream = CidToGid::Stream(Rc::from(&[0u8, 5, 0, 7, 1][..]));
        assert_eq!(stream.map(0), 5);
        assert_eq!(stream.map(1), 7);
        // Entry 2 is truncated: identity
        assert_eq!(stream.map(2), 2);
        assert_eq!(stream.map(400), 400);
        assert_eq!(CidToGid::Identity.map(42), 42);

        let ext = CidExtension::new(CMap::identity());
        assert_eq!(ext.gid_from_cid(17), 17);
        let ext = ext.with_cid_to_gid(Some(stream));
        assert_eq!(ext.gid_from_cid(1), 7);
        let ext = ext.with_cid_is_gid(true);
        assert_eq!(ext.gid_from_cid(1), 1);
    }

    #[test]
    fn widths() {
        let items = vec![
            WidthItem::Num(1),
            WidthItem::Array(vec![500, 600]),
            WidthItem::Num(10),
            WidthItem::Num(20),
            WidthItem::Num(250),
        ];
        let ext = CidExtension::new(CMap::identity()).with_widths(None, &items);
        assert_eq!(ext.width(0), 1000);
        assert_eq!(ext.width(1), 500);
        assert_eq!(ext.width(2), 600);
        assert_eq!(ext.width(3), 1000);
        assert_eq!(ext.width(15), 250);

        let ext = ext.with_widths(Some(800), &items[..3]);
        assert_eq!(ext.width(15), 800);
    }

    #[test]
    fn vertical_metrics() {
        let items = vec![
            WidthItem::Num(5),
            WidthItem::Array(vec![-900, 400, 800]),
            WidthItem::Num(100),
            WidthItem::Num(102),
            WidthItem::Num(-500),
            WidthItem::Num(250),
            WidthItem::Num(770),
        ];
        let cmap = CMap::predefined("Identity-V").unwrap();
        let ext = CidExtension::new(cmap)
            .with_widths(Some(600), &[])
            .with_vertical_metrics(None, &items);
        assert!(ext.is_vertical());
        assert_eq!(ext.vertical_origin(1), (300, 880));
        assert_eq!(ext.vertical_advance(1), -1000);
        assert_eq!(ext.vertical_origin(5), (400, 800));
        assert_eq!(ext.vertical_advance(5), -900);
        assert_eq!(ext.vertical_origin(101), (250, 770));
        assert_eq!(ext.vertical_advance(102), -500);

        let ext = ext.with_vertical_metrics(Some([900, -1100]), &[]);
        assert_eq!(ext.vertical_origin(5), (300, 900));
        assert_eq!(ext.vertical_advance(5), -1100);
    }

    #[test]
    fn uncovered_parts() {
        let taken = [(0x10u32, 0x17u32), (0x20, 0x2F)];
        let span = |t: &(u32, u32)| *t;
        assert_eq!(uncovered(&taken, span, 0x00, 0x0F).as_slice(), &[(0x00, 0x0F)]);
        assert_eq!(
            uncovered(&taken, span, 0x08, 0x38).as_slice(),
            &[(0x08, 0x0F), (0x18, 0x1F), (0x30, 0x38)]
        );
        assert!(uncovered(&taken, span, 0x12, 0x16).is_empty());
        assert_eq!(uncovered(&taken, span, 0x14, 0x1A).as_slice(), &[(0x18, 0x1A)]);
    }

    #[test]
    fn overflowing_width_run() {
        let items = vec![WidthItem::Num(65535), WidthItem::Array(vec![500, 600])];
        let ext = CidExtension::new(CMap::identity()).with_widths(None, &items);
        assert_eq!(ext.width(65535), 500);
        assert_eq!(ext.width(0), 1000);
    }

    #[test]
    fn collection() {
        assert_eq!(CidCollection::from_ordering("Japan1"), CidCollection::Japan1);
        assert_eq!(CidCollection::Korea1.charset(), Some(Charset::Hangul));
        assert_eq!(CidCollection::from_ordering("Identity").charset(), None);

        let ext = CidExtension::new(CMap::identity()).with_collection(CidCollection::Gb1);
        assert_eq!(ext.collection(), CidCollection::Gb1);
        assert!(!ext.is_ucs2());
        let ucs2 = CidExtension::new(CMap::predefined("UniGB-UCS2-H").unwrap());
        assert!(ucs2.is_ucs2());
    }
}
