// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Unicode-range and codepage-range bit tables
//!
//! These tables correspond to the `ulUnicodeRange1..4` and
//! `ulCodePageRange1..2` fields of the OpenType `OS/2` table. Installed fonts
//! declare their coverage using these bits; the matcher compares requested
//! bits against the declared ones.

use super::{Charset, Codepage};

/// Bits assigned by a Unicode block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnicodeRangeBit {
    /// First code point of the block
    pub start: u32,
    /// Last code point of the block (inclusive)
    pub end: u32,
    /// Bit position within the 128-bit Unicode-range field
    pub bit: u16,
    /// Codepage usually associated with the block, if any
    pub codepage: Option<Codepage>,
}

const fn ub(start: u32, end: u32, bit: u16, cp: u16) -> UnicodeRangeBit {
    UnicodeRangeBit {
        start,
        end,
        bit,
        codepage: if cp == 0 { None } else { Some(Codepage(cp)) },
    }
}

// Sorted by start; blocks do not overlap.
const UNICODE_RANGES: &[UnicodeRangeBit] = &[
    ub(0x0000, 0x007F, 0, 1252),
    ub(0x0080, 0x00FF, 1, 1252),
    ub(0x0100, 0x017F, 2, 1250),
    ub(0x0180, 0x024F, 3, 1250),
    ub(0x0250, 0x02AF, 4, 0),
    ub(0x02B0, 0x02FF, 5, 0),
    ub(0x0300, 0x036F, 6, 0),
    ub(0x0370, 0x03FF, 7, 1253),
    ub(0x0400, 0x04FF, 9, 1251),
    ub(0x0500, 0x052F, 9, 0),
    ub(0x0530, 0x058F, 10, 0),
    ub(0x0590, 0x05FF, 11, 1255),
    ub(0x0600, 0x06FF, 13, 1256),
    ub(0x0700, 0x074F, 71, 0),
    ub(0x0750, 0x077F, 13, 0),
    ub(0x0780, 0x07BF, 72, 0),
    ub(0x07C0, 0x07FF, 14, 0),
    ub(0x0900, 0x097F, 15, 0),
    ub(0x0980, 0x09FF, 16, 0),
    ub(0x0A00, 0x0A7F, 17, 0),
    ub(0x0A80, 0x0AFF, 18, 0),
    ub(0x0B00, 0x0B7F, 19, 0),
    ub(0x0B80, 0x0BFF, 20, 0),
    ub(0x0C00, 0x0C7F, 21, 0),
    ub(0x0C80, 0x0CFF, 22, 0),
    ub(0x0D00, 0x0D7F, 23, 0),
    ub(0x0D80, 0x0DFF, 73, 0),
    ub(0x0E00, 0x0E7F, 24, 874),
    ub(0x0E80, 0x0EFF, 25, 0),
    ub(0x0F00, 0x0FFF, 70, 0),
    ub(0x1000, 0x109F, 74, 0),
    ub(0x10A0, 0x10FF, 26, 0),
    ub(0x1100, 0x11FF, 28, 949),
    ub(0x1200, 0x137F, 75, 0),
    ub(0x1380, 0x139F, 75, 0),
    ub(0x13A0, 0x13FF, 76, 0),
    ub(0x1400, 0x167F, 77, 0),
    ub(0x1680, 0x169F, 78, 0),
    ub(0x16A0, 0x16FF, 79, 0),
    ub(0x1700, 0x177F, 84, 0),
    ub(0x1780, 0x17FF, 80, 0),
    ub(0x1800, 0x18AF, 81, 0),
    ub(0x1900, 0x194F, 93, 0),
    ub(0x1950, 0x197F, 94, 0),
    ub(0x1980, 0x19DF, 95, 0),
    ub(0x19E0, 0x19FF, 80, 0),
    ub(0x1A00, 0x1A1F, 96, 0),
    ub(0x1B00, 0x1B7F, 27, 0),
    ub(0x1B80, 0x1BBF, 112, 0),
    ub(0x1C00, 0x1C4F, 113, 0),
    ub(0x1C50, 0x1C7F, 114, 0),
    ub(0x1D00, 0x1DBF, 4, 0),
    ub(0x1DC0, 0x1DFF, 6, 0),
    ub(0x1E00, 0x1EFF, 29, 1258),
    ub(0x1F00, 0x1FFF, 30, 1253),
    ub(0x2000, 0x206F, 31, 0),
    ub(0x2070, 0x209F, 32, 0),
    ub(0x20A0, 0x20CF, 33, 0),
    ub(0x20D0, 0x20FF, 34, 0),
    ub(0x2100, 0x214F, 35, 0),
    ub(0x2150, 0x218F, 36, 0),
    ub(0x2190, 0x21FF, 37, 0),
    ub(0x2200, 0x22FF, 38, 0),
    ub(0x2300, 0x23FF, 39, 0),
    ub(0x2400, 0x243F, 40, 0),
    ub(0x2440, 0x245F, 41, 0),
    ub(0x2460, 0x24FF, 42, 0),
    ub(0x2500, 0x257F, 43, 0),
    ub(0x2580, 0x259F, 44, 0),
    ub(0x25A0, 0x25FF, 45, 0),
    ub(0x2600, 0x26FF, 46, 0),
    ub(0x2700, 0x27BF, 47, 0),
    ub(0x27C0, 0x27EF, 38, 0),
    ub(0x27F0, 0x27FF, 37, 0),
    ub(0x2800, 0x28FF, 82, 0),
    ub(0x2900, 0x297F, 37, 0),
    ub(0x2980, 0x2AFF, 38, 0),
    ub(0x2B00, 0x2BFF, 37, 0),
    ub(0x2C00, 0x2C5F, 97, 0),
    ub(0x2C60, 0x2C7F, 29, 0),
    ub(0x2C80, 0x2CFF, 8, 0),
    ub(0x2D00, 0x2D2F, 26, 0),
    ub(0x2D30, 0x2D7F, 98, 0),
    ub(0x2D80, 0x2DDF, 75, 0),
    ub(0x2DE0, 0x2DFF, 9, 0),
    ub(0x2E00, 0x2E7F, 31, 0),
    ub(0x2E80, 0x2FFF, 59, 0),
    ub(0x3000, 0x303F, 48, 936),
    ub(0x3040, 0x309F, 49, 932),
    ub(0x30A0, 0x30FF, 50, 932),
    ub(0x3100, 0x312F, 51, 950),
    ub(0x3130, 0x318F, 52, 949),
    ub(0x3190, 0x319F, 59, 0),
    ub(0x31A0, 0x31BF, 51, 950),
    ub(0x31C0, 0x31EF, 61, 0),
    ub(0x31F0, 0x31FF, 50, 932),
    ub(0x3200, 0x32FF, 54, 936),
    ub(0x3300, 0x33FF, 55, 932),
    ub(0x3400, 0x4DBF, 59, 936),
    ub(0x4DC0, 0x4DFF, 99, 0),
    ub(0x4E00, 0x9FFF, 59, 936),
    ub(0xA000, 0xA4CF, 83, 0),
    ub(0xA500, 0xA63F, 12, 0),
    ub(0xA640, 0xA69F, 9, 0),
    ub(0xA700, 0xA71F, 5, 0),
    ub(0xA720, 0xA7FF, 29, 0),
    ub(0xA800, 0xA82F, 100, 0),
    ub(0xA840, 0xA87F, 53, 0),
    ub(0xA880, 0xA8DF, 115, 0),
    ub(0xA900, 0xA92F, 116, 0),
    ub(0xA930, 0xA95F, 117, 0),
    ub(0xAA00, 0xAA5F, 118, 0),
    ub(0xAC00, 0xD7AF, 56, 949),
    ub(0xD800, 0xDFFF, 57, 0),
    ub(0xE000, 0xF8FF, 60, 0),
    ub(0xF900, 0xFAFF, 61, 936),
    ub(0xFB00, 0xFB4F, 62, 0),
    ub(0xFB50, 0xFDFF, 63, 1256),
    ub(0xFE00, 0xFE0F, 91, 0),
    ub(0xFE10, 0xFE1F, 65, 0),
    ub(0xFE20, 0xFE2F, 64, 0),
    ub(0xFE30, 0xFE4F, 65, 0),
    ub(0xFE50, 0xFE6F, 66, 0),
    ub(0xFE70, 0xFEFF, 67, 1256),
    ub(0xFF00, 0xFFEF, 68, 932),
    ub(0xFFF0, 0xFFFF, 69, 0),
    ub(0x10000, 0x1007F, 101, 0),
    ub(0x10140, 0x1018F, 102, 0),
    ub(0x10190, 0x101CF, 119, 0),
    ub(0x101D0, 0x101FF, 120, 0),
    ub(0x10280, 0x102DF, 121, 0),
    ub(0x10300, 0x1032F, 85, 0),
    ub(0x10330, 0x1034F, 86, 0),
    ub(0x10380, 0x1039F, 103, 0),
    ub(0x103A0, 0x103DF, 104, 0),
    ub(0x10400, 0x1044F, 87, 0),
    ub(0x10450, 0x1047F, 105, 0),
    ub(0x10480, 0x104AF, 106, 0),
    ub(0x10800, 0x1083F, 107, 0),
    ub(0x10900, 0x1091F, 58, 0),
    ub(0x10920, 0x1093F, 121, 0),
    ub(0x10A00, 0x10A5F, 108, 0),
    ub(0x12000, 0x1247F, 110, 0),
    ub(0x1D000, 0x1D24F, 88, 0),
    ub(0x1D300, 0x1D35F, 109, 0),
    ub(0x1D360, 0x1D37F, 111, 0),
    ub(0x1D400, 0x1D7FF, 89, 0),
    ub(0x1F000, 0x1F09F, 122, 0),
    ub(0x20000, 0x2A6DF, 59, 936),
    ub(0x2F800, 0x2FA1F, 61, 0),
    ub(0xE0000, 0xE007F, 92, 0),
    ub(0xE0100, 0xE01EF, 91, 0),
    ub(0xF0000, 0x10FFFF, 90, 0),
];

/// Look up the Unicode block containing `ch`
///
/// Returns `None` for code points outside all known blocks and for the
/// non-character U+FFFE.
pub fn unicode_range(ch: char) -> Option<&'static UnicodeRangeBit> {
    let c = u32::from(ch);
    if c == 0xFFFE {
        return None;
    }
    let index = UNICODE_RANGES.partition_point(|r| r.end < c);
    UNICODE_RANGES.get(index).filter(|r| r.start <= c)
}

/// Get the Unicode-range bit of `ch`, if any
#[inline]
pub fn unicode_bit(ch: char) -> Option<u16> {
    unicode_range(ch).map(|r| r.bit)
}

// Index is the bit position within the 64-bit codepage-range field.
// DEF_ANSI marks reserved bits.
const CODEPAGE_BITS: [Codepage; 64] = {
    let mut table = [Codepage::DEF_ANSI; 64];
    table[0] = Codepage(1252);
    table[1] = Codepage(1250);
    table[2] = Codepage(1251);
    table[3] = Codepage(1253);
    table[4] = Codepage(1254);
    table[5] = Codepage(1255);
    table[6] = Codepage(1256);
    table[7] = Codepage(1257);
    table[8] = Codepage(1258);
    table[16] = Codepage(874);
    table[17] = Codepage(932);
    table[18] = Codepage(936);
    table[19] = Codepage(949);
    table[20] = Codepage(950);
    table[21] = Codepage(1361);
    table[29] = Codepage(10000);
    table[31] = Codepage(42);
    table[48] = Codepage(869);
    table[49] = Codepage(866);
    table[50] = Codepage(865);
    table[51] = Codepage(864);
    table[52] = Codepage(863);
    table[53] = Codepage(862);
    table[54] = Codepage(861);
    table[55] = Codepage(860);
    table[56] = Codepage(857);
    table[57] = Codepage(855);
    table[58] = Codepage(852);
    table[59] = Codepage(775);
    table[60] = Codepage(737);
    table[61] = Codepage(708);
    table[62] = Codepage(850);
    table[63] = Codepage(437);
    table
};

/// Get the codepage-range bit of `cp`
///
/// Returns `None` for [`Codepage::DEF_ANSI`] and for codepages without a
/// declared bit.
pub fn codepage_bit(cp: Codepage) -> Option<u16> {
    if cp.is_unspecified() {
        return None;
    }
    CODEPAGE_BITS
        .iter()
        .position(|c| *c == cp)
        .map(|bit| bit as u16)
}

/// Get the codepage assigned to a codepage-range bit
pub fn codepage_of_bit(bit: u16) -> Option<Codepage> {
    CODEPAGE_BITS
        .get(usize::from(bit))
        .copied()
        .filter(|cp| !cp.is_unspecified())
}

/// Test a bit within a multi-word bitfield
#[inline]
pub fn test_bit(words: &[u32], bit: u16) -> bool {
    let (word, shift) = (usize::from(bit / 32), bit % 32);
    words.get(word).is_some_and(|w| w & (1u32 << shift) != 0)
}

/// Determine the charset appropriate for a Unicode code point
///
/// Code points below `0x7F` always yield [`Charset::Ansi`]: CJK fonts are
/// never selected to show ASCII.
pub fn charset_from_unicode(ch: char) -> Charset {
    charset_for_text(ch, Charset::Default)
}

/// Determine the charset for `ch`, following `previous` where possible
///
/// Code points below `0x7F` always yield [`Charset::Ansi`]. Otherwise, if
/// `previous` is not [`Charset::Default`] it is kept; else the charset is
/// determined from the code point's block.
pub fn charset_for_text(ch: char, previous: Charset) -> Charset {
    let c = u32::from(ch);
    if c < 0x7F {
        return Charset::Ansi;
    }
    if previous != Charset::Default {
        return previous;
    }
    match c {
        0x4E00..=0x9FA5 | 0xE7C7..=0xE7F3 | 0x3000..=0x303F | 0x2000..=0x206F => {
            Charset::ChineseSimplified
        }
        0x3040..=0x30FF | 0x31F0..=0x31FF | 0xFF00..=0xFFEF => Charset::ShiftJis,
        0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F => Charset::Hangul,
        0x0E00..=0x0E7F => Charset::Thai,
        0x0370..=0x03FF | 0x1F00..=0x1FFF => Charset::Greek,
        0x0600..=0x06FF | 0xFB50..=0xFEFC => Charset::Arabic,
        0x0590..=0x05FF => Charset::Hebrew,
        0x0400..=0x04FF => Charset::Cyrillic,
        0x0100..=0x024F => Charset::EasternEuropean,
        0x1E00..=0x1EFF => Charset::Vietnamese,
        _ => Charset::Ansi,
    }
}
