// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Properties for specifying font style, charset and codepage.

use bitflags::bitflags;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Font style flags
    ///
    /// Bit values follow the font descriptor `Flags` entry of a PDF, with
    /// the addition of [`StyleFlags::BOLD`] (the "force bold" bit). These
    /// flags are used both to describe document fonts and to request
    /// installed fonts from the matcher.
    ///
    /// The low nibble (fixed pitch, serif, symbolic, script) is the
    /// "paragraph style" used by strict matching.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StyleFlags: u32 {
        /// All glyphs have the same width
        const FIXED_PITCH = 0x01;
        /// Glyphs have serifs
        const SERIF = 0x02;
        /// Font contains glyphs outside the standard Latin character set
        const SYMBOLIC = 0x04;
        /// Glyphs resemble cursive handwriting
        const SCRIPT = 0x08;
        /// Font uses the standard Latin character set
        const NONSYMBOLIC = 0x20;
        /// Glyphs have dominant vertical strokes that are slanted
        const ITALIC = 0x40;
        /// Font contains no lowercase letters
        const ALL_CAP = 0x1_0000;
        /// Lowercase letters are small capitals
        const SMALL_CAP = 0x2_0000;
        /// Bold glyphs shall be painted with extra pixels
        const BOLD = 0x4_0000;
    }
}

impl StyleFlags {
    /// Mask of flags compared by strict matching
    pub const PARAGRAPH_MASK: u32 = 0x0F;

    /// Get the paragraph-style nibble
    #[inline]
    pub fn paragraph(self) -> u32 {
        self.bits() & Self::PARAGRAPH_MASK
    }

    /// True if both bold and italic
    #[inline]
    pub fn is_bold_italic(self) -> bool {
        self.contains(StyleFlags::BOLD | StyleFlags::ITALIC)
    }

    /// Parse a style suffix as found in font names
    ///
    /// Suffixes are matched case-sensitively after removal of separators;
    /// unrecognised suffixes yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pdf_font_map::fonts::StyleFlags;
    /// assert_eq!(StyleFlags::parse_suffix("Bold"), Some(StyleFlags::BOLD));
    /// assert_eq!(
    ///     StyleFlags::parse_suffix("BoldItalic"),
    ///     Some(StyleFlags::BOLD | StyleFlags::ITALIC)
    /// );
    /// assert_eq!(StyleFlags::parse_suffix("Regular"), Some(StyleFlags::empty()));
    /// assert_eq!(StyleFlags::parse_suffix("Narrow"), None);
    /// ```
    pub fn parse_suffix(s: &str) -> Option<Self> {
        Some(match s {
            "Regular" | "Roman" | "Normal" | "Book" | "Medium" => StyleFlags::empty(),
            "Bold" | "Black" | "Heavy" | "Semibold" | "Demi" => StyleFlags::BOLD,
            "Italic" | "Oblique" => StyleFlags::ITALIC,
            "BoldItalic" | "BoldOblique" | "BlackItalic" => StyleFlags::BOLD | StyleFlags::ITALIC,
            _ => return None,
        })
    }
}

/// Legacy character set identifier
///
/// Values are the GDI `LOGFONT` charset bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Charset {
    #[default]
    Ansi,
    Default,
    Symbol,
    MacRoman,
    ShiftJis,
    Hangul,
    Johab,
    ChineseSimplified,
    ChineseTraditional,
    Greek,
    Turkish,
    Vietnamese,
    Hebrew,
    Arabic,
    Baltic,
    Cyrillic,
    Thai,
    EasternEuropean,
    Oem,
}

impl Charset {
    const TABLE: [(Charset, u8, u16); 19] = [
        (Charset::Ansi, 0, 1252),
        (Charset::Default, 1, 0),
        (Charset::Symbol, 2, 42),
        (Charset::MacRoman, 77, 10000),
        (Charset::ShiftJis, 128, 932),
        (Charset::Hangul, 129, 949),
        (Charset::Johab, 130, 1361),
        (Charset::ChineseSimplified, 134, 936),
        (Charset::ChineseTraditional, 136, 950),
        (Charset::Greek, 161, 1253),
        (Charset::Turkish, 162, 1254),
        (Charset::Vietnamese, 163, 1258),
        (Charset::Hebrew, 177, 1255),
        (Charset::Arabic, 178, 1256),
        (Charset::Baltic, 186, 1257),
        (Charset::Cyrillic, 204, 1251),
        (Charset::Thai, 222, 874),
        (Charset::EasternEuropean, 238, 1250),
        (Charset::Oem, 255, 437),
    ];

    /// Construct from the GDI charset byte
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, v, _)| *v == value)
            .map(|(cs, _, _)| *cs)
    }

    /// Get the GDI charset byte
    pub fn to_u8(self) -> u8 {
        Self::TABLE[self as usize].1
    }

    /// Get the codepage used by this charset
    ///
    /// [`Charset::Default`] maps to [`Codepage::DEF_ANSI`].
    pub fn codepage(self) -> Codepage {
        Codepage(Self::TABLE[self as usize].2)
    }

    /// Find the charset using a codepage
    pub fn from_codepage(cp: Codepage) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, _, c)| *c == cp.0)
            .map(|(cs, _, _)| *cs)
    }

    /// True for the multi-byte East Asian charsets
    pub fn is_cjk(self) -> bool {
        matches!(
            self,
            Charset::ShiftJis
                | Charset::Hangul
                | Charset::Johab
                | Charset::ChineseSimplified
                | Charset::ChineseTraditional
        )
    }

    /// Parses a charset name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pdf_font_map::fonts::Charset;
    /// assert_eq!(Charset::parse("GB2312"), Some(Charset::ChineseSimplified));
    /// assert_eq!(Charset::parse(" shiftjis "), Some(Charset::ShiftJis));
    /// assert_eq!(Charset::parse("Klingon"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Some(match s.as_str() {
            "ansi" => Charset::Ansi,
            "default" => Charset::Default,
            "symbol" => Charset::Symbol,
            "mac" | "macroman" => Charset::MacRoman,
            "shiftjis" | "sjis" => Charset::ShiftJis,
            "hangul" | "korean" => Charset::Hangul,
            "johab" => Charset::Johab,
            "gb2312" | "gb" => Charset::ChineseSimplified,
            "big5" | "chinesebig5" => Charset::ChineseTraditional,
            "greek" => Charset::Greek,
            "turkish" => Charset::Turkish,
            "vietnamese" => Charset::Vietnamese,
            "hebrew" => Charset::Hebrew,
            "arabic" => Charset::Arabic,
            "baltic" => Charset::Baltic,
            "cyrillic" | "russian" => Charset::Cyrillic,
            "thai" => Charset::Thai,
            "easteurope" | "easterneuropean" => Charset::EasternEuropean,
            "oem" => Charset::Oem,
            _ => return None,
        })
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Charset::Ansi => "ANSI",
            Charset::Default => "Default",
            Charset::Symbol => "Symbol",
            Charset::MacRoman => "MacRoman",
            Charset::ShiftJis => "ShiftJIS",
            Charset::Hangul => "Hangul",
            Charset::Johab => "Johab",
            Charset::ChineseSimplified => "GB2312",
            Charset::ChineseTraditional => "Big5",
            Charset::Greek => "Greek",
            Charset::Turkish => "Turkish",
            Charset::Vietnamese => "Vietnamese",
            Charset::Hebrew => "Hebrew",
            Charset::Arabic => "Arabic",
            Charset::Baltic => "Baltic",
            Charset::Cyrillic => "Cyrillic",
            Charset::Thai => "Thai",
            Charset::EasternEuropean => "EastEurope",
            Charset::Oem => "OEM",
        };
        write!(f, "{name}")
    }
}

/// Legacy codepage number
///
/// The default value is [`Codepage::DEF_ANSI`], meaning "unspecified".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Codepage(pub u16);

impl Codepage {
    /// The system default ANSI codepage (unspecified)
    pub const DEF_ANSI: Self = Self(0);
    /// Adobe symbol
    pub const SYMBOL: Self = Self(42);
    /// US OEM
    pub const MSDOS_US: Self = Self(437);
    /// Thai
    pub const MSDOS_THAI: Self = Self(874);
    /// Japanese
    pub const SHIFT_JIS: Self = Self(932);
    /// Simplified Chinese
    pub const CHINESE_SIMPLIFIED: Self = Self(936);
    /// Korean
    pub const HANGUL: Self = Self(949);
    /// Traditional Chinese
    pub const CHINESE_TRADITIONAL: Self = Self(950);
    /// Central European
    pub const MSWIN_EASTERN_EUROPEAN: Self = Self(1250);
    /// Cyrillic
    pub const MSWIN_CYRILLIC: Self = Self(1251);
    /// Latin 1
    pub const MSWIN_WESTERN_EUROPEAN: Self = Self(1252);
    /// Greek
    pub const MSWIN_GREEK: Self = Self(1253);
    /// Turkish
    pub const MSWIN_TURKISH: Self = Self(1254);
    /// Hebrew
    pub const MSWIN_HEBREW: Self = Self(1255);
    /// Arabic
    pub const MSWIN_ARABIC: Self = Self(1256);
    /// Baltic
    pub const MSWIN_BALTIC: Self = Self(1257);
    /// Vietnamese
    pub const MSWIN_VIETNAMESE: Self = Self(1258);
    /// Korean (Johab)
    pub const JOHAB: Self = Self(1361);
    /// Mac Roman
    pub const MAC_ROMAN: Self = Self(10000);

    /// True if this is [`Codepage::DEF_ANSI`]
    #[inline]
    pub fn is_unspecified(self) -> bool {
        self == Self::DEF_ANSI
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn charset_table_order() {
        for (i, (cs, _, _)) in Charset::TABLE.iter().enumerate() {
            assert_eq!(*cs as usize, i);
        }
    }

    #[test]
    fn charset_codepage() {
        assert_eq!(Charset::Ansi.codepage(), Codepage::MSWIN_WESTERN_EUROPEAN);
        assert_eq!(Charset::Default.codepage(), Codepage::DEF_ANSI);
        assert_eq!(
            Charset::from_codepage(Codepage::SHIFT_JIS),
            Some(Charset::ShiftJis)
        );
        assert_eq!(Charset::from_u8(134), Some(Charset::ChineseSimplified));
        assert_eq!(Charset::ChineseTraditional.to_u8(), 136);
        assert_eq!(Charset::from_u8(3), None);
    }

    #[test]
    fn paragraph_nibble() {
        let style = StyleFlags::SERIF | StyleFlags::ITALIC | StyleFlags::BOLD;
        assert_eq!(style.paragraph(), 0x02);
        assert!(style.is_bold_italic());
    }
}
