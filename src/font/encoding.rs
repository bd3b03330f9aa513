// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple font encodings and glyph names

use std::borrow::Cow;
use std::collections::HashMap;

/// Base encoding of a simple font
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BaseEncoding {
    /// The encoding built into the font program
    #[default]
    Builtin,
    Standard,
    WinAnsi,
    MacRoman,
    /// The built-in encoding of the Symbol font
    Symbol,
    /// The built-in encoding of the ZapfDingbats font
    ZapfDingbats,
}

impl BaseEncoding {
    /// Parse a predefined encoding name
    ///
    /// `MacExpertEncoding` is read as WinAnsi.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "StandardEncoding" => BaseEncoding::Standard,
            "WinAnsiEncoding" | "MacExpertEncoding" => BaseEncoding::WinAnsi,
            "MacRomanEncoding" => BaseEncoding::MacRoman,
            _ => return None,
        })
    }

    fn table(self) -> Option<&'static [u16; 256]> {
        match self {
            BaseEncoding::Standard => Some(&STANDARD),
            BaseEncoding::WinAnsi => Some(&WIN_ANSI),
            BaseEncoding::MacRoman => Some(&MAC_ROMAN),
            _ => None,
        }
    }

    /// True if codes of this encoding have known Unicode values
    #[inline]
    pub fn has_unicode(self) -> bool {
        self.table().is_some()
    }

    /// Get the Unicode value of a code
    pub fn unicode(self, code: u8) -> Option<char> {
        let value = self.table()?[usize::from(code)];
        if value == 0 {
            None
        } else {
            char::from_u32(u32::from(value))
        }
    }

    /// Find the lowest code with Unicode value `ch`
    pub fn char_code(self, ch: char) -> Option<u8> {
        let value = u16::try_from(u32::from(ch)).ok().filter(|v| *v != 0)?;
        let table = self.table()?;
        table
            .iter()
            .position(|v| *v == value)
            .and_then(|code| u8::try_from(code).ok())
    }

    /// Get the glyph name of a code
    pub fn glyph_name(self, code: u8) -> Option<Cow<'static, str>> {
        self.unicode(code).map(name_for_unicode)
    }
}

/// An entry of a `Differences` array
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Difference {
    /// The code of the next name
    Code(u32),
    /// A glyph name
    Name(String),
}

/// The encoding of a simple font: a base encoding plus differences
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontEncoding {
    base: BaseEncoding,
    differences: HashMap<u8, String>,
}

impl FontEncoding {
    /// Construct from a base encoding
    pub fn new(base: BaseEncoding) -> Self {
        FontEncoding {
            base,
            differences: HashMap::new(),
        }
    }

    /// Apply a `Differences` array
    ///
    /// Each name is assigned to the code following the previous entry.
    /// Names before the first code, and codes above 255, are ignored.
    pub fn with_differences(mut self, items: &[Difference]) -> Self {
        let mut code: Option<u32> = None;
        for item in items {
            match item {
                Difference::Code(c) => code = Some(*c),
                Difference::Name(name) => {
                    if let Some(c) = code {
                        if let Ok(byte) = u8::try_from(c) {
                            self.differences.insert(byte, name.clone());
                        }
                        code = Some(c + 1);
                    }
                }
            }
        }
        self
    }

    /// Get the base encoding
    #[inline]
    pub fn base(&self) -> BaseEncoding {
        self.base
    }

    /// True if a `Differences` array was applied
    #[inline]
    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }

    /// Get the glyph name of a code
    pub fn glyph_name(&self, code: u8) -> Option<Cow<'_, str>> {
        match self.differences.get(&code) {
            Some(name) => Some(Cow::Borrowed(name.as_str())),
            None => self.base.glyph_name(code),
        }
    }

    /// Get the Unicode value of a code
    pub fn unicode(&self, code: u8) -> Option<char> {
        match self.differences.get(&code) {
            Some(name) => unicode_from_name(name),
            None => self.base.unicode(code),
        }
    }

    /// Find a code with Unicode value `ch`
    ///
    /// Codes assigned by differences are preferred, lowest first.
    pub fn char_code(&self, ch: char) -> Option<u8> {
        let by_difference = self
            .differences
            .iter()
            .filter(|(_, name)| unicode_from_name(name) == Some(ch))
            .map(|(code, _)| *code)
            .min();
        by_difference.or_else(|| {
            (0..=255u8).find(|code| {
                !self.differences.contains_key(code) && self.base.unicode(*code) == Some(ch)
            })
        })
    }
}

/// Get the Unicode value of a glyph name
///
/// Supports the standard Latin names, `uniXXXX`, `uXXXX[XX]` and single
/// letters. Any suffix after `.` is ignored.
pub fn unicode_from_name(name: &str) -> Option<char> {
    let name = match name.find('.') {
        Some(0) => return None,
        Some(pos) => &name[..pos],
        None => name,
    };

    if name.len() == 1 && name.as_bytes()[0].is_ascii_alphabetic() {
        return name.chars().next();
    }
    if let Ok(index) = GLYPH_NAMES.binary_search_by(|(n, _)| n.cmp(&name)) {
        return char::from_u32(u32::from(GLYPH_NAMES[index].1));
    }
    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() >= 4 {
            let value = u32::from_str_radix(hex.get(..4)?, 16).ok()?;
            return char::from_u32(value);
        }
    }
    if let Some(hex) = name.strip_prefix('u') {
        if (4..=6).contains(&hex.len()) {
            let value = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(value);
        }
    }
    None
}

/// Get a glyph name for a Unicode value
pub fn name_for_unicode(ch: char) -> Cow<'static, str> {
    if ch.is_ascii_alphabetic() {
        return Cow::Owned(ch.to_string());
    }
    let value = u32::from(ch);
    if let Some((name, _)) = GLYPH_NAMES.iter().find(|(_, u)| u32::from(*u) == value) {
        return Cow::Borrowed(name);
    }
    if value <= 0xFFFF {
        Cow::Owned(format!("uni{value:04X}"))
    } else {
        Cow::Owned(format!("u{value:X}"))
    }
}

// Sorted by name
const GLYPH_NAMES: &[(&str, u16)] = &[
    ("AE", 0x00C6),
    ("Aacute", 0x00C1),
    ("Abreve", 0x0102),
    ("Acircumflex", 0x00C2),
    ("Adieresis", 0x00C4),
    ("Agrave", 0x00C0),
    ("Aogonek", 0x0104),
    ("Aring", 0x00C5),
    ("Atilde", 0x00C3),
    ("Cacute", 0x0106),
    ("Ccaron", 0x010C),
    ("Ccedilla", 0x00C7),
    ("Dcaron", 0x010E),
    ("Dcroat", 0x0110),
    ("Delta", 0x2206),
    ("Eacute", 0x00C9),
    ("Ecaron", 0x011A),
    ("Ecircumflex", 0x00CA),
    ("Edieresis", 0x00CB),
    ("Egrave", 0x00C8),
    ("Eogonek", 0x0118),
    ("Eth", 0x00D0),
    ("Euro", 0x20AC),
    ("Gbreve", 0x011E),
    ("Iacute", 0x00CD),
    ("Icircumflex", 0x00CE),
    ("Idieresis", 0x00CF),
    ("Idotaccent", 0x0130),
    ("Igrave", 0x00CC),
    ("Lslash", 0x0141),
    ("Nacute", 0x0143),
    ("Ncaron", 0x0147),
    ("Ntilde", 0x00D1),
    ("OE", 0x0152),
    ("Oacute", 0x00D3),
    ("Ocircumflex", 0x00D4),
    ("Odieresis", 0x00D6),
    ("Ograve", 0x00D2),
    ("Ohungarumlaut", 0x0150),
    ("Omega", 0x03A9),
    ("Oslash", 0x00D8),
    ("Otilde", 0x00D5),
    ("Racute", 0x0154),
    ("Rcaron", 0x0158),
    ("Sacute", 0x015A),
    ("Scaron", 0x0160),
    ("Scedilla", 0x015E),
    ("Tcaron", 0x0164),
    ("Thorn", 0x00DE),
    ("Uacute", 0x00DA),
    ("Ucircumflex", 0x00DB),
    ("Udieresis", 0x00DC),
    ("Ugrave", 0x00D9),
    ("Uhungarumlaut", 0x0170),
    ("Uring", 0x016E),
    ("Yacute", 0x00DD),
    ("Ydieresis", 0x0178),
    ("Zacute", 0x0179),
    ("Zcaron", 0x017D),
    ("Zdotaccent", 0x017B),
    ("aacute", 0x00E1),
    ("abreve", 0x0103),
    ("acircumflex", 0x00E2),
    ("acute", 0x00B4),
    ("adieresis", 0x00E4),
    ("ae", 0x00E6),
    ("agrave", 0x00E0),
    ("ampersand", 0x0026),
    ("aogonek", 0x0105),
    ("apple", 0xF8FF),
    ("approxequal", 0x2248),
    ("aring", 0x00E5),
    ("asciicircum", 0x005E),
    ("asciitilde", 0x007E),
    ("asterisk", 0x002A),
    ("at", 0x0040),
    ("atilde", 0x00E3),
    ("backslash", 0x005C),
    ("bar", 0x007C),
    ("braceleft", 0x007B),
    ("braceright", 0x007D),
    ("bracketleft", 0x005B),
    ("bracketright", 0x005D),
    ("breve", 0x02D8),
    ("brokenbar", 0x00A6),
    ("bullet", 0x2022),
    ("cacute", 0x0107),
    ("caron", 0x02C7),
    ("ccaron", 0x010D),
    ("ccedilla", 0x00E7),
    ("cedilla", 0x00B8),
    ("cent", 0x00A2),
    ("circumflex", 0x02C6),
    ("colon", 0x003A),
    ("comma", 0x002C),
    ("commaaccent", 0xF6C3),
    ("copyright", 0x00A9),
    ("currency", 0x00A4),
    ("dagger", 0x2020),
    ("daggerdbl", 0x2021),
    ("dcaron", 0x010F),
    ("dcroat", 0x0111),
    ("degree", 0x00B0),
    ("dieresis", 0x00A8),
    ("divide", 0x00F7),
    ("dollar", 0x0024),
    ("dotaccent", 0x02D9),
    ("dotlessi", 0x0131),
    ("eacute", 0x00E9),
    ("ecaron", 0x011B),
    ("ecircumflex", 0x00EA),
    ("edieresis", 0x00EB),
    ("egrave", 0x00E8),
    ("eight", 0x0038),
    ("ellipsis", 0x2026),
    ("emdash", 0x2014),
    ("endash", 0x2013),
    ("eogonek", 0x0119),
    ("equal", 0x003D),
    ("eth", 0x00F0),
    ("exclam", 0x0021),
    ("exclamdown", 0x00A1),
    ("ff", 0xFB00),
    ("ffi", 0xFB03),
    ("ffl", 0xFB04),
    ("fi", 0xFB01),
    ("five", 0x0035),
    ("fl", 0xFB02),
    ("florin", 0x0192),
    ("four", 0x0034),
    ("fraction", 0x2044),
    ("gbreve", 0x011F),
    ("germandbls", 0x00DF),
    ("grave", 0x0060),
    ("greater", 0x003E),
    ("greaterequal", 0x2265),
    ("guillemotleft", 0x00AB),
    ("guillemotright", 0x00BB),
    ("guilsinglleft", 0x2039),
    ("guilsinglright", 0x203A),
    ("hungarumlaut", 0x02DD),
    ("hyphen", 0x002D),
    ("iacute", 0x00ED),
    ("icircumflex", 0x00EE),
    ("idieresis", 0x00EF),
    ("igrave", 0x00EC),
    ("infinity", 0x221E),
    ("integral", 0x222B),
    ("less", 0x003C),
    ("lessequal", 0x2264),
    ("logicalnot", 0x00AC),
    ("lozenge", 0x25CA),
    ("lslash", 0x0142),
    ("macron", 0x00AF),
    ("minus", 0x2212),
    ("mu", 0x00B5),
    ("multiply", 0x00D7),
    ("nacute", 0x0144),
    ("nbspace", 0x00A0),
    ("ncaron", 0x0148),
    ("nine", 0x0039),
    ("notequal", 0x2260),
    ("ntilde", 0x00F1),
    ("numbersign", 0x0023),
    ("oacute", 0x00F3),
    ("ocircumflex", 0x00F4),
    ("odieresis", 0x00F6),
    ("oe", 0x0153),
    ("ogonek", 0x02DB),
    ("ograve", 0x00F2),
    ("ohungarumlaut", 0x0151),
    ("one", 0x0031),
    ("onehalf", 0x00BD),
    ("onequarter", 0x00BC),
    ("onesuperior", 0x00B9),
    ("ordfeminine", 0x00AA),
    ("ordmasculine", 0x00BA),
    ("oslash", 0x00F8),
    ("otilde", 0x00F5),
    ("paragraph", 0x00B6),
    ("parenleft", 0x0028),
    ("parenright", 0x0029),
    ("partialdiff", 0x2202),
    ("percent", 0x0025),
    ("period", 0x002E),
    ("periodcentered", 0x00B7),
    ("perthousand", 0x2030),
    ("pi", 0x03C0),
    ("plus", 0x002B),
    ("plusminus", 0x00B1),
    ("product", 0x220F),
    ("question", 0x003F),
    ("questiondown", 0x00BF),
    ("quotedbl", 0x0022),
    ("quotedblbase", 0x201E),
    ("quotedblleft", 0x201C),
    ("quotedblright", 0x201D),
    ("quoteleft", 0x2018),
    ("quoteright", 0x2019),
    ("quotesinglbase", 0x201A),
    ("quotesingle", 0x0027),
    ("racute", 0x0155),
    ("radical", 0x221A),
    ("rcaron", 0x0159),
    ("registered", 0x00AE),
    ("ring", 0x02DA),
    ("sacute", 0x015B),
    ("scaron", 0x0161),
    ("scedilla", 0x015F),
    ("section", 0x00A7),
    ("semicolon", 0x003B),
    ("seven", 0x0037),
    ("sfthyphen", 0x00AD),
    ("six", 0x0036),
    ("slash", 0x002F),
    ("space", 0x0020),
    ("sterling", 0x00A3),
    ("summation", 0x2211),
    ("tcaron", 0x0165),
    ("thorn", 0x00FE),
    ("three", 0x0033),
    ("threequarters", 0x00BE),
    ("threesuperior", 0x00B3),
    ("tilde", 0x02DC),
    ("trademark", 0x2122),
    ("two", 0x0032),
    ("twosuperior", 0x00B2),
    ("uacute", 0x00FA),
    ("ucircumflex", 0x00FB),
    ("udieresis", 0x00FC),
    ("ugrave", 0x00F9),
    ("uhungarumlaut", 0x0171),
    ("underscore", 0x005F),
    ("uring", 0x016F),
    ("yacute", 0x00FD),
    ("ydieresis", 0x00FF),
    ("yen", 0x00A5),
    ("zacute", 0x017A),
    ("zcaron", 0x017E),
    ("zdotaccent", 0x017C),
    ("zero", 0x0030),
];

const STANDARD: [u16; 256] = [
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0020, 0x0021, 0x0022, 0x0023, 0x0024, 0x0025, 0x0026, 0x2019,
    0x0028, 0x0029, 0x002A, 0x002B, 0x002C, 0x002D, 0x002E, 0x002F,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
    0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
    0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F,
    0x0050, 0x0051, 0x0052, 0x0053, 0x0054, 0x0055, 0x0056, 0x0057,
    0x0058, 0x0059, 0x005A, 0x005B, 0x005C, 0x005D, 0x005E, 0x005F,
    0x2018, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067,
    0x0068, 0x0069, 0x006A, 0x006B, 0x006C, 0x006D, 0x006E, 0x006F,
    0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007A, 0x007B, 0x007C, 0x007D, 0x007E, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x00A1, 0x00A2, 0x00A3, 0x2044, 0x00A5, 0x0192, 0x00A7,
    0x00A4, 0x0027, 0x201C, 0x00AB, 0x2039, 0x203A, 0xFB01, 0xFB02,
    0x0000, 0x2013, 0x2020, 0x2021, 0x00B7, 0x0000, 0x00B6, 0x2022,
    0x201A, 0x201E, 0x201D, 0x00BB, 0x2026, 0x2030, 0x0000, 0x00BF,
    0x0000, 0x0060, 0x00B4, 0x02C6, 0x02DC, 0x00AF, 0x02D8, 0x02D9,
    0x00A8, 0x0000, 0x02DA, 0x00B8, 0x0000, 0x02DD, 0x02DB, 0x02C7,
    0x2014, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x00C6, 0x0000, 0x00AA, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0141, 0x00D8, 0x0152, 0x00BA, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x00E6, 0x0000, 0x0000, 0x0000, 0x0131, 0x0000, 0x0000,
    0x0142, 0x00F8, 0x0153, 0x00DF, 0x0000, 0x0000, 0x0000, 0x0000,
];

const WIN_ANSI: [u16; 256] = [
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0020, 0x0021, 0x0022, 0x0023, 0x0024, 0x0025, 0x0026, 0x0027,
    0x0028, 0x0029, 0x002A, 0x002B, 0x002C, 0x002D, 0x002E, 0x002F,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
    0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
    0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F,
    0x0050, 0x0051, 0x0052, 0x0053, 0x0054, 0x0055, 0x0056, 0x0057,
    0x0058, 0x0059, 0x005A, 0x005B, 0x005C, 0x005D, 0x005E, 0x005F,
    0x0060, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067,
    0x0068, 0x0069, 0x006A, 0x006B, 0x006C, 0x006D, 0x006E, 0x006F,
    0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007A, 0x007B, 0x007C, 0x007D, 0x007E, 0x0000,
    0x20AC, 0x0000, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x0000, 0x017D, 0x0000,
    0x0000, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x0000, 0x017E, 0x0178,
    0x00A0, 0x00A1, 0x00A2, 0x00A3, 0x00A4, 0x00A5, 0x00A6, 0x00A7,
    0x00A8, 0x00A9, 0x00AA, 0x00AB, 0x00AC, 0x00AD, 0x00AE, 0x00AF,
    0x00B0, 0x00B1, 0x00B2, 0x00B3, 0x00B4, 0x00B5, 0x00B6, 0x00B7,
    0x00B8, 0x00B9, 0x00BA, 0x00BB, 0x00BC, 0x00BD, 0x00BE, 0x00BF,
    0x00C0, 0x00C1, 0x00C2, 0x00C3, 0x00C4, 0x00C5, 0x00C6, 0x00C7,
    0x00C8, 0x00C9, 0x00CA, 0x00CB, 0x00CC, 0x00CD, 0x00CE, 0x00CF,
    0x00D0, 0x00D1, 0x00D2, 0x00D3, 0x00D4, 0x00D5, 0x00D6, 0x00D7,
    0x00D8, 0x00D9, 0x00DA, 0x00DB, 0x00DC, 0x00DD, 0x00DE, 0x00DF,
    0x00E0, 0x00E1, 0x00E2, 0x00E3, 0x00E4, 0x00E5, 0x00E6, 0x00E7,
    0x00E8, 0x00E9, 0x00EA, 0x00EB, 0x00EC, 0x00ED, 0x00EE, 0x00EF,
    0x00F0, 0x00F1, 0x00F2, 0x00F3, 0x00F4, 0x00F5, 0x00F6, 0x00F7,
    0x00F8, 0x00F9, 0x00FA, 0x00FB, 0x00FC, 0x00FD, 0x00FE, 0x00FF,
];

const MAC_ROMAN: [u16; 256] = [
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0020, 0x0021, 0x0022, 0x0023, 0x0024, 0x0025, 0x0026, 0x0027,
    0x0028, 0x0029, 0x002A, 0x002B, 0x002C, 0x002D, 0x002E, 0x002F,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
    0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
    0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F,
    0x0050, 0x0051, 0x0052, 0x0053, 0x0054, 0x0055, 0x0056, 0x0057,
    0x0058, 0x0059, 0x005A, 0x005B, 0x005C, 0x005D, 0x005E, 0x005F,
    0x0060, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067,
    0x0068, 0x0069, 0x006A, 0x006B, 0x006C, 0x006D, 0x006E, 0x006F,
    0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007A, 0x007B, 0x007C, 0x007D, 0x007E, 0x0000,
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8,
    0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8,
    0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
    0x00FF, 0x0178, 0x2044, 0x00A4, 0x2039, 0x203A, 0xFB01, 0xFB02,
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    0x0000, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn glyph_names_sorted() {
        for pair in GLYPH_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn base_tables() {
        assert_eq!(BaseEncoding::WinAnsi.unicode(0x80), Some('€'));
        assert_eq!(BaseEncoding::WinAnsi.unicode(0x81), None);
        assert_eq!(BaseEncoding::WinAnsi.unicode(b'A'), Some('A'));
        assert_eq!(BaseEncoding::Standard.unicode(0x27), Some('\u{2019}'));
        assert_eq!(BaseEncoding::Standard.unicode(0xE1), Some('Æ'));
        assert_eq!(BaseEncoding::MacRoman.char_code('é'), Some(0x8E));
        assert_eq!(BaseEncoding::MacRoman.char_code('A'), Some(0x41));
        assert_eq!(BaseEncoding::Symbol.unicode(b'A'), None);
        assert!(!BaseEncoding::Builtin.has_unicode());
    }

    #[test]
    fn names() {
        assert_eq!(unicode_from_name("A"), Some('A'));
        assert_eq!(unicode_from_name("bullet"), Some('•'));
        assert_eq!(unicode_from_name("a.sc"), Some('a'));
        assert_eq!(unicode_from_name("uni20AC"), Some('€'));
        assert_eq!(unicode_from_name("u1F600"), Some('\u{1F600}'));
        assert_eq!(unicode_from_name(".notdef"), None);
        assert_eq!(unicode_from_name("g123"), None);
        assert_eq!(name_for_unicode('z'), "z");
        assert_eq!(name_for_unicode('€'), "Euro");
        assert_eq!(name_for_unicode('\u{4E2D}'), "uni4E2D");
    }

    #[test]
    fn differences() {
        let enc = FontEncoding::new(BaseEncoding::WinAnsi).with_differences(&[
            Difference::Code(0x41),
            Difference::Name("bullet".into()),
            Difference::Name("Euro".into()),
            Difference::Code(0x300),
            Difference::Name("zero".into()),
        ]);
        assert!(enc.has_differences());
        assert_eq!(enc.glyph_name(0x41).as_deref(), Some("bullet"));
        assert_eq!(enc.unicode(0x41), Some('•'));
        assert_eq!(enc.unicode(0x42), Some('€'));
        assert_eq!(enc.unicode(0x43), Some('C'));
        assert_eq!(enc.char_code('€'), Some(0x42));
        assert_eq!(enc.char_code('A'), None);
        assert_eq!(enc.char_code('C'), Some(0x43));
    }
}
