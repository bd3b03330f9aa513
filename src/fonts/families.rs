// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Common font names
//!
//! The purpose of this module is to map the names found in documents to the
//! standard (base 14) fonts and to installed font families which may
//! substitute for them.
//!
//! Font family ordering indicates usage preference.

use super::{Charset, StyleFlags};

/// The 14 standard fonts every PDF consumer must provide
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Base14 {
    Courier,
    CourierBold,
    CourierBoldOblique,
    CourierOblique,
    Helvetica,
    HelveticaBold,
    HelveticaBoldOblique,
    HelveticaOblique,
    Times,
    TimesBold,
    TimesBoldItalic,
    TimesItalic,
    Symbol,
    ZapfDingbats,
}

impl Base14 {
    /// Canonical PostScript name
    pub fn name(self) -> &'static str {
        match self {
            Base14::Courier => "Courier",
            Base14::CourierBold => "Courier-Bold",
            Base14::CourierBoldOblique => "Courier-BoldOblique",
            Base14::CourierOblique => "Courier-Oblique",
            Base14::Helvetica => "Helvetica",
            Base14::HelveticaBold => "Helvetica-Bold",
            Base14::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Base14::HelveticaOblique => "Helvetica-Oblique",
            Base14::Times => "Times-Roman",
            Base14::TimesBold => "Times-Bold",
            Base14::TimesBoldItalic => "Times-BoldItalic",
            Base14::TimesItalic => "Times-Italic",
            Base14::Symbol => "Symbol",
            Base14::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Family name, without style
    pub fn family(self) -> &'static str {
        match self {
            Base14::Courier
            | Base14::CourierBold
            | Base14::CourierBoldOblique
            | Base14::CourierOblique => "Courier",
            Base14::Helvetica
            | Base14::HelveticaBold
            | Base14::HelveticaBoldOblique
            | Base14::HelveticaOblique => "Helvetica",
            Base14::Times | Base14::TimesBold | Base14::TimesBoldItalic | Base14::TimesItalic => {
                "Times"
            }
            Base14::Symbol => "Symbol",
            Base14::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Style flags implied by this font
    pub fn style(self) -> StyleFlags {
        let (bold, italic) = match self {
            Base14::CourierBold | Base14::HelveticaBold | Base14::TimesBold => (true, false),
            Base14::CourierOblique | Base14::HelveticaOblique | Base14::TimesItalic => {
                (false, true)
            }
            Base14::CourierBoldOblique
            | Base14::HelveticaBoldOblique
            | Base14::TimesBoldItalic => (true, true),
            _ => (false, false),
        };
        let mut style = match self.family() {
            "Courier" => StyleFlags::FIXED_PITCH | StyleFlags::NONSYMBOLIC,
            "Times" => StyleFlags::SERIF | StyleFlags::NONSYMBOLIC,
            "Helvetica" => StyleFlags::NONSYMBOLIC,
            _ => StyleFlags::SYMBOLIC,
        };
        style.set(StyleFlags::BOLD, bold);
        style.set(StyleFlags::ITALIC, italic);
        style
    }

    /// True for the two fonts with a built-in symbolic encoding
    pub fn is_symbolic(self) -> bool {
        matches!(self, Base14::Symbol | Base14::ZapfDingbats)
    }

    /// Installed families known to substitute for this font
    pub fn substitutes(self) -> &'static [&'static str] {
        match self.family() {
            "Courier" => &MONOSPACE,
            "Times" => &SERIF,
            "Helvetica" => &SANS_SERIF,
            "Symbol" => &SYMBOL,
            _ => &DINGBATS,
        }
    }
}

// Sorted by case-insensitive comparison of the name.
const ALT_FONT_NAMES: &[(&str, Base14)] = &[
    ("Arial", Base14::Helvetica),
    ("Arial,Bold", Base14::HelveticaBold),
    ("Arial,BoldItalic", Base14::HelveticaBoldOblique),
    ("Arial,Italic", Base14::HelveticaOblique),
    ("Arial-Bold", Base14::HelveticaBold),
    ("Arial-BoldItalic", Base14::HelveticaBoldOblique),
    ("Arial-BoldItalicMT", Base14::HelveticaBoldOblique),
    ("Arial-BoldMT", Base14::HelveticaBold),
    ("Arial-Italic", Base14::HelveticaOblique),
    ("Arial-ItalicMT", Base14::HelveticaOblique),
    ("ArialBold", Base14::HelveticaBold),
    ("ArialBoldItalic", Base14::HelveticaBoldOblique),
    ("ArialItalic", Base14::HelveticaOblique),
    ("ArialMT", Base14::Helvetica),
    ("ArialMT,Bold", Base14::HelveticaBold),
    ("ArialMT,BoldItalic", Base14::HelveticaBoldOblique),
    ("ArialMT,Italic", Base14::HelveticaOblique),
    ("ArialRoundedMTBold", Base14::HelveticaBold),
    ("Courier", Base14::Courier),
    ("Courier,Bold", Base14::CourierBold),
    ("Courier,BoldItalic", Base14::CourierBoldOblique),
    ("Courier,Italic", Base14::CourierOblique),
    ("Courier-Bold", Base14::CourierBold),
    ("Courier-BoldOblique", Base14::CourierBoldOblique),
    ("Courier-Oblique", Base14::CourierOblique),
    ("CourierBold", Base14::CourierBold),
    ("CourierBoldItalic", Base14::CourierBoldOblique),
    ("CourierItalic", Base14::CourierOblique),
    ("CourierNew", Base14::Courier),
    ("CourierNew,Bold", Base14::CourierBold),
    ("CourierNew,BoldItalic", Base14::CourierBoldOblique),
    ("CourierNew,Italic", Base14::CourierOblique),
    ("CourierNew-Bold", Base14::CourierBold),
    ("CourierNew-BoldItalic", Base14::CourierBoldOblique),
    ("CourierNew-Italic", Base14::CourierOblique),
    ("CourierNewBold", Base14::CourierBold),
    ("CourierNewBoldItalic", Base14::CourierBoldOblique),
    ("CourierNewItalic", Base14::CourierOblique),
    ("CourierNewPS-BoldItalicMT", Base14::CourierBoldOblique),
    ("CourierNewPS-BoldMT", Base14::CourierBold),
    ("CourierNewPS-ItalicMT", Base14::CourierOblique),
    ("CourierNewPSMT", Base14::Courier),
    ("CourierStd", Base14::Courier),
    ("CourierStd-Bold", Base14::CourierBold),
    ("CourierStd-BoldOblique", Base14::CourierBoldOblique),
    ("CourierStd-Oblique", Base14::CourierOblique),
    ("Helvetica", Base14::Helvetica),
    ("Helvetica,Bold", Base14::HelveticaBold),
    ("Helvetica,BoldItalic", Base14::HelveticaBoldOblique),
    ("Helvetica,Italic", Base14::HelveticaOblique),
    ("Helvetica-Bold", Base14::HelveticaBold),
    ("Helvetica-BoldItalic", Base14::HelveticaBoldOblique),
    ("Helvetica-BoldOblique", Base14::HelveticaBoldOblique),
    ("Helvetica-Italic", Base14::HelveticaOblique),
    ("Helvetica-Oblique", Base14::HelveticaOblique),
    ("HelveticaBold", Base14::HelveticaBold),
    ("HelveticaBoldItalic", Base14::HelveticaBoldOblique),
    ("HelveticaItalic", Base14::HelveticaOblique),
    ("Symbol", Base14::Symbol),
    ("SymbolMT", Base14::Symbol),
    ("Times-Bold", Base14::TimesBold),
    ("Times-BoldItalic", Base14::TimesBoldItalic),
    ("Times-Italic", Base14::TimesItalic),
    ("Times-Roman", Base14::Times),
    ("TimesBold", Base14::TimesBold),
    ("TimesBoldItalic", Base14::TimesBoldItalic),
    ("TimesItalic", Base14::TimesItalic),
    ("TimesNewRoman", Base14::Times),
    ("TimesNewRoman,Bold", Base14::TimesBold),
    ("TimesNewRoman,BoldItalic", Base14::TimesBoldItalic),
    ("TimesNewRoman,Italic", Base14::TimesItalic),
    ("TimesNewRoman-Bold", Base14::TimesBold),
    ("TimesNewRoman-BoldItalic", Base14::TimesBoldItalic),
    ("TimesNewRoman-Italic", Base14::TimesItalic),
    ("TimesNewRomanBold", Base14::TimesBold),
    ("TimesNewRomanBoldItalic", Base14::TimesBoldItalic),
    ("TimesNewRomanItalic", Base14::TimesItalic),
    ("TimesNewRomanPS", Base14::Times),
    ("TimesNewRomanPS-Bold", Base14::TimesBold),
    ("TimesNewRomanPS-BoldItalic", Base14::TimesBoldItalic),
    ("TimesNewRomanPS-BoldItalicMT", Base14::TimesBoldItalic),
    ("TimesNewRomanPS-BoldMT", Base14::TimesBold),
    ("TimesNewRomanPS-Italic", Base14::TimesItalic),
    ("TimesNewRomanPS-ItalicMT", Base14::TimesItalic),
    ("TimesNewRomanPSMT", Base14::Times),
    ("TimesNewRomanPSMT,Bold", Base14::TimesBold),
    ("TimesNewRomanPSMT,BoldItalic", Base14::TimesBoldItalic),
    ("TimesNewRomanPSMT,Italic", Base14::TimesItalic),
    ("ZapfDingbats", Base14::ZapfDingbats),
];

fn cmp_ignore_ascii_case(a: &str, b: &str) -> std::cmp::Ordering {
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}

/// Find the standard font for a (possibly alternate) name
///
/// The subset prefix, if any, should be removed first (see
/// [`strip_subset_prefix`]). Matching ignores ASCII case.
///
/// # Examples
///
/// ```
/// # use pdf_font_map::fonts::{standard_font, Base14};
/// assert_eq!(standard_font("Arial,Bold"), Some(Base14::HelveticaBold));
/// assert_eq!(standard_font("timesnewromanpsmt"), Some(Base14::Times));
/// assert_eq!(standard_font("Frutiger"), None);
/// ```
pub fn standard_font(name: &str) -> Option<Base14> {
    ALT_FONT_NAMES
        .binary_search_by(|(n, _)| cmp_ignore_ascii_case(n, name))
        .ok()
        .map(|i| ALT_FONT_NAMES[i].1)
}

/// Remove a subset tag such as `ABCDEF+` from a font name
pub fn strip_subset_prefix(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 7 && bytes[6] == b'+' && bytes[..6].iter().all(u8::is_ascii_uppercase) {
        &name[7..]
    } else {
        name
    }
}

/// Normalize a font name for comparison
///
/// Spaces, hyphens and commas are removed, any subset tag or suffix after
/// `+` is dropped and the result is lower-cased.
pub fn normalize_name(name: &str) -> String {
    let name = strip_subset_prefix(name);
    let name = match name.find('+') {
        Some(pos) if pos != 0 => &name[..pos],
        _ => name,
    };
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | ','))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split a document font name into family and style
///
/// The style suffix follows the last `,` or `-`; if it is not recognised the
/// whole name is taken as the family.
pub fn split_style(name: &str) -> (&str, StyleFlags) {
    let name = strip_subset_prefix(name);
    if let Some(pos) = name.rfind([',', '-']) {
        let suffix = name[pos + 1..].trim_end_matches("MT");
        if let Some(style) = StyleFlags::parse_suffix(suffix) {
            return (&name[..pos], style);
        }
    } else {
        for (suffix, style) in [
            ("BoldItalic", StyleFlags::BOLD | StyleFlags::ITALIC),
            ("Bold", StyleFlags::BOLD),
            ("Italic", StyleFlags::ITALIC),
        ] {
            if let Some(family) = name.strip_suffix(suffix) {
                if !family.is_empty() {
                    return (family, style);
                }
            }
        }
    }
    (name, StyleFlags::empty())
}

/// The default font for Latin text
pub const DEFAULT_ANSI_FONT: &str = "Helvetica";

/// The last-resort font expected to cover most of Unicode
pub const UNIVERSAL_DEFAULT_FONT: &str = "Arial Unicode MS";

/// Get the default font family for a charset
pub fn default_font_for_charset(charset: Charset) -> &'static str {
    match charset {
        Charset::ChineseSimplified => "SimSun",
        Charset::ChineseTraditional => "MingLiU",
        Charset::ShiftJis => "MS Gothic",
        Charset::Hangul | Charset::Johab => "Batang",
        Charset::Cyrillic | Charset::EasternEuropean => "Times New Roman",
        Charset::Symbol => "Symbol",
        _ => DEFAULT_ANSI_FONT,
    }
}

/// Installed families to try for a CJK charset
pub fn cjk_families(charset: Charset) -> &'static [&'static str] {
    match charset {
        Charset::ChineseSimplified => &CHINESE_SIMPLIFIED,
        Charset::ChineseTraditional => &CHINESE_TRADITIONAL,
        Charset::ShiftJis => &JAPANESE,
        Charset::Hangul | Charset::Johab => &KOREAN,
        _ => &[],
    }
}

const SERIF: [&str; 7] = [
    "Times",
    "Times New Roman",
    "Liberation Serif",
    "Nimbus Roman",
    "Nimbus Roman No9 L",
    "DejaVu Serif",
    "Noto Serif",
];

const SANS_SERIF: [&str; 8] = [
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "Nimbus Sans",
    "Nimbus Sans L",
    "DejaVu Sans",
    "Noto Sans",
    "Arimo",
];

const MONOSPACE: [&str; 7] = [
    "Courier",
    "Courier New",
    "Liberation Mono",
    "Nimbus Mono PS",
    "Nimbus Mono L",
    "DejaVu Sans Mono",
    "Cousine",
];

const SYMBOL: [&str; 4] = ["Symbol", "Standard Symbols PS", "Standard Symbols L", "SymbolNeu"];

const DINGBATS: [&str; 4] = ["ZapfDingbats", "Dingbats", "D050000L", "Wingdings"];

const CHINESE_SIMPLIFIED: [&str; 5] = [
    "SimSun",
    "NSimSun",
    "Noto Sans CJK SC",
    "WenQuanYi Zen Hei",
    "AR PL UMing CN",
];

const CHINESE_TRADITIONAL: [&str; 4] = ["MingLiU", "PMingLiU", "Noto Sans CJK TC", "AR PL UMing TW"];

const JAPANESE: [&str; 5] = [
    "MS Gothic",
    "MS Mincho",
    "Noto Sans CJK JP",
    "IPAGothic",
    "TakaoGothic",
];

const KOREAN: [&str; 4] = ["Batang", "Gulim", "Noto Sans CJK KR", "UnDotum"];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn alt_names_sorted() {
        for pair in ALT_FONT_NAMES.windows(2) {
            assert_eq!(
                cmp_ignore_ascii_case(pair[0].0, pair[1].0),
                std::cmp::Ordering::Less,
                "{} / {}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("ABCDE+Helvetica"), "ABCDE+Helvetica");
        assert_eq!(strip_subset_prefix("AbCDEF+Helvetica"), "AbCDEF+Helvetica");
        assert_eq!(strip_subset_prefix("ABCDEF+"), "ABCDEF+");
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_name("Times New Roman"), "timesnewroman");
        assert_eq!(normalize_name("XYZABC+Arial-Bold"), "arialbold");
        assert_eq!(normalize_name("Arial,Bold+x"), "arialbold");
    }

    #[test]
    fn style_split() {
        assert_eq!(split_style("Arial,Bold"), ("Arial", StyleFlags::BOLD));
        assert_eq!(
            split_style("ABCDEF+Verdana-BoldItalic"),
            ("Verdana", StyleFlags::BOLD | StyleFlags::ITALIC)
        );
        assert_eq!(split_style("ArialItalic"), ("Arial", StyleFlags::ITALIC));
        assert_eq!(split_style("Foo-Bar"), ("Foo-Bar", StyleFlags::empty()));
        assert_eq!(split_style("Arial-BoldMT"), ("Arial", StyleFlags::BOLD));
    }

    #[test]
    fn base14_style() {
        let s = Base14::TimesBoldItalic.style();
        assert!(s.contains(StyleFlags::SERIF | StyleFlags::BOLD | StyleFlags::ITALIC));
        assert!(Base14::ZapfDingbats.style().contains(StyleFlags::SYMBOLIC));
        assert_eq!(Base14::CourierOblique.name(), "Courier-Oblique");
        assert_eq!(Base14::Times.substitutes()[0], "Times");
    }
}
