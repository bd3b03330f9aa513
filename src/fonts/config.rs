// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font manager configuration

use super::families::{default_font_for_charset, DEFAULT_ANSI_FONT, UNIVERSAL_DEFAULT_FONT};
use super::Charset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration of a [`super::FontManagerContext`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ManagerConfig {
    /// Family used for Latin text when nothing better is known
    pub default_font: String,
    /// Last-resort family, expected to cover most of Unicode
    pub universal_font: String,
    /// Preferred families per CJK charset
    ///
    /// Entries earlier in the list take precedence.
    pub cjk_fonts: Vec<(Charset, String)>,
    /// Whether [`super::FontManagerContext::new`] enumerates system fonts
    pub load_system_fonts: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        let cjk_fonts = [
            Charset::ChineseSimplified,
            Charset::ChineseTraditional,
            Charset::ShiftJis,
            Charset::Hangul,
        ]
        .into_iter()
        .map(|cs| (cs, default_font_for_charset(cs).to_string()))
        .collect();

        ManagerConfig {
            default_font: DEFAULT_ANSI_FONT.to_string(),
            universal_font: UNIVERSAL_DEFAULT_FONT.to_string(),
            cjk_fonts,
            load_system_fonts: true,
        }
    }
}

impl ManagerConfig {
    /// Construct the default configuration without system fonts
    ///
    /// Faces must then be supplied through a custom enumerator or
    /// [`super::FontManagerContext::register_face`].
    pub fn without_system_fonts() -> Self {
        ManagerConfig {
            load_system_fonts: false,
            ..Default::default()
        }
    }

    /// Configured families for a charset
    pub fn fonts_for_charset(&self, charset: Charset) -> impl Iterator<Item = &str> {
        let charset = match charset {
            Charset::Johab => Charset::Hangul,
            cs => cs,
        };
        self.cjk_fonts
            .iter()
            .filter(move |(cs, _)| *cs == charset)
            .map(|(_, name)| name.as_str())
    }
}
