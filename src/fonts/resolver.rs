// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configured font selection
//!
//! A [`SubstituteSelector`] names a preferred list of installed families
//! together with a weight and slant, for use where a font must be chosen
//! without any document font to describe it.

use super::{Charset, FontManagerContext, NoFontMatch, StyleFlags};
use crate::font::FontRef;
pub use fontdb::{Style, Weight};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An installed font selection
///
/// Families are tried in order; if none resolves, the configured default
/// font for the selector's charset is used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubstituteSelector {
    families: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default, with = "remote::Weight"))]
    weight: Weight,
    #[cfg_attr(feature = "serde", serde(default, with = "remote::Style"))]
    style: Style,
    #[cfg_attr(feature = "serde", serde(default))]
    charset: Charset,
}

impl SubstituteSelector {
    /// Synonym for default
    #[inline]
    pub fn new() -> Self {
        SubstituteSelector::default()
    }

    /// Set family name(s)
    ///
    /// If multiple names are passed, the first to successfully resolve a font
    /// is used.
    pub fn set_families(&mut self, families: impl IntoIterator<Item: Into<String>>) {
        self.families = families.into_iter().map(|item| item.into()).collect();
    }

    /// Set style
    #[inline]
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Set weight
    #[inline]
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Set charset
    #[inline]
    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    /// Families, in order of preference
    #[inline]
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Style flags equivalent to the selector's weight and slant
    pub fn style_flags(&self) -> StyleFlags {
        let mut flags = StyleFlags::empty();
        if self.weight.0 >= Weight::SEMIBOLD.0 {
            flags |= StyleFlags::BOLD;
        }
        if self.style != Style::Normal {
            flags |= StyleFlags::ITALIC;
        }
        if self.charset == Charset::Symbol {
            flags |= StyleFlags::SYMBOLIC;
        }
        flags
    }

    /// Resolve to a system font
    pub fn select(&self, ctx: &FontManagerContext) -> Result<FontRef, NoFontMatch> {
        debug!("select(): {self:?}");

        let style = self.style_flags();
        let codepage = self.charset.codepage();
        self.families
            .iter()
            .find_map(|family| ctx.load_font(family, style, codepage))
            .or_else(|| ctx.get_font_by_charset(self.charset, style))
            .ok_or(NoFontMatch)
    }
}

// See: https://serde.rs/remote-derive.html
#[cfg(feature = "serde")]
mod remote {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
    #[serde(remote = "fontdb::Weight")]
    pub struct Weight(pub u16);

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
    #[serde(remote = "fontdb::Style")]
    pub enum Style {
        Normal,
        Italic,
        Oblique,
    }
}
