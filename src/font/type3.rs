// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type3 fonts

use super::FontEncoding;
use crate::conv::{to_font_units, to_usize};
use crate::GlyphId;

/// The default `FontMatrix` of a Type3 font
pub const DEFAULT_MATRIX: [f32; 6] = [0.001, 0.0, 0.0, 0.001, 0.0, 0.0];

/// Data specific to Type3 fonts
///
/// Glyphs of a Type3 font are content procedures. The glyph index of a code
/// is the position of its glyph name within `CharProcs`.
#[derive(Clone, Debug)]
pub struct Type3Font {
    encoding: FontEncoding,
    char_procs: Vec<String>,
    first_char: u32,
    widths: Vec<f32>,
    matrix: [f32; 6],
}

impl Type3Font {
    /// Construct
    pub fn new(encoding: FontEncoding, char_procs: Vec<String>) -> Self {
        Type3Font {
            encoding,
            char_procs,
            first_char: 0,
            widths: vec![],
            matrix: DEFAULT_MATRIX,
        }
    }

    /// Set `FirstChar` and `Widths` (in glyph space)
    pub fn with_widths(mut self, first_char: u32, widths: Vec<f32>) -> Self {
        self.first_char = first_char;
        self.widths = widths;
        self
    }

    /// Set `FontMatrix`
    pub fn with_matrix(mut self, matrix: [f32; 6]) -> Self {
        self.matrix = matrix;
        self
    }

    /// The encoding
    #[inline]
    pub fn encoding(&self) -> &FontEncoding {
        &self.encoding
    }

    /// The `FontMatrix`
    #[inline]
    pub fn matrix(&self) -> [f32; 6] {
        self.matrix
    }

    /// Name of the glyph procedure at `glyph`
    pub fn proc_name(&self, glyph: GlyphId) -> Option<&str> {
        self.char_procs.get(usize::from(glyph.0)).map(String::as_str)
    }

    /// Look up the procedure of `code`
    pub fn glyph(&self, code: u32) -> Option<GlyphId> {
        let name = self.encoding.glyph_name(u8::try_from(code).ok()?)?;
        let index = self.char_procs.iter().position(|n| *n == name)?;
        u16::try_from(index).ok().map(GlyphId)
    }

    /// Width of `code`, scaled to text space units per 1000 em
    pub fn width(&self, code: u32) -> i32 {
        let Some(w) = code
            .checked_sub(self.first_char)
            .and_then(|i| self.widths.get(to_usize(i)))
        else {
            return 0;
        };
        to_font_units(w * self.matrix[0] * 1000.0)
    }
}
