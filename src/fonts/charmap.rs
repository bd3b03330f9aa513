// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph index resolution over a program's character maps

use super::{CharmapId, GlyphProgram};
use crate::font::BaseEncoding;
use crate::GlyphId;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Resolution strategy of a [`GlyphIndexResolver`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolverMode {
    /// The selected character map is assumed to be Unicode
    ///
    /// Only the symbolic fallbacks are tried on a miss.
    Unicode,
    /// Every character map of the program is tried on a miss
    ///
    /// The first map to yield a glyph becomes the selected map.
    Extended,
}

/// Maps codes to glyph indices within one loaded program
///
/// The selected character map is held in a [`Cell`]: in
/// [`ResolverMode::Extended`], a successful lookup through a different map
/// re-selects that map for subsequent lookups. Results are therefore
/// path-dependent but deterministic for a given sequence of queries.
pub struct GlyphIndexResolver {
    program: Rc<dyn GlyphProgram>,
    selected: Cell<Option<usize>>,
    mode: ResolverMode,
}

impl GlyphIndexResolver {
    /// Construct a resolver in [`ResolverMode::Unicode`]
    ///
    /// The Windows Unicode map is selected if present, otherwise any other
    /// Unicode map, otherwise the first map.
    pub fn new(program: Rc<dyn GlyphProgram>) -> Self {
        Self::with_mode(program, ResolverMode::Unicode)
    }

    /// Construct a resolver in [`ResolverMode::Extended`]
    pub fn extended(program: Rc<dyn GlyphProgram>) -> Self {
        Self::with_mode(program, ResolverMode::Extended)
    }

    /// Construct with the given `mode`
    pub fn with_mode(program: Rc<dyn GlyphProgram>, mode: ResolverMode) -> Self {
        let charmaps = program.charmaps();
        let selected = program
            .find_charmap(CharmapId::MS_UNICODE)
            .or_else(|| charmaps.iter().position(|c| c.is_unicode()))
            .or(if charmaps.is_empty() { None } else { Some(0) });
        GlyphIndexResolver {
            program,
            selected: Cell::new(selected),
            mode,
        }
    }

    /// Access the program
    #[inline]
    pub fn program(&self) -> &Rc<dyn GlyphProgram> {
        &self.program
    }

    /// Get the resolution mode
    #[inline]
    pub fn mode(&self) -> ResolverMode {
        self.mode
    }

    /// Get the currently selected character map
    pub fn selected(&self) -> Option<CharmapId> {
        let index = self.selected.get()?;
        self.program.charmaps().get(index).copied()
    }

    /// Select the first character map matching `id`
    ///
    /// Returns false (leaving the selection unchanged) if no such map exists.
    pub fn select(&self, id: CharmapId) -> bool {
        match self.program.find_charmap(id) {
            Some(index) => {
                self.selected.set(Some(index));
                true
            }
            None => false,
        }
    }

    /// True if the selected map is indexed by Unicode
    pub fn is_unicode_selected(&self) -> bool {
        self.selected().is_some_and(CharmapId::is_unicode)
    }

    /// Look up a Unicode character
    #[inline]
    pub fn glyph_from_unicode(&self, ch: char) -> Option<GlyphId> {
        self.glyph_from_char_code(u32::from(ch), false)
    }

    /// Look up a code
    ///
    /// 1.  The selected map is tried.
    /// 2.  If `symbolic`, the (3, 0) Symbol map is tried, then the (1, 0)
    ///     Mac-Roman map.
    /// 3.  In [`ResolverMode::Extended`], each map is tried in order. The
    ///     first to succeed is selected.
    ///
    /// Returns `None` (glyph 0, `.notdef`) if nothing matches.
    pub fn glyph_from_char_code(&self, code: u32, symbolic: bool) -> Option<GlyphId> {
        if let Some(index) = self.selected.get() {
            if let Some(glyph) = self.program.glyph_index(index, code) {
                return Some(glyph);
            }
        }

        if symbolic {
            for id in [CharmapId::MS_SYMBOL, CharmapId::APPLE_ROMAN] {
                if let Some(index) = self.program.find_charmap(id) {
                    if let Some(glyph) = self.program.glyph_index(index, code) {
                        return Some(glyph);
                    }
                }
            }
        }

        if self.mode == ResolverMode::Extended {
            let charmaps = self.program.charmaps();
            for (index, id) in charmaps.iter().enumerate() {
                if Some(index) == self.selected.get() {
                    continue;
                }
                let Some(code) = code_for_charmap(*id, code) else {
                    continue;
                };
                if let Some(glyph) = self.program.glyph_index(index, code) {
                    log::debug!("GlyphIndexResolver: selecting charmap {id:?}");
                    self.selected.set(Some(index));
                    return Some(glyph);
                }
            }
        }

        None
    }
}

impl fmt::Debug for GlyphIndexResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphIndexResolver")
            .field("selected", &self.selected())
            .field("mode", &self.mode)
            .finish()
    }
}

/// Translate a Unicode value to the code space of a character map
fn code_for_charmap(id: CharmapId, unicode: u32) -> Option<u32> {
    if id.is_unicode() {
        return Some(unicode);
    }
    match (id.platform, id.encoding) {
        (1, 0) if unicode >= 0x80 => {
            let ch = char::from_u32(unicode)?;
            BaseEncoding::MacRoman.char_code(ch).map(u32::from)
        }
        (3, 0) if unicode <= 0xFF => Some(0xF000 | unicode),
        _ => Some(unicode),
    }
}
