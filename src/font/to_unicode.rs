// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! ToUnicode maps

use super::encoding::unicode_from_name;
use crate::cid::lexer::{Lexer, Token};
use crate::cid::uncovered;
use crate::conv::{to_u32, to_usize};

#[derive(Clone, Debug, PartialEq)]
enum Target {
    /// The first code maps here; subsequent codes increment the last char
    Base(String),
    /// One string per code
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    low: u32,
    high: u32,
    target: Target,
}

impl Entry {
    fn lookup(&self, code: u32) -> Option<String> {
        let offset = code - self.low;
        match &self.target {
            Target::Base(base) if offset == 0 => Some(base.clone()),
            Target::Base(base) => {
                let mut s = base.clone();
                let last = s.pop()?;
                s.push(char::from_u32(u32::from(last) + offset)?);
                Some(s)
            }
            Target::List(list) => list.get(to_usize(offset)).cloned(),
        }
    }

    // The sub-entry covering `low..=high`
    fn part(&self, low: u32, high: u32) -> Option<Entry> {
        let target = match &self.target {
            Target::Base(_) => Target::Base(self.lookup(low)?),
            Target::List(list) => Target::List(
                list.iter()
                    .skip(to_usize(low - self.low))
                    .take(to_usize(high - low) + 1)
                    .cloned()
                    .collect(),
            ),
        };
        Some(Entry { low, high, target })
    }

    fn reverse(&self, ch: char) -> Option<u32> {
        match &self.target {
            Target::Base(base) => {
                let mut chars = base.chars();
                let first = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                let diff = u32::from(ch).checked_sub(u32::from(first))?;
                (diff <= self.high - self.low).then_some(self.low + diff)
            }
            Target::List(list) => {
                let mut buf = [0; 4];
                let s: &str = ch.encode_utf8(&mut buf);
                let i = list.iter().position(|t| t == s)?;
                Some(self.low + to_u32(i))
            }
        }
    }
}

/// A code-to-Unicode map from a `ToUnicode` stream
///
/// Entries are sorted by code. Where entries overlap, the first declared
/// wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToUnicodeMap {
    entries: Vec<Entry>,
}

impl ToUnicodeMap {
    /// Parse a `ToUnicode` stream
    ///
    /// Malformed entries are skipped. The result may be empty.
    pub fn parse(data: &[u8]) -> Self {
        let mut entries = Vec::new();
        let mut tokens = Lexer::new(data);
        let mut skipped = 0;

        while let Some(token) = tokens.next() {
            match token {
                Token::Keyword("beginbfchar") => loop {
                    let Some(src) = tokens.next() else { break };
                    if src == Token::Keyword("endbfchar") {
                        break;
                    }
                    let dst = tokens.next().and_then(|t| target_string(&t));
                    match (src.as_code(), dst) {
                        (Some((code, _)), Some(s)) => entries.push(Entry {
                            low: code,
                            high: code,
                            target: Target::Base(s),
                        }),
                        _ => skipped += 1,
                    }
                },
                Token::Keyword("beginbfrange") => loop {
                    let Some(low) = tokens.next() else { break };
                    if low == Token::Keyword("endbfrange") {
                        break;
                    }
                    let high = tokens.next();
                    let target = read_target(&mut tokens);
                    match (low.as_code(), high.and_then(|t| t.as_code()), target) {
                        (Some((low, _)), Some((high, _)), Some(target)) if low <= high => {
                            entries.push(Entry { low, high, target })
                        }
                        _ => skipped += 1,
                    }
                },
                _ => (),
            }
        }

        if skipped > 0 {
            log::warn!("ToUnicodeMap::parse: skipped {skipped} malformed entries");
        }

        let mut out: Vec<Entry> = Vec::with_capacity(entries.len());
        for entry in entries {
            for (low, high) in uncovered(&out, |e| (e.low, e.high), entry.low, entry.high) {
                if let Some(part) = entry.part(low, high) {
                    let at = out.partition_point(|e| e.low < low);
                    out.insert(at, part);
                }
            }
        }
        ToUnicodeMap { entries: out }
    }

    /// True if the map has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the string for a code
    pub fn lookup(&self, code: u32) -> Option<String> {
        let i = self.entries.partition_point(|e| e.high < code);
        let entry = self.entries.get(i).filter(|e| e.low <= code)?;
        entry.lookup(code)
    }

    /// Find the first code mapping to `ch`
    pub fn reverse_lookup(&self, ch: char) -> Option<u32> {
        self.entries.iter().find_map(|e| e.reverse(ch))
    }
}

fn read_target<'a>(tokens: &mut impl Iterator<Item = Token<'a>>) -> Option<Target> {
    match tokens.next()? {
        Token::ArrayStart => {
            let mut list = Vec::new();
            for token in tokens.by_ref() {
                if token == Token::ArrayEnd {
                    break;
                }
                list.push(target_string(&token).unwrap_or_default());
            }
            Some(Target::List(list))
        }
        token => target_string(&token).map(Target::Base),
    }
}

fn target_string(token: &Token) -> Option<String> {
    match token {
        Token::HexString(bytes) => decode_utf16(bytes),
        Token::Name(name) => unicode_from_name(name).map(String::from),
        _ => None,
    }
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    if bytes.len() == 1 {
        return Some(char::from(bytes[0]).to_string());
    }
    let units = bytes
        .chunks(2)
        .map(|c| u16::from(c[0]) << 8 | c.get(1).copied().map(u16::from).unwrap_or(0));
    let s: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
