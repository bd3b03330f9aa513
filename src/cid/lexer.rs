// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tokenizer for CMap and ToUnicode streams

use smallvec::SmallVec;

/// A token of PostScript-like CMap syntax
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    Integer(i64),
    Real(f64),
    /// Decoded bytes of a hexadecimal string `<...>`
    HexString(SmallVec<[u8; 4]>),
    /// Raw content of a literal string `(...)`, escapes not decoded
    LiteralString(&'a [u8]),
    /// A name, without the leading `/`
    Name(&'a str),
    /// Any other bare word, e.g. `begincidrange`
    Keyword(&'a str),
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
}

impl<'a> Token<'a> {
    /// Interpret as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Token::Integer(i) => Some(*i),
            Token::Real(r) => Some(r.round() as i64),
            _ => None,
        }
    }

    /// Interpret a hex string as a big-endian code
    pub fn as_code(&self) -> Option<(u32, u8)> {
        match self {
            Token::HexString(bytes) if !bytes.is_empty() && bytes.len() <= 4 => {
                let code = bytes.iter().fold(0u32, |acc, b| acc << 8 | u32::from(*b));
                Some((code, bytes.len() as u8))
            }
            _ => None,
        }
    }
}

/// Iterator over the tokens of a byte stream
///
/// Malformed input never causes an error: unrecognised bytes are skipped.
pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Construct over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Lexer { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while let Some(b) = self.peek() {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_whitespace(b) || is_delimiter(b) {
                break;
            }
            self.pos += 1;
        }
        // Non-UTF-8 words are dropped
        std::str::from_utf8(&self.data[start..self.pos]).unwrap_or("")
    }

    fn hex_string(&mut self) -> Token<'a> {
        let mut bytes = SmallVec::new();
        let mut high: Option<u8> = None;
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'>' {
                break;
            }
            let Some(nibble) = (b as char).to_digit(16) else {
                continue;
            };
            let nibble = nibble as u8;
            match high.take() {
                Some(h) => bytes.push(h << 4 | nibble),
                None => high = Some(nibble),
            }
        }
        if let Some(h) = high {
            bytes.push(h << 4);
        }
        Token::HexString(bytes)
    }

    fn literal_string(&mut self) -> Token<'a> {
        let start = self.pos;
        let mut depth = 1;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'\\' => self.pos += 1,
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.pos - 1;
                        return Token::LiteralString(&self.data[start..end]);
                    }
                }
                _ => (),
            }
        }
        let end = self.pos.min(self.data.len());
        Token::LiteralString(&self.data[start..end])
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            self.skip_whitespace();
            let b = self.peek()?;
            match b {
                b'[' => {
                    self.pos += 1;
                    return Some(Token::ArrayStart);
                }
                b']' => {
                    self.pos += 1;
                    return Some(Token::ArrayEnd);
                }
                b'<' if self.data.get(self.pos + 1) == Some(&b'<') => {
                    self.pos += 2;
                    return Some(Token::DictStart);
                }
                b'>' if self.data.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    return Some(Token::DictEnd);
                }
                b'<' => {
                    self.pos += 1;
                    return Some(self.hex_string());
                }
                b'(' => {
                    self.pos += 1;
                    return Some(self.literal_string());
                }
                b'/' => {
                    self.pos += 1;
                    return Some(Token::Name(self.word()));
                }
                b'{' | b'}' | b')' | b'>' => {
                    self.pos += 1;
                }
                _ => {
                    let word = self.word();
                    if word.is_empty() {
                        self.pos += 1;
                        continue;
                    }
                    if let Ok(i) = word.parse::<i64>() {
                        return Some(Token::Integer(i));
                    }
                    if let Ok(r) = word.parse::<f64>() {
                        return Some(Token::Real(r));
                    }
                    return Some(Token::Keyword(word));
                }
            }
        }
    }
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\0' | b'\x0C')
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}
