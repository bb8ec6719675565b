//! Formatted scanning of console arguments.
//!
//! Handlers pull values off the front of their argument string one at a time, the way a
//! `scanf` format would: integers and tokens skip leading whitespace, literal characters do
//! not, and anything left after the last requested value is ignored.

use crate::player::FRACUNIT;

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Signed integer in decimal or `0x` hexadecimal. Leaves the input untouched on failure.
    pub fn int(&mut self) -> Option<i32> {
        let start = *self;
        self.skip_ws();

        let mut s = self.rest;
        let negative = match s.as_bytes().first() {
            Some(b'-') => {
                s = &s[1..];
                true
            }
            Some(b'+') => {
                s = &s[1..];
                false
            }
            _ => false,
        };

        let (radix, digits) = match s.get(..2) {
            Some("0x") | Some("0X")
                if s.as_bytes().get(2).is_some_and(|b| b.is_ascii_hexdigit()) =>
            {
                (16, &s[2..])
            }
            _ => (10, s),
        };

        let len = digits
            .bytes()
            .take_while(|b| (*b as char).is_digit(radix))
            .count();
        if len == 0 {
            *self = start;
            return None;
        }

        let magnitude = match i64::from_str_radix(&digits[..len], radix) {
            Ok(v) => v,
            Err(_) => {
                *self = start;
                return None;
            }
        };
        let value = if negative { -magnitude } else { magnitude };
        let Ok(value) = i32::try_from(value) else {
            *self = start;
            return None;
        };

        self.rest = &digits[len..];
        Some(value)
    }

    /// Next whitespace-delimited token.
    pub fn token(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (tok, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(tok)
    }

    /// Consumes `c` if it is the very next character.
    pub fn literal(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// `min:max` pair of integers.
    pub fn range(&mut self) -> Option<(i32, i32)> {
        let start = *self;
        if let Some(lo) = self.int() {
            if self.literal(':') {
                if let Some(hi) = self.int() {
                    return Some((lo, hi));
                }
            }
        }
        *self = start;
        None
    }

    /// Non-empty run of characters up to (not including) the next `;`, after leading whitespace.
    pub fn until_semicolon(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self.rest.find(';').unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }

    /// Map coordinate written as `whole[.raw]`.
    ///
    /// The part after the dot is taken as raw fixed-point units, not as a decimal fraction:
    /// `12.5` is `12 * FRACUNIT + 5`. A leading `-` subtracts the raw part instead.
    pub fn coordinate(&mut self) -> Option<i32> {
        self.skip_ws();
        let negative = self.rest.starts_with('-');
        let whole = self.int()?;
        let raw = if self.literal('.') {
            self.int().unwrap_or(0)
        } else {
            0
        };

        let base = whole.wrapping_mul(FRACUNIT);
        Some(if negative {
            base.wrapping_sub(raw)
        } else {
            base.wrapping_add(raw)
        })
    }
}

/// Splits a console line into its command name and argument string.
///
/// The command is the first whitespace-delimited token; the arguments are whatever follows it
/// (leading whitespace skipped) up to the first `;`. Returns `None` for a blank line.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let mut sc = Scanner::new(line);
    let command = sc.token()?;
    let args = sc.until_semicolon().unwrap_or("");
    Some((command, args))
}
