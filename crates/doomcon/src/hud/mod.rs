//! HUD text lines.
//!
//! HUD strings carry inline color changes: an `ESC` byte followed by `'0' + color index`.
//! [`to_ansi`] rewrites them for a terminal, [`strip_colors`] drops them.

pub mod intermission;
pub mod stat_totals;
pub mod weapon_text;

pub const ESC: char = '\x1b';

/// Font translation tables, in the engine's order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Brick,
    Tan,
    Gray,
    Green,
    Brown,
    Gold,
    Red,
    Blue,
    Orange,
    Yellow,
    LightBlue,
    Black,
    Purple,
    White,
}

impl Color {
    pub const ALL: &'static [Color] = &[
        Color::Brick,
        Color::Tan,
        Color::Gray,
        Color::Green,
        Color::Brown,
        Color::Gold,
        Color::Red,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::LightBlue,
        Color::Black,
        Color::Purple,
        Color::White,
    ];

    /// The character that follows `ESC`.
    pub fn code(self) -> char {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        char::from(b'0' + idx as u8)
    }

    pub fn from_code(c: char) -> Option<Self> {
        let idx = (c as u32).checked_sub('0' as u32)?;
        Self::ALL.get(usize::try_from(idx).ok()?).copied()
    }

    pub fn ansi(self) -> &'static str {
        match self {
            Color::Brick => "\x1b[31m",
            Color::Tan => "\x1b[93m",
            Color::Gray => "\x1b[37m",
            Color::Green => "\x1b[32m",
            Color::Brown => "\x1b[33m",
            Color::Gold => "\x1b[93m",
            Color::Red => "\x1b[91m",
            Color::Blue => "\x1b[34m",
            Color::Orange => "\x1b[33m",
            Color::Yellow => "\x1b[93m",
            Color::LightBlue => "\x1b[94m",
            Color::Black => "\x1b[90m",
            Color::Purple => "\x1b[35m",
            Color::White => "\x1b[97m",
        }
    }
}

pub fn push_color(out: &mut String, color: Color) {
    out.push(ESC);
    out.push(color.code());
}

fn rewrite(text: &str, mut on_color: impl FnMut(&mut String, Option<Color>)) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != ESC {
            out.push(c);
            continue;
        }
        let color = chars.next().and_then(Color::from_code);
        on_color(&mut out, color);
    }
    out
}

/// Plain text with every color change removed.
pub fn strip_colors(text: &str) -> String {
    rewrite(text, |_, _| {})
}

/// Terminal rendering; unknown color codes are dropped.
pub fn to_ansi(text: &str) -> String {
    let mut out = rewrite(text, |out, color| {
        if let Some(color) = color {
            out.push_str(color.ansi());
        }
    });
    out.push_str("\x1b[0m");
    out
}
