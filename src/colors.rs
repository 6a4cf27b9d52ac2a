//! IRC formatting code handling.
//!
//! Helpers for wrapping text in formatting codes and for stripping them.
//!
//! # IRC Format Codes
//! - 0x02 (^B): Bold
//! - 0x03 (^C): Color (followed by optional foreground,background)
//! - 0x0F (^O): Reset all formatting
//! - 0x11: Monospace
//! - 0x16 (^V): Reverse/Inverse
//! - 0x1D: Italic
//! - 0x1F (^_): Underline

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{opt, recognize},
    sequence::{pair, preceded},
    IResult,
};

use crate::error::ColorError;

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const RESET: char = '\x0F';
const MONOSPACE: char = '\x11';
const REVERSE: char = '\x16';
const ITALIC: char = '\x1D';
const UNDERLINE: char = '\x1F';

/// Non-color format characters removed by [`strip_formatting`].
const FORMAT_CHARS: &[char] = &[BOLD, RESET, MONOSPACE, REVERSE, ITALIC, UNDERLINE];

/// The 16 standard mIRC colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
    Blue = 2,
    Green = 3,
    Red = 4,
    Brown = 5,
    Purple = 6,
    Orange = 7,
    Yellow = 8,
    LightGreen = 9,
    Teal = 10,
    LightBlue = 11,
    DarkBlue = 12,
    Pink = 13,
    DarkGrey = 14,
    LightGrey = 15,
}

const COLORS: [Color; 16] = [
    Color::White,
    Color::Black,
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Brown,
    Color::Purple,
    Color::Orange,
    Color::Yellow,
    Color::LightGreen,
    Color::Teal,
    Color::LightBlue,
    Color::DarkBlue,
    Color::Pink,
    Color::DarkGrey,
    Color::LightGrey,
];

impl Color {
    /// The numeric mIRC code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look a color up by its mIRC code.
    pub fn from_code(code: u8) -> Option<Self> {
        COLORS.get(usize::from(code)).copied()
    }

    /// Lower-case name, e.g. `light green`.
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
            Color::Brown => "brown",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::LightGreen => "light green",
            Color::Teal => "teal",
            Color::LightBlue => "light blue",
            Color::DarkBlue => "dark blue",
            Color::Pink => "pink",
            Color::DarkGrey => "dark grey",
            Color::LightGrey => "light grey",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Case-insensitive; `light green`, `light_green`, `lightgreen` and the
    /// `gray` spelling are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
            .replace("gray", "grey");

        COLORS
            .iter()
            .copied()
            .find(|color| color.name().replace(' ', "") == key)
            .ok_or_else(|| ColorError::UnknownColor(s.to_string()))
    }
}

fn wrap(s: &str, code: char) -> String {
    format!("{code}{s}{code}")
}

/// Wrap `s` in bold codes.
pub fn bold(s: &str) -> String {
    wrap(s, BOLD)
}

/// Wrap `s` in underline codes.
pub fn underline(s: &str) -> String {
    wrap(s, UNDERLINE)
}

/// Wrap `s` in reverse-video codes.
pub fn reverse(s: &str) -> String {
    wrap(s, REVERSE)
}

/// Color `s` with an optional foreground and background.
///
/// ```
/// use slirc_utils::colors::{mirc_color, Color};
///
/// assert_eq!(mirc_color("foo", Some(Color::Red), None), "\x0304foo\x03");
/// assert_eq!(mirc_color("foo", None, Some(Color::Brown)), "\x0300,05foo\x03");
/// assert_eq!(mirc_color("foo", Some(Color::Black), Some(Color::Blue)), "\x031,02foo\x03");
/// assert_eq!(mirc_color("foo", None, None), "foo");
/// ```
pub fn mirc_color(s: &str, fg: Option<Color>, bg: Option<Color>) -> String {
    match (fg, bg) {
        (None, None) => s.to_string(),
        (Some(fg), None) => format!("{COLOR}{:02}{s}{COLOR}", fg.code()),
        (None, Some(bg)) => format!("{COLOR}00,{:02}{s}{COLOR}", bg.code()),
        (Some(fg), Some(bg)) => format!("{COLOR}{},{:02}{s}{COLOR}", fg.code(), bg.code()),
    }
}

fn color_digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, 2, |c: char| c.is_ascii_digit())(input)
}

/// `^C` followed by `NN,NN`, `NN`, `,NN` or nothing, digit groups being one
/// or two digits long.
fn color_code(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        char(COLOR),
        opt(alt((
            recognize(pair(color_digits, opt(preceded(char(','), color_digits)))),
            recognize(preceded(char(','), color_digits)),
        ))),
    ))(input)
}

/// Remove mIRC color codes, leaving other formatting in place.
///
/// ```
/// use slirc_utils::colors::strip_color;
///
/// assert_eq!(strip_color("\x02bold\x0302,04foo\x03bar\x0f"), "\x02boldfoobar\x0f");
/// assert_eq!(strip_color("\x03,foo\x03"), ",foo");
/// ```
pub fn strip_color(s: &str) -> Cow<'_, str> {
    if !s.contains(COLOR) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(idx) = rest.find(COLOR) {
        out.push_str(&rest[..idx]);
        rest = match color_code(&rest[idx..]) {
            Ok((after, _)) => after,
            // color_code always accepts a leading ^C
            Err(_) => &rest[idx + COLOR.len_utf8()..],
        };
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn strip_char(s: &str, code: char) -> Cow<'_, str> {
    if s.contains(code) {
        Cow::Owned(s.replace(code, ""))
    } else {
        Cow::Borrowed(s)
    }
}

/// Remove bold codes.
pub fn strip_bold(s: &str) -> Cow<'_, str> {
    strip_char(s, BOLD)
}

/// Remove underline codes.
pub fn strip_underline(s: &str) -> Cow<'_, str> {
    strip_char(s, UNDERLINE)
}

/// Remove reverse-video codes.
pub fn strip_reverse(s: &str) -> Cow<'_, str> {
    strip_char(s, REVERSE)
}

/// Whether `s` contains any formatting code.
pub fn is_formatted(s: &str) -> bool {
    s.contains(FORMAT_CHARS) || s.contains(COLOR)
}

/// Remove every formatting code: colors, bold, underline, reverse, italic,
/// monospace and reset.
///
/// Returns `Cow::Borrowed` if no formatting was present.
pub fn strip_formatting(s: &str) -> Cow<'_, str> {
    if !is_formatted(s) {
        return Cow::Borrowed(s);
    }
    let mut out = strip_color(s).into_owned();
    out.retain(|c| !FORMAT_CHARS.contains(&c));
    Cow::Owned(out)
}

/// Extension trait for handling formatted IRC strings.
pub trait FormattedStringExt {
    /// Check if the string contains any IRC formatting codes.
    fn is_formatted(&self) -> bool;

    /// Strip all IRC formatting codes from the string.
    fn strip_formatting(&self) -> Cow<'_, str>;
}

impl FormattedStringExt for str {
    fn is_formatted(&self) -> bool {
        is_formatted(self)
    }

    fn strip_formatting(&self) -> Cow<'_, str> {
        strip_formatting(self)
    }
}

impl FormattedStringExt for String {
    fn is_formatted(&self) -> bool {
        is_formatted(self)
    }

    fn strip_formatting(&self) -> Cow<'_, str> {
        strip_formatting(self)
    }
}
