//! Nickname, channel name and argument validation.
//!
//! # Protocol-Level Control Characters
//!
//! NUL, CR and LF terminate or delimit IRC lines and can never appear inside
//! an argument. [`is_valid_argument`] checks for them.
//!
//! # Names
//!
//! - Channel names start with one of the server's channel types (`#&+!` by
//!   default, ISUPPORT `CHANTYPES`), are at most 50 characters (ISUPPORT
//!   `CHANNELLEN`) and contain no space, comma, BEL or NUL.
//! - Nicknames follow the RFC 2812 grammar in strict mode. Outside strict
//!   mode anything that is not a channel or a full hostmask and contains no
//!   space or `!` is accepted, since networks routinely hand out nicks such
//!   as `services@something.undernet.net`.

use crate::error::ValidationError;
use crate::hostmask::is_user_hostmask;

/// Control characters that are never valid in IRC arguments.
pub const PROTOCOL_CONTROL_CHARS: &[char] = &[
    '\x00', // NUL - terminates strings
    '\x0D', // CR - line delimiter
    '\x0A', // LF - line delimiter
];

/// Channel types assumed when the server advertises none.
pub const DEFAULT_CHANTYPES: &str = "#&+!";

/// Channel name length assumed when the server advertises none.
pub const DEFAULT_CHANNEL_LEN: usize = 50;

/// Characters that are invalid in channel names per RFC 2812.
const INVALID_CHAN_CHARS: &[char] = &[' ', ',', '\x07', '\x00'];

/// Whether `s` can be sent as a single IRC argument.
///
/// Formatting codes are fine; NUL, CR and LF are not.
///
/// ```
/// use slirc_utils::validation::is_valid_argument;
///
/// assert!(is_valid_argument("\x02bold\x02"));
/// assert!(!is_valid_argument("two\r\nlines"));
/// ```
#[inline]
pub fn is_valid_argument(s: &str) -> bool {
    !s.contains(PROTOCOL_CONTROL_CHARS)
}

/// Validate a channel name against explicit channel types and length limit.
pub fn validate_channel_name(
    name: &str,
    chantypes: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(ValidationError::Empty)?;

    let len = name.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            max: max_len,
            actual: len,
        });
    }

    if !chantypes.contains(first) {
        return Err(ValidationError::MissingPrefix);
    }

    for (i, c) in chars.enumerate() {
        if INVALID_CHAN_CHARS.contains(&c) {
            return Err(ValidationError::InvalidChar {
                ch: c,
                position: i + 1,
            });
        }
    }

    Ok(())
}

/// Whether `s` is a channel name under the default channel types and length.
///
/// A bare prefix such as `#` is a channel.
///
/// ```
/// use slirc_utils::validation::is_channel;
///
/// assert!(is_channel("#rust"));
/// assert!(is_channel("&"));
/// assert!(!is_channel("rust"));
/// assert!(!is_channel("#foo,bar"));
/// ```
#[inline]
pub fn is_channel(s: &str) -> bool {
    is_channel_with(s, DEFAULT_CHANTYPES, DEFAULT_CHANNEL_LEN)
}

/// Whether `s` is a channel name under server-provided `CHANTYPES` and
/// `CHANNELLEN` values.
#[inline]
pub fn is_channel_with(s: &str, chantypes: &str, max_len: usize) -> bool {
    validate_channel_name(s, chantypes, max_len).is_ok()
}

/// Validate a nickname against the RFC 2812 grammar.
///
/// The first character must be a letter or one of ``[]\`_^{|}``; the rest
/// may also be digits or `-`.
pub fn validate_nickname(nick: &str) -> Result<(), ValidationError> {
    let mut chars = nick.chars();
    let first = chars.next().ok_or(ValidationError::Empty)?;

    if !is_valid_nick_first_char(first) {
        return Err(ValidationError::InvalidFirstChar { ch: first });
    }

    for (i, c) in chars.enumerate() {
        if !is_valid_nick_char(c) {
            return Err(ValidationError::InvalidChar {
                ch: c,
                position: i + 1,
            });
        }
    }

    Ok(())
}

/// Whether `s` is a nickname.
///
/// ```
/// use slirc_utils::validation::is_nick;
///
/// assert!(is_nick("[jemfinch]", true));
/// assert!(!is_nick("8foo", true));
/// assert!(is_nick("services@something.undernet.net", false));
/// assert!(!is_nick("foo bar", false));
/// ```
pub fn is_nick(s: &str, strict: bool) -> bool {
    if strict {
        validate_nickname(s).is_ok()
    } else {
        !s.is_empty()
            && !s.contains([' ', '!'])
            && !is_channel(s)
            && !is_user_hostmask(s)
    }
}

/// Check if a character is valid as the first character of a nickname.
#[inline]
pub fn is_valid_nick_first_char(c: char) -> bool {
    c.is_ascii_alphabetic() || is_nick_special_char(c)
}

/// Check if a character is valid in a nickname after the first one.
#[inline]
pub fn is_valid_nick_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_nick_special_char(c) || c == '-'
}

/// Special chars per RFC 2812: ``[ ] \ ` _ ^ { | }``
/// (0x5B-0x60 and 0x7B-0x7D).
#[inline]
pub fn is_nick_special_char(c: char) -> bool {
    let code = c as u32;
    (0x5B..=0x60).contains(&code) || (0x7B..=0x7D).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_argument() {
        assert!(is_valid_argument("I have been running for 9 seconds"));
        assert!(is_valid_argument("\x0313,07colored\x03"));
        assert!(is_valid_argument(""));
        assert!(!is_valid_argument("nul\x00"));
        assert!(!is_valid_argument("cr\r"));
        assert!(!is_valid_argument("lf\n"));
    }

    #[test]
    fn test_is_channel() {
        for name in ["#", "&", "+", "!", "#foo", "&foo", "+foo", "!foo"] {
            assert!(is_channel(name), "{:?} should be a channel", name);
        }
        for name in ["#foo bar", "#foo,bar", "#foobar\x07", "foo", ""] {
            assert!(!is_channel(name), "{:?} should not be a channel", name);
        }
    }

    #[test]
    fn test_is_channel_with() {
        assert!(is_channel_with("#rust", "#", 5));
        assert!(!is_channel_with("&rust", "#", 5));
        assert!(!is_channel_with("#rusty", "#", 5));
        assert!(!is_channel(&format!("#{}", "a".repeat(50))));
    }

    #[test]
    fn test_validate_channel_name() {
        assert_eq!(
            validate_channel_name("", DEFAULT_CHANTYPES, 50),
            Err(ValidationError::Empty)
        );
        assert_eq!(
            validate_channel_name("rust", DEFAULT_CHANTYPES, 50),
            Err(ValidationError::MissingPrefix)
        );
        assert_eq!(
            validate_channel_name("#a b", DEFAULT_CHANTYPES, 50),
            Err(ValidationError::InvalidChar { ch: ' ', position: 2 })
        );
    }

    #[test]
    fn test_is_nick_strict() {
        for nick in [
            "jemfinch", "jemfinch0", "[0]", "{jemfinch}", "[jemfinch]", "jem|finch", "\\```", "`",
            "A",
        ] {
            assert!(is_nick(nick, true), "{:?} should be a nick", nick);
        }
        for nick in ["", "8foo", "10", "-", "-foo", "foo bar"] {
            assert!(!is_nick(nick, true), "{:?} should not be a nick", nick);
        }
    }

    #[test]
    fn test_is_nick_lenient() {
        assert!(is_nick("services@something.undernet.net", false));
        assert!(is_nick("8foo", false));
        assert!(!is_nick("foo bar", false));
        assert!(!is_nick("", false));
        assert!(!is_nick("#channel", false));
        assert!(!is_nick("nick!user@host", false));
        assert!(!is_nick("nick!", false));
    }

    #[test]
    fn test_validate_nickname_errors() {
        assert_eq!(validate_nickname(""), Err(ValidationError::Empty));
        assert_eq!(
            validate_nickname("9lives"),
            Err(ValidationError::InvalidFirstChar { ch: '9' })
        );
        assert_eq!(
            validate_nickname("nick name"),
            Err(ValidationError::InvalidChar { ch: ' ', position: 4 })
        );
    }

    #[test]
    fn test_nick_special_chars() {
        for c in ['[', ']', '\\', '`', '_', '^', '{', '|', '}'] {
            assert!(is_nick_special_char(c));
        }
        assert!(!is_nick_special_char('-'));
        assert!(!is_nick_special_char('~'));
    }
}
