//! IRC case-mapping functions.
//!
//! IRC uses a special case-insensitive comparison where some characters
//! are considered equivalent (e.g., `[` and `{`). This implements the
//! `rfc1459` case mapping which is the most common.

/// Convert a single character to IRC lowercase using RFC 1459 case mapping.
///
/// In addition to ASCII lowercase conversion, this maps:
/// - `[` → `{`
/// - `]` → `}`
/// - `\` → `|`
/// - `~` → `^`
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
///
/// Every other character passes through unchanged, so the result has the
/// same byte length as the input.
///
/// ```
/// use slirc_utils::irc_to_lower;
///
/// assert_eq!(irc_to_lower("JemFinch"), "jemfinch");
/// assert_eq!(irc_to_lower("[]\\~"), "{}|^");
/// ```
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}

/// Compare two strings using IRC case-insensitive comparison.
///
/// Equivalent to `irc_to_lower(a) == irc_to_lower(b)` without allocating.
pub fn irc_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.chars()
        .zip(b.chars())
        .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}

/// Returns `true` if the string is already in casemapped form.
#[inline]
pub fn is_irc_lower(s: &str) -> bool {
    s.chars().all(|c| irc_lower_char(c) == c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irc_lower_char() {
        assert_eq!(irc_lower_char('A'), 'a');
        assert_eq!(irc_lower_char('Z'), 'z');

        assert_eq!(irc_lower_char('['), '{');
        assert_eq!(irc_lower_char(']'), '}');
        assert_eq!(irc_lower_char('\\'), '|');
        assert_eq!(irc_lower_char('~'), '^');

        assert_eq!(irc_lower_char('a'), 'a');
        assert_eq!(irc_lower_char('#'), '#');
        assert_eq!(irc_lower_char('É'), 'É');
    }

    #[test]
    fn test_irc_to_lower() {
        assert_eq!(irc_to_lower("jemfinch"), "jemfinch");
        assert_eq!(irc_to_lower("[]\\~"), "{}|^");
        assert_eq!(irc_to_lower("#Channel[1]"), "#channel{1}");
        assert_eq!(irc_to_lower(""), "");
    }

    #[test]
    fn test_irc_to_lower_idempotent() {
        for s in ["JEMFINCH[]", "Nick\\Away~", "#ÜBER", "{}|^"] {
            let once = irc_to_lower(s);
            assert_eq!(irc_to_lower(&once), once);
            assert!(is_irc_lower(&once));
        }
    }

    #[test]
    fn test_irc_eq() {
        assert!(irc_eq("hello", "HELLO"));
        assert!(irc_eq("#channel[1]", "#CHANNEL{1}"));
        assert!(irc_eq("nick\\test~", "NICK|TEST^"));

        assert!(!irc_eq("hello", "world"));
        assert!(!irc_eq("short", "longer"));
        assert!(!irc_eq("a^", "a_"));
    }
}
