//! Hostmask parsing and wildcard matching.
//!
//! A user hostmask has the form `nick!user@host`. Patterns use `*` for any
//! run of zero or more characters and `?` for exactly one character, and are
//! matched against the IRC-casemapped forms of both sides.

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::all_consuming,
    error::{context, VerboseError},
    sequence::{preceded, tuple},
    IResult,
};

use crate::casemap::{irc_lower_char, irc_to_lower};
use crate::error::HostmaskError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// A borrowed `nick!user@host` split into its parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hostmask<'a> {
    /// Nickname part.
    pub nick: &'a str,
    /// Username (ident) part.
    pub user: &'a str,
    /// Host part.
    pub host: &'a str,
}

impl<'a> Hostmask<'a> {
    /// Split a hostmask. See [`split_hostmask`].
    pub fn parse(s: &'a str) -> Result<Self, HostmaskError> {
        split_hostmask(s)
    }
}

impl fmt::Display for Hostmask<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// One non-empty hostmask component; never contains a separator.
fn parse_part(input: &str) -> ParseResult<&str, &str> {
    take_while1(|c| c != '!' && c != '@')(input)
}

fn parse_hostmask(input: &str) -> ParseResult<&str, Hostmask<'_>> {
    let (rest, (nick, user, host)) = context(
        "parsing hostmask",
        all_consuming(tuple((
            context("parsing nick", parse_part),
            context("parsing user", preceded(char('!'), parse_part)),
            context("parsing host", preceded(char('@'), parse_part)),
        ))),
    )(input)?;
    Ok((rest, Hostmask { nick, user, host }))
}

/// Split `nick!user@host` into its three parts.
///
/// All parts must be non-empty and the string must contain exactly one `!`
/// followed later by exactly one `@`.
///
/// ```
/// use slirc_utils::hostmask::split_hostmask;
///
/// let h = split_hostmask("nick!user@host.domain.tld").unwrap();
/// assert_eq!((h.nick, h.user, h.host), ("nick", "user", "host.domain.tld"));
/// assert!(split_hostmask("nick!@host").is_err());
/// ```
pub fn split_hostmask(s: &str) -> Result<Hostmask<'_>, HostmaskError> {
    parse_hostmask(s)
        .map(|(_, mask)| mask)
        .map_err(|_| HostmaskError::Invalid(s.to_string()))
}

/// Returns `true` if `s` is a well-formed `nick!user@host`.
///
/// Never fails; empty and malformed input yield `false`.
pub fn is_user_hostmask(s: &str) -> bool {
    parse_hostmask(s).is_ok()
}

/// The nick part of a hostmask.
pub fn nick_from_hostmask(s: &str) -> Result<&str, HostmaskError> {
    split_hostmask(s).map(|h| h.nick)
}

/// The user part of a hostmask.
pub fn user_from_hostmask(s: &str) -> Result<&str, HostmaskError> {
    split_hostmask(s).map(|h| h.user)
}

/// The host part of a hostmask.
pub fn host_from_hostmask(s: &str) -> Result<&str, HostmaskError> {
    split_hostmask(s).map(|h| h.host)
}

/// Build `nick!user@host` from its parts.
pub fn join_hostmask(nick: &str, user: &str, host: &str) -> String {
    format!("{}!{}@{}", nick, user, host)
}

/// Test whether `mask` matches the wildcard `pattern`.
///
/// Both sides are casemapped before comparison. Every valid hostmask
/// matches itself, and every hostmask matches its
/// [`banmask`](crate::banmask::banmask).
///
/// ```
/// use slirc_utils::hostmask_pattern_equal;
///
/// assert!(hostmask_pattern_equal("*!*@*.example.com", "Nick!~user@Host.EXAMPLE.com"));
/// assert!(hostmask_pattern_equal("nick[away]!*@*", "NICK{away}!u@h"));
/// assert!(!hostmask_pattern_equal("*!*@example.com", "n!u@sub.example.com"));
/// ```
pub fn hostmask_pattern_equal(pattern: &str, mask: &str) -> bool {
    HostmaskPattern::new(pattern).matches(mask)
}

/// A wildcard pattern compiled for repeated matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostmaskPattern {
    source: String,
    folded: Vec<char>,
}

impl HostmaskPattern {
    /// Compile a pattern. Any string is a valid pattern.
    pub fn new(pattern: &str) -> Self {
        HostmaskPattern {
            source: pattern.to_string(),
            folded: pattern.chars().map(irc_lower_char).collect(),
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the pattern contains no wildcards.
    pub fn is_literal(&self) -> bool {
        !self.folded.iter().any(|c| matches!(c, '*' | '?'))
    }

    /// Test a string against the pattern.
    pub fn matches(&self, subject: &str) -> bool {
        if self.is_literal() {
            return irc_to_lower(subject).chars().eq(self.folded.iter().copied());
        }
        let subject: Vec<char> = subject.chars().map(irc_lower_char).collect();
        glob_match(&self.folded, &subject)
    }
}

impl fmt::Display for HostmaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for HostmaskPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HostmaskPattern::new(s))
    }
}

/// Two-pointer glob matcher with single-star backtracking.
///
/// On a mismatch the most recent `*` absorbs one more subject character and
/// matching resumes after it; earlier stars never need revisiting.
fn glob_match(pattern: &[char], subject: &[char]) -> bool {
    let (mut p, mut s) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while s < subject.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some(p);
                resume = s;
                p += 1;
            }
            Some(&c) if c == '?' || c == subject[s] => {
                p += 1;
                s += 1;
            }
            _ => match star {
                Some(sp) => {
                    p = sp + 1;
                    resume += 1;
                    s = resume;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
