//! Argument quoting, DCC address conversion and `$variable` substitution.

use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, TimeZone};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{map, value},
    sequence::{delimited, preceded},
    IResult,
};
use tracing::trace;

use crate::error::DccError;
use crate::hostmask::split_hostmask;
use crate::validation::is_valid_argument;

/// Render `v` so it can be sent as a single IRC argument.
///
/// Text that is already a valid argument is returned unchanged; anything
/// containing NUL, CR or LF is returned Debug-quoted with those characters
/// escaped.
///
/// ```
/// use slirc_utils::util::safe_argument;
///
/// assert_eq!(safe_argument("\x02bold\x02"), "\x02bold\x02");
/// assert_eq!(safe_argument(1), "1");
/// assert_eq!(safe_argument("a\r\nb"), "\"a\\r\\nb\"");
/// ```
pub fn safe_argument<T: fmt::Display>(v: T) -> String {
    let s = v.to_string();
    if is_valid_argument(&s) {
        s
    } else {
        format!("{:?}", s)
    }
}

/// Convert a dotted-quad IPv4 address to the decimal form used in DCC
/// requests.
///
/// ```
/// use slirc_utils::util::{dcc_ip, un_dcc_ip};
///
/// assert_eq!(dcc_ip("127.0.0.1").unwrap(), "2130706433");
/// assert_eq!(un_dcc_ip("2130706433").unwrap(), "127.0.0.1");
/// ```
pub fn dcc_ip(ip: &str) -> Result<String, DccError> {
    let addr: Ipv4Addr = ip
        .parse()
        .map_err(|_| DccError::InvalidAddress(ip.to_string()))?;
    Ok(u32::from(addr).to_string())
}

/// Convert a DCC decimal address back to dotted-quad form.
pub fn un_dcc_ip(num: &str) -> Result<String, DccError> {
    let n: u32 = num
        .parse()
        .map_err(|_| DccError::InvalidInteger(num.to_string()))?;
    Ok(Ipv4Addr::from(n).to_string())
}

enum Value<'a> {
    Text(String),
    Lazy(Box<dyn Fn() -> String + 'a>),
}

/// Variables available to [`standard_substitute`].
///
/// Values are either fixed text or closures evaluated each time the variable
/// is referenced.
#[derive(Default)]
pub struct Substitutions<'a> {
    vars: HashMap<String, Value<'a>>,
}

impl<'a> Substitutions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual variables for a message from `hostmask`, optionally on
    /// `channel`, at time `now`:
    ///
    /// | name | value |
    /// |------|-------|
    /// | `who`, `nick` | sender nick (the whole prefix if it is not a user hostmask) |
    /// | `user`, `host` | sender username and host |
    /// | `channel` | the channel, or empty |
    /// | `now` | `%Y-%m-%d %H:%M:%S` |
    /// | `today` | `%Y-%m-%d` |
    /// | `year`, `month`, `day` | numeric date parts |
    /// | `hour`, `minute`, `second` | two-digit time parts |
    pub fn standard<Tz>(hostmask: &str, channel: Option<&str>, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let (nick, user, host) = match split_hostmask(hostmask) {
            Ok(mask) => (mask.nick, mask.user, mask.host),
            Err(_) => (hostmask, "", ""),
        };

        let mut subs = Substitutions::new();
        subs.insert("who", nick);
        subs.insert("nick", nick);
        subs.insert("user", user);
        subs.insert("host", host);
        subs.insert("channel", channel.unwrap_or(""));
        for (name, fmt) in [
            ("now", "%Y-%m-%d %H:%M:%S"),
            ("today", "%Y-%m-%d"),
            ("year", "%Y"),
            ("month", "%m"),
            ("day", "%d"),
            ("hour", "%H"),
            ("minute", "%M"),
            ("second", "%S"),
        ] {
            subs.insert(name, now.format(fmt));
        }
        subs
    }

    /// Bind `name` to the text of `value`.
    pub fn insert(&mut self, name: &str, value: impl fmt::Display) -> &mut Self {
        self.vars
            .insert(name.to_string(), Value::Text(value.to_string()));
        self
    }

    /// Bind `name` to a closure called on every reference.
    pub fn insert_with<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn() -> String + 'a,
    {
        self.vars.insert(name.to_string(), Value::Lazy(Box::new(f)));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// The current value of `name`.
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).map(|v| match v {
            Value::Text(s) => s.clone(),
            Value::Lazy(f) => f(),
        })
    }
}

impl fmt::Debug for Substitutions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Substitutions").field("vars", &names).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placeholder<'a> {
    Dollar,
    Var(&'a str),
}

fn var_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// `$$`, `${name}` or `$name`.
fn placeholder(input: &str) -> IResult<&str, Placeholder<'_>> {
    preceded(
        char('$'),
        alt((
            value(Placeholder::Dollar, char('$')),
            map(delimited(char('{'), var_name, char('}')), Placeholder::Var),
            map(var_name, Placeholder::Var),
        )),
    )(input)
}

/// Replace `$name` and `${name}` in `text` with values from `vars`.
///
/// `$$` produces a literal `$`. Unknown variables and stray `$` signs are
/// left as they are.
///
/// ```
/// use slirc_utils::util::{standard_substitute, Substitutions};
///
/// let mut vars = Substitutions::new();
/// vars.insert("b", "c").insert("i", 100);
/// assert_eq!(standard_substitute("$b:${i} costs $$5 $unknown", &vars), "c:100 costs $5 $unknown");
/// ```
pub fn standard_substitute(text: &str, vars: &Substitutions<'_>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let at = &rest[idx..];
        match placeholder(at) {
            Ok((after, token)) => {
                match token {
                    Placeholder::Dollar => out.push('$'),
                    Placeholder::Var(name) => match vars.get(name) {
                        Some(v) => out.push_str(&v),
                        None => {
                            trace!(name, "leaving unknown substitution variable");
                            out.push_str(&at[..at.len() - after.len()]);
                        }
                    },
                }
                rest = after;
            }
            Err(_) => {
                out.push('$');
                rest = &at[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::cell::Cell;

    #[test]
    fn test_safe_argument() {
        let s = "I have been running for 9 seconds";
        assert_eq!(safe_argument(s), s);
        assert_eq!(safe_argument(crate::colors::bold(s)), crate::colors::bold(s));
        assert_eq!(safe_argument(1), "1");
        assert_eq!(safe_argument("nul\0"), "\"nul\\0\"");
    }

    #[test]
    fn test_dcc_ip() {
        assert_eq!(dcc_ip("0.0.0.0").unwrap(), "0");
        assert_eq!(dcc_ip("255.255.255.255").unwrap(), "4294967295");
        assert_eq!(un_dcc_ip("16909060").unwrap(), "1.2.3.4");
        assert_eq!(
            dcc_ip("1.2.3"),
            Err(DccError::InvalidAddress("1.2.3".to_string()))
        );
        assert_eq!(
            un_dcc_ip("4294967296"),
            Err(DccError::InvalidInteger("4294967296".to_string()))
        );
        assert!(un_dcc_ip("-1").is_err());
    }

    #[test]
    fn test_substitute_variables() {
        let calls = Cell::new(0);
        let mut vars = Substitutions::new();
        vars.insert("foo", "bar")
            .insert("b", "c")
            .insert("i", 100)
            .insert_with("f", || {
                calls.set(calls.get() + 1);
                "called".to_string()
            });

        assert_eq!(standard_substitute("$foo", &vars), "bar");
        assert_eq!(standard_substitute("${foo}", &vars), "bar");
        assert_eq!(standard_substitute("$b", &vars), "c");
        assert_eq!(standard_substitute("${b}", &vars), "c");
        assert_eq!(standard_substitute("$i", &vars), "100");
        assert_eq!(standard_substitute("${i}", &vars), "100");
        assert_eq!(standard_substitute("$f", &vars), "called");
        assert_eq!(standard_substitute("${f}", &vars), "called");
        assert_eq!(standard_substitute("$b:$i", &vars), "c:100");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_substitute_edge_cases() {
        let mut vars = Substitutions::new();
        vars.insert("x", "1");
        assert_eq!(standard_substitute("$$x", &vars), "$x");
        assert_eq!(standard_substitute("$nope ${nope}", &vars), "$nope ${nope}");
        assert_eq!(standard_substitute("cost: $ 5$", &vars), "cost: $ 5$");
        assert_eq!(standard_substitute("${x", &vars), "${x");
        assert_eq!(standard_substitute("no vars", &vars), "no vars");
    }

    #[test]
    fn test_standard_substitutions() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let vars = Substitutions::standard("bob!~bob@host.tld", Some("#chan"), &now);
        assert_eq!(
            standard_substitute("$who ($user@$host) in $channel", &vars),
            "bob (~bob@host.tld) in #chan"
        );
        assert_eq!(standard_substitute("$now", &vars), "2024-03-05 14:07:09");
        assert_eq!(standard_substitute("$today", &vars), "2024-03-05");
        assert_eq!(
            standard_substitute("$year/$month/$day $hour:$minute:$second", &vars),
            "2024/03/05 14:07:09"
        );

        let vars = Substitutions::standard("irc.server.net", None, &now);
        assert_eq!(standard_substitute("[$nick][$host][$channel]", &vars), "[irc.server.net][][]");
    }
}
