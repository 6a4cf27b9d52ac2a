//! RPL_ISUPPORT (005) token parsing.
//!
//! Only the tokens that drive channel validation and mode handling get typed
//! accessors; everything else is reachable via [`Isupport::get`].

use crate::validation::{is_channel_with, DEFAULT_CHANNEL_LEN, DEFAULT_CHANTYPES};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsupportEntry<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Isupport<'a> {
    entries: Vec<IsupportEntry<'a>>,
}

impl<'a> Isupport<'a> {
    /// Parse bare ISUPPORT tokens such as `CHANMODES=beI,k,l,imnpst`.
    ///
    /// Parsing stops at the first token starting with `:` (the trailing
    /// "are supported by this server" text).
    pub fn parse_params(params: &[&'a str]) -> Self {
        let mut entries = Vec::with_capacity(params.len());
        for &p in params {
            if p.starts_with(':') { break; }
            if p.is_empty() { continue; }
            let (k, v) = match p.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (p, None),
            };

            entries.push(IsupportEntry { key: k, value: v });
        }
        Isupport { entries }
    }

    /// Parse the arguments of an RPL_ISUPPORT reply: the client nick, the
    /// tokens, and a trailing human-readable text.
    pub fn from_response_args(args: &[&'a str]) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        let mut tokens = &args[1..];

        if let Some(last) = tokens.last() {
            if last.contains(' ') { tokens = &tokens[..tokens.len().saturating_sub(1)]; }
        }
        Some(Self::parse_params(tokens))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IsupportEntry<'a>> {
        self.entries.iter()
    }

    /// Later tokens override earlier ones. `Some(None)` means the key is
    /// present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&'a str>> {
        self.entries
            .iter()
            .rfind(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value)
    }

    pub fn chantypes(&self) -> Option<&'a str> { self.get("CHANTYPES").flatten() }

    pub fn prefix(&self) -> Option<PrefixSpec<'a>> {
        self.get("PREFIX").flatten().and_then(PrefixSpec::parse)
    }

    pub fn chanmodes(&self) -> Option<ChanModes<'a>> {
        self.get("CHANMODES").flatten().and_then(ChanModes::parse)
    }

    /// Maximum number of argument-taking modes per MODE command.
    ///
    /// `MODES` without a value means no limit and yields `None`.
    pub fn modes(&self) -> Option<usize> {
        self.get("MODES").flatten().and_then(|s| s.parse().ok())
    }

    pub fn channellen(&self) -> Option<usize> {
        self.get("CHANNELLEN").flatten().and_then(|s| s.parse().ok())
    }

    pub fn nicklen(&self) -> Option<usize> {
        self.get("NICKLEN").flatten().and_then(|s| s.parse().ok())
    }

    /// Whether `name` is a channel on this server, using its `CHANTYPES` and
    /// `CHANNELLEN` (or the defaults when not advertised).
    pub fn is_channel(&self, name: &str) -> bool {
        is_channel_with(
            name,
            self.chantypes().unwrap_or(DEFAULT_CHANTYPES),
            self.channellen().unwrap_or(DEFAULT_CHANNEL_LEN),
        )
    }
}

/// `PREFIX=(ov)@+`: membership mode letters and their nick prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixSpec<'a> {
    pub modes: &'a str,
    pub prefixes: &'a str,
}

impl<'a> PrefixSpec<'a> {
    pub fn parse(s: &'a str) -> Option<Self> {

        if let Some(open) = s.find('(') {
            if let Some(close) = s[open + 1..].find(')') {
                let close = open + 1 + close;
                let modes = &s[open + 1..close];
                let prefixes = &s[close + 1..];
                if !modes.is_empty() && !prefixes.is_empty() { return Some(PrefixSpec { modes, prefixes }); }
            }
        } else if !s.is_empty() {
            return Some(PrefixSpec { modes: "", prefixes: s });
        }
        None
    }
}

/// `CHANMODES=A,B,C,D`.
///
/// - A: list modes, always take an argument (a bare `+b` is a list query)
/// - B: always take an argument
/// - C: take an argument only when set
/// - D: never take an argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChanModes<'a> {
    pub a: &'a str,
    pub b: &'a str,
    pub c: &'a str,
    pub d: &'a str,
}

impl<'a> ChanModes<'a> {
    pub fn parse(s: &'a str) -> Option<Self> {
        let mut parts = s.splitn(4, ',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(ChanModes { a, b, c, d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: &[&str] = &[
        "CHANTYPES=#&",
        "CHANMODES=beI,k,l,imnpst",
        "PREFIX=(ohv)@%+",
        "MODES=4",
        "CASEMAPPING=rfc1459",
        "EXCEPTS",
        "INVEX=I",
        "CHANNELLEN=64",
        ":are supported by this server",
        "IGNORED=1",
    ];

    #[test]
    fn test_parse_params() {
        let isupport = Isupport::parse_params(TOKENS);
        assert_eq!(isupport.iter().count(), 8);
        assert_eq!(isupport.chantypes(), Some("#&"));
        assert_eq!(isupport.modes(), Some(4));
        assert_eq!(isupport.channellen(), Some(64));
        assert_eq!(isupport.nicklen(), None);
        assert_eq!(isupport.get("CASEMAPPING"), Some(Some("rfc1459")));
        assert_eq!(isupport.get("EXCEPTS"), Some(None));
        assert_eq!(isupport.get("INVEX"), Some(Some("I")));
        assert_eq!(isupport.get("IGNORED"), None);
    }

    #[test]
    fn test_prefix_and_chanmodes() {
        let isupport = Isupport::parse_params(TOKENS);
        assert_eq!(
            isupport.prefix(),
            Some(PrefixSpec { modes: "ohv", prefixes: "@%+" })
        );
        assert_eq!(
            isupport.chanmodes(),
            Some(ChanModes { a: "beI", b: "k", c: "l", d: "imnpst" })
        );
        assert_eq!(ChanModes::parse("b,k,l"), None);
        assert_eq!(PrefixSpec::parse("(ov)"), None);
    }

    #[test]
    fn test_later_tokens_override() {
        let isupport = Isupport::parse_params(&["MODES=3", "modes=6"]);
        assert_eq!(isupport.modes(), Some(6));
    }

    #[test]
    fn test_from_response_args() {
        let isupport = Isupport::from_response_args(&[
            "mynick",
            "NETWORK=Libera.Chat",
            "are supported by this server",
        ])
        .unwrap();
        assert_eq!(isupport.get("network"), Some(Some("Libera.Chat")));
        assert_eq!(isupport.iter().count(), 1);
        assert!(Isupport::from_response_args(&[]).is_none());
    }

    #[test]
    fn test_is_channel_uses_chantypes() {
        let isupport = Isupport::parse_params(&["CHANTYPES=#", "CHANNELLEN=8"]);
        assert!(isupport.is_channel("#rust"));
        assert!(!isupport.is_channel("&local"));
        assert!(!isupport.is_channel("#toolongname"));

        let defaults = Isupport::parse_params(&[]);
        assert!(defaults.is_channel("&local"));
        assert!(defaults.is_channel("#toolongname"));
    }
}
