//! Mode change types and the mode argument table.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::isupport::{ChanModes, Isupport};

/// Direction of a mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl Sign {
    /// Parse `+` or `-`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            _ => None,
        }
    }

    /// The sign character.
    pub fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single signed mode letter with its optional argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeChange {
    pub sign: Sign,
    pub mode: char,
    pub arg: Option<String>,
}

impl ModeChange {
    pub fn new(sign: Sign, mode: char, arg: Option<&str>) -> Self {
        ModeChange {
            sign,
            mode,
            arg: arg.map(str::to_string),
        }
    }

    /// `+mode [arg]`
    pub fn plus(mode: char, arg: Option<&str>) -> Self {
        Self::new(Sign::Plus, mode, arg)
    }

    /// `-mode [arg]`
    pub fn minus(mode: char, arg: Option<&str>) -> Self {
        Self::new(Sign::Minus, mode, arg)
    }

    /// The signed flag, e.g. `+o`.
    pub fn flag(&self) -> String {
        format!("{}{}", self.sign, self.mode)
    }

    /// The argument as a number, when it is one (e.g. the `100` of `+l 100`).
    pub fn numeric_arg(&self) -> Option<u32> {
        self.arg.as_deref().and_then(|arg| arg.parse().ok())
    }

    /// The user limit set by a `+l` change.
    ///
    /// `None` for every other change, including `-l` and a non-numeric
    /// `+l` argument.
    pub fn limit(&self) -> Option<u32> {
        match (self.sign, self.mode) {
            (Sign::Plus, 'l') => self.numeric_arg(),
            _ => None,
        }
    }
}

impl fmt::Display for ModeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}{} {}", self.sign, self.mode, arg),
            None => write!(f, "{}{}", self.sign, self.mode),
        }
    }
}

/// When a mode letter consumes an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeKind {
    /// List mode (CHANMODES type A). Takes an argument when one is left;
    /// a bare `+b` is a list query.
    List,
    /// Always takes an argument (type B and PREFIX modes).
    Always,
    /// Takes an argument only when set (type C).
    OnSet,
    /// Never takes an argument (type D).
    Never,
}

impl ModeKind {
    /// Whether a change with this sign expects an argument.
    pub fn takes_arg(self, sign: Sign) -> bool {
        match self {
            ModeKind::List | ModeKind::Always => true,
            ModeKind::OnSet => sign == Sign::Plus,
            ModeKind::Never => false,
        }
    }
}

/// Which channel mode letters take arguments.
///
/// Letters missing from the table are treated as [`ModeKind::Never`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeTable {
    kinds: BTreeMap<char, ModeKind>,
}

const RFC1459_CHANMODES: ChanModes<'static> = ChanModes {
    a: "beIq",
    b: "k",
    c: "l",
    d: "imnprst",
};

const RFC1459_PREFIX_MODES: &str = "ohv";

impl ModeTable {
    /// An empty table: every letter is argument-less.
    pub fn new() -> Self {
        Self::default()
    }

    /// The common defaults: `CHANMODES=beIq,k,l,imnprst` and `PREFIX=(ohv)@%+`.
    pub fn rfc1459() -> Self {
        Self::from_chanmodes(&RFC1459_CHANMODES, RFC1459_PREFIX_MODES)
    }

    /// Build a table from `CHANMODES` and the `PREFIX` mode letters.
    pub fn from_chanmodes(chanmodes: &ChanModes<'_>, prefix_modes: &str) -> Self {
        let mut table = ModeTable::new();
        for (letters, kind) in [
            (chanmodes.d, ModeKind::Never),
            (chanmodes.c, ModeKind::OnSet),
            (chanmodes.b, ModeKind::Always),
            (chanmodes.a, ModeKind::List),
            (prefix_modes, ModeKind::Always),
        ] {
            for c in letters.chars() {
                table.kinds.insert(c, kind);
            }
        }
        table
    }

    /// Build a table from a server's ISUPPORT tokens, falling back to the
    /// [`rfc1459`](Self::rfc1459) values for anything not advertised.
    pub fn from_isupport(isupport: &Isupport<'_>) -> Self {
        let chanmodes = isupport.chanmodes().unwrap_or_else(|| {
            debug!("no usable CHANMODES token, using rfc1459 defaults");
            RFC1459_CHANMODES
        });
        let prefix_modes = match isupport.prefix() {
            Some(spec) if !spec.modes.is_empty() => spec.modes,
            _ => {
                debug!("no usable PREFIX token, using rfc1459 defaults");
                RFC1459_PREFIX_MODES
            }
        };
        Self::from_chanmodes(&chanmodes, prefix_modes)
    }

    /// Set the kind of a single letter.
    pub fn with(mut self, mode: char, kind: ModeKind) -> Self {
        self.kinds.insert(mode, kind);
        self
    }

    pub fn kind_of(&self, mode: char) -> ModeKind {
        self.kinds.get(&mode).copied().unwrap_or(ModeKind::Never)
    }

    pub fn takes_arg(&self, sign: Sign, mode: char) -> bool {
        self.kind_of(mode).takes_arg(sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1459_table() {
        let table = ModeTable::rfc1459();
        assert!(table.takes_arg(Sign::Plus, 'o'));
        assert!(table.takes_arg(Sign::Minus, 'o'));
        assert!(table.takes_arg(Sign::Minus, 'b'));
        assert!(table.takes_arg(Sign::Plus, 'k'));
        assert!(table.takes_arg(Sign::Minus, 'k'));
        assert!(table.takes_arg(Sign::Plus, 'l'));
        assert!(!table.takes_arg(Sign::Minus, 'l'));
        assert!(!table.takes_arg(Sign::Plus, 's'));
        assert!(!table.takes_arg(Sign::Plus, 'Z'));
        assert_eq!(table.kind_of('I'), ModeKind::List);
    }

    #[test]
    fn test_table_from_isupport() {
        let isupport = Isupport::parse_params(&["CHANMODES=eIbq,k,flj,CFLMPQcgimnprstz", "PREFIX=(qaohv)~&@%+"]);
        let table = ModeTable::from_isupport(&isupport);
        assert_eq!(table.kind_of('f'), ModeKind::OnSet);
        assert_eq!(table.kind_of('a'), ModeKind::Always);
        assert_eq!(table.kind_of('q'), ModeKind::Always);
        assert_eq!(table.kind_of('z'), ModeKind::Never);

        let empty = Isupport::parse_params(&[]);
        assert_eq!(ModeTable::from_isupport(&empty), ModeTable::rfc1459());
    }

    #[test]
    fn test_with_override() {
        let table = ModeTable::new().with('x', ModeKind::OnSet);
        assert!(table.takes_arg(Sign::Plus, 'x'));
        assert!(!table.takes_arg(Sign::Minus, 'x'));
    }

    #[test]
    fn test_mode_change_display() {
        assert_eq!(ModeChange::plus('o', Some("nick")).to_string(), "+o nick");
        assert_eq!(ModeChange::minus('s', None).to_string(), "-s");
        assert_eq!(ModeChange::minus('l', None).flag(), "-l");
    }

    #[test]
    fn test_numeric_limit() {
        assert_eq!(ModeChange::plus('l', Some("100")).limit(), Some(100));
        assert_eq!(ModeChange::plus('l', Some("lots")).limit(), None);
        assert_eq!(ModeChange::minus('l', None).limit(), None);
        assert_eq!(ModeChange::plus('k', Some("42")).limit(), None);
        assert_eq!(ModeChange::plus('k', Some("42")).numeric_arg(), Some(42));
        assert_eq!(ModeChange::plus('o', Some("nick")).numeric_arg(), None);
    }
}
