//! # slirc-utils
//!
//! IRC identity and mode handling utilities: casemapping, case-insensitive
//! strings and containers, hostmask matching, ban mask generation and mode
//! string parsing.
//!
//! ## Features
//!
//! - RFC 1459 casemapping (`[]\~` fold to `{}|^`)
//! - [`IrcString`], [`IrcDict`] and [`IrcSet`] keyed by casemapped names
//! - Hostmask splitting and `*`/`?` wildcard matching
//! - Configurable ban mask generation
//! - Mode string separation and joining driven by ISUPPORT
//! - Nick and channel validation, mIRC formatting codes, DCC addresses and
//!   `$variable` substitution
//! - Optional `serde` support and `encoding` (legacy byte decoding)

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Casemapped names
//!
//! ```rust
//! use slirc_utils::{irc_to_lower, IrcDict, IrcString};
//!
//! assert_eq!(irc_to_lower("Nick[Away]"), "nick{away}");
//! assert_eq!(IrcString::new("#FOO"), "#foo");
//!
//! let mut topics = IrcDict::new();
//! topics.insert("#Rust", "systems programming");
//! assert_eq!(topics.get("#rust"), Some(&"systems programming"));
//! ```
//!
//! ### Hostmasks and bans
//!
//! ```rust
//! use slirc_utils::{banmask, hostmask_pattern_equal};
//!
//! let mask = banmask("nick!user@sub.host.tld").unwrap();
//! assert_eq!(mask, "*!*@*.host.tld");
//! assert!(hostmask_pattern_equal(&mask, "other!ident@dsl.HOST.tld"));
//! ```
//!
//! ### Mode strings
//!
//! ```rust
//! use slirc_utils::mode::{join_modes, separate_modes, ModeTable};
//!
//! let table = ModeTable::rfc1459();
//! let changes = separate_modes(&["+o-v", "alice", "bob"], &table).unwrap();
//! assert_eq!(join_modes(&changes), ["+o-v", "alice", "bob"]);
//! ```

pub mod banmask;
pub mod casemap;
pub mod collections;
pub mod colors;
pub mod error;
pub mod hostmask;
pub mod ircstr;
pub mod isupport;
pub mod mode;
pub mod util;
pub mod validation;

pub use self::banmask::{banmask, banmask_with, BanmaskConfig, IpPolicy};
pub use self::casemap::{irc_eq, irc_lower_char, irc_to_lower};
pub use self::collections::{IrcDict, IrcSet};
pub use self::colors::FormattedStringExt;
pub use self::error::{Error, Result};
pub use self::hostmask::{hostmask_pattern_equal, is_user_hostmask, HostmaskPattern};
pub use self::ircstr::IrcString;
pub use self::isupport::{ChanModes, Isupport, IsupportEntry, PrefixSpec};
pub use self::mode::{join_modes, separate_modes, ModeChange, ModeTable};
pub use self::validation::{is_channel, is_nick};
