//! Error types for the IRC utility library.
//!
//! Each concern has its own error enum; [`Error`] collects them for callers
//! that want a single type.

use thiserror::Error;

/// Convenience type alias for Results using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A mode string could not be separated into mode changes.
    #[error("invalid mode string: {string}")]
    InvalidModeString {
        /// The raw mode tokens, space separated.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: ModeParseError,
    },

    /// Hostmask error.
    #[error(transparent)]
    Hostmask(#[from] HostmaskError),

    /// Container lookup error.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// DCC address conversion error.
    #[error(transparent)]
    Dcc(#[from] DccError),

    /// Unknown color name.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Nickname or channel name validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors encountered when separating mode strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeParseError {
    /// No tokens were supplied at all.
    #[error("missing mode string")]
    MissingModeString,

    /// Missing mode modifier (+ or -) at the start of the run.
    #[error("missing mode modifier")]
    MissingModeModifier,

    /// The run consisted only of `+`/`-` characters.
    #[error("mode string has no mode letters")]
    NoModeLetters,

    /// A character in the run is not a mode letter.
    #[error("invalid mode character: {0:?}")]
    InvalidModeChar(char),

    /// A mode that takes an argument ran out of arguments.
    #[error("mode '{sign}{mode}' requires an argument but none provided")]
    MissingArgument {
        /// Sign in effect for the mode.
        sign: char,
        /// The mode letter.
        mode: char,
    },

    /// More arguments were supplied than the modes consume.
    #[error("{0} unused argument(s) provided for mode parsing")]
    UnusedArguments(usize),
}

/// Errors produced by hostmask handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostmaskError {
    /// The string is not of the form `nick!user@host`.
    #[error("invalid hostmask: {0:?}")]
    Invalid(String),
}

/// Errors produced by the casemapped containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CollectionError {
    /// No entry exists for the key under IRC casemapping.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
}

/// Errors produced by the DCC address codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DccError {
    /// Input is not a dotted-quad IPv4 address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// Input is not a decimal 32-bit integer.
    #[error("invalid DCC address: {0:?}")]
    InvalidInteger(String),
}

/// Errors produced by color handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorError {
    /// The name does not match any mIRC color.
    #[error("unknown color: {0:?}")]
    UnknownColor(String),
}

/// Reasons a nickname or channel name is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("input is empty")]
    Empty,

    #[error("input too long: {actual} characters (max {max})")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        actual: usize,
    },

    #[error("invalid character {ch:?} at position {position}")]
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// Character position in the string.
        position: usize,
    },

    /// The channel name does not start with one of the channel types.
    #[error("missing channel prefix")]
    MissingPrefix,

    #[error("invalid first character: {ch:?}")]
    InvalidFirstChar {
        /// The invalid character.
        ch: char,
    },
}
