//! Channel mode string handling.
//!
//! [`separate_modes`] splits `+o-v alice bob` into individual
//! [`ModeChange`]s; [`join_modes`] reverses it. Which letters consume an
//! argument is decided by a [`ModeTable`].

mod parse;
mod serialize;
mod types;

pub use self::parse::{parse_mode_string, separate_modes};
pub use self::serialize::{join_modes, join_modes_chunked};
pub use self::types::{ModeChange, ModeKind, ModeTable, Sign};
