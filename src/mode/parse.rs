//! Mode string separation.

use tracing::debug;

use crate::error::{Error, ModeParseError};

use super::types::{ModeChange, ModeKind, ModeTable, Sign};

/// Separate a mode string into individual signed changes.
///
/// `tokens[0]` is a signed run of mode letters such as `+o-v`; the remaining
/// tokens are arguments, consumed left to right by the letters that take one
/// under the sign in effect (per `table`).
///
/// ```
/// use slirc_utils::mode::{separate_modes, ModeChange, ModeTable};
///
/// let table = ModeTable::rfc1459();
/// assert_eq!(
///     separate_modes(&["+s-o", "x"], &table).unwrap(),
///     vec![ModeChange::plus('s', None), ModeChange::minus('o', Some("x"))],
/// );
/// ```
pub fn separate_modes<S: AsRef<str>>(
    tokens: &[S],
    table: &ModeTable,
) -> Result<Vec<ModeChange>, ModeParseError> {
    separate(tokens, table).map_err(|e| {
        debug!(error = %e, "rejected mode string");
        e
    })
}

fn separate<S: AsRef<str>>(
    tokens: &[S],
    table: &ModeTable,
) -> Result<Vec<ModeChange>, ModeParseError> {
    let (first, rest) = tokens
        .split_first()
        .ok_or(ModeParseError::MissingModeString)?;

    let mut modes = AsRef::<str>::as_ref(first).chars();
    let mut args = rest.iter().map(AsRef::<str>::as_ref);

    let mut sign = modes
        .next()
        .and_then(Sign::from_char)
        .ok_or(ModeParseError::MissingModeModifier)?;

    let mut res = vec![];

    for c in modes {
        if let Some(s) = Sign::from_char(c) {
            sign = s;
            continue;
        }
        if !c.is_ascii_alphabetic() {
            return Err(ModeParseError::InvalidModeChar(c));
        }

        let kind = table.kind_of(c);
        let arg = if kind.takes_arg(sign) {
            match args.next() {
                Some(arg) => Some(arg.to_string()),
                // List modes can be queried without an argument
                None if kind == ModeKind::List => None,
                None => {
                    return Err(ModeParseError::MissingArgument {
                        sign: sign.as_char(),
                        mode: c,
                    })
                }
            }
        } else {
            None
        };
        res.push(ModeChange { sign, mode: c, arg });
    }

    if res.is_empty() {
        return Err(ModeParseError::NoModeLetters);
    }

    let unused = args.count();
    if unused > 0 {
        return Err(ModeParseError::UnusedArguments(unused));
    }

    Ok(res)
}

/// Separate a space-delimited mode string such as `+ov alice bob`.
///
/// Errors carry the offending string.
pub fn parse_mode_string(line: &str, table: &ModeTable) -> Result<Vec<ModeChange>, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    separate_modes(&tokens, table).map_err(|cause| Error::InvalidModeString {
        string: line.to_string(),
        cause,
    })
}
