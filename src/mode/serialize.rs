//! Mode string serialization.

use super::types::{ModeChange, Sign};

/// Join mode changes back into MODE arguments.
///
/// Consecutive changes with the same sign share one sign character; the
/// first element is the combined run (e.g. `+be-l`), followed by the
/// arguments of the changes that carry one, in order. An empty slice yields
/// an empty vector.
///
/// Arguments are positional, so a list query (a list mode such as `+b`
/// without an argument) must come after every argument-carrying change.
/// Placed earlier, [`separate_modes`](super::separate_modes) hands it the
/// next change's argument.
///
/// ```
/// use slirc_utils::mode::{join_modes, ModeChange};
///
/// let modes = [
///     ModeChange::plus('b', Some("*!*@*umich.edu")),
///     ModeChange::plus('e', Some("*!*@*ohio-state.edu")),
///     ModeChange::minus('l', None),
/// ];
/// assert_eq!(join_modes(&modes), ["+be-l", "*!*@*umich.edu", "*!*@*ohio-state.edu"]);
/// ```
pub fn join_modes(changes: &[ModeChange]) -> Vec<String> {
    if changes.is_empty() {
        return Vec::new();
    }

    let mut run = String::with_capacity(changes.len() * 2);
    let mut args = Vec::new();
    let mut last: Option<Sign> = None;

    for change in changes {
        if last != Some(change.sign) {
            run.push(change.sign.as_char());
            last = Some(change.sign);
        }
        run.push(change.mode);
        if let Some(arg) = &change.arg {
            args.push(arg.clone());
        }
    }

    let mut out = Vec::with_capacity(args.len() + 1);
    out.push(run);
    out.extend(args);
    out
}

/// Join mode changes into several MODE argument lists, each carrying at most
/// `max_args` arguments (the ISUPPORT `MODES` value).
///
/// Argument-less changes ride along with the current line. A limit of zero
/// is treated as one.
pub fn join_modes_chunked(changes: &[ModeChange], max_args: usize) -> Vec<Vec<String>> {
    let max_args = max_args.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (i, change) in changes.iter().enumerate() {
        if change.arg.is_none() {
            continue;
        }
        if count == max_args {
            lines.push(join_modes(&changes[start..i]));
            start = i;
            count = 0;
        }
        count += 1;
    }

    if start < changes.len() {
        lines.push(join_modes(&changes[start..]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_modes() {
        let modes = [
            ModeChange::plus('b', Some("*!*@*umich.edu")),
            ModeChange::plus('e', Some("*!*@*ohio-state.edu")),
            ModeChange::minus('l', None),
        ];
        assert_eq!(
            join_modes(&modes),
            vec!["+be-l", "*!*@*umich.edu", "*!*@*ohio-state.edu"]
        );
    }

    #[test]
    fn test_join_sign_changes() {
        let modes = [
            ModeChange::plus('o', Some("a")),
            ModeChange::minus('v', Some("b")),
            ModeChange::plus('t', None),
        ];
        assert_eq!(join_modes(&modes), vec!["+o-v+t", "a", "b"]);
        assert!(join_modes(&[]).is_empty());
    }

    #[test]
    fn test_join_list_query_last() {
        use crate::mode::{separate_modes, ModeTable};

        let table = ModeTable::rfc1459();
        let modes = [ModeChange::plus('o', Some("x")), ModeChange::plus('b', None)];
        let joined = join_modes(&modes);
        assert_eq!(joined, vec!["+ob", "x"]);
        assert_eq!(separate_modes(&joined, &table).unwrap(), modes);

        // A query ahead of an argument steals it
        let misplaced = join_modes(&[
            ModeChange::plus('b', None),
            ModeChange::plus('o', Some("x")),
        ]);
        assert_eq!(misplaced, vec!["+bo", "x"]);
        assert!(separate_modes(&misplaced, &table).is_err());
    }

    #[test]
    fn test_join_modes_chunked() {
        let modes = [
            ModeChange::plus('o', Some("a")),
            ModeChange::plus('o', Some("b")),
            ModeChange::plus('n', None),
            ModeChange::plus('o', Some("c")),
            ModeChange::minus('v', Some("d")),
            ModeChange::plus('t', None),
        ];
        assert_eq!(
            join_modes_chunked(&modes, 2),
            vec![
                vec!["+oon", "a", "b"],
                vec!["+o-v+t", "c", "d"],
            ]
        );
        assert_eq!(join_modes_chunked(&modes, 10), vec![join_modes(&modes)]);
        assert_eq!(join_modes_chunked(&modes, 0).len(), 4);
        assert!(join_modes_chunked(&[], 3).is_empty());
    }
}
