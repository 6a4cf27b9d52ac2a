//! Fuzz target for mode string separation
//!
//! Whatever separates successfully must survive a join/separate round trip
//! unless it contains list queries, which drop their missing argument.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_utils::mode::{join_modes, parse_mode_string, separate_modes, ModeTable};
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.is_empty() || input.len() > 512 {
            return;
        }

        let table = ModeTable::rfc1459();
        if let Ok(changes) = parse_mode_string(input, &table) {
            if changes.iter().all(|c| c.arg.is_some() || !table.takes_arg(c.sign, c.mode)) {
                let tokens = join_modes(&changes);
                assert_eq!(separate_modes(&tokens, &table).ok(), Some(changes));
            }
        }
    }
});
