//! Fuzz target for hostmask splitting, matching and ban mask generation
//!
//! Any split hostmask must rejoin to the input and match its own ban mask.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_utils::hostmask::{join_hostmask, split_hostmask};
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 512 {
            return;
        }

        let _ = slirc_utils::hostmask_pattern_equal(input, input);

        if let Ok(mask) = split_hostmask(input) {
            assert_eq!(join_hostmask(mask.nick, mask.user, mask.host), input);
            let ban = slirc_utils::banmask(input).expect("valid hostmask has a ban mask");
            assert!(slirc_utils::hostmask_pattern_equal(&ban, input));
        }
    }
});
