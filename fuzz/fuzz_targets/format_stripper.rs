//! Fuzz target for formatting code stripping
//!
//! Stripping must never panic and must leave no formatting behind.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_utils::colors::{is_formatted, strip_formatting};
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        let stripped = strip_formatting(input);
        assert!(!is_formatted(&stripped));
    }
});
