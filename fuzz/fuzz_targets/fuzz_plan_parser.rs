//! Fuzz target for Terraform JSON plan parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_plan_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = akashi_plan::parse_plan_json(text);
    }
});
