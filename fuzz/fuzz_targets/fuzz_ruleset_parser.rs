//! Fuzz target for ruleset parsing and resolution.
//!
//! Goal: parsing and resolving should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_ruleset_parser
//! ```

#![no_main]

use akashi_settings::{Overrides, RulesetFormat, parse_ruleset, resolve_ruleset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for format in [RulesetFormat::Toml, RulesetFormat::Json] {
        if let Ok(cfg) = parse_ruleset(text, format) {
            let _ = resolve_ruleset(cfg, Overrides::default());
        }
    }
});
