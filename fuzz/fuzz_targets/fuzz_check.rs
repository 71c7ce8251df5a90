//! Fuzz target for the full check: arbitrary ruleset and plan text through evaluation.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_check
//! ```

#![no_main]

use akashi_app::{CheckInput, InputPaths, run_check};
use akashi_settings::{Overrides, RulesetFormat};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    ruleset: String,
    plan: String,
    json_ruleset: bool,
    strict: Option<bool>,
}

fuzz_target!(|input: Input| {
    let format = if input.json_ruleset {
        RulesetFormat::Json
    } else {
        RulesetFormat::Toml
    };
    let _ = run_check(CheckInput {
        ruleset_text: &input.ruleset,
        ruleset_format: format,
        plan_text: &input.plan,
        overrides: Overrides {
            strict: input.strict,
        },
        paths: InputPaths::default(),
    });
});
