//! Adapter from `terraform show -json` output to domain resource changes.

#![forbid(unsafe_code)]

mod parse;

pub use parse::{parse_action, parse_plan_json};
