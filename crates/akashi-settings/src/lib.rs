//! Ruleset parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves rulesets provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{OptionsConfig, ResourceRuleConfig, RulesetConfigV1, SectionConfig};
pub use resolve::{Overrides, ResolvedRuleset};

use anyhow::Context;

/// Serialization format of a ruleset file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RulesetFormat {
    #[default]
    Toml,
    Json,
}

impl RulesetFormat {
    /// Pick the format from a file extension; anything but `json` is TOML.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(e) if e.eq_ignore_ascii_case("json") => RulesetFormat::Json,
            _ => RulesetFormat::Toml,
        }
    }
}

/// Parse `akashi.toml` (or equivalent) into a typed model.
pub fn parse_ruleset_toml(input: &str) -> anyhow::Result<RulesetConfigV1> {
    let cfg: RulesetConfigV1 = toml::from_str(input).context("parse ruleset TOML")?;
    Ok(cfg)
}

pub fn parse_ruleset_json(input: &str) -> anyhow::Result<RulesetConfigV1> {
    let cfg: RulesetConfigV1 = serde_json::from_str(input).context("parse ruleset JSON")?;
    Ok(cfg)
}

pub fn parse_ruleset(input: &str, format: RulesetFormat) -> anyhow::Result<RulesetConfigV1> {
    match format {
        RulesetFormat::Toml => parse_ruleset_toml(input),
        RulesetFormat::Json => parse_ruleset_json(input),
    }
}

/// Resolve the ruleset used by the engine (sections + per-rule options + overrides).
pub fn resolve_ruleset(
    cfg: RulesetConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedRuleset> {
    resolve::resolve_ruleset(cfg, overrides)
}
