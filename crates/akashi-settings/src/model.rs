use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `akashi.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RulesetConfigV1 {
    /// Optional schema string for tooling (`akashi.ruleset.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Rules for resources the plan creates (after-state).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_resources: Option<SectionConfig>,

    /// Rules for resources the plan destroys (before-state).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destroyed_resources: Option<SectionConfig>,

    /// Rules for resources updated in place (changed attributes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_resources: Option<SectionConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Fail resources that no rule matches.
    #[serde(default)]
    pub strict: bool,

    /// Options applied to every rule of the section unless the rule overrides them.
    #[serde(default)]
    pub default: OptionsConfig,

    #[serde(default)]
    pub resources: Vec<ResourceRuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_all: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_extra_args: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_all: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_fail: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResourceRuleConfig {
    /// Resource name, e.g. `assets` in `google_storage_bucket.assets`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resource type, e.g. `google_storage_bucket`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Attribute name -> exact expected value.
    #[serde(default)]
    pub enforced: BTreeMap<String, Value>,

    /// Attributes that may be present with any value.
    #[serde(default)]
    pub ignored: Vec<String>,

    #[serde(default)]
    pub options: OptionsConfig,
}
