use crate::model::AttributeMap;
use std::collections::BTreeSet;

/// Switches that govern how a categorization turns into a verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// A missing enforced attribute is a failure.
    pub enforce_all: bool,
    /// Attributes that are neither enforced nor ignored are tolerated.
    pub ignore_extra_args: bool,
    /// A missing ignored attribute is a failure.
    pub require_all: bool,
    /// Always fail, whatever the attributes hold.
    pub auto_fail: bool,
}

/// Per-rule option overrides. Unset fields keep the section default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub enforce_all: Option<bool>,
    pub ignore_extra_args: Option<bool>,
    pub require_all: Option<bool>,
    pub auto_fail: Option<bool>,
}

impl CompareOptions {
    pub fn overridden_by(self, overrides: &OptionOverrides) -> Self {
        Self {
            enforce_all: overrides.enforce_all.unwrap_or(self.enforce_all),
            ignore_extra_args: overrides.ignore_extra_args.unwrap_or(self.ignore_extra_args),
            require_all: overrides.require_all.unwrap_or(self.require_all),
            auto_fail: overrides.auto_fail.unwrap_or(self.auto_fail),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleDefinition {
    pub name: Option<String>,
    pub resource_type: Option<String>,
    /// Attribute name -> expected value.
    pub enforced: AttributeMap,
    pub ignored: BTreeSet<String>,
    pub options: OptionOverrides,
}

/// Rules for one change direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RulesetSection {
    /// Fail resources no rule matches, instead of passing them with a warning.
    pub strict: bool,
    pub default: CompareOptions,
    pub rules: Vec<RuleDefinition>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ruleset {
    pub created: Option<RulesetSection>,
    pub destroyed: Option<RulesetSection>,
    pub updated: Option<RulesetSection>,
}
