use crate::model::{AttributeMap, ChangeAction, ResourceChange, ResourceValues};
use crate::policy::{CompareOptions, RuleDefinition, RulesetSection};
use crate::rule::ResolvedRule;
use serde_json::Value;

pub fn attrs(pairs: &[(&str, Value)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn values(pairs: &[(&str, Value)]) -> ResourceValues {
    ResourceValues::new(attrs(pairs))
}

pub fn rule(enforced: &[(&str, Value)], ignored: &[&str], options: CompareOptions) -> ResolvedRule {
    ResolvedRule::new(
        attrs(enforced),
        ignored.iter().map(|s| s.to_string()).collect(),
        options,
    )
}

pub fn definition(
    name: Option<&str>,
    resource_type: Option<&str>,
    enforced: &[(&str, Value)],
) -> RuleDefinition {
    RuleDefinition {
        name: name.map(|s| s.to_string()),
        resource_type: resource_type.map(|s| s.to_string()),
        enforced: attrs(enforced),
        ..RuleDefinition::default()
    }
}

pub fn section(strict: bool, rules: Vec<RuleDefinition>) -> RulesetSection {
    RulesetSection {
        strict,
        default: CompareOptions::default(),
        rules,
    }
}

pub fn change(
    resource_type: &str,
    name: &str,
    action: ChangeAction,
    before: &[(&str, Value)],
    after: &[(&str, Value)],
) -> ResourceChange {
    ResourceChange {
        address: format!("{resource_type}.{name}"),
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        provider_name: None,
        action,
        before: attrs(before),
        after: attrs(after),
        ..ResourceChange::default()
    }
}
