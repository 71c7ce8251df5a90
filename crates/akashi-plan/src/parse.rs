use akashi_domain::model::{AttributeMap, ChangeAction, ResourceChange};
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
struct PlanDocument {
    #[serde(default)]
    resource_changes: Vec<RawResourceChange>,
}

#[derive(Debug, Deserialize)]
struct RawResourceChange {
    address: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    provider_name: Option<String>,
    change: RawChange,
}

#[derive(Debug, Deserialize)]
struct RawChange {
    actions: Vec<String>,
    #[serde(default)]
    before: Value,
    #[serde(default)]
    after: Value,
    #[serde(default)]
    after_unknown: Value,
}

/// Parse the `resource_changes` of a JSON plan, in input order. Data sources are dropped.
pub fn parse_plan_json(text: &str) -> anyhow::Result<Vec<ResourceChange>> {
    let doc: PlanDocument = serde_json::from_str(text).context("parse plan JSON")?;

    let mut out = Vec::with_capacity(doc.resource_changes.len());
    for raw in doc.resource_changes {
        if raw.mode.as_deref() == Some("data") {
            continue;
        }
        let action = parse_action(&raw.change.actions)
            .with_context(|| format!("resource {}", raw.address))?;
        let before = attribute_map(raw.change.before)
            .with_context(|| format!("resource {}: change.before", raw.address))?;
        let after = attribute_map(raw.change.after)
            .with_context(|| format!("resource {}: change.after", raw.address))?;

        out.push(ResourceChange {
            address: raw.address,
            resource_type: raw.resource_type,
            name: raw.name,
            provider_name: raw.provider_name,
            action,
            before,
            after,
            computed: computed_keys(&raw.change.after_unknown),
        });
    }

    Ok(out)
}

pub fn parse_action(actions: &[String]) -> anyhow::Result<ChangeAction> {
    let actions: Vec<&str> = actions.iter().map(String::as_str).collect();
    let action = match actions.as_slice() {
        ["no-op"] => ChangeAction::NoOp,
        ["create"] => ChangeAction::Create,
        ["read"] => ChangeAction::Read,
        ["update"] => ChangeAction::Update,
        ["delete"] => ChangeAction::Delete,
        ["delete", "create"] | ["create", "delete"] => ChangeAction::Replace,
        other => anyhow::bail!("unsupported change actions: {other:?}"),
    };
    Ok(action)
}

fn attribute_map(value: Value) -> anyhow::Result<AttributeMap> {
    match value {
        Value::Null => Ok(AttributeMap::new()),
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => anyhow::bail!("expected an object or null, found {}", kind(&other)),
    }
}

/// Top-level attributes flagged `true` in `after_unknown`.
fn computed_keys(after_unknown: &Value) -> BTreeSet<String> {
    let Some(map) = after_unknown.as_object() else {
        return BTreeSet::new();
    };
    map.iter()
        .filter(|(_, v)| v.as_bool() == Some(true))
        .map(|(k, _)| k.clone())
        .collect()
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
