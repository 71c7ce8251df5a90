use crate::model::{OptionsConfig, ResourceRuleConfig, RulesetConfigV1, SectionConfig};
use akashi_domain::policy::{
    CompareOptions, OptionOverrides, RuleDefinition, Ruleset, RulesetSection,
};

/// Command-line overrides layered on top of the ruleset file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Replaces `strict` in every section that is present.
    pub strict: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedRuleset {
    pub ruleset: Ruleset,
}

impl ResolvedRuleset {
    pub fn rules_total(&self) -> usize {
        [
            &self.ruleset.created,
            &self.ruleset.destroyed,
            &self.ruleset.updated,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.rules.len())
        .sum()
    }
}

pub fn resolve_ruleset(
    cfg: RulesetConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedRuleset> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != "akashi.ruleset.v1"
    {
        anyhow::bail!("unsupported ruleset schema: {schema} (expected akashi.ruleset.v1)");
    }

    let ruleset = Ruleset {
        created: resolve_section("created_resources", cfg.created_resources, &overrides)?,
        destroyed: resolve_section("destroyed_resources", cfg.destroyed_resources, &overrides)?,
        updated: resolve_section("updated_resources", cfg.updated_resources, &overrides)?,
    };

    Ok(ResolvedRuleset { ruleset })
}

fn resolve_section(
    key: &str,
    section: Option<SectionConfig>,
    overrides: &Overrides,
) -> anyhow::Result<Option<RulesetSection>> {
    let Some(section) = section else {
        return Ok(None);
    };

    let rules = section
        .resources
        .into_iter()
        .enumerate()
        .map(|(i, rule)| resolve_rule(key, i, rule))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(RulesetSection {
        strict: overrides.strict.unwrap_or(section.strict),
        default: CompareOptions::default().overridden_by(&option_overrides(&section.default)),
        rules,
    }))
}

fn resolve_rule(
    key: &str,
    index: usize,
    rule: ResourceRuleConfig,
) -> anyhow::Result<RuleDefinition> {
    let name = non_empty(rule.name);
    let resource_type = non_empty(rule.resource_type);
    if name.is_none() && resource_type.is_none() {
        anyhow::bail!("{key}.resources[{index}]: a rule needs a `name` or a `type`");
    }

    if rule.enforced.keys().any(|k| k.is_empty()) {
        anyhow::bail!("{key}.resources[{index}]: enforced attribute names must not be empty");
    }
    if rule.ignored.iter().any(|k| k.is_empty()) {
        anyhow::bail!("{key}.resources[{index}]: ignored attribute names must not be empty");
    }

    Ok(RuleDefinition {
        name,
        resource_type,
        enforced: rule.enforced,
        ignored: rule.ignored.into_iter().collect(),
        options: option_overrides(&rule.options),
    })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn option_overrides(cfg: &OptionsConfig) -> OptionOverrides {
    OptionOverrides {
        enforce_all: cfg.enforce_all,
        ignore_extra_args: cfg.ignore_extra_args,
        require_all: cfg.require_all,
        auto_fail: cfg.auto_fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ruleset_toml;
    use serde_json::json;

    const RULESET: &str = r#"
[created_resources]
strict = true

[created_resources.default]
enforce_all = true

[[created_resources.resources]]
type = "google_storage_bucket"
name = "assets"
ignored = ["labels"]

[created_resources.resources.enforced]
location = "US"
versioning = { enabled = true }

[created_resources.resources.options]
ignore_extra_args = true

[[created_resources.resources]]
type = "google_compute_disk"

[created_resources.resources.options]
auto_fail = true

[destroyed_resources]

[[destroyed_resources.resources]]
name = "scratch"
"#;

    fn resolve(input: &str, overrides: Overrides) -> anyhow::Result<ResolvedRuleset> {
        resolve_ruleset(parse_ruleset_toml(input)?, overrides)
    }

    #[test]
    fn sections_rules_and_options_resolve() {
        let resolved = resolve(RULESET, Overrides::default()).expect("resolve");
        let created = resolved.ruleset.created.as_ref().expect("created");

        assert!(created.strict);
        assert_eq!(
            created.default,
            CompareOptions {
                enforce_all: true,
                ..CompareOptions::default()
            }
        );
        assert_eq!(created.rules.len(), 2);

        let bucket = &created.rules[0];
        assert_eq!(bucket.name.as_deref(), Some("assets"));
        assert_eq!(bucket.resource_type.as_deref(), Some("google_storage_bucket"));
        assert_eq!(bucket.enforced["location"], json!("US"));
        assert_eq!(bucket.enforced["versioning"], json!({"enabled": true}));
        assert!(bucket.ignored.contains("labels"));
        assert_eq!(bucket.options.ignore_extra_args, Some(true));
        assert_eq!(bucket.options.enforce_all, None);

        assert_eq!(created.rules[1].options.auto_fail, Some(true));

        let destroyed = resolved.ruleset.destroyed.as_ref().expect("destroyed");
        assert!(!destroyed.strict);
        assert_eq!(destroyed.default, CompareOptions::default());
        assert!(resolved.ruleset.updated.is_none());
        assert_eq!(resolved.rules_total(), 3);
    }

    #[test]
    fn strict_override_applies_to_every_present_section() {
        let resolved = resolve(
            RULESET,
            Overrides {
                strict: Some(false),
            },
        )
        .expect("resolve");

        assert!(!resolved.ruleset.created.as_ref().expect("created").strict);
        assert!(!resolved.ruleset.destroyed.as_ref().expect("destroyed").strict);
        assert!(resolved.ruleset.updated.is_none());
    }

    #[test]
    fn rule_without_identity_is_rejected_with_location() {
        let err = resolve(
            r#"
[updated_resources]

[[updated_resources.resources]]
type = "google_compute_instance"

[[updated_resources.resources]]
name = ""
ignored = ["labels"]
"#,
            Overrides::default(),
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("updated_resources.resources[1]"), "{msg}");
        assert!(msg.contains("`name` or a `type`"), "{msg}");
    }

    #[test]
    fn empty_attribute_name_is_rejected() {
        let err = resolve(
            r#"
[created_resources]

[[created_resources.resources]]
type = "google_storage_bucket"
ignored = [""]
"#,
            Overrides::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("created_resources.resources[0]"));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let err = resolve("schema = \"akashi.ruleset.v9\"\n", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("akashi.ruleset.v9"));

        let ok = resolve("schema = \"akashi.ruleset.v1\"\n", Overrides::default()).expect("v1");
        assert_eq!(ok.rules_total(), 0);
    }
}
