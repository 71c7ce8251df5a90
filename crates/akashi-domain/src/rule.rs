//! Attribute comparison against one resolved rule.

use crate::diff::{self, DiffSection};
use crate::model::{AttributeMap, ResourceValues};
use crate::policy::{CompareOptions, RuleDefinition};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// A rule with its effective options, ready to compare against resource values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedRule {
    enforced: AttributeMap,
    ignored: BTreeSet<String>,
    options: CompareOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FailedAttribute {
    pub expected: Value,
    pub actual: Value,
}

/// Every attribute name of the rule and the values lands in exactly one bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Categorization {
    /// Name -> expected value.
    pub matched_enforced: AttributeMap,
    pub failed: BTreeMap<String, FailedAttribute>,
    pub matched_ignored: BTreeSet<String>,
    /// Present, but neither enforced nor ignored.
    pub extra: BTreeSet<String>,
    /// Name -> expected value.
    pub missing_enforced: AttributeMap,
    pub missing_ignored: BTreeSet<String>,
}

impl ResolvedRule {
    pub fn new(enforced: AttributeMap, ignored: BTreeSet<String>, options: CompareOptions) -> Self {
        Self {
            enforced,
            ignored,
            options,
        }
    }

    pub fn from_definition(def: &RuleDefinition, default: CompareOptions) -> Self {
        Self::new(
            def.enforced.clone(),
            def.ignored.clone(),
            default.overridden_by(&def.options),
        )
    }

    pub fn enforced(&self) -> &AttributeMap {
        &self.enforced
    }

    pub fn ignored(&self) -> &BTreeSet<String> {
        &self.ignored
    }

    pub fn options(&self) -> CompareOptions {
        self.options
    }

    pub fn categorize(&self, actual: &ResourceValues) -> Categorization {
        let mut out = Categorization::default();

        for (name, expected) in &self.enforced {
            match actual.values.get(name) {
                None => {
                    out.missing_enforced.insert(name.clone(), expected.clone());
                }
                // Unknown until apply, so it cannot be checked here.
                Some(_) if actual.is_computed(name) => {
                    out.matched_enforced.insert(name.clone(), expected.clone());
                }
                Some(value) if value == expected => {
                    out.matched_enforced.insert(name.clone(), expected.clone());
                }
                Some(value) => {
                    out.failed.insert(
                        name.clone(),
                        FailedAttribute {
                            expected: expected.clone(),
                            actual: value.clone(),
                        },
                    );
                }
            }
        }

        // A name that is both enforced and ignored was handled above.
        for name in self.ignored.iter().filter(|n| !self.enforced.contains_key(*n)) {
            if actual.values.contains_key(name) {
                out.matched_ignored.insert(name.clone());
            } else {
                out.missing_ignored.insert(name.clone());
            }
        }

        out.extra = set_difference(&actual.values, &self.enforced)
            .into_keys()
            .filter(|name| !self.ignored.contains(name))
            .collect();

        out
    }

    pub fn compare(&self, actual: &ResourceValues) -> bool {
        self.categorize(actual).passes(self.options)
    }

    pub fn sections(&self, actual: &ResourceValues) -> Vec<DiffSection> {
        self.categorize(actual).sections(self.options)
    }

    /// Plain-text diff; empty exactly when [`ResolvedRule::compare`] passes.
    pub fn diff(&self, actual: &ResourceValues) -> String {
        diff::render_sections(&self.sections(actual))
    }
}

impl Categorization {
    pub fn passes(&self, options: CompareOptions) -> bool {
        if options.auto_fail {
            return false;
        }
        if !self.failed.is_empty() {
            return false;
        }
        if options.enforce_all && !self.missing_enforced.is_empty() {
            return false;
        }
        if !options.ignore_extra_args && !self.extra.is_empty() {
            return false;
        }
        if options.require_all && !self.missing_ignored.is_empty() {
            return false;
        }
        true
    }

    /// The failing parts of this categorization, in report order.
    ///
    /// `auto_fail` yields a lone [`DiffSection::AutoFail`]. An empty result means the
    /// categorization passes under `options`.
    pub fn sections(&self, options: CompareOptions) -> Vec<DiffSection> {
        if options.auto_fail {
            return vec![DiffSection::AutoFail];
        }

        let mut out = Vec::new();
        if !self.failed.is_empty() {
            out.push(DiffSection::FailedArguments(
                self.failed
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ));
        }
        if options.enforce_all && !self.missing_enforced.is_empty() {
            out.push(DiffSection::MissingEnforced(
                self.missing_enforced.keys().cloned().collect(),
            ));
        }
        if !options.ignore_extra_args && !self.extra.is_empty() {
            out.push(DiffSection::ExtraArguments(
                self.extra.iter().cloned().collect(),
            ));
        }
        if options.require_all && !self.missing_ignored.is_empty() {
            out.push(DiffSection::MissingArguments(
                self.missing_ignored.iter().cloned().collect(),
            ));
        }
        out
    }
}

/// Entries of `a` whose key is absent from `b`. Values of `b` are never looked at.
pub fn set_difference<V: Clone, W>(
    a: &BTreeMap<String, V>,
    b: &BTreeMap<String, W>,
) -> BTreeMap<String, V> {
    a.iter()
        .filter(|(k, _)| !b.contains_key(*k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rule, values};
    use serde_json::json;

    fn opts() -> CompareOptions {
        CompareOptions::default()
    }

    #[test]
    fn categorize_enforced_value_matches() {
        let r = rule(&[("key", json!("value"))], &[], opts());
        let got = r.categorize(&values(&[("key", json!("value"))]));

        assert_eq!(
            got,
            Categorization {
                matched_enforced: AttributeMap::from([("key".to_string(), json!("value"))]),
                ..Categorization::default()
            }
        );
    }

    #[test]
    fn categorize_enforced_value_does_not_match() {
        let r = rule(&[("key", json!("value"))], &[], opts());
        let got = r.categorize(&values(&[("key", json!("value2"))]));

        assert_eq!(
            got.failed,
            BTreeMap::from([(
                "key".to_string(),
                FailedAttribute {
                    expected: json!("value"),
                    actual: json!("value2"),
                }
            )])
        );
        assert!(got.matched_enforced.is_empty());
    }

    #[test]
    fn categorize_ignored_and_extra_values() {
        let r = rule(&[("key", json!("value"))], &["ignored"], opts());
        let got = r.categorize(&values(&[
            ("key", json!("value")),
            ("ignored", json!("ignored")),
            ("extra", json!("sensitive")),
        ]));

        assert_eq!(got.matched_ignored, BTreeSet::from(["ignored".to_string()]));
        assert_eq!(got.extra, BTreeSet::from(["extra".to_string()]));
        assert!(got.failed.is_empty());
    }

    #[test]
    fn categorize_missing_enforced_and_ignored_values() {
        let r = rule(
            &[("key", json!("value")), ("second", json!("value"))],
            &["present", "absent"],
            opts(),
        );
        let got = r.categorize(&values(&[("key", json!("value")), ("present", json!(1))]));

        assert_eq!(
            got.missing_enforced,
            AttributeMap::from([("second".to_string(), json!("value"))])
        );
        assert_eq!(got.missing_ignored, BTreeSet::from(["absent".to_string()]));
        assert_eq!(got.matched_ignored, BTreeSet::from(["present".to_string()]));
    }

    #[test]
    fn computed_attribute_satisfies_any_expectation() {
        let r = rule(&[("self_link", json!("https://expected"))], &[], opts());
        let actual = values(&[("self_link", json!(null))])
            .with_computed(BTreeSet::from(["self_link".to_string()]));

        let got = r.categorize(&actual);
        assert!(got.matched_enforced.contains_key("self_link"));
        assert!(r.compare(&actual));
    }

    #[test]
    fn computed_attribute_absent_from_values_is_missing() {
        let options = CompareOptions {
            enforce_all: true,
            ..opts()
        };
        let r = rule(&[("id", json!("x"))], &[], options);
        let actual = values(&[]).with_computed(BTreeSet::from(["id".to_string()]));

        let got = r.categorize(&actual);
        assert!(got.matched_enforced.is_empty());
        assert_eq!(
            got.missing_enforced,
            AttributeMap::from([("id".to_string(), json!("x"))])
        );
        assert!(!r.compare(&actual));
        assert_eq!(r.diff(&actual), "Missing enforced arguments:\n  id");
    }

    #[test]
    fn enforced_and_ignored_name_is_only_enforced() {
        let r = rule(&[("key", json!("value"))], &["key"], opts());
        let got = r.categorize(&values(&[("key", json!("other"))]));

        assert!(got.failed.contains_key("key"));
        assert!(got.matched_ignored.is_empty());
        assert!(got.extra.is_empty());
    }

    #[test]
    fn structured_values_compare_exactly() {
        let r = rule(&[("labels", json!({"env": "prod", "team": "infra"}))], &[], opts());

        assert!(r.compare(&values(&[(
            "labels",
            json!({"team": "infra", "env": "prod"})
        )])));
        assert!(!r.compare(&values(&[("labels", json!({"env": "prod"}))])));
        assert!(!r.compare(&values(&[("labels", json!("env=prod"))])));
    }

    #[test]
    fn compare_cases() {
        struct Case {
            name: &'static str,
            enforced: Vec<(&'static str, Value)>,
            ignored: Vec<&'static str>,
            options: CompareOptions,
            values: Vec<(&'static str, Value)>,
            expected: bool,
            diff_contains: &'static [&'static str],
        }

        let cases = vec![
            Case {
                name: "enforced value matches",
                enforced: vec![("key", json!("value"))],
                ignored: vec![],
                options: opts(),
                values: vec![("key", json!("value"))],
                expected: true,
                diff_contains: &[],
            },
            Case {
                name: "enforced value does not match",
                enforced: vec![("key", json!("value2"))],
                ignored: vec![],
                options: opts(),
                values: vec![("key", json!("value"))],
                expected: false,
                diff_contains: &[
                    "Failed arguments:",
                    "key",
                    "Expected: value2",
                    "Actual:   value",
                ],
            },
            Case {
                name: "extra value that is ignored",
                enforced: vec![("key", json!("value"))],
                ignored: vec!["ignored"],
                options: opts(),
                values: vec![("key", json!("value")), ("ignored", json!("ignored"))],
                expected: true,
                diff_contains: &[],
            },
            Case {
                name: "extra value",
                enforced: vec![("key", json!("value"))],
                ignored: vec![],
                options: opts(),
                values: vec![("key", json!("value")), ("extra", json!("extra"))],
                expected: false,
                diff_contains: &["Extra arguments:", "extra"],
            },
            Case {
                name: "extra value with ignore_extra_args",
                enforced: vec![("key", json!("value"))],
                ignored: vec![],
                options: CompareOptions {
                    ignore_extra_args: true,
                    ..opts()
                },
                values: vec![("key", json!("value")), ("ignored", json!("ignored"))],
                expected: true,
                diff_contains: &[],
            },
            Case {
                name: "missing enforced value",
                enforced: vec![("key", json!("value")), ("second", json!("value"))],
                ignored: vec![],
                options: opts(),
                values: vec![("key", json!("value"))],
                expected: true,
                diff_contains: &[],
            },
            Case {
                name: "missing enforced value with enforce_all",
                enforced: vec![("key", json!("value")), ("second", json!("value"))],
                ignored: vec![],
                options: CompareOptions {
                    enforce_all: true,
                    ..opts()
                },
                values: vec![("key", json!("value"))],
                expected: false,
                diff_contains: &[],
            },
            Case {
                name: "ignored arg with extra value",
                enforced: vec![],
                ignored: vec!["key"],
                options: opts(),
                values: vec![("key", json!("value")), ("second", json!("value"))],
                expected: false,
                diff_contains: &[],
            },
            Case {
                name: "missing ignored value",
                enforced: vec![("enforced", json!("value"))],
                ignored: vec!["key", "second"],
                options: opts(),
                values: vec![("key", json!("value")), ("enforced", json!("value"))],
                expected: true,
                diff_contains: &[],
            },
            Case {
                name: "missing ignored value with require_all",
                enforced: vec![("enforced", json!("value"))],
                ignored: vec!["key", "second"],
                options: CompareOptions {
                    require_all: true,
                    ..opts()
                },
                values: vec![("key", json!("value")), ("enforced", json!("value"))],
                expected: false,
                diff_contains: &[],
            },
            Case {
                name: "auto_fail overrides a passing match",
                enforced: vec![("key", json!("value"))],
                ignored: vec![],
                options: CompareOptions {
                    auto_fail: true,
                    ..opts()
                },
                values: vec![("key", json!("value"))],
                expected: false,
                diff_contains: &[],
            },
            Case {
                name: "auto_fail with no enforced or ignored",
                enforced: vec![],
                ignored: vec![],
                options: CompareOptions {
                    auto_fail: true,
                    ..opts()
                },
                values: vec![],
                expected: false,
                diff_contains: &[],
            },
        ];

        for case in cases {
            let r = rule(&case.enforced, &case.ignored, case.options);
            let actual = values(&case.values);
            assert_eq!(r.compare(&actual), case.expected, "case: {}", case.name);

            let diff = r.diff(&actual);
            assert_eq!(
                diff.is_empty(),
                case.expected,
                "diff/compare disagree for case: {}",
                case.name
            );
            for needle in case.diff_contains {
                assert!(
                    diff.contains(needle),
                    "case {}: {needle:?} not in diff:\n{diff}",
                    case.name
                );
            }
        }
    }

    #[test]
    fn set_difference_cases() {
        let a = BTreeMap::from([
            ("keyA".to_string(), "valueA"),
            ("sharedKey1".to_string(), "sharedValue1"),
            ("sharedKey2".to_string(), "sharedValue2"),
        ]);
        let b = BTreeMap::from([
            ("keyB".to_string(), 0),
            ("sharedKey1".to_string(), 1),
            ("sharedKey2".to_string(), 2),
        ]);
        assert_eq!(
            set_difference(&a, &b),
            BTreeMap::from([("keyA".to_string(), "valueA")])
        );

        let distinct = BTreeMap::from([("keyB".to_string(), "valueB")]);
        assert_eq!(set_difference(&a, &distinct), a);

        assert!(set_difference(&a, &a).is_empty());
    }
}
