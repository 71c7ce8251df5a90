//! Property-based tests for the comparison engine.

use crate::comparer::{ChangeComparer, OutcomeStatus};
use crate::engine::evaluate;
use crate::index::{RuleIndex, Specificity};
use crate::model::{AttributeMap, ChangeAction, ResourceValues};
use crate::policy::{CompareOptions, Ruleset};
use crate::rule::{ResolvedRule, set_difference};
use crate::test_support::{change, definition, section};
use akashi_types::Verdict;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-100i64..100).prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
        prop::collection::vec("[a-z]{1,3}", 0..3).prop_map(|v| json!(v)),
    ]
}

fn arb_attrs() -> impl Strategy<Value = AttributeMap> {
    prop::collection::btree_map(arb_name(), arb_value(), 0..6)
}

fn arb_options() -> impl Strategy<Value = CompareOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(enforce_all, ignore_extra_args, require_all, auto_fail)| CompareOptions {
            enforce_all,
            ignore_extra_args,
            require_all,
            auto_fail,
        },
    )
}

fn arb_rule() -> impl Strategy<Value = ResolvedRule> {
    (
        arb_attrs(),
        prop::collection::btree_set(arb_name(), 0..4),
        arb_options(),
    )
        .prop_map(|(enforced, ignored, options)| ResolvedRule::new(enforced, ignored, options))
}

proptest! {
    #[test]
    fn auto_fail_always_fails(rule in arb_rule(), actual in arb_attrs()) {
        let options = CompareOptions { auto_fail: true, ..rule.options() };
        let rule = ResolvedRule::new(rule.enforced().clone(), rule.ignored().clone(), options);
        let actual = ResourceValues::new(actual);

        prop_assert!(!rule.compare(&actual));
        prop_assert_eq!(rule.diff(&actual), "AutoFail set to true");
    }

    #[test]
    fn compare_passes_exactly_when_diff_is_empty(rule in arb_rule(), actual in arb_attrs()) {
        let actual = ResourceValues::new(actual);
        prop_assert_eq!(rule.compare(&actual), rule.diff(&actual).is_empty());
    }

    #[test]
    fn empty_rule_without_options_passes_only_empty_values(actual in arb_attrs()) {
        let rule = ResolvedRule::default();
        let actual = ResourceValues::new(actual);
        prop_assert_eq!(rule.compare(&actual), actual.values.is_empty());
    }

    #[test]
    fn values_equal_to_enforced_always_pass(enforced in arb_attrs(), options in arb_options()) {
        let options = CompareOptions { auto_fail: false, ..options };
        let rule = ResolvedRule::new(enforced.clone(), BTreeSet::new(), options);
        prop_assert!(rule.compare(&ResourceValues::new(enforced)));
    }

    #[test]
    fn categorization_partitions_every_name(rule in arb_rule(), actual in arb_attrs()) {
        let c = rule.categorize(&ResourceValues::new(actual.clone()));

        let mut seen = BTreeSet::new();
        let buckets = c.matched_enforced.keys()
            .chain(c.failed.keys())
            .chain(c.matched_ignored.iter())
            .chain(c.extra.iter())
            .chain(c.missing_enforced.keys())
            .chain(c.missing_ignored.iter());
        for name in buckets {
            prop_assert!(seen.insert(name.clone()), "{} landed in two buckets", name);
        }

        let expected: BTreeSet<String> = rule.enforced().keys()
            .chain(rule.ignored().iter())
            .chain(actual.keys())
            .cloned()
            .collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn set_difference_keeps_only_keys_absent_from_other(a in arb_attrs(), b in arb_attrs()) {
        let d = set_difference(&a, &b);
        for (k, v) in &d {
            prop_assert!(!b.contains_key(k));
            prop_assert_eq!(Some(v), a.get(k));
        }
        for k in a.keys() {
            prop_assert!(d.contains_key(k) || b.contains_key(k));
        }
    }

    #[test]
    fn pair_rule_beats_name_and_type_rules(name in arb_name(), resource_type in arb_name()) {
        let s = section(false, vec![
            definition(None, Some(&resource_type), &[]),
            definition(Some(&name), None, &[]),
            definition(Some(&name), Some(&resource_type), &[]),
        ]);
        let index = RuleIndex::build(&s);

        let m = index.resolve(&name, &resource_type);
        prop_assert_eq!(m.map(|m| m.specificity), Some(Specificity::TypeAndName));
    }

    #[test]
    fn verdict_follows_outcomes(
        afters in prop::collection::vec(arb_attrs(), 1..8),
        strict in any::<bool>(),
    ) {
        let s = section(strict, vec![definition(None, Some("bucket"), &[("location", json!("US"))])]);
        let ruleset = Ruleset { created: Some(s.clone()), ..Ruleset::default() };
        let changes: Vec<_> = afters
            .iter()
            .enumerate()
            .map(|(i, after)| {
                let resource_type = if i % 3 == 0 { "disk" } else { "bucket" };
                let mut c = change(resource_type, &format!("r{i}"), ChangeAction::Create, &[], &[]);
                c.after = after.clone();
                c
            })
            .collect();

        let report = evaluate(&changes, &ruleset);
        let comparer = ChangeComparer::create(&s);
        let any_failed = changes.iter().any(|c| !comparer.compare(c));
        let any_unmatched = report.outcomes.iter().any(|o| o.status == OutcomeStatus::Unmatched);

        let expected = if any_failed {
            Verdict::Fail
        } else if any_unmatched {
            Verdict::Warn
        } else {
            Verdict::Pass
        };
        prop_assert_eq!(report.verdict, expected);
        prop_assert_eq!(report.outcomes.len(), changes.len());
    }
}
