//! Public facade over the akashi engine.
//!
//! Build a [`policy::Ruleset`], describe plan changes as [`model::ResourceChange`]s, and call
//! [`evaluate`]. Parsing ruleset and plan files lives in `akashi-settings` and `akashi-plan`.

#![forbid(unsafe_code)]

pub use akashi_domain::{
    Categorization, ChangeComparer, Direction, Evaluator, FailedAttribute, OutcomeStatus,
    ResolvedRule, ResourceOutcome, RuleIndex, RuleMatch, Specificity, diff, evaluate, model,
    policy, report, set_difference,
};

#[cfg(test)]
mod tests {
    use super::*;
    use model::{AttributeMap, ChangeAction, ResourceChange};
    use policy::{CompareOptions, RuleDefinition, Ruleset, RulesetSection};
    use serde_json::json;

    #[test]
    fn facade_evaluates_a_change() {
        let ruleset = Ruleset {
            created: Some(RulesetSection {
                strict: true,
                default: CompareOptions::default(),
                rules: vec![RuleDefinition {
                    resource_type: Some("google_storage_bucket".to_string()),
                    enforced: AttributeMap::from([("location".to_string(), json!("US"))]),
                    ..RuleDefinition::default()
                }],
            }),
            ..Ruleset::default()
        };
        let change = ResourceChange {
            address: "google_storage_bucket.b".to_string(),
            resource_type: "google_storage_bucket".to_string(),
            name: "b".to_string(),
            action: ChangeAction::Create,
            after: AttributeMap::from([("location".to_string(), json!("US"))]),
            ..ResourceChange::default()
        };

        let report = evaluate(&[change], &ruleset);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Pass);
        assert_eq!(report.outcomes[0].matched_by, Some(Specificity::Type));
    }
}
