use crate::comparer::{ChangeComparer, Direction, OutcomeStatus, ResourceOutcome};
use crate::findings;
use crate::model::{ChangeAction, ResourceChange};
use crate::policy::Ruleset;
use crate::report::{DomainReport, OutcomeCounts};
use akashi_types::{Verdict, saturating_count};
use rayon::prelude::*;

/// One comparer per ruleset section that is present.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    created: Option<ChangeComparer>,
    destroyed: Option<ChangeComparer>,
    updated: Option<ChangeComparer>,
}

impl Evaluator {
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            created: ruleset.created.as_ref().map(ChangeComparer::create),
            destroyed: ruleset.destroyed.as_ref().map(ChangeComparer::delete),
            updated: ruleset.updated.as_ref().map(ChangeComparer::update),
        }
    }

    pub fn comparer(&self, direction: Direction) -> Option<&ChangeComparer> {
        match direction {
            Direction::Create => self.created.as_ref(),
            Direction::Delete => self.destroyed.as_ref(),
            Direction::Update => self.updated.as_ref(),
        }
    }

    /// Outcomes for one change: none for no-op/read, two for a replacement.
    pub fn evaluate_change(&self, change: &ResourceChange) -> Vec<ResourceOutcome> {
        directions(change.action)
            .iter()
            .map(|&direction| match self.comparer(direction) {
                Some(comparer) => comparer.evaluate(change),
                None => ResourceOutcome::skipped(change, direction),
            })
            .collect()
    }
}

fn directions(action: ChangeAction) -> &'static [Direction] {
    match action {
        ChangeAction::NoOp | ChangeAction::Read => &[],
        ChangeAction::Create => &[Direction::Create],
        ChangeAction::Delete => &[Direction::Delete],
        ChangeAction::Update => &[Direction::Update],
        ChangeAction::Replace => &[Direction::Delete, Direction::Create],
    }
}

pub fn evaluate(changes: &[ResourceChange], ruleset: &Ruleset) -> DomainReport {
    let evaluator = Evaluator::new(ruleset);

    // Changes are independent; collect keeps plan order.
    let per_change: Vec<Vec<ResourceOutcome>> = changes
        .par_iter()
        .map(|change| evaluator.evaluate_change(change))
        .collect();
    let outcomes: Vec<ResourceOutcome> = per_change.into_iter().flatten().collect();

    let findings = outcomes.iter().flat_map(findings::for_outcome).collect();
    let counts = OutcomeCounts::from_outcomes(&outcomes);
    let verdict = compute_verdict(&outcomes);

    DomainReport {
        verdict,
        resources_total: saturating_count(changes.len()),
        outcomes,
        findings,
        counts,
    }
}

fn compute_verdict(outcomes: &[ResourceOutcome]) -> Verdict {
    if outcomes.iter().any(|o| !o.passed()) {
        return Verdict::Fail;
    }
    if outcomes.iter().any(|o| o.status == OutcomeStatus::Unmatched) {
        return Verdict::Warn;
    }
    Verdict::Pass
}
