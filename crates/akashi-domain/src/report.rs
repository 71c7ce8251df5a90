use crate::comparer::{OutcomeStatus, ResourceOutcome};
use akashi_types::{Finding, Verdict};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub passed: u32,
    pub failed: u32,
    /// All unmatched outcomes, strict or not.
    pub unmatched: u32,
    pub skipped: u32,
}

impl OutcomeCounts {
    pub fn from_outcomes(outcomes: &[ResourceOutcome]) -> Self {
        let mut counts = OutcomeCounts::default();
        for o in outcomes {
            match o.status {
                OutcomeStatus::Pass => counts.passed = counts.passed.saturating_add(1),
                OutcomeStatus::Fail => counts.failed = counts.failed.saturating_add(1),
                OutcomeStatus::Unmatched => counts.unmatched = counts.unmatched.saturating_add(1),
                OutcomeStatus::Skipped => counts.skipped = counts.skipped.saturating_add(1),
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// Resource changes in the input, before direction fan-out.
    pub resources_total: u32,
    pub outcomes: Vec<ResourceOutcome>,
    pub findings: Vec<Finding>,
    pub counts: OutcomeCounts,
}
