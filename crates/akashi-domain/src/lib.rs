//! Pure policy evaluation (no IO).
//!
//! Input: a resolved ruleset and resource changes parsed elsewhere.
//! Output: per-resource outcomes, findings, and a verdict.

#![forbid(unsafe_code)]

pub mod comparer;
pub mod diff;
pub mod index;
pub mod model;
pub mod policy;
pub mod report;
pub mod rule;

mod engine;
mod fingerprint;
mod findings;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use comparer::{ChangeComparer, Direction, OutcomeStatus, ResourceOutcome};
pub use engine::{Evaluator, evaluate};
pub use index::{RuleIndex, RuleMatch, Specificity};
pub use rule::{Categorization, FailedAttribute, ResolvedRule, set_difference};
