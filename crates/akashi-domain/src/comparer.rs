//! Per-direction comparison of resource changes against a rule index.

use crate::diff::{self, DiffSection};
use crate::index::{RuleIndex, Specificity};
use crate::model::{ResourceChange, ResourceValues};
use crate::policy::RulesetSection;
use crate::rule::Categorization;
use akashi_types::ids;

/// Which side of a change is validated, and against which ruleset section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Create,
    Delete,
    Update,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Create => "create",
            Direction::Delete => "delete",
            Direction::Update => "update",
        }
    }

    pub fn check_id(self) -> &'static str {
        match self {
            Direction::Create => ids::CHECK_PLAN_CREATED,
            Direction::Delete => ids::CHECK_PLAN_DESTROYED,
            Direction::Update => ids::CHECK_PLAN_UPDATED,
        }
    }

    /// Ruleset section holding the rules for this direction.
    pub fn section_key(self) -> &'static str {
        match self {
            Direction::Create => "created_resources",
            Direction::Delete => "destroyed_resources",
            Direction::Update => "updated_resources",
        }
    }

    pub fn snapshot(self, change: &ResourceChange) -> ResourceValues {
        match self {
            Direction::Create => change.after_values(),
            Direction::Delete => change.before_values(),
            Direction::Update => change.changed_values(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    Pass,
    Fail,
    Unmatched,
    Skipped,
}

/// Structured result of checking one change in one direction.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceOutcome {
    pub address: String,
    pub direction: Direction,
    pub status: OutcomeStatus,
    /// Strictness of the section; decides whether `Unmatched` passes.
    pub strict: bool,
    pub matched_by: Option<Specificity>,
    pub categorization: Option<Categorization>,
    /// Empty unless `status` is `Fail`.
    pub sections: Vec<DiffSection>,
}

impl ResourceOutcome {
    pub(crate) fn skipped(change: &ResourceChange, direction: Direction) -> Self {
        Self {
            address: change.address.clone(),
            direction,
            status: OutcomeStatus::Skipped,
            strict: false,
            matched_by: None,
            categorization: None,
            sections: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        match self.status {
            OutcomeStatus::Pass | OutcomeStatus::Skipped => true,
            OutcomeStatus::Fail => false,
            OutcomeStatus::Unmatched => !self.strict,
        }
    }

    /// Attribute-level diff without the address line.
    pub fn diff(&self) -> String {
        diff::render_sections(&self.sections)
    }

    /// Address-qualified report line, with the attribute diff nested below failures.
    pub fn report_line(&self) -> String {
        match self.status {
            OutcomeStatus::Pass => format!("✓ {}", self.address),
            OutcomeStatus::Fail => format!("× {}\n{}", self.address, self.diff()),
            OutcomeStatus::Unmatched if self.strict => {
                format!("× {} (no matching rule)", self.address)
            }
            OutcomeStatus::Unmatched => format!("! {} (no matching rule)", self.address),
            OutcomeStatus::Skipped => format!("- {} (not evaluated)", self.address),
        }
    }
}

/// Validates one direction of resource changes against one ruleset section.
#[derive(Clone, Debug)]
pub struct ChangeComparer {
    direction: Direction,
    index: RuleIndex,
}

impl ChangeComparer {
    pub fn new(direction: Direction, section: &RulesetSection) -> Self {
        Self {
            direction,
            index: RuleIndex::build(section),
        }
    }

    /// Validates the after-state of created resources.
    pub fn create(section: &RulesetSection) -> Self {
        Self::new(Direction::Create, section)
    }

    /// Validates the before-state of destroyed resources.
    pub fn delete(section: &RulesetSection) -> Self {
        Self::new(Direction::Delete, section)
    }

    /// Validates the changing attributes of resources updated in place.
    pub fn update(section: &RulesetSection) -> Self {
        Self::new(Direction::Update, section)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    pub fn compare(&self, change: &ResourceChange) -> bool {
        match self.index.resolve(&change.name, &change.resource_type) {
            Some(m) => m.rule.compare(&self.direction.snapshot(change)),
            None => !self.index.is_strict(),
        }
    }

    /// Report line and verdict for one change.
    pub fn diff(&self, change: &ResourceChange) -> (String, bool) {
        let outcome = self.evaluate(change);
        (outcome.report_line(), outcome.passed())
    }

    pub fn evaluate(&self, change: &ResourceChange) -> ResourceOutcome {
        let strict = self.index.is_strict();
        let Some(m) = self.index.resolve(&change.name, &change.resource_type) else {
            return ResourceOutcome {
                address: change.address.clone(),
                direction: self.direction,
                status: OutcomeStatus::Unmatched,
                strict,
                matched_by: None,
                categorization: None,
                sections: Vec::new(),
            };
        };

        let categorization = m.rule.categorize(&self.direction.snapshot(change));
        let sections = categorization.sections(m.rule.options());
        let status = if sections.is_empty() {
            OutcomeStatus::Pass
        } else {
            OutcomeStatus::Fail
        };

        ResourceOutcome {
            address: change.address.clone(),
            direction: self.direction,
            status,
            strict,
            matched_by: Some(m.specificity),
            categorization: Some(categorization),
            sections,
        }
    }
}
