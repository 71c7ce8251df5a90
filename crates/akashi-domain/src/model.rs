use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Attribute name -> value, for one side of a change or for a rule's expectations.
pub type AttributeMap = BTreeMap<String, Value>;

/// The attribute values of one side of a resource change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceValues {
    pub values: AttributeMap,

    /// Attributes whose value is only known after apply.
    pub computed: BTreeSet<String>,
}

impl ResourceValues {
    pub fn new(values: AttributeMap) -> Self {
        Self {
            values,
            computed: BTreeSet::new(),
        }
    }

    pub fn with_computed(mut self, computed: BTreeSet<String>) -> Self {
        self.computed = computed;
        self
    }

    pub fn is_computed(&self, attribute: &str) -> bool {
        self.computed.contains(attribute)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChangeAction {
    #[default]
    NoOp,
    Create,
    Read,
    Update,
    Delete,
    /// Delete and re-create, in either order.
    Replace,
}

/// One resource change from a plan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceChange {
    /// Fully qualified address, e.g. `module.net.google_compute_network.main[0]`.
    pub address: String,
    pub resource_type: String,
    pub name: String,
    pub provider_name: Option<String>,
    pub action: ChangeAction,
    pub before: AttributeMap,
    pub after: AttributeMap,
    pub computed: BTreeSet<String>,
}

impl ResourceChange {
    pub fn after_values(&self) -> ResourceValues {
        ResourceValues::new(self.after.clone()).with_computed(self.computed.clone())
    }

    /// A destroyed resource has no unknown values.
    pub fn before_values(&self) -> ResourceValues {
        ResourceValues::new(self.before.clone())
    }

    /// The after-state restricted to attributes that change, plus computed ones.
    pub fn changed_values(&self) -> ResourceValues {
        let values = self
            .after
            .iter()
            .filter(|(k, v)| self.computed.contains(*k) || self.before.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        ResourceValues::new(values).with_computed(self.computed.clone())
    }
}
