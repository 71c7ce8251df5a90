use crate::policy::RulesetSection;
use crate::rule::ResolvedRule;
use std::collections::BTreeMap;

/// Which key selected a rule. Earlier variants take precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    TypeAndName,
    Name,
    Type,
}

impl Specificity {
    pub fn as_str(self) -> &'static str {
        match self {
            Specificity::TypeAndName => "type_and_name",
            Specificity::Name => "name",
            Specificity::Type => "type",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleMatch<'a> {
    pub specificity: Specificity,
    pub rule: &'a ResolvedRule,
}

/// Rules of one section keyed for lookup. Built once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct RuleIndex {
    strict: bool,
    by_type_and_name: BTreeMap<String, ResolvedRule>,
    by_name: BTreeMap<String, ResolvedRule>,
    by_type: BTreeMap<String, ResolvedRule>,
}

impl RuleIndex {
    /// Definitions with neither name nor type are skipped; later definitions replace
    /// earlier ones with the same key.
    pub fn build(section: &RulesetSection) -> Self {
        let mut index = RuleIndex {
            strict: section.strict,
            ..RuleIndex::default()
        };

        for def in &section.rules {
            let rule = ResolvedRule::from_definition(def, section.default);
            let name = def.name.as_deref().filter(|s| !s.is_empty());
            let resource_type = def.resource_type.as_deref().filter(|s| !s.is_empty());

            match (resource_type, name) {
                (Some(t), Some(n)) => {
                    index.by_type_and_name.insert(type_and_name_key(t, n), rule);
                }
                (None, Some(n)) => {
                    index.by_name.insert(n.to_string(), rule);
                }
                (Some(t), None) => {
                    index.by_type.insert(t.to_string(), rule);
                }
                (None, None) => {}
            }
        }

        index
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn len(&self) -> usize {
        self.by_type_and_name.len() + self.by_name.len() + self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve(&self, name: &str, resource_type: &str) -> Option<RuleMatch<'_>> {
        if let Some(rule) = self
            .by_type_and_name
            .get(&type_and_name_key(resource_type, name))
        {
            return Some(RuleMatch {
                specificity: Specificity::TypeAndName,
                rule,
            });
        }
        if let Some(rule) = self.by_name.get(name) {
            return Some(RuleMatch {
                specificity: Specificity::Name,
                rule,
            });
        }
        self.by_type.get(resource_type).map(|rule| RuleMatch {
            specificity: Specificity::Type,
            rule,
        })
    }
}

fn type_and_name_key(resource_type: &str, name: &str) -> String {
    format!("{resource_type}.{name}")
}
