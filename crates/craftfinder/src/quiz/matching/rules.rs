use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Persona, ResponseMap};
use super::table::RuleTable;

/// Conjunction of single-value equality constraints paired with an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub when: BTreeMap<String, String>,
    pub result: Persona,
}

impl Rule {
    pub fn new(when: BTreeMap<String, String>, result: Persona) -> Self {
        Self { when, result }
    }

    /// Every condition must see exactly the required option as the sole selection.
    /// A rule without conditions matches any response map.
    pub fn matches(&self, responses: &ResponseMap) -> bool {
        self.when.iter().all(|(question_id, required)| {
            responses.single_selection(question_id) == Some(required.as_str())
        })
    }
}

pub(crate) fn first_match<'a>(
    rules: &'a [Rule],
    responses: &ResponseMap,
) -> Option<(usize, &'a Rule)> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(responses))
}

/// Result of the earliest matching rule, or the table's fallback persona.
pub fn match_rules(responses: &ResponseMap, table: &RuleTable) -> Persona {
    table
        .first_match(responses)
        .map(|(_, rule)| rule.result.clone())
        .unwrap_or_else(|| table.fallback().clone())
}
