mod clauses;
mod rules;
mod table;

pub use clauses::{describe, ClauseSet, ClauseSetError, ClauseSpec, ENIGMA_SENTENCE};
pub use rules::{match_rules, Rule};
pub use table::{
    default_fallback, RuleTable, RuleTableError, FALLBACK_BLURB, FALLBACK_TITLE,
    RULE_TABLE_VERSION,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::QuestionCatalog;
use super::domain::{Recommendation, ResponseMap};

/// Strategy used to turn responses into a recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    /// First-match persona rules.
    #[default]
    Rules,
    /// Descriptive paragraph assembled from clauses.
    Describe,
}

impl MatchingMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Describe => "describe",
        }
    }
}

/// Stateless engine bundling the catalog with the configured rule table and clauses.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    catalog: Arc<QuestionCatalog>,
    rules: Option<RuleTable>,
    clauses: ClauseSet,
}

impl MatchingEngine {
    pub fn new(catalog: Arc<QuestionCatalog>, rules: Option<RuleTable>, clauses: ClauseSet) -> Self {
        Self {
            catalog,
            rules,
            clauses,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> Option<&RuleTable> {
        self.rules.as_ref()
    }

    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    /// `None` only when the rule strategy is requested without a rule table.
    pub fn recommend(&self, mode: MatchingMode, responses: &ResponseMap) -> Option<Recommendation> {
        match mode {
            MatchingMode::Rules => self
                .rules
                .as_ref()
                .map(|table| Recommendation::Persona(match_rules(responses, table))),
            MatchingMode::Describe => Some(Recommendation::Paragraph {
                paragraph: describe(responses, self.clauses.clauses(), &self.catalog),
            }),
        }
    }
}
