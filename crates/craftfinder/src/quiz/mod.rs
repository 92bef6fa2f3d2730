//! Quiz catalog, response model, and the engines that turn answers into a
//! recommendation, plus the service and router that expose them.

pub mod catalog;
pub mod domain;
pub mod matching;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogView, QuestionCatalog, CATALOG_VERSION};
pub use domain::{
    AnswerStatus, Persona, Question, QuestionType, QuizOption, Recommendation, ResponseMap,
    StoredResponses, SESSION_STORAGE_KEY,
};
pub use matching::{
    describe, match_rules, ClauseSet, ClauseSetError, ClauseSpec, MatchingEngine, MatchingMode,
    Rule, RuleTable, RuleTableError, ENIGMA_SENTENCE,
};
pub use router::recommendation_router;
pub use service::{
    RecommendationService, ServiceError, SubmitRequest, SubmitResponse, SummaryRequest,
};
pub use summary::{summarize, ReflectedAnswer, ResponseSummary};
