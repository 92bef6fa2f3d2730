use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::catalog::{CatalogView, QuestionCatalog};
use super::domain::{Recommendation, ResponseMap};
use super::matching::{MatchingEngine, MatchingMode};
use super::summary::{summarize, ResponseSummary};

/// Body of a recommendation request. `responses` wins over the legacy `answers` shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponseMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub mode: MatchingMode,
}

impl SubmitRequest {
    pub fn new(responses: ResponseMap, mode: MatchingMode) -> Self {
        Self {
            responses: Some(responses),
            answers: None,
            mode,
        }
    }

    pub fn into_responses(self) -> ResponseMap {
        match (self.responses, self.answers) {
            (Some(responses), _) => responses,
            (None, Some(answers)) => ResponseMap::from_single_answers(answers),
            (None, None) => ResponseMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub result: Recommendation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub responses: ResponseMap,
}

/// Facade the HTTP layer and CLI call into.
pub struct RecommendationService {
    engine: MatchingEngine,
}

impl RecommendationService {
    pub fn new(engine: MatchingEngine) -> Self {
        Self { engine }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        self.engine.catalog()
    }

    pub fn has_rules(&self) -> bool {
        self.engine.rules().is_some()
    }

    /// Public catalog projection.
    pub fn questions(&self) -> CatalogView {
        self.engine.catalog().view()
    }

    pub fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, ServiceError> {
        let mode = request.mode;
        let responses = request.into_responses();

        let result = self.engine.recommend(mode, &responses).ok_or_else(|| {
            error!(mode = mode.label(), "recommendation requested without a rule table");
            ServiceError::RulesUnavailable
        })?;

        info!(
            mode = mode.label(),
            captured = responses.len(),
            kind = result.kind(),
            length = result.headline().len(),
            "recommendation issued"
        );

        Ok(SubmitResponse { result })
    }

    pub fn summarize(&self, responses: &ResponseMap) -> ResponseSummary {
        summarize(responses, self.engine.catalog())
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no rule table is configured")]
    RulesUnavailable,
}
