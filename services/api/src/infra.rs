use craftfinder::config::{ConfigError, ScoringConfig};
use craftfinder::quiz::{MatchingEngine, MatchingMode, QuestionCatalog, RecommendationService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Decodes and validates the scoring data once, then wires the service.
pub(crate) fn build_service(scoring: &ScoringConfig) -> Result<RecommendationService, ConfigError> {
    let catalog = Arc::new(QuestionCatalog::standard());
    for question_id in catalog.flow_issues() {
        warn!(question_id, "quiz flow references a missing question");
    }

    let rules = scoring.rule_table(&catalog)?;
    match &rules {
        Some(table) => info!(
            version = table.version(),
            rules = table.rules().len(),
            "rule table loaded"
        ),
        None => warn!("no rule table configured; rule-based recommendations will fail"),
    }

    let clauses = scoring.clause_set(&catalog)?;

    Ok(RecommendationService::new(MatchingEngine::new(
        catalog, rules, clauses,
    )))
}

/// Parses `question_id=option_id[,option_id...]`; an empty right-hand side records a skip.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, Vec<String>), String> {
    let (question_id, options) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=OPTION[,OPTION], got '{raw}'"))?;

    let question_id = question_id.trim();
    if question_id.is_empty() {
        return Err(format!("missing question id in '{raw}'"));
    }

    let option_ids = options
        .split(',')
        .map(str::trim)
        .filter(|option_id| !option_id.is_empty())
        .map(str::to_string)
        .collect();

    Ok((question_id.to_string(), option_ids))
}

pub(crate) fn parse_mode(raw: &str) -> Result<MatchingMode, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rules" => Ok(MatchingMode::Rules),
        "describe" => Ok(MatchingMode::Describe),
        other => Err(format!("unknown mode '{other}' (expected rules or describe)")),
    }
}
