use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::quiz::catalog::QuestionCatalog;
use crate::quiz::domain::{Persona, ResponseMap};
use crate::quiz::matching::{ClauseSet, ClauseSpec, MatchingEngine, Rule, RuleTable};
use crate::quiz::service::RecommendationService;

pub(super) fn responses(entries: &[(&str, &[&str])]) -> ResponseMap {
    entries
        .iter()
        .map(|(question_id, option_ids)| {
            (
                question_id.to_string(),
                option_ids.iter().map(|id| id.to_string()).collect(),
            )
        })
        .collect()
}

pub(super) fn rule(conditions: &[(&str, &str)], title: &str) -> Rule {
    let when: BTreeMap<String, String> = conditions
        .iter()
        .map(|(question_id, option_id)| (question_id.to_string(), option_id.to_string()))
        .collect();
    Rule::new(when, Persona::new(title, format!("{title} blurb")))
}

pub(super) fn chaos_rules() -> RuleTable {
    RuleTable::new(vec![rule(&[("mess", "mess_joyful")], "Chaos Crafter")])
}

pub(super) fn persona_rules() -> RuleTable {
    RuleTable::new(vec![
        rule(
            &[("mess", "mess_joyful"), ("space", "space_floor")],
            "Floor Goblin",
        ),
        rule(&[("mess", "mess_joyful")], "Chaos Crafter"),
        rule(&[("where_craft", "where_tv")], "Sofa Stitcher"),
        rule(&[("mess", "mess_editorial")], "Editorial Minimalist"),
    ])
}

pub(super) fn place_clauses() -> Vec<ClauseSpec> {
    vec![
        ClauseSpec::new("where_craft", "You craft {label}."),
        ClauseSpec::new("space", "You spread out: {label}."),
    ]
}

pub(super) fn catalog() -> Arc<QuestionCatalog> {
    Arc::new(QuestionCatalog::standard())
}

pub(super) fn service_with_rules(rules: Option<RuleTable>) -> RecommendationService {
    RecommendationService::new(MatchingEngine::new(catalog(), rules, ClauseSet::standard()))
}

pub(super) fn service() -> RecommendationService {
    service_with_rules(Some(persona_rules()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
