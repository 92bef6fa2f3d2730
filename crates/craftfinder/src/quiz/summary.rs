use serde::Serialize;

use super::catalog::QuestionCatalog;
use super::domain::{AnswerStatus, ResponseMap};

/// One captured question echoed back with readable copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectedAnswer {
    pub question_id: String,
    pub question_prompt: String,
    /// Empty when the question was skipped.
    pub option_labels: Vec<String>,
    pub status: AnswerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseSummary {
    pub captured: usize,
    pub answered: usize,
    pub skipped: usize,
    pub answers: Vec<ReflectedAnswer>,
}

/// Reflects captured answers in catalog order; unknown questions trail, ordered by id.
pub fn summarize(responses: &ResponseMap, catalog: &QuestionCatalog) -> ResponseSummary {
    let mut entries: Vec<(&str, &[String])> = responses.iter().collect();
    entries.sort_by_key(|(question_id, _)| catalog.position(question_id).unwrap_or(usize::MAX));

    let answers: Vec<ReflectedAnswer> = entries
        .into_iter()
        .map(|(question_id, option_ids)| {
            let question = catalog.question(question_id);
            let question_prompt = question
                .map(|question| question.prompt.clone())
                .unwrap_or_else(|| format!("Unknown question ({question_id})"));
            let option_labels = option_ids
                .iter()
                .map(|option_id| catalog.resolve_label(question_id, option_id))
                .collect();

            ReflectedAnswer {
                question_id: question_id.to_string(),
                question_prompt,
                option_labels,
                status: responses.status(question_id),
            }
        })
        .collect();

    let answered = answers
        .iter()
        .filter(|answer| answer.status == AnswerStatus::Answered)
        .count();

    ResponseSummary {
        captured: answers.len(),
        answered,
        skipped: answers.len() - answered,
        answers,
    }
}
