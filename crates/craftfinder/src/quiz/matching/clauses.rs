use serde::{Deserialize, Serialize};

use super::super::catalog::QuestionCatalog;
use super::super::domain::ResponseMap;

/// Returned when no clause had an answer to work with.
pub const ENIGMA_SENTENCE: &str =
    "You are a crafting enigma: mysterious, unpredictable, and impossible to pin down.";

pub const LABEL_PLACEHOLDER: &str = "{label}";
pub const LABELS_PLACEHOLDER: &str = "{labels}";

/// Sentence fragment included only when its question has an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSpec {
    pub question_id: String,
    /// Fragment with a `{label}` placeholder.
    pub template: String,
    /// Fragment with a `{labels}` placeholder, used when several options were chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_template: Option<String>,
}

impl ClauseSpec {
    pub fn new(question_id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            template: template.into(),
            multi_template: None,
        }
    }

    pub fn with_multi(mut self, multi_template: impl Into<String>) -> Self {
        self.multi_template = Some(multi_template.into());
        self
    }

    /// Fills the fragment from resolved labels; nothing to say without labels.
    pub fn render(&self, labels: &[String]) -> Option<String> {
        match labels {
            [] => None,
            [label] => Some(self.template.replace(LABEL_PLACEHOLDER, label)),
            many => {
                let joined = join_labels(many);
                Some(match &self.multi_template {
                    Some(template) => template.replace(LABELS_PLACEHOLDER, &joined),
                    None => self.template.replace(LABEL_PLACEHOLDER, &joined),
                })
            }
        }
    }
}

/// Ordered clauses making up the descriptive paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseSet {
    clauses: Vec<ClauseSpec>,
}

impl ClauseSet {
    pub fn new(clauses: Vec<ClauseSpec>) -> Self {
        Self { clauses }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            ClauseSpec::new("where_craft", "Your natural crafting spot: {label}."),
            ClauseSpec::new("space", "Room to work: {label}."),
            ClauseSpec::new("social", "On company: {label}."),
            ClauseSpec::new("computers", "On screens: {label}."),
            ClauseSpec::new("mess", "On mess: {label}."),
            ClauseSpec::new("sensory_avoid", "Sensory dealbreaker: {label}.")
                .with_multi("Sensory dealbreakers: {labels}."),
            ClauseSpec::new("work_style", "Your rhythm: {label}."),
            ClauseSpec::new("duration", "Ideal project length: {label}."),
            ClauseSpec::new("mental_energy", "Brain power: {label}."),
            ClauseSpec::new("style", "The look you are after: {label}."),
            ClauseSpec::new("outputs", "What happens to the finished piece: {label}."),
        ])
    }

    /// Decodes a JSON array of clauses and checks each template's placeholders.
    pub fn from_json(raw: &str) -> Result<Self, ClauseSetError> {
        let set: Self = serde_json::from_str(raw)?;
        set.check_templates()?;
        Ok(set)
    }

    pub fn clauses(&self) -> &[ClauseSpec] {
        &self.clauses
    }

    pub fn validate_against(&self, catalog: &QuestionCatalog) -> Result<(), ClauseSetError> {
        match self
            .clauses
            .iter()
            .find(|clause| catalog.question(&clause.question_id).is_none())
        {
            Some(clause) => Err(ClauseSetError::UnknownQuestion(clause.question_id.clone())),
            None => Ok(()),
        }
    }

    fn check_templates(&self) -> Result<(), ClauseSetError> {
        for clause in &self.clauses {
            if !clause.template.contains(LABEL_PLACEHOLDER) {
                return Err(ClauseSetError::MissingPlaceholder {
                    question_id: clause.question_id.clone(),
                    placeholder: LABEL_PLACEHOLDER,
                });
            }
            if let Some(multi) = &clause.multi_template {
                if !multi.contains(LABELS_PLACEHOLDER) {
                    return Err(ClauseSetError::MissingPlaceholder {
                        question_id: clause.question_id.clone(),
                        placeholder: LABELS_PLACEHOLDER,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ClauseSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reasons a clause set is refused at load time.
#[derive(Debug, thiserror::Error)]
pub enum ClauseSetError {
    #[error("clause set is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("clause for '{question_id}' is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        question_id: String,
        placeholder: &'static str,
    },
    #[error("clause references unknown question '{0}'")]
    UnknownQuestion(String),
}

/// Builds the descriptive paragraph from whichever clauses have answers.
pub fn describe(responses: &ResponseMap, clauses: &[ClauseSpec], catalog: &QuestionCatalog) -> String {
    let fragments: Vec<String> = clauses
        .iter()
        .filter_map(|clause| {
            let selections = responses.selections(&clause.question_id)?;
            let labels = resolve_labels(catalog, &clause.question_id, selections);
            clause.render(&labels)
        })
        .collect();

    let paragraph = normalize_whitespace(&fragments.join(" "));
    if paragraph.is_empty() {
        ENIGMA_SENTENCE.to_string()
    } else {
        paragraph
    }
}

/// Single-choice questions contribute their first selection, multi-choice all of them.
fn resolve_labels(catalog: &QuestionCatalog, question_id: &str, selections: &[String]) -> Vec<String> {
    let take = match catalog.question(question_id) {
        Some(question) if question.is_multi() => selections.len(),
        _ => 1,
    };

    selections
        .iter()
        .take(take)
        .map(|option_id| catalog.resolve_label(question_id, option_id))
        .collect()
}

/// "a", "a and b", "a, b and c".
fn join_labels(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_labels_reads_as_a_list() {
        let labels = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(join_labels(&labels(&["a"])), "a");
        assert_eq!(join_labels(&labels(&["a", "b"])), "a and b");
        assert_eq!(join_labels(&labels(&["a", "b", "c"])), "a, b and c");
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize_whitespace("  one \n two\t\tthree  "), "one two three");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn render_falls_back_to_single_template_for_many_labels() {
        let clause = ClauseSpec::new("sensory_avoid", "Avoid {label}.");
        let labels = vec!["smells".to_string(), "dust".to_string()];

        assert_eq!(clause.render(&labels).as_deref(), Some("Avoid smells and dust."));
        assert_eq!(clause.render(&[]), None);
    }

    #[test]
    fn standard_clauses_have_valid_placeholders() {
        let set = ClauseSet::standard();
        set.check_templates().expect("standard templates are well formed");
        set.validate_against(&QuestionCatalog::standard())
            .expect("standard clauses reference catalog questions");
    }
}
