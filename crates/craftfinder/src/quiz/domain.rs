use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Browser session key under which the UI stores `{ "responses": ... }` between pages.
pub const SESSION_STORAGE_KEY: &str = "craftfinder_responses_v1";

/// Whether a question accepts one option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multi,
}

impl QuestionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single choice",
            Self::Multi => "Multiple choice",
        }
    }
}

/// A selectable choice, identified by an id that is stable across copy edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub label: String,
}

/// A single prompt with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<QuizOption>,
    #[serde(default = "skippable_by_default")]
    pub skippable: bool,
}

fn skippable_by_default() -> bool {
    true
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn option_label(&self, option_id: &str) -> Option<&str> {
        self.option(option_id).map(|option| option.label.as_str())
    }

    pub fn is_multi(&self) -> bool {
        self.kind == QuestionType::Multi
    }
}

/// Discrete persona produced by the rule-table strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub title: String,
    pub blurb: String,
}

impl Persona {
    pub fn new(title: impl Into<String>, blurb: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blurb: blurb.into(),
        }
    }
}

/// Final output shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    Persona(Persona),
    Paragraph { paragraph: String },
}

impl Recommendation {
    pub const fn kind(&self) -> &'static str {
        match self {
            Recommendation::Persona(_) => "persona",
            Recommendation::Paragraph { .. } => "paragraph",
        }
    }

    /// Persona title, or the whole paragraph in describe mode.
    pub fn headline(&self) -> &str {
        match self {
            Recommendation::Persona(persona) => &persona.title,
            Recommendation::Paragraph { paragraph } => paragraph,
        }
    }
}

/// Progress of a single question from the collector's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Answered,
    Skipped,
    Pending,
}

impl AnswerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Answered => "Answered",
            Self::Skipped => "Skipped",
            Self::Pending => "Not yet",
        }
    }
}

/// Question id to the ordered option ids the user chose.
///
/// An empty selection records an explicit skip; a missing key means the
/// question was never reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<String, Vec<String>>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the legacy `{ answers: { questionId: optionId } }` shape.
    pub fn from_single_answers(answers: BTreeMap<String, String>) -> Self {
        answers
            .into_iter()
            .map(|(question_id, option_id)| {
                let selection = if option_id.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![option_id]
                };
                (question_id, selection)
            })
            .collect()
    }

    /// Commits a selection, replacing whatever was recorded before.
    pub fn record(&mut self, question_id: impl Into<String>, option_ids: Vec<String>) {
        self.0.insert(question_id.into(), option_ids);
    }

    pub fn skip(&mut self, question_id: impl Into<String>) {
        self.record(question_id, Vec::new());
    }

    pub fn selections(&self, question_id: &str) -> Option<&[String]> {
        self.0.get(question_id).map(Vec::as_slice)
    }

    /// The chosen option when exactly one option was recorded.
    pub fn single_selection(&self, question_id: &str) -> Option<&str> {
        match self.selections(question_id) {
            Some([only]) => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn status(&self, question_id: &str) -> AnswerStatus {
        match self.selections(question_id) {
            Some([]) => AnswerStatus::Skipped,
            Some(_) => AnswerStatus::Answered,
            None => AnswerStatus::Pending,
        }
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.status(question_id) == AnswerStatus::Answered
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(question_id, selections)| (question_id.as_str(), selections.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for ResponseMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Record layout the UI keeps under [`SESSION_STORAGE_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResponses {
    #[serde(default)]
    pub responses: ResponseMap,
}

impl StoredResponses {
    /// Lenient parse matching the result page: anything unreadable yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
