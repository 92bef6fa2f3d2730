use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::super::catalog::QuestionCatalog;
use super::super::domain::{Persona, ResponseMap};
use super::rules::{first_match, Rule};

/// Only rule table schema version currently understood.
pub const RULE_TABLE_VERSION: u32 = 1;

pub const FALLBACK_TITLE: &str = "Unclassified Legend";
pub const FALLBACK_BLURB: &str =
    "You defy every category we have. Sample a little of everything and let your hands decide.";

/// Ordered first-match rule list plus the persona returned when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    version: u32,
    rules: Vec<Rule>,
    fallback: Persona,
}

#[derive(Debug, Deserialize)]
struct RawRuleTable {
    version: u32,
    #[serde(default)]
    rules: Vec<Rule>,
    #[serde(default)]
    fallback: Option<Persona>,
}

pub fn default_fallback() -> Persona {
    Persona::new(FALLBACK_TITLE, FALLBACK_BLURB)
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            version: RULE_TABLE_VERSION,
            rules,
            fallback: default_fallback(),
        }
    }

    pub fn with_fallback(mut self, fallback: Persona) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Persona {
        &self.fallback
    }

    /// Index and rule of the earliest rule satisfied by `responses`.
    pub fn first_match(&self, responses: &ResponseMap) -> Option<(usize, &Rule)> {
        first_match(&self.rules, responses)
    }

    /// Decodes `{ version, rules, fallback? }` and checks its structure.
    pub fn from_json(raw: &str) -> Result<Self, RuleTableError> {
        let raw: RawRuleTable = serde_json::from_str(raw)?;
        if raw.version != RULE_TABLE_VERSION {
            return Err(RuleTableError::UnsupportedVersion {
                found: raw.version,
                expected: RULE_TABLE_VERSION,
            });
        }

        let table = Self {
            version: raw.version,
            rules: raw.rules,
            fallback: raw.fallback.unwrap_or_else(default_fallback),
        };
        table.check_structure()?;
        Ok(table)
    }

    /// Reads a spreadsheet export: `title` and `blurb` columns, then one column per
    /// question id holding the required option id. Blank cells add no condition.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RuleTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let title_column = column_index(&headers, "title")?;
        let blurb_column = column_index(&headers, "blurb")?;

        let mut rules = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let when = headers
                .iter()
                .enumerate()
                .filter(|(column, _)| *column != title_column && *column != blurb_column)
                .filter_map(|(column, question_id)| {
                    non_blank(record.get(column))
                        .map(|option_id| (question_id.to_string(), option_id.to_string()))
                })
                .collect::<BTreeMap<_, _>>();

            rules.push(Rule::new(
                when,
                Persona::new(
                    record.get(title_column).unwrap_or_default(),
                    record.get(blurb_column).unwrap_or_default(),
                ),
            ));
        }

        let table = Self::new(rules);
        table.check_structure()?;
        Ok(table)
    }

    /// Loads a `.csv` export or, for any other extension, a JSON document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let io_error = |source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        };

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            let file = File::open(path).map_err(io_error)?;
            Self::from_csv_reader(file)
        } else {
            let raw = std::fs::read_to_string(path).map_err(io_error)?;
            Self::from_json(&raw)
        }
    }

    /// Confirms every condition names a known single-choice question and one of its options.
    pub fn validate_against(&self, catalog: &QuestionCatalog) -> Result<(), RuleTableError> {
        for (rule, entry) in self.rules.iter().enumerate() {
            for (question_id, option_id) in &entry.when {
                let question =
                    catalog
                        .question(question_id)
                        .ok_or_else(|| RuleTableError::UnknownQuestion {
                            rule,
                            question_id: question_id.clone(),
                        })?;

                if question.is_multi() {
                    return Err(RuleTableError::MultiSelectCondition {
                        rule,
                        question_id: question_id.clone(),
                    });
                }

                if question.option(option_id).is_none() {
                    return Err(RuleTableError::UnknownOption {
                        rule,
                        question_id: question_id.clone(),
                        option_id: option_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn check_structure(&self) -> Result<(), RuleTableError> {
        for (rule, entry) in self.rules.iter().enumerate() {
            if entry.result.title.trim().is_empty() {
                return Err(RuleTableError::BlankTitle { rule });
            }
            let blank_condition = entry.when.iter().any(|(question_id, option_id)| {
                question_id.trim().is_empty() || option_id.trim().is_empty()
            });
            if blank_condition {
                return Err(RuleTableError::BlankCondition { rule });
            }
        }

        if self.fallback.title.trim().is_empty() {
            return Err(RuleTableError::BlankFallback);
        }

        Ok(())
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, RuleTableError> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or(RuleTableError::MissingColumn(name))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Reasons a rule table is refused at load time.
#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("rule table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rule table CSV could not be read: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to read rule table at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule table CSV is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("rule table version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("rule #{rule} has a blank title")]
    BlankTitle { rule: usize },
    #[error("rule #{rule} has a condition with a blank question or option id")]
    BlankCondition { rule: usize },
    #[error("fallback persona has a blank title")]
    BlankFallback,
    #[error("rule #{rule} references unknown question '{question_id}'")]
    UnknownQuestion { rule: usize, question_id: String },
    #[error("rule #{rule} references unknown option '{option_id}' for question '{question_id}'")]
    UnknownOption {
        rule: usize,
        question_id: String,
        option_id: String,
    },
    #[error("rule #{rule} conditions on multi-select question '{question_id}', which is unsupported")]
    MultiSelectCondition { rule: usize, question_id: String },
}
