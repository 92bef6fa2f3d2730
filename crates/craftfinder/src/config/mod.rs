use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::quiz::catalog::QuestionCatalog;
use crate::quiz::matching::{ClauseSet, ClauseSetError, RuleTable, RuleTableError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rules = match (
            non_empty_var("SECRET_RULES_JSON"),
            non_empty_var("CRAFTFINDER_RULES_PATH"),
        ) {
            (Some(raw), _) => RulesSource::Inline(raw),
            (None, Some(path)) => RulesSource::Path(PathBuf::from(path)),
            (None, None) => RulesSource::Missing,
        };
        let clauses_json = non_empty_var("CRAFTFINDER_CLAUSES_JSON");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                rules,
                clauses_json,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the persona rule table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    Inline(String),
    Path(PathBuf),
    Missing,
}

/// Scoring data sources; decoded and validated once, before serving.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub rules: RulesSource,
    pub clauses_json: Option<String>,
}

impl ScoringConfig {
    /// `Ok(None)` when no rule table is configured at all.
    pub fn rule_table(&self, catalog: &QuestionCatalog) -> Result<Option<RuleTable>, ConfigError> {
        let table = match &self.rules {
            RulesSource::Inline(raw) => RuleTable::from_json(raw),
            RulesSource::Path(path) => RuleTable::from_path(path),
            RulesSource::Missing => return Ok(None),
        }
        .and_then(|table| table.validate_against(catalog).map(|()| table))
        .map_err(|source| ConfigError::RuleTable { source })?;

        Ok(Some(table))
    }

    pub fn clause_set(&self, catalog: &QuestionCatalog) -> Result<ClauseSet, ConfigError> {
        let clauses = match &self.clauses_json {
            Some(raw) => ClauseSet::from_json(raw),
            None => Ok(ClauseSet::standard()),
        }
        .and_then(|clauses| clauses.validate_against(catalog).map(|()| clauses))
        .map_err(|source| ConfigError::ClauseSet { source })?;

        Ok(clauses)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    RuleTable { source: RuleTableError },
    ClauseSet { source: ClauseSetError },
    RulesUnavailable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::RuleTable { source } => write!(f, "invalid rule table: {source}"),
            ConfigError::ClauseSet { source } => write!(f, "invalid clause set: {source}"),
            ConfigError::RulesUnavailable => write!(
                f,
                "no rule table configured; set SECRET_RULES_JSON or CRAFTFINDER_RULES_PATH"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::RulesUnavailable => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RuleTable { source } => Some(source),
            ConfigError::ClauseSet { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SECRET_RULES_JSON");
        env::remove_var("CRAFTFINDER_RULES_PATH");
        env::remove_var("CRAFTFINDER_CLAUSES_JSON");
    }

    fn scoring(rules: RulesSource, clauses_json: Option<&str>) -> ScoringConfig {
        ScoringConfig {
            rules,
            clauses_json: clauses_json.map(str::to_string),
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.rules, RulesSource::Missing);
        assert!(config.scoring.clauses_json.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "seventy");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn inline_rules_take_priority_over_path() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SECRET_RULES_JSON", r#"{"version":1,"rules":[]}"#);
        env::set_var("CRAFTFINDER_RULES_PATH", "/tmp/rules.csv");
        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(matches!(config.scoring.rules, RulesSource::Inline(_)));
        reset_env();
    }

    #[test]
    fn missing_rules_decode_to_none() {
        let catalog = QuestionCatalog::standard();
        let table = scoring(RulesSource::Missing, None)
            .rule_table(&catalog)
            .expect("missing rules are not an error");
        assert!(table.is_none());
    }

    #[test]
    fn inline_rules_are_validated_against_catalog() {
        let catalog = QuestionCatalog::standard();
        let valid = scoring(
            RulesSource::Inline(
                r#"{"version":1,"rules":[{"when":{"mess":"mess_joyful"},"result":{"title":"Chaos Crafter","blurb":"..."}}]}"#
                    .to_string(),
            ),
            None,
        );
        let table = valid
            .rule_table(&catalog)
            .expect("valid rules decode")
            .expect("rules present");
        assert_eq!(table.rules().len(), 1);

        let invalid = scoring(
            RulesSource::Inline(
                r#"{"version":1,"rules":[{"when":{"mess":"mess_lava"},"result":{"title":"X","blurb":""}}]}"#
                    .to_string(),
            ),
            None,
        );
        assert!(matches!(
            invalid.rule_table(&catalog),
            Err(ConfigError::RuleTable {
                source: RuleTableError::UnknownOption { .. }
            })
        ));
    }

    #[test]
    fn unreadable_rules_path_is_reported() {
        let catalog = QuestionCatalog::standard();
        let config = scoring(
            RulesSource::Path(PathBuf::from("/nonexistent/craftfinder/rules.json")),
            None,
        );
        assert!(matches!(
            config.rule_table(&catalog),
            Err(ConfigError::RuleTable {
                source: RuleTableError::Io { .. }
            })
        ));
    }

    #[test]
    fn clause_override_is_checked() {
        let catalog = QuestionCatalog::standard();

        let standard = scoring(RulesSource::Missing, None)
            .clause_set(&catalog)
            .expect("standard clauses");
        assert_eq!(standard, ClauseSet::standard());

        let custom = scoring(
            RulesSource::Missing,
            Some(r#"[{"question_id":"mess","template":"Mess: {label}."}]"#),
        )
        .clause_set(&catalog)
        .expect("custom clauses decode");
        assert_eq!(custom.clauses().len(), 1);

        let missing_placeholder = scoring(
            RulesSource::Missing,
            Some(r#"[{"question_id":"mess","template":"Mess."}]"#),
        );
        assert!(matches!(
            missing_placeholder.clause_set(&catalog),
            Err(ConfigError::ClauseSet {
                source: ClauseSetError::MissingPlaceholder { .. }
            })
        ));

        let unknown_question = scoring(
            RulesSource::Missing,
            Some(r#"[{"question_id":"glitter","template":"{label}"}]"#),
        );
        assert!(matches!(
            unknown_question.clause_set(&catalog),
            Err(ConfigError::ClauseSet {
                source: ClauseSetError::UnknownQuestion(_)
            })
        ));
    }
}
