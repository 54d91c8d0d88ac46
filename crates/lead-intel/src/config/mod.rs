use std::env;
use std::fmt;

use crate::affordability::DEFAULT_CONTRACT_RATE;
use crate::leads::{BracketTable, ScoringVariant, TagOptions};
use crate::leads::tags::DEFAULT_SITE_TAG;

/// Layout of log events written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Top-level configuration for the command line front end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub leads: LeadSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("LEAD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("LEAD_LOG_FORMAT") {
            Ok(raw) => {
                LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?
            }
            Err(_) => LogFormat::default(),
        };

        let site_tag = env::var("LEAD_SITE_TAG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_TAG.to_string());

        let default_contract_rate = match env::var("LEAD_CONTRACT_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate >= 0.0)
                .ok_or(ConfigError::InvalidContractRate { value: raw })?,
            Err(_) => DEFAULT_CONTRACT_RATE,
        };

        let bracket_table = match env::var("LEAD_BRACKET_TABLE") {
            Ok(raw) => BracketTable::parse(&raw)
                .ok_or(ConfigError::InvalidBracketTable { value: raw })?,
            Err(_) => BracketTable::default(),
        };

        let scoring_variant = match env::var("LEAD_SCORING_VARIANT") {
            Ok(raw) => ScoringVariant::parse(&raw)
                .ok_or(ConfigError::InvalidScoringVariant { value: raw })?,
            Err(_) => ScoringVariant::default(),
        };

        Ok(Self {
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            leads: LeadSettings {
                site_tag,
                default_contract_rate,
                bracket_table,
                scoring_variant,
            },
        })
    }
}

/// Tracing controls. `log_level` is either a bare level applied to the engine
/// crates or a full filter directive.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Defaults applied when a caller leaves a lead setting unspecified.
#[derive(Debug, Clone)]
pub struct LeadSettings {
    pub site_tag: String,
    pub default_contract_rate: f64,
    pub bracket_table: BracketTable,
    pub scoring_variant: ScoringVariant,
}

impl LeadSettings {
    pub fn tag_options(&self) -> TagOptions {
        TagOptions {
            site_tag: self.site_tag.clone(),
            bracket_table: self.bracket_table,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogFormat { value: String },
    InvalidContractRate { value: String },
    InvalidBracketTable { value: String },
    InvalidScoringVariant { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLogFormat { value } => write!(
                f,
                "LEAD_LOG_FORMAT must be 'compact', 'pretty' or 'json' (got '{}')",
                value
            ),
            ConfigError::InvalidContractRate { value } => write!(
                f,
                "LEAD_CONTRACT_RATE must be a non-negative percentage (got '{}')",
                value
            ),
            ConfigError::InvalidBracketTable { value } => write!(
                f,
                "LEAD_BRACKET_TABLE must be 'standard' or 'compact' (got '{}')",
                value
            ),
            ConfigError::InvalidScoringVariant { value } => write!(
                f,
                "LEAD_SCORING_VARIANT must be 'weighted' or 'timeline-first' (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

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
        env::remove_var("LEAD_LOG_LEVEL");
        env::remove_var("LEAD_LOG_FORMAT");
        env::remove_var("LEAD_SITE_TAG");
        env::remove_var("LEAD_CONTRACT_RATE");
        env::remove_var("LEAD_BRACKET_TABLE");
        env::remove_var("LEAD_SCORING_VARIANT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.leads.site_tag, "website");
        assert_eq!(config.leads.default_contract_rate, 4.5);
        assert_eq!(config.leads.bracket_table, BracketTable::Standard);
        assert_eq!(config.leads.scoring_variant, ScoringVariant::Weighted);
    }

    #[test]
    fn reads_lead_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_LOG_FORMAT", "JSON");
        env::set_var("LEAD_SITE_TAG", "condo-finder");
        env::set_var("LEAD_CONTRACT_RATE", "5.1");
        env::set_var("LEAD_BRACKET_TABLE", "compact");
        env::set_var("LEAD_SCORING_VARIANT", "timeline-first");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert_eq!(config.leads.default_contract_rate, 5.1);
        let options = config.leads.tag_options();
        assert_eq!(options.site_tag, "condo-finder");
        assert_eq!(options.bracket_table, BracketTable::Compact);
        assert_eq!(config.leads.scoring_variant, ScoringVariant::TimelineFirst);
    }

    #[test]
    fn rejects_unparseable_contract_rate() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_CONTRACT_RATE", "four");

        let err = AppConfig::load().unwrap_err();
        reset_env();

        assert!(matches!(err, ConfigError::InvalidContractRate { .. }));
        assert!(err.to_string().contains("four"));
    }

    #[test]
    fn rejects_unknown_bracket_table() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_BRACKET_TABLE", "deluxe");

        let err = AppConfig::load().unwrap_err();
        reset_env();

        assert!(matches!(err, ConfigError::InvalidBracketTable { .. }));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEAD_LOG_FORMAT", "xml");

        let err = AppConfig::load().unwrap_err();
        reset_env();

        assert!(matches!(err, ConfigError::InvalidLogFormat { .. }));
        assert!(err.to_string().contains("xml"));
    }
}
