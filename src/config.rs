use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    OpenAi,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Backend::Gemini),
            "openai" | "chat" => Ok(Backend::OpenAi),
            other => Err(format!("expected 'gemini' or 'openai', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: Backend,
    /// `None` runs the demo gateway.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Service configuration, read from the environment (after `.env` is loaded).
///
/// | Env Var                 | Default                       |
/// |-------------------------|-------------------------------|
/// | `HOST`                  | `0.0.0.0`                     |
/// | `PORT`                  | `8080`                        |
/// | `LLM_BACKEND`           | `gemini`                      |
/// | `GEMINI_API_KEY`        | falls back to `GOOGLE_API_KEY`|
/// | `GEMINI_API_BASE`       | Google v1beta endpoint        |
/// | `OPENAI_API_KEY`        | unset                         |
/// | `OPENAI_API_BASE`       | `https://api.openai.com/v1`   |
/// | `LLM_MODEL`             | backend default               |
/// | `LLM_TIMEOUT_SECS`      | `60`                          |
/// | `COUNTRY_AWARE_PROMPTS` | `true`                        |
/// | `DATABASE_URL`          | unset (in-memory store)       |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub llm: LlmConfig,
    pub country_aware: bool,
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = parse_or(&var, "HOST", "0.0.0.0".parse::<IpAddr>().map_err(|e| e.to_string()))?;
        let port = parse_or(&var, "PORT", Ok(8080u16))?;
        let backend = parse_or(&var, "LLM_BACKEND", Ok(Backend::Gemini))?;
        let timeout_secs = parse_or(&var, "LLM_TIMEOUT_SECS", Ok(60u64))?;
        let country_aware = match var("COUNTRY_AWARE_PROMPTS") {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                var: "COUNTRY_AWARE_PROMPTS",
                value: v.clone(),
                reason: "expected true/false".into(),
            })?,
        };

        let (api_key, base_url, default_model) = match backend {
            Backend::Gemini => (
                var("GEMINI_API_KEY").or_else(|| var("GOOGLE_API_KEY")),
                var("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_BASE.to_string()),
                DEFAULT_GEMINI_MODEL,
            ),
            Backend::OpenAi => (
                var("OPENAI_API_KEY"),
                var("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_OPENAI_BASE.to_string()),
                DEFAULT_OPENAI_MODEL,
            ),
        };

        Ok(Self {
            host,
            port,
            llm: LlmConfig {
                backend,
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
                model: var("LLM_MODEL").unwrap_or_else(|| default_model.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            country_aware,
            database_url: var("DATABASE_URL"),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: Result<T, String>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            var: key,
            reason: e.to_string(),
            value,
        }),
        None => default.map_err(|reason| ConfigError::Invalid { var: key, value: String::new(), reason }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.llm.backend, Backend::Gemini);
        assert_eq!(cfg.llm.api_key, None);
        assert_eq!(cfg.llm.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.llm.timeout, Duration::from_secs(60));
        assert!(cfg.country_aware);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn google_key_is_accepted_for_gemini() {
        let cfg = config(&[("GOOGLE_API_KEY", "g-key")]).unwrap();
        assert_eq!(cfg.llm.api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn openai_backend_reads_its_own_settings() {
        let cfg = config(&[
            ("LLM_BACKEND", "openai"),
            ("OPENAI_API_KEY", "sk-1"),
            ("GEMINI_API_KEY", "ignored"),
            ("OPENAI_API_BASE", "http://localhost:9000/v1/"),
            ("COUNTRY_AWARE_PROMPTS", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.llm.backend, Backend::OpenAi);
        assert_eq!(cfg.llm.api_key.as_deref(), Some("sk-1"));
        assert_eq!(cfg.llm.base_url, "http://localhost:9000/v1");
        assert_eq!(cfg.llm.model, DEFAULT_OPENAI_MODEL);
        assert!(!cfg.country_aware);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("GEMINI_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert_eq!(cfg.llm.api_key, None);
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(config(&[("PORT", "eighty")]), Err(ConfigError::Invalid { var: "PORT", .. })));
        assert!(matches!(config(&[("LLM_BACKEND", "llama")]), Err(ConfigError::Invalid { var: "LLM_BACKEND", .. })));
        assert!(matches!(
            config(&[("COUNTRY_AWARE_PROMPTS", "maybe")]),
            Err(ConfigError::Invalid { var: "COUNTRY_AWARE_PROMPTS", .. })
        ));
    }
}
