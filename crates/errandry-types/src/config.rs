//! Configuration types for Errandry.
//!
//! `Settings` represents the top-level `config.toml` controlling provider
//! endpoints and per-deployment knobs. All fields have defaults, so a missing
//! or empty file yields a working configuration (API keys come from the
//! environment, not from this file).

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub mail: MailSettings,
}

/// Generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// API origin; overridable for compatible self-hosted endpoints.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "mistral-large-latest".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_llm_base_url(),
        }
    }
}

/// Web search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Result bound passed with every search request.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_search_base_url")]
    pub base_url: String,
}

fn default_max_results() -> usize {
    3
}

fn default_search_base_url() -> String {
    "https://api.tavily.com".to_string()
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            base_url: default_search_base_url(),
        }
    }
}

/// Mail provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSettings {
    /// Sender address. May also be supplied via `ERRANDRY_FROM_EMAIL`; the
    /// environment wins when both are set.
    #[serde(default)]
    pub from_email: Option<String>,

    #[serde(default = "default_mail_base_url")]
    pub base_url: String,
}

fn default_mail_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from_email: None,
            base_url: default_mail_base_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "mistral-large-latest");
        assert_eq!(settings.llm.base_url, "https://api.mistral.ai");
        assert_eq!(settings.search.max_results, 3);
        assert_eq!(settings.search.base_url, "https://api.tavily.com");
        assert!(settings.mail.from_email.is_none());
        assert_eq!(settings.mail.base_url, "https://api.sendgrid.com");
    }

    #[test]
    fn test_settings_deserialize_empty_toml_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.llm.model, "mistral-large-latest");
        assert_eq!(settings.search.max_results, 3);
    }

    #[test]
    fn test_settings_deserialize_partial_toml() {
        let toml_str = r#"
[llm]
model = "mistral-small-latest"

[mail]
from_email = "agent@example.com"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.llm.model, "mistral-small-latest");
        assert_eq!(settings.llm.base_url, "https://api.mistral.ai");
        assert_eq!(settings.search.max_results, 3);
        assert_eq!(settings.mail.from_email.as_deref(), Some("agent@example.com"));
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let mut settings = Settings::default();
        settings.search.max_results = 5;
        settings.mail.from_email = Some("agent@example.com".to_string());
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.search.max_results, 5);
        assert_eq!(parsed.mail.from_email.as_deref(), Some("agent@example.com"));
    }
}
