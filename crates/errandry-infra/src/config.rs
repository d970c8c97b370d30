//! Configuration loader for Errandry.
//!
//! Reads `config.toml` from the data directory (`~/.errandry/` in
//! production) and deserializes it into [`Settings`]. Falls back to defaults
//! when the file is missing or malformed.

use std::path::Path;

use errandry_types::config::Settings;

/// Load settings from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`Settings::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed settings.
pub async fn load_settings(data_dir: &Path) -> Settings {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Settings::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return Settings::default();
        }
    };

    match toml::from_str::<Settings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_settings_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.llm.model, "mistral-large-latest");
        assert_eq!(settings.search.max_results, 3);
    }

    #[tokio::test]
    async fn load_settings_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[llm]
model = "mistral-small-latest"

[search]
max_results = 5

[mail]
from_email = "agent@example.com"
"#,
        )
        .await
        .unwrap();

        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.llm.model, "mistral-small-latest");
        assert_eq!(settings.search.max_results, 5);
        assert_eq!(settings.mail.from_email.as_deref(), Some("agent@example.com"));
    }

    #[tokio::test]
    async fn load_settings_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.llm.model, "mistral-large-latest");
        assert_eq!(settings.search.max_results, 3);
    }
}
