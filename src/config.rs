//! Runtime configuration for the board client.
//!
//! Settings come from an optional file layered under `CRM_BOARD_*`
//! environment variables, so `CRM_BOARD_API_BASE_URL` overrides the
//! file's `api_base_url`.

use std::{fmt, path::Path, time::Duration};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use thiserror::Error;

use crate::board::domain::CompanyId;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "CRM_BOARD";

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Bearer token presented to the backend.
///
/// The token never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// A source could not be read or deserialised.
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    /// The backend base URL is not an absolute URL.
    #[error("invalid api_base_url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The auth token is blank.
    #[error("auth_token must not be empty")]
    EmptyToken,

    /// The page size is zero.
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

/// Board client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Base URL of the CRM backend, for example `https://crm.example.com/api`.
    pub api_base_url: String,
    /// Bearer token of the signed-in user.
    pub auth_token: AuthToken,
    /// Company forwarded with status updates.
    #[serde(default)]
    pub company_id: Option<u64>,
    /// Tasks requested per page when loading a project.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Whole-request timeout; `None` keeps the HTTP client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl BoardConfig {
    /// Loads settings from `file` (when given) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError`] when a source cannot be read, a required
    /// setting is missing, or a value fails validation.
    pub fn load(file: Option<&Path>) -> Result<Self, BoardConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, BoardConfigError> {
        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), BoardConfigError> {
        reqwest::Url::parse(&self.api_base_url).map_err(|err| {
            BoardConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                reason: err.to_string(),
            }
        })?;
        if self.auth_token.expose().trim().is_empty() {
            return Err(BoardConfigError::EmptyToken);
        }
        if self.page_size == 0 {
            return Err(BoardConfigError::ZeroPageSize);
        }
        Ok(())
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Returns the configured company.
    #[must_use]
    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id.map(CompanyId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rstest::rstest;

    fn from_toml(toml: &str) -> Result<BoardConfig, BoardConfigError> {
        BoardConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[rstest]
    fn minimal_file_applies_defaults() {
        let config = from_toml(
            r#"
            api_base_url = "https://crm.example.com/api"
            auth_token = "secret"
            "#,
        )
        .expect("minimal config should load");

        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.company_id(), None);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.auth_token.expose(), "secret");
    }

    #[rstest]
    fn optional_settings_are_read() {
        let config = from_toml(
            r#"
            api_base_url = "http://localhost:8080"
            auth_token = "secret"
            company_id = 12
            page_size = 10
            request_timeout_secs = 5
            "#,
        )
        .expect("full config should load");

        assert_eq!(config.company_id(), Some(CompanyId::new(12)));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[rstest]
    #[case(r#"auth_token = "secret""#)]
    #[case(r#"api_base_url = "https://crm.example.com""#)]
    fn missing_required_setting_is_an_error(#[case] toml: &str) {
        assert!(matches!(from_toml(toml), Err(BoardConfigError::Source(_))));
    }

    #[rstest]
    #[case(
        r#"
        api_base_url = "not a url"
        auth_token = "secret"
        "#
    )]
    fn relative_base_url_is_rejected(#[case] toml: &str) {
        assert!(matches!(
            from_toml(toml),
            Err(BoardConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[rstest]
    fn blank_token_is_rejected() {
        let result = from_toml(
            r#"
            api_base_url = "https://crm.example.com"
            auth_token = "   "
            "#,
        );
        assert!(matches!(result, Err(BoardConfigError::EmptyToken)));
    }

    #[rstest]
    fn zero_page_size_is_rejected() {
        let result = from_toml(
            r#"
            api_base_url = "https://crm.example.com"
            auth_token = "secret"
            page_size = 0
            "#,
        );
        assert!(matches!(result, Err(BoardConfigError::ZeroPageSize)));
    }

    #[rstest]
    fn token_is_redacted_in_debug_output() {
        let rendered = format!("{:?}", AuthToken::new("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
