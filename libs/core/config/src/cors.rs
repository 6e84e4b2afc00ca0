use crate::{ConfigError, FromEnv};
use std::env;

/// Allowed CORS origins.
///
/// `CORS_ALLOWED_ORIGIN` is a comma-separated list. When the variable is not
/// set at all, `origins` is `None` and the HTTP layer falls back to a
/// permissive policy. A variable that is set but lists no origin is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub origins: Option<Vec<String>>,
}

impl CorsConfig {
    pub fn permissive() -> Self {
        Self { origins: None }
    }

    pub fn with_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: Some(origins.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_permissive(&self) -> bool {
        self.origins.is_none()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = env::var("CORS_ALLOWED_ORIGIN") else {
            return Ok(Self::permissive());
        };

        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "no origin listed".to_string(),
            });
        }

        Ok(Self {
            origins: Some(origins),
        })
    }
}
