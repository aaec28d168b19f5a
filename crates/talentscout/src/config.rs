use std::env;
use std::fmt::{self, Debug};
use std::path::PathBuf;

use talentscout_core::AssessmentPolicy;
use talentscout_openai_model::{OpenAIConfigBuilder, OpenAIProvider};

const API_KEY_VAR: &str = "GROQ_API_KEY";
const BASE_URL_VAR: &str = "TALENTSCOUT_BASE_URL";
const MODEL_VAR: &str = "TALENTSCOUT_MODEL";
const MAX_ROUNDS_VAR: &str = "TALENTSCOUT_MAX_ASSESSMENT_ROUNDS";
const RECORD_DIR_VAR: &str = "TALENTSCOUT_RECORD_DIR";

/// Startup configuration is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    /// A variable that must hold a positive integer doesn't.
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// The variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Process-wide configuration, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    base_url: Option<String>,
    model: Option<String>,
    max_assessment_rounds: Option<u32>,
    record_dir: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` from the working directory if there is one, then reads
    /// the configuration from the environment.
    ///
    /// Fails if `GROQ_API_KEY` is missing, so that no session is ever
    /// created without a credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => warn!("ignoring malformed .env file: {err}"),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let max_assessment_rounds = read(MAX_ROUNDS_VAR)
            .map(|value| match value.parse::<u32>() {
                Ok(rounds) if rounds > 0 => Ok(rounds),
                _ => Err(ConfigError::InvalidNumber {
                    key: MAX_ROUNDS_VAR,
                    value,
                }),
            })
            .transpose()?;

        Ok(Self {
            api_key,
            base_url: read(BASE_URL_VAR),
            model: read(MODEL_VAR),
            max_assessment_rounds,
            record_dir: read(RECORD_DIR_VAR).map(PathBuf::from),
        })
    }

    /// Creates the model provider every session talks to.
    pub fn model_provider(&self) -> OpenAIProvider {
        let mut builder = OpenAIConfigBuilder::with_api_key(&self.api_key);
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            builder = builder.with_model(model);
        }
        OpenAIProvider::new(builder.build())
    }

    /// Returns the assessment policy for new sessions.
    pub fn assessment_policy(&self) -> AssessmentPolicy {
        let policy = AssessmentPolicy::default();
        match self.max_assessment_rounds {
            Some(rounds) => policy.with_max_rounds(rounds),
            None => policy,
        }
    }

    /// Returns the directory finished interviews are exported to, if any.
    #[inline]
    pub fn record_dir(&self) -> Option<&PathBuf> {
        self.record_dir.as_ref()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_assessment_rounds", &self.max_assessment_rounds)
            .field("record_dir", &self.record_dir)
            .finish()
    }
}
