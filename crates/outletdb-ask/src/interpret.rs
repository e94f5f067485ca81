//! The interpreter seam and the `<feature_key>|<location>` answer format.

use async_trait::async_trait;
use outletdb_core::{AppConfig, FeatureKey};

use crate::error::AskError;
use crate::gemini::GeminiInterpreter;

/// Location assumed when the model names a feature but no place.
pub const DEFAULT_LOCATION: &str = "kuala lumpur";

/// What a question asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation {
    pub feature: Option<FeatureKey>,
    /// Lower-cased location as the model gave it; not yet validated.
    pub location: Option<String>,
}

/// Maps a free-text question to an [`Interpretation`].
#[async_trait]
pub trait QuestionInterpreter: Send + Sync {
    async fn interpret(&self, question: &str) -> Result<Interpretation, AskError>;
}

/// Interpreter used when no LLM key is configured. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredInterpreter;

#[async_trait]
impl QuestionInterpreter for UnconfiguredInterpreter {
    async fn interpret(&self, _question: &str) -> Result<Interpretation, AskError> {
        Err(AskError::NotConfigured)
    }
}

/// The interpreter selected by `config`: Gemini when `GEMINI_API_KEY` is set,
/// otherwise [`UnconfiguredInterpreter`].
///
/// # Errors
///
/// Returns [`AskError::Http`] if the Gemini HTTP client cannot be built.
pub fn interpreter_from_config(
    config: &AppConfig,
) -> Result<Box<dyn QuestionInterpreter>, AskError> {
    match config.gemini_api_key.as_deref() {
        Some(key) => Ok(Box::new(GeminiInterpreter::new(
            key,
            &config.gemini_model,
            config.llm_timeout_secs,
        )?)),
        None => {
            tracing::warn!("GEMINI_API_KEY not set; questions get guidance only");
            Ok(Box::new(UnconfiguredInterpreter))
        }
    }
}

/// Run `interpreter`, treating any failure as "nothing understood".
///
/// The failure is logged; callers then answer with guidance text.
pub async fn interpret_or_default(
    interpreter: &dyn QuestionInterpreter,
    question: &str,
) -> Interpretation {
    match interpreter.interpret(question).await {
        Ok(interpretation) => interpretation,
        Err(e) => {
            tracing::warn!(error = %e, "question interpretation failed");
            Interpretation::default()
        }
    }
}

/// Parse a model answer of the form `<feature_key>|<location>`.
///
/// The first line containing `|` is used. An unknown feature key becomes
/// `None`; an empty location next to a known feature becomes
/// [`DEFAULT_LOCATION`]. Text without `|` yields an empty interpretation.
#[must_use]
pub fn parse_answer(text: &str) -> Interpretation {
    let Some(line) = text.lines().find(|line| line.contains('|')) else {
        return Interpretation::default();
    };
    let line = line.trim().trim_matches('`').to_lowercase();
    let Some((feature, location)) = line.split_once('|') else {
        return Interpretation::default();
    };

    let feature = feature.trim().parse::<FeatureKey>().ok();
    let location = location.split_whitespace().collect::<Vec<_>>().join(" ");
    let location = if location.is_empty() {
        feature.map(|_| DEFAULT_LOCATION.to_string())
    } else {
        Some(location)
    };

    Interpretation { feature, location }
}
