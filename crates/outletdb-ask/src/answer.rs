//! Composing an answer from an interpretation and the stored outlets.

use outletdb_core::{FeatureKey, OutletRecord, SUPPORTED_REGION};
use serde::{Deserialize, Serialize};

use crate::interpret::Interpretation;

/// Lower-cased location names that refer to the supported region.
pub const SUPPORTED_LOCATIONS: &[&str] = &["kuala lumpur", "kl"];

/// Payload returned for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskAnswer {
    /// Names of matching outlets, in listing order.
    pub outlets: Vec<String>,
    /// Human-readable description of the matched feature.
    pub feature: Option<String>,
    pub message: String,
}

#[must_use]
pub fn is_supported_location(location: &str) -> bool {
    let normalised = location.trim().to_lowercase();
    SUPPORTED_LOCATIONS.contains(&normalised.as_str())
}

/// Filter `outlets` by the interpreted feature.
///
/// An unsupported location is reported before a missing feature. Neither is
/// an error: both produce an empty list with guidance text.
#[must_use]
pub fn answer_question(interpretation: &Interpretation, outlets: &[OutletRecord]) -> AskAnswer {
    if let Some(location) = interpretation.location.as_deref() {
        if !is_supported_location(location) {
            return AskAnswer {
                outlets: Vec::new(),
                feature: None,
                message: format!(
                    "Sorry, only outlets in {SUPPORTED_REGION} are supported. \
                     Try asking about {SUPPORTED_REGION} (or KL)."
                ),
            };
        }
    }

    let Some(feature) = interpretation.feature else {
        let known: Vec<&str> = FeatureKey::ALL.iter().map(|k| k.description()).collect();
        return AskAnswer {
            outlets: Vec::new(),
            feature: None,
            message: format!(
                "Sorry, I couldn't match your question to an outlet feature. \
                 Try asking about one of: {}.",
                known.join(", ")
            ),
        };
    };

    let names: Vec<String> = outlets
        .iter()
        .filter(|outlet| outlet.features.get(feature))
        .map(|outlet| outlet.name.clone())
        .collect();
    let description = feature.description();
    let message = format!(
        "Found {} outlet(s) in {SUPPORTED_REGION} with {description}.",
        names.len()
    );

    AskAnswer {
        outlets: names,
        feature: Some(description.to_string()),
        message,
    }
}
