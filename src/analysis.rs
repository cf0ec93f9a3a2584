//! Result shape and fallback policy for the external image-analysis service.
//!
//! The service itself lives on the host side. The host reports what happened
//! as an [`AnalysisOutcome`] and [`resolve_analysis`] turns it into something
//! the UI can always display. Nothing here runs during a frame.

use serde::{Deserialize, Serialize};

pub const FALLBACK_TITLE: &str = "SIMULATION: QUANTUM FLUX";
pub const FALLBACK_ENERGY_LEVEL: &str = "UNKNOWN (LIMIT REACHED)";
pub const FALLBACK_DESCRIPTION: &str = "External sensor connection unstable (API Quota Exceeded). \
Running local probabilistic simulation based on thermal heuristics. \
Subject appears to be in a state of high coherence.";
pub const FALLBACK_ELEMENTS: [&str; 3] = [
    "Simulated Core Stability",
    "Heuristic Heat Flow",
    "Fallback Protocol Active",
];

pub const OFFLINE_TITLE: &str = "SCAN ERROR: OFFLINE";
pub const OFFLINE_PREFIX: &str = "Unable to reach neural network. ";
const UNKNOWN_ERROR: &str = "Unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub title: String,
    pub energy_level: String,
    pub description: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

impl AnalysisResult {
    /// Canned result shown when the service is unavailable or over quota.
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            energy_level: FALLBACK_ENERGY_LEVEL.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            elements: FALLBACK_ELEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Fallback with the offline title and the failure message appended.
    pub fn offline(message: &str) -> Self {
        let message = if message.is_empty() { UNKNOWN_ERROR } else { message };
        Self {
            title: OFFLINE_TITLE.to_string(),
            description: format!("{}{}", OFFLINE_PREFIX, message),
            ..Self::fallback()
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// What the host observed when calling the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// No API key configured; the service was never called.
    MissingKey,
    /// The service answered with this body (expected to be JSON).
    Response(String),
    /// The call failed. `status` is the HTTP status when one was available.
    Failed { status: Option<u16>, message: String },
}

impl AnalysisOutcome {
    fn is_quota(status: Option<u16>, message: &str) -> bool {
        status == Some(429) || message.contains("quota") || message.contains("429")
    }
}

/// Map a service outcome to a displayable result. Never fails.
pub fn resolve_analysis(outcome: AnalysisOutcome) -> AnalysisResult {
    match outcome {
        AnalysisOutcome::MissingKey => {
            log::warn!("analysis: API key missing, using fallback");
            AnalysisResult::fallback()
        }
        AnalysisOutcome::Response(text) => {
            if text.trim().is_empty() {
                log::error!("analysis: empty response");
                return AnalysisResult::offline("No response text");
            }
            match serde_json::from_str::<AnalysisResult>(&text) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("analysis: malformed response: {}", e);
                    AnalysisResult::offline(&e.to_string())
                }
            }
        }
        AnalysisOutcome::Failed { status, message } => {
            log::error!("analysis failed: status={:?} {}", status, message);
            if AnalysisOutcome::is_quota(status, &message) {
                log::warn!("analysis: quota exceeded, switching to simulation mode");
                AnalysisResult::fallback()
            } else {
                AnalysisResult::offline(&message)
            }
        }
    }
}

/// Strip a `data:image/png;base64,` (or jpeg) prefix from a canvas data URL,
/// leaving the bare base64 payload the service expects.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    for mime in ["png", "jpeg"] {
        let prefix = format!("data:image/{};base64,", mime);
        if let Some(rest) = data_url.strip_prefix(prefix.as_str()) {
            return rest;
        }
    }
    data_url
}
