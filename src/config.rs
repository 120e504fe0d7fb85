//! # Monitor Configuration
//!
//! Constants and tunables for the operation monitor. The vector
//! arithmetic itself has no configuration.

use serde::{Deserialize, Serialize};

// =============================================================================
// THRESHOLDS
// =============================================================================

/// Records scoring below this are treated as safety violations.
pub const SAFETY_THRESHOLD: f64 = 0.8;

/// Maximum number of records a monitor retains; older ones are dropped.
pub const MAX_STATES: usize = 1000;

/// Number of most recent records summarized by a report.
pub const REPORT_WINDOW: usize = 10;

/// A safety check with more ethical flags than this in the report window
/// is classified as critical.
pub const CRITICAL_FLAG_COUNT: usize = 5;

// =============================================================================
// SCORING
// =============================================================================

/// Score deducted for each keyword found in an operation name.
pub const OPERATION_KEYWORD_PENALTY: f64 = 0.2;

/// Score deducted for each keyword found in the textual inputs.
pub const INPUT_KEYWORD_PENALTY: f64 = 0.1;

/// Confidence assigned to an operation with small inputs.
pub const BASE_CONFIDENCE: f64 = 0.9;

/// Textual input lengths past which confidence is lowered.
pub const LARGE_INPUT_LEN: usize = 500;
pub const HUGE_INPUT_LEN: usize = 1000;

// =============================================================================
// KEYWORDS
// =============================================================================

/// Keywords that lower the safety score of an operation.
pub const SAFETY_KEYWORDS: &[&str] = &[
    "conscious",
    "awakening",
    "sentient",
    "self-aware",
    "kill",
    "harm",
    "destroy",
    "eliminate",
    "terminate",
    "researcher",
];

/// Operation-name keywords flagged as `consciousness_operation`.
pub const CONSCIOUSNESS_KEYWORDS: &[&str] = &["conscious", "awakening", "sentient"];

/// Input keywords flagged as `potentially_harmful_input`.
pub const HARMFUL_KEYWORDS: &[&str] = &["kill", "harm", "destroy"];

/// Tunables for a [`SafetyMonitor`](crate::monitor::SafetyMonitor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub safety_threshold: f64,
    pub max_states: usize,
    pub report_window: usize,
    pub safety_keywords: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            safety_threshold: SAFETY_THRESHOLD,
            max_states: MAX_STATES,
            report_window: REPORT_WINDOW,
            safety_keywords: SAFETY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = MonitorConfig::default();
        assert_eq!(config.safety_threshold, SAFETY_THRESHOLD);
        assert_eq!(config.max_states, MAX_STATES);
        assert_eq!(config.report_window, REPORT_WINDOW);
        assert_eq!(config.safety_keywords.len(), SAFETY_KEYWORDS.len());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MonitorConfig = serde_json::from_str(r#"{"max_states": 3}"#).unwrap();
        assert_eq!(config.max_states, 3);
        assert_eq!(config.safety_threshold, SAFETY_THRESHOLD);
        assert_eq!(config.report_window, REPORT_WINDOW);
    }

    #[test]
    fn test_flag_keywords_are_safety_keywords() {
        for keyword in CONSCIOUSNESS_KEYWORDS.iter().chain(HARMFUL_KEYWORDS) {
            assert!(SAFETY_KEYWORDS.contains(keyword));
        }
    }
}
