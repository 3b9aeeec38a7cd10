//! Configuration for the detection pipeline

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::tracker::TrackerConfig;

/// Classes worth drawing and tracking on a dashboard camera.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "person",
    "bicycle",
    "car",
    "truck",
    "motorcycle",
    "bus",
    "traffic light",
    "stop sign",
    "parking meter",
    "laptop",
    "bottle",
    "dog",
    "cat",
    "bird",
    "horse",
];

/// Classes the driver already perceives directly; never announced.
pub const DEFAULT_NOTIFICATION_BLOCKLIST: &[&str] = &["car", "truck", "traffic light"];

/// Pipeline configuration.
///
/// Field names deserialize from camelCase, e.g. `idOverlapThreshold` or
/// `classCooldownMs`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    #[serde(flatten)]
    pub tracker: TrackerConfig,
    /// Classes kept by the class filter, matched case-insensitively
    pub class_allow_list: BTreeSet<String>,
    /// Classes the notifier stays silent about
    pub notification_blocklist: BTreeSet<String>,
    /// Per-class announcement suppression window
    pub class_cooldown_ms: u64,
    /// Minimum spacing between physical actuations of speech or haptics
    pub actuator_cooldown_ms: u64,
    /// Vibration length
    pub haptic_pulse_ms: u64,
    /// BCP 47 language tag for utterances
    pub speech_lang: String,
    /// Speaking rate, 1.0 is normal
    pub speech_rate: f32,
    /// Yield to the runtime before the first detection cycle
    pub idle_hint: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            class_allow_list: DEFAULT_ALLOW_LIST.iter().map(|c| c.to_string()).collect(),
            notification_blocklist: DEFAULT_NOTIFICATION_BLOCKLIST
                .iter()
                .map(|c| c.to_string())
                .collect(),
            class_cooldown_ms: 90_000,
            actuator_cooldown_ms: 10_000,
            haptic_pulse_ms: 100,
            speech_lang: "en-US".to_string(),
            speech_rate: 0.9,
            idle_hint: true,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PipelineError::Config(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let thresholds = [
            ("idOverlapThreshold", self.tracker.id_overlap_threshold),
            ("bboxOverlapThreshold", self.tracker.bbox_overlap_threshold),
            ("unknownScoreThreshold", self.tracker.unknown_score_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PipelineError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !self.speech_rate.is_finite() || self.speech_rate <= 0.0 {
            return Err(PipelineError::Config(format!(
                "speechRate must be positive, got {}",
                self.speech_rate
            )));
        }

        Ok(())
    }

    pub fn class_cooldown(&self) -> Duration {
        Duration::from_millis(self.class_cooldown_ms)
    }

    pub fn actuator_cooldown(&self) -> Duration {
        Duration::from_millis(self.actuator_cooldown_ms)
    }

    pub fn haptic_pulse(&self) -> Duration {
        Duration::from_millis(self.haptic_pulse_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.tracker.id_overlap_threshold, 0.6);
        assert_eq!(config.tracker.bbox_overlap_threshold, 0.9);
        assert_eq!(config.tracker.unknown_score_threshold, 0.7);
        assert_eq!(config.class_cooldown(), Duration::from_secs(90));
        assert_eq!(config.actuator_cooldown(), Duration::from_secs(10));
        assert!(config.class_allow_list.contains("traffic light"));
        assert!(config.notification_blocklist.contains("truck"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_camel_case() {
        let config = PipelineConfig::from_json(
            r#"{
                "idOverlapThreshold": 0.5,
                "classAllowList": ["dog"],
                "classCooldownMs": 1000
            }"#,
        )
        .unwrap();

        assert_eq!(config.tracker.id_overlap_threshold, 0.5);
        assert_eq!(config.tracker.bbox_overlap_threshold, 0.9);
        assert_eq!(config.class_allow_list.len(), 1);
        assert_eq!(config.class_cooldown_ms, 1000);
        assert_eq!(config.actuator_cooldown_ms, 10_000);
    }

    #[test]
    fn test_config_validation_rejects_out_of_range() {
        let config = PipelineConfig {
            tracker: TrackerConfig {
                bbox_overlap_threshold: 1.5,
                ..TrackerConfig::default()
            },
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));

        let config = PipelineConfig {
            speech_rate: 0.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_invalid() {
        assert!(matches!(
            PipelineConfig::from_json("{ not json"),
            Err(PipelineError::Config(_))
        ));
    }
}
