//! Speech and haptic output seams.

use std::time::Duration;

use crate::error::ActuatorError;

/// A spoken announcement.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 language tag
    pub lang: String,
    pub rate: f32,
}

impl Utterance {
    /// "`class` detected"
    pub fn detected(class: &str, lang: &str, rate: f32) -> Self {
        Self {
            text: format!("{} detected", class),
            lang: lang.to_string(),
            rate,
        }
    }
}

/// Text-to-speech output.
pub trait Speaker: Send + Sync {
    fn speak(&self, utterance: &Utterance) -> Result<(), ActuatorError>;
}

/// Vibration output.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, duration: Duration) -> Result<(), ActuatorError>;
}

/// Stand-in for platforms without speech synthesis or vibration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Speaker for Unsupported {
    fn speak(&self, _utterance: &Utterance) -> Result<(), ActuatorError> {
        Err(ActuatorError::Unavailable("speech"))
    }
}

impl Haptics for Unsupported {
    fn vibrate(&self, _duration: Duration) -> Result<(), ActuatorError> {
        Err(ActuatorError::Unavailable("vibrate"))
    }
}
