//! Rate-limited spoken and haptic announcements of tracked objects.
//!
//! Announcements are deduplicated by class, not by object id: once a class
//! has been announced it stays quiet for the class cooldown no matter how many
//! instances show up. Speech and haptics are additionally throttled on their
//! own, so a burst of different classes still cannot actuate faster than the
//! actuator cooldown. The latest announcement held back by that throttle is
//! played once the cooldown ends, either from [`Notifier::flush_due`] or on
//! the next observation.

mod actuator;
mod cooldown;

pub use actuator::{Haptics, Speaker, Unsupported, Utterance};
pub use cooldown::{ClassCooldown, RateLimiter};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::tracker::TrackedObject;

pub struct Notifier {
    blocklist: HashSet<String>,
    classes: Mutex<ClassCooldown>,
    speech_limit: Mutex<RateLimiter<Utterance>>,
    haptic_limit: Mutex<RateLimiter<Duration>>,
    speaker: Arc<dyn Speaker>,
    haptics: Arc<dyn Haptics>,
    clock: Arc<dyn Clock>,
    lang: String,
    rate: f32,
    pulse: Duration,
}

impl Notifier {
    pub fn new(
        config: &PipelineConfig,
        speaker: Arc<dyn Speaker>,
        haptics: Arc<dyn Haptics>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            blocklist: config
                .notification_blocklist
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
            classes: Mutex::new(ClassCooldown::new(config.class_cooldown())),
            speech_limit: Mutex::new(RateLimiter::new(config.actuator_cooldown())),
            haptic_limit: Mutex::new(RateLimiter::new(config.actuator_cooldown())),
            speaker,
            haptics,
            clock,
            lang: config.speech_lang.clone(),
            rate: config.speech_rate,
            pulse: config.haptic_pulse(),
        }
    }

    /// Announce `object` unless its class is blocked or cooling down.
    ///
    /// Returns whether the class was announced. The class counts as announced
    /// even when the actuators are throttled or fail; a throttled announcement
    /// is held back and played when the actuator cooldown ends.
    pub fn observe(&self, object: &TrackedObject) -> bool {
        let now = self.clock.now();
        self.flush_at(now);

        if !self.classes.lock().try_claim(&object.class, now) {
            return false;
        }
        if self.blocklist.contains(&object.class.to_lowercase()) {
            return false;
        }

        debug!(class = %object.class, id = %object.id, "announcing detection");

        let pulse = self.haptic_limit.lock().call(now, self.pulse);
        if let Some(pulse) = pulse {
            self.vibrate(pulse);
        }

        let utterance = Utterance::detected(&object.class, &self.lang, self.rate);
        let utterance = self.speech_limit.lock().call(now, utterance);
        if let Some(utterance) = utterance {
            self.speak(&utterance);
        }

        true
    }

    /// Play held-back announcements whose actuator cooldown has ended.
    ///
    /// Returns the number of actuations fired.
    pub fn flush_due(&self) -> usize {
        self.flush_at(self.clock.now())
    }

    /// Earliest instant at which [`Notifier::flush_due`] has work to do.
    pub fn next_flush_at(&self) -> Option<Instant> {
        let haptic = self.haptic_limit.lock().next_flush_at();
        let speech = self.speech_limit.lock().next_flush_at();
        haptic.into_iter().chain(speech).min()
    }

    fn flush_at(&self, now: Instant) -> usize {
        let mut fired = 0;

        let pulse = self.haptic_limit.lock().flush(now);
        if let Some(pulse) = pulse {
            self.vibrate(pulse);
            fired += 1;
        }

        let utterance = self.speech_limit.lock().flush(now);
        if let Some(utterance) = utterance {
            debug!(text = %utterance.text, "playing held-back announcement");
            self.speak(&utterance);
            fired += 1;
        }

        fired
    }

    fn vibrate(&self, pulse: Duration) {
        if let Err(e) = self.haptics.vibrate(pulse) {
            warn!("vibrate failed: {}", e);
        }
    }

    fn speak(&self, utterance: &Utterance) {
        if let Err(e) = self.speaker.speak(utterance) {
            warn!(text = %utterance.text, "speaking failed: {}", e);
        }
    }

    /// Observe a whole reconciled set, returning how many classes were announced.
    pub fn observe_all(&self, objects: &[TrackedObject]) -> usize {
        objects.iter().filter(|o| self.observe(o)).count()
    }
}
