//! Clock-driven suppression windows.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// Remembers when each key was last let through and rejects it again until
/// `window` has elapsed.
#[derive(Debug)]
pub struct ClassCooldown {
    window: Duration,
    claimed: HashMap<String, Instant>,
}

impl ClassCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            claimed: HashMap::new(),
        }
    }

    /// Returns `true` and starts a new window if `key` is not cooling down.
    pub fn try_claim(&mut self, key: &str, now: Instant) -> bool {
        let window = self.window;
        self.claimed
            .retain(|_, at| now.saturating_duration_since(*at) < window);

        if self.claimed.contains_key(key) {
            return false;
        }
        self.claimed.insert(key.to_string(), now);
        true
    }
}

/// Throttle with a leading and a trailing edge.
///
/// The first call passes straight through. Calls arriving within `interval`
/// of the last actuation are held back, the latest replacing any earlier one,
/// and are released by [`RateLimiter::flush`] once the interval has elapsed.
#[derive(Debug)]
pub struct RateLimiter<T> {
    interval: Duration,
    last: Option<Instant>,
    pending: Option<T>,
}

impl<T> RateLimiter<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            pending: None,
        }
    }

    fn is_open(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Returns `value` if it may actuate now, otherwise keeps it as the
    /// trailing call.
    pub fn call(&mut self, now: Instant, value: T) -> Option<T> {
        if self.is_open(now) {
            self.last = Some(now);
            self.pending = None;
            return Some(value);
        }
        self.pending = Some(value);
        None
    }

    /// Releases the trailing call once `interval` has passed since the last
    /// actuation.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_none() || !self.is_open(now) {
            return None;
        }
        self.last = Some(now);
        self.pending.take()
    }

    /// When the held trailing call becomes due, if there is one.
    pub fn next_flush_at(&self) -> Option<Instant> {
        match (&self.pending, self.last) {
            (Some(_), Some(last)) => Some(last + self.interval),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_cooldown_window() {
        let start = Instant::now();
        let mut cooldown = ClassCooldown::new(Duration::from_secs(90));

        assert!(cooldown.try_claim("dog", start));
        assert!(!cooldown.try_claim("dog", start + Duration::from_secs(30)));
        assert!(!cooldown.try_claim("dog", start + Duration::from_secs(89)));
        assert!(cooldown.try_claim("cat", start + Duration::from_secs(30)));
        assert!(cooldown.try_claim("dog", start + Duration::from_secs(95)));
    }

    #[test]
    fn test_rejected_claim_does_not_extend_window() {
        let start = Instant::now();
        let mut cooldown = ClassCooldown::new(Duration::from_secs(10));

        assert!(cooldown.try_claim("dog", start));
        assert!(!cooldown.try_claim("dog", start + Duration::from_secs(9)));
        assert!(cooldown.try_claim("dog", start + Duration::from_secs(10)));
    }

    #[test]
    fn test_rate_limiter_spacing() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(Duration::from_secs(10));

        assert_eq!(limiter.call(start, 1), Some(1));
        assert_eq!(limiter.call(start + Duration::from_secs(5), 2), None);
        assert_eq!(limiter.flush(start + Duration::from_secs(10)), Some(2));
        assert_eq!(limiter.call(start + Duration::from_secs(19), 3), None);
        assert_eq!(limiter.call(start + Duration::from_secs(20), 4), Some(4));
        assert_eq!(limiter.next_flush_at(), None);
    }

    #[test]
    fn test_rate_limiter_trailing_keeps_latest() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(Duration::from_secs(10));

        assert_eq!(limiter.call(start, "dog"), Some("dog"));
        assert_eq!(limiter.call(start + Duration::from_secs(2), "person"), None);
        assert_eq!(limiter.call(start + Duration::from_secs(4), "bird"), None);
        assert_eq!(
            limiter.next_flush_at(),
            Some(start + Duration::from_secs(10))
        );

        assert_eq!(limiter.flush(start + Duration::from_secs(9)), None);
        assert_eq!(limiter.flush(start + Duration::from_secs(10)), Some("bird"));
        assert_eq!(limiter.flush(start + Duration::from_secs(30)), None);
    }

    #[test]
    fn test_rate_limiter_trailing_starts_new_window() {
        let start = Instant::now();
        let mut limiter = RateLimiter::new(Duration::from_secs(10));

        limiter.call(start, 1);
        limiter.call(start + Duration::from_secs(1), 2);
        assert_eq!(limiter.flush(start + Duration::from_secs(12)), Some(2));
        // spacing is measured from the flushed actuation
        assert_eq!(limiter.call(start + Duration::from_secs(15), 3), None);
        assert_eq!(
            limiter.next_flush_at(),
            Some(start + Duration::from_secs(22))
        );
    }
}
