/// Internal state of the identity tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPhase {
    /// No non-empty set seen yet, nothing to match against
    #[default]
    AwaitingFirstSet,
    /// Holding a previous set to reconcile the next one with
    Steady,
}
