use crate::key::ClassifierOptions;
use std::time::Duration;

/// Words per generated prompt.
pub const DEFAULT_WORD_COUNT: usize = 28;
/// Refresh interval for the live timer while a session is in progress.
pub const TICK_RATE_MS: u64 = 80;
/// Keys arriving this soon after startup are dropped.
pub const INPUT_GRACE_MS: u64 = 100;

/// Runtime settings. There is no config file; everything comes from the
/// constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub word_count: usize,
    pub tick_interval: Duration,
    pub input_grace: Duration,
    pub classifier: ClassifierOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            tick_interval: Duration::from_millis(TICK_RATE_MS),
            input_grace: Duration::from_millis(INPUT_GRACE_MS),
            classifier: ClassifierOptions::default(),
        }
    }
}
