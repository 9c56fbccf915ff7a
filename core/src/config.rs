use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Value at which a session is complete and its time gets judged.
pub const TERMINAL_VALUE: i64 = 2;

pub const DEFAULT_START_VALUE: i64 = 100;
pub const DEFAULT_DECREMENT: i64 = 7;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_start_value")]
    pub start_value: i64,
    #[serde(default = "default_decrement")]
    pub decrement: i64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_start_value() -> i64 {
    DEFAULT_START_VALUE
}

fn default_decrement() -> i64 {
    DEFAULT_DECREMENT
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_value: DEFAULT_START_VALUE,
            decrement: DEFAULT_DECREMENT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Replaces values the game cannot run with by their defaults.
    pub fn validated(mut self) -> Self {
        if self.decrement <= 0 {
            log::warn!(
                "decrement must be positive, got {}; using {}",
                self.decrement,
                DEFAULT_DECREMENT
            );
            self.decrement = DEFAULT_DECREMENT;
        }
        if self.start_value < 0 {
            log::warn!(
                "start value must not be negative, got {}; using {}",
                self.start_value,
                DEFAULT_START_VALUE
            );
            self.start_value = DEFAULT_START_VALUE;
        }
        if self.tick_interval_ms == 0 {
            log::warn!("tick interval of 0ms; using {}ms", DEFAULT_TICK_INTERVAL_MS);
            self.tick_interval_ms = DEFAULT_TICK_INTERVAL_MS;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn title(&self) -> String {
        format!("Subtract by {} from {} to 0", self.decrement, self.start_value)
    }
}
