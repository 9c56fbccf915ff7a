use crate::config::{GameConfig, TERMINAL_VALUE};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Reached the terminal value; the elapsed time counts.
    Finished,
    /// Ran out of room before the terminal value; no time is recorded.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Invalid,
    Wrong { expected: i64 },
    CannotContinue,
    Accepted { value: i64 },
    Exhausted { value: i64 },
    Finished { elapsed: Duration },
    Ignored,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Accepted { .. } | Outcome::Exhausted { .. } | Outcome::Finished { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    current_value: i64,
    phase: Phase,
    started: Instant,
    elapsed: Duration,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::start_at(config, Instant::now())
    }

    pub fn start_at(config: GameConfig, now: Instant) -> Self {
        let config = config.validated();
        log::info!(
            "session started at {} (decrement {})",
            config.start_value,
            config.decrement
        );
        Self {
            config,
            current_value: config.start_value,
            phase: Phase::Running,
            started: now,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_value(&self) -> i64 {
        self.current_value
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn submit(&mut self, input: &str) -> Outcome {
        self.submit_at(input, Instant::now())
    }

    pub fn submit_at(&mut self, input: &str, now: Instant) -> Outcome {
        let before = self.current_value;
        let outcome = self.evaluate(input, now);
        log::debug!("submit {:?} at {}: {:?}", input, before, outcome);
        outcome
    }

    fn evaluate(&mut self, input: &str, now: Instant) -> Outcome {
        if !self.is_running() {
            return Outcome::Ignored;
        }

        let Ok(value) = input.trim().parse::<i64>() else {
            return Outcome::Invalid;
        };

        let expected = self.current_value - self.config.decrement;
        if expected < 0 {
            self.stop(Phase::Exhausted, now);
            return Outcome::CannotContinue;
        }
        if value != expected {
            return Outcome::Wrong { expected };
        }

        self.current_value = value;
        if self.current_value == TERMINAL_VALUE {
            self.stop(Phase::Finished, now);
            log::info!("session finished in {:.2}s", self.elapsed.as_secs_f64());
            Outcome::Finished {
                elapsed: self.elapsed,
            }
        } else if self.current_value - self.config.decrement < 0 {
            self.stop(Phase::Exhausted, now);
            Outcome::Exhausted {
                value: self.current_value,
            }
        } else {
            Outcome::Accepted {
                value: self.current_value,
            }
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Refreshes the elapsed time; does nothing once the session is over.
    pub fn tick_at(&mut self, now: Instant) {
        if self.is_running() {
            self.refresh_elapsed(now);
        }
    }

    fn refresh_elapsed(&mut self, now: Instant) {
        // An out-of-order instant must not wind the clock back.
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed > self.elapsed {
            self.elapsed = elapsed;
        }
    }

    fn stop(&mut self, phase: Phase, now: Instant) {
        self.refresh_elapsed(now);
        self.phase = phase;
    }
}
