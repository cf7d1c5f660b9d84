//! Elapsed-time measurement and human-readable duration formatting

use std::time::{Duration, Instant};

const PERIODS: &[(&str, u64)] = &[
    ("year", 60 * 60 * 24 * 365),
    ("month", 60 * 60 * 24 * 30),
    ("day", 60 * 60 * 24),
    ("hour", 60 * 60),
    ("minute", 60),
    ("second", 1),
];

/// Formats a duration as a comma-separated list of time units
///
/// Zero-valued leading units are omitted and a unit gets the plural "s"
/// only when its value is greater than one: 3661 seconds formats as
/// `"1 hour, 1 minute, 1 second"`.
pub fn format_duration(duration: Duration) -> String {
    let mut seconds = duration.as_secs();
    let mut parts = Vec::new();
    for &(name, span) in PERIODS {
        if seconds >= span {
            let value = seconds / span;
            seconds %= span;
            let suffix = if value > 1 { "s" } else { "" };
            parts.push(format!("{value} {name}{suffix}"));
        }
    }
    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}

/// Stopwatch measuring wall-clock time since its start
pub struct ElapsedTime {
    started: Instant,
}

impl ElapsedTime {
    /// Starts a new measurement
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Formats the time passed since the start
    pub fn elapsed(&self) -> String {
        format_duration(self.started.elapsed())
    }

    /// Returns the raw duration since the start
    pub fn elapsed_duration(&self) -> Duration {
        self.started.elapsed()
    }

    /// Resets the measurement to now
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }
}

impl Default for ElapsedTime {
    fn default() -> Self {
        Self::start()
    }
}
