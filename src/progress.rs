//! Operator-facing transfer progress reporting
//!
//! Progress lines go straight to stdout, not to the log sink. A reporter is
//! created per transfer job and captured by that job's progress callback;
//! nothing is stored on the long-lived client, so concurrent transfers on
//! separate client instances cannot corrupt each other's reporting.

use std::io::Write;

const MB: f64 = 1024.0 * 1024.0;

/// Rewrites one console line with the cumulative transfer state
#[derive(Clone, Copy)]
pub struct ProgressReporter {
    verb: &'static str,
    total: u64,
}

impl ProgressReporter {
    /// Creates a reporter for a transfer of `total` expected bytes
    pub fn new(verb: &'static str, total: u64) -> Self {
        Self { verb, total }
    }

    /// Reports the cumulative byte offset reached so far
    pub fn update(&self, offset: u64) {
        let percent = if self.total == 0 {
            100.0
        } else {
            offset as f64 / self.total as f64 * 100.0
        };
        print!(
            "\r{} {:.2} MB of {:.2} MB ... [{:.2}%]",
            self.verb,
            offset as f64 / MB,
            self.total as f64 / MB,
            percent
        );
        let _ = std::io::stdout().flush();
    }

    /// Terminates the progress line
    pub fn finish(&self) {
        println!();
    }
}
