//! Progress reporting for batch scan registration

use indicatif::{ProgressBar, ProgressStyle};

/// Wrapper around an indicatif progress bar for batch runs
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Creates a tracker for `total` scans
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"));
        bar.set_message(description.to_string());

        ProgressTracker {
            bar,
        }
    }

    /// Advances the bar by `amount` scans
    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    /// Updates the message shown next to the bar
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Finishes the bar with a completion message
    pub fn finish(&self) {
        self.bar.finish_with_message("Completed");
    }
}
