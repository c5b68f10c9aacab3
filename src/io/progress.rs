//! Spinner reporting search progress on the terminal

use crate::algorithm::search::{Outcome, SearchStats};
use crate::io::configuration::PROGRESS_MESSAGE_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Live view of a running search
pub struct SearchProgress {
    bar: ProgressBar,
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgress {
    /// Create a spinner drawing to stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new_spinner())
    }

    /// Create a spinner that draws nowhere, for tests and quiet runs
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(SPINNER_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Show the latest counters
    pub fn update(&self, stats: &SearchStats) {
        self.bar.set_message(Self::describe(stats));
    }

    /// Stop the spinner, leaving a one-line summary
    pub fn finish(&self, outcome: &Outcome, stats: &SearchStats) {
        let verdict = match outcome {
            Outcome::Tileable(_) => "tileable",
            Outcome::Untileable => "not tileable",
            Outcome::Unknown(_) => "undecided",
        };
        self.bar
            .finish_with_message(format!("{verdict}: {}", Self::describe(stats)));
    }

    /// Message shown for a set of counters
    pub fn describe(stats: &SearchStats) -> String {
        let message = format!(
            "expanded {} | discovered {} | duplicates {} | pruned {}",
            stats.expanded, stats.discovered, stats.duplicates, stats.pruned
        );
        format!("{message:<PROGRESS_MESSAGE_WIDTH$}")
    }

    /// Current message, mostly useful in tests
    pub fn message(&self) -> String {
        self.bar.message()
    }
}
