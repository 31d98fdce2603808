use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Coalesces search keystrokes. Input lands in a draft; the draft is committed
/// once no new input has arrived for the quiet period.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    draft: String,
    committed: String,
    last_input: Option<Instant>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            draft: String::new(),
            committed: String::new(),
            last_input: None,
        }
    }

    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.draft = text.into();
        self.last_input = Some(now);
    }

    /// Commits the draft if the quiet period has elapsed and it differs from
    /// the last committed value.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let last = self.last_input?;
        if now.saturating_duration_since(last) < self.quiet {
            return None;
        }
        self.last_input = None;
        if self.draft == self.committed {
            return None;
        }
        self.committed.clone_from(&self.draft);
        Some(&self.committed)
    }

    /// Skips the quiet period.
    pub fn commit_now(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.committed.clone_from(&self.draft);
        self.last_input = None;
    }

    /// When the pending draft becomes eligible for commit.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_input.map(|last| last + self.quiet)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_QUIET_PERIOD)
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
