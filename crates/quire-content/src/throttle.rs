//! Query throttling policies.
//!
//! These sit in front of search and decide whether and when a query runs. They never touch
//! the index themselves, so they can be swapped or tested in isolation.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Decides whether a query is worth running at all.
pub trait QueryGate: fmt::Debug {
    /// Returns true if `query` should be sent to the index.
    fn admits(&self, query: &str) -> bool;
}

/// Rejects queries shorter than a minimum number of characters after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLengthGate {
    /// Minimum query length in characters.
    min_chars: usize,
}

impl MinLengthGate {
    /// Default minimum query length.
    pub const DEFAULT_MIN_CHARS: usize = 2;

    /// Creates a gate requiring at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for MinLengthGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CHARS)
    }
}

impl QueryGate for MinLengthGate {
    fn admits(&self, query: &str) -> bool {
        let trimmed = query.trim();
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_chars
    }
}

/// A query waiting for its debounce window to pass.
#[derive(Debug, Clone)]
struct Pending {
    /// The latest query text.
    query: String,
    /// When it was entered.
    at: Instant,
}

/// Coalesces rapid query input into a single query once input goes quiet.
///
/// Time is passed in explicitly: feed every keystroke to [`Debouncer::input`] and call
/// [`Debouncer::poll`] whenever convenient. A query is released once `delay` has elapsed
/// since the most recent input.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required before releasing a query.
    delay: Duration,
    /// The query waiting to be released.
    pending: Option<Pending>,
}

impl Debouncer {
    /// Default debounce window.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records new input, replacing any query still waiting.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            at: now,
        });
    }

    /// Releases the waiting query if the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.at) >= self.delay);
        if ready {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }

    /// Returns the instant at which the waiting query will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.at + self.delay)
    }

    /// Returns true if a query is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the waiting query.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
