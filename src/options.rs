use alloc::sync::Arc;

use crate::session::FeedSession;

/// A callback fired when the session's observable state changes.
///
/// Fired after list mutations, phase transitions, and invalidation. Multiple
/// changes applied inside one entry point are coalesced into a single call.
pub type OnChangeCallback = Arc<dyn Fn(&FeedSession) + Send + Sync>;

/// Configuration for [`crate::FeedSession`].
///
/// All timing options are expressed in milliseconds of the caller-supplied
/// clock (`now_ms`); the engine never reads a wall clock of its own.
#[derive(Clone)]
pub struct SessionOptions {
    /// Lower bound for the adaptive batch size.
    pub min_batch: u32,
    /// Upper bound for the adaptive batch size.
    pub max_batch: u32,
    /// Batch size before any scroll velocity has been observed.
    pub initial_batch: u32,
    /// Velocity sensitivity: `next = size * (1 + speed * sensitivity)`.
    ///
    /// `speed` is scroll displacement per millisecond, so values in the
    /// 0.2–0.25 range grow the batch noticeably on fast flicks while barely
    /// moving it for slow reading.
    pub sensitivity: f64,
    /// Minimum spacing between fetch start times.
    pub cooldown_ms: u64,
    /// Coalescing window for near-bottom scroll triggers: each qualifying
    /// event reschedules the single pending fetch this far out.
    pub debounce_ms: u64,
    /// Optional callback fired when the session's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self {
            min_batch: 20,
            max_batch: 150,
            initial_batch: 20,
            sensitivity: 0.25,
            cooldown_ms: 250,
            debounce_ms: 120,
            on_change: None,
        }
    }

    pub fn with_batch_bounds(mut self, min_batch: u32, max_batch: u32) -> Self {
        self.min_batch = min_batch;
        self.max_batch = max_batch;
        self
    }

    pub fn with_initial_batch(mut self, initial_batch: u32) -> Self {
        self.initial_batch = initial_batch;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&FeedSession) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("min_batch", &self.min_batch)
            .field("max_batch", &self.max_batch)
            .field("initial_batch", &self.initial_batch)
            .field("sensitivity", &self.sensitivity)
            .field("cooldown_ms", &self.cooldown_ms)
            .field("debounce_ms", &self.debounce_ms)
            .finish_non_exhaustive()
    }
}
