use crate::SizerState;

/// Converts scroll-event timing into the next requested batch size.
///
/// Faster scrolling signals faster content consumption, so the batch grows to
/// cut round-trip count; the [min, max] bounds prevent unbounded payloads and
/// under-fetching at low speed. The learned size deliberately survives
/// filter/sort invalidation; only a session restart (or an explicit
/// [`BatchSizer::restore_state`]) resets the cadence.
#[derive(Clone, Debug)]
pub struct BatchSizer {
    min: u32,
    max: u32,
    sensitivity: f64,
    size: u32,
    last_event_ms: Option<u64>,
}

impl BatchSizer {
    pub fn new(min: u32, max: u32, initial: u32, sensitivity: f64) -> Self {
        Self {
            min,
            max,
            sensitivity,
            size: initial.clamp(min, max),
            last_event_ms: None,
        }
    }

    /// Feeds one qualifying scroll/wheel event into the model.
    ///
    /// `displacement` is the scroll delta of the event (sign is ignored).
    /// The first observation only records a baseline timestamp; from the
    /// second on, `speed = |displacement| / max(1, dt_ms)` and
    /// `size = clamp(round(size * (1 + speed * sensitivity)), min, max)`.
    pub fn observe(&mut self, displacement: f64, now_ms: u64) {
        let Some(last) = self.last_event_ms.replace(now_ms) else {
            return;
        };
        let dt = now_ms.saturating_sub(last).max(1);
        // No `f64::abs` in core; branch instead.
        let magnitude = if displacement < 0.0 {
            -displacement
        } else {
            displacement
        };
        let speed = magnitude / dt as f64;
        let scaled = f64::from(self.size) * (1.0 + speed * self.sensitivity);
        // Round-half-up via truncation; `scaled` is non-negative.
        let next = ((scaled + 0.5) as u32).clamp(self.min, self.max);
        if next != self.size {
            pftrace!(prev = self.size, next, "BatchSizer::observe resized");
            self.size = next;
        }
    }

    /// The batch size the next fetch should request.
    pub fn next_size(&self) -> u32 {
        self.size
    }

    pub fn state(&self) -> SizerState {
        SizerState {
            size: self.size,
            last_event_ms: self.last_event_ms,
        }
    }

    /// Restores a previously captured cadence (e.g. across session restarts).
    pub fn restore_state(&mut self, state: SizerState) {
        self.size = state.size.clamp(self.min, self.max);
        self.last_event_ms = state.last_event_ms;
    }
}
