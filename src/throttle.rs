/// Gates when a new fetch may start.
///
/// Three guards combine over a caller-supplied clock (no timers are spawned):
/// 1. **Reentrancy**: a single in-flight marker; a new fetch is refused while
///    one is outstanding, even when requested from within an event handler.
/// 2. **Cooldown**: a hard minimum spacing between fetch *start* times,
///    independent of how often triggers arrive.
/// 3. **Debounce**: qualifying triggers coalesce: each call to
///    [`FetchThrottle::schedule`] re-arms the single pending fetch one
///    debounce window out, cancelling the previous arm.
///
/// Under rapid repeated triggering this bounds the fetch rate to roughly
/// one start per cooldown window, and no two fetches ever overlap.
#[derive(Clone, Debug)]
pub struct FetchThrottle {
    cooldown_ms: u64,
    debounce_ms: u64,
    in_flight: bool,
    last_start_ms: Option<u64>,
    pending_due_ms: Option<u64>,
}

impl FetchThrottle {
    pub fn new(cooldown_ms: u64, debounce_ms: u64) -> Self {
        Self {
            cooldown_ms,
            debounce_ms,
            in_flight: false,
            last_start_ms: None,
            pending_due_ms: None,
        }
    }

    /// (Re)arms the pending fetch one debounce window from `now_ms`.
    pub fn schedule(&mut self, now_ms: u64) {
        self.pending_due_ms = Some(now_ms.saturating_add(self.debounce_ms));
    }

    /// Arms the pending fetch with no debounce delay (initial load,
    /// post-invalidation reload).
    pub fn schedule_immediate(&mut self, now_ms: u64) {
        self.pending_due_ms = Some(now_ms);
    }

    /// Cancels the pending not-yet-fired fetch, if any.
    pub fn cancel_pending(&mut self) {
        self.pending_due_ms = None;
    }

    /// Returns `true` exactly when a fetch may start now, consuming the
    /// pending arm and recording the start.
    ///
    /// A pending fetch that comes due while another is in flight is dropped
    /// (the next scroll trigger re-arms it). One that comes due inside the
    /// cooldown window is deferred to the earliest allowed start instead.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.pending_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        if self.in_flight {
            pftrace!(now_ms, "FetchThrottle: pending dropped, fetch in flight");
            self.pending_due_ms = None;
            return false;
        }
        if let Some(last) = self.last_start_ms {
            let earliest = last.saturating_add(self.cooldown_ms);
            if now_ms < earliest {
                pftrace!(now_ms, earliest, "FetchThrottle: deferred by cooldown");
                self.pending_due_ms = Some(earliest);
                return false;
            }
        }
        self.pending_due_ms = None;
        self.in_flight = true;
        self.last_start_ms = Some(now_ms);
        true
    }

    /// Clears the in-flight marker once the fetch resolved (either way).
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    /// Clears every marker: in-flight flag, cooldown timestamp, pending arm.
    pub fn reset(&mut self) {
        self.in_flight = false;
        self.last_start_ms = None;
        self.pending_due_ms = None;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_due_ms(&self) -> Option<u64> {
        self.pending_due_ms
    }

    pub fn last_start_ms(&self) -> Option<u64> {
        self.last_start_ms
    }
}
