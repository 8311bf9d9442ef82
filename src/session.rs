use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::reconcile;
use crate::{
    BatchSizer, Cursor, CursorTracker, FeedPhase, FeedState, FetchDirective, FetchThrottle,
    PageRequest, Record, RecordStatus, SessionOptions, SizerState, SortField, SortOrder, ViewMode,
};

/// The feed session: one object owning every piece of mutable pagination
/// state (list, cursor, adaptive size, throttle markers, query parameters).
///
/// This type is intentionally UI- and transport-agnostic:
/// - Your adapter drives it with scroll events and a `now_ms` clock.
/// - Fetches are described by [`FetchDirective`]s returned from
///   [`FeedSession::poll`]; the adapter performs them and reports back via
///   [`FeedSession::apply_batch`] / [`FeedSession::apply_error`].
/// - Each directive is stamped with the session's request generation;
///   outcomes whose generation no longer matches are discarded silently, so
///   a fetch dispatched before an invalidation can never leak into the new
///   list.
///
/// Phase machine: `Idle --poll--> Loading --empty batch--> Exhausted`,
/// `Loading --non-empty batch / error--> Idle`, and any parameter change
/// resets to `Idle` via [`FeedSession::invalidate`].
#[derive(Clone, Debug)]
pub struct FeedSession {
    options: SessionOptions,
    cursor: CursorTracker,
    sizer: BatchSizer,
    throttle: FetchThrottle,
    records: Vec<Record>,
    has_more: bool,
    phase: FeedPhase,
    generation: u64,
    view: ViewMode,
    sort_field: SortField,
    sort_order: SortOrder,
    statuses: Vec<RecordStatus>,
    priority_level: Option<String>,
    category_id: Option<String>,
    tags: Vec<String>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl FeedSession {
    /// Creates a session and arms the initial load: the first call to
    /// [`FeedSession::poll`] dispatches the opening fetch.
    pub fn new(options: SessionOptions) -> Self {
        let sizer = BatchSizer::new(
            options.min_batch,
            options.max_batch,
            options.initial_batch,
            options.sensitivity,
        );
        let mut throttle = FetchThrottle::new(options.cooldown_ms, options.debounce_ms);
        throttle.schedule_immediate(0);
        pfdebug!(
            min_batch = options.min_batch,
            max_batch = options.max_batch,
            cooldown_ms = options.cooldown_ms,
            debounce_ms = options.debounce_ms,
            "FeedSession::new"
        );
        Self {
            options,
            cursor: CursorTracker::new(),
            sizer,
            throttle,
            records: Vec::new(),
            has_more: true,
            phase: FeedPhase::Idle,
            generation: 0,
            view: ViewMode::Feed,
            sort_field: SortField::Created,
            sort_order: SortOrder::Desc,
            statuses: Vec::new(),
            priority_level: None,
            category_id: None,
            tags: Vec::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&FeedSession) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.current()
    }

    pub fn batch_size(&self) -> u32 {
        self.sizer.next_size()
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn priority_filter(&self) -> Option<&str> {
        self.priority_level.as_deref()
    }

    pub fn status_filter(&self) -> &[RecordStatus] {
        &self.statuses
    }

    pub fn category_filter(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn tag_filter(&self) -> &[String] {
        &self.tags
    }

    /// Feeds a scroll/wheel event into the session.
    ///
    /// Every event updates the velocity model; an event that crossed the
    /// "near bottom" threshold additionally (re)arms the debounced fetch.
    /// In the search view, or once the feed is exhausted, near-bottom
    /// triggers are ignored.
    pub fn on_scroll(&mut self, displacement: f64, near_bottom: bool, now_ms: u64) {
        self.sizer.observe(displacement, now_ms);
        if self.view != ViewMode::Feed {
            return;
        }
        if near_bottom && self.has_more && self.phase != FeedPhase::Exhausted {
            pftrace!(now_ms, "on_scroll: near-bottom trigger");
            self.throttle.schedule(now_ms);
        }
    }

    /// Fires the due pending fetch, if the throttle guards allow one.
    ///
    /// Call once per tick with the current clock. The returned directive's
    /// request captures the cursor, adaptive batch size and query parameters
    /// at dispatch time.
    pub fn poll(&mut self, now_ms: u64) -> Option<FetchDirective> {
        if self.view != ViewMode::Feed || self.phase == FeedPhase::Exhausted {
            return None;
        }
        if !self.throttle.poll(now_ms) {
            return None;
        }
        self.phase = FeedPhase::Loading;
        let request = PageRequest {
            size: self.sizer.next_size(),
            cursor: self.cursor.current().cloned(),
            sort_field: self.sort_field,
            sort_order: self.sort_order,
            statuses: self.statuses.clone(),
            priority_level: self.priority_level.clone(),
            category_id: self.category_id.clone(),
            tags: self.tags.clone(),
        };
        pfdebug!(
            generation = self.generation,
            size = request.size,
            "poll: fetch dispatched"
        );
        self.notify();
        Some(FetchDirective {
            generation: self.generation,
            request,
        })
    }

    /// Applies the outcome of a successful fetch.
    ///
    /// A stale `generation` (the session was invalidated after dispatch) is
    /// discarded without touching any state, including the in-flight marker
    /// of the *current* generation's fetch. Returns whether the batch was
    /// applied.
    ///
    /// An empty batch terminates the feed; a non-empty batch, even one
    /// shorter than requested, leaves `has_more` true, so termination
    /// always costs one trailing empty round-trip.
    pub fn apply_batch(&mut self, generation: u64, batch: Vec<Record>) -> bool {
        if generation != self.generation {
            pfdebug!(
                stale = generation,
                current = self.generation,
                "apply_batch: stale response discarded"
            );
            return false;
        }
        self.throttle.settle();
        if batch.is_empty() {
            self.has_more = false;
            self.phase = FeedPhase::Exhausted;
            pfdebug!(total = self.records.len(), "apply_batch: feed exhausted");
        } else {
            // Cursor advances past every fetched element, including any the
            // merge drops as duplicates.
            self.cursor.advance(&batch);
            let appended = reconcile::merge(&mut self.records, batch);
            self.has_more = true;
            self.phase = FeedPhase::Idle;
            pfdebug!(appended, total = self.records.len(), "apply_batch");
        }
        self.notify();
        true
    }

    /// Applies a fetch failure: fail open, list and cursor unchanged.
    ///
    /// There is no retry or backoff; the next near-bottom scroll re-attempts.
    /// Stale generations are discarded. Returns whether the error was
    /// applied.
    pub fn apply_error(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            pfdebug!(
                stale = generation,
                current = self.generation,
                "apply_error: stale response discarded"
            );
            return false;
        }
        self.throttle.settle();
        self.phase = FeedPhase::Idle;
        self.notify();
        true
    }

    /// Atomically resets the pagination state and arms one fresh fetch.
    ///
    /// Clears the cursor, the list and every throttle marker (in-flight
    /// flag, cooldown timestamp, pending debounce), sets `has_more` back to
    /// true and bumps the request generation so in-flight responses from the
    /// old parameter set are discarded on arrival. The adaptive batch size
    /// is deliberately carried forward.
    pub fn invalidate(&mut self, now_ms: u64) {
        self.generation = self.generation.wrapping_add(1);
        self.cursor.reset();
        self.records.clear();
        self.has_more = true;
        self.phase = FeedPhase::Idle;
        self.throttle.reset();
        if self.view == ViewMode::Feed {
            self.throttle.schedule_immediate(now_ms);
        }
        pfdebug!(generation = self.generation, "invalidate");
        self.notify();
    }

    pub fn set_sort_field(&mut self, sort_field: SortField, now_ms: u64) {
        if self.sort_field == sort_field {
            return;
        }
        self.sort_field = sort_field;
        self.invalidate(now_ms);
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder, now_ms: u64) {
        if self.sort_order == sort_order {
            return;
        }
        self.sort_order = sort_order;
        self.invalidate(now_ms);
    }

    pub fn set_priority_filter(&mut self, priority_level: Option<String>, now_ms: u64) {
        if self.priority_level == priority_level {
            return;
        }
        self.priority_level = priority_level;
        self.invalidate(now_ms);
    }

    /// Replaces the status filter set. Empty requests the source's default
    /// view (trashed records excluded); a non-empty set names exactly the
    /// statuses to serve. Treated as a set: order and duplicates are
    /// irrelevant.
    pub fn set_status_filter(&mut self, mut statuses: Vec<RecordStatus>, now_ms: u64) {
        statuses.sort_unstable();
        statuses.dedup();
        if self.statuses == statuses {
            return;
        }
        self.statuses = statuses;
        self.invalidate(now_ms);
    }

    pub fn set_category_filter(&mut self, category_id: Option<String>, now_ms: u64) {
        if self.category_id == category_id {
            return;
        }
        self.category_id = category_id;
        self.invalidate(now_ms);
    }

    /// Replaces the tag filter set. The incoming tags are treated as a set:
    /// order and duplicates are irrelevant.
    pub fn set_tag_filter(&mut self, mut tags: Vec<String>, now_ms: u64) {
        tags.sort_unstable();
        tags.dedup();
        if self.tags == tags {
            return;
        }
        self.tags = tags;
        self.invalidate(now_ms);
    }

    /// Switches between the paginated feed view and the search view.
    ///
    /// Either direction invalidates; entering the search view additionally
    /// stops the poll cycle until a query is submitted.
    pub fn set_view(&mut self, view: ViewMode, now_ms: u64) {
        if self.view == view {
            return;
        }
        self.view = view;
        self.invalidate(now_ms);
    }

    /// Replaces the displayed list wholesale with search results.
    ///
    /// The search view has no cursor, no merging and no pagination; each
    /// query submission replaces whatever was shown before. Ignored outside
    /// the search view.
    pub fn apply_search_results(&mut self, results: Vec<Record>) {
        if self.view != ViewMode::Search {
            pfwarn!("apply_search_results outside search view ignored");
            return;
        }
        self.records = results;
        self.phase = FeedPhase::Idle;
        pfdebug!(total = self.records.len(), "apply_search_results");
        self.notify();
    }

    /// Cancels the pending not-yet-fired fetch (session teardown).
    pub fn cancel_pending(&mut self) {
        self.throttle.cancel_pending();
    }

    /// Prepends a freshly created record (local echo of a create call).
    ///
    /// A record whose id is already present is ignored, preserving the
    /// uniqueness invariant.
    pub fn insert_created(&mut self, record: Record) {
        if self.records.iter().any(|r| r.id == record.id) {
            return;
        }
        self.records.insert(0, record);
        self.notify();
    }

    /// Local echo of a status mutation. Returns whether a record changed.
    pub fn apply_status(&mut self, id: &str, status: RecordStatus) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if record.status == status {
            return false;
        }
        record.status = status;
        self.notify();
        true
    }

    /// Replaces a record's content in place (local echo of an edit).
    ///
    /// The record keeps its position in the list and ids stay unique, since
    /// nothing is inserted. Returns false when the id is not displayed.
    pub fn apply_updated(&mut self, record: Record) -> bool {
        let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) else {
            return false;
        };
        *slot = record;
        self.notify();
        true
    }

    /// Drops a record from the displayed list (local echo of trash/purge).
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.notify();
        }
        removed
    }

    pub fn feed_state(&self) -> FeedState {
        FeedState {
            phase: self.phase,
            view: self.view,
            has_more: self.has_more,
            generation: self.generation,
            len: self.records.len(),
            cursor: self.cursor.current().cloned(),
            batch_size: self.sizer.next_size(),
        }
    }

    pub fn sizer_state(&self) -> SizerState {
        self.sizer.state()
    }

    /// Restores a previously exported scroll cadence (full session restarts
    /// are the only thing that resets the adaptive size; this undoes that).
    pub fn restore_sizer_state(&mut self, state: SizerState) {
        self.sizer.restore_state(state);
    }
}
