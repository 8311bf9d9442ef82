use alloc::string::String;
use alloc::vec::Vec;

/// Lifecycle status of a record, as reported by the record source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordStatus {
    Active,
    Completed,
    Trashed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Trashed => "trashed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortField {
    Created,
    Priority,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A record as served by the record source.
///
/// The engine only reads records and re-orders references to them; fields are
/// never mutated here except through the explicit local-echo operations on
/// [`crate::FeedSession`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Opaque unique identifier, assigned by the server.
    pub id: String,
    /// Creation timestamp in epoch milliseconds. Not guaranteed unique;
    /// `id` is the keyset tiebreaker.
    pub order_key: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub priority_score: Option<f64>,
    pub priority_label: Option<String>,
    pub category_id: Option<String>,
    pub tag_ids: Vec<String>,
}

/// Resume position in the ordered record stream.
///
/// `(order_key, id)` of the last record seen in the current sequence. An
/// absent cursor (`Option::None`) means "start of sequence".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    pub order_key: i64,
    pub id: String,
}

impl Cursor {
    pub fn of(record: &Record) -> Self {
        Self {
            order_key: record.order_key,
            id: record.id.clone(),
        }
    }
}

/// A single paginated read against the record source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    /// Requested batch size, within the sizer's [min, max] bounds.
    pub size: u32,
    /// Resume position; `None` requests the first page.
    pub cursor: Option<Cursor>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Status filter set. Empty requests the source's default view, which
    /// excludes trashed records; a non-empty set names exactly the statuses
    /// to serve (so `[Trashed]` reaches the trash).
    pub statuses: Vec<RecordStatus>,
    /// Optional priority-level filter (level id).
    pub priority_level: Option<String>,
    /// Optional category filter (category id).
    pub category_id: Option<String>,
    /// Tag filter set (tag ids); empty means no tag filter.
    pub tags: Vec<String>,
}

impl PageRequest {
    /// The tag filter as the comma-joined wire parameter, or `None` when no
    /// tag filter is active.
    pub fn tags_param(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        Some(self.tags.join(","))
    }

    /// The status filter as the comma-joined wire parameter, or `None` for
    /// the default view.
    pub fn statuses_param(&self) -> Option<String> {
        if self.statuses.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.statuses.iter().map(RecordStatus::as_str).collect();
        Some(names.join(","))
    }
}

/// The paginated feed's load phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedPhase {
    /// No fetch in flight; further pages may exist.
    Idle,
    /// A fetch has been dispatched and not yet resolved.
    Loading,
    /// The source returned an empty batch; scrolling issues no new fetches.
    Exhausted,
}

/// Which view the session is currently serving.
///
/// The search view bypasses cursor/throttle/reconciliation entirely: one
/// fetch per query submission, wholesale list replacement, no pagination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    Feed,
    Search,
}

/// An instruction to perform one fetch, produced by [`crate::FeedSession::poll`].
///
/// `generation` must be handed back unchanged with the outcome; responses
/// whose generation no longer matches the session are discarded silently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchDirective {
    pub generation: u64,
    pub request: PageRequest,
}
