use crate::{Cursor, FeedPhase, ViewMode};

/// A lightweight snapshot of the feed's pagination state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedState {
    pub phase: FeedPhase,
    pub view: ViewMode,
    pub has_more: bool,
    pub generation: u64,
    pub len: usize,
    pub cursor: Option<Cursor>,
    pub batch_size: u32,
}

/// A snapshot of the velocity model's learned cadence.
///
/// Useful for carrying the adaptive batch size across full session restarts;
/// see [`crate::BatchSizer::restore_state`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizerState {
    pub size: u32,
    pub last_event_ms: Option<u64>,
}
