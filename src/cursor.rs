use crate::{Cursor, Record};

/// Tracks the resume position in the ordered record stream.
///
/// The cursor is derived exclusively from the last element of the most
/// recently applied batch: within a session it only moves forward, and only
/// [`CursorTracker::reset`] rewinds it to the start of the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorTracker {
    cursor: Option<Cursor>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds to the start of the sequence.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Advances the cursor to the last element of `batch`.
    ///
    /// An empty batch leaves the cursor unchanged.
    pub fn advance(&mut self, batch: &[Record]) {
        if let Some(last) = batch.last() {
            self.cursor = Some(Cursor::of(last));
        }
    }

    pub fn current(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}
