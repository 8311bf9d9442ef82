//! A headless adaptive keyset-pagination engine for infinite-scroll feeds.
//!
//! This crate focuses on the client-side mechanics of browsing a large,
//! server-ordered record collection incrementally: keyset cursor tracking,
//! scroll-velocity-driven batch sizing, fetch throttling/debouncing,
//! duplicate-safe batch reconciliation, and atomic invalidation when the
//! query parameters change.
//!
//! It is UI- and transport-agnostic. An adapter layer is expected to provide:
//! - scroll events (displacement + a "near bottom" flag) with timestamps
//! - the actual network calls against a record source
//! - a clock (`now_ms`), so the engine never spawns timers of its own
//!
//! The typical cycle is: feed scroll events into [`FeedSession::on_scroll`],
//! call [`FeedSession::poll`] once per tick, perform the fetch described by
//! the returned [`FetchDirective`], and hand the outcome back via
//! [`FeedSession::apply_batch`] or [`FeedSession::apply_error`]. With the
//! `source` feature, [`FeedDriver`] wires that cycle to a [`RecordSource`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cursor;
mod error;
mod options;
mod reconcile;
mod session;
mod sizer;
mod state;
mod throttle;
mod types;

#[cfg(feature = "source")]
mod driver;
#[cfg(feature = "source")]
mod source;


pub use cursor::CursorTracker;
pub use error::SourceError;
pub use options::{OnChangeCallback, SessionOptions};
pub use reconcile::merge;
pub use session::FeedSession;
pub use sizer::BatchSizer;
pub use state::{FeedState, SizerState};
pub use throttle::FetchThrottle;
pub use types::{
    Cursor, FeedPhase, FetchDirective, PageRequest, Record, RecordStatus, SortField, SortOrder,
    ViewMode,
};

#[cfg(feature = "source")]
pub use driver::{ConfigCatalog, FeedDriver, PumpOutcome};
#[cfg(feature = "source")]
pub use source::{ConfigSource, Credentials, LevelPlacement, NamedRef, NewRecord, RecordSource};
