use alloc::string::String;
use alloc::vec::Vec;

use async_trait::async_trait;

use crate::{PageRequest, Record, SourceError};

/// Bearer credential plus user identifier, carried on every request to the
/// record and configuration sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub bearer: String,
    pub user_id: String,
}

/// Payload for creating a record. The server assigns id and creation
/// timestamp and returns the full [`Record`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewRecord {
    pub title: String,
    pub description: Option<String>,
    pub priority_score: Option<f64>,
    pub priority_label: Option<String>,
    pub category_id: Option<String>,
    pub priority_level: Option<String>,
    pub tag_ids: Vec<String>,
}

/// A configuration entry: priority level, category or tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

/// Where to place a priority level relative to the server-ordered list.
///
/// Placement is adjacency-based: the server resolves the anchor and is
/// authoritative for the resulting order; clients re-fetch the full list
/// after any ordered mutation instead of recomputing order locally.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelPlacement {
    /// Top of the list.
    Top,
    /// Immediately after the named anchor level.
    After(String),
    /// Immediately before the named anchor level.
    Before(String),
}

/// The record source: paginated reads, non-paginated search, and writes.
///
/// Implementations own the transport (HTTP or otherwise) and must attach the
/// supplied [`Credentials`] to every request. A rejected credential is
/// reported as [`SourceError::PermissionDenied`] so callers can surface an
/// authentication prompt instead of a generic failure.
#[async_trait]
pub trait RecordSource {
    /// Returns an ordered sequence of records consistent with the requested
    /// sort, possibly empty, excluding trashed records unless the filter
    /// asks for them.
    async fn fetch_page(
        &self,
        credentials: &Credentials,
        request: &PageRequest,
    ) -> Result<Vec<Record>, SourceError>;

    /// Free-text/semantic lookup: unordered, no pagination metadata.
    async fn search(
        &self,
        credentials: &Credentials,
        query: &str,
    ) -> Result<Vec<Record>, SourceError>;

    async fn create(
        &self,
        credentials: &Credentials,
        record: &NewRecord,
    ) -> Result<Record, SourceError>;

    /// Replaces a record's editable content (title, description, priority,
    /// category, tags) and returns the updated record.
    async fn update(
        &self,
        credentials: &Credentials,
        id: &str,
        record: &NewRecord,
    ) -> Result<Record, SourceError>;

    // Status mutations are idempotent per target state; the engine consumes
    // no payload from them.
    async fn complete(&self, credentials: &Credentials, id: &str) -> Result<(), SourceError>;
    async fn uncomplete(&self, credentials: &Credentials, id: &str) -> Result<(), SourceError>;
    async fn trash(&self, credentials: &Credentials, id: &str) -> Result<(), SourceError>;
    async fn restore(&self, credentials: &Credentials, id: &str) -> Result<(), SourceError>;
    async fn purge(&self, credentials: &Credentials, id: &str) -> Result<(), SourceError>;
}

/// The configuration source: `{id, name}` listings plus ordered mutation of
/// priority levels.
#[async_trait]
pub trait ConfigSource {
    /// Priority levels in server rank order.
    async fn priority_levels(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<NamedRef>, SourceError>;

    async fn categories(&self, credentials: &Credentials) -> Result<Vec<NamedRef>, SourceError>;

    async fn tags(&self, credentials: &Credentials) -> Result<Vec<NamedRef>, SourceError>;

    async fn create_level(
        &self,
        credentials: &Credentials,
        name: &str,
        placement: &LevelPlacement,
    ) -> Result<NamedRef, SourceError>;

    async fn rename_level(
        &self,
        credentials: &Credentials,
        id: &str,
        new_name: &str,
    ) -> Result<(), SourceError>;

    async fn move_level(
        &self,
        credentials: &Credentials,
        id: &str,
        placement: &LevelPlacement,
    ) -> Result<(), SourceError>;
}
