use alloc::vec::Vec;

use crate::source::{ConfigSource, Credentials, LevelPlacement, NamedRef, NewRecord, RecordSource};
use crate::{FeedSession, Record, RecordStatus, SourceError};

/// Outcome of one [`FeedDriver::pump`] cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PumpOutcome {
    /// No fetch was due this tick.
    Idle,
    /// A non-empty batch was fetched and merged.
    Applied,
    /// The fetch resolved empty and terminated the feed.
    Exhausted,
    /// The response's generation was stale and it was discarded.
    Discarded,
    /// The credential was rejected; surface an authentication prompt.
    AuthRequired,
    /// Generic fetch failure; the session failed open and will retry on the
    /// next user trigger.
    Failed(SourceError),
}

/// Glue between a [`FeedSession`] and a [`RecordSource`].
///
/// The driver owns the session, the source and the credentials; the UI layer
/// forwards scroll events to [`FeedDriver::session_mut`] and calls
/// [`FeedDriver::pump`] once per tick. All write helpers fail open: on error
/// the displayed list is left unchanged and the error is returned to the
/// caller, with permission denial detectable via
/// [`SourceError::is_permission_denied`].
pub struct FeedDriver<S> {
    session: FeedSession,
    source: S,
    credentials: Credentials,
}

impl<S: RecordSource> FeedDriver<S> {
    pub fn new(session: FeedSession, source: S, credentials: Credentials) -> Self {
        Self {
            session,
            source,
            credentials,
        }
    }

    pub fn session(&self) -> &FeedSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FeedSession {
        &mut self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replaces the credential after a successful re-authentication.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// One poll → fetch → apply cycle.
    ///
    /// The suspension point sits exactly between dispatch and application;
    /// if the session is invalidated while the fetch is outstanding, the
    /// response's generation no longer matches and the session discards it.
    pub async fn pump(&mut self, now_ms: u64) -> PumpOutcome {
        let Some(directive) = self.session.poll(now_ms) else {
            return PumpOutcome::Idle;
        };
        match self
            .source
            .fetch_page(&self.credentials, &directive.request)
            .await
        {
            Ok(batch) => {
                let empty = batch.is_empty();
                if !self.session.apply_batch(directive.generation, batch) {
                    PumpOutcome::Discarded
                } else if empty {
                    PumpOutcome::Exhausted
                } else {
                    PumpOutcome::Applied
                }
            }
            Err(err) => {
                self.session.apply_error(directive.generation);
                if err.is_permission_denied() {
                    PumpOutcome::AuthRequired
                } else {
                    PumpOutcome::Failed(err)
                }
            }
        }
    }

    /// Issues one search fetch and replaces the displayed list wholesale.
    ///
    /// Only meaningful while the session is in the search view; there is no
    /// cursor, throttling or merging on this path.
    pub async fn submit_search(&mut self, query: &str) -> Result<(), SourceError> {
        let results = self.source.search(&self.credentials, query).await?;
        self.session.apply_search_results(results);
        Ok(())
    }

    /// Creates a record and prepends the server's echo to the list.
    pub async fn create(&mut self, record: &NewRecord) -> Result<Record, SourceError> {
        let created = self.source.create(&self.credentials, record).await?;
        self.session.insert_created(created.clone());
        Ok(created)
    }

    /// Edits a record's content and echoes the server's updated copy in
    /// place, keeping its list position.
    pub async fn update(&mut self, id: &str, record: &NewRecord) -> Result<Record, SourceError> {
        let updated = self.source.update(&self.credentials, id, record).await?;
        self.session.apply_updated(updated.clone());
        Ok(updated)
    }

    pub async fn complete(&mut self, id: &str) -> Result<(), SourceError> {
        self.source.complete(&self.credentials, id).await?;
        self.session.apply_status(id, RecordStatus::Completed);
        Ok(())
    }

    pub async fn uncomplete(&mut self, id: &str) -> Result<(), SourceError> {
        self.source.uncomplete(&self.credentials, id).await?;
        self.session.apply_status(id, RecordStatus::Active);
        Ok(())
    }

    /// Soft-deletes a record; the default feed excludes trashed records, so
    /// the local echo drops it from the list.
    pub async fn trash(&mut self, id: &str) -> Result<(), SourceError> {
        self.source.trash(&self.credentials, id).await?;
        self.session.remove(id);
        Ok(())
    }

    /// Restores a trashed record. No local echo: the record is not in the
    /// displayed feed, and it reappears on the next fetch of its page.
    pub async fn restore(&mut self, id: &str) -> Result<(), SourceError> {
        self.source.restore(&self.credentials, id).await
    }

    pub async fn purge(&mut self, id: &str) -> Result<(), SourceError> {
        self.source.purge(&self.credentials, id).await?;
        self.session.remove(id);
        Ok(())
    }
}

/// Cached configuration listings with refresh-after-mutation semantics.
///
/// The server is authoritative for priority-level order: every ordered
/// mutation re-fetches the full list instead of patching the cache locally.
pub struct ConfigCatalog<S> {
    source: S,
    credentials: Credentials,
    levels: Vec<NamedRef>,
    categories: Vec<NamedRef>,
    tags: Vec<NamedRef>,
}

impl<S: ConfigSource> ConfigCatalog<S> {
    pub fn new(source: S, credentials: Credentials) -> Self {
        Self {
            source,
            credentials,
            levels: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Priority levels in server rank order (as of the last refresh).
    pub fn levels(&self) -> &[NamedRef] {
        &self.levels
    }

    pub fn categories(&self) -> &[NamedRef] {
        &self.categories
    }

    pub fn tags(&self) -> &[NamedRef] {
        &self.tags
    }

    /// Fetches all three listings.
    pub async fn refresh(&mut self) -> Result<(), SourceError> {
        self.levels = self.source.priority_levels(&self.credentials).await?;
        self.categories = self.source.categories(&self.credentials).await?;
        self.tags = self.source.tags(&self.credentials).await?;
        Ok(())
    }

    async fn refresh_levels(&mut self) -> Result<(), SourceError> {
        self.levels = self.source.priority_levels(&self.credentials).await?;
        Ok(())
    }

    pub async fn create_level(
        &mut self,
        name: &str,
        placement: &LevelPlacement,
    ) -> Result<NamedRef, SourceError> {
        let created = self
            .source
            .create_level(&self.credentials, name, placement)
            .await?;
        self.refresh_levels().await?;
        Ok(created)
    }

    pub async fn rename_level(&mut self, id: &str, new_name: &str) -> Result<(), SourceError> {
        self.source
            .rename_level(&self.credentials, id, new_name)
            .await?;
        self.refresh_levels().await
    }

    pub async fn move_level(
        &mut self,
        id: &str,
        placement: &LevelPlacement,
    ) -> Result<(), SourceError> {
        self.source
            .move_level(&self.credentials, id, placement)
            .await?;
        self.refresh_levels().await
    }
}
