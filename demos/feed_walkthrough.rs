//! End-to-end walkthrough against an in-memory record source.
//!
//! Simulates a user scrolling through a 500-record feed with an accelerating
//! flick, then flipping the sort order mid-fetch, then running a search.
//!
//! Run with:
//! ```sh
//! cargo run --example feed_walkthrough
//! ```

use futures::executor::block_on;

use pagefeed::{
    Credentials, FeedDriver, FeedSession, NewRecord, PageRequest, PumpOutcome, Record,
    RecordSource, RecordStatus, SessionOptions, SortOrder, SourceError, ViewMode,
};

/// In-memory source: 500 records ordered by descending creation time.
struct MemorySource {
    records: Vec<Record>,
}

impl MemorySource {
    fn new(count: i64) -> Self {
        let records = (0..count)
            .rev()
            .map(|n| Record {
                id: format!("rec-{n:04}"),
                order_key: 1_700_000_000_000 + n * 60_000,
                title: format!("entry #{n}"),
                description: None,
                status: RecordStatus::Active,
                priority_score: None,
                priority_label: None,
                category_id: None,
                tag_ids: Vec::new(),
            })
            .collect();
        Self { records }
    }

    fn ordered(&self, request: &PageRequest) -> Vec<Record> {
        let mut records = self.records.clone();
        if request.sort_order == SortOrder::Asc {
            records.reverse();
        }
        records
    }
}

#[async_trait::async_trait]
impl RecordSource for MemorySource {
    async fn fetch_page(
        &self,
        _credentials: &Credentials,
        request: &PageRequest,
    ) -> Result<Vec<Record>, SourceError> {
        let ordered = self.ordered(request);
        let start = match &request.cursor {
            None => 0,
            Some(cursor) => ordered
                .iter()
                .position(|r| r.id == cursor.id)
                .map_or(ordered.len(), |i| i + 1),
        };
        Ok(ordered
            .into_iter()
            .skip(start)
            .take(request.size as usize)
            .collect())
    }

    async fn search(
        &self,
        _credentials: &Credentials,
        query: &str,
    ) -> Result<Vec<Record>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.title.contains(query))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        _credentials: &Credentials,
        record: &NewRecord,
    ) -> Result<Record, SourceError> {
        Ok(Record {
            id: format!("rec-new-{}", record.title.len()),
            order_key: 1_800_000_000_000,
            title: record.title.clone(),
            description: record.description.clone(),
            status: RecordStatus::Active,
            priority_score: record.priority_score,
            priority_label: record.priority_label.clone(),
            category_id: record.category_id.clone(),
            tag_ids: record.tag_ids.clone(),
        })
    }

    async fn update(
        &self,
        _credentials: &Credentials,
        id: &str,
        record: &NewRecord,
    ) -> Result<Record, SourceError> {
        let mut updated = self
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(SourceError::Transport {
                body: "not found".to_string(),
            })?;
        updated.title = record.title.clone();
        updated.description = record.description.clone();
        Ok(updated)
    }

    async fn complete(&self, _c: &Credentials, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }

    async fn uncomplete(&self, _c: &Credentials, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }

    async fn trash(&self, _c: &Credentials, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }

    async fn restore(&self, _c: &Credentials, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }

    async fn purge(&self, _c: &Credentials, _id: &str) -> Result<(), SourceError> {
        Ok(())
    }
}

fn main() {
    block_on(async {
        let credentials = Credentials {
            bearer: "demo-token".to_string(),
            user_id: "demo".to_string(),
        };
        let mut driver = FeedDriver::new(
            FeedSession::new(SessionOptions::new()),
            MemorySource::new(500),
            credentials,
        );

        // Initial load fires on the first pump.
        let mut now_ms = 0u64;
        driver.pump(now_ms).await;
        println!(
            "initial load: {} records, batch size {}",
            driver.session().len(),
            driver.session().batch_size()
        );

        // An accelerating flick: each event scrolls further in the same
        // 16ms frame, so the adaptive batch size climbs.
        for frame in 0..40u64 {
            now_ms += 16;
            let displacement = 40.0 + frame as f64 * 12.0;
            driver.session_mut().on_scroll(displacement, true, now_ms);
            if driver.pump(now_ms).await == PumpOutcome::Applied {
                println!(
                    "t={now_ms:>5}ms  loaded {:>3} records  next batch {}",
                    driver.session().len(),
                    driver.session().batch_size()
                );
            }
        }

        // Flip the sort order: the list resets atomically and reloads with
        // the carried-over batch size.
        now_ms += 100;
        driver.session_mut().set_sort_order(SortOrder::Asc, now_ms);
        driver.pump(now_ms).await;
        println!(
            "after sort flip: {} records, oldest first: {}",
            driver.session().len(),
            driver.session().records()[0].title
        );

        // Scroll to exhaustion.
        loop {
            now_ms += 200;
            driver.session_mut().on_scroll(80.0, true, now_ms);
            now_ms += 200;
            if driver.pump(now_ms).await == PumpOutcome::Exhausted {
                break;
            }
        }
        println!(
            "exhausted after {} records, has_more = {}",
            driver.session().len(),
            driver.session().has_more()
        );

        // Search bypasses pagination entirely.
        now_ms += 100;
        driver.session_mut().set_view(ViewMode::Search, now_ms);
        driver.submit_search("entry #42").await.unwrap();
        println!("search hits: {}", driver.session().len());
    });
}
