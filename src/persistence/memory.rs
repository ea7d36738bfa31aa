//! In-memory store used when persistence is disabled and in tests.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{EventRepository, EventStore};
use crate::domain::{EventFilter, EventRecord, EventStats, ReportId};
use crate::error::StoreError;

/// Map of stored records keyed by report id.
///
/// Clones share the same underlying map, so a session handed to a sync
/// run writes into the store the read API queries. Existence checks and
/// inserts each take the map lock; an insert for an id that is already
/// present fails with [`StoreError::Duplicate`].
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    records: Arc<RwLock<BTreeMap<ReportId, EventRecord>>>,
    insert_calls: Arc<AtomicUsize>,
}

impl MemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Number of `insert` calls made, successful or not.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::Relaxed)
    }

    async fn sorted(&self, keep: impl Fn(&EventRecord) -> bool) -> Vec<EventRecord> {
        let map = self.records.read().await;
        let mut records: Vec<EventRecord> = map.values().filter(|r| keep(*r)).cloned().collect();
        // Newest origin first, records without an origin time last.
        records.sort_by_key(|r| {
            (
                r.origin_time.is_none(),
                Reverse(r.origin_time),
                Reverse(r.report_id.clone()),
            )
        });
        records
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn exists(&self, report_id: &ReportId) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(report_id))
    }

    async fn insert(&self, record: &EventRecord) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::Relaxed);
        let mut map = self.records.write().await;
        if map.contains_key(&record.report_id) {
            return Err(StoreError::Duplicate(record.report_id.to_string()));
        }
        map.insert(record.report_id.clone(), record.clone());
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryEventStore {
    async fn begin_session(&self) -> Result<Box<dyn EventStore>, StoreError> {
        Ok(Box::new(self.clone()))
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError> {
        let mut records = self.sorted(|r| filter.matches(r)).await;
        if let Some(limit) = filter.limit {
            records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(records)
    }

    async fn get(&self, report_id: &ReportId) -> Result<Option<EventRecord>, StoreError> {
        Ok(self.records.read().await.get(report_id).cloned())
    }

    async fn recent(&self, since: DateTime<Utc>) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self
            .sorted(|r| r.origin_time.is_some_and(|t| t >= since))
            .await)
    }

    async fn stats(&self, since: DateTime<Utc>) -> Result<EventStats, StoreError> {
        let map = self.records.read().await;
        let total = map.len();
        if total == 0 {
            return Ok(EventStats::default());
        }

        let magnitudes = map.values().map(|r| r.magnitude);
        let sum: f64 = magnitudes.clone().sum();
        #[allow(clippy::cast_precision_loss)]
        let average = sum / total as f64;

        Ok(EventStats {
            total: i64::try_from(total).unwrap_or(i64::MAX),
            recent: i64::try_from(
                map.values()
                    .filter(|r| r.origin_time.is_some_and(|t| t >= since))
                    .count(),
            )
            .unwrap_or(i64::MAX),
            max_magnitude: magnitudes.reduce(f64::max),
            average_magnitude: Some(average),
            latest_origin_time: map.values().filter_map(|r| r.origin_time).max(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
