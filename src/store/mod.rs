//! Attendance record store.
//!
//! [`RecordStore`] is the collaborator boundary the pipeline writes through:
//! append-only inserts with server-assigned timestamps, full-collection
//! snapshots ordered newest-first, a live subscription, and bounded delete
//! batches. No transactional semantics beyond a single record write are
//! assumed anywhere above this trait.
//!
//! [`JsonStore`] is the shipped implementation: records persisted as a JSON
//! file under a data directory, loaded once at startup, rewritten on every
//! mutation. Each mutation publishes a fresh full-set [`Snapshot`] through a
//! watch channel; late or slow readers simply observe the latest one
//! (last snapshot wins, no merge logic).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{AttendanceRecord, NewRecord};

/// Immutable full-collection snapshot, `created_at` descending.
pub type Snapshot = Arc<Vec<AttendanceRecord>>;

/// Largest delete batch a single request may carry.
pub const MAX_DELETE_BATCH: usize = 500;

/// File the records are persisted into, inside the data directory.
const RECORDS_FILE: &str = "records.json";

// =============================================================================
// Store Trait
// =============================================================================

/// Collaborator boundary for attendance persistence.
pub trait RecordStore: Send + Sync {
    /// Append a validated record, assigning id and timestamp.
    fn insert(&self, record: NewRecord) -> StoreResult<AttendanceRecord>;

    /// Current full collection, newest first.
    fn snapshot(&self) -> Snapshot;

    /// Live subscription delivering a full snapshot on every change.
    /// Cancel by dropping the receiver.
    fn watch(&self) -> watch::Receiver<Snapshot>;

    /// Delete one bounded batch of ids, returning how many were removed.
    /// Fails without touching anything when the batch exceeds
    /// [`MAX_DELETE_BATCH`].
    fn delete_batch(&self, ids: &[String]) -> StoreResult<usize>;
}

// =============================================================================
// JSON-file Store
// =============================================================================

struct StoreInner {
    records: Vec<AttendanceRecord>,
    /// Highest timestamp handed out so far; inserts clamp to it so
    /// `created_at` stays non-decreasing in insertion order.
    last_assigned: Option<DateTime<Utc>>,
}

/// File-backed record store.
pub struct JsonStore {
    data_dir: PathBuf,
    inner: Mutex<StoreInner>,
    tx: watch::Sender<Snapshot>,
}

impl JsonStore {
    /// Open (or create) a store under the given data directory.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        let mut records = load_records(&data_dir.join(RECORDS_FILE))?;
        sort_newest_first(&mut records);
        let last_assigned = records.iter().filter_map(|r| r.created_at).max();

        let snapshot: Snapshot = Arc::new(records.clone());
        let (tx, _) = watch::channel(snapshot);

        Ok(Self {
            data_dir,
            inner: Mutex::new(StoreInner {
                records,
                last_assigned,
            }),
            tx,
        })
    }

    fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }

    /// Write the full collection to disk. Called with the lock held so
    /// persisted state never lags published snapshots.
    fn persist(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(records)?;
        fs::write(self.records_path(), content)?;
        Ok(())
    }

    fn publish(&self, records: &[AttendanceRecord]) {
        // send_replace updates the channel value even with zero receivers;
        // snapshot() reads through the same channel, so every mutation must
        // land here.
        self.tx.send_replace(Arc::new(records.to_vec()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // Mutations build the new vec before committing, so a poisoned
        // lock never holds half-applied state.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl RecordStore for JsonStore {
    fn insert(&self, record: NewRecord) -> StoreResult<AttendanceRecord> {
        let mut inner = self.lock();

        // Server-assigned timestamp, clamped non-decreasing.
        let mut now = Utc::now();
        if let Some(last) = inner.last_assigned {
            if now < last {
                now = last;
            }
        }

        let stored = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            sex: record.sex,
            age_range: record.age_range,
            category: record.category,
            location: record.location,
            event_id: record.event_id,
            created_at: Some(now),
        };

        let mut next = inner.records.clone();
        next.insert(0, stored.clone());
        self.persist(&next)?;

        inner.records = next;
        inner.last_assigned = Some(now);
        self.publish(&inner.records);

        Ok(stored)
    }

    fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    fn delete_batch(&self, ids: &[String]) -> StoreResult<usize> {
        if ids.len() > MAX_DELETE_BATCH {
            return Err(StoreError::WriteRejected(format!(
                "delete batch of {} exceeds ceiling of {}",
                ids.len(),
                MAX_DELETE_BATCH
            )));
        }

        let mut inner = self.lock();
        let before = inner.records.len();
        let next: Vec<AttendanceRecord> = inner
            .records
            .iter()
            .filter(|r| !ids.contains(&r.id))
            .cloned()
            .collect();
        let removed = before - next.len();

        self.persist(&next)?;
        inner.records = next;
        self.publish(&inner.records);

        Ok(removed)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn load_records(path: &Path) -> StoreResult<Vec<AttendanceRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Newest first; records without a timestamp sink to the end.
fn sort_newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| match (b.created_at, a.created_at) {
        (Some(b_ts), Some(a_ts)) => b_ts.cmp(&a_ts),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
