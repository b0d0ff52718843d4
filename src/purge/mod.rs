//! Batched purge of the full record set.
//!
//! Purge is the only destructive operation: it requires typing the literal
//! confirmation token, deletes in sequential batches bounded by the store's
//! per-request ceiling, and never retries or rolls back. A batch that fails
//! leaves every previously deleted batch deleted.

use crate::error::{PurgeError, PurgeResult};
use crate::store::{RecordStore, MAX_DELETE_BATCH};

/// The required confirmation token, compared after trimming and
/// upper-casing so "delete" is accepted equivalently.
pub const CONFIRMATION_TOKEN: &str = "DELETE";

/// Check a typed confirmation against the token.
pub fn is_confirmed(input: &str) -> bool {
    input.trim().to_uppercase() == CONFIRMATION_TOKEN
}

/// Delete every currently loaded record, in batches of at most
/// `batch_ceiling` ids. The ceiling is clamped to the store's
/// [`MAX_DELETE_BATCH`], so a larger configured value yields more batches
/// rather than rejected ones. Each batch must fully succeed before the next
/// is attempted. Returns the number of records deleted.
pub fn purge_all(
    store: &dyn RecordStore,
    confirmation: &str,
    batch_ceiling: usize,
) -> PurgeResult<usize> {
    if !is_confirmed(confirmation) {
        return Err(PurgeError::NotConfirmed);
    }

    let ids: Vec<String> = store.snapshot().iter().map(|r| r.id.clone()).collect();
    let ceiling = batch_ceiling.clamp(1, MAX_DELETE_BATCH);

    let mut deleted = 0;
    for chunk in ids.chunks(ceiling) {
        match store.delete_batch(chunk) {
            Ok(removed) => deleted += removed,
            Err(source) => return Err(PurgeError::BatchFailed { deleted, source }),
        }
    }

    Ok(deleted)
}
