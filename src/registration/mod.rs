//! Registration pipeline: validate, check duplicates, insert.
//!
//! The flow is strictly sequential: field validation first, then the email
//! collision check, then the phone collision check, then the store write.
//! Email is checked before phone, so a submission colliding on both fields
//! reports the email conflict.

use crate::config::AppConfig;
use crate::error::{CheckinError, CheckinResult};
use crate::models::{AttendanceRecord, CheckinSubmission};
use crate::store::RecordStore;
use crate::validation::validate;

/// Scan existing records for an email or phone collision.
///
/// Email comparison is case-insensitive (stored emails are already
/// lower-cased, the candidate must be too); phone comparison is a verbatim
/// match on the trimmed value. Short-circuits on the first hit, email first.
pub fn find_duplicate(
    records: &[AttendanceRecord],
    email: &str,
    phone: &str,
) -> Option<CheckinError> {
    let email = email.trim().to_lowercase();
    if records.iter().any(|r| r.email.to_lowercase() == email) {
        return Some(CheckinError::DuplicateEmail);
    }

    let phone = phone.trim();
    if records.iter().any(|r| r.phone == phone) {
        return Some(CheckinError::DuplicatePhone);
    }

    None
}

/// Run the full registration flow for one submission.
///
/// Returns the stored record on success. Note the check-then-insert is not
/// atomic against the store: two concurrent submissions with the same email
/// can both pass the duplicate check and both insert. The store serializes
/// individual writes, so uniqueness here is best-effort, not strict.
pub fn submit(
    store: &dyn RecordStore,
    config: &AppConfig,
    submission: &CheckinSubmission,
) -> CheckinResult<AttendanceRecord> {
    let candidate = validate(submission, &config.locations).map_err(CheckinError::Invalid)?;

    let snapshot = store.snapshot();
    if let Some(conflict) = find_duplicate(&snapshot, &candidate.email, &candidate.phone) {
        return Err(conflict);
    }

    let record = store.insert(candidate.with_event_id(config.event_id.clone()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use tempfile::tempdir;

    fn submission(email: &str, phone: &str) -> CheckinSubmission {
        CheckinSubmission {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: email.into(),
            phone: phone.into(),
            sex: "Female".into(),
            age_range: "27-36".into(),
            category: "Member".into(),
            location: "Igando".into(),
        }
    }

    fn setup() -> (tempfile::TempDir, JsonStore, AppConfig) {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (dir, store, AppConfig::default())
    }

    #[test]
    fn test_submit_inserts_and_tags_event() {
        let (_dir, store, config) = setup();
        let record = submit(&store, &config, &submission("a@b.com", "123")).unwrap();
        assert_eq!(record.event_id, config.event_id);
        assert_eq!(record.email, "a@b.com");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_duplicate_email_is_case_insensitive() {
        let (_dir, store, config) = setup();
        submit(&store, &config, &submission("X@Y.com", "123")).unwrap();

        let err = submit(&store, &config, &submission("x@y.com", "999")).unwrap_err();
        assert!(matches!(err, CheckinError::DuplicateEmail));
    }

    #[test]
    fn test_duplicate_phone_verbatim() {
        let (_dir, store, config) = setup();
        submit(&store, &config, &submission("X@Y.com", "123")).unwrap();

        let err = submit(&store, &config, &submission("new@z.com", "123")).unwrap_err();
        assert!(matches!(err, CheckinError::DuplicatePhone));

        // Different formatting of the same number is NOT normalized
        submit(&store, &config, &submission("other@z.com", "1-2-3")).unwrap();
    }

    #[test]
    fn test_email_checked_before_phone() {
        let (_dir, store, config) = setup();
        submit(&store, &config, &submission("X@Y.com", "123")).unwrap();

        // Collides on both; the email conflict wins
        let err = submit(&store, &config, &submission("x@y.com", "123")).unwrap_err();
        assert!(matches!(err, CheckinError::DuplicateEmail));
    }

    #[test]
    fn test_invalid_submission_never_reaches_store() {
        let (_dir, store, config) = setup();
        let err = submit(&store, &config, &CheckinSubmission::default()).unwrap_err();
        assert!(matches!(err, CheckinError::Invalid(_)));
        assert!(store.snapshot().is_empty());
    }
}
