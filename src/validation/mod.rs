//! Field validation for check-in submissions.
//!
//! [`validate`] checks every field independently and returns *all* failures
//! together, so a caller can render each error at once instead of
//! fail-fast surfacing one at a time. On success the submission is parsed
//! into a normalized [`NewRecord`]: email trimmed and lower-cased, phone and
//! names trimmed, enum labels resolved.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldErrors;
use crate::models::{AgeRange, Category, CheckinSubmission, NewRecord, Sex};

/// `local@domain.tld`, no whitespace, at least one dot after the `@`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern")
});

/// Message for empty required fields.
const REQUIRED: &str = "Required";

/// Check a candidate email against the standard pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Pick the effective location for a submission.
///
/// Empty input falls back to the first configured area; locations get no
/// stricter default handling than that.
pub fn resolve_location(input: &str, locations: &[String]) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        locations.first().cloned().unwrap_or_default()
    } else {
        trimmed.to_string()
    }
}

/// Validate a submission against the configured catchment areas.
///
/// Returns the normalized [`NewRecord`] (without an event id; the
/// registration flow tags that on) or one error entry per failing field,
/// keyed by the wire field name.
pub fn validate(
    submission: &CheckinSubmission,
    locations: &[String],
) -> Result<NewRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let first_name = submission.first_name.trim();
    if first_name.is_empty() {
        errors.insert("firstName".into(), REQUIRED.into());
    }

    let last_name = submission.last_name.trim();
    if last_name.is_empty() {
        errors.insert("lastName".into(), REQUIRED.into());
    }

    let email = submission.email.trim();
    if email.is_empty() {
        errors.insert("email".into(), REQUIRED.into());
    } else if !is_valid_email(email) {
        errors.insert("email".into(), "Invalid email format".into());
    }

    let phone = submission.phone.trim();
    if phone.is_empty() {
        errors.insert("phone".into(), REQUIRED.into());
    }

    // Mandatory selections. An earlier revision defaulted category to
    // Member; the mandatory form is canonical.
    let sex = Sex::from_label(&submission.sex);
    if sex.is_none() {
        errors.insert("sex".into(), REQUIRED.into());
    }
    let age_range = AgeRange::from_label(&submission.age_range);
    if age_range.is_none() {
        errors.insert("ageRange".into(), REQUIRED.into());
    }
    let category = Category::from_label(&submission.category);
    if category.is_none() {
        errors.insert("category".into(), REQUIRED.into());
    }

    let location = resolve_location(&submission.location, locations);
    if !submission.location.trim().is_empty() && !locations.iter().any(|l| l == &location) {
        errors.insert("location".into(), "Unknown location".into());
    }

    match (errors.is_empty(), sex, age_range, category) {
        (true, Some(sex), Some(age_range), Some(category)) => Ok(NewRecord {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_lowercase(),
            phone: phone.to_string(),
            sex,
            age_range,
            category,
            location,
            event_id: String::new(),
        }),
        _ => Err(errors),
    }
}
