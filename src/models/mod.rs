//! Domain models for the check-in pipeline.
//!
//! This module contains the core data structures used throughout the crate:
//!
//! - [`AttendanceRecord`] - A stored check-in with store-assigned id and timestamp
//! - [`CheckinSubmission`] - Raw form payload before validation
//! - [`NewRecord`] - Validated, normalized candidate handed to the store
//! - [`Sex`], [`AgeRange`], [`Category`] - Closed attendee classifications
//!
//! Locations are deliberately *not* an enum: the catchment area list changed
//! between event editions, so the legal values live in
//! [`crate::config::AppConfig`] and validation reads them from there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Sex
// =============================================================================

/// Attendee sex.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// All legal values, in display order.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Parse from a form label, tolerant of case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    /// Display label, identical to the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

// =============================================================================
// Age Range
// =============================================================================

/// One of six fixed age bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgeRange {
    #[serde(rename = "under 19")]
    Under19,
    #[serde(rename = "19-26")]
    From19To26,
    #[serde(rename = "27-36")]
    From27To36,
    #[serde(rename = "37-45")]
    From37To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "55 and above")]
    Above55,
}

impl AgeRange {
    /// All legal bands, youngest first.
    pub const ALL: [AgeRange; 6] = [
        AgeRange::Under19,
        AgeRange::From19To26,
        AgeRange::From27To36,
        AgeRange::From37To45,
        AgeRange::From46To55,
        AgeRange::Above55,
    ];

    /// Parse from a form label, tolerant of case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|band| band.label().to_lowercase() == normalized)
    }

    /// Display label, identical to the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under19 => "under 19",
            Self::From19To26 => "19-26",
            Self::From27To36 => "27-36",
            Self::From37To45 => "37-45",
            Self::From46To55 => "46-55",
            Self::Above55 => "55 and above",
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Attendee classification.
///
/// The 3-value form is canonical; an earlier schema used only
/// Member/First Timer and defaulted unset values to Member. That default is
/// superseded: the field is now mandatory at validation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Member")]
    Member,
    #[serde(rename = "First Timer/Guest")]
    FirstTimerGuest,
    #[serde(rename = "Revisiting/Returning Member")]
    ReturningMember,
}

impl Category {
    /// All legal values, in display order.
    pub const ALL: [Category; 3] = [
        Category::Member,
        Category::FirstTimerGuest,
        Category::ReturningMember,
    ];

    /// Parse from a form label, tolerant of case and common short forms.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "member" => Some(Self::Member),
            "first timer/guest" | "first timer" | "guest" => Some(Self::FirstTimerGuest),
            "revisiting/returning member" | "returning member" | "returning" => {
                Some(Self::ReturningMember)
            }
            _ => None,
        }
    }

    /// Display label, identical to the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::FirstTimerGuest => "First Timer/Guest",
            Self::ReturningMember => "Revisiting/Returning Member",
        }
    }
}

// =============================================================================
// Attendance Record
// =============================================================================

/// A stored check-in record.
///
/// Created once via the registration flow, never updated, destroyed only by
/// the purge operation. `id` and `created_at` are store-assigned; the email
/// is stored trimmed and lower-cased, the phone trimmed but otherwise
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Store-assigned unique identifier, immutable once created.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Normalized: trimmed and lower-cased before storage.
    pub email: String,
    /// Trimmed, otherwise verbatim (no country-code or punctuation handling).
    pub phone: String,
    pub sex: Sex,
    pub age_range: AgeRange,
    pub category: Category,
    /// One of the configured catchment areas.
    pub location: String,
    /// Event this record belongs to, tagged at insert.
    pub event_id: String,
    /// Server-assigned at insert. `None` only for legacy records loaded
    /// from disk without a resolvable timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// "First Last", as matched by the free-text search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Check-in Submission (raw form payload)
// =============================================================================

/// Raw registration form payload.
///
/// Enum fields arrive as labels and are parsed during validation; see
/// [`crate::validation::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckinSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub sex: String,
    pub age_range: String,
    pub category: String,
    pub location: String,
}

// =============================================================================
// New Record (validated candidate)
// =============================================================================

/// A validated, normalized record awaiting insertion.
///
/// The store assigns `id` and `created_at`; everything else is fixed here.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub first_name: String,
    pub last_name: String,
    /// Already trimmed and lower-cased.
    pub email: String,
    /// Already trimmed.
    pub phone: String,
    pub sex: Sex,
    pub age_range: AgeRange,
    pub category: Category,
    pub location: String,
    pub event_id: String,
}

impl NewRecord {
    /// Tag the record with the event it is being registered for.
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = event_id.into();
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sex_label_roundtrip() {
        for sex in Sex::ALL {
            assert_eq!(Sex::from_label(sex.label()), Some(sex));
        }
        assert_eq!(Sex::from_label("  FEMALE "), Some(Sex::Female));
        assert_eq!(Sex::from_label("other"), None);
        assert_eq!(Sex::from_label(""), None);
    }

    #[test]
    fn test_age_range_label_roundtrip() {
        for band in AgeRange::ALL {
            assert_eq!(AgeRange::from_label(band.label()), Some(band));
        }
        assert_eq!(AgeRange::from_label("55 AND ABOVE"), Some(AgeRange::Above55));
        assert_eq!(AgeRange::from_label("18-25"), None);
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!(Category::from_label("Member"), Some(Category::Member));
        assert_eq!(Category::from_label("guest"), Some(Category::FirstTimerGuest));
        assert_eq!(
            Category::from_label("Revisiting/Returning Member"),
            Some(Category::ReturningMember)
        );
        assert_eq!(Category::from_label("returning"), Some(Category::ReturningMember));
        assert_eq!(Category::from_label("visitor"), None);
    }

    #[test]
    fn test_record_wire_format_is_camel_case() {
        let record = AttendanceRecord {
            id: "abc".into(),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            phone: "+2348000000000".into(),
            sex: Sex::Female,
            age_range: AgeRange::From27To36,
            category: Category::FirstTimerGuest,
            location: "Igando".into(),
            event_id: "crossover-2026".into(),
            created_at: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["firstName"], json!("Ada"));
        assert_eq!(value["ageRange"], json!("27-36"));
        assert_eq!(value["category"], json!("First Timer/Guest"));
        // Missing timestamp is omitted, not serialized as null
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_submission_tolerates_missing_fields() {
        let submission: CheckinSubmission =
            serde_json::from_value(json!({ "firstName": "Ada" })).unwrap();
        assert_eq!(submission.first_name, "Ada");
        assert!(submission.email.is_empty());
    }

    #[test]
    fn test_full_name_concatenation() {
        let record = AttendanceRecord {
            id: "x".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "j@d.com".into(),
            phone: "1".into(),
            sex: Sex::Male,
            age_range: AgeRange::Under19,
            category: Category::Member,
            location: "Ikotun".into(),
            event_id: "e".into(),
            created_at: None,
        };
        assert_eq!(record.full_name(), "John Doe");
    }
}
