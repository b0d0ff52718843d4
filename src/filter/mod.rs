//! Search, categorical and date-range filtering.
//!
//! [`FilterCriteria`] composes independent predicates with logical AND and
//! preserves the input ordering, so filtering an already-filtered subset
//! with the same criteria is a no-op.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

use crate::models::AttendanceRecord;

/// Wildcard value for the categorical filters.
const ALL: &str = "All";

/// Filter criteria, AND-composed. `None` (or the literal "All") bypasses a
/// categorical predicate; blank search matches everything; absent date
/// bounds leave that side open.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring over "first last" and email; phone is
    /// matched on the raw query.
    pub search: Option<String>,
    pub sex: Option<String>,
    pub age_range: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// Inclusive start date (00:00:00.000).
    pub from: Option<NaiveDate>,
    /// Inclusive end date (23:59:59.999).
    pub to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// The category filter, unless it is the wildcard.
    pub fn category_scope(&self) -> Option<&str> {
        selected(&self.category)
    }

    /// Filter a snapshot, preserving its ordering.
    pub fn apply(&self, records: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// Check one record against every predicate.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.matches_search(record)
            && matches_value(&self.sex, record.sex.label())
            && matches_value(&self.age_range, record.age_range.label())
            && matches_value(&self.category, record.category.label())
            && matches_value(&self.location, &record.location)
            && self.matches_dates(record)
    }

    fn matches_search(&self, record: &AttendanceRecord) -> bool {
        let query = match self.search.as_deref() {
            Some(q) if !q.trim().is_empty() => q,
            _ => return true,
        };

        let needle = query.to_lowercase();
        record.full_name().to_lowercase().contains(&needle)
            || record.email.to_lowercase().contains(&needle)
            // Phone is matched raw, not normalized
            || record.phone.contains(query)
    }

    fn matches_dates(&self, record: &AttendanceRecord) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        // A bounded range excludes records without a resolvable timestamp
        let Some(created_at) = record.created_at else {
            return false;
        };

        if let Some(from) = self.from {
            if created_at < day_start(from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if created_at > day_end(to) {
                return false;
            }
        }
        true
    }
}

/// The selected value of a categorical filter, `None` for the wildcard.
fn selected(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

fn matches_value(filter: &Option<String>, actual: &str) -> bool {
    match selected(filter) {
        Some(wanted) => wanted == actual,
        None => true,
    }
}

/// Midnight UTC at the start of the day.
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// 23:59:59.999 UTC, the inclusive end of the day.
fn day_end(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, Category, Sex};

    fn record(first: &str, last: &str, email: &str, phone: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: email.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone: phone.into(),
            sex: Sex::Male,
            age_range: AgeRange::From19To26,
            category: Category::Member,
            location: "Igando".into(),
            event_id: "e".into(),
            created_at: Some(Utc.with_ymd_and_hms(2025, 12, 15, 10, 0, 0).unwrap()),
        }
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::default()
    }

    #[test]
    fn test_empty_criteria_passes_everything() {
        let records = vec![record("Ada", "Obi", "ada@b.com", "123")];
        let filtered = criteria().apply(&records);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_search_matches_full_name_case_insensitive() {
        let records = vec![
            record("Ada", "Obi", "ada@b.com", "123"),
            record("John", "Doe", "john@b.com", "456"),
        ];
        let c = FilterCriteria {
            search: Some("ada ob".into()),
            ..criteria()
        };
        let filtered = c.apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name, "Ada");
    }

    #[test]
    fn test_search_matches_email_and_phone() {
        let records = vec![
            record("Ada", "Obi", "ada@b.com", "0801234"),
            record("John", "Doe", "john@b.com", "0809999"),
        ];
        let by_email = FilterCriteria {
            search: Some("JOHN@".into()),
            ..criteria()
        };
        assert_eq!(by_email.apply(&records).len(), 1);

        let by_phone = FilterCriteria {
            search: Some("1234".into()),
            ..criteria()
        };
        let filtered = by_phone.apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].phone, "0801234");
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let records = vec![record("Ada", "Obi", "ada@b.com", "123")];
        let c = FilterCriteria {
            search: Some("   ".into()),
            ..criteria()
        };
        assert_eq!(c.apply(&records).len(), 1);
    }

    #[test]
    fn test_all_is_a_wildcard() {
        let records = vec![record("Ada", "Obi", "ada@b.com", "123")];
        let c = FilterCriteria {
            sex: Some("All".into()),
            category: Some("all".into()),
            ..criteria()
        };
        assert_eq!(c.apply(&records).len(), 1);
    }

    #[test]
    fn test_and_composition_excludes_partial_matches() {
        // Matches the search text but not the category filter
        let records = vec![record("Ada", "Obi", "ada@b.com", "123")];
        let c = FilterCriteria {
            search: Some("Ada".into()),
            category: Some("First Timer/Guest".into()),
            ..criteria()
        };
        assert!(c.apply(&records).is_empty());
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let records = vec![
            record("Ada", "Obi", "ada@b.com", "123"),
            record("John", "Doe", "john@b.com", "456"),
        ];
        let c = FilterCriteria {
            search: Some("b.com".into()),
            ..criteria()
        };
        let once = c.apply(&records);
        let twice = c.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preserves_input_ordering() {
        let records = vec![
            record("A", "A", "a@b.com", "1"),
            record("B", "B", "b@b.com", "2"),
            record("C", "C", "c@b.com", "3"),
        ];
        let filtered = criteria().apply(&records);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a@b.com", "b@b.com", "c@b.com"]);
    }

    #[test]
    fn test_date_range_inclusive_end_of_day() {
        let mut late = record("Ada", "Obi", "ada@b.com", "123");
        late.created_at = Some(
            Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap()
                + Duration::milliseconds(500),
        );
        let records = vec![late];

        let december = FilterCriteria {
            from: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            ..criteria()
        };
        assert_eq!(december.apply(&records).len(), 1);

        let cut_short = FilterCriteria {
            from: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2025, 12, 30).unwrap()),
            ..criteria()
        };
        assert!(cut_short.apply(&records).is_empty());
    }

    #[test]
    fn test_one_sided_bounds_are_open_on_the_other_side() {
        let records = vec![record("Ada", "Obi", "ada@b.com", "123")]; // 2025-12-15

        let from_only = FilterCriteria {
            from: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            ..criteria()
        };
        assert_eq!(from_only.apply(&records).len(), 1);

        let to_only = FilterCriteria {
            to: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            ..criteria()
        };
        assert!(to_only.apply(&records).is_empty());
    }

    #[test]
    fn test_bounded_range_excludes_untimestamped_records() {
        let mut legacy = record("Ada", "Obi", "ada@b.com", "123");
        legacy.created_at = None;
        let records = vec![legacy];

        let bounded = FilterCriteria {
            from: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            ..criteria()
        };
        assert!(bounded.apply(&records).is_empty());

        // No bounds: the record passes
        assert_eq!(criteria().apply(&records).len(), 1);
    }

    #[test]
    fn test_category_scope() {
        let c = FilterCriteria {
            category: Some("Member".into()),
            ..criteria()
        };
        assert_eq!(c.category_scope(), Some("Member"));
        assert_eq!(criteria().category_scope(), None);
        let wildcard = FilterCriteria {
            category: Some("All".into()),
            ..criteria()
        };
        assert_eq!(wildcard.category_scope(), None);
    }
}
