//! CSV export of filtered attendance records.
//!
//! The column list is fixed and ordered; every field is double-quoted with
//! embedded quotes doubled, and the payload is prefixed with a UTF-8 BOM so
//! spreadsheet tools import non-ASCII names correctly. An empty filtered
//! subset refuses to export instead of producing a headers-only file.

use chrono::{DateTime, NaiveDate, Utc};
use csv::{QuoteStyle, WriterBuilder};

use crate::error::{ExportError, ExportResult};
use crate::models::AttendanceRecord;

/// Export columns, in header order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "First Name",
    "Last Name",
    "Email Address",
    "Phone Number",
    "Sex",
    "Age Range",
    "Category",
    "Location",
    "Date Registered",
];

/// Rendered in the date column when a record has no resolvable timestamp.
pub const MISSING_TIMESTAMP: &str = "N/A";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize a filtered subset into a BOM-prefixed CSV payload.
///
/// Fails with [`ExportError::NoMatchingRecords`] on an empty subset.
pub fn export_csv(records: &[AttendanceRecord]) -> ExportResult<Vec<u8>> {
    if records.is_empty() {
        return Err(ExportError::NoMatchingRecords);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        writer.write_record([
            record.first_name.as_str(),
            record.last_name.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            record.sex.label(),
            record.age_range.label(),
            record.category.label(),
            record.location.as_str(),
            &format_registered_at(record.created_at),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    let mut payload = Vec::with_capacity(UTF8_BOM.len() + body.len());
    payload.extend_from_slice(UTF8_BOM);
    payload.extend_from_slice(&body);
    Ok(payload)
}

/// Medium date + short time, e.g. "Dec 31, 2025, 11:59 PM".
pub fn format_registered_at(created_at: Option<DateTime<Utc>>) -> String {
    match created_at {
        Some(ts) => ts.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => MISSING_TIMESTAMP.to_string(),
    }
}

/// Filename encoding the export scope and date, e.g.
/// `attendance_member_2025-12-31.csv`. The scope is the applied category
/// filter, or "all" when none is set.
pub fn export_filename(scope: Option<&str>, date: NaiveDate) -> String {
    let scope = scope
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "all".to_string());
    format!("attendance_{}_{}.csv", scope, date.format("%Y-%m-%d"))
}

/// Lower-case, alphanumerics only, runs collapsed to single dashes.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
