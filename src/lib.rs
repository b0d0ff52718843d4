//! # Checkin - Event attendance registration and live dashboard
//!
//! Checkin records event attendance through a public registration form,
//! keeps a live attendance counter, and backs an admin dashboard with
//! search/filter, CSV export and a confirmed batched purge.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐    ┌───────────┐    ┌─────────────┐    ┌──────────────┐
//! │ Submission │───▶│ Validator │───▶│ Dup Checker │───▶│ Record Store │
//! │  (form)    │    │ (fields)  │    │(email,phone)│    │ (JSON file)  │
//! └────────────┘    └───────────┘    └─────────────┘    └──────┬───────┘
//!                                                              │ snapshots
//!                                              ┌───────────────┴───────┐
//!                                              ▼                       ▼
//!                                        ┌───────────┐          ┌────────────┐
//!                                        │ Stats &   │          │ CSV Export │
//!                                        │ Filtering │          │ & Purge    │
//!                                        └───────────┘          └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkin::{AppConfig, JsonStore, registration};
//!
//! let config = AppConfig::from_env();
//! let store = JsonStore::open(&config.data_dir)?;
//! let record = registration::submit(&store, &config, &submission)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Injected runtime configuration
//! - [`models`] - Domain models (AttendanceRecord, Sex, AgeRange, Category)
//! - [`validation`] - Field validation and normalization
//! - [`store`] - Record persistence and live snapshots
//! - [`registration`] - Validate → dedup → insert pipeline
//! - [`stats`] - Snapshot aggregation
//! - [`filter`] - Search, categorical and date-range filtering
//! - [`export`] - BOM-prefixed CSV export
//! - [`purge`] - Confirmed batched deletion
//! - [`ai`] - Generated-encouragement client
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Registration pipeline
pub mod registration;
pub mod validation;

// Persistence
pub mod store;

// Read-side pipeline
pub mod export;
pub mod filter;
pub mod stats;

// Destructive operations
pub mod purge;

// AI
pub mod ai;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    CheckinError, ExportError, FieldErrors, PurgeError, ServerError, StoreError,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{AppConfig, DEFAULT_BATCH_CEILING, DEFAULT_LOCATIONS};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{AgeRange, AttendanceRecord, Category, CheckinSubmission, NewRecord, Sex};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_email, validate};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{JsonStore, RecordStore, Snapshot, MAX_DELETE_BATCH};

// =============================================================================
// Re-exports - Read side
// =============================================================================

pub use export::{export_csv, export_filename, EXPORT_COLUMNS};
pub use filter::FilterCriteria;
pub use stats::AttendanceStats;

// =============================================================================
// Re-exports - Purge
// =============================================================================

pub use purge::{is_confirmed, purge_all, CONFIRMATION_TOKEN};

// =============================================================================
// Re-exports - AI Client
// =============================================================================

pub use ai::{encouragement_or_fallback, AiClient, AiError, FALLBACK_MESSAGE};

// Server
pub mod server {
    pub use crate::api::server::{start_server, AppState};
}
