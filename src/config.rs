//! Runtime configuration.
//!
//! All tunable state lives in [`AppConfig`], built once at startup from
//! environment variables (with `.env` support) and passed explicitly to the
//! components that need it. There is no global mutable configuration.
//!
//! | Variable                    | Default                      |
//! |-----------------------------|------------------------------|
//! | `CHECKIN_ADMIN_PASSPHRASE`  | `IGANDO_ADMIN_2025`          |
//! | `CHECKIN_EVENT_ID`          | `crossover-2026`             |
//! | `CHECKIN_DATA_DIR`          | `.checkin/records`           |
//! | `CHECKIN_LOCATIONS`         | the seven catchment areas    |
//! | `CHECKIN_PURGE_BATCH`       | `500`                        |
//! | `GEMINI_API_KEY`            | unset (fallback message only)|
//! | `CHECKIN_AI_MODEL`          | `gemini-2.0-flash`           |

use std::env;
use std::path::PathBuf;

/// Default catchment areas. The list changed between event editions, so it
/// is configuration, not a hard-coded enum.
pub const DEFAULT_LOCATIONS: [&str; 7] = [
    "Egbeda/Akowonjo",
    "Iyana-Ipaja",
    "Ikotun",
    "Igando",
    "Ijegun",
    "Oke-Odo",
    "Ayobo & Ipaja",
];

/// Canonical delete-batch ceiling, matching common hosted-store limits.
pub const DEFAULT_BATCH_CEILING: usize = 500;

const DEFAULT_EVENT_ID: &str = "crossover-2026";
const DEFAULT_DATA_DIR: &str = ".checkin/records";
const DEFAULT_AI_MODEL: &str = "gemini-2.0-flash";

/// Application configuration, constructed once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared admin passphrase. A constant compared string, documented as
    /// an access gate rather than a security boundary.
    pub admin_passphrase: String,
    /// Event identifier stamped onto every record at insert.
    pub event_id: String,
    /// Directory the record store persists into.
    pub data_dir: PathBuf,
    /// Legal catchment areas for the `location` field.
    pub locations: Vec<String>,
    /// Maximum ids per delete batch during purge.
    pub batch_ceiling: usize,
    /// API key for the generated-encouragement proxy; when unset the
    /// fallback message is served.
    pub ai_api_key: Option<String>,
    /// Generation model name.
    pub ai_model: String,
}

impl AppConfig {
    /// Build the configuration from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            admin_passphrase: env::var("CHECKIN_ADMIN_PASSPHRASE")
                .unwrap_or_else(|_| "IGANDO_ADMIN_2025".to_string()),
            event_id: env::var("CHECKIN_EVENT_ID")
                .unwrap_or_else(|_| DEFAULT_EVENT_ID.to_string()),
            data_dir: env::var("CHECKIN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            locations: env::var("CHECKIN_LOCATIONS")
                .map(|raw| parse_locations(&raw))
                .ok()
                .filter(|list| !list.is_empty())
                .unwrap_or_else(default_locations),
            batch_ceiling: env::var("CHECKIN_PURGE_BATCH")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_BATCH_CEILING),
            ai_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            ai_model: env::var("CHECKIN_AI_MODEL")
                .unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
        }
    }

    /// Compare an entered passphrase against the configured one.
    pub fn verify_passphrase(&self, input: &str) -> bool {
        !self.admin_passphrase.is_empty() && input == self.admin_passphrase
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_passphrase: "IGANDO_ADMIN_2025".to_string(),
            event_id: DEFAULT_EVENT_ID.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            locations: default_locations(),
            batch_ceiling: DEFAULT_BATCH_CEILING,
            ai_api_key: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
        }
    }
}

/// Parse a comma-separated location list, dropping blanks.
fn parse_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
}
