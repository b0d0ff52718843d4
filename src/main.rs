//! Checkin CLI - Event attendance registration and admin tooling
//!
//! # Main Commands
//!
//! ```bash
//! checkin serve                  # Start HTTP server (port 3000)
//! checkin stats                  # Print summary counts
//! checkin export report.csv      # Export records to CSV
//! checkin purge --confirm DELETE # Delete all records, batched
//! checkin locations              # List configured catchment areas
//! ```

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use checkin::server::{start_server, AppState};
use checkin::{
    export_csv, export_filename, purge_all, AiClient, AppConfig, AttendanceStats,
    FilterCriteria, JsonStore, RecordStore,
};

#[derive(Parser)]
#[command(name = "checkin")]
#[command(about = "Event check-in service with live attendance dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Print summary counts for the stored records
    Stats,

    /// Export records to CSV
    Export {
        /// Output file (default: scope-and-date filename in the current dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Free-text search over name, email and phone
        #[arg(long)]
        search: Option<String>,

        /// Category filter ("All" passes everything)
        #[arg(long)]
        category: Option<String>,

        /// Location filter
        #[arg(long)]
        location: Option<String>,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Delete all stored records, in batches
    Purge {
        /// Confirmation token; must be DELETE (any case)
        #[arg(long)]
        confirm: String,
    },

    /// List the configured catchment areas
    Locations,
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port, config).await,
        Commands::Stats => cmd_stats(config),
        Commands::Export {
            output,
            search,
            category,
            location,
            from,
            to,
        } => cmd_export(config, output, search, category, location, from, to),
        Commands::Purge { confirm } => cmd_purge(config, &confirm),
        Commands::Locations => cmd_locations(config),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(JsonStore::open(&config.data_dir)?);
    eprintln!("📂 Data directory: {}", config.data_dir.display());
    eprintln!("   {} record(s) loaded", store.snapshot().len());

    let ai = config
        .ai_api_key
        .clone()
        .map(|key| AiClient::new(key, config.ai_model.clone()));
    if ai.is_none() {
        eprintln!("   ⚠️  No GEMINI_API_KEY set; encouragement falls back to the fixed message");
    }

    let state = AppState::new(store, config, ai);
    start_server(port, state).await
}

fn cmd_stats(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open(&config.data_dir)?;
    let snapshot = store.snapshot();
    let stats = AttendanceStats::compute(&snapshot);

    eprintln!("📊 Attendance for {}", config.event_id);
    println!("   Total:       {}", stats.total);
    println!("   Members:     {}", stats.members);
    println!("   First-time:  {}", stats.first_timers);
    println!("   Returning:   {}", stats.returning);
    println!("   Guest ratio: {:.0}%", stats.first_timer_ratio * 100.0);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_export(
    config: AppConfig,
    output: Option<PathBuf>,
    search: Option<String>,
    category: Option<String>,
    location: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open(&config.data_dir)?;
    let snapshot = store.snapshot();

    let criteria = FilterCriteria {
        search,
        category,
        location,
        from,
        to,
        ..FilterCriteria::default()
    };
    let filtered = criteria.apply(&snapshot);
    eprintln!(
        "🔎 {} of {} record(s) match the filters",
        filtered.len(),
        snapshot.len()
    );

    let payload = export_csv(&filtered)?;
    let path = output.unwrap_or_else(|| {
        PathBuf::from(export_filename(
            criteria.category_scope(),
            Utc::now().date_naive(),
        ))
    });
    fs::write(&path, &payload)?;
    eprintln!("💾 Exported {} record(s) to: {}", filtered.len(), path.display());

    Ok(())
}

fn cmd_purge(config: AppConfig, confirm: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open(&config.data_dir)?;
    let total = store.snapshot().len();
    eprintln!("🗑️  Purging {} record(s) from {}", total, config.data_dir.display());

    let deleted = purge_all(&store, confirm, config.batch_ceiling)?;
    eprintln!("✅ Deleted {} record(s)", deleted);

    Ok(())
}

fn cmd_locations(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📍 Configured catchment areas ({}):", config.locations.len());
    for area in &config.locations {
        println!("   {}", area);
    }
    Ok(())
}
