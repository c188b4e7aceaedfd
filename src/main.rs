/// Main entry point for the Mood Journal MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use mood_journal_mcp::MoodJournalServer;

const DATABASE_FILE: &str = "journal.db";

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".mood_journal");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("mood_journal");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("mood_journal");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".mood_journal");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if is_writable_dir(potential_path) {
            return Ok(potential_path.join(DATABASE_FILE));
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("mood_journal");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push(DATABASE_FILE);

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Create `dir` if needed and check a file can be written into it
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".test_write");
    let writable = std::fs::write(&probe, "test").is_ok();
    let _ = std::fs::remove_file(&probe);
    writable
}

/// Command line arguments for the Mood Journal MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mood_journal_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Mood Journal MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = MoodJournalServer::new(db_path).await?;

    server.run().await?;

    info!("Mood Journal MCP server shutdown complete");
    Ok(())
}
