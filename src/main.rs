//! orcid-works - ORCID publication harvester
//!
//! Looks up a list of ORCID identifiers and writes their publications as
//! CSV, JSON, JSONL and two HTML pages.
//!
//! ## Usage
//!
//! ```bash
//! orcid-works compile orcids.txt ./data --open
//! orcid-works fetch 0000-0001-2345-6789
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use orcid_works::{
    artifacts,
    identifiers::load_identifiers,
    orcid::{self, BatchOptions, ClientConfig, FailurePolicy, OrcidClient},
    render::HTML_FILE,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// ORCID publication harvester
#[derive(Parser)]
#[command(name = "orcid-works")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up every identifier in a file and write all output formats
    Compile {
        /// File of ORCID identifiers, one per line
        ifile: PathBuf,

        /// Existing output directory
        odir: PathBuf,

        #[command(flatten)]
        lookup: LookupArgs,

        /// Maximum lookups in flight (1 = sequential)
        #[arg(long, default_value = "1")]
        concurrency: usize,

        /// What to do when an identifier cannot be looked up
        #[arg(long, value_enum, default_value = "placeholder")]
        on_error: OnError,

        /// Open the HTML detail page when done
        #[arg(long)]
        open: bool,

        /// Upload the outputs to this cloud bucket with gsutil
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Look up identifiers and print normalized records as JSON lines
    Fetch {
        /// ORCID identifiers
        #[arg(required = true)]
        orcids: Vec<String>,

        #[command(flatten)]
        lookup: LookupArgs,
    },
}

#[derive(clap::Args)]
struct LookupArgs {
    /// Registry base URL
    #[arg(long, default_value = orcid::ORCID_BASE_URL)]
    registry_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

impl LookupArgs {
    fn client(&self) -> Result<OrcidClient> {
        let config = ClientConfig {
            base_url: self.registry_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        };
        OrcidClient::new(&config).context("Failed to create ORCID client")
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OnError {
    /// Keep going with an empty, not-found record
    Placeholder,
    /// Stop at the first failure
    Abort,
}

impl From<OnError> for FailurePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Placeholder => FailurePolicy::Placeholder,
            OnError::Abort => FailurePolicy::Abort,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Compile {
            ifile,
            odir,
            lookup,
            concurrency,
            on_error,
            open,
            bucket,
        } => {
            let options = BatchOptions {
                concurrency,
                on_error: on_error.into(),
            };
            run_compile(&ifile, &odir, &lookup, &options, open, bucket.as_deref()).await
        }
        Commands::Fetch { orcids, lookup } => run_fetch(&orcids, &lookup).await,
    }
}

// ============================================================================
// Compile Pipeline
// ============================================================================

async fn run_compile(
    ifile: &Path,
    odir: &Path,
    lookup: &LookupArgs,
    options: &BatchOptions,
    open: bool,
    bucket: Option<&str>,
) -> Result<()> {
    if !ifile.is_file() {
        anyhow::bail!("Input file not found: {}", ifile.display());
    }
    if !odir.is_dir() {
        anyhow::bail!("Output directory not found: {}", odir.display());
    }

    let orcids = load_identifiers(ifile)
        .with_context(|| format!("Failed to read identifiers from {}", ifile.display()))?;
    println!("Loaded {} identifiers from {}", orcids.len(), ifile.display());

    let client = lookup.client()?;
    let report = orcid::fetch_all(&client, &orcids, options)
        .await
        .context("Batch lookup aborted")?;

    let found = report.records.iter().filter(|r| r.found).count();
    println!("Found {} / {} ORCID records", found, report.records.len());

    if !report.failures.is_empty() {
        println!("{} lookups failed:", report.failures.len());
        for failure in &report.failures {
            println!("  {}: {}", failure.orcid, failure.reason);
        }
    }

    let written = artifacts::save(&report.records, odir)
        .with_context(|| format!("Failed to write outputs to {}", odir.display()))?;
    for path in &written {
        println!("Saved: {}", path.display());
    }

    // Post-processing hooks: failures are reported but do not fail the run.
    if let Some(bucket) = bucket {
        if let Err(e) = push_to_bucket(odir, bucket) {
            error!(bucket = bucket, error = %e, "Upload failed");
        }
    }

    if open {
        let page = odir.join(HTML_FILE);
        if let Err(e) = open_in_viewer(&page) {
            warn!(path = %page.display(), error = %e, "Could not open output");
        }
    }

    println!("\n✓ Done. Results in: {}", odir.display());
    Ok(())
}

async fn run_fetch(orcids: &[String], lookup: &LookupArgs) -> Result<()> {
    let client = lookup.client()?;

    for id in orcids {
        let record = orcid::fetch_one(&client, id)
            .await
            .with_context(|| format!("Lookup failed for {}", id))?;
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}

// ============================================================================
// External Hooks
// ============================================================================

/// Copy `works*` outputs to `gs://<bucket>/` (requires gsutil on PATH)
fn push_to_bucket(dir: &Path, bucket: &str) -> Result<()> {
    let sources: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("works"))
        })
        .collect();

    info!(bucket = bucket, files = sources.len(), "Uploading outputs");

    let status = Command::new("gsutil")
        .arg("cp")
        .args(&sources)
        .arg(format!("gs://{}/", bucket))
        .status()
        .context("Failed to run gsutil")?;

    if !status.success() {
        anyhow::bail!("gsutil exited with {}", status);
    }
    println!("Uploaded {} files to gs://{}/", sources.len(), bucket);
    Ok(())
}

/// Open a file with the platform's default application
fn open_in_viewer(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    let status = command
        .arg(path)
        .status()
        .context("Failed to launch viewer")?;

    if !status.success() {
        anyhow::bail!("Viewer exited with {}", status);
    }
    Ok(())
}
