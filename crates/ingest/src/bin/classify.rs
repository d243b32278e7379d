//! classify: run the document classifier over local files.
//!
//! Prints one JSON object per file with the extraction summary and the
//! classification a teacher would see as a draft.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use brightpath_ingest::convert_document;

// ── CLI ─────────────────────────────────────────────────────────────

/// Classify PDF/DOCX/TXT/MD files into lesson, assessment, game, or activity.
#[derive(Parser, Debug)]
#[command(name = "classify", version, about)]
struct Cli {
    /// Files to classify.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed output.
    #[arg(long, env = "CLASSIFY_COMPACT")]
    compact: bool,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut failures = 0usize;

    for path in &cli.paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read file");
                failures += 1;
                continue;
            }
        };

        match convert_document(&bytes, &file_name) {
            Ok(converted) => {
                let json = if cli.compact {
                    serde_json::to_string(&converted)?
                } else {
                    serde_json::to_string_pretty(&converted)?
                };
                println!("{json}");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unsupported or unreadable document");
                failures += 1;
            }
        }
    }

    info!(files = cli.paths.len(), failures, "classification finished");
    if failures > 0 {
        anyhow::bail!("{failures} of {} files could not be classified", cli.paths.len());
    }
    Ok(())
}
