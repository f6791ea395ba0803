// src/main.rs
use clap::Parser;
use spc_extractor::document::loader;
use spc_extractor::extractors::{SpcExtractor, SubsectionId};
use spc_extractor::storage::{self, StorageManager};
use spc_extractor::utils::{self, AppError};
use std::path::PathBuf;

/// Command Line Interface for the SPC safety information extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SPC document to analyze (.pdf, or already-extracted text)
    input: PathBuf,

    /// Drug name the report is labelled with
    #[arg(short = 'n', long, default_value = "Buprenorfin Viatris")]
    drug_name: String,

    /// Write the report into this directory instead of stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Debug mode - save the normalized text with located subsections marked
    #[arg(short, long)]
    debug_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.drug_name.trim().is_empty() {
        return Err(AppError::Config("Drug name must not be empty".to_string()));
    }

    // 3. Load and normalize the document text
    let raw_text = loader::load_raw_text(&args.input).await?;
    let extractor = SpcExtractor::new(&raw_text);

    // 4. Optional locator debug dump
    if let Some(debug_dir) = &args.debug_dir {
        std::fs::create_dir_all(debug_dir)?;
        let debug_path = debug_dir.join(format!("{}_spans.txt", storage::file_stem_for(&args.drug_name)));
        if let Err(e) = utils::span_debug::save_span_debug(
            extractor.document().as_str(),
            &debug_path,
            &[SubsectionId::POPULATION, SubsectionId::CONTRAINDICATIONS],
        ) {
            tracing::warn!("Failed to create span debug file: {}", e);
        }
    }

    // 5. Analyze
    let report = extractor.analyze(&args.drug_name);

    // 6. Emit
    match &args.output_dir {
        Some(dir) => {
            let manager = StorageManager::new(dir)?;
            let path = manager.save_report(&report, !args.compact)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let body = storage::render_report(&report, !args.compact)?;
            println!("{}", body);
        }
    }

    Ok(())
}
