// src/main.rs
mod documents;
mod extractors;
mod storage;
mod utils;

use clap::{Parser, ValueEnum};
use extractors::{
    EntityRecognizer, HeuristicRecognizer, KeywordTable, NullRecognizer, ResumeParser, SectionExtractor,
};
use std::path::PathBuf;
use std::sync::Arc;
use storage::StorageManager;
use utils::error::{AppError, LoadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    All,
}

/// Command Line Interface for the resume field extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Resume text files, or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for exported records
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::All)]
    format: ExportFormat,

    /// JSON file overriding the built-in heading keyword table
    #[arg(long, env = "RESUME_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Disable entity recognition (names and the skills fallback)
    #[arg(long)]
    no_entities: bool,

    /// Also print the records as JSON on stdout
    #[arg(long)]
    print: bool,

    /// Debug mode - save annotated HTML files showing detected headings
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build the parser from the keyword table
    let table = match &args.keywords {
        Some(path) => KeywordTable::from_json_file(path)?,
        None => KeywordTable::default(),
    };
    let recognizer: Arc<dyn EntityRecognizer> = if args.no_entities {
        Arc::new(NullRecognizer)
    } else {
        Arc::new(HeuristicRecognizer::new(&table)?)
    };
    let parser = Arc::new(ResumeParser::new(SectionExtractor::new(table)?, recognizer));

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Load documents; anything that can't be decoded is skipped
    let documents = documents::load_documents(&args.inputs).await;
    if documents.is_empty() {
        return Err(LoadError::NoDocuments(args.inputs.len()).into());
    }

    if args.debug {
        let debug_dir = storage.base_dir().join("debug");
        for (index, document) in documents.iter().enumerate() {
            let debug_path = debug_dir.join(utils::text_debug::debug_file_name(index, &document.name()));
            if let Err(e) = utils::text_debug::save_heading_debug(&document.text, &debug_path, parser.sections().table()) {
                tracing::warn!("Failed to create debug HTML for {}: {}", document.name(), e);
            }
        }
    }

    // 6. Parse each document on the blocking pool, collecting results in input order
    let batch = extractors::parse_documents(Arc::clone(&parser), documents).await;
    let records = batch.records;

    // 7. Export
    if matches!(args.format, ExportFormat::Json | ExportFormat::All) {
        storage.save_json(&records)?;
    }
    if matches!(args.format, ExportFormat::Csv | ExportFormat::All) {
        storage.save_csv(&records)?;
    }
    storage.save_metadata(&batch.documents, &records)?;

    if args.print {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::Processing(format!("Failed to serialize records: {}", e)))?;
        println!("{}", json);
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", records.len(), batch.failures);

    if records.is_empty() {
        return Err(AppError::Processing(format!("Failed to parse any of {} document(s)", batch.failures)));
    }

    Ok(())
}
