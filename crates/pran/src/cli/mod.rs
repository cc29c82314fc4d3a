//! Command line front end
//!
//! Every command works from an [`AppContext`]; only the commands that need a
//! model or a remote backend ask the context to build one.

pub mod ingest;

use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use pran_domain::ports::providers::DocumentSource;
use pran_infrastructure::AppContext;

/// Healthcare question answering over domain document collections
#[derive(Parser, Debug)]
#[command(name = "pran")]
#[command(about = "Pran - healthcare retrieval and answer orchestration")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a health question
    Ask {
        /// The question
        query: String,

        /// Print the classification and handler trace as JSON
        #[arg(long)]
        trace: bool,
    },
    /// Add JSON-lines documents to a collection
    Ingest {
        /// Target collection
        collection: String,

        /// File with one `{"content", "metadata"}` object per line
        file: PathBuf,
    },
    /// Count the documents in a collection
    Count {
        /// Collection to count
        collection: String,
    },
    /// List local collections with their record counts
    Collections {
        /// Local store directory, defaults to the configured one
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Copy local collections into the configured backend
    Migrate {
        /// Collections to copy; all local collections when empty
        collections: Vec<String>,

        /// Local store directory to read from
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Summarize a medical document
    Analyze {
        /// Text file to analyze
        file: PathBuf,
    },
}

/// Run one command against a prepared context
pub async fn run(command: Command, context: &AppContext) -> Result<ExitCode> {
    match command {
        Command::Ask { query, trace } => ask(context, &query, trace).await,
        Command::Ingest { collection, file } => ingest(context, &collection, file).await,
        Command::Count { collection } => {
            let store = context.open_partition(&collection).await?;
            println!("{}", store.count().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Collections { path } => {
            let store = context.local_store(path);
            for info in store.list_collections().await? {
                println!("{}\t{}", info.name, info.vector_count);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Migrate { collections, from } => {
            let service = context.migration(from).await?;
            let report = service.migrate(&collections).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Analyze { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let analysis = context.analyzer()?.analyze(&text).await;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn ask(context: &AppContext, query: &str, trace: bool) -> Result<ExitCode> {
    let pipeline = context.pipeline().await?;
    match pipeline.answer(query).await {
        Ok(answer) => {
            println!("{}", answer.answer);
            if trace {
                println!("{}", serde_json::to_string_pretty(&answer.trace)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Query failed");
            println!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn ingest(context: &AppContext, collection: &str, file: PathBuf) -> Result<ExitCode> {
    let handle = std::fs::File::open(&file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let documents = ingest::read_documents(BufReader::new(handle))?;

    let store = context.open_partition(collection).await?;
    let batch_size = context.config.vector_store.upsert_batch_size;
    let mut added = 0;
    for batch in documents.chunks(batch_size) {
        added += store.add_documents(batch).await?.len();
        info!(collection, added, total = documents.len(), "Ingest progress");
    }
    println!("{added}");
    Ok(ExitCode::SUCCESS)
}
