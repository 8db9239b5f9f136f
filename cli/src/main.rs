mod load;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use search_core::{process_queries, remove_duplicates, DocId, DocumentStatus, MatchMode, SearchServer};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    /// Input path (file or directory of .json/.jsonl documents)
    #[arg(long, global = true, default_value = "./docs.jsonl")]
    input: PathBuf,
    /// Space separated stop words
    #[arg(long, global = true, default_value = "")]
    stop_words: String,
    /// Abort on the first document the index rejects
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        #[arg(long)]
        query: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
    },
    /// Show which query words a document contains
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
        /// Evaluate word checks on the rayon pool
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Remove documents whose word sets repeat an earlier document
    Dedup,
    /// Run every line of a file as a query
    Batch {
        #[arg(long)]
        queries: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    id: DocId,
    words: Vec<&'a str>,
    status: DocumentStatus,
}

#[derive(Serialize)]
struct DedupOutput {
    removed: Vec<DocId>,
    remaining: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut server = SearchServer::new(&cli.stop_words).context("invalid stop words")?;
    load::load_documents(&mut server, &cli.input, cli.strict)?;

    match cli.command {
        Commands::Search { query, status } => {
            for doc in server.find_top_documents_by_status(&query, status.into())? {
                println!("{}", serde_json::to_string(&doc)?);
            }
        }
        Commands::Match { query, id, parallel } => {
            let mode = if parallel { MatchMode::Parallel } else { MatchMode::Sequential };
            let (words, status) = server.match_document_with(mode, &query, id)?;
            println!("{}", serde_json::to_string(&MatchOutput { id, words, status })?);
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut server);
            let out = DedupOutput { removed, remaining: server.document_count() };
            println!("{}", serde_json::to_string(&out)?);
        }
        Commands::Batch { queries } => {
            let text = fs::read_to_string(&queries).with_context(|| format!("reading {}", queries.display()))?;
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            let start = std::time::Instant::now();
            let results = process_queries(&server, &lines)?;
            tracing::info!(queries = lines.len(), took_s = start.elapsed().as_secs_f64(), "batch complete");
            for (query, docs) in lines.iter().zip(results) {
                println!("{}", serde_json::json!({ "query": query, "results": docs }));
            }
        }
    }
    Ok(())
}
