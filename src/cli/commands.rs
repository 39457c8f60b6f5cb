use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legalease", about = "Ask questions about your documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides LEGALEASE_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Index a PDF, or raw text with --text
    Ingest {
        /// PDF file to index
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        path: Option<PathBuf>,
        /// Index this text instead of a file
        #[arg(long)]
        text: Option<String>,
    },
    /// Show the chunks nearest to a query, without generating an answer
    Search {
        query: String,
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        top_k: i64,
    },
    /// Answer a question from the indexed documents
    Ask {
        /// One or more messages, joined with newlines into a single query
        #[arg(required = true)]
        messages: Vec<String>,
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        top_k: i64,
    },
    /// Print a stored chunk by row id
    Chunk { id: usize },
    /// Index size and stored chunk count
    Health,
}
