//! pdfchat CLI
//!
//! Commands:
//!   chat - Interactive chat over one or more PDFs (default)
//!   ask  - Process PDFs and ask a single question
//!   info - Show the active configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdfchat::{
    config, Config, HostedEmbeddings, HostedLlm, PdfDocument, ProgressReporter, Session,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdfchat")]
#[command(about = "Chat with your PDF documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat. PDFs given here are staged for /process.
    Chat {
        /// PDF files to stage
        pdfs: Vec<PathBuf>,
    },

    /// Process the given PDFs and ask a single question
    Ask {
        /// The question to ask
        question: String,

        /// PDF files to process
        #[arg(short, long = "pdf", required = true)]
        pdfs: Vec<PathBuf>,
    },

    /// Show the active configuration
    Info,
}

fn build_session(config: Config) -> Session {
    let token = config::api_token();
    let embedder = Arc::new(HostedEmbeddings::new(
        config.embedding_model.clone(),
        token.clone(),
    ));
    let llm = Arc::new(HostedLlm::new(config.llm_model.clone(), token));
    Session::new(config, embedder, llm)
}

fn load_documents(paths: &[PathBuf]) -> Result<Vec<PdfDocument>> {
    paths
        .iter()
        .map(|p| PdfDocument::from_path(p).with_context(|| format!("loading {}", p.display())))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        None => {
            let session = build_session(config);
            pdfchat::repl::run_chat(session, Vec::new()).await?;
        }

        Some(Commands::Chat { pdfs }) => {
            let docs = load_documents(&pdfs)?;
            let session = build_session(config);
            pdfchat::repl::run_chat(session, docs).await?;
        }

        Some(Commands::Ask { question, pdfs }) => {
            let docs = load_documents(&pdfs)?;
            let mut session = build_session(config);

            let mut progress = ProgressReporter::new();
            let report = session.process(&docs, &mut progress).await?;
            eprintln!(
                "  Processed {} document(s) into {} chunks",
                report.documents, report.chunks
            );

            let answer = session.ask(&question).await?;
            println!("{}", answer);
        }

        Some(Commands::Info) => {
            println!("pdfchat v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("  Config file:     {}", Config::path()?.display());
            println!("  Embedding model: {}", config.embedding_model);
            println!("  Language model:  {}", config.llm_model);
            println!("  Temperature:     {}", config.temperature);
            println!("  Max new tokens:  {}", config.max_new_tokens);
            println!("  Chunk size:      {}", config.chunk_size);
            println!("  Chunk overlap:   {}", config.chunk_overlap);
            println!("  Retrieval k:     {}", config.top_k);
            println!(
                "  API token:       {}",
                if config::api_token().is_some() {
                    "set"
                } else {
                    "not set (requests are anonymous)"
                }
            );
        }
    }

    Ok(())
}
