//! `docqa` — answer a question from documents in the persisted vector store.
//!
//! Exit status is 0 for every handled outcome, including "no results"; it is
//! non-zero when the store cannot be opened or the similarity search fails.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use docqa_cli::query::answer;
use docqa_model::{ChatConfig, OpenAiChat};
use docqa_rag::{OpenAiEmbeddings, RetrievalConfig, Retriever, SqliteVectorStore};
use tracing::error;

/// Retrieval-augmented question answering over a local vector store.
#[derive(Parser, Debug)]
#[command(name = "docqa", version)]
struct Args {
    /// The question to ask.
    query_text: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = RetrievalConfig::default();

    let embeddings = match OpenAiEmbeddings::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!(error = %e, "cannot configure embedding provider");
            return ExitCode::FAILURE;
        }
    };

    let store = match SqliteVectorStore::open(&config.persist_dir).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "failed to open vector store");
            return ExitCode::FAILURE;
        }
    };

    let retriever = match Retriever::builder()
        .config(config)
        .embeddings(embeddings)
        .store(store)
        .build()
    {
        Ok(retriever) => retriever,
        Err(e) => {
            error!(error = %e, "failed to build retriever");
            return ExitCode::FAILURE;
        }
    };

    let model = match ChatConfig::from_env() {
        Ok(config) => OpenAiChat::new(config),
        Err(e) => {
            error!(error = %e, "cannot configure chat model");
            return ExitCode::FAILURE;
        }
    };

    match answer(&retriever, &model, &args.query_text).await {
        Ok(outcome) => {
            println!("{}", outcome.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "retrieval failed");
            ExitCode::FAILURE
        }
    }
}
