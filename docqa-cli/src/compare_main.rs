//! `docqa-compare` — print a word's embedding and the pairwise embedding
//! distance between two words.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use docqa_cli::compare::compare_words;
use docqa_rag::OpenAiEmbeddings;
use tracing::error;

/// Compare two words in embedding space.
#[derive(Parser, Debug)]
#[command(name = "docqa-compare", version)]
struct Args {
    /// First word; its full embedding vector is printed.
    #[arg(default_value = "apple")]
    word_a: String,

    /// Second word for the pairwise distance.
    #[arg(default_value = "iphone")]
    word_b: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let provider = match OpenAiEmbeddings::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!(error = %e, "cannot configure embedding provider");
            return ExitCode::FAILURE;
        }
    };

    let outcome = compare_words(provider, &args.word_a, &args.word_b).await;
    println!("{}", outcome.render());
    ExitCode::SUCCESS
}
