//! Query flow: retrieve, assemble the prompt, ask the chat model, and
//! format the answer with its sources.
//!
//! The flow lives here (rather than in the binary) so the early-exit
//! branches can be tested without a network or a real store.

use docqa_model::ChatModel;
use docqa_rag::prompt::{build_prompt, context_text, sources};
use docqa_rag::retriever::{Retrieval, Retriever};
use tracing::{debug, warn};

/// User-facing message when the search returns nothing.
pub const MSG_NO_MATCHES: &str = "Unable to find matching results.";

/// User-facing message when no candidate clears the relevance threshold.
pub const MSG_NOT_RELEVANT: &str = "Found results, but none were relevant enough.";

/// User-facing message when the chat model call fails.
pub const MSG_CHAT_FAILED: &str = "Failed to get a response from the model.";

/// How a query run ended. All variants are normal terminations; retrieval
/// infrastructure failures surface as errors instead.
#[derive(Debug)]
pub enum QueryOutcome {
    /// The search returned no candidates.
    NoMatches,
    /// Candidates were found but none cleared the threshold.
    NotRelevant,
    /// Retrieval succeeded but the chat model call failed.
    ChatFailed {
        /// The underlying model error, for the log.
        error: String,
    },
    /// The model answered.
    Answered {
        /// The model's response text.
        response: String,
        /// Source identifiers of the documents behind the answer.
        sources: Vec<String>,
    },
}

impl QueryOutcome {
    /// Render the outcome as the text printed to the user.
    pub fn render(&self) -> String {
        match self {
            QueryOutcome::NoMatches => MSG_NO_MATCHES.to_string(),
            QueryOutcome::NotRelevant => MSG_NOT_RELEVANT.to_string(),
            QueryOutcome::ChatFailed { .. } => MSG_CHAT_FAILED.to_string(),
            QueryOutcome::Answered { response, sources } => {
                format!("\nResponse:\n{response}\n\nSources: {sources:?}")
            }
        }
    }
}

/// Run the question-answering flow for one query.
///
/// Steps: retrieve candidates → join surviving texts into a context block →
/// fill the prompt template → ask the chat model. The chat model is only
/// invoked when at least one candidate clears the relevance threshold.
///
/// # Errors
///
/// Returns an error only for retrieval infrastructure failures (query
/// embedding or store search); the caller treats those as fatal.
pub async fn answer(
    retriever: &Retriever,
    model: &dyn ChatModel,
    question: &str,
) -> docqa_rag::Result<QueryOutcome> {
    let results = match retriever.retrieve(question).await? {
        Retrieval::NoMatches => return Ok(QueryOutcome::NoMatches),
        Retrieval::BelowThreshold => return Ok(QueryOutcome::NotRelevant),
        Retrieval::Relevant(results) => results,
    };

    let context = context_text(&results);
    let prompt = build_prompt(&context, question);
    debug!(prompt_len = prompt.len(), "assembled prompt");

    let response = match model.generate(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            warn!(model = model.name(), error = %e, "chat model call failed");
            return Ok(QueryOutcome::ChatFailed { error: e.to_string() });
        }
    };

    Ok(QueryOutcome::Answered { response, sources: sources(&results) })
}
