//! Library side of the `docqa` binaries.
//!
//! The binaries parse arguments, load configuration, and wire up the real
//! providers; the flows themselves live here so they can be exercised with
//! mock providers in tests.

pub mod compare;
pub mod query;

pub use compare::{compare_words, CompareOutcome};
pub use query::{answer, QueryOutcome, MSG_CHAT_FAILED, MSG_NOT_RELEVANT, MSG_NO_MATCHES};
