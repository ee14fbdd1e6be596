//! Context assembly and the question-answering prompt template.

use crate::document::SearchResult;

/// Separator placed between document texts in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Fixed template filled with the retrieved context and the user's question.
pub const QA_TEMPLATE: &str = "\
Answer the question based only on the following context:

{context}

---

Answer the question based on the above context: {question}
";

/// Join result texts into a single context block, preserving result order.
pub fn context_text(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Fill the question-answering template with context and question.
pub fn build_prompt(context: &str, question: &str) -> String {
    QA_TEMPLATE.replace("{context}", context).replace("{question}", question)
}

/// Collect the `source` metadata value of each result, substituting
/// `"Unknown"` where absent.
pub fn sources(results: &[SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.document.source().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::document::Document;

    fn result(id: &str, text: &str, source: Option<&str>) -> SearchResult {
        let mut metadata = HashMap::new();
        if let Some(source) = source {
            metadata.insert("source".to_string(), source.to_string());
        }
        SearchResult {
            document: Document { id: id.into(), text: text.into(), metadata },
            score: 0.9,
        }
    }

    #[test]
    fn context_joins_in_given_order() {
        let results =
            vec![result("a", "first", None), result("b", "second", None), result("c", "third", None)];
        assert_eq!(context_text(&results), "first\n\n---\n\nsecond\n\n---\n\nthird");
    }

    #[test]
    fn context_of_single_result_has_no_separator() {
        let results = vec![result("a", "only", None)];
        assert_eq!(context_text(&results), "only");
    }

    #[test]
    fn prompt_substitutes_both_slots() {
        let prompt = build_prompt("some facts", "what is up?");
        assert!(prompt.contains("some facts"));
        assert!(prompt.contains("Answer the question based on the above context: what is up?"));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{question}"));
    }

    #[test]
    fn sources_substitute_unknown() {
        let results = vec![result("a", "x", Some("guide.md")), result("b", "y", None)];
        assert_eq!(sources(&results), vec!["guide.md".to_string(), "Unknown".to_string()]);
    }
}
