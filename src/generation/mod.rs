//! Prompt templates for answer generation

/// Prompt builder for document-grounded questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the grounded Q&A prompt from retrieved document text
    ///
    /// The model is instructed to answer only from the supplied document
    /// content, never from general knowledge.
    pub fn build_qa_prompt(question: &str, contexts: &[String]) -> String {
        format!(
            "Answer based only on this document:\n{}\n\nQuestion: {}",
            contexts.join("\n"),
            question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_context_and_question() {
        let contexts = vec!["First page.".to_string(), "Second page.".to_string()];
        let prompt = PromptBuilder::build_qa_prompt("What is on page two?", &contexts);
        assert!(prompt.contains("First page.\nSecond page."));
        assert!(prompt.ends_with("Question: What is on page two?"));
    }
}
