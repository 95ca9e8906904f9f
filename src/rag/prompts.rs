//! Prompt for the rehabilitation assistant

/// Build the rehabilitation assistant prompt around the retrieved context
pub fn build_rehab_prompt(question: &str, context: &str) -> String {
    format!(
        r"You are a knowledgeable and empathetic AI assistant for rehabilitation, specifically focused on helping a user recover from a C4/C5 nerve injury affecting their bicep.

Use the following retrieved context to answer the user's question. Synthesize the information and provide a helpful, supportive, and clear response.

Instructions:
1. Prefer the retrieved context over anything else you know
2. If the context doesn't contain the answer, use your general knowledge about rehabilitation, neurology, and related medical fields, but clearly state that the specific information wasn't found in the provided documents
3. Always prioritize safety and advise consulting with healthcare professionals for medical decisions
4. Be encouraging and motivating

Context:
{context}

Question: {question}

Helpful Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let prompt = build_rehab_prompt(
            "How many reps?",
            "[Excerpt 1]\nRepeat 10 times daily.",
        );

        assert!(prompt.contains("Context:\n[Excerpt 1]\nRepeat 10 times daily."));
        assert!(prompt.contains("Question: How many reps?"));
        assert!(prompt.trim_end().ends_with("Helpful Answer:"));
    }

    #[test]
    fn test_prompt_carries_policy() {
        let prompt = build_rehab_prompt("q", "c");
        assert!(prompt.contains("C4/C5 nerve injury"));
        assert!(prompt.contains("wasn't found in the provided documents"));
        assert!(prompt.contains("consulting with healthcare professionals"));
    }
}
