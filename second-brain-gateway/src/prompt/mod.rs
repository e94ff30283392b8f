//! Prompt templates sent to the model.

pub mod template;

pub use template::{TemplateError, render_template};

const CLASSIFY_TEMPLATE: &str = r#"You are a strict classification engine. Analyze the note below and return a JSON object.

RULES FOR "type":
- "LINK": If the content contains a URL (http/https) or refers to a specific article/video.
- "INSIGHT": If the content is a personal realization, philosophical thought, or "Aha!" moment.
- "NOTE": Default for factual information, meeting notes, or code snippets.

Input Title: "{{title}}"
Input Content: "{{content}}"

Required JSON Format:
{
  "summary": "One short sentence summary",
  "tags": ["tag1", "tag2", "tag3"],
  "type": "NOTE" or "LINK" or "INSIGHT"
}
"#;

const SUMMARY_TEMPLATE: &str = r#"Summarize the following note in exactly one short, punchy sentence (max 15 words).
Do not use "This note is about...". Just state the core idea.

Title: {{title}}
Content: {{content}}
"#;

const ANSWER_TEMPLATE: &str = r#"You are a Second Brain AI. Answer based ONLY on these notes:
{{context}}

Question: {{question}}
"#;

/// Stand-in for the notes block when nothing has been captured yet.
pub const EMPTY_CONTEXT_MARKER: &str = "(no notes yet)";

/// Prompt asking for `summary`, `tags` and `type` as strict JSON.
pub fn classification_prompt(title: &str, content: &str) -> Result<String, TemplateError> {
    render_template(CLASSIFY_TEMPLATE, &[("title", title), ("content", content)])
}

/// Prompt asking for a single-sentence summary.
pub fn summary_prompt(title: &str, content: &str) -> Result<String, TemplateError> {
    render_template(SUMMARY_TEMPLATE, &[("title", title), ("content", content)])
}

/// Prompt grounding an answer in the assembled notes.
pub fn answer_prompt(context: &str, question: &str) -> Result<String, TemplateError> {
    let context = if context.trim().is_empty() {
        EMPTY_CONTEXT_MARKER
    } else {
        context
    };
    render_template(ANSWER_TEMPLATE, &[
        ("context", context),
        ("question", question),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_embeds_note() {
        let prompt = classification_prompt("Recipes", "Check out https://example.com").unwrap();
        assert!(prompt.starts_with("You are a strict classification engine."));
        assert!(prompt.contains("Input Title: \"Recipes\""));
        assert!(prompt.contains("Input Content: \"Check out https://example.com\""));
        assert!(prompt.contains(r#""type": "NOTE" or "LINK" or "INSIGHT""#));
    }

    #[test]
    fn test_summary_prompt_limits_length() {
        let prompt = summary_prompt("Standup", "Ship on Friday").unwrap();
        assert!(prompt.contains("max 15 words"));
        assert!(prompt.contains("Do not use \"This note is about...\""));
        assert!(prompt.ends_with("Title: Standup\nContent: Ship on Friday\n"));
    }

    #[test]
    fn test_answer_prompt_marks_empty_context() {
        let prompt = answer_prompt("", "What did I save?").unwrap();
        assert!(prompt.contains("ONLY on these notes:\n(no notes yet)\n"));
        assert!(prompt.ends_with("Question: What did I save?\n"));

        let prompt = answer_prompt("Title: A\nContent: B\nTags: ", "q").unwrap();
        assert!(!prompt.contains(EMPTY_CONTEXT_MARKER));
        assert!(prompt.contains("Title: A\nContent: B\nTags: \n\nQuestion: q"));
    }
}
