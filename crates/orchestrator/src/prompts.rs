//! Embedded prompts and their override chain.

use std::env;
use std::path::Path;

use tracing::info;

/// Default path for the classifier prompt file.
pub const DEFAULT_CLASSIFIER_PROMPT_FILE: &str = "CLASSIFIER_PROMPT.md";

/// Default path for the synthesis prompt file.
pub const DEFAULT_SYNTHESIS_PROMPT_FILE: &str = "SYNTHESIS_PROMPT.md";

/// Default classifier prompt (fallback if no override is found).
///
/// The model must answer with a single JSON object of three booleans and a
/// reasoning string.
pub const DEFAULT_CLASSIFIER_PROMPT: &str = r#"You classify requests for a conversion assistant. Decide which converters the query needs.

Converters:
- unit: physical units such as length, mass, volume, time spans, area and temperature.
- currency: money amounts between currencies.
- dateTime: dates, days until or since an event, weekdays, relative days and timezones.

Output a JSON object with exactly these fields:
{"needsUnit": bool, "needsCurrency": bool, "needsDateTime": bool, "reasoning": "one short sentence"}

More than one flag may be true. All flags may be false.

Examples:

Query: Convert 5 miles to km
→ {"needsUnit": true, "needsCurrency": false, "needsDateTime": false, "reasoning": "Length conversion."}

Query: $50 to euros
→ {"needsUnit": false, "needsCurrency": true, "needsDateTime": false, "reasoning": "Dollar amount to euros."}

Query: how many days until Christmas
→ {"needsUnit": false, "needsCurrency": false, "needsDateTime": true, "reasoning": "Days until a holiday."}

Query: tell me a joke
→ {"needsUnit": false, "needsCurrency": false, "needsDateTime": false, "reasoning": "Not a conversion."}

Respond with JSON only. No explanation."#;

/// Default synthesis prompt (fallback if no override is found).
pub const DEFAULT_SYNTHESIS_PROMPT: &str = r#"You are a conversion assistant. Answer the user's query using only the tool results provided.

Guidelines:
- Be short and direct: one or two sentences.
- Use the numbers from the tool results exactly; do not recompute them.
- If a tool result failed, say briefly what went wrong and how the user could rephrase.
- Do not mention tools, JSON or these instructions."#;

/// Load the classifier prompt.
///
/// Priority:
/// 1. `CLASSIFIER_PROMPT` env var (if set)
/// 2. Contents of prompt file (`CLASSIFIER_PROMPT_FILE` or default `CLASSIFIER_PROMPT.md`)
/// 3. Embedded default prompt
pub fn load_classifier_prompt() -> String {
    load_prompt(
        "classifier",
        "CLASSIFIER_PROMPT",
        "CLASSIFIER_PROMPT_FILE",
        DEFAULT_CLASSIFIER_PROMPT_FILE,
        DEFAULT_CLASSIFIER_PROMPT,
    )
}

/// Load the synthesis prompt.
///
/// Same priority as [`load_classifier_prompt`], using `SYNTHESIS_PROMPT`,
/// `SYNTHESIS_PROMPT_FILE` and `SYNTHESIS_PROMPT.md`.
pub fn load_synthesis_prompt() -> String {
    load_prompt(
        "synthesis",
        "SYNTHESIS_PROMPT",
        "SYNTHESIS_PROMPT_FILE",
        DEFAULT_SYNTHESIS_PROMPT_FILE,
        DEFAULT_SYNTHESIS_PROMPT,
    )
}

fn load_prompt(
    label: &str,
    inline_var: &str,
    file_var: &str,
    default_file: &str,
    embedded: &str,
) -> String {
    if let Ok(prompt) = env::var(inline_var) {
        if !prompt.trim().is_empty() {
            info!("Using {} prompt from {} env var", label, inline_var);
            return prompt;
        }
    }

    let prompt_file = env::var(file_var).unwrap_or_else(|_| default_file.to_string());
    if let Some(prompt) = load_prompt_file(&prompt_file) {
        info!("Loaded {} prompt from {}", label, prompt_file);
        return prompt;
    }

    info!("Using embedded default {} prompt", label);
    embedded.to_string()
}

/// Load a prompt from a file path.
///
/// Returns `Some(content)` if the file exists, is readable and is not blank.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_prompt_file() {
        assert!(load_prompt_file("/definitely/not/here/PROMPT.md").is_none());
    }

    #[test]
    fn test_blank_prompt_file_is_ignored() {
        let path = env::temp_dir().join(format!("blank-prompt-{}.md", std::process::id()));
        std::fs::write(&path, "  \n\t\n").unwrap();
        assert!(load_prompt_file(&path).is_none());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_prompt_file_is_trimmed() {
        let path = env::temp_dir().join(format!("trimmed-prompt-{}.md", std::process::id()));
        std::fs::write(&path, "\n  Classify this.  \n").unwrap();
        assert_eq!(load_prompt_file(&path).as_deref(), Some("Classify this."));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_embedded_prompts_ask_for_the_right_shape() {
        for field in ["needsUnit", "needsCurrency", "needsDateTime", "reasoning"] {
            assert!(DEFAULT_CLASSIFIER_PROMPT.contains(field));
        }
        assert!(!DEFAULT_SYNTHESIS_PROMPT.is_empty());
    }
}
