pub mod commit;
pub mod translate;

use serde::{Deserialize, Serialize};

/// Prompt registry with one template per completion path
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    pub translate: String,
    pub commit_message: String,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self {
            translate: translate::TRANSLATE_PROMPT.to_string(),
            commit_message: commit::COMMIT_MESSAGE_PROMPT.to_string(),
        }
    }
}

/// Configuration overrides for prompts - mirrors the registry field for field
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PromptConfig {
    pub translate: Option<String>,
    pub commit_message: Option<String>,
}

impl PromptRegistry {
    /// Create a new registry with config overrides applied
    pub fn with_overrides(&self, config: &PromptConfig) -> Self {
        let mut registry = self.clone();

        if let Some(ref prompt) = config.translate {
            registry.translate = prompt.clone();
        }

        if let Some(ref prompt) = config.commit_message {
            registry.commit_message = prompt.clone();
        }

        registry
    }

    /// Substitute the user's instruction into the translation template
    pub fn render_translate(&self, instruction: &str) -> String {
        self.translate.replace("{instruction}", instruction)
    }

    /// Substitute the staged diff into the commit-message template
    pub fn render_commit_message(&self, diff: &str) -> String {
        self.commit_message.replace("{diff}", diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_prompt_contains_instruction_verbatim() {
        let registry = PromptRegistry::default();
        let instruction = "undo the last commit but keep the changes";

        let prompt = registry.render_translate(instruction);
        assert!(prompt.contains(instruction));
        // Fixed template text survives substitution
        assert!(prompt.contains("translates natural-language Git instructions"));
        assert!(prompt.contains("__auto_commit__"));
        assert!(!prompt.contains("{instruction}"));
    }

    #[test]
    fn test_render_is_idempotent_for_same_input() {
        let registry = PromptRegistry::default();

        let first = registry.render_translate("switch to main");
        let second = registry.render_translate("switch to main");
        assert_eq!(first, second);
    }

    #[test]
    fn test_commit_prompt_contains_diff() {
        let registry = PromptRegistry::default();
        let diff = "M\tsrc/main.rs\n+fn main() {}";

        let prompt = registry.render_commit_message(diff);
        assert!(prompt.contains(diff));
        assert!(prompt.contains("Conventional Commits"));
        assert!(!prompt.contains("{diff}"));
    }

    #[test]
    fn test_prompt_config_overrides() {
        let registry = PromptRegistry::default();
        let config = PromptConfig {
            translate: Some("Custom translate prompt: {instruction}".to_string()),
            ..Default::default()
        };

        let overridden = registry.with_overrides(&config);
        assert_eq!(
            overridden.render_translate("push"),
            "Custom translate prompt: push"
        );
        // Unchanged prompts should remain the same
        assert_eq!(overridden.commit_message, registry.commit_message);
    }
}
