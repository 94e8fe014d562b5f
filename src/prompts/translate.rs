/// Few-shot template that turns a natural-language instruction into a JSON
/// array of git commands. The model must answer with the array alone; a
/// "commit with a generated message" request maps to the auto-commit sentinel.
pub const TRANSLATE_PROMPT: &str = r#"You are a CLI assistant that translates natural-language Git instructions into exact shell commands.
You must only return a JSON list of git commands, e.g., ["git status"].
Do not include any explanations, markdown, or plain text.

Use safe and common defaults when details are missing.

Examples:
NL: "go back 2 commits"
CMD: ["git revert HEAD~2"]

NL: "create a new branch called feature-x"
CMD: ["git checkout -b feature-x"]

NL: "switch to main"
CMD: ["git checkout main"]

NL: "rename current branch to release-1.2"
CMD: ["git branch -m release-1.2"]

NL: "reset to origin/main"
CMD: ["git reset --hard origin/main"]

NL: "stage and commit with conventional message"
CMD: ["__auto_commit__"]

NL: "{instruction}"
CMD:"#;
