//! Decoding of model output into executable git actions.
//!
//! The completion service answers the translation prompt with a JSON array of
//! command strings. That text is untrusted input: it is decoded into the
//! `GitAction` enum with full schema validation and any mismatch fails closed
//! to an empty action list. The auto-commit sentinel is resolved here, once,
//! so downstream code never compares magic strings.

use serde_json::Value;

/// Reserved token the model emits for "stage everything and commit with a
/// generated message".
pub const AUTO_COMMIT_SENTINEL: &str = "__auto_commit__";

/// Message used when the model's commit line fails validation.
pub const FALLBACK_COMMIT_MESSAGE: &str = "chore: update";

/// Allowed conventional-commit types, checked as message prefixes.
pub const CONVENTIONAL_COMMIT_TYPES: [&str; 10] = [
    "feat", "fix", "chore", "docs", "refactor", "test", "perf", "ci", "build", "style",
];

/// One executable entry from the model's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitAction {
    /// An already-tokenized argument vector, run as a single subprocess.
    Literal(Vec<String>),
    /// Stage all changes, generate a commit message, commit.
    AutoCommit,
}

impl GitAction {
    /// Human-readable form for confirmation prompts and dry-run output.
    pub fn display(&self) -> String {
        match self {
            GitAction::Literal(tokens) => tokens.join(" "),
            GitAction::AutoCommit => "auto-commit (stage all, generate message, commit)".into(),
        }
    }
}

/// Decode a completion response into an ordered action list.
///
/// Expects a JSON array of non-empty strings, optionally wrapped in a
/// markdown code fence. Anything else - non-JSON text, a non-array value,
/// non-string elements, blank entries - yields an empty list.
pub fn parse_command_list(response: &str) -> Vec<GitAction> {
    let payload = extract_json_array(response);

    let value: Value = match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(_) => return Vec::new(),
    };

    let entries = match value.as_array() {
        Some(entries) => entries,
        None => return Vec::new(),
    };

    let mut actions = Vec::with_capacity(entries.len());
    for entry in entries {
        let command = match entry.as_str() {
            Some(command) => command.trim(),
            None => return Vec::new(),
        };

        if command == AUTO_COMMIT_SENTINEL {
            actions.push(GitAction::AutoCommit);
            continue;
        }

        let tokens: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Vec::new();
        }
        actions.push(GitAction::Literal(tokens));
    }

    actions
}

/// Extract a JSON array from a response that may be wrapped in markdown.
///
/// Tries a ` ```json ... ``` ` fenced block first, then a bare ` ``` ` block
/// whose content starts with `[`, and otherwise returns the trimmed input.
fn extract_json_array(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            return trimmed[start + 7..start + 7 + end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        if let Some(end) = trimmed[start + 3..].find("```") {
            let inner = trimmed[start + 3..start + 3 + end].trim();
            if inner.starts_with('[') {
                return inner.to_string();
            }
        }
    }

    trimmed.to_string()
}

/// Reduce a generated commit line to a single validated message.
///
/// Keeps only the first line, and substitutes [`FALLBACK_COMMIT_MESSAGE`]
/// unless the line starts with an allowed type followed by `:` or `(`.
pub fn normalize_commit_message(raw: &str) -> String {
    let line = raw.lines().next().unwrap_or("").trim();

    if has_conventional_prefix(line) {
        line.to_string()
    } else {
        FALLBACK_COMMIT_MESSAGE.to_string()
    }
}

fn has_conventional_prefix(line: &str) -> bool {
    CONVENTIONAL_COMMIT_TYPES.iter().any(|kind| {
        line.strip_prefix(kind)
            .and_then(|rest| rest.chars().next())
            .map(|next| next == ':' || next == '(')
            .unwrap_or(false)
    })
}
