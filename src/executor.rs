//! Confirmation and execution of generated git actions.
//!
//! The flow is strictly linear: a non-empty action list is shown to the user
//! for a default-yes confirmation, then executed in original order. A failing
//! entry is reported and does not stop the remaining entries. The auto-commit
//! entry runs its own sub-flow (stage all, diff, generate message, commit)
//! and a failure there likewise stays inside that sub-flow.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::actions::{self, GitAction, FALLBACK_COMMIT_MESSAGE};
use crate::git::Git;
use crate::llm::{CompletionBackend, SamplingParams};
use crate::prompts::PromptRegistry;

/// Outcome of one execution pass over an action list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub attempted: usize,
    pub failed: usize,
}

impl ExecutionReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Runs parsed actions against the repository via injected collaborators.
pub struct Executor<'a> {
    git: &'a dyn Git,
    llm: &'a dyn CompletionBackend,
    prompts: &'a PromptRegistry,
    command_params: SamplingParams,
    message_params: SamplingParams,
    verbose: bool,
}

impl<'a> Executor<'a> {
    pub fn new(
        git: &'a dyn Git,
        llm: &'a dyn CompletionBackend,
        prompts: &'a PromptRegistry,
        command_params: SamplingParams,
        message_params: SamplingParams,
        verbose: bool,
    ) -> Self {
        Self {
            git,
            llm,
            prompts,
            command_params,
            message_params,
            verbose,
        }
    }

    /// Translate a natural-language instruction into an action list.
    ///
    /// A remote-call failure or unparseable model output degrades to an empty
    /// list; neither is fatal to the process.
    pub async fn translate(&self, instruction: &str) -> Vec<GitAction> {
        let prompt = self.prompts.render_translate(instruction);

        if self.verbose {
            println!("Sending translation prompt ({} chars)", prompt.len());
        }

        let text = match self.llm.complete(&prompt, &self.command_params).await {
            Ok(text) => text,
            Err(err) => {
                eprintln!("{}", format!("Completion service error: {err:#}").red());
                return Vec::new();
            }
        };

        let parsed = actions::parse_command_list(&text);
        if parsed.is_empty() && !text.trim().is_empty() {
            eprintln!(
                "{}",
                format!("Model output is not a command list: {}", text.trim()).red()
            );
        }

        parsed
    }

    /// Execute actions in original order, reporting failures as they occur.
    pub async fn run(&self, actions: &[GitAction]) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for action in actions {
            report.attempted += 1;

            let result = match action {
                GitAction::Literal(tokens) => self.run_literal(tokens),
                GitAction::AutoCommit => self.auto_commit().await,
            };

            if let Err(err) = result {
                report.failed += 1;
                eprintln!("{}", format!("Command failed: {err:#}").red());
            }
        }

        report
    }

    fn run_literal(&self, tokens: &[String]) -> Result<()> {
        println!("{}", format!("Running: {}", tokens.join(" ")).green());

        let stdout = self.git.run(tokens)?;
        if !stdout.is_empty() {
            println!("{stdout}");
        }

        Ok(())
    }

    /// Stage everything, then commit with a generated conventional message.
    async fn auto_commit(&self) -> Result<()> {
        self.git.stage_all().context("Staging changes failed")?;

        let diff = self.staged_diff()?;
        if diff.is_empty() {
            println!("{}", "No staged changes to commit.".yellow());
            return Ok(());
        }

        let message = self.generate_commit_message(&diff).await;
        println!("Generated commit message: {message}");

        self.git.commit(&message).context("Commit failed")?;
        println!("{}", "Committed staged changes.".green());

        Ok(())
    }

    /// Combined name-status summary and content diff of the index.
    fn staged_diff(&self) -> Result<String> {
        let summary = self.git.diff_name_status()?;
        let content = self.git.diff_content()?;

        Ok(format!("{summary}\n{content}").trim().to_string())
    }

    /// Ask the model for a commit line; any failure or malformed answer
    /// degrades to the fixed fallback message.
    async fn generate_commit_message(&self, diff: &str) -> String {
        let prompt = self.prompts.render_commit_message(diff);

        match self.llm.complete(&prompt, &self.message_params).await {
            Ok(line) => actions::normalize_commit_message(&line),
            Err(err) => {
                eprintln!(
                    "{}",
                    format!("Error generating commit message: {err:#}").red()
                );
                FALLBACK_COMMIT_MESSAGE.to_string()
            }
        }
    }
}

/// Show the pending actions and ask for a default-yes confirmation.
pub fn confirm_execution(actions: &[GitAction], input: &mut impl BufRead) -> Result<bool> {
    println!("About to run:");
    for action in actions {
        println!("  {}", action.display());
    }
    print!("Proceed? [Y/n]: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read confirmation")?;

    let answer = line.trim().to_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}
