mod actions;
mod config;
mod executor;
mod git;
mod llm;
mod prompts;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use config::Config;
use executor::{confirm_execution, Executor};
use git::SystemGit;
use llm::{LlmClient, SamplingParams};
use prompts::PromptRegistry;

#[derive(Parser)]
#[command(name = "git-nl")]
#[command(about = "Run git commands from natural-language instructions")]
#[command(version)]
struct Cli {
    /// Natural-language instruction, e.g. `git-nl switch to main`
    instruction: Vec<String>,

    /// Show verbose output for debugging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    no_confirm: bool,

    /// Print the translation prompt without calling the service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.instruction.is_empty() {
        println!("Please provide a natural-language git instruction.");
        return Ok(ExitCode::SUCCESS);
    }
    let instruction = cli.instruction.join(" ");

    let config = Config::load()?;
    let verbose = cli.verbose || config.behavior.verbose;
    let prompts = PromptRegistry::default().with_overrides(&config.prompts);

    if cli.dry_run {
        println!("Dry run - would send this translation prompt:");
        println!("---");
        println!("{}", prompts.render_translate(&instruction));
        println!("---");
        return Ok(ExitCode::SUCCESS);
    }

    let llm = match LlmClient::from_env(&config.api) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", format!("{err:#}").red());
            return Ok(ExitCode::FAILURE);
        }
    };
    let git = SystemGit::new();

    let exec = Executor::new(
        &git,
        &llm,
        &prompts,
        SamplingParams::command_generation(&config.api),
        SamplingParams::commit_message(&config.api),
        verbose,
    );

    let actions = exec.translate(&instruction).await;
    if actions.is_empty() {
        println!("No runnable commands were generated.");
        return Ok(ExitCode::SUCCESS);
    }

    let confirmed = if cli.no_confirm || !config.behavior.confirm {
        true
    } else {
        confirm_execution(&actions, &mut std::io::stdin().lock())?
    };

    if !confirmed {
        println!("Aborted.");
        return Ok(ExitCode::SUCCESS);
    }

    let report = exec.run(&actions).await;
    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}",
            format!(
                "{} of {} command(s) failed.",
                report.failed, report.attempted
            )
            .red()
        );
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_parsing_instruction_words() {
        let args = vec!["git-nl", "switch", "to", "main"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.instruction, vec!["switch", "to", "main"]);
        assert!(!cli.verbose);
        assert!(!cli.no_confirm);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_parsing_flags() {
        let args = vec![
            "git-nl",
            "stage",
            "and",
            "commit",
            "--no-confirm",
            "--verbose",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.instruction, vec!["stage", "and", "commit"]);
        assert!(cli.verbose);
        assert!(cli.no_confirm);
    }

    #[test]
    fn test_cli_parsing_dry_run() {
        let args = vec!["git-nl", "--dry-run", "undo", "last", "commit"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.instruction, vec!["undo", "last", "commit"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_parsing_no_instruction() {
        let cli = Cli::try_parse_from(vec!["git-nl"]).unwrap();
        assert!(cli.instruction.is_empty());
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "git-nl");
    }
}
