//! Narrow subprocess boundary around the `git` binary.
//!
//! Every repository mutation and query goes through the [`Git`] trait, so the
//! executor can be tested against a mock without touching a real working tree.
//! The system implementation shells out with already-tokenized argument
//! vectors; no shell is ever re-invoked.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// The five ways this tool touches a repository.
#[cfg_attr(test, mockall::automock)]
pub trait Git {
    /// `git add .`
    fn stage_all(&self) -> Result<()>;

    /// `git diff --cached --name-status`
    fn diff_name_status(&self) -> Result<String>;

    /// `git diff --cached`
    fn diff_content(&self) -> Result<String>;

    /// `git commit -m <message>`
    fn commit(&self, message: &str) -> Result<()>;

    /// Run an arbitrary tokenized command, returning its captured stdout.
    fn run(&self, argv: &[String]) -> Result<String>;
}

/// Real implementation backed by the system `git` binary.
pub struct SystemGit {
    work_dir: Option<PathBuf>,
}

impl SystemGit {
    pub fn new() -> Self {
        Self { work_dir: None }
    }

    /// Run every command from the given directory instead of the process cwd.
    #[allow(dead_code)] // Exercised by tests against throwaway repositories
    pub fn at(work_dir: PathBuf) -> Self {
        Self {
            work_dir: Some(work_dir),
        }
    }

    fn command(&self, program: &str) -> Command {
        let mut cmd = Command::new(program);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command("git")
            .args(args)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl Git for SystemGit {
    fn stage_all(&self) -> Result<()> {
        self.run_git(&["add", "."]).map(|_| ())
    }

    fn diff_name_status(&self) -> Result<String> {
        self.run_git(&["diff", "--cached", "--name-status"])
    }

    fn diff_content(&self) -> Result<String> {
        self.run_git(&["diff", "--cached"])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run_git(&["commit", "-m", message]).map(|_| ())
    }

    fn run(&self, argv: &[String]) -> Result<String> {
        let (program, args) = argv
            .split_first()
            .context("Refusing to run an empty command")?;

        let output = self
            .command(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {}", argv.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{} failed: {}", argv.join(" "), stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_run_git_version_succeeds() {
        // git --version should always succeed
        let git = SystemGit::new();
        let stdout = git.run(&argv(&["git", "--version"])).unwrap();
        assert!(stdout.contains("git version"));
    }

    #[test]
    fn test_run_invalid_subcommand_fails() {
        let git = SystemGit::new();
        let err = git.run(&argv(&["git", "not-a-real-command"])).unwrap_err();
        assert!(err.to_string().contains("not-a-real-command"));
    }

    #[test]
    fn test_run_rejects_empty_argv() {
        let git = SystemGit::new();
        assert!(git.run(&[]).is_err());
    }

    #[test]
    fn test_stage_diff_commit_in_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::at(dir.path().to_path_buf());

        git.run(&argv(&["git", "init", "--quiet"])).unwrap();
        git.run(&argv(&["git", "config", "user.email", "test@example.com"]))
            .unwrap();
        git.run(&argv(&["git", "config", "user.name", "Test"]))
            .unwrap();

        // Nothing staged yet
        assert_eq!(git.diff_name_status().unwrap(), "");

        fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();
        git.stage_all().unwrap();

        let summary = git.diff_name_status().unwrap();
        assert!(summary.contains("notes.txt"));
        let content = git.diff_content().unwrap();
        assert!(content.contains("hello"));

        git.commit("chore: add notes").unwrap();
        // Index is clean again after the commit
        assert_eq!(git.diff_name_status().unwrap(), "");
    }
}
