/// Template that turns a staged diff into exactly one conventional-commit line.
pub const COMMIT_MESSAGE_PROMPT: &str = r#"You're a helpful assistant that writes Git commit messages using the Conventional Commits specification:
https://www.conventionalcommits.org/

Only return a single-line message in this format:
<type>(<optional scope>): <description>

Use one of: feat, fix, chore, docs, refactor, test, perf, ci, build, style.

Example:
Changes:
- Modified login form to add password strength meter
Commit: feat(auth): add password strength meter to login form

Now write the commit message based on this diff:
{diff}
Commit:"#;
