//! Interactive git training CLI.
//!
//! Every command wraps its core calls and reports failures as a prefixed
//! message plus the underlying cause on stderr, exiting non-zero. Learners
//! never see stack traces.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dojo::io::config::load_config;
use dojo::io::git::Git;
use dojo::io::inspect::RepoInspector;
use dojo::io::paths::DojoPaths;
use dojo::io::progress::load_progress;
use dojo::io::sandbox::require_sandbox;
use dojo::io::scenarios::load_scenario;
use dojo::logging;
use dojo::render::{self, Operation};
use dojo::start::start_scenario;
use dojo::status::run_status;

#[derive(Parser)]
#[command(name = "dojo", version, about = "Interactive git training sandbox")]
struct Cli {
    /// Project root holding `.dojo/` and `scenarios/`.
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the sandbox repository and begin a scenario.
    Start {
        /// Scenario id to load (defaults to the configured scenario).
        #[arg(short, long)]
        scenario: Option<String>,
    },
    /// Check progress: evaluate the current goal and advance on success.
    Status,
    /// Show hints for the current step.
    Hint,
    /// Show the commit graph of the sandbox repository.
    Diagram,
    /// Visualize the working tree and all branches.
    Worktree,
    /// Explain what a git operation does to the repository.
    Explain {
        /// Operation to explain; omit to list the catalog.
        #[arg(long, value_enum)]
        operation: Option<Operation>,
    },
    /// Preview what merging `--target` into `--base` would change.
    MergePreview {
        #[arg(long)]
        base: String,
        #[arg(long)]
        target: String,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.root;
    match cli.command {
        Command::Start { scenario } => {
            cmd_start(&root, scenario.as_deref()).context("failed to start scenario")
        }
        Command::Status => cmd_status(&root).context("failed to check status"),
        Command::Hint => cmd_hint(&root).context("failed to show hint"),
        Command::Diagram => cmd_diagram(&root).context("failed to show diagram"),
        Command::Worktree => cmd_worktree(&root).context("failed to show worktree"),
        Command::Explain { operation } => {
            match operation {
                Some(operation) => println!("{}", render::explain_operation(operation)),
                None => println!("{}", render::operation_catalog()),
            }
            Ok(())
        }
        Command::MergePreview { base, target } => {
            cmd_merge_preview(&root, &base, &target).context("failed to preview merge")
        }
    }
}

fn cmd_start(root: &Path, scenario: Option<&str>) -> Result<()> {
    let outcome = start_scenario(root, scenario)?;
    println!("{}", render::start_report(&outcome));
    Ok(())
}

fn cmd_status(root: &Path) -> Result<()> {
    let outcome = run_status(root)?;
    println!("{}", render::status_report(&outcome));
    Ok(())
}

fn cmd_hint(root: &Path) -> Result<()> {
    let paths = DojoPaths::new(root);
    let config = load_config(&paths.config_path)?;
    let progress = load_progress(&paths.progress_path)?;
    let scenario = load_scenario(
        &paths.scenarios_dir(&config.scenarios_dir),
        &progress.scenario,
    )?;
    println!("{}", render::hint_report(&scenario, progress.step_index));
    Ok(())
}

fn cmd_diagram(root: &Path) -> Result<()> {
    let paths = DojoPaths::new(root);
    require_sandbox(&paths)?;
    let graph = Git::new(&paths.repo_dir).graph()?;
    println!("{graph}");
    Ok(())
}

fn cmd_worktree(root: &Path) -> Result<()> {
    let paths = DojoPaths::new(root);
    require_sandbox(&paths)?;
    let inspector = RepoInspector::new(&paths.repo_dir);
    let snapshot = inspector.snapshot()?;
    let overviews = inspector.branch_overviews(&snapshot.branch);
    println!("{}", render::worktree_report(&snapshot, &overviews));
    Ok(())
}

fn cmd_merge_preview(root: &Path, base: &str, target: &str) -> Result<()> {
    let paths = DojoPaths::new(root);
    require_sandbox(&paths)?;
    let preview = RepoInspector::new(&paths.repo_dir).compare(base, target);
    println!(
        "{}",
        render::merge_preview_report(base, target, preview.as_ref())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_start_with_scenario() {
        let cli = Cli::parse_from(["dojo", "start", "--scenario", "commit-flow"]);
        assert!(matches!(
            cli.command,
            Command::Start { scenario: Some(ref id) } if id == "commit-flow"
        ));
    }

    #[test]
    fn parse_status_uses_default_root() {
        let cli = Cli::parse_from(["dojo", "status"]);
        assert!(matches!(cli.command, Command::Status));
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn parse_merge_preview_requires_both_branches() {
        let cli = Cli::parse_from([
            "dojo",
            "merge-preview",
            "--base",
            "main",
            "--target",
            "topic",
        ]);
        let Command::MergePreview { base, target } = cli.command else {
            panic!("expected merge-preview");
        };
        assert_eq!(base, "main");
        assert_eq!(target, "topic");
        assert!(Cli::try_parse_from(["dojo", "merge-preview", "--base", "main"]).is_err());
    }

    #[test]
    fn parse_explain_operation_kinds() {
        let cli = Cli::parse_from(["dojo", "explain", "--operation", "git-commit"]);
        assert!(matches!(
            cli.command,
            Command::Explain {
                operation: Some(Operation::GitCommit)
            }
        ));
        let cli = Cli::parse_from(["dojo", "explain"]);
        assert!(matches!(cli.command, Command::Explain { operation: None }));
    }
}
