//! Plan and apply one sync run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use aschenputtel_core::{RawSyncConfig, SyncConfig};
use aschenputtel_sync::{execute_with, planner, ActionResult, SyncPlan};

use super::SyncModeArg;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// The directory containing the state to replicate.
    pub source: PathBuf,

    /// The directory to synchronize with SOURCE (may be SOURCE itself).
    #[arg(long, short = 't', value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// The file suffix of the files representing the source, e.g. `.raw`.
    /// `-sfs` is accepted as well.
    #[arg(
        long = "source-file-suffix",
        short = 's',
        visible_alias = "sfs",
        value_name = "SUFFIX"
    )]
    pub source_suffix: Option<String>,

    /// The file suffix of the files representing the target, e.g. `.jpg`.
    /// `-tfs` is accepted as well.
    #[arg(
        long = "target-file-suffix",
        short = 'S',
        visible_alias = "tfs",
        value_name = "SUFFIX"
    )]
    pub target_suffix: Option<String>,

    /// delete: remove target files without a source; copy: copy source files
    /// missing from the target; both: delete, then copy.
    #[arg(long, short = 'm', value_name = "MODE", default_value = "delete")]
    pub mode: SyncModeArg,

    /// Show what would be done without touching any file. Implies --verbose.
    #[arg(long, short = 'd')]
    pub dry_run: bool,

    /// Print every action as it happens.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print the plan as JSON instead of applying it.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let config = SyncConfig::new(RawSyncConfig {
            source: self.source,
            target: self.target,
            source_suffix: self.source_suffix,
            target_suffix: self.target_suffix,
            mode: self.mode.into(),
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
        .context("invalid arguments")?;

        let plan = planner::plan(&config).with_context(|| {
            format!(
                "failed to compare '{}' with '{}'",
                config.source(),
                config.target()
            )
        })?;

        if json {
            let out = serde_json::to_string_pretty(&plan).context("failed to encode plan")?;
            println!("{out}");
            return Ok(());
        }

        let prefix = if config.dry_run() { "[dry-run] " } else { "" };
        let verbose = config.verbose();
        let results = execute_with(&plan, config.dry_run(), |action| {
            if verbose {
                print_action(prefix, action);
            }
        })
        .context("sync aborted")?;

        print_summary(config.dry_run(), &plan, &results);
        Ok(())
    }
}

fn print_action(prefix: &str, action: &ActionResult) {
    match action {
        ActionResult::Deleted { path } | ActionResult::WouldDelete { path } => {
            println!("{prefix}Deleting {}...", path.display())
        }
        ActionResult::Copied { source, target } | ActionResult::WouldCopy { source, target } => {
            println!(
                "{prefix}Copying {} -> {}...",
                source.display(),
                target.display()
            )
        }
    }
}

fn print_summary(dry_run: bool, plan: &SyncPlan, results: &[ActionResult]) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if plan.is_empty() {
        println!("{prefix}{} nothing to do", "✓".green().bold());
        return;
    }

    let deleted = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                ActionResult::Deleted { .. } | ActionResult::WouldDelete { .. }
            )
        })
        .count();
    let copied = results.len() - deleted;
    let (deleted_word, copied_word) = if dry_run {
        ("to delete", "to copy")
    } else {
        ("deleted", "copied")
    };
    println!(
        "{prefix}{} {deleted} {deleted_word}, {copied} {copied_word}",
        "✓".green().bold()
    );
}
