//! aschenputtel: file suffix based syncing.
//!
//! # Usage
//!
//! ```text
//! aschenputtel <source> [--target <dir>]
//!              [--source-file-suffix <.ext> --target-file-suffix <.ext>]
//!              [--mode delete|copy|both] [--dry-run] [--verbose] [--json]
//! ```
//!
//! `aschenputtel raws -t previews -s .raw -S .jpg` deletes every preview
//! whose original is gone. The older `-sfs .raw -tfs .jpg` spelling is still
//! accepted.

mod sync;

use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;

use aschenputtel_core::SyncMode;
use sync::SyncArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "aschenputtel",
    version,
    about = "File suffix based syncing",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

// ---------------------------------------------------------------------------
// SyncMode argument parsed from CLI strings
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `SyncMode` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct SyncModeArg(pub SyncMode);

impl FromStr for SyncModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delete" => Ok(Self(SyncMode::Delete)),
            "copy" => Ok(Self(SyncMode::Copy)),
            "both" => Ok(Self(SyncMode::Both)),
            other => Err(format!(
                "unknown mode '{other}'; expected: delete, copy, both"
            )),
        }
    }
}

impl fmt::Display for SyncModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SyncModeArg> for SyncMode {
    fn from(m: SyncModeArg) -> Self {
        m.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Rewrite the single-dash `-sfs` / `-tfs` flags of earlier releases to their
/// long aliases; clap would otherwise read `-sfs` as `-s fs`.
fn legacy_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    for flag in ["-sfs", "-tfs"] {
        if let Some(rest) = text.strip_prefix(flag) {
            if rest.is_empty() || rest.starts_with('=') {
                return format!("-{text}").into();
            }
        }
    }
    arg
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(std::env::args_os().map(legacy_flag));
    init_tracing(cli.sync.verbose);
    cli.sync.run()
}
