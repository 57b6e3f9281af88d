//! Validated run configuration.
//!
//! [`RawSyncConfig`] is what the command line hands over: plain paths and
//! strings. [`SyncConfig::new`] checks it in a fixed order and is the only way
//! to obtain a [`SyncConfig`]:
//!
//! 1. `source` must be a directory.
//! 2. `target` (if given) must be a directory; it defaults to `source`.
//! 3. Every given suffix must start with `.`.
//! 4. Suffixes come in pairs.
//! 5. Same directory on both sides requires suffixes.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::{DirectoryRoot, SuffixFilter, SyncMode};

/// Unvalidated configuration as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawSyncConfig {
    pub source: PathBuf,
    pub target: Option<PathBuf>,
    pub source_suffix: Option<String>,
    pub target_suffix: Option<String>,
    pub mode: SyncMode,
    pub dry_run: bool,
    pub verbose: bool,
}

/// A configuration that passed every check in [`SyncConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    source: DirectoryRoot,
    target: DirectoryRoot,
    source_suffix: Option<SuffixFilter>,
    target_suffix: Option<SuffixFilter>,
    mode: SyncMode,
    dry_run: bool,
    verbose: bool,
}

impl SyncConfig {
    pub fn new(raw: RawSyncConfig) -> Result<Self, ConfigError> {
        let source = DirectoryRoot::new(&raw.source)?;
        let target = match &raw.target {
            Some(target) => DirectoryRoot::new(target)?,
            None => source.clone(),
        };

        let source_suffix = raw.source_suffix.map(SuffixFilter::new).transpose()?;
        let target_suffix = raw.target_suffix.map(SuffixFilter::new).transpose()?;

        match (&source_suffix, &target_suffix) {
            (Some(s), None) => {
                return Err(ConfigError::MissingTargetSuffix {
                    source_suffix: s.to_string(),
                })
            }
            (None, Some(t)) => {
                return Err(ConfigError::MissingSourceSuffix {
                    target_suffix: t.to_string(),
                })
            }
            (None, None) if source.same_directory(&target)? => {
                return Err(ConfigError::NothingToDo {
                    path: source.as_path().to_path_buf(),
                })
            }
            _ => {}
        }

        Ok(Self {
            source,
            target,
            source_suffix,
            target_suffix,
            mode: raw.mode,
            dry_run: raw.dry_run,
            verbose: raw.verbose,
        })
    }

    pub fn source(&self) -> &DirectoryRoot {
        &self.source
    }

    pub fn target(&self) -> &DirectoryRoot {
        &self.target
    }

    pub fn source_suffix(&self) -> Option<&SuffixFilter> {
        self.source_suffix.as_ref()
    }

    pub fn target_suffix(&self) -> Option<&SuffixFilter> {
        self.target_suffix.as_ref()
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Action lines are printed when verbose or dry-run is set.
    pub fn verbose(&self) -> bool {
        self.verbose || self.dry_run
    }
}
