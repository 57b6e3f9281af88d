//! aschenputtel core library: domain types, validated configuration, errors.
//!
//! - [`types`]: suffix filters, relative keys, directory roots
//! - [`config`]: [`SyncConfig`], the only way into the planner
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{RawSyncConfig, SyncConfig};
pub use error::ConfigError;
pub use types::{DirectoryRoot, RelativeKey, SuffixFilter, SyncMode};
