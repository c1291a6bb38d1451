//! Query resolution for a path and program quick-launcher: prefix matching
//! over usage history and the filesystem, plus the selection and
//! autocomplete state a host UI drives.

pub mod alias;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod paths;
pub mod resolver;
pub mod sources;
pub mod state;

use log::warn;
use crate::config::Config;
use crate::paths::PathNormalizer;
use crate::resolver::CandidateResolver;
use crate::sources::filesystem::{DiskFileSystem, FilesystemScanner};
use crate::sources::history::{self, HistoryStore};
use crate::state::NavigationController;

/// Builds the engine over the real disk from `config`.
pub fn build_engine(config: &Config) -> NavigationController<DiskFileSystem> {
    let normalizer = PathNormalizer::new(config.general.drive_prefix.clone(), config.general.separator);

    let history_file = config.general.history_file.clone().or_else(history::default_history_path);
    let history = match history_file {
        Some(file) => HistoryStore::open(file, normalizer.clone()),
        None => {
            warn!("No history location available, history will not persist");
            HistoryStore::in_memory(normalizer.clone())
        }
    };

    let scanner = FilesystemScanner::new(DiskFileSystem).with_exclude(&config.scan.exclude);
    let resolver = CandidateResolver::new(history, scanner, normalizer)
        .with_cap(config.scan.cap)
        .with_base_dir(config.general.base_dir.clone());
    NavigationController::new(resolver)
}
