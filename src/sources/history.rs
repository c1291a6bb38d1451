use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use chrono::Utc;
use directories::ProjectDirs;
use log::{debug, info, warn};
use crate::error::HistoryError;
use crate::model::HistoryEntry;
use crate::paths::{self, PathNormalizer};

pub fn default_history_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "quickrun", "quickrun")
        .map(|dirs| dirs.data_dir().join("history.json"))
}

/// Usage history keyed by case-folded, separator-normalized canonical path.
///
/// Every mutation is written through to disk immediately. A failed write is
/// returned to the caller but the in-memory change is kept.
pub struct HistoryStore {
    file: Option<PathBuf>,
    normalizer: PathNormalizer,
    entries: HashMap<String, HistoryEntry>,
    order: Vec<String>,
}

impl HistoryStore {
    /// A store that never touches disk.
    pub fn in_memory(normalizer: PathNormalizer) -> Self {
        Self {
            file: None,
            normalizer,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Opens the store backed by `file`, loading whatever is there.
    pub fn open(file: impl Into<PathBuf>, normalizer: PathNormalizer) -> Self {
        let mut store = Self::in_memory(normalizer);
        store.file = Some(file.into());
        store.load();
        store
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Replaces the in-memory state with the persisted one. A missing or
    /// unreadable file resets the store to empty instead of failing.
    pub fn load(&mut self) {
        self.entries.clear();
        self.order.clear();

        let Some(file) = &self.file else { return };
        let records = match fs::read_to_string(file) {
            Ok(content) => match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
                Ok(records) => records,
                Err(e) => {
                    warn!("History file {:?} is corrupt, starting empty: {}", file, e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("No history loaded from {:?}: {}", file, e);
                Vec::new()
            }
        };

        for mut record in records {
            let key = self.normalizer.identity_key(&record.path);
            if self.entries.contains_key(&key) {
                continue;
            }
            record.use_count = record.use_count.max(1);
            self.order.push(key.clone());
            self.entries.insert(key, record);
        }
        info!("HistoryStore: loaded {} entries", self.order.len());
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&HistoryEntry> {
        self.entries.get(&self.key(path))
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    pub fn record_use(&mut self, path: &str, is_container: bool) -> Result<(), HistoryError> {
        let canonical = self.normalizer.normalize_separators(&self.normalizer.to_canonical(path));
        let key = paths::fold_case(&canonical);

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.use_count = entry.use_count.saturating_add(1);
                entry.last_used = Utc::now();
                entry.is_container = is_container;
                debug!("HistoryStore: {} used {} times", entry.path, entry.use_count);
            }
            None => {
                let display_name = display_name_for(&canonical);
                self.entries.insert(key.clone(), HistoryEntry::new(canonical, display_name, is_container));
                self.order.push(key);
            }
        }
        self.save()
    }

    /// Entries whose display key starts with `prefix` (case-insensitive),
    /// most used first. Equal counts keep insertion order.
    pub fn search(&self, prefix: &str) -> Vec<&HistoryEntry> {
        let mut matches: Vec<&HistoryEntry> = self
            .entries()
            .filter(|e| paths::starts_with_ignore_case(e.display_key(), prefix))
            .collect();
        matches.sort_by(|a, b| b.use_count.cmp(&a.use_count));
        matches
    }

    /// Returns `Ok(false)` without saving when no entry matches `path`.
    pub fn set_alias(&mut self, path: &str, alias: &str) -> Result<bool, HistoryError> {
        let key = self.key(path);
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.alias = Some(alias.to_string());
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns `Ok(false)` without saving when no entry matches `path`.
    pub fn remove(&mut self, path: &str) -> Result<bool, HistoryError> {
        let key = self.key(path);
        if self.entries.remove(&key).is_none() {
            return Ok(false);
        }
        self.order.retain(|k| k != &key);
        self.save()?;
        Ok(true)
    }

    fn key(&self, path: &str) -> String {
        self.normalizer.identity_key(path)
    }

    fn save(&self) -> Result<(), HistoryError> {
        let Some(file) = &self.file else { return Ok(()) };
        let records: Vec<&HistoryEntry> = self.entries().collect();
        let content = serde_json::to_string_pretty(&records)?;

        let io_err = |source| HistoryError::Io { path: file.clone(), source };
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(file, content).map_err(io_err)?;
        Ok(())
    }
}

fn display_name_for(canonical: &str) -> String {
    let name = paths::file_name(canonical.trim_end_matches(paths::is_separator));
    if name.is_empty() { canonical.to_string() } else { name.to_string() }
}
