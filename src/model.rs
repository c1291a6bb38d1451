use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn from_container(is_container: bool) -> Self {
        if is_container { EntryKind::Directory } else { EntryKind::File }
    }

    pub fn is_directory(self) -> bool {
        self == EntryKind::Directory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    History,
    Filesystem,
}

/// One persisted record per distinct launched target.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub path: String,             // Canonical absolute path, compared case-insensitively
    pub display_name: String,     // Filename portion captured at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,    // User-assigned name, overrides display_name
    pub last_used: DateTime<Utc>,
    pub use_count: u32,
    #[serde(default)]
    pub is_container: bool,
}

impl HistoryEntry {
    pub fn new(path: String, display_name: String, is_container: bool) -> Self {
        Self {
            path,
            display_name,
            alias: None,
            last_used: Utc::now(),
            use_count: 1,
            is_container,
        }
    }

    /// The key used for matching and rendering: alias when set, else the filename.
    pub fn display_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.display_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub display_text: String,
    pub target_path: String,
    pub kind: EntryKind,
    pub origin: Origin,
    pub use_count: Option<u32>, // Only set for History origin
    pub aliased: bool,          // Display text comes from an alias
}

impl Candidate {
    pub fn from_history(entry: &HistoryEntry) -> Self {
        Self {
            display_text: entry.display_key().to_string(),
            target_path: entry.path.clone(),
            kind: EntryKind::from_container(entry.is_container),
            origin: Origin::History,
            use_count: Some(entry.use_count),
            aliased: entry.alias.is_some(),
        }
    }

    pub fn from_filesystem(name: String, target_path: String, kind: EntryKind) -> Self {
        Self {
            display_text: name,
            target_path,
            kind,
            origin: Origin::Filesystem,
            use_count: None,
            aliased: false,
        }
    }

    pub fn is_history(&self) -> bool {
        self.origin == Origin::History
    }
}

/// A request for the host to open `target_path` with the OS default handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub target_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_supersedes_display_name() {
        let mut entry = HistoryEntry::new("C:\\Apps\\chrome.exe".into(), "chrome.exe".into(), false);
        assert_eq!(entry.display_key(), "chrome.exe");
        entry.alias = Some("browser".into());
        assert_eq!(entry.display_key(), "browser");

        let candidate = Candidate::from_history(&entry);
        assert_eq!(candidate.display_text, "browser");
        assert!(candidate.aliased);
        assert_eq!(candidate.use_count, Some(1));
    }

    #[test]
    fn history_entry_serializes_with_camel_case_keys() {
        let entry = HistoryEntry::new("/opt/tool".into(), "tool".into(), true);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"displayName\":\"tool\""));
        assert!(json.contains("\"useCount\":1"));
        assert!(json.contains("\"isContainer\":true"));
        assert!(!json.contains("alias"));
    }
}
