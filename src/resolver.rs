use std::collections::HashSet;
use log::{debug, info};
use crate::model::Candidate;
use crate::paths::{self, PathNormalizer};
use crate::sources::FileSystem;
use crate::sources::filesystem::{DEFAULT_CAP, FilesystemScanner};
use crate::sources::history::HistoryStore;

/// Merges history matches and directory listings into one ranked list.
pub struct CandidateResolver<F: FileSystem> {
    history: HistoryStore,
    scanner: FilesystemScanner<F>,
    normalizer: PathNormalizer,
    cap: usize,
    base_dir: Option<String>,
}

impl<F: FileSystem> CandidateResolver<F> {
    pub fn new(history: HistoryStore, scanner: FilesystemScanner<F>, normalizer: PathNormalizer) -> Self {
        Self {
            history,
            scanner,
            normalizer,
            cap: DEFAULT_CAP,
            base_dir: None,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Directory that relative input is listed against. Without one, input
    /// with no directory part only matches history.
    pub fn with_base_dir(mut self, base_dir: Option<String>) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    pub fn file_system(&self) -> &F {
        self.scanner.fs()
    }

    pub fn resolve(&self, raw_input: &str) -> Vec<Candidate> {
        if raw_input.trim().is_empty() {
            return Vec::new();
        }

        let match_key = paths::file_name(raw_input);
        let mut candidates: Vec<Candidate> = if match_key.is_empty() {
            Vec::new()
        } else {
            self.history.search(match_key).into_iter().map(Candidate::from_history).collect()
        };
        let history_count = candidates.len();

        let canonical = self.normalizer.to_canonical(raw_input);
        let (dir, filter) = paths::split_query(&canonical);
        if let Some(dir) = self.scan_dir(dir) {
            let seen: HashSet<String> = candidates.iter().map(|c| self.normalizer.identity_key(&c.target_path)).collect();
            for child in self.scanner.list(&dir, filter, self.cap) {
                let target = self.normalizer.join(&dir, &child.name);
                if seen.contains(&self.normalizer.identity_key(&target)) {
                    debug!("CandidateResolver: {} already listed from history", target);
                    continue;
                }
                candidates.push(Candidate::from_filesystem(child.name, target, child.kind));
            }
        }

        info!(
            "CandidateResolver: query='{}', history={}, filesystem={}",
            raw_input,
            history_count,
            candidates.len() - history_count
        );
        candidates
    }

    /// Directory to list, with separators normalized so listed targets
    /// compare equal to history paths.
    fn scan_dir(&self, dir: &str) -> Option<String> {
        let dir = if dir.is_empty() {
            self.base_dir.clone()?
        } else {
            match &self.base_dir {
                Some(base) if !paths::is_absolute(dir) => self.normalizer.join(base, dir),
                _ => dir.to_string(),
            }
        };
        Some(self.normalizer.normalize_separators(&dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryKind, Origin};
    use crate::sources::{DirChild, DirIter};
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct FakeFs {
        dirs: HashMap<String, Vec<DirChild>>,
    }

    impl FakeFs {
        fn with(mut self, dir: &str, children: &[(&str, EntryKind)]) -> Self {
            let children = children
                .iter()
                .map(|(name, kind)| DirChild { name: name.to_string(), kind: *kind })
                .collect();
            self.dirs.insert(paths::fold_case(dir), children);
            self
        }
    }

    impl FileSystem for FakeFs {
        fn read_dir<'a>(&'a self, dir: &str) -> io::Result<DirIter<'a>> {
            let dir = paths::fold_case(dir.trim_end_matches('\\'));
            match self.dirs.get(&dir) {
                Some(children) => Ok(Box::new(children.iter().cloned().map(Ok::<DirChild, io::Error>))),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
            }
        }

        fn is_file(&self, _path: &str) -> bool {
            false
        }

        fn is_dir(&self, path: &str) -> bool {
            self.dirs.contains_key(&paths::fold_case(path.trim_end_matches('\\')))
        }
    }

    fn resolver(fs: FakeFs) -> CandidateResolver<FakeFs> {
        let normalizer = PathNormalizer::new("C:", '\\');
        CandidateResolver::new(
            HistoryStore::in_memory(normalizer.clone()),
            FilesystemScanner::new(fs),
            normalizer,
        )
    }

    #[test]
    fn blank_input_resolves_to_nothing() {
        let mut r = resolver(FakeFs::default().with("c:", &[("a.exe", EntryKind::File)]));
        r.history_mut().record_use("C:\\a.exe", false).unwrap();
        assert!(r.resolve("").is_empty());
        assert!(r.resolve("   ").is_empty());
    }

    #[test]
    fn history_comes_first_and_duplicates_are_dropped() {
        let fs = FakeFs::default().with(
            "C:\\Tools",
            &[("ab.exe", EntryKind::File), ("A.EXE", EntryKind::File), ("ac", EntryKind::Directory)],
        );
        let mut r = resolver(fs);
        r.history_mut().record_use("C:\\Tools\\a.exe", false).unwrap();

        let got = r.resolve("C:\\Tools\\a");
        let paths: Vec<&str> = got.iter().map(|c| c.target_path.as_str()).collect();
        assert_eq!(paths, vec!["C:\\Tools\\a.exe", "C:\\Tools\\ab.exe", "C:\\Tools\\ac"]);
        assert_eq!(got[0].origin, Origin::History);
        assert_eq!(got[2].kind, EntryKind::Directory);
    }

    #[test]
    fn trailing_separator_lists_whole_directory_without_history() {
        let fs = FakeFs::default().with("C:\\Tools", &[("x", EntryKind::File), ("y", EntryKind::File)]);
        let mut r = resolver(fs);
        r.history_mut().record_use("C:\\Other\\x", false).unwrap();

        let got = r.resolve("C:\\Tools\\");
        assert!(got.iter().all(|c| c.origin == Origin::Filesystem));
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn shorthand_input_scans_the_canonical_directory() {
        let fs = FakeFs::default().with("C:\\Tools", &[("tool.exe", EntryKind::File)]);
        let r = resolver(fs);
        let got = r.resolve("\\Tools\\t");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].target_path, "C:\\Tools\\tool.exe");
    }

    #[test]
    fn relative_input_uses_base_dir_when_configured() {
        let fs = FakeFs::default().with("C:\\Home", &[("notes.txt", EntryKind::File)]);
        assert!(resolver(FakeFs::default().with("C:\\Home", &[("notes.txt", EntryKind::File)]))
            .resolve("no")
            .is_empty());

        let r = resolver(fs).with_base_dir(Some("C:\\Home".to_string()));
        let got = r.resolve("no");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].target_path, "C:\\Home\\notes.txt");
    }

    #[test]
    fn unreadable_directory_keeps_history_matches() {
        let mut r = resolver(FakeFs::default());
        r.history_mut().record_use("C:\\Gone\\game.exe", false).unwrap();
        let got = r.resolve("C:\\Gone\\ga");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].origin, Origin::History);
    }

    #[test]
    fn mixed_separator_input_does_not_duplicate_history() {
        let fs = FakeFs::default().with("C:\\Tools", &[("a.exe", EntryKind::File), ("ab.exe", EntryKind::File)]);
        let mut r = resolver(fs);
        r.history_mut().record_use("C:\\Tools\\a.exe", false).unwrap();

        for input in ["C:/Tools/a", "/Tools/a", "C:\\Tools/a"] {
            let got = r.resolve(input);
            let paths: Vec<&str> = got.iter().map(|c| c.target_path.as_str()).collect();
            assert_eq!(paths, vec!["C:\\Tools\\a.exe", "C:\\Tools\\ab.exe"], "input {input}");
        }
    }

    #[test]
    fn cap_bounds_filesystem_candidates() {
        let names: Vec<String> = (0..30).map(|i| format!("f{i}")).collect();
        let children: Vec<(&str, EntryKind)> = names.iter().map(|n| (n.as_str(), EntryKind::File)).collect();
        let r = resolver(FakeFs::default().with("C:\\Many", &children)).with_cap(7);
        assert_eq!(r.resolve("C:\\Many\\").len(), 7);
    }
}
