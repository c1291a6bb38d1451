use std::io;
use std::path::Path;
use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;
use crate::model::EntryKind;
use crate::paths;
use crate::sources::{DirChild, DirIter, FileSystem};

pub const DEFAULT_CAP: usize = 20;

/// The real disk.
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn read_dir<'a>(&'a self, dir: &str) -> io::Result<DirIter<'a>> {
        let root = Path::new(dir);
        if !root.is_dir() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("not a directory: {}", dir)));
        }
        // Probe readability up front so access errors surface here rather
        // than as the first iterator item.
        std::fs::read_dir(root)?;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .map(|item| -> io::Result<DirChild> {
                let entry = item.map_err(io::Error::from)?;
                Ok(DirChild {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind: EntryKind::from_container(entry.file_type().is_dir()),
                })
            });
        Ok(Box::new(walker))
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }
}

/// Bounded, best-effort listing of one directory.
pub struct FilesystemScanner<F: FileSystem> {
    fs: F,
    exclude: Vec<Regex>,
}

impl<F: FileSystem> FilesystemScanner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, exclude: Vec::new() }
    }

    /// Skips children whose name matches any pattern. Invalid patterns are
    /// dropped with a warning.
    pub fn with_exclude(mut self, patterns: &[String]) -> Self {
        self.exclude = patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring exclude pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Children of `dir` whose name starts with `prefix` (case-insensitive,
    /// literal), at most `cap` of them. Any failure to open the directory
    /// yields an empty list; unreadable children are skipped.
    pub fn list(&self, dir: &str, prefix: &str, cap: usize) -> Vec<DirChild> {
        if cap == 0 {
            return Vec::new();
        }
        let children = match self.fs.read_dir(dir) {
            Ok(children) => children,
            Err(e) => {
                debug!("FilesystemScanner: cannot list {:?}: {}", dir, e);
                return Vec::new();
            }
        };

        let mut found = Vec::new();
        for child in children {
            let child = match child {
                Ok(child) => child,
                Err(e) => {
                    debug!("FilesystemScanner: skipping entry in {:?}: {}", dir, e);
                    continue;
                }
            };
            if !paths::starts_with_ignore_case(&child.name, prefix) {
                continue;
            }
            if self.exclude.iter().any(|re| re.is_match(&child.name)) {
                continue;
            }
            found.push(child);
            if found.len() >= cap {
                break;
            }
        }
        debug!("FilesystemScanner: {:?} prefix={:?} -> {}", dir, prefix, found.len());
        found
    }
}
