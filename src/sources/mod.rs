use std::io;
use crate::model::EntryKind;

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    pub name: String,
    pub kind: EntryKind,
}

pub type DirIter<'a> = Box<dyn Iterator<Item = io::Result<DirChild>> + 'a>;

/// Directory enumeration and existence checks the engine needs from the host.
pub trait FileSystem {
    /// Lazily lists the immediate children of `dir` in native order.
    fn read_dir<'a>(&'a self, dir: &str) -> io::Result<DirIter<'a>>;

    fn is_file(&self, path: &str) -> bool;

    fn is_dir(&self, path: &str) -> bool;
}

pub mod filesystem;
pub mod history;
