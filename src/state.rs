use log::{info, warn};
use crate::error::{HistoryError, Warning};
use crate::model::{Candidate, LaunchRequest, Origin};
use crate::paths;
use crate::resolver::CandidateResolver;
use crate::sources::FileSystem;

/// What accepting the current selection led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Input was rewritten to browse into a directory; nothing launched.
    Descend(String),
    /// History is already updated; the host should open the target.
    Launch(LaunchRequest),
    /// No selection and the input does not name an existing file.
    Nothing,
}

/// Selection and autocomplete state over the resolver's output.
pub struct NavigationController<F: FileSystem> {
    resolver: CandidateResolver<F>,
    input: String,
    candidates: Vec<Candidate>,
    selection: Option<usize>,
    warnings: Vec<Warning>,
}

impl<F: FileSystem> NavigationController<F> {
    pub fn new(resolver: CandidateResolver<F>) -> Self {
        Self {
            resolver,
            input: String::new(),
            candidates: Vec::new(),
            selection: None,
            warnings: Vec::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selection.and_then(|i| self.candidates.get(i))
    }

    pub fn resolver(&self) -> &CandidateResolver<F> {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut CandidateResolver<F> {
        &mut self.resolver
    }

    /// Non-fatal problems accumulated since the last call.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn on_input_changed(&mut self, text: &str) -> &[Candidate] {
        self.input = text.to_string();
        self.refresh();
        &self.candidates
    }

    /// Re-resolves the current input and resets the selection.
    pub fn refresh(&mut self) {
        self.candidates = self.resolver.resolve(&self.input);
        self.selection = if self.candidates.is_empty() { None } else { Some(0) };
    }

    pub fn move_selection(&mut self, delta: i32) -> Option<usize> {
        if self.candidates.is_empty() {
            return self.selection;
        }
        let last = self.candidates.len() as i64 - 1;
        let current = self.selection.unwrap_or(0) as i64;
        self.selection = Some((current + delta as i64).clamp(0, last) as usize);
        self.selection
    }

    /// Rewrites the input from the selected candidate and re-resolves.
    /// Returns the new input, or `None` when nothing is selected.
    pub fn autocomplete(&mut self) -> Option<String> {
        let candidate = self.selected()?;
        let text = match candidate.origin {
            Origin::History => candidate.target_path.clone(),
            Origin::Filesystem => {
                let normalizer = self.resolver.normalizer();
                let used_shorthand = normalizer.uses_shorthand(&self.input);
                let mut text = normalizer.to_shorthand_if_requested(&candidate.target_path, used_shorthand);
                if candidate.kind.is_directory() && !paths::ends_with_separator(&text) {
                    text.push(normalizer.separator());
                }
                text
            }
        };
        self.on_input_changed(&text);
        Some(text)
    }

    pub fn commit(&mut self) -> Commit {
        let Some(candidate) = self.selected().cloned() else {
            return self.commit_literal();
        };

        if candidate.origin == Origin::Filesystem && candidate.kind.is_directory() {
            return match self.autocomplete() {
                Some(text) => Commit::Descend(text),
                None => Commit::Nothing,
            };
        }

        let is_container = match candidate.origin {
            Origin::History => self.resolver.file_system().is_dir(&candidate.target_path),
            Origin::Filesystem => candidate.kind.is_directory(),
        };
        self.record_use(&candidate.target_path, is_container);
        info!("NavigationController: launching {}", candidate.target_path);
        Commit::Launch(LaunchRequest { target_path: candidate.target_path })
    }

    fn commit_literal(&mut self) -> Commit {
        let input = self.input.clone();
        self.commit_path(&input)
    }

    /// Launches `path` as typed, bypassing the candidate list. Only an
    /// existing file is accepted.
    pub fn commit_path(&mut self, path: &str) -> Commit {
        if path.trim().is_empty() {
            return Commit::Nothing;
        }
        let normalizer = self.resolver.normalizer();
        let literal = normalizer.normalize_separators(&normalizer.to_canonical(path));
        if !self.resolver.file_system().is_file(&literal) {
            return Commit::Nothing;
        }
        self.record_use(&literal, false);
        info!("NavigationController: launching literal path {}", literal);
        Commit::Launch(LaunchRequest { target_path: literal })
    }

    fn record_use(&mut self, path: &str, is_container: bool) {
        let result = self.resolver.history_mut().record_use(path, is_container);
        if let Err(e) = result {
            self.push_warning(e);
        }
    }

    pub(crate) fn push_warning(&mut self, error: HistoryError) {
        warn!("History not saved: {}", error);
        self.warnings.push(Warning::HistoryNotSaved(error));
    }
}
