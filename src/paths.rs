//! String-level path handling shared by the history store, the scanner and
//! the navigation state. Paths are kept as typed so drive-prefixed input
//! behaves the same on every platform.

/// Both separators are accepted in input.
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

pub fn ends_with_separator(path: &str) -> bool {
    path.chars().last().is_some_and(is_separator)
}

/// Key used for case-insensitive path identity.
pub fn fold_case(path: &str) -> String {
    path.to_lowercase()
}

pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    fold_case(haystack).starts_with(&fold_case(prefix))
}

/// Filename portion: everything after the last separator. Empty for a path
/// ending in a separator.
pub fn file_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Rooted at a separator or a drive letter (`C:\`, `C:/`).
pub fn is_absolute(path: &str) -> bool {
    let mut chars = path.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), _, _) if is_separator(first) => true,
        (Some(drive), Some(':'), Some(sep)) => drive.is_ascii_alphabetic() && is_separator(sep),
        _ => false,
    }
}

/// Splits canonical input into the directory to list and the name prefix to
/// filter on. The directory is empty when the input has no separator at all.
pub fn split_query(canonical: &str) -> (&str, &str) {
    if ends_with_separator(canonical) {
        return (canonical, "");
    }
    match canonical.rfind(is_separator) {
        Some(idx) => {
            let parent = &canonical[..idx];
            // Keep the separator when the parent is a root ("/" or "C:\").
            let dir = if parent.is_empty() || parent.ends_with(':') {
                &canonical[..=idx]
            } else {
                parent
            };
            (dir, &canonical[idx + 1..])
        }
        None => ("", canonical),
    }
}

/// Rewrites between the root-drive shorthand (`\Tools`) and the canonical
/// drive-prefixed form (`C:\Tools`).
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    drive_prefix: String,
    separator: char,
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new(default_drive_prefix(), std::path::MAIN_SEPARATOR)
    }
}

pub fn default_drive_prefix() -> String {
    if cfg!(windows) { "C:".to_string() } else { String::new() }
}

impl PathNormalizer {
    pub fn new(drive_prefix: impl Into<String>, separator: char) -> Self {
        Self {
            drive_prefix: drive_prefix.into(),
            separator,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// True when `input` is written in the shorthand idiom. A doubled leading
    /// separator is a UNC share, not shorthand.
    pub fn uses_shorthand(&self, input: &str) -> bool {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(first), second) => is_separator(first) && !second.is_some_and(is_separator),
            _ => false,
        }
    }

    pub fn to_canonical(&self, input: &str) -> String {
        if self.uses_shorthand(input) {
            format!("{}{}", self.drive_prefix, input)
        } else {
            input.to_string()
        }
    }

    pub fn to_shorthand_if_requested(&self, canonical: &str, used_shorthand: bool) -> String {
        if !used_shorthand || self.drive_prefix.is_empty() {
            return canonical.to_string();
        }
        let prefix_len = self.drive_prefix.len();
        match canonical.get(..prefix_len) {
            Some(head) if head.eq_ignore_ascii_case(&self.drive_prefix) && canonical.len() > prefix_len => {
                canonical[prefix_len..].to_string()
            }
            _ => canonical.to_string(),
        }
    }

    /// Rewrites every separator to the configured one. Identity and disk
    /// targets go through this; redisplay of typed input does not.
    pub fn normalize_separators(&self, path: &str) -> String {
        path.chars()
            .map(|c| if is_separator(c) { self.separator } else { c })
            .collect()
    }

    /// Case- and separator-insensitive key for a path in either idiom.
    pub fn identity_key(&self, path: &str) -> String {
        fold_case(&self.normalize_separators(&self.to_canonical(path)))
    }

    /// Appends `name` to `dir` with exactly one separator between them.
    pub fn join(&self, dir: &str, name: &str) -> String {
        if dir.is_empty() || ends_with_separator(dir) {
            format!("{}{}", dir, name)
        } else {
            format!("{}{}{}", dir, self.separator, name)
        }
    }
}
