//! Rename and delete of history entries, as offered by the host's context menu.

use log::info;
use crate::error::AliasError;
use crate::sources::FileSystem;
use crate::state::NavigationController;

impl<F: FileSystem> NavigationController<F> {
    /// Sets a trimmed alias on the entry for `path` and refreshes the list.
    /// A blank alias is rejected without touching the store.
    pub fn rename(&mut self, path: &str, alias: &str) -> Result<(), AliasError> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(AliasError::EmptyAlias);
        }

        let found = match self.resolver_mut().history_mut().set_alias(path, alias) {
            Ok(found) => found,
            Err(e) => {
                self.push_warning(e);
                true
            }
        };
        self.refresh();

        if !found {
            return Err(AliasError::NotFound(path.to_string()));
        }
        info!("Alias: {} -> {}", path, alias);
        Ok(())
    }

    pub fn delete(&mut self, path: &str) -> Result<(), AliasError> {
        let found = match self.resolver_mut().history_mut().remove(path) {
            Ok(found) => found,
            Err(e) => {
                self.push_warning(e);
                true
            }
        };
        self.refresh();

        if !found {
            return Err(AliasError::NotFound(path.to_string()));
        }
        info!("Alias: removed {}", path);
        Ok(())
    }
}
