use std::collections::HashSet;
use std::path::PathBuf;

use glob::Pattern;

use crate::catalog::CatalogEntry;
use crate::error::{CrumbsError, Result};

/// Expands catalog patterns into concrete, existing filesystem paths
#[derive(Debug, Clone)]
pub struct PathResolver {
    home: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// Resolver bound to the invoking user's home directory
    pub fn for_host() -> Self {
        Self::new(dirs::home_dir())
    }

    /// Like [`PathResolver::for_host`], but a missing home directory is an error
    pub fn require_home() -> Result<Self> {
        dirs::home_dir()
            .map(|home| Self::new(Some(home)))
            .ok_or(CrumbsError::HomeDirUnavailable)
    }

    pub fn home(&self) -> Option<&PathBuf> {
        self.home.as_ref()
    }

    /// Expand a leading `~` shorthand to the (glob-escaped) home directory.
    /// Returns None if the pattern needs a home directory and none is known.
    pub fn expand_home(&self, pattern: &str) -> Option<String> {
        let rest = if pattern == "~" {
            ""
        } else if let Some(rest) = pattern
            .strip_prefix("~/")
            .or_else(|| pattern.strip_prefix("~\\"))
        {
            rest
        } else {
            return Some(pattern.to_string());
        };

        let home = self.home.as_ref()?;
        let home = Pattern::escape(&home.to_string_lossy());
        if rest.is_empty() {
            return Some(home);
        }
        let home = home.trim_end_matches(['/', '\\']);
        Some(format!("{}{}{}", home, std::path::MAIN_SEPARATOR, rest))
    }

    /// Resolve one pattern. Bad patterns and unreadable entries yield nothing.
    pub fn resolve(&self, pattern: &str) -> Vec<PathBuf> {
        let Some(expanded) = self.expand_home(pattern) else {
            tracing::debug!(pattern, "no home directory to expand pattern");
            return Vec::new();
        };

        let paths = match glob::glob(&expanded) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::debug!(pattern = %expanded, error = %e, "invalid glob pattern");
                return Vec::new();
            }
        };

        paths
            .filter_map(|result| match result {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable glob match");
                    None
                }
            })
            .filter(|path| path.exists())
            .collect()
    }

    /// Resolve every pattern of an entry, dropping paths already matched by an
    /// earlier pattern
    pub fn resolve_entry(&self, entry: &CatalogEntry) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        entry
            .patterns
            .iter()
            .flat_map(|pattern| self.resolve(pattern))
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}
