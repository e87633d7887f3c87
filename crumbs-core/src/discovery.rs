use crate::catalog::{Catalog, CatalogEntry};
use crate::resolve::PathResolver;
use crate::size::estimate_size;

/// A catalog entry found on this machine, with its menu state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntry {
    pub entry: CatalogEntry,
    /// Selected for cleanup
    pub checked: bool,
    /// Bytes under all resolved paths, for display only
    pub size_bytes: Option<u64>,
}

impl DiscoveredEntry {
    pub fn new(entry: CatalogEntry) -> Self {
        Self {
            entry,
            checked: false,
            size_bytes: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size_bytes = Some(size);
        self
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }
}

/// Discovery configuration
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Walk resolved paths to compute display sizes
    pub estimate_sizes: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            estimate_sizes: true,
        }
    }
}

/// Filter the catalog down to entries with at least one existing resolved path
pub fn discover(
    catalog: &Catalog,
    resolver: &PathResolver,
    options: &DiscoveryOptions,
) -> Vec<DiscoveredEntry> {
    let mut found = Vec::new();

    for entry in catalog.entries() {
        let paths = resolver.resolve_entry(entry);
        if paths.is_empty() {
            tracing::debug!(target_name = %entry.name, "no cache paths found");
            continue;
        }

        let mut discovered = DiscoveredEntry::new(entry.clone());
        if options.estimate_sizes {
            let size = paths.iter().map(|p| estimate_size(p)).sum();
            discovered = discovered.with_size(size);
        }
        tracing::debug!(
            target_name = %entry.name,
            paths = paths.len(),
            size = ?discovered.size_bytes,
            "discovered cache target"
        );
        found.push(discovered);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use glob::Pattern;
    use std::fs;
    use tempfile::TempDir;

    fn pattern_in(dir: &TempDir, rel: &str) -> String {
        format!("{}/{}", Pattern::escape(&dir.path().to_string_lossy()), rel)
    }

    #[test]
    fn test_discover_filters_missing_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("present")).unwrap();
        fs::write(temp.path().join("present/blob"), vec![0u8; 64]).unwrap();

        let catalog = Catalog::from_entries(
            Platform::current(),
            vec![
                CatalogEntry::new("Missing", [pattern_in(&temp, "absent")]),
                CatalogEntry::new("Present", [pattern_in(&temp, "present")]),
                CatalogEntry::new("No Patterns", Vec::<String>::new()),
            ],
        );

        let found = discover(&catalog, &PathResolver::new(None), &DiscoveryOptions::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Present");
        assert!(!found[0].checked);
        assert_eq!(found[0].size_bytes, Some(64));
    }

    #[test]
    fn test_entry_with_one_matching_pattern_included_once() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("q")).unwrap();

        let catalog = Catalog::from_entries(
            Platform::current(),
            vec![CatalogEntry::new(
                "PQ",
                [pattern_in(&temp, "p"), pattern_in(&temp, "q")],
            )],
        );

        let found = discover(&catalog, &PathResolver::new(None), &DiscoveryOptions::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "PQ");
    }

    #[test]
    fn test_discover_sums_all_matches_once() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/Cache")).unwrap();
        fs::create_dir_all(temp.path().join("b/Cache")).unwrap();
        fs::write(temp.path().join("a/Cache/x"), vec![0u8; 10]).unwrap();
        fs::write(temp.path().join("b/Cache/y"), vec![0u8; 20]).unwrap();

        let catalog = Catalog::from_entries(
            Platform::current(),
            vec![CatalogEntry::new(
                "Browser",
                [pattern_in(&temp, "a/Cache"), pattern_in(&temp, "*/Cache")],
            )],
        );

        let found = discover(&catalog, &PathResolver::new(None), &DiscoveryOptions::default());
        assert_eq!(found[0].size_bytes, Some(30));
    }

    #[test]
    fn test_discover_without_sizes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("c")).unwrap();
        let catalog = Catalog::from_entries(
            Platform::current(),
            vec![CatalogEntry::new("C", [pattern_in(&temp, "c")])],
        );
        let options = DiscoveryOptions {
            estimate_sizes: false,
        };

        let found = discover(&catalog, &PathResolver::new(None), &options);
        assert_eq!(found[0].size_bytes, None);
    }
}
