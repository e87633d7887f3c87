use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::discovery::DiscoveredEntry;
use crate::disk::{DiskProbe, DiskSnapshot};
use crate::resolve::PathResolver;
use crate::safety::{Protection, SafetyValidator, Verdict};

/// One observation made while cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanEvent {
    /// Dry run: the path would have been emptied
    WouldDelete { path: PathBuf },
    /// The safety validator refused the path
    SkippedUnsafe {
        path: PathBuf,
        protection: Protection,
    },
    /// A resolved path that was a plain file got removed
    RemovedFile { path: PathBuf },
    /// A resolved directory had its children removed
    Emptied { path: PathBuf, removed: usize },
    /// Removing or reading something failed
    Failed { path: PathBuf, error: String },
    /// All paths of a catalog entry were processed
    EntryCleaned { name: String },
}

impl CleanEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, CleanEvent::Failed { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, CleanEvent::SkippedUnsafe { .. })
    }
}

impl fmt::Display for CleanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanEvent::WouldDelete { path } => write!(f, "Would empty {}", path.display()),
            CleanEvent::SkippedUnsafe { path, protection } => {
                write!(f, "Skipped unsafe path {} ({})", path.display(), protection)
            }
            CleanEvent::RemovedFile { path } => write!(f, "Removed file {}", path.display()),
            CleanEvent::Emptied { path, removed } => write!(
                f,
                "Emptied {} ({} item{})",
                path.display(),
                removed,
                if *removed == 1 { "" } else { "s" }
            ),
            CleanEvent::Failed { path, error } => {
                write!(f, "Skipped {}: {}", path.display(), error)
            }
            CleanEvent::EntryCleaned { name } => write!(f, "Cleaned {}", name),
        }
    }
}

/// Outcome of one cleanup pass
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub dry_run: bool,
    /// Number of checked catalog entries that were processed
    pub entries_processed: usize,
    pub events: Vec<CleanEvent>,
    /// Free-space gain on the measured disk; zero for dry runs
    pub reclaimed_bytes: u64,
    pub before: Option<DiskSnapshot>,
    pub after: Option<DiskSnapshot>,
}

impl CleanReport {
    pub fn nothing_selected(&self) -> bool {
        self.entries_processed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CleanEvent> {
        self.events.iter().filter(|e| e.is_failure())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &CleanEvent> {
        self.events.iter().filter(|e| e.is_skip())
    }

    /// Files and directory children removed during the pass
    pub fn items_removed(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                CleanEvent::RemovedFile { .. } => 1,
                CleanEvent::Emptied { removed, .. } => *removed,
                _ => 0,
            })
            .sum()
    }
}

/// Removes the contents of selected cache targets, one path at a time
pub struct Cleaner<P> {
    resolver: PathResolver,
    validator: SafetyValidator,
    probe: P,
}

impl<P: DiskProbe> Cleaner<P> {
    pub fn new(resolver: PathResolver, validator: SafetyValidator, probe: P) -> Self {
        Self {
            resolver,
            validator,
            probe,
        }
    }

    /// Clean every checked entry. Patterns are resolved again here, so paths
    /// that appeared or vanished since discovery are handled as they are now.
    pub fn clean(&self, entries: &[DiscoveredEntry], dry_run: bool) -> CleanReport {
        let before = if dry_run { None } else { self.probe.snapshot() };

        let mut events = Vec::new();
        let mut entries_processed = 0;

        for discovered in entries.iter().filter(|e| e.checked) {
            entries_processed += 1;

            for path in self.resolver.resolve_entry(&discovered.entry) {
                if dry_run {
                    events.push(CleanEvent::WouldDelete { path });
                    continue;
                }

                if let Verdict::Protected(protection) = self.verdict(&path) {
                    tracing::warn!(path = %path.display(), %protection, "skipped unsafe path");
                    events.push(CleanEvent::SkippedUnsafe { path, protection });
                    continue;
                }

                self.clean_path(&path, &mut events);
            }

            if !dry_run {
                tracing::info!(target_name = %discovered.name(), "cleaned");
                events.push(CleanEvent::EntryCleaned {
                    name: discovered.name().to_string(),
                });
            }
        }

        let after = if dry_run { None } else { self.probe.snapshot() };
        let reclaimed_bytes = match (&before, &after) {
            (Some(b), Some(a)) => a.reclaimed_since(b),
            _ => 0,
        };

        CleanReport {
            dry_run,
            entries_processed,
            events,
            reclaimed_bytes,
            before,
            after,
        }
    }

    /// Both the path as written and its canonical form must be safe, so a
    /// symlink anywhere along the path cannot reach a protected directory.
    fn verdict(&self, path: &Path) -> Verdict {
        let verdict = self.validator.check(path);
        if !verdict.is_safe() {
            return verdict;
        }

        match path.canonicalize() {
            Ok(canonical) => self.validator.check(&canonical),
            // Gone since resolution; clean_path reports the failure
            Err(_) => verdict,
        }
    }

    fn clean_path(&self, path: &Path, events: &mut Vec<CleanEvent>) {
        let meta = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                record_failure(events, path, &e);
                return;
            }
        };

        if !meta.is_dir() {
            match fs::remove_file(path) {
                Ok(()) => events.push(CleanEvent::RemovedFile {
                    path: path.to_path_buf(),
                }),
                Err(e) => record_failure(events, path, &e),
            }
            return;
        }

        let children = match fs::read_dir(path) {
            Ok(rd) => rd,
            Err(e) => {
                record_failure(events, path, &e);
                return;
            }
        };

        // Only the contents go; the directory itself stays for its application
        let mut removed = 0;
        for child in children {
            let child = match child {
                Ok(c) => c,
                Err(e) => {
                    record_failure(events, path, &e);
                    continue;
                }
            };
            let child_path = child.path();
            match remove_child(&child_path, child.file_type()) {
                Ok(()) => removed += 1,
                Err(e) => record_failure(events, &child_path, &e),
            }
        }

        tracing::debug!(path = %path.display(), removed, "emptied directory");
        events.push(CleanEvent::Emptied {
            path: path.to_path_buf(),
            removed,
        });
    }
}

/// Remove one directory child without following symlinks
fn remove_child(path: &Path, file_type: io::Result<fs::FileType>) -> io::Result<()> {
    let file_type = file_type?;
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else if file_type.is_symlink() {
        // Directory links on Windows need remove_dir
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    } else {
        fs::remove_file(path)
    }
}

fn record_failure(events: &mut Vec<CleanEvent>, path: &Path, error: &io::Error) {
    tracing::warn!(path = %path.display(), %error, "could not delete");
    events.push(CleanEvent::Failed {
        path: path.to_path_buf(),
        error: error.to_string(),
    });
}
