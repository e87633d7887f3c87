use std::path::PathBuf;

use sysinfo::Disks;

/// Free and total space of one disk at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSnapshot {
    pub free_bytes: u64,
    pub total_bytes: u64,
}

impl DiskSnapshot {
    /// Space freed between `before` and this snapshot; shrinkage counts as zero
    pub fn reclaimed_since(&self, before: &DiskSnapshot) -> u64 {
        self.free_bytes.saturating_sub(before.free_bytes)
    }
}

/// Source of disk snapshots. Failure to measure is `None`, never an error.
pub trait DiskProbe {
    fn snapshot(&self) -> Option<DiskSnapshot>;
}

/// Measures the disk holding a given path via the OS disk list
#[derive(Debug, Clone)]
pub struct SystemDisk {
    path: PathBuf,
}

impl SystemDisk {
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Disk holding the home directory, or the filesystem root if unknown
    pub fn for_host() -> Self {
        let path = dirs::home_dir().unwrap_or_else(|| {
            if cfg!(windows) {
                PathBuf::from(r"C:\")
            } else {
                PathBuf::from("/")
            }
        });
        Self::for_path(path)
    }
}

impl DiskProbe for SystemDisk {
    fn snapshot(&self) -> Option<DiskSnapshot> {
        let disks = Disks::new_with_refreshed_list();
        let target = self.path.canonicalize().unwrap_or_else(|_| self.path.clone());

        // Longest mount point containing the target wins
        disks
            .list()
            .iter()
            .filter(|disk| target.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().components().count())
            .map(|disk| DiskSnapshot {
                free_bytes: disk.available_space(),
                total_bytes: disk.total_space(),
            })
    }
}
