use std::fs;
use std::path::Path;

use jwalk::{Parallelism, WalkDir};

/// Sum the apparent sizes of all regular files under `path`.
///
/// Symlinks are not followed and entries that cannot be read count as zero, so
/// the result is a best-effort figure for display only.
pub fn estimate_size(path: &Path) -> u64 {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return 0,
    };
    if meta.is_file() {
        return meta.len();
    }
    if !meta.is_dir() {
        return 0;
    }

    let walker = WalkDir::new(path)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(Parallelism::Serial);

    let mut total: u64 = 0;
    for entry in walker.into_iter().flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            total = total.saturating_add(meta.len());
        }
    }
    total
}

/// Format bytes into human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Calculate percentage of size relative to total
pub fn size_percentage(size: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (size as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_size(1024 * 1024 * 1024 * 1024), "1.0 TB");
    }

    #[test]
    fn test_size_percentage() {
        assert_eq!(size_percentage(50, 100), 50.0);
        assert_eq!(size_percentage(0, 100), 0.0);
        assert_eq!(size_percentage(100, 0), 0.0);
    }

    #[test]
    fn test_estimate_size_nested() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.bin"), vec![0u8; 1000]).unwrap();
        fs::create_dir_all(temp.path().join("sub/deeper")).unwrap();
        fs::write(temp.path().join("sub/b.bin"), vec![0u8; 200]).unwrap();
        fs::write(temp.path().join("sub/deeper/.hidden"), vec![0u8; 30]).unwrap();

        assert_eq!(estimate_size(temp.path()), 1230);
    }

    #[test]
    fn test_estimate_size_single_file_and_missing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.log");
        fs::write(&file, "hello").unwrap();

        assert_eq!(estimate_size(&file), 5);
        assert_eq!(estimate_size(&temp.path().join("nope")), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_estimate_size_ignores_broken_symlink() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling"))
            .unwrap();

        assert_eq!(estimate_size(temp.path()), 10);
    }
}
