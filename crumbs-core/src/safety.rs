//! Deletion gatekeeper.
//!
//! Every path the cleanup executor is about to empty passes through
//! [`SafetyValidator::check`]. The checks are purely lexical: the path is
//! normalized for the validator's [`Platform`], lower-cased, and then compared
//! against filesystem-root forms, a denylist of critical directories, the
//! user's home directory, and a minimum depth.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::platform::Platform;

/// Why a path must not be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protection {
    /// Relative or drive-relative path
    NotAbsolute,
    /// `/`, `C:\`, a bare UNC share and similar
    FilesystemRoot,
    /// Exact match against the platform denylist
    Denylisted,
    /// The home directory itself or one of its parents
    HomeDirectory,
    /// Fewer path segments than the minimum depth
    TooShallow,
}

impl Protection {
    pub fn describe(&self) -> &'static str {
        match self {
            Protection::NotAbsolute => "not an absolute path",
            Protection::FilesystemRoot => "filesystem root",
            Protection::Denylisted => "protected system or profile directory",
            Protection::HomeDirectory => "home directory",
            Protection::TooShallow => "too close to the filesystem root",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Safety classification of a resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    Protected(Protection),
}

impl Verdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

/// A path after lexical normalization: separators collapsed, `.` dropped and
/// `..` applied, never climbing above the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    windows: bool,
    root: Option<String>,
    components: Vec<String>,
}

impl NormalizedPath {
    pub fn is_absolute(&self) -> bool {
        self.root.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.root.is_some() && self.components.is_empty()
    }

    /// Number of segments, counting the root (or drive) as one
    pub fn segments(&self) -> usize {
        usize::from(self.root.is_some()) + self.components.len()
    }

    /// Form used for every comparison
    pub fn comparison_key(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.windows { "\\" } else { "/" };
        match &self.root {
            Some(root) => {
                f.write_str(root)?;
                if !root.ends_with(sep) {
                    f.write_str(sep)?;
                }
            }
            None if self.components.is_empty() => return f.write_str("."),
            None => {}
        }
        f.write_str(&self.components.join(sep))
    }
}

/// Lexically normalize `raw` using the separator rules of `platform`
pub fn normalize(platform: Platform, raw: &str) -> NormalizedPath {
    if platform.is_windows() {
        normalize_windows(raw)
    } else {
        normalize_unix(raw)
    }
}

fn normalize_unix(raw: &str) -> NormalizedPath {
    let absolute = raw.starts_with('/');
    NormalizedPath {
        windows: false,
        root: absolute.then(|| "/".to_string()),
        components: collapse(raw.split('/'), absolute),
    }
}

fn normalize_windows(raw: &str) -> NormalizedPath {
    let s = raw.replace('/', "\\");

    // Verbatim prefixes: \\?\UNC\server\share and \\?\C:\
    if let Some(rest) = s.strip_prefix(r"\\?\UNC\") {
        return normalize_windows(&format!(r"\\{}", rest));
    }
    if let Some(rest) = s.strip_prefix(r"\\?\") {
        return normalize_windows(rest);
    }

    if let Some(rest) = s.strip_prefix(r"\\") {
        let mut parts = rest.split('\\').filter(|p| !p.is_empty());
        let server = parts.next().unwrap_or_default();
        let share = parts.next();
        let root = match share {
            Some(share) => format!(r"\\{}\{}", server, share),
            None => format!(r"\\{}", server),
        };
        return NormalizedPath {
            windows: true,
            root: Some(root),
            components: collapse(parts, true),
        };
    }

    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let drive = s[..2].to_string();
        let rest = &s[2..];
        // "C:" alone is still a drive root; "C:foo" is drive-relative
        if rest.is_empty() || rest.starts_with('\\') {
            return NormalizedPath {
                windows: true,
                root: Some(drive),
                components: collapse(rest.split('\\'), true),
            };
        }
        return NormalizedPath {
            windows: true,
            root: None,
            components: collapse(rest.split('\\'), false),
        };
    }

    let absolute = s.starts_with('\\');
    NormalizedPath {
        windows: true,
        root: absolute.then(|| "\\".to_string()),
        components: collapse(s.split('\\'), absolute),
    }
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>, absolute: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in parts {
        match part {
            "" | "." => {}
            ".." => match out.last() {
                Some(last) if last != ".." => {
                    out.pop();
                }
                _ if absolute => {}
                _ => out.push("..".to_string()),
            },
            other => out.push(other.to_string()),
        }
    }
    out
}

const UNIX_DENYLIST: &[&str] = &[
    "/bin",
    "/boot",
    "/dev",
    "/etc",
    "/home",
    "/lib",
    "/lib32",
    "/lib64",
    "/media",
    "/mnt",
    "/opt",
    "/proc",
    "/root",
    "/run",
    "/sbin",
    "/snap",
    "/srv",
    "/sys",
    "/tmp",
    "/usr",
    "/usr/bin",
    "/usr/lib",
    "/usr/lib64",
    "/usr/local",
    "/usr/local/bin",
    "/usr/local/lib",
    "/usr/sbin",
    "/usr/share",
    "/var",
    "/var/cache",
    "/var/lib",
    "/var/log",
    "/var/tmp",
];

const MACOS_DENYLIST: &[&str] = &[
    "/Applications",
    "/Library",
    "/Library/Caches",
    "/System",
    "/System/Library",
    "/Users",
    "/Volumes",
    "/cores",
    "/opt/homebrew",
    "/private",
    "/private/etc",
    "/private/tmp",
    "/private/var",
];

const WINDOWS_DENYLIST: &[&str] = &[
    r"C:\Windows",
    r"C:\Windows\System32",
    r"C:\Windows\SysWOW64",
    r"C:\Windows\WinSxS",
    r"C:\Users",
    r"C:\Users\Public",
    r"C:\Users\Default",
    r"C:\Program Files",
    r"C:\Program Files (x86)",
    r"C:\ProgramData",
    r"C:\Recovery",
];

/// Environment variables naming Windows system roots
const WINDOWS_ENV_DENYLIST: &[&str] = &[
    "WINDIR",
    "SystemRoot",
    "ProgramFiles",
    "ProgramFiles(x86)",
    "ProgramW6432",
    "ProgramData",
    "LOCALAPPDATA",
    "APPDATA",
    "USERPROFILE",
];

const UNIX_HOME_CHILDREN: &[&str] = &[
    ".cache",
    ".config",
    ".local",
    ".local/share",
    ".ssh",
    ".gnupg",
    "Desktop",
    "Documents",
    "Downloads",
    "Music",
    "Pictures",
    "Videos",
];

const MACOS_HOME_CHILDREN: &[&str] = &[
    "Library",
    "Library/Caches",
    "Library/Application Support",
    "Library/Preferences",
    "Movies",
];

const WINDOWS_HOME_CHILDREN: &[&str] = &[
    "AppData",
    "AppData/Local",
    "AppData/LocalLow",
    "AppData/Roaming",
    "Desktop",
    "Documents",
    "Downloads",
    "Music",
    "Pictures",
    "Videos",
];

/// Classifies resolved paths as deletable or protected
#[derive(Debug, Clone)]
pub struct SafetyValidator {
    platform: Platform,
    denylist: HashSet<String>,
    /// Home directory and each of its parents, as comparison keys
    home_chain: HashSet<String>,
    min_segments: usize,
}

impl SafetyValidator {
    /// Minimum segments (root counted as one) a deletable path must have
    pub const MIN_SEGMENTS: usize = 3;

    pub fn new(platform: Platform, home: Option<&Path>) -> Self {
        let mut validator = Self {
            platform,
            denylist: HashSet::new(),
            home_chain: HashSet::new(),
            min_segments: Self::MIN_SEGMENTS,
        };

        let fixed: Vec<&str> = match platform {
            Platform::Windows => WINDOWS_DENYLIST.to_vec(),
            Platform::Linux => UNIX_DENYLIST.to_vec(),
            Platform::MacOs => UNIX_DENYLIST
                .iter()
                .chain(MACOS_DENYLIST.iter())
                .copied()
                .collect(),
        };
        for path in fixed {
            validator.deny(path);
        }

        if let Some(home) = home {
            validator.set_home(&home.to_string_lossy());
        }
        validator
    }

    /// Validator for the running host, including environment-derived system
    /// roots on Windows
    pub fn for_host() -> Self {
        let platform = Platform::current();
        let validator = Self::new(platform, dirs::home_dir().as_deref());
        if platform.is_windows() {
            validator.with_env_denylist(|key| std::env::var(key).ok())
        } else {
            validator
        }
    }

    /// Add the directories named by Windows system environment variables
    pub fn with_env_denylist<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in WINDOWS_ENV_DENYLIST {
            if let Some(value) = env(key).filter(|v| !v.trim().is_empty()) {
                self.deny(&value);
            }
        }
        if let Some(drive) = env("SystemDrive").filter(|v| !v.trim().is_empty()) {
            self.deny(&format!(r"{}\Users", drive.trim_end_matches('\\')));
        }
        self
    }

    /// Extend the denylist with one more exact path
    pub fn with_denied(mut self, path: impl AsRef<Path>) -> Self {
        self.deny(&path.as_ref().to_string_lossy());
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Classify `path`. Any failed check makes it protected.
    pub fn check(&self, path: &Path) -> Verdict {
        let normalized = normalize(self.platform, &path.to_string_lossy());

        if normalized.is_root() {
            return Verdict::Protected(Protection::FilesystemRoot);
        }
        if !normalized.is_absolute() {
            return Verdict::Protected(Protection::NotAbsolute);
        }

        let key = normalized.comparison_key();
        if self.denylist.contains(&key) {
            return Verdict::Protected(Protection::Denylisted);
        }
        if self.home_chain.contains(&key) {
            return Verdict::Protected(Protection::HomeDirectory);
        }
        if normalized.segments() < self.min_segments {
            return Verdict::Protected(Protection::TooShallow);
        }

        Verdict::Safe
    }

    pub fn is_safe(&self, path: &Path) -> bool {
        self.check(path).is_safe()
    }

    fn deny(&mut self, raw: &str) {
        let normalized = normalize(self.platform, raw);
        if normalized.is_absolute() {
            self.denylist.insert(normalized.comparison_key());
        }
    }

    fn set_home(&mut self, raw: &str) {
        let home = normalize(self.platform, raw);
        if !home.is_absolute() {
            return;
        }

        let children = match self.platform {
            Platform::Windows => WINDOWS_HOME_CHILDREN.to_vec(),
            Platform::Linux => UNIX_HOME_CHILDREN.to_vec(),
            Platform::MacOs => UNIX_HOME_CHILDREN
                .iter()
                .chain(MACOS_HOME_CHILDREN.iter())
                .copied()
                .collect(),
        };
        let sep = self.platform.separator();
        let home_str = home.to_string();
        for child in children {
            let joined = format!("{}{}{}", home_str.trim_end_matches(sep), sep, child);
            self.deny(&joined);
        }

        let mut ancestor = home;
        while !ancestor.components.is_empty() {
            self.home_chain.insert(ancestor.comparison_key());
            ancestor.components.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unix() -> SafetyValidator {
        SafetyValidator::new(Platform::Linux, Some(Path::new("/home/alice")))
    }

    fn windows() -> SafetyValidator {
        SafetyValidator::new(Platform::Windows, Some(Path::new(r"C:\Users\alice")))
    }

    fn verdict(v: &SafetyValidator, p: &str) -> Verdict {
        v.check(&PathBuf::from(p))
    }

    #[test]
    fn test_normalize_unix() {
        let n = normalize(Platform::Linux, "/var//log/./../cache/");
        assert_eq!(n.to_string(), "/var/cache");
        assert_eq!(n.segments(), 3);

        assert_eq!(normalize(Platform::Linux, "/../..").to_string(), "/");
        assert_eq!(normalize(Platform::Linux, "a/../../b").to_string(), "../b");
        assert_eq!(normalize(Platform::Linux, "").to_string(), ".");
    }

    #[test]
    fn test_normalize_windows() {
        assert_eq!(
            normalize(Platform::Windows, r"c:/Users//alice\.\AppData\..\AppData").to_string(),
            r"c:\Users\alice\AppData"
        );
        assert_eq!(normalize(Platform::Windows, "C:").to_string(), r"C:\");
        assert_eq!(
            normalize(Platform::Windows, r"\\?\C:\Temp\x").to_string(),
            r"C:\Temp\x"
        );
        let unc = normalize(Platform::Windows, r"\\server\share\cache\x");
        assert_eq!(unc.to_string(), r"\\server\share\cache\x");
        assert_eq!(unc.segments(), 3);
        assert!(!normalize(Platform::Windows, r"C:relative\x").is_absolute());
    }

    #[test]
    fn test_unix_roots_are_protected() {
        let v = unix();
        for p in ["/", "//", "/./", "/..", "/tmp/.."] {
            assert_eq!(
                verdict(&v, p),
                Verdict::Protected(Protection::FilesystemRoot),
                "{p}"
            );
        }
    }

    #[test]
    fn test_windows_roots_are_protected() {
        let v = windows();
        for p in ["C:", r"C:\", "c:/", r"D:\\", r"\\?\C:\", r"\\server\share", r"\"] {
            assert_eq!(
                verdict(&v, p),
                Verdict::Protected(Protection::FilesystemRoot),
                "{p}"
            );
        }
    }

    #[test]
    fn test_unix_denylist_any_case_or_trailing_separator() {
        let v = unix();
        for p in [
            "/etc",
            "/etc/",
            "/ETC",
            "/Etc//",
            "/usr/bin/",
            "/usr//lib",
            "/var/../etc",
            "/usr/local",
            "/var/log",
        ] {
            assert!(!v.is_safe(Path::new(p)), "{p}");
        }
        assert_eq!(
            verdict(&v, "/usr/share/"),
            Verdict::Protected(Protection::Denylisted)
        );
    }

    #[test]
    fn test_windows_denylist_any_case_or_trailing_separator() {
        let v = windows();
        for p in [
            r"C:\Windows",
            r"c:/windows/system32/",
            r"C:\PROGRAM FILES (X86)",
            r"C:\ProgramData\",
            r"C:\Users",
        ] {
            assert!(!v.is_safe(Path::new(p)), "{p}");
        }
    }

    #[test]
    fn test_windows_env_denylist() {
        let v = windows().with_env_denylist(|key| match key {
            "WINDIR" => Some(r"D:\WinRoot".to_string()),
            "SystemDrive" => Some("D:".to_string()),
            _ => None,
        });
        assert_eq!(
            verdict(&v, r"d:\winroot\"),
            Verdict::Protected(Protection::Denylisted)
        );
        assert!(!v.is_safe(Path::new(r"D:\Users")));
        assert!(v.is_safe(Path::new(r"D:\WinRoot\Temp")));
    }

    #[test]
    fn test_home_directory_is_protected() {
        let v = unix();
        for p in [
            "/home/alice",
            "/home/alice/",
            "/HOME/Alice",
            "/home/alice/.cache/..",
        ] {
            assert_eq!(
                verdict(&v, p),
                Verdict::Protected(Protection::HomeDirectory),
                "{p}"
            );
        }

        let w = windows();
        assert_eq!(
            verdict(&w, r"c:\users\ALICE\"),
            Verdict::Protected(Protection::HomeDirectory)
        );
    }

    #[test]
    fn test_home_parents_are_protected() {
        let v = SafetyValidator::new(Platform::Linux, Some(Path::new("/data/users/alice")));
        assert_eq!(
            verdict(&v, "/data/users"),
            Verdict::Protected(Protection::HomeDirectory)
        );
        assert!(v.is_safe(Path::new("/data/users/alice/.cache/pip")));
    }

    #[test]
    fn test_critical_home_children_are_protected() {
        let v = unix();
        for p in ["/home/alice/.cache", "/home/alice/.config/", "/home/alice/Documents"] {
            assert_eq!(verdict(&v, p), Verdict::Protected(Protection::Denylisted), "{p}");
        }

        let w = windows();
        assert!(!w.is_safe(Path::new(r"C:\Users\alice\AppData\Local")));
        assert!(!w.is_safe(Path::new(r"C:\Users\alice\AppData\Roaming\")));
    }

    #[test]
    fn test_shallow_paths_are_protected() {
        let v = unix();
        for p in ["/scratch", "/cache/", "/tmp"] {
            assert!(!v.is_safe(Path::new(p)), "{p}");
        }
        assert_eq!(
            verdict(&v, "/scratch"),
            Verdict::Protected(Protection::TooShallow)
        );
        assert_eq!(
            verdict(&windows(), r"E:\Games"),
            Verdict::Protected(Protection::TooShallow)
        );
    }

    #[test]
    fn test_relative_paths_are_protected() {
        assert_eq!(
            verdict(&unix(), "cache/x/y"),
            Verdict::Protected(Protection::NotAbsolute)
        );
        assert_eq!(
            verdict(&windows(), r"C:cache\x\y"),
            Verdict::Protected(Protection::NotAbsolute)
        );
    }

    #[test]
    fn test_deep_cache_paths_are_safe() {
        let v = unix();
        for p in [
            "/tmp/x-cache",
            "/home/alice/.cache/thumbnails",
            "/home/alice/.cache/mozilla/firefox/abc.default/cache2",
            "/var/log/syslog.log",
            "/scratch/build",
        ] {
            assert_eq!(verdict(&v, p), Verdict::Safe, "{p}");
        }

        let w = windows();
        for p in [
            r"C:\Users\alice\AppData\Local\Temp",
            r"C:\Windows\Temp",
            r"C:\Program Files (x86)\Steam\appcache",
            r"\\server\share\cache\app",
        ] {
            assert_eq!(verdict(&w, p), Verdict::Safe, "{p}");
        }
    }

    #[test]
    fn test_with_denied_extends_denylist() {
        let v = unix().with_denied("/srv/data/important");
        assert!(!v.is_safe(Path::new("/srv/data/important/")));
        assert!(v.is_safe(Path::new("/srv/data/important/cache")));
    }

    #[test]
    fn test_macos_denylist_includes_unix_entries() {
        let v = SafetyValidator::new(Platform::MacOs, Some(Path::new("/Users/alice")));
        assert!(!v.is_safe(Path::new("/etc")));
        assert!(!v.is_safe(Path::new("/private/var")));
        assert!(!v.is_safe(Path::new("/Users/alice/Library/Caches")));
        assert!(v.is_safe(Path::new("/Users/alice/Library/Caches/pip")));
    }
}
