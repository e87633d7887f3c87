use glob::Pattern;

use crate::platform::Platform;

/// A named cache target and the glob patterns that locate it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Human-readable target name shown in the menu
    pub name: String,
    /// Glob patterns, possibly starting with `~/` and containing `*` segments
    pub patterns: Vec<String>,
}

impl CatalogEntry {
    pub fn new<I, S>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable, OS-conditioned table of cache targets
#[derive(Debug, Clone)]
pub struct Catalog {
    platform: Platform,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build the catalog for the running host from the process environment
    pub fn for_host() -> Self {
        Self::for_platform(Platform::current(), |key| std::env::var(key).ok())
    }

    /// Build the catalog for `platform`, looking up base directories through `env`
    pub fn for_platform<F>(platform: Platform, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let entries = match platform {
            Platform::Windows => windows_entries(&env),
            Platform::MacOs => macos_entries(),
            Platform::Linux => linux_entries(),
        };
        Self { platform, entries }
    }

    /// Build a catalog from explicit entries
    pub fn from_entries(platform: Platform, entries: Vec<CatalogEntry>) -> Self {
        Self { platform, entries }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Join a glob-escaped base directory with a relative pattern using `sep`.
/// Returns None when the base is unknown so no cwd-relative pattern is produced.
fn under(base: Option<&str>, rel: &str, sep: char) -> Option<String> {
    let base = base.filter(|b| !b.trim().is_empty())?;
    let base = Pattern::escape(base.trim_end_matches(['/', '\\']));
    let rel: String = rel
        .chars()
        .map(|c| if c == '/' { sep } else { c })
        .collect();
    Some(format!("{}{}{}", base, sep, rel))
}

fn home_pattern(rel: &str, sep: char) -> String {
    let rel: String = rel
        .chars()
        .map(|c| if c == '/' { sep } else { c })
        .collect();
    format!("~{}{}", sep, rel)
}

fn windows_entries<F>(env: &F) -> Vec<CatalogEntry>
where
    F: Fn(&str) -> Option<String>,
{
    const SEP: char = '\\';

    let win_dir = env("WINDIR");
    let local_dir = env("LOCALAPPDATA");
    let roaming_dir = env("APPDATA");
    let program_files = env("ProgramFiles");
    let program_files_x86 = env("ProgramFiles(x86)");

    let win = |rel: &str| under(win_dir.as_deref(), rel, SEP);
    let local = |rel: &str| under(local_dir.as_deref(), rel, SEP);
    let roaming = |rel: &str| under(roaming_dir.as_deref(), rel, SEP);
    let pf = |rel: &str| under(program_files.as_deref(), rel, SEP);
    let pf86 = |rel: &str| under(program_files_x86.as_deref(), rel, SEP);

    let entry = |name: &str, patterns: Vec<Option<String>>| {
        CatalogEntry::new(name, patterns.into_iter().flatten())
    };

    vec![
        entry("System Logs (Admin)", vec![win("Panther"), win("Logs")]),
        entry("System Temp Folders (Admin)", vec![win("Temp")]),
        entry(
            "Update Logs (Admin)",
            vec![win("SoftwareDistribution/Download")],
        ),
        entry("User Temp Folder", vec![local("Temp")]),
        entry(
            "Thumbnail Cache",
            vec![local("Microsoft/Windows/Explorer")],
        ),
        entry(
            "Firefox Cache",
            vec![
                local("Mozilla/Firefox/Profiles/*/cache2"),
                local("Mozilla/Firefox/Profiles/*/jumpListCache"),
                roaming("Mozilla/Firefox/Profiles/*/shader-cache"),
            ],
        ),
        entry(
            "Chrome Cache",
            vec![
                local("Google/Chrome/User Data/Default/Cache"),
                local("Google/Chrome/User Data/Default/Code Cache"),
                local("Google/Chrome/User Data/*/Cache"),
                local("Google/Chrome/User Data/Default/Media Cache"),
            ],
        ),
        entry(
            "Edge Cache",
            vec![
                local("Microsoft/Edge/User Data/Default/Cache"),
                local("Microsoft/Edge/User Data/*/Cache"),
                local("Microsoft/Edge/User Data/Default/Media Cache"),
            ],
        ),
        entry(
            "Brave Cache",
            vec![
                local("BraveSoftware/Brave-Browser/User Data/Default/Cache"),
                local("BraveSoftware/Brave-Browser/User Data/*/Cache"),
                local("BraveSoftware/Brave-Browser/User Data/Default/Media Cache"),
            ],
        ),
        entry(
            "Opera Cache",
            vec![
                local("Opera Software/Opera Stable/Cache"),
                local("Opera Software/Opera Stable/Code Cache"),
            ],
        ),
        entry(
            "Thunderbird Cache",
            vec![local("Thunderbird/Profiles/*/cache2")],
        ),
        entry(
            "Steam AppCache",
            vec![pf86("Steam/appcache"), pf("Steam/appcache")],
        ),
        entry(
            "Epic Games Cache",
            vec![local("EpicGamesLauncher/Saved/webcache")],
        ),
        entry(
            "Discord Cache",
            vec![
                roaming("discord/Cache"),
                roaming("discord/Code Cache"),
                roaming("discord/GPUCache"),
            ],
        ),
        entry("Spotify Storage", vec![local("Spotify/Storage")]),
        entry(
            "VS Code Cache",
            vec![
                roaming("Code/Cache"),
                roaming("Code/CachedData"),
                roaming("Code/CachedExtensionVSIXs"),
                roaming("Code/User/workspaceStorage"),
                roaming("Code/GPUCache"),
            ],
        ),
        entry(
            "DirectX Shader Cache",
            vec![local("D3DSCache"), local("NVIDIA/GLCache")],
        ),
        entry("Go Build Cache", vec![local("go-build")]),
        entry("Pip Cache", vec![local("pip/Cache")]),
        entry("NPM Cache", vec![roaming("npm-cache/_cacache")]),
        entry(
            "Yarn Cache",
            vec![local("Yarn/Cache"), roaming("Yarn/Cache")],
        ),
        CatalogEntry::new(
            "Cargo Cache",
            [
                home_pattern(".cargo/registry/cache", SEP),
                home_pattern(".cargo/git/db", SEP),
            ],
        ),
    ]
}

fn linux_entries() -> Vec<CatalogEntry> {
    let home = |rel: &str| home_pattern(rel, '/');

    vec![
        CatalogEntry::new("System Logs (Root)", ["/var/log/*.log".to_string()]),
        CatalogEntry::new("Thumbnail Cache", [home(".cache/thumbnails")]),
        CatalogEntry::new(
            "Firefox Cache",
            [home(".cache/mozilla/firefox/*/cache2")],
        ),
        CatalogEntry::new(
            "Chromium Cache",
            [
                home(".cache/chromium/*/Cache"),
                home(".cache/chromium/*/Code Cache"),
            ],
        ),
        CatalogEntry::new(
            "Chrome Cache",
            [
                home(".cache/google-chrome/*/Cache"),
                home(".cache/google-chrome/*/Code Cache"),
            ],
        ),
        CatalogEntry::new(
            "Edge Cache",
            [
                home(".cache/microsoft-edge/*/Cache"),
                home(".cache/microsoft-edge/*/Code Cache"),
            ],
        ),
        CatalogEntry::new(
            "Brave Cache",
            [
                home(".cache/BraveSoftware/Brave-Browser/*/Cache"),
                home(".cache/BraveSoftware/Brave-Browser/*/Code Cache"),
            ],
        ),
        CatalogEntry::new(
            "Opera Cache",
            [home(".cache/opera/Cache"), home(".config/opera/Cache")],
        ),
        CatalogEntry::new("Thunderbird Cache", [home(".cache/thunderbird/*/cache2")]),
        CatalogEntry::new(
            "Steam Cache",
            [
                home(".steam/steam/appcache"),
                home(".local/share/Steam/appcache"),
                home(".local/share/Steam/config/htmlcache"),
            ],
        ),
        CatalogEntry::new(
            "Epic Games (Heroic/Lutris) Cache",
            [
                home(".config/heroic/WebCache"),
                home(".local/share/lutris/runtime"),
            ],
        ),
        CatalogEntry::new(
            "Discord Cache",
            [
                home(".config/discord/Cache"),
                home(".config/discord/Code Cache"),
                home(".config/discord/GPUCache"),
            ],
        ),
        CatalogEntry::new("Spotify Cache", [home(".cache/spotify")]),
        CatalogEntry::new(
            "VS Code Cache",
            [
                home(".config/Code/Cache"),
                home(".config/Code/CachedData"),
                home(".config/Code/User/workspaceStorage"),
                home(".config/Code/GPUCache"),
            ],
        ),
        CatalogEntry::new("Mesa Shader Cache", [home(".cache/mesa_shader_cache")]),
        CatalogEntry::new("Go Build Cache", [home(".cache/go-build")]),
        CatalogEntry::new("Pip Cache", [home(".cache/pip")]),
        CatalogEntry::new("NPM Cache", [home(".npm/_cacache")]),
        CatalogEntry::new("Yarn Cache", [home(".cache/yarn")]),
        CatalogEntry::new(
            "Cargo Cache",
            [home(".cargo/registry/cache"), home(".cargo/git/db")],
        ),
    ]
}

fn macos_entries() -> Vec<CatalogEntry> {
    let home = |rel: &str| home_pattern(rel, '/');

    vec![
        CatalogEntry::new(
            "Firefox Cache",
            [home("Library/Caches/Firefox/Profiles/*/cache2")],
        ),
        CatalogEntry::new(
            "Chrome Cache",
            [
                home("Library/Caches/Google/Chrome/*/Cache"),
                home("Library/Caches/Google/Chrome/*/Code Cache"),
            ],
        ),
        CatalogEntry::new(
            "Edge Cache",
            [home("Library/Caches/Microsoft Edge/*/Cache")],
        ),
        CatalogEntry::new(
            "Brave Cache",
            [home("Library/Caches/BraveSoftware/Brave-Browser/*/Cache")],
        ),
        CatalogEntry::new(
            "Discord Cache",
            [
                home("Library/Application Support/discord/Cache"),
                home("Library/Application Support/discord/Code Cache"),
                home("Library/Application Support/discord/GPUCache"),
            ],
        ),
        CatalogEntry::new(
            "Spotify Cache",
            [home("Library/Caches/com.spotify.client/Data")],
        ),
        CatalogEntry::new(
            "VS Code Cache",
            [
                home("Library/Application Support/Code/Cache"),
                home("Library/Application Support/Code/CachedData"),
                home("Library/Application Support/Code/User/workspaceStorage"),
            ],
        ),
        CatalogEntry::new("Go Build Cache", [home("Library/Caches/go-build")]),
        CatalogEntry::new("Pip Cache", [home("Library/Caches/pip")]),
        CatalogEntry::new("NPM Cache", [home(".npm/_cacache")]),
        CatalogEntry::new("Yarn Cache", [home("Library/Caches/Yarn")]),
        CatalogEntry::new(
            "Cargo Cache",
            [home(".cargo/registry/cache"), home(".cargo/git/db")],
        ),
    ]
}
