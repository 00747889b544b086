//! Path catalog: the fixed, ordered list of paths probed on every target.

/// Built-in probe paths. The site root comes first and cheap, high-signal
/// files precede admin and install paths.
const BUILTIN_PATHS: &[&str] = &[
    "",
    "robots.txt",
    "sitemap.xml",
    "readme.html",
    "license.txt",
    "admin",
    "login",
    "wp-admin",
    "joomla/administrator",
    "user/login",
    "index.php",
    "config.php",
    "CHANGELOG.txt",
    "admin/config",
    "admin/index.php",
    "install.php",
    "sites/default/settings.php",
    "adminer.php",
    "phpinfo.php",
    "feed",
    "install",
    "LICENSE",
    "SECURITY.txt",
    "UPGRADE.txt",
    "version.txt",
];

/// Ordered sequence of path suffixes. An empty path means the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCatalog {
    paths: Vec<String>,
}

impl Default for PathCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PathCatalog {
    pub fn builtin() -> Self {
        Self {
            paths: BUILTIN_PATHS.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Builds a custom catalog. Leading slashes are dropped so every path is
    /// relative to the target base.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| p.into().trim().trim_start_matches('/').to_string())
                .collect(),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
