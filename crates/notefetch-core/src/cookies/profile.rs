//! Browser profile lookup.

use std::path::{Path, PathBuf};

use crate::error::EnrichError;

/// Profile directory name patterns, highest priority first.
const DEFAULT_PATTERNS: [&str; 2] = ["*.default-release", "*.default"];

/// Where Firefox keeps profiles for the current user.
pub fn default_profiles_root() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    if cfg!(target_os = "macos") {
        Some(
            home.join("Library")
                .join("Application Support")
                .join("Firefox")
                .join("Profiles"),
        )
    } else {
        Some(home.join(".mozilla").join("firefox"))
    }
}

/// Finds a profile directory under an injectable root.
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    root: PathBuf,
    patterns: Vec<String>,
}

impl Default for ProfileLocator {
    fn default() -> Self {
        Self::new(default_profiles_root().unwrap_or_default())
    }
}

impl ProfileLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replaces the name patterns (priority order).
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `explicit` unchanged when it exists; otherwise the first match of
    /// the first pattern that matches anything. Among several matches of one
    /// pattern the choice follows directory iteration order.
    pub fn find_profile(&self, explicit: Option<&Path>) -> Result<PathBuf, EnrichError> {
        if let Some(path) = explicit {
            let path = expand_home(path);
            if !path.exists() {
                return Err(EnrichError::ProfileNotFound(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            return Ok(path);
        }

        let escaped_root = glob::Pattern::escape(&self.root.to_string_lossy());
        for pattern in &self.patterns {
            let full = format!("{}/{}", escaped_root, pattern);
            let paths = match glob::glob(&full) {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!(pattern = %full, "invalid profile pattern: {}", e);
                    continue;
                }
            };
            if let Some(found) = paths.flatten().find(|p| p.is_dir()) {
                tracing::debug!(profile = %found.display(), pattern = %pattern, "found browser profile");
                return Ok(found);
            }
        }

        Err(EnrichError::ProfileNotFound(format!(
            "no profile under {}; launch the browser once to create one",
            self.root.display()
        )))
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_path_returned_unchanged() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("abc.default-release")).unwrap();
        let explicit = tempfile::tempdir().unwrap();
        let locator = ProfileLocator::new(root.path());
        let found = locator.find_profile(Some(explicit.path())).unwrap();
        assert_eq!(found, explicit.path());
    }

    #[test]
    fn explicit_missing_path_errors() {
        let locator = ProfileLocator::new("/nonexistent-root");
        let err = locator
            .find_profile(Some(Path::new("/nonexistent-root/profile")))
            .unwrap_err();
        assert!(matches!(err, EnrichError::ProfileNotFound(_)));
    }

    #[test]
    fn release_profile_wins_over_default() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("aaa.default")).unwrap();
        fs::create_dir(root.path().join("zzz.default-release")).unwrap();
        let found = ProfileLocator::new(root.path()).find_profile(None).unwrap();
        assert_eq!(found, root.path().join("zzz.default-release"));
    }

    #[test]
    fn falls_back_to_second_pattern() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("k2j.default")).unwrap();
        fs::create_dir(root.path().join("unrelated")).unwrap();
        let found = ProfileLocator::new(root.path()).find_profile(None).unwrap();
        assert_eq!(found, root.path().join("k2j.default"));
    }

    #[test]
    fn empty_root_is_profile_not_found() {
        let root = tempfile::tempdir().unwrap();
        let err = ProfileLocator::new(root.path()).find_profile(None).unwrap_err();
        assert!(matches!(err, EnrichError::ProfileNotFound(_)));
    }

    #[test]
    fn custom_patterns() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("work")).unwrap();
        let found = ProfileLocator::new(root.path())
            .with_patterns(["work"])
            .find_profile(None)
            .unwrap();
        assert_eq!(found, root.path().join("work"));
    }
}
