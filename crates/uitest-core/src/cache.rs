//! App cache cleanup between tests.
//!
//! Wipes everything inside the app's cache directory while keeping the
//! directory itself. Every filesystem operation runs under the retry helper
//! because files may still be held open by the app for a moment after it
//! stops.

use crate::result::{UiTestError, UiTestResult};
use crate::wait::{wait_for, WaitOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Application context exposing the cache directory
pub trait AppContext {
    /// The app's cache directory
    fn cache_dir(&self) -> PathBuf;
}

impl<T: AppContext + ?Sized> AppContext for &T {
    fn cache_dir(&self) -> PathBuf {
        (**self).cache_dir()
    }
}

impl<T: AppContext + ?Sized> AppContext for Arc<T> {
    fn cache_dir(&self) -> PathBuf {
        (**self).cache_dir()
    }
}

/// Fixed cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAppContext {
    cache_dir: PathBuf,
}

impl StaticAppContext {
    /// Context whose cache lives at `cache_dir`
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }
}

impl AppContext for StaticAppContext {
    fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone()
    }
}

/// Cache cleanup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Retry budget for each deletion
    pub delete: WaitOptions,
    /// File names left untouched wherever they appear
    pub excludes: Vec<String>,
}

impl CacheConfig {
    /// Add an excluded file name
    #[must_use]
    pub fn with_exclude(mut self, name: impl Into<String>) -> Self {
        self.excludes.push(name.into());
        self
    }

    /// Set the retry budget
    #[must_use]
    pub const fn with_delete_options(mut self, options: WaitOptions) -> Self {
        self.delete = options;
        self
    }

    /// Validate the retry budget
    pub fn validate(&self) -> UiTestResult<()> {
        self.delete.validate()
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.excludes.iter().any(|e| e == name))
    }
}

/// Outcome of [`Cache::clear`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheClearReport {
    /// Entries deleted, nested ones included
    pub removed: usize,
    /// Excluded entries left in place
    pub preserved: usize,
}

/// Cache directory of the app under test
#[derive(Debug, Clone)]
pub struct Cache<C> {
    context: C,
    config: CacheConfig,
}

impl<C: AppContext> Cache<C> {
    /// Cache with default settings
    #[must_use]
    pub fn new(context: C) -> Self {
        Self::with_config(context, CacheConfig::default())
    }

    /// Cache with explicit settings
    #[must_use]
    pub const fn with_config(context: C, config: CacheConfig) -> Self {
        Self { context, config }
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Delete everything inside the cache directory except excluded entries
    ///
    /// A cache directory that cannot be listed (missing, not a directory) is
    /// left alone. Directories holding excluded entries are kept.
    pub fn clear(&self) -> UiTestResult<CacheClearReport> {
        self.config.validate()?;
        let dir = self.context.cache_dir();
        let entries = match list_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "cache directory not listable, nothing to clear");
                return Ok(CacheClearReport::default());
            }
        };

        let mut report = CacheClearReport::default();
        for entry in entries {
            self.remove_entry(&entry, &mut report)?;
        }
        info!(
            dir = %dir.display(),
            removed = report.removed,
            preserved = report.preserved,
            "cache cleared"
        );
        Ok(report)
    }

    /// Remove `path` recursively; `false` when something had to be kept
    fn remove_entry(&self, path: &Path, report: &mut CacheClearReport) -> UiTestResult<bool> {
        if self.config.is_excluded(path) {
            report.preserved += 1;
            return Ok(false);
        }

        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(delete_error(path, &e)),
        };

        if metadata.is_dir() {
            let children = self.retry(path, || list_dir(path))?;
            let mut emptied = true;
            for child in children {
                emptied &= self.remove_entry(&child, report)?;
            }
            if !emptied {
                return Ok(false);
            }
            self.retry(path, || ignore_missing(fs::remove_dir(path)))?;
        } else {
            // symlinks land here too and are unlinked, never followed
            self.retry(path, || ignore_missing(fs::remove_file(path)))?;
        }
        report.removed += 1;
        Ok(true)
    }

    fn retry<T>(&self, path: &Path, mut op: impl FnMut() -> io::Result<T>) -> UiTestResult<T> {
        wait_for(&self.config.delete, || op().map_err(|e| delete_error(path, &e)))
    }
}

fn list_dir(dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect()
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn delete_error(path: &Path, error: &io::Error) -> UiTestError {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let dir = path.parent().unwrap_or(path);
    UiTestError::assertion(format!(
        "Can't delete file {name} in {}: {error}",
        dir.display()
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fast() -> WaitOptions {
        WaitOptions::new().with_frequency(1).with_timeout(3)
    }

    fn populate(root: &Path) {
        fs::write(root.join("a.bin"), b"aaaa").unwrap();
        fs::create_dir_all(root.join("images/thumbs")).unwrap();
        fs::write(root.join("images/one.png"), b"png").unwrap();
        fs::write(root.join("images/thumbs/one.png"), b"thumb").unwrap();
        fs::create_dir(root.join("empty")).unwrap();
    }

    fn remaining(root: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    mod clear_tests {
        use super::*;

        #[test]
        fn test_clear_keeps_root_and_removes_everything() {
            let tmp = TempDir::new().unwrap();
            populate(tmp.path());
            let cache = Cache::new(StaticAppContext::new(tmp.path()));
            let report = cache.clear().unwrap();
            assert!(tmp.path().is_dir());
            assert!(remaining(tmp.path()).is_empty());
            assert_eq!(report.removed, 6);
            assert_eq!(report.preserved, 0);
        }

        #[test]
        fn test_missing_dir_is_noop() {
            let tmp = TempDir::new().unwrap();
            let cache = Cache::new(StaticAppContext::new(tmp.path().join("absent")));
            assert_eq!(cache.clear().unwrap(), CacheClearReport::default());
        }

        #[test]
        fn test_file_instead_of_dir_is_noop() {
            let tmp = TempDir::new().unwrap();
            let file = tmp.path().join("cache");
            fs::write(&file, b"not a dir").unwrap();
            let cache = Cache::new(StaticAppContext::new(&file));
            cache.clear().unwrap();
            assert_eq!(fs::read(&file).unwrap(), b"not a dir");
        }

        #[test]
        fn test_excluded_entries_survive_byte_identical() {
            let tmp = TempDir::new().unwrap();
            populate(tmp.path());
            fs::write(tmp.path().join("keep.db"), b"\x00\x01state").unwrap();
            fs::write(tmp.path().join("images/keep.db"), b"nested").unwrap();
            let config = CacheConfig::default()
                .with_exclude("keep.db")
                .with_delete_options(fast());
            let report = Cache::with_config(StaticAppContext::new(tmp.path()), config)
                .clear()
                .unwrap();
            assert_eq!(remaining(tmp.path()), vec!["images", "keep.db"]);
            assert_eq!(remaining(&tmp.path().join("images")), vec!["keep.db"]);
            assert_eq!(fs::read(tmp.path().join("keep.db")).unwrap(), b"\x00\x01state");
            assert_eq!(fs::read(tmp.path().join("images/keep.db")).unwrap(), b"nested");
            assert_eq!(report.preserved, 2);
        }

        #[cfg(unix)]
        #[test]
        fn test_symlinks_are_not_followed() {
            let tmp = TempDir::new().unwrap();
            let outside = TempDir::new().unwrap();
            fs::write(outside.path().join("precious.txt"), b"keep me").unwrap();
            std::os::unix::fs::symlink(outside.path(), tmp.path().join("link")).unwrap();
            Cache::new(StaticAppContext::new(tmp.path())).clear().unwrap();
            assert!(remaining(tmp.path()).is_empty());
            assert_eq!(
                fs::read(outside.path().join("precious.txt")).unwrap(),
                b"keep me"
            );
        }

        #[test]
        fn test_invalid_delete_options_rejected() {
            let tmp = TempDir::new().unwrap();
            let config =
                CacheConfig::default().with_delete_options(WaitOptions::new().with_frequency(0));
            let err = Cache::with_config(StaticAppContext::new(tmp.path()), config)
                .clear()
                .unwrap_err();
            assert!(matches!(err, UiTestError::InvalidWaitOptions { .. }));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_failed_delete_reports_name_and_dir() {
            let tmp = TempDir::new().unwrap();
            let full = tmp.path().join("full");
            fs::create_dir(&full).unwrap();
            fs::write(full.join("x"), b"x").unwrap();
            let cache = Cache::with_config(
                StaticAppContext::new(tmp.path()),
                CacheConfig::default().with_delete_options(fast()),
            );
            let err = cache.retry(&full, || fs::remove_dir(&full)).unwrap_err();
            let message = err.to_string();
            assert!(message.starts_with(&format!(
                "Assertion failed: Can't delete file full in {}:",
                tmp.path().display()
            )));
            assert!(full.join("x").exists());
        }

        #[cfg(unix)]
        #[test]
        fn test_clear_fails_on_read_only_directory() {
            use std::os::unix::fs::PermissionsExt;

            let tmp = TempDir::new().unwrap();
            let locked = tmp.path().join("locked");
            fs::create_dir(&locked).unwrap();
            fs::write(locked.join("x"), b"x").unwrap();
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

            // root ignores directory permissions
            let canary = locked.join("canary");
            if fs::write(&canary, b"").is_ok() {
                fs::remove_file(&canary).unwrap();
                fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
                return;
            }

            let result = Cache::with_config(
                StaticAppContext::new(tmp.path()),
                CacheConfig::default().with_delete_options(fast()),
            )
            .clear();
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

            let message = result.unwrap_err().to_string();
            assert!(message.starts_with(&format!(
                "Assertion failed: Can't delete file x in {}:",
                locked.display()
            )));
            assert!(locked.join("x").exists());
        }

        #[test]
        fn test_huge_delete_timeout_is_accepted() {
            let tmp = TempDir::new().unwrap();
            fs::write(tmp.path().join("a.bin"), b"a").unwrap();
            let config = CacheConfig::default()
                .with_delete_options(WaitOptions::new().with_frequency(2).with_timeout(u64::MAX));
            let report = Cache::with_config(StaticAppContext::new(tmp.path()), config)
                .clear()
                .unwrap();
            assert_eq!(report.removed, 1);
        }
    }

    #[test]
    fn test_context_impls() {
        let ctx = StaticAppContext::new("/data/cache");
        let shared: Arc<dyn AppContext> = Arc::new(ctx.clone());
        assert_eq!((&ctx).cache_dir(), PathBuf::from("/data/cache"));
        assert_eq!(shared.cache_dir(), PathBuf::from("/data/cache"));
        let _ = Cache::new(shared);
    }
}
