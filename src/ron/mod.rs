//! Utilities for loading RON files and watching directories for changes.
//!
//! A small helper for reading RON files from disk plus a filesystem watcher
//! resource that sets a shared boolean when files change. The watcher backs
//! hot-reloading of RON configuration (settings) during development.

use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    /// Shared flag set to `true` when a watched file changes.
    pub changed: Arc<Mutex<bool>>,
    // Watcher handle kept alive to prevent immediate drop.
    _watcher: Option<RecommendedWatcher>,
}

impl RonWatcher {
    /// A `RonWatcher` without an active OS watcher. Used as a fallback when
    /// watcher creation fails.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files that fail to parse are skipped with a warning on stderr; a missing
/// or unreadable directory yields an empty list.
///
/// # Arguments
/// * `path` - directory path to scan for `.ron` files
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    let Ok(entries) = std::fs::read_dir(path) else {
        return items;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "ron") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        match ron::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => eprintln!("Failed to parse {}: {e:?}", path.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// The returned watcher's `changed` flag is set when a modification event
/// for a path under the watched directory is observed.
///
/// # Arguments
/// * `path` - directory path to watch for `.ron` file changes
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or registered for the provided path.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Canonical form of the watched path so events can be filtered against it
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p)
                        .unwrap_or_else(|_| p.clone())
                        .starts_with(&watched_path)
                });
                if relevant
                    && let Ok(mut flag) = changed_clone.lock()
                {
                    *flag = true;
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher {
        changed,
        _watcher: Some(watcher),
    })
}
