// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_HISTORY_CAPACITY;

const HISTORY_FORMAT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,
    /// Also syncs the file and, on unix, its directory.
    Durable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub label: String,
    /// Where the data came from: a file path or a directory query.
    pub source: String,
    #[serde(default)]
    pub opened_at_ms: u64,
}

/// Most recently opened sources, newest first, at most `capacity` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, label: impl Into<String>, source: impl Into<String>) {
        let opened_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        self.push_entry(HistoryEntry {
            label: label.into(),
            source: source.into(),
            opened_at_ms,
        });
    }

    /// Puts `entry` in front. An older entry with the same source is replaced; blank sources are
    /// ignored.
    pub fn push_entry(&mut self, entry: HistoryEntry) {
        let source = entry.source.trim();
        if source.is_empty() {
            return;
        }
        self.entries.retain(|existing| existing.source.trim() != source);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn remove(&mut self, source: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.source.trim() != source.trim());
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryJson {
    version: u32,
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// JSON file backing a [`RecentHistory`].
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the history, keeping at most `capacity` entries. A missing file is an empty history.
    pub fn load(&self, capacity: usize) -> Result<RecentHistory, StoreError> {
        let mut history = RecentHistory::new(capacity);
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(history),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let parsed: HistoryJson = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        if parsed.version != HISTORY_FORMAT_VERSION {
            tracing::warn!(
                path = ?self.path,
                version = parsed.version,
                "history.load: unknown version"
            );
        }
        // Stored newest first; replay oldest first so dedupe keeps the newest.
        for entry in parsed.entries.into_iter().rev() {
            history.push_entry(entry);
        }
        Ok(history)
    }

    pub fn save(&self, history: &RecentHistory) -> Result<(), StoreError> {
        let json = HistoryJson {
            version: HISTORY_FORMAT_VERSION,
            entries: history.entries.clone(),
        };
        let mut contents =
            serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        contents.push('\n');
        write_atomic(&self.path, contents.as_bytes(), self.durability)?;
        tracing::debug!(path = ?self.path, entries = history.len(), "history.save");
        Ok(())
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn fill_temp(mut file: fs::File, contents: &[u8], durability: WriteDurability) -> io::Result<()> {
    file.write_all(contents)?;
    if durability == WriteDurability::Durable {
        file.sync_all()?;
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Writes `contents` to a sibling temp file and renames it over `path`.
pub(crate) fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(io_error(path)(source)),
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        let source = io::Error::new(io::ErrorKind::InvalidInput, "path has no file name");
        return Err(io_error(path)(source));
    };
    fs::create_dir_all(parent).map_err(io_error(parent))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".orgview.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_error(&tmp_path))?;
    let written = fill_temp(file, contents, durability)
        .map_err(io_error(&tmp_path))
        .and_then(|()| rename_overwrite(&tmp_path, path).map_err(io_error(path)));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(io_error(parent))?;
            dir.sync_all().map_err(io_error(parent))?;
        }
    }

    Ok(())
}
