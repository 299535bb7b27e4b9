//! Snapshot Store
//!
//! Append-only persistence for sweep snapshots and alert reports, under two
//! flat namespaces (`wallets/`, `alerts/`) in the data directory. Records are
//! keyed by a minute-granularity UTC timestamp; "latest" is always the
//! lexicographically last file. There is no index or manifest.
//!
//! Single-writer assumption: at most one sweep runs at a time. Concurrent
//! sweeps could race on "latest"; that is an accepted limitation of this
//! store, not something it guards against.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::domain::observation::Snapshot;

const SNAPSHOT_PREFIX: &str = "snapshot-";
const ALERT_PREFIX: &str = "alert-";
const TIMESTAMP_FMT: &str = "%Y%m%d-%H%M";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupted snapshot {path}: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// File-backed store for snapshots and archived alert reports
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshots_dir: PathBuf,
    alerts_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            snapshots_dir: data_dir.join("wallets"),
            alerts_dir: data_dir.join("alerts"),
        }
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }

    pub fn alerts_dir(&self) -> &Path {
        &self.alerts_dir
    }

    /// Persist a snapshot as a new minute-keyed record.
    ///
    /// Never overwrites: a name collision within the same minute gets a
    /// `_02`, `_03`, ... suffix. `_` sorts after `.` in ASCII, so suffixed
    /// records stay lexicographically newer than the base name and "latest"
    /// keeps meaning the most recent write.
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.snapshots_dir).map_err(|e| io_err(&self.snapshots_dir, e))?;

        let stamp = Utc::now().format(TIMESTAMP_FMT).to_string();
        let path = self.unique_path(&self.snapshots_dir, SNAPSHOT_PREFIX, &stamp, "json");

        let mut body = serde_json::to_string_pretty(snapshot)?;
        body.push('\n');
        fs::write(&path, body).map_err(|e| io_err(&path, e))?;

        tracing::info!(path = %path.display(), "snapshot written");
        Ok(path)
    }

    /// Most recent snapshot, or the empty snapshot when none exists.
    ///
    /// The empty case is the expected state on a first run; only a present
    /// but unreadable/undecodable record is an error.
    pub fn latest_snapshot(&self) -> Result<Snapshot, StoreError> {
        let Some(path) = self.latest_file(&self.snapshots_dir, SNAPSHOT_PREFIX)? else {
            return Ok(Snapshot::default());
        };

        let body = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        serde_json::from_str(&body).map_err(|source| StoreError::Corrupted { path, source })
    }

    /// Archive a rendered report after at least one alert fired
    pub fn archive_alert_report(&self, report: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.alerts_dir).map_err(|e| io_err(&self.alerts_dir, e))?;

        let stamp = Utc::now().format(TIMESTAMP_FMT).to_string();
        let path = self.unique_path(&self.alerts_dir, ALERT_PREFIX, &stamp, "md");

        let mut body = report.to_string();
        if !body.ends_with('\n') {
            body.push('\n');
        }
        fs::write(&path, body).map_err(|e| io_err(&path, e))?;

        tracing::info!(path = %path.display(), "alert report archived");
        Ok(path)
    }

    fn unique_path(&self, dir: &Path, prefix: &str, stamp: &str, ext: &str) -> PathBuf {
        let base = dir.join(format!("{prefix}{stamp}.{ext}"));
        if !base.exists() {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = dir.join(format!("{prefix}{stamp}_{n:02}.{ext}"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }

    fn latest_file(&self, dir: &Path, prefix: &str) -> Result<Option<PathBuf>, StoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(dir, e)),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort();

        Ok(names.pop().map(|name| dir.join(name)))
    }
}
