//! Forest persistence: delimited source files and binary snapshots
//!
//! Two independent formats:
//! - source (read-only): `<source_dir>/<name>.csv`, one tree per line,
//!   `SPECIES,YEAR,HEIGHT,RATE`, no header
//! - snapshot (read/write): `<snapshot_dir>/<name>.db`, see [`snapshot`]

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::snapshot;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Forest, Tree, TreeSpecies};
use crate::infrastructure::traits::FileSystem;

/// Result of loading a source file.
///
/// A malformed line stops parsing at that line; trees accumulated before it
/// are kept, and the offending line is reported here rather than discarding
/// the whole forest.
#[derive(Debug)]
pub struct SourceLoad {
    pub forest: Forest,
    pub malformed: Option<MalformedLine>,
}

/// First source line that failed to parse.
#[derive(Debug)]
pub struct MalformedLine {
    /// 1-based line number within the source file.
    pub line_no: usize,
    pub reason: String,
}

/// File-backed store for forests.
pub struct ForestStore {
    fs: Arc<dyn FileSystem>,
    source_dir: PathBuf,
    snapshot_dir: PathBuf,
}

impl ForestStore {
    pub fn new(fs: Arc<dyn FileSystem>, source_dir: PathBuf, snapshot_dir: PathBuf) -> Self {
        Self {
            fs,
            source_dir,
            snapshot_dir,
        }
    }

    /// Path of the source file backing `name`.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.source_dir.join(format!("{name}.csv"))
    }

    /// Path of the snapshot file backing `name`.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshot_dir.join(format!("{name}.db"))
    }

    /// Load a forest from its delimited source file.
    ///
    /// Missing or unreadable files are an error; a malformed line is not
    /// (the partial forest is still returned, see [`SourceLoad`]).
    pub fn load_source(&self, name: &str) -> ApplicationResult<SourceLoad> {
        let path = self.source_path(name);
        debug!("load_source: {}", path.display());

        let content = self.fs.read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApplicationError::SourceNotFound { path: path.clone() }
            } else {
                ApplicationError::SourceUnreadable {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        let mut forest = Forest::new(name);
        let mut malformed = None;
        for (i, line) in content.lines().enumerate() {
            match parse_source_line(line) {
                Ok(tree) => forest.add_tree(tree),
                Err(reason) => {
                    malformed = Some(MalformedLine {
                        line_no: i + 1,
                        reason,
                    });
                    break;
                }
            }
        }

        debug!("load_source: {} trees from {}", forest.len(), path.display());
        Ok(SourceLoad { forest, malformed })
    }

    /// Write a forest's snapshot, returning the path written.
    pub fn save_snapshot(&self, forest: &Forest) -> ApplicationResult<PathBuf> {
        let path = self.snapshot_path(forest.name());
        debug!("save_snapshot: {}", path.display());
        let bytes = snapshot::encode(forest)?;
        self.fs
            .write(&path, &bytes)
            .map_err(|e| ApplicationError::SnapshotWrite {
                path: path.clone(),
                source: e,
            })?;
        Ok(path)
    }

    /// Reconstruct a forest from its snapshot.
    pub fn load_snapshot(&self, name: &str) -> ApplicationResult<Forest> {
        let path = self.snapshot_path(name);
        debug!("load_snapshot: {}", path.display());
        let bytes = self
            .fs
            .read(&path)
            .map_err(|e| ApplicationError::SnapshotRead {
                path: path.clone(),
                source: e,
            })?;
        snapshot::decode(&bytes)
    }

    /// Whether a source file exists for `name`.
    pub fn source_exists(&self, name: &str) -> bool {
        self.fs.exists(&self.source_path(name))
    }
}

/// Parse one `SPECIES,YEAR,HEIGHT,RATE` source line.
fn parse_source_line(line: &str) -> Result<Tree, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let species: TreeSpecies = fields[0].parse().map_err(|e| format!("{e}"))?;
    let planting_year: i32 = fields[1]
        .parse()
        .map_err(|_| format!("invalid planting year: {:?}", fields[1]))?;
    let height: f64 = fields[2]
        .parse()
        .map_err(|_| format!("invalid height: {:?}", fields[2]))?;
    let growth_rate: f64 = fields[3]
        .parse()
        .map_err(|_| format!("invalid growth rate: {:?}", fields[3]))?;

    Ok(Tree::new(species, planting_year, height, growth_rate))
}
