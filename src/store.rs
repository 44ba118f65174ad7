//! JSON snapshot persistence for the election registry.
//!
//! A [`Store`] reads and writes the whole registry at a fixed path. Saving
//! always overwrites the full snapshot; there is no incremental or
//! append-only persistence, and no atomicity across a process crash, since
//! the design assumes a single writer.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;
use crate::model::registry::ElectionRegistry;

/// Persistence adapter for a registry snapshot file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry snapshot.
    ///
    /// A missing file is not an error: it yields an empty registry, so a
    /// first run starts cleanly. An unreadable or malformed file is
    /// reported as an error and the file is left untouched.
    pub fn load(&self) -> Result<ElectionRegistry> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No snapshot at {}, starting empty", self.path.display());
                return Ok(ElectionRegistry::new());
            }
            Err(err) => return Err(err.into()),
        };
        let registry: ElectionRegistry = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} election(s) from {}",
            registry.elections.len(),
            self.path.display()
        );
        Ok(registry)
    }

    /// Load the registry, degrading to an empty one when the snapshot
    /// cannot be read. The failure is reported through the log rather than
    /// propagated, so the session stays usable.
    pub fn load_or_default(&self) -> ElectionRegistry {
        self.load().unwrap_or_else(|err| {
            warn!(
                "Ignoring unreadable snapshot at {}: {err}",
                self.path.display()
            );
            ElectionRegistry::new()
        })
    }

    /// Write a full snapshot, replacing any existing file.
    pub fn save(&self, registry: &ElectionRegistry) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, registry)?;
        writer.flush()?;
        info!(
            "Saved {} election(s) to {}",
            registry.elections.len(),
            self.path.display()
        );
        Ok(())
    }
}
