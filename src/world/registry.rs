//! File-backed [`WorldManager`] implementation.
//!
//! Managed worlds are persisted as JSON in `<data_dir>/worlds.json`:
//!
//! ```text
//! data/
//! ├── worlds.json        ← managed worlds, rewritten atomically on every import
//! └── worlds.json.lock   ← held while an import re-reads and rewrites the registry
//! worlds/           ← the server's world container
//! ├── world/level.dat
//! └── gargamel/level.dat
//! ```
//!
//! Name lookups ignore case: two folders differing only in case cannot both
//! be managed, since they would collide on case-insensitive filesystems. A
//! registry file that already holds such a pair is refused on load.
//!
//! Several processes may share one data directory. Each import takes the
//! lock, re-reads `worlds.json`, adds its world and writes the file back, so
//! concurrent imports do not overwrite each other.

use anyhow::{anyhow, Result};
use chrono::Utc;
use fs2::FileExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::errors::WorldCreationError;
use super::generator::GeneratorSpec;
use super::import::ImportRequest;
use super::manager::{ManagedWorld, WorldManager};
use crate::logutil::escape_log;
use crate::validation::validate_world_name;

/// File whose presence marks a folder as world data.
pub const LEVEL_DAT: &str = "level.dat";

const REGISTRY_FILE: &str = "worlds.json";
const LOCK_FILE: &str = "worlds.json.lock";

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    worlds: Vec<ManagedWorld>,
}

pub struct WorldRegistry {
    world_container: PathBuf,
    registry_path: PathBuf,
    lock_path: PathBuf,
    generators: HashSet<String>,
    /// Keyed by lowercase name.
    worlds: BTreeMap<String, ManagedWorld>,
}

impl WorldRegistry {
    /// Open the registry under `data_dir`, creating the directory if needed.
    /// A missing `worlds.json` yields an empty registry.
    pub async fn open(
        world_container: impl Into<PathBuf>,
        data_dir: impl AsRef<Path>,
        generators: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow!("Failed to create data directory {}: {}", data_dir.display(), e))?;

        let registry_path = data_dir.join(REGISTRY_FILE);
        let data = match tokio::fs::read_to_string(&registry_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(anyhow!("Failed reading {}: {}", registry_path.display(), e)),
        };
        let worlds = parse_registry(&data)
            .map_err(|e| anyhow!("Failed to parse {}: {}", registry_path.display(), e))?;

        Ok(Self {
            world_container: world_container.into(),
            registry_path,
            lock_path: data_dir.join(LOCK_FILE),
            generators: generators.into_iter().collect(),
            worlds,
        })
    }

    pub fn get(&self, name: &str) -> Option<&ManagedWorld> {
        self.worlds.get(&name.to_lowercase())
    }

    /// Managed worlds ordered by name.
    pub fn worlds(&self) -> impl Iterator<Item = &ManagedWorld> {
        self.worlds.values()
    }

    fn persist_err(&self, reason: impl ToString) -> WorldCreationError {
        WorldCreationError::Persist {
            path: self.registry_path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Re-read `worlds.json` so imports made by other processes since
    /// `open` are not overwritten. Caller must hold the registry lock.
    fn reload(&mut self) -> Result<(), WorldCreationError> {
        let data = match std::fs::read_to_string(&self.registry_path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.persist_err(e)),
        };
        self.worlds = parse_registry(&data).map_err(|e| self.persist_err(e))?;
        Ok(())
    }

    fn save(&self) -> Result<(), WorldCreationError> {
        let file = RegistryFile {
            worlds: self.worlds.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| self.persist_err(e))?;
        write_file_atomic(&self.registry_path, &content).map_err(|e| self.persist_err(e))
    }

    fn register(&mut self, request: &ImportRequest) -> Result<ManagedWorld, WorldCreationError> {
        self.reload()?;

        let name = request.world_name.as_str();
        if self.is_managed(name) {
            return Err(WorldCreationError::AlreadyExists(name.to_string()));
        }

        let world = ManagedWorld {
            id: Uuid::new_v4(),
            name: name.to_string(),
            environment: request.environment,
            generator: request.generator.clone(),
            adjust_spawn: request.adjust_spawn,
            imported_at: Utc::now(),
        };

        let key = name.to_lowercase();
        self.worlds.insert(key.clone(), world.clone());
        if let Err(e) = self.save() {
            self.worlds.remove(&key);
            return Err(e);
        }
        Ok(world)
    }
}

/// Parse `worlds.json` content into the lowercase-keyed map. Blank content is
/// an empty registry. Two entries whose names differ only in case are an
/// error: keeping one would silently drop the other on the next save.
fn parse_registry(data: &str) -> Result<BTreeMap<String, ManagedWorld>, String> {
    // Guard against any accidental leading NULs
    let cleaned = data.trim_start_matches('\0');
    let file: RegistryFile = if cleaned.trim().is_empty() {
        RegistryFile::default()
    } else {
        serde_json::from_str(cleaned).map_err(|e| e.to_string())?
    };

    let mut worlds: BTreeMap<String, ManagedWorld> = BTreeMap::new();
    for world in file.worlds {
        let key = world.name.to_lowercase();
        if let Some(existing) = worlds.get(&key) {
            return Err(format!(
                "world names '{}' and '{}' differ only in case",
                existing.name, world.name
            ));
        }
        worlds.insert(key, world);
    }
    Ok(worlds)
}

impl WorldManager for WorldRegistry {
    fn is_managed(&self, name: &str) -> bool {
        self.worlds.contains_key(&name.to_lowercase())
    }

    fn potential_worlds(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.world_container) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Cannot read world container {}: {}",
                    self.world_container.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let path = entry.path();
                path.is_dir() && path.join(LEVEL_DAT).is_file()
            })
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        names
    }

    fn add_world(&mut self, request: &ImportRequest) -> Result<ManagedWorld, WorldCreationError> {
        let name = validate_world_name(&request.world_name).map_err(|reason| {
            WorldCreationError::InvalidName {
                name: request.world_name.clone(),
                reason,
            }
        })?;

        if self.is_managed(name) {
            return Err(WorldCreationError::AlreadyExists(name.to_string()));
        }

        let folder = self.world_container.join(name);
        if !folder.is_dir() {
            return Err(WorldCreationError::FolderMissing(name.to_string()));
        }

        if let Some(raw) = &request.generator {
            let spec = GeneratorSpec::parse(raw)?;
            if !self.generators.contains(&spec.name) {
                return Err(WorldCreationError::GeneratorNotFound(spec.name));
            }
        }

        if !folder.join(LEVEL_DAT).is_file() {
            warn!(
                "World folder {} has no {}; the server will generate fresh terrain",
                folder.display(),
                LEVEL_DAT
            );
        }

        // The lock spans re-read, insert and write. It lives on its own file
        // because the rename in the write replaces the registry inode.
        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| self.persist_err(e))?;
        lock_file.lock_exclusive().map_err(|e| self.persist_err(e))?;
        let result = self.register(request);
        let _ = lock_file.unlock();

        let world = result?;
        info!(
            "Registered world '{}' ({}) id={}",
            escape_log(&world.name),
            world.environment,
            world.id
        );
        Ok(world)
    }
}

/// Replace `path` with `content` via a temp file in the same directory and a
/// rename. The temp file is removed if anything fails before the rename
/// completes.
fn write_file_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::fs::{self, File, OpenOptions};

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(REGISTRY_FILE);
    let mut counter = 0u32;
    let (tmp_path, tmp) = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(tmp) => break (candidate, tmp),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };

    if let Err(e) = write_and_rename(tmp, &tmp_path, path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    Ok(())
}

fn write_and_rename(mut tmp: std::fs::File, tmp_path: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    let _ = tmp.sync_all();
    drop(tmp);
    std::fs::rename(tmp_path, path)
}
