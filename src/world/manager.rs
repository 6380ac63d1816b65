//! The world manager seam used by the import command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::environment::WorldEnvironment;
use super::errors::WorldCreationError;
use super::import::ImportRequest;

/// A world registered with the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedWorld {
    pub id: Uuid,
    pub name: String,
    pub environment: WorldEnvironment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    pub adjust_spawn: bool,
    pub imported_at: DateTime<Utc>,
}

/// Lookup, enumeration and registration of worlds.
///
/// All methods are synchronous; implementations own whatever storage backs
/// the managed set.
pub trait WorldManager {
    /// Whether `name` already refers to a managed world. Case rules are the
    /// implementation's own.
    fn is_managed(&self, name: &str) -> bool;

    /// Folder names under the world container that look like world data,
    /// managed or not, in a stable order.
    fn potential_worlds(&self) -> Vec<String>;

    /// Register an existing world folder as a managed world.
    fn add_world(&mut self, request: &ImportRequest) -> Result<ManagedWorld, WorldCreationError>;
}
