//! Permission levels and permission nodes.
//!
//! Levels follow the server operator scale: higher values imply a superset of
//! lower capabilities. Each command declares a [`Perm`] with a default level;
//! the config can raise or lower the level per node.

use std::collections::HashMap;

pub const LEVEL_PLAYER: u8 = 0;
pub const LEVEL_MODERATOR: u8 = 1;
pub const LEVEL_GAMEMASTER: u8 = 2;
pub const LEVEL_ADMIN: u8 = 3;
pub const LEVEL_OWNER: u8 = 4;

/// Human-readable name for a numeric level. Levels above 4 count as "Owner".
pub fn level_name(level: u8) -> &'static str {
    match level {
        LEVEL_PLAYER => "Player",
        LEVEL_MODERATOR => "Moderator",
        LEVEL_GAMEMASTER => "Gamemaster",
        LEVEL_ADMIN => "Admin",
        _ => "Owner",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perm {
    pub node: &'static str,
    pub default_level: u8,
}

pub const CMD_IMPORT: Perm = Perm {
    node: "worldhub.core.import",
    default_level: LEVEL_ADMIN,
};

/// Per-node level overrides taken from `[permissions.overrides]`.
#[derive(Debug, Clone, Default)]
pub struct PermissionPolicy {
    overrides: HashMap<String, u8>,
}

impl PermissionPolicy {
    pub fn new(overrides: HashMap<String, u8>) -> Self {
        Self { overrides }
    }

    pub fn required_level(&self, perm: &Perm) -> u8 {
        self.overrides.get(perm.node).copied().unwrap_or(perm.default_level)
    }

    pub fn allows(&self, level: u8, perm: &Perm) -> bool {
        level >= self.required_level(perm)
    }
}
