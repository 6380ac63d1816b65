use thiserror::Error;

use crate::validation::NameError;

/// Errors raised while registering a world with the manager.
///
/// The import command forwards these to the sender verbatim, so the
/// display strings are written for operators rather than developers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldCreationError {
    /// The world name cannot be used as a folder name.
    #[error("invalid world name '{name}': {reason}")]
    InvalidName { name: String, reason: NameError },

    /// A world with this name is already registered.
    #[error("world '{0}' is already managed")]
    AlreadyExists(String),

    /// The world folder is missing or is not a directory.
    #[error("world folder '{0}' does not exist")]
    FolderMissing(String),

    /// The `-g` value could not be parsed as `NAME[:ID]`.
    #[error("invalid generator '{0}': expected GENERATOR[:ID]")]
    InvalidGenerator(String),

    /// No installed generator matches the requested name (case sensitive).
    #[error("generator '{0}' is not installed")]
    GeneratorNotFound(String),

    /// The registry file could not be written.
    #[error("failed to save world registry {path}: {reason}")]
    Persist { path: String, reason: String },
}
