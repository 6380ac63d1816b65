//! World name validation for filesystem safety.
//!
//! World names double as folder names under the server's world container, so
//! anything that could escape the container or confuse the host filesystem is
//! refused before a world is registered.

/// Maximum length of a world name, in characters.
pub const MAX_WORLD_NAME_CHARS: usize = 64;

/// World name validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("world name cannot be empty")]
    Empty,

    #[error("world name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("world name cannot start or end with whitespace")]
    InvalidWhitespace,

    #[error("world name contains path separators (/ or \\)")]
    PathTraversal,

    #[error("world name contains filesystem reserved characters")]
    FilesystemReserved,

    #[error("world name contains control characters: {chars}")]
    ControlCharacters { chars: String },

    #[error("world name is reserved by the operating system")]
    Reserved,
}

fn is_reserved(name: &str) -> bool {
    let lower = name.to_lowercase();
    matches!(
        lower.as_str(),
        "." | ".."
            | "con" | "prn" | "aux" | "nul"
            | "com1" | "com2" | "com3" | "com4" | "com5" | "com6" | "com7" | "com8" | "com9"
            | "lpt1" | "lpt2" | "lpt3" | "lpt4" | "lpt5" | "lpt6" | "lpt7" | "lpt8" | "lpt9"
    )
}

/// Validate a world name so that it names exactly one folder directly under
/// the world container. Returns the name unchanged on success.
pub fn validate_world_name(name: &str) -> Result<&str, NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_WORLD_NAME_CHARS {
        return Err(NameError::TooLong { max: MAX_WORLD_NAME_CHARS });
    }
    if name.trim() != name {
        return Err(NameError::InvalidWhitespace);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(NameError::PathTraversal);
    }
    if is_reserved(name) {
        return Err(NameError::Reserved);
    }

    let fs_reserved = ['<', '>', ':', '"', '|', '?', '*', '\0'];
    if name.chars().any(|c| fs_reserved.contains(&c)) {
        return Err(NameError::FilesystemReserved);
    }

    if name.chars().any(|c| c.is_control()) {
        let chars = name
            .chars()
            .filter(|c| c.is_control())
            .map(|c| format!("\\u{{{:04x}}}", c as u32))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(NameError::ControlCharacters { chars });
    }

    Ok(name)
}
