//! Parsing of `-g GENERATOR[:ID]` values.

use std::fmt;

use super::errors::WorldCreationError;

/// A chunk generator plugin reference with an optional generator id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub name: String,
    pub id: Option<String>,
}

impl GeneratorSpec {
    /// Split `NAME[:ID]` on the first colon. An empty id is treated as absent;
    /// an empty name is an error. Names are kept verbatim because generator
    /// lookup is case sensitive.
    pub fn parse(raw: &str) -> Result<Self, WorldCreationError> {
        let (name, id) = match raw.split_once(':') {
            Some((name, id)) => (name, Some(id)),
            None => (raw, None),
        };
        if name.trim().is_empty() {
            return Err(WorldCreationError::InvalidGenerator(raw.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            id: id.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }
}

impl fmt::Display for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}
