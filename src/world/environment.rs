//! World environments (dimension types) a world can be imported as.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorldEnvironment {
    Normal,
    Nether,
    TheEnd,
}

impl WorldEnvironment {
    /// Every environment, in display order.
    pub fn all() -> [WorldEnvironment; 3] {
        [Self::Normal, Self::Nether, Self::TheEnd]
    }

    /// Resolve a user-typed environment token.
    ///
    /// Matching ignores case and accepts the legacy aliases `HELL` (nether)
    /// and `END` / `STARFIELD` (the end). Unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Some(Self::Normal),
            "NETHER" | "HELL" => Some(Self::Nether),
            "THE_END" | "END" | "STARFIELD" => Some(Self::TheEnd),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Nether => "NETHER",
            Self::TheEnd => "THE_END",
        }
    }
}

impl fmt::Display for WorldEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_ignoring_case() {
        assert_eq!(WorldEnvironment::parse("normal"), Some(WorldEnvironment::Normal));
        assert_eq!(WorldEnvironment::parse("NeThEr"), Some(WorldEnvironment::Nether));
        assert_eq!(WorldEnvironment::parse("the_end"), Some(WorldEnvironment::TheEnd));
    }

    #[test]
    fn parses_legacy_aliases() {
        assert_eq!(WorldEnvironment::parse("hell"), Some(WorldEnvironment::Nether));
        assert_eq!(WorldEnvironment::parse("END"), Some(WorldEnvironment::TheEnd));
        assert_eq!(WorldEnvironment::parse("starfield"), Some(WorldEnvironment::TheEnd));
    }

    #[test]
    fn unknown_tokens_are_absent() {
        for token in ["", "overworld", "nether!", "skylands", "0"] {
            assert_eq!(WorldEnvironment::parse(token), None, "token {:?}", token);
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for env in WorldEnvironment::all() {
            assert_eq!(WorldEnvironment::parse(&env.to_string()), Some(env));
        }
    }

    #[test]
    fn serializes_as_upper_snake_case() {
        let json = serde_json::to_string(&WorldEnvironment::TheEnd).unwrap();
        assert_eq!(json, "\"THE_END\"");
    }
}
