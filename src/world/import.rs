//! Import validation: decide what an `import` request should do.
//!
//! [`ImportValidator::evaluate`] walks a short, ordered list of checks and
//! returns an [`ImportOutcome`] describing the result. It only reads: the
//! managed-world lookup, the candidate enumeration and a folder existence
//! check. Registration, the one mutating step, happens in
//! [`ImportValidator::complete`] once the caller has reported that the
//! import is starting.
//!
//! Check order:
//!
//! 1. `--list` / `-l` in the name slot lists candidate folders.
//! 2. A missing environment argument or a blank name is a usage error.
//! 3. An already managed name is refused before touching the filesystem.
//! 4. An unknown environment token is refused regardless of the folder.
//! 5. The folder must exist directly under the world container. Names that
//!    are not a single plain path component (absolute paths, separators,
//!    `.` or `..`) never match a folder.

use log::debug;
use std::path::{Component, Path, PathBuf};

use super::environment::WorldEnvironment;
use super::errors::WorldCreationError;
use super::manager::{ManagedWorld, WorldManager};
use crate::logutil::escape_log;

/// Raw inputs of one import invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportArgs {
    pub world_name: String,
    /// Second positional argument; `None` when only the name was given.
    pub environment: Option<String>,
    /// Value of the `-g` flag.
    pub generator: Option<String>,
    /// Presence of the `-n` flag.
    pub no_spawn_adjust: bool,
}

impl ImportArgs {
    pub fn new(world_name: impl Into<String>) -> Self {
        Self {
            world_name: world_name.into(),
            ..Self::default()
        }
    }

    pub fn environment(mut self, token: impl Into<String>) -> Self {
        self.environment = Some(token.into());
        self
    }

    pub fn generator(mut self, spec: impl Into<String>) -> Self {
        self.generator = Some(spec.into());
        self
    }

    pub fn no_spawn_adjust(mut self) -> Self {
        self.no_spawn_adjust = true;
        self
    }

    /// Whether the name slot holds the `--list` / `-l` pseudo-argument.
    pub fn is_list_request(&self) -> bool {
        self.world_name.eq_ignore_ascii_case("--list") || self.world_name.eq_ignore_ascii_case("-l")
    }
}

/// A validated request, ready to hand to [`WorldManager::add_world`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub world_name: String,
    pub environment: WorldEnvironment,
    /// `GENERATOR[:ID]`, passed through untouched.
    pub generator: Option<String>,
    pub adjust_spawn: bool,
}

impl ImportRequest {
    pub fn new(world_name: impl Into<String>, environment: WorldEnvironment) -> Self {
        Self {
            world_name: world_name.into(),
            environment,
            generator: None,
            adjust_spawn: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Unmanaged folders that look like worlds, in enumeration order.
    ListCandidates(Vec<String>),
    /// Not enough arguments; the caller should show help.
    UsageError,
    AlreadyManaged(String),
    InvalidEnvironment(String),
    ReadyToImport(ImportRequest),
    /// The folder is missing; carries the same candidates as a list request.
    NonExistentFolder(Vec<String>),
    ImportSucceeded(ManagedWorld),
    ImportFailed(WorldCreationError),
}

/// Stateless validator bound to the server's world container.
#[derive(Debug, Clone)]
pub struct ImportValidator {
    world_container: PathBuf,
}

impl ImportValidator {
    pub fn new(world_container: impl Into<PathBuf>) -> Self {
        Self {
            world_container: world_container.into(),
        }
    }

    pub fn evaluate(&self, manager: &dyn WorldManager, args: &ImportArgs) -> ImportOutcome {
        if args.is_list_request() {
            return ImportOutcome::ListCandidates(Self::candidates(manager));
        }

        let Some(token) = args.environment.as_deref() else {
            return ImportOutcome::UsageError;
        };
        if args.world_name.trim().is_empty() {
            return ImportOutcome::UsageError;
        }

        if manager.is_managed(&args.world_name) {
            debug!("import refused: '{}' is already managed", escape_log(&args.world_name));
            return ImportOutcome::AlreadyManaged(args.world_name.clone());
        }

        let Some(environment) = WorldEnvironment::parse(token) else {
            debug!("import refused: unknown environment '{}'", escape_log(token));
            return ImportOutcome::InvalidEnvironment(token.to_string());
        };

        if self.folder_exists(&args.world_name) {
            ImportOutcome::ReadyToImport(ImportRequest {
                world_name: args.world_name.clone(),
                environment,
                generator: args.generator.clone(),
                adjust_spawn: !args.no_spawn_adjust,
            })
        } else {
            debug!(
                "import refused: no folder '{}' under {}",
                escape_log(&args.world_name),
                self.world_container.display()
            );
            ImportOutcome::NonExistentFolder(Self::candidates(manager))
        }
    }

    /// Register a request produced by [`evaluate`](Self::evaluate). Failures
    /// from the manager are returned unmodified.
    pub fn complete(&self, manager: &mut dyn WorldManager, request: &ImportRequest) -> ImportOutcome {
        match manager.add_world(request) {
            Ok(world) => ImportOutcome::ImportSucceeded(world),
            Err(e) => ImportOutcome::ImportFailed(e),
        }
    }

    /// Whether `name` is a folder directly inside the world container.
    fn folder_exists(&self, name: &str) -> bool {
        if name.contains(['/', '\\']) {
            return false;
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => self.world_container.join(name).is_dir(),
            _ => false,
        }
    }

    /// Potential worlds minus the managed ones. Computed fresh on each call.
    pub fn candidates(manager: &dyn WorldManager) -> Vec<String> {
        manager
            .potential_worlds()
            .into_iter()
            .filter(|name| !manager.is_managed(name))
            .collect()
    }
}
