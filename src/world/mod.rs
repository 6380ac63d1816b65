//! # World Management
//!
//! Everything needed to turn an existing world folder into a managed world:
//!
//! - [`environment`] - the dimension types a world can be imported as
//! - [`generator`] - `GENERATOR[:ID]` parsing
//! - [`manager`] - the [`WorldManager`] trait the import flow is written against
//! - [`registry`] - [`WorldRegistry`], the file-backed manager
//! - [`import`] - [`ImportValidator`] and its [`ImportOutcome`]s
//! - [`errors`] - [`WorldCreationError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worldhub::world::{ImportArgs, ImportOutcome, ImportValidator, WorldRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut registry = WorldRegistry::open("./worlds", "./data", Vec::new()).await?;
//!     let validator = ImportValidator::new("./worlds");
//!
//!     let args = ImportArgs::new("gargamel").environment("normal");
//!     if let ImportOutcome::ReadyToImport(request) = validator.evaluate(&registry, &args) {
//!         let outcome = validator.complete(&mut registry, &request);
//!         println!("{:?}", outcome);
//!     }
//!     Ok(())
//! }
//! ```

pub mod environment;
pub mod errors;
pub mod generator;
pub mod import;
pub mod manager;
pub mod registry;

pub use environment::WorldEnvironment;
pub use errors::WorldCreationError;
pub use generator::GeneratorSpec;
pub use import::{ImportArgs, ImportOutcome, ImportRequest, ImportValidator};
pub use manager::{ManagedWorld, WorldManager};
pub use registry::WorldRegistry;
