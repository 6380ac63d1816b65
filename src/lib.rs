//! # Worldhub - Multi-World Management for Minecraft Servers
//!
//! Worldhub keeps track of which world folders a server manages and brings
//! existing world folders under management through the `import` command.
//!
//! ## Features
//!
//! - **World Import**: Validate and register an existing world folder with a chosen environment, optional generator and spawn adjustment.
//! - **Candidate Discovery**: List folders under the world container that look like world data but are not managed yet.
//! - **Command Framework**: Quoted arguments, single-letter flags, aliases and permission levels, in the style of server plugin commands.
//! - **Localizable Messages**: Every reply is a keyed template that a TOML file can override.
//! - **Safe Persistence**: Imports re-read and rewrite the world registry under an exclusive lock, so processes sharing a data directory keep each other's worlds.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use worldhub::command::import::ImportCommand;
//! use worldhub::command::perms::PermissionPolicy;
//! use worldhub::command::sender::ConsoleSender;
//! use worldhub::command::Dispatcher;
//! use worldhub::config::Config;
//! use worldhub::messages::{MessageCatalog, Messenger};
//! use worldhub::world::{ImportValidator, WorldRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let mut registry = WorldRegistry::open(
//!         &config.server.world_container,
//!         &config.storage.data_dir,
//!         config.generators.available.clone(),
//!     )
//!     .await?;
//!
//!     let mut dispatcher = Dispatcher::new(Messenger::new(MessageCatalog::new()), PermissionPolicy::default());
//!     dispatcher.register(Box::new(ImportCommand::new(ImportValidator::new(&config.server.world_container))));
//!
//!     let mut console = ConsoleSender::new(4, true);
//!     dispatcher.dispatch_line(&mut registry, &mut console, "/mv import gargamel normal");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`world`] - environments, the world manager trait, the registry and import validation
//! - [`command`] - command parsing, dispatch, permissions and the `import` command
//! - [`messages`] - message catalog, themes and rendering
//! - [`config`] - configuration management
//! - [`validation`] - world name validation
//! - [`logutil`] - log sanitizing helpers

pub mod command;
pub mod config;
pub mod logutil;
pub mod messages;
pub mod validation;
pub mod world;
