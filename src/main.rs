//! Binary entrypoint for the Worldhub CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and create the world and data folders
//! - `import <NAME> [ENVIRONMENT] [-g GENERATOR[:ID]] [-n]` - import a world folder
//! - `run "<command line>"` - dispatch a full command line, e.g. `run "/mv im space normal"`
//! - `worlds` - list managed worlds
//!
//! See the library crate docs for module-level details: `worldhub::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use worldhub::command::import::ImportCommand;
use worldhub::command::perms::PermissionPolicy;
use worldhub::command::sender::ConsoleSender;
use worldhub::command::{DispatchResult, Dispatcher};
use worldhub::config::Config;
use worldhub::messages::{MessageCatalog, Messenger};
use worldhub::world::{ImportValidator, WorldRegistry};

#[derive(Parser)]
#[command(name = "worldhub")]
#[command(about = "Multi-world management for Minecraft servers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter configuration and the world/data folders
    Init,
    /// Import an existing world folder
    Import {
        /// NAME [ENVIRONMENT] plus -g/-n flags, passed to the command parser as typed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Dispatch a full command line as if typed in game
    Run {
        /// The command line, e.g. "/mv import gargamel normal"
        line: String,
    },
    /// List managed worlds
    Worlds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            info!("Initializing new worldhub configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            let cfg = Config::default();
            tokio::fs::create_dir_all(&cfg.server.world_container).await?;
            tokio::fs::create_dir_all(&cfg.storage.data_dir).await?;
            info!(
                "Created world container {} and data directory {}",
                cfg.server.world_container, cfg.storage.data_dir
            );
        }
        Commands::Worlds => {
            let (_config, registry) = load(&cli.config, cli.verbose).await?;
            let mut count = 0;
            for world in registry.worlds() {
                count += 1;
                let generator = world.generator.as_deref().unwrap_or("-");
                println!(
                    "{:<24} {:<8} generator={} adjust_spawn={} imported={}",
                    world.name,
                    world.environment,
                    generator,
                    world.adjust_spawn,
                    world.imported_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            if count == 0 {
                println!("No managed worlds.");
            }
        }
        Commands::Import { args } => {
            let (config, mut registry) = load(&cli.config, cli.verbose).await?;
            let dispatcher = build_dispatcher(&config).await?;
            let mut console = console_sender(&config);
            let result = dispatcher.dispatch(&mut registry, &mut console, "import", &args);
            exit_on_failure(result);
        }
        Commands::Run { line } => {
            let (config, mut registry) = load(&cli.config, cli.verbose).await?;
            let dispatcher = build_dispatcher(&config).await?;
            let mut console = console_sender(&config);
            let result = dispatcher.dispatch_line(&mut registry, &mut console, &line);
            exit_on_failure(result);
        }
    }

    Ok(())
}

/// Load the config, start logging and open the world registry.
async fn load(config_path: &str, verbosity: u8) -> Result<(Config, WorldRegistry)> {
    let config = Config::load(config_path).await?;
    init_logging(&Some(config.clone()), verbosity);
    let registry = WorldRegistry::open(
        &config.server.world_container,
        &config.storage.data_dir,
        config.generators.available.clone(),
    )
    .await?;
    Ok((config, registry))
}

async fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let catalog = match &config.messages.file {
        Some(path) => {
            let catalog = MessageCatalog::load(path).await?;
            if catalog.is_empty() {
                warn!("Messages file {} has no overrides", path);
            } else {
                info!("Loaded {} message overrides from {}", catalog.len(), path);
            }
            catalog
        }
        None => MessageCatalog::new(),
    };
    let policy = PermissionPolicy::new(config.permissions.overrides.clone());
    let mut dispatcher = Dispatcher::new(Messenger::new(catalog), policy);
    dispatcher.register(Box::new(ImportCommand::new(ImportValidator::new(
        &config.server.world_container,
    ))));
    Ok(dispatcher)
}

fn console_sender(config: &Config) -> ConsoleSender {
    let color = config.messages.color && atty::is(atty::Stream::Stdout);
    ConsoleSender::new(config.permissions.console_level, color)
}

fn exit_on_failure(result: DispatchResult) {
    match result {
        DispatchResult::Ran => {}
        DispatchResult::ShowedHelp | DispatchResult::BadArguments => std::process::exit(2),
        DispatchResult::Denied | DispatchResult::Unknown => {
            warn!("Command not executed: {:?}", result);
            std::process::exit(1);
        }
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity wins over the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
