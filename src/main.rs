use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use iris::config::Config;
use iris::store::{LocalStore, StoreHandle};

mod cli;

use cli::LocationArgs;

#[derive(Parser)]
#[command(name = "iris")]
#[command(about = "IRIS - voice-driven personal safety assistant")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.iris/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the local store (defaults to ~/.iris/store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Never speak, only show text
    #[arg(short, long, global = true)]
    silent: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for voice commands (typed lines stand in for speech)
    Listen {
        /// Handle one command, then stop listening
        #[arg(long)]
        single: bool,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Send an SOS to all trusted contacts
    Sos {
        /// Police category instead of family
        #[arg(long)]
        police: bool,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the safety index for the current area
    Area {
        /// Also estimate risk from the simulated crowd map
        #[arg(long, requires = "lat")]
        crowd: bool,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// List the nearest known police stations
    Police {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Manage trusted contacts
    Contacts {
        #[command(subcommand)]
        action: Option<ContactsAction>,
    },

    /// Register the user of this device
    Register {
        #[arg(long)]
        name: String,

        /// 10-digit mobile number
        #[arg(long)]
        phone: String,

        #[arg(long, default_value = "")]
        city: String,
    },

    /// Initialize a new ~/.iris/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show recent SOS history
    Logs,
}

#[derive(Subcommand)]
enum ContactsAction {
    /// List trusted contacts
    List,

    /// Add a trusted contact
    Add {
        name: String,
        phone: String,

        #[arg(long, default_value = "Trusted")]
        relation: String,
    },

    /// Remove a trusted contact by id
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config, force).await;
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.silent {
        config.voice.silent_mode = true;
    }

    let store_path = cli.store.unwrap_or_else(LocalStore::default_path);
    let store = LocalStore::open(&store_path)
        .with_context(|| format!("Failed to open store: {}", store_path.display()))?;
    let store = StoreHandle::new(store);

    match cli.command {
        Some(Commands::Listen { single, location }) => {
            cli::listen::listen_command(&config, store, location, single).await?;
        }
        Some(Commands::Sos { police, location }) => {
            cli::sos::sos_command(&config, store, location, police).await?;
        }
        Some(Commands::Area { crowd, location }) => {
            cli::area::area_command(&config, store, location, crowd).await?;
        }
        Some(Commands::Police { location }) => {
            cli::police::police_command(&config, location).await?;
        }
        Some(Commands::Contacts { action }) => match action.unwrap_or(ContactsAction::List) {
            ContactsAction::List => cli::contacts::list_command(store).await?,
            ContactsAction::Add {
                name,
                phone,
                relation,
            } => cli::contacts::add_command(store, &name, &phone, &relation).await?,
            ContactsAction::Remove { id } => cli::contacts::remove_command(store, &id).await?,
        },
        Some(Commands::Register { name, phone, city }) => {
            cli::register::register_command(store, &name, &phone, &city).await?;
        }
        Some(Commands::Logs) => {
            cli::logs::logs_command(store).await?;
        }
        Some(Commands::Init { .. }) => {}
        None => {
            // Default: continuous listening
            cli::listen::listen_command(
                &config,
                store,
                LocationArgs {
                    lat: None,
                    lng: None,
                },
                false,
            )
            .await?;
        }
    }

    Ok(())
}
