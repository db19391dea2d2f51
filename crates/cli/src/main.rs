//! Food3D terminal front end.
//!
//! Each invocation loads the persisted slot, applies one command through the
//! app controller and prints the result. State carries over between runs in
//! the slot file, the same way a browser keeps local storage.
//!
//! # Usage
//!
//! ```bash
//! food3d register --email a@x.com --password secret
//! food3d login --email a@x.com --password secret
//! food3d menu --category pizza
//! food3d add 1
//! food3d qty 1 -1
//! food3d cart
//! food3d checkout
//! food3d logout
//! ```
//!
//! `--api-url` and `--storage` override `FOOD3D_API_URL` and
//! `FOOD3D_STORAGE_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use food3d_app::config::parse_api_url;
use food3d_app::{
    AppConfig, CatalogError, Command, ConfigError, Controller, FileSlot, HttpMenuSource,
    StorageError, Store,
};
use food3d_app::store::CatalogStatus;
use food3d_core::{CategoryFilter, MenuItemId};

mod ui;

use ui::{Section, TerminalUi};

#[derive(Parser)]
#[command(name = "food3d")]
#[command(author, version, about = "Food3D terminal front end")]
struct Cli {
    /// Server base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Slot file holding session, accounts and cart
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show who is logged in and the cart summary
    Status,
    /// Create a mock account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and load the menu
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Fetch and list the menu
    Menu {
        /// Only show this category ("all" for everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add one unit of a menu item to the cart
    Add {
        /// Menu item id
        id: MenuItemId,
    },
    /// Change the quantity of a cart line (removed at zero)
    Qty {
        /// Menu item id
        id: MenuItemId,
        /// Amount to add, e.g. 1 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Show the cart
    Cart,
    /// Place the (mock) order and empty the cart
    Checkout,
}

/// Errors that stop the CLI before a command runs.
#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid --api-url: {0}")]
    ApiUrl(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("menu client error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config.api_url = parse_api_url(url).map_err(CliError::ApiUrl)?;
    }
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }
    tracing::debug!(api_url = %config.api_url, storage = %config.storage_path.display(), "Configuration loaded");

    let slot = FileSlot::open(&config.storage_path)?;
    let source = HttpMenuSource::new(&config.api_url)?;
    let ui = TerminalUi::new(std::io::stdout().lock());
    let mut controller = Controller::new(Store::load(slot), source, ui);

    let section = match cli.command {
        Commands::Status => {
            controller.refresh();
            Section::Status
        }
        Commands::Register { email, password } => {
            controller
                .dispatch(Command::Register { email, password })
                .await;
            Section::Status
        }
        Commands::Login { email, password } => {
            controller.dispatch(Command::Login { email, password }).await;
            Section::Menu
        }
        Commands::Logout => {
            controller.dispatch(Command::Logout).await;
            Section::Status
        }
        Commands::Menu { category } => {
            controller.start().await;
            if let Some(category) = category {
                controller
                    .dispatch(Command::SelectCategory(CategoryFilter::parse(&category)))
                    .await;
            }
            Section::Menu
        }
        Commands::Add { id } => {
            controller.start().await;
            let before = controller.store().cart().count();
            controller.dispatch(Command::AddToCart(id)).await;
            let store = controller.store();
            if store.catalog().status() == &CatalogStatus::Loaded && store.cart().count() == before {
                tracing::warn!(%id, "No such menu item");
            }
            Section::Cart
        }
        Commands::Qty { id, delta } => {
            controller.refresh();
            controller
                .dispatch(Command::ChangeQuantity { id, delta })
                .await;
            Section::Cart
        }
        Commands::Cart => {
            controller.refresh();
            Section::Cart
        }
        Commands::Checkout => {
            controller.refresh();
            controller.dispatch(Command::PlaceOrder).await;
            Section::Status
        }
    };

    let (_, mut ui) = controller.into_parts();
    ui.finish(section)?;

    Ok(if ui.error_count() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
