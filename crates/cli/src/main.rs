//! Maison CLI - Cart, wishlist and search from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two of a product to the cart
//! maison cart add ring-001 -q 2
//!
//! # Set a line's quantity (clamped at zero)
//! maison cart update ring-001 1
//!
//! # Save a product, then move it into the cart
//! maison wishlist add neck-001
//! maison wishlist move-to-cart neck-001
//!
//! # Search product names
//! maison search ring
//! ```
//!
//! State persists in `MAISON_DATA_DIR` between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use maison_storefront::{AppState, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "maison")]
#[command(version, about = "Maison storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Search product names
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Set the quantity of a cart line
    Update {
        /// Product ID
        product_id: String,

        /// New quantity (negative values become 0)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show cart contents and totals
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Save a product
    Add {
        /// Product ID
        product_id: String,
    },
    /// Remove a saved product
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Move a saved product into the cart
    MoveToCart {
        /// Product ID
        product_id: String,
    },
    /// Remove every saved product
    Clear,
    /// Show saved products
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product
    List,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so command output stays clean on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maison=info,maison_storefront=warn".into());

    let log_json = config.as_ref().is_ok_and(|c| c.log_json);
    let json_layer = log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize storefront state: {e}");
            std::process::exit(1);
        }
    };

    let result = run(&state, cli).await;

    // Persist whatever the command changed before exiting, even on failure
    if let Err(e) = state.shutdown().await {
        tracing::error!("Failed to flush snapshots: {e}");
    }

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(state: &AppState, cli: Cli) -> maison_storefront::Result<()> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(state, &product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(state, &product_id),
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(state, &product_id, quantity),
            CartAction::Clear => commands::cart::clear(state),
            CartAction::Show => commands::cart::show(state),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product_id } => {
                commands::wishlist::add(state, &product_id).await?;
            }
            WishlistAction::Remove { product_id } => {
                commands::wishlist::remove(state, &product_id);
            }
            WishlistAction::MoveToCart { product_id } => {
                commands::wishlist::move_to_cart(state, &product_id)?;
            }
            WishlistAction::Clear => commands::wishlist::clear(state),
            WishlistAction::Show => commands::wishlist::show(state),
        },
        Commands::Search { query } => commands::search::run(state, &query).await,
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::search::list_catalog(state).await?,
        },
    }
    Ok(())
}
