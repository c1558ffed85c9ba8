//! Roastery CLI - Seller registry management tools.
//!
//! # Usage
//!
//! ```bash
//! # List every seller
//! roastery sellers list
//!
//! # Show one seller as JSON
//! roastery sellers show seller-001
//!
//! # Rename a seller (fails if another seller holds the name)
//! roastery sellers update seller-002 --company-name "Liquid Soul Coffee Redux"
//!
//! # Apply an arbitrary shallow patch
//! roastery sellers update seller-002 --patch '{"socialMedia": {"instagram": "@lsc"}}'
//!
//! # Check a name before using it
//! roastery sellers check-name "Brand New Co" --exclude seller-002
//!
//! # Registry health
//! roastery status
//! ```
//!
//! # Environment Variables
//!
//! - `SELLER_REGISTRY_PATH` - JSON document location (overridden by `--data`)
//! - `SELLER_REGISTRY_QUARANTINE` - Keep unreadable documents aside (default: true)
//! - `RUST_LOG` - Log filter (default: `roastery_registry=info,roastery_cli=info`)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roastery_core::{SubscriptionStatus, SubscriptionTier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "roastery")]
#[command(author, version, about = "Roastery seller registry tools")]
struct Cli {
    /// Path of the seller document (overrides `SELLER_REGISTRY_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and edit seller profiles
    Sellers {
        #[command(subcommand)]
        action: SellersAction,
    },
    /// Show registry health
    Status,
    /// Reconcile the document with the seed dataset and write it back
    Reload,
}

#[derive(Subcommand)]
enum SellersAction {
    /// List every seller
    List,
    /// Show one seller as JSON
    Show {
        /// Seller ID
        id: String,
    },
    /// Create or update a seller
    Update {
        /// Seller ID (unknown IDs are provisioned)
        id: String,

        /// JSON patch; flags below override its fields
        #[arg(long)]
        patch: Option<String>,

        /// New company name
        #[arg(long)]
        company_name: Option<String>,

        /// Mission statement
        #[arg(long)]
        mission: Option<String>,

        /// Free-text location
        #[arg(long)]
        location: Option<String>,

        /// Rating between 0 and 5
        #[arg(long, value_parser = commands::sellers::parse_rating)]
        rating: Option<f64>,

        /// Subscription tier (`free`, `basic`, `premium`, `enterprise`)
        #[arg(long)]
        tier: Option<SubscriptionTier>,

        /// Subscription status (`active`, `trialing`, `past_due`, `canceled`, `inactive`)
        #[arg(long)]
        status: Option<SubscriptionStatus>,
    },
    /// Check whether a company name is free
    CheckName {
        /// Company name to check
        name: String,

        /// Seller ID to ignore (the seller being renamed)
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Show the brand color derived from a seller ID
    Color {
        /// Seller ID
        id: String,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roastery_registry=info,roastery_cli=info".into());

    // Logs go to stderr so command output on stdout stays machine-readable
    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let registry = commands::open_registry(cli.data)?;

    match cli.command {
        Commands::Sellers { action } => match action {
            SellersAction::List => commands::sellers::list(&registry).await,
            SellersAction::Show { id } => commands::sellers::show(&registry, &id).await?,
            SellersAction::Update {
                id,
                patch,
                company_name,
                mission,
                location,
                rating,
                tier,
                status,
            } => {
                let patch = commands::sellers::build_patch(
                    patch.as_deref(),
                    commands::sellers::PatchFlags {
                        company_name,
                        mission,
                        location,
                        rating,
                        tier,
                        status,
                    },
                )?;
                commands::sellers::update(&registry, &id, patch).await?;
            }
            SellersAction::CheckName { name, exclude } => {
                commands::sellers::check_name(&registry, &name, exclude.as_deref()).await;
            }
            SellersAction::Color { id } => commands::sellers::color(&id),
        },
        Commands::Status => commands::registry::status(&registry).await?,
        Commands::Reload => commands::registry::reload(&registry).await?,
    }
    Ok(())
}
