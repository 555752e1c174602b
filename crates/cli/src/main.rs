//! Brewline CLI - a command-line storefront over the cart engine.
//!
//! # Usage
//!
//! ```bash
//! # Add two large cappuccinos, then inspect the cart
//! brewline cart add --id 1 --name Cappuccino --price 4.20 --size L --quantity 2
//! brewline cart show
//!
//! # Settle the cart against the wallet
//! brewline wallet show
//! brewline checkout --yes
//!
//! # Accounts and profile
//! brewline account register -e user@example.com -p "correct horse"
//! brewline account login -e user@example.com -p "correct horse"
//! brewline profile set --name Ada --email ada@example.com --phone 555-0100
//! ```
//!
//! State lives in a single JSON file, `brewline.json` by default; set
//! `BREWLINE_STORE_PATH` to use another location.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use brewline_engine::Engine;
use brewline_engine::store::JsonFileStore;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "brewline")]
#[command(version, about = "Brewline coffee-shop storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Settle the cart against the wallet
    Checkout {
        /// Confirm the settlement instead of only quoting it
        #[arg(long)]
        yes: bool,
    },
    /// Wallet balance and top-ups
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
    /// Register, log in, log out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Edit the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Notification inbox
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and total
    Show,
    /// Add an item, merging with a matching line
    Add {
        /// Product id
        #[arg(long)]
        id: i64,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. "4.20" or "$4.20"
        #[arg(long)]
        price: String,

        /// Cup size (S, M, or L)
        #[arg(long)]
        size: Option<brewline_core::Size>,

        /// Number of units
        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Product category
        #[arg(long, default_value = "Coffee")]
        category: String,
    },
    /// Increase a line's quantity by one
    Increase {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        size: Option<brewline_core::Size>,
    },
    /// Decrease a line's quantity by one (never below one)
    Decrease {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        size: Option<brewline_core::Size>,
    },
    /// Remove a line entirely
    Remove {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        size: Option<brewline_core::Size>,
    },
}

#[derive(Subcommand)]
enum WalletAction {
    /// Print the current balance
    Show,
    /// Add funds to the wallet
    TopUp {
        /// Amount to add, e.g. "50" or "$50.00"
        amount: String,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Start a session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Print the logged-in account, if any
    Whoami,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Validate and save the profile
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    /// Print the stored profile
    Show,
    /// Delete the stored profile
    Clear,
}

#[derive(Subcommand)]
enum NotificationAction {
    /// Print all entries, oldest first
    List,
    /// Delete one entry by id
    Delete { id: i64 },
    /// Drop the whole inbox
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(JsonFileStore::new(config::store_path()));

    // Finish any settlement a previous run left half-applied.
    if let Some(receipt) = engine.checkout().recover().await? {
        tracing::info!(
            total = %receipt.total,
            "finished a settlement interrupted on a previous run"
        );
    }

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&engine).await?,
            CartAction::Add {
                id,
                name,
                price,
                size,
                quantity,
                category,
            } => commands::cart::add(&engine, id, &name, &price, size, quantity, category).await?,
            CartAction::Increase { id, size } => {
                commands::cart::change_quantity(&engine, id, size, 1).await?;
            }
            CartAction::Decrease { id, size } => {
                commands::cart::change_quantity(&engine, id, size, -1).await?;
            }
            CartAction::Remove { id, size } => commands::cart::remove(&engine, id, size).await?,
        },
        Commands::Checkout { yes } => commands::checkout::run(&engine, yes).await?,
        Commands::Wallet { action } => match action {
            WalletAction::Show => commands::wallet::show(&engine).await?,
            WalletAction::TopUp { amount } => commands::wallet::top_up(&engine, &amount).await?,
        },
        Commands::Account { action } => match action {
            AccountAction::Register { email, password } => {
                commands::account::register(&engine, &email, &password).await?;
            }
            AccountAction::Login { email, password } => {
                commands::account::login(&engine, &email, &password).await?;
            }
            AccountAction::Logout => commands::account::logout(&engine).await?,
            AccountAction::Whoami => commands::account::whoami(&engine).await?,
        },
        Commands::Profile { action } => match action {
            ProfileAction::Set {
                name,
                email,
                phone,
                avatar,
            } => commands::profile::set(&engine, name, email, phone, avatar).await?,
            ProfileAction::Show => commands::profile::show(&engine).await?,
            ProfileAction::Clear => commands::profile::clear(&engine).await?,
        },
        Commands::Notifications { action } => match action {
            NotificationAction::List => commands::notifications::list(&engine).await?,
            NotificationAction::Delete { id } => {
                commands::notifications::delete(&engine, id).await?;
            }
            NotificationAction::Clear => commands::notifications::clear(&engine).await?,
        },
    }
    Ok(())
}
