//! Cedarline CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! cedarline-cli migrate run
//!
//! # Create an admin user with a generated password
//! cedarline-cli admin create -e admin@example.com -n "Admin Name" -r super_admin
//!
//! # Seed a demo catalog into an empty database
//! cedarline-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate run` - Run database migrations
//! - `admin create` - Create admin users
//! - `seed` - Seed the database with a demo catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cedarline-cli")]
#[command(author, version, about = "Cedarline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with a demo catalog
    Seed,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Run,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin role (`super_admin`, `admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Initial password (generated and printed when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                role,
                password,
            } => {
                commands::admin::create_user(&email, &name, &role, password.as_deref()).await?;
            }
        },
        Commands::Seed => commands::seed::demo_catalog().await?,
    }
    Ok(())
}
