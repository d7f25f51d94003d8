mod account;
mod catalog;
mod theme;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopfront_content::ContentClient;
use shopfront_session::{FileStore, LocalStore, MockAuthProvider};
use tracing_subscriber::EnvFilter;

use crate::theme::ThemeCommands;

#[derive(Debug, Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Browse the shop catalog and manage your session")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List categories that have a name
    Categories,
    /// List the products in a category
    Products {
        /// Category id
        #[arg(long)]
        category: i64,
    },
    /// Show a single product
    Product {
        /// Product id as it appears in links (e.g. 12)
        id: String,
    },
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Sign in (mock provider; any non-empty credentials are accepted)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (mock provider)
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Full name shown on the profile
        #[arg(long)]
        name: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopfront_core::load_client_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = ContentClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build content client: {e}"))?;
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(&config.storage_path)?);
    let auth = MockAuthProvider::new(Arc::clone(&store));

    match cli.command {
        Commands::Categories => catalog::run_categories(&client).await?,
        Commands::Products { category } => {
            catalog::run_products(&client, &config, category).await?;
        }
        Commands::Product { id } => catalog::run_product(&client, &config, &id).await?,
        Commands::Theme { command } => {
            theme::run_theme(command, client, store, &auth).await?;
        }
        Commands::Login { email, password } => {
            account::run_login(&auth, &email, &password).await?;
        }
        Commands::Signup {
            email,
            password,
            name,
        } => account::run_signup(&auth, &email, &password, &name).await?,
        Commands::Logout => account::run_logout(&auth).await?,
        Commands::Whoami => account::run_whoami(&auth)?,
    }

    Ok(())
}
