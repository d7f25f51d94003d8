//! Theme command handlers.

use std::sync::Arc;

use clap::Subcommand;
use shopfront_content::ContentClient;
use shopfront_core::Theme;
use shopfront_session::{AuthProvider, LocalStore, ThemeStore};

/// Sub-commands available under `theme`.
#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Print the current theme
    Get,
    /// Set the theme
    Set {
        /// `light` or `dark`
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
    /// Switch between light and dark
    Toggle,
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    raw.parse::<Theme>().map_err(|e| e.to_string())
}

/// Loads the theme (remote first when signed in), then applies the command.
pub(crate) async fn run_theme(
    command: ThemeCommands,
    client: ContentClient,
    store: Arc<dyn LocalStore>,
    auth: &dyn AuthProvider,
) -> anyhow::Result<()> {
    let token = auth.current_session()?.map(|session| session.token);
    let mut themes = ThemeStore::new(store, Arc::new(client));
    let current = themes.load(token.as_deref()).await;

    match command {
        ThemeCommands::Get => println!("{current}"),
        ThemeCommands::Set { theme } => {
            themes.set(theme).await?;
            println!("Theme set to {theme}");
        }
        ThemeCommands::Toggle => {
            let next = themes.toggle().await?;
            println!("Theme set to {next}");
        }
    }
    Ok(())
}
