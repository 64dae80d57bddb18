use crate::prelude::{println, *};
use flagdex_core::theme::Theme;

pub mod store;

pub use store::ThemeStore;

#[derive(Debug, clap::Parser)]
#[command(name = "theme")]
#[command(about = "Show or change the color theme")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Print the current theme
    #[clap(name = "get")]
    Get,

    /// Set the theme (light or dark)
    #[clap(name = "set")]
    Set {
        #[arg(value_name = "THEME")]
        theme: Theme,
    },

    /// Switch between light and dark
    #[clap(name = "toggle")]
    Toggle,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let storage = crate::config::storage_from_global(&global)?;
    let mut store = ThemeStore::open(storage);

    let theme = match app.command.unwrap_or(Commands::Get) {
        Commands::Get => store.current(),
        Commands::Set { theme } => {
            store.set(theme);
            theme
        }
        Commands::Toggle => store.toggle(),
    };

    println!("{theme}");
    Ok(())
}
