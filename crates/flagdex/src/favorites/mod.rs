use crate::countries::{client_from_global, resolve_country};
use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use crate::storage::FileStorage;
use flagdex_core::country::normalize_code;
use flagdex_core::favorites::{FavoriteCountry, DEFAULT_RECENT_LIMIT};
use flagdex_core::format::format_timestamp_ms;
use prettytable::row;
use std::cell::Cell;
use std::rc::Rc;

pub mod store;

pub use store::FavoritesStore;

#[derive(Debug, clap::Parser)]
#[command(name = "favorites")]
#[command(about = "Manage favorite countries")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List favorites, newest first
    #[clap(name = "list")]
    List(OutputOptions),

    /// Add a country to the favorites
    #[clap(name = "add")]
    Add(CodeOptions),

    /// Remove a country from the favorites
    #[clap(name = "remove")]
    Remove(CodeOptions),

    /// Add the country if missing, remove it otherwise
    #[clap(name = "toggle")]
    Toggle(CodeOptions),

    /// Remove every favorite
    #[clap(name = "clear")]
    Clear,

    /// Search favorites by name
    #[clap(name = "search")]
    Search(SearchOptions),

    /// Most recently added favorites
    #[clap(name = "recent")]
    Recent(RecentOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct CodeOptions {
    /// Country code, cca2 or cca3
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RecentOptions {
    /// How many favorites to show
    #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let storage = crate::config::storage_from_global(&global)?;
    if global.verbose {
        println!("Data directory: {}", storage.dir().display());
        println!();
    }

    let mut store = FavoritesStore::open(storage);
    let palette = palette_from_global(&global);

    let saved = Rc::new(Cell::new(None));
    let subscription = {
        let saved = Rc::clone(&saved);
        store.on_favorites_change(move |entries| {
            log::debug!("favorites changed: {} saved", entries.len());
            saved.set(Some(entries.len()));
        })
    };

    let result = dispatch(app.command, &mut store, &global, &palette).await;
    store.unsubscribe(subscription);
    result?;

    if let Some(count) = saved.get() {
        println!("{}", palette.muted(&format!("{count} favorites saved")));
    }
    Ok(())
}

async fn dispatch(
    command: Commands,
    store: &mut FavoritesStore<FileStorage>,
    global: &crate::Global,
    palette: &Palette,
) -> Result<()> {
    match command {
        Commands::List(options) => {
            let entries = store.get_favorites();
            output(&entries, "FAVORITES", "No favorites yet.", options.json, palette)
        }
        Commands::Add(options) => {
            let country = fetch_country(global, &options.code).await?;
            if store.is_favorite(&country.cca2) {
                println!("{} is already a favorite", country.name.common);
            } else {
                store.add_favorite(&country);
                println!("Added {} to favorites", palette.accent(&country.name.common));
            }
            Ok(())
        }
        Commands::Remove(options) => {
            let code = favorite_code(global, &options.code).await?;
            if store.is_favorite(&code) {
                store.remove_favorite(&code);
                println!("Removed {} from favorites", palette.accent(&code));
            } else {
                println!("{code} is not a favorite");
            }
            Ok(())
        }
        Commands::Toggle(options) => {
            let country = fetch_country(global, &options.code).await?;
            let verb = if store.toggle_favorite(&country) {
                "Added"
            } else {
                "Removed"
            };
            println!("{verb} {}", palette.accent(&country.name.common));
            Ok(())
        }
        Commands::Clear => {
            let removed = store.count();
            store.clear_favorites();
            println!("Cleared {removed} favorites");
            Ok(())
        }
        Commands::Search(options) => {
            let entries = store.search_favorites(&options.query);
            let title = format!("FAVORITES MATCHING \"{}\"", options.query.trim());
            output(&entries, &title, "No favorites match.", options.json, palette)
        }
        Commands::Recent(options) => {
            let entries = store.recent(options.limit);
            output(
                &entries,
                "RECENT FAVORITES",
                "No favorites yet.",
                options.json,
                palette,
            )
        }
    }
}

async fn fetch_country(
    global: &crate::Global,
    code: &str,
) -> Result<flagdex_core::country::Country> {
    let client = client_from_global(global)?;
    let progress = spinner(format!("Looking up {}...", code.trim()));
    let country = resolve_country(&client, code).await;
    progress.finish_and_clear();
    Ok(country?)
}

/// cca2 code for `code`; cca3 codes are resolved through the API
async fn favorite_code(global: &crate::Global, code: &str) -> Result<String> {
    let code = normalize_code(code).map_err(Error::Parse)?;
    if code.len() == 2 {
        return Ok(code);
    }
    Ok(fetch_country(global, &code).await?.cca2)
}

fn output(
    entries: &[FavoriteCountry],
    title: &str,
    empty: &str,
    json: bool,
    palette: &Palette,
) -> Result<()> {
    if json {
        println!("{}", format_favorites_json(entries)?);
    } else {
        print!("{}", format_favorites_text(entries, title, empty, palette));
    }
    Ok(())
}

fn format_favorites_json(entries: &[FavoriteCountry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_favorites_text(
    entries: &[FavoriteCountry],
    title: &str,
    empty: &str,
    palette: &Palette,
) -> String {
    let mut result = palette.header(title);

    if entries.is_empty() {
        result.push_str(&format!("\n{}\n", palette.muted(empty)));
        result.push_str(&format!(
            "{}: {}\n\n",
            palette.label("Add one"),
            palette.accent("flagdex favorites add <code>")
        ));
        return result;
    }

    let mut table = new_table();
    table.add_row(row![
        palette.label("CODE"),
        palette.label("NAME"),
        palette.label("ADDED"),
        palette.label("FLAG"),
    ]);
    for entry in entries {
        table.add_row(row![
            palette.accent(&entry.cca2),
            entry.name,
            format_timestamp_ms(entry.added_at).unwrap_or_else(|| "-".to_string()),
            palette.muted(&entry.flag),
        ]);
    }

    result.push('\n');
    result.push_str(&table.to_string());
    result.push('\n');
    result
}
