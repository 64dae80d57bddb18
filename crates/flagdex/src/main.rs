use crate::prelude::*;
use clap::Parser;
use flagdex_core::api::DEFAULT_API_BASE;
use flagdex_core::retry::{Backoff, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};
use std::path::PathBuf;

mod compare;
mod config;
mod countries;
mod error;
mod favorites;
mod fetcher;
mod prelude;
mod render;
mod storage;
mod theme;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Explore, filter, favorite and compare the countries of the world"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// REST Countries API base URL
    #[clap(long, env = "FLAGDEX_API_BASE", global = true, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Directory holding favorites and the theme preference
    #[clap(long, env = "FLAGDEX_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Attempts per request before giving up
    #[clap(long, env = "FLAGDEX_MAX_ATTEMPTS", global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay between attempts, in milliseconds
    #[clap(long, env = "FLAGDEX_RETRY_DELAY_MS", global = true, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    retry_delay_ms: u64,

    /// Delay growth between attempts: fixed or exponential
    #[clap(long, env = "FLAGDEX_BACKOFF", global = true, default_value = "fixed")]
    backoff: Backoff,

    /// Whether to display additional information.
    #[clap(long, env = "FLAGDEX_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List countries with region, search and sort filters
    List(crate::countries::list::ListOptions),

    /// Show the details of one country
    Show(crate::countries::show::ShowOptions),

    /// Search countries by name through the API
    Search(crate::countries::search::SearchOptions),

    /// List the countries of one region
    Region(crate::countries::region::RegionOptions),

    /// List the available regions
    Regions(crate::countries::region::RegionsOptions),

    /// Manage favorite countries
    Favorites(crate::favorites::App),

    /// Compare two or three countries side by side
    Compare(crate::compare::CompareOptions),

    /// Show or change the color theme
    Theme(crate::theme::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::countries::list::run(options, app.global).await,
        SubCommands::Show(options) => crate::countries::show::run(options, app.global).await,
        SubCommands::Search(options) => crate::countries::search::run(options, app.global).await,
        SubCommands::Region(options) => crate::countries::region::run(options, app.global).await,
        SubCommands::Regions(options) => {
            crate::countries::region::run_regions(options, app.global).await
        }
        SubCommands::Favorites(sub_app) => crate::favorites::run(sub_app, app.global).await,
        SubCommands::Compare(options) => crate::compare::run(options, app.global).await,
        SubCommands::Theme(sub_app) => crate::theme::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
