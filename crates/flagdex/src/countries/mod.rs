//! Country browsing commands

use crate::fetcher::CountriesClient;
use crate::prelude::{println, *};
use crate::render::Palette;
use flagdex_core::country::{normalize_code, Country, CountrySummary, REGIONS};
use flagdex_core::filter::ALL_REGIONS;
use flagdex_core::format::{format_area, format_population};
use prettytable::{row, Table};
use std::collections::HashSet;

pub mod list;
pub mod region;
pub mod search;
pub mod show;

pub fn client_from_global(global: &crate::Global) -> Result<CountriesClient> {
    let config = crate::config::ApiConfig::from_global(global);
    if global.verbose {
        println!("REST Countries API Base: {}", config.base_url);
        println!();
    }
    Ok(CountriesClient::new(config)?)
}

/// cca2 codes of the stored favorites
///
/// Listing still works when the data directory can't be resolved; nothing is
/// marked in that case.
pub fn favorite_codes(global: &crate::Global) -> HashSet<String> {
    match crate::config::storage_from_global(global) {
        Ok(storage) => crate::favorites::FavoritesStore::open(storage)
            .get_favorites()
            .into_iter()
            .map(|f| f.cca2)
            .collect(),
        Err(err) => {
            log::warn!("Favorites unavailable: {err}");
            HashSet::new()
        }
    }
}

/// Map a region name to its canonical spelling, accepting `all`
pub fn canonical_region(region: &str) -> Result<String, Error> {
    let region = region.trim();
    if region.eq_ignore_ascii_case(ALL_REGIONS) {
        return Ok(ALL_REGIONS.to_string());
    }

    REGIONS
        .iter()
        .find(|r| r.eq_ignore_ascii_case(region))
        .map(|r| r.to_string())
        .ok_or_else(|| {
            Error::Parse(format!(
                "Invalid region: {region}. Valid regions: all, {}",
                REGIONS.join(", ")
            ))
        })
}

/// Fetch one country by code, failing when the code is malformed or unknown
pub async fn resolve_country(client: &CountriesClient, code: &str) -> Result<Country, Error> {
    let code = normalize_code(code).map_err(Error::Parse)?;
    client
        .get_country_details(&code)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No country with code {code}")))
}

/// Table of country summaries, favorites starred
pub fn summary_table(items: &[CountrySummary], palette: &Palette) -> Table {
    let mut table = new_table();
    table.add_row(row![
        "",
        palette.label("CODE"),
        palette.label("NAME"),
        palette.label("CAPITAL"),
        palette.label("REGION"),
        palette.label("POPULATION"),
        palette.label("AREA (km²)"),
    ]);

    for item in items {
        table.add_row(row![
            if item.favorite { "★" } else { "" },
            palette.accent(&item.cca2),
            item.name,
            item.capital.as_deref().unwrap_or("-"),
            palette.muted(&item.region),
            r->format_population(item.population),
            r->format_area(item.area),
        ]);
    }

    table
}

/// Plain summaries for a fetched country list
pub fn summarize(countries: &[Country], favorites: &HashSet<String>) -> Vec<CountrySummary> {
    countries
        .iter()
        .map(|c| CountrySummary::new(c, favorites.contains(&c.cca2)))
        .collect()
}
