use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use flagdex_core::country::Country;
use flagdex_core::format::{
    format_area, format_capitals, format_currencies, format_languages, format_population,
    group_thousands,
};
use prettytable::row;
use serde::Serialize;

use super::{client_from_global, favorite_codes, resolve_country};

#[derive(Debug, clap::Args, Clone)]
pub struct ShowOptions {
    /// Country code, cca2 or cca3 (e.g. BR or BRA)
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DetailsOutput<'a> {
    #[serde(flatten)]
    country: &'a Country,
    favorite: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let client = client_from_global(&global)?;

    let progress = spinner(format!("Loading {}...", options.code.trim()));
    let country = resolve_country(&client, &options.code).await;
    progress.finish_and_clear();
    let country = country?;

    let favorite = favorite_codes(&global).contains(&country.cca2);

    if options.json {
        let output = DetailsOutput {
            country: &country,
            favorite,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            format_details_text(&country, favorite, &palette_from_global(&global))
        );
    }

    Ok(())
}

fn format_details_text(country: &Country, favorite: bool, palette: &Palette) -> String {
    let mut result = String::new();
    let title = if favorite {
        format!("★ {}", country.name.common)
    } else {
        country.name.common.clone()
    };
    result.push_str(&palette.header(&title.to_uppercase()));

    let density = country
        .population_density()
        .map(|d| format!("{:.2} people/km²", d))
        .unwrap_or_else(|| "-".to_string());

    let mut table = new_table();
    table.add_row(row![palette.label("Official name"), country.name.official]);
    table.add_row(row![
        palette.label("Codes"),
        format!("{} / {}", country.cca2, country.cca3)
    ]);
    table.add_row(row![palette.label("Capital"), format_capitals(country)]);
    table.add_row(row![palette.label("Region"), country.region]);
    if let Some(subregion) = &country.subregion {
        table.add_row(row![palette.label("Subregion"), subregion]);
    }
    table.add_row(row![
        palette.label("Population"),
        format!(
            "{} ({})",
            group_thousands(country.population),
            format_population(country.population)
        )
    ]);
    table.add_row(row![
        palette.label("Area"),
        format!("{} km²", format_area(country.area))
    ]);
    table.add_row(row![palette.label("Density"), density]);
    table.add_row(row![
        palette.label("Languages"),
        format_languages(country.languages.as_ref())
    ]);
    table.add_row(row![
        palette.label("Currencies"),
        format_currencies(country.currencies.as_ref())
    ]);
    table.add_row(row![palette.label("Flag"), palette.muted(&country.flags.png)]);

    result.push('\n');
    result.push_str(&table.to_string());

    let action = if favorite { "remove" } else { "add" };
    result.push_str(&format!(
        "\n{}: {}\n\n",
        palette.label(if favorite { "Unfavorite" } else { "Favorite" }),
        palette.accent(&format!("flagdex favorites {action} {}", country.cca2))
    ));

    result
}
