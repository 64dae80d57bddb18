use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use flagdex_core::country::CountrySummary;
use flagdex_core::filter::ALL_REGIONS;
use serde::Serialize;

use super::{canonical_region, client_from_global, favorite_codes, summarize, summary_table};

#[derive(Debug, clap::Args, Clone)]
pub struct RegionOptions {
    /// Africa, Americas, Asia, Europe or Oceania
    #[arg(value_name = "REGION")]
    pub region: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RegionsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RegionOutput {
    region: String,
    items: Vec<CountrySummary>,
}

pub async fn run(options: RegionOptions, global: crate::Global) -> Result<()> {
    let region = canonical_region(&options.region)?;
    if region == ALL_REGIONS {
        return Err(eyre!("Use `flagdex list` to see every region"));
    }

    let client = client_from_global(&global)?;
    let progress = spinner(format!("Loading {region}..."));
    let countries = client.get_countries_by_region(&region).await;
    progress.finish_and_clear();
    let countries = countries?;

    let items = summarize(&countries, &favorite_codes(&global));

    if options.json {
        let output = RegionOutput { region, items };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            format_region_text(&region, &items, &palette_from_global(&global))
        );
    }

    Ok(())
}

pub async fn run_regions(options: RegionsOptions, global: crate::Global) -> Result<()> {
    let regions = client_from_global(&global)?.regions();
    if options.json {
        println!("{}", serde_json::to_string_pretty(regions)?);
    } else {
        print!("{}", format_regions_text(regions, &palette_from_global(&global)));
    }
    Ok(())
}

fn format_region_text(region: &str, items: &[CountrySummary], palette: &Palette) -> String {
    let mut result = palette.header(&region.to_uppercase());

    if items.is_empty() {
        result.push_str(&format!("\n{}\n", palette.muted("No countries in this region.")));
    } else {
        result.push_str(&format!(
            "\n{}\n\n",
            palette.accent(&format!("{} countries", items.len()))
        ));
        result.push_str(&summary_table(items, palette).to_string());
    }

    result.push('\n');
    result
}

fn format_regions_text(regions: &[&str], palette: &Palette) -> String {
    let mut result = palette.header("REGIONS");
    result.push('\n');
    for region in regions {
        result.push_str(&format!(
            "  {:<10} {}\n",
            region,
            palette.muted(&format!("flagdex region {}", region.to_lowercase()))
        ));
    }
    result.push('\n');
    result
}
