use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use flagdex_core::filter::{parse_sort_spec, Filters, ALL_REGIONS};
use flagdex_core::listing::{build_list_output, ListOutput};

use super::{canonical_region, client_from_global, favorite_codes, summary_table};

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Region to show: all, Africa, Americas, Asia, Europe, Oceania
    #[arg(short, long, default_value = ALL_REGIONS)]
    pub region: String,

    /// Case-insensitive match against names and capitals
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort as KEY-ORDER: name-asc, population-desc, area-asc, ...
    #[arg(long, default_value = "name-asc")]
    pub sort: String,

    /// Number of countries per page
    #[arg(short, long, env = "FLAGDEX_LIMIT", default_value = "25")]
    pub limit: usize,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    fn filters(&self) -> Result<Filters, Error> {
        let (sort_by, sort_order) = parse_sort_spec(&self.sort).map_err(Error::Parse)?;
        Ok(Filters::default()
            .with_region(canonical_region(&self.region)?)
            .with_search(self.search.trim())
            .with_sort(sort_by, sort_order))
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let filters = options.filters()?;
    let client = client_from_global(&global)?;

    let progress = spinner("Loading countries...");
    let countries = client.get_all_countries().await;
    progress.finish_and_clear();
    let countries = countries?;

    let favorites = favorite_codes(&global);
    let output = build_list_output(
        countries,
        &filters,
        |code| favorites.contains(code),
        options.page,
        options.limit,
    )
    .map_err(|e| eyre!("{e}"))?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output, &palette_from_global(&global)));
    }

    Ok(())
}

/// Convert list output to JSON string
fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_list_text(output: &ListOutput, palette: &Palette) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&palette.header(&format!(
        "COUNTRIES (Page {} of {})",
        pagination.current_page, pagination.total_pages
    )));

    result.push_str(&format!("\n{}\n", palette.accent(&output.stats)));
    if !output.active_filters.is_empty() {
        result.push_str(&format!(
            "{}\n",
            palette.muted(&output.active_filters.join(" | "))
        ));
    }

    if output.items.is_empty() {
        result.push_str(&format!(
            "\n{}\n",
            palette.muted("No countries match your filters.")
        ));
    } else {
        result.push('\n');
        result.push_str(&summary_table(&output.items, palette).to_string());
    }

    if output.next_page_command.is_some() || output.prev_page_command.is_some() {
        result.push_str(&format!("\n{}:\n", palette.label("To navigate")));
        if let Some(next) = &output.next_page_command {
            result.push_str(&format!("  Next page: {}\n", palette.accent(next)));
        }
        if let Some(prev) = &output.prev_page_command {
            result.push_str(&format!("  Previous page: {}\n", palette.accent(prev)));
        }
    }

    if let Some(first) = output.items.first() {
        result.push_str(&format!(
            "\n{}: {}\n",
            palette.label("Details"),
            palette.accent(&format!("flagdex show {}", first.cca2))
        ));
    }

    result.push('\n');
    result
}
