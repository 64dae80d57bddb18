//! Side-by-side country comparison

use crate::countries::{client_from_global, resolve_country};
use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use colored::Colorize;
use flagdex_core::compare::{
    bar_widths, comparison_rows, ComparisonRow, ComparisonSelection, Highlight,
};
use flagdex_core::country::Country;
use flagdex_core::format::{format_area, format_population};
use futures::future::join_all;
use prettytable::{Cell, Row};
use serde::Serialize;

const BAR_WIDTH: usize = 40;

#[derive(Debug, clap::Args, Clone)]
pub struct CompareOptions {
    /// Two or three country codes (cca2 or cca3)
    #[arg(value_name = "CODE", required = true, num_args = 1..)]
    pub codes: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    countries: Vec<&'a str>,
    rows: Vec<ComparisonRow>,
}

pub async fn run(options: CompareOptions, global: crate::Global) -> Result<()> {
    let client = client_from_global(&global)?;

    let progress = spinner(format!("Loading {}...", options.codes.join(", ")));
    let fetched = join_all(options.codes.iter().map(|code| resolve_country(&client, code))).await;
    progress.finish_and_clear();

    let mut selection = ComparisonSelection::new();
    for country in fetched {
        selection.add(country?).map_err(Error::from)?;
    }
    let countries = selection.ready().map_err(Error::from)?;
    let rows = comparison_rows(countries);

    if options.json {
        let output = CompareOutput {
            countries: countries.iter().map(|c| c.name.common.as_str()).collect(),
            rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            format_compare_text(countries, &rows, &palette_from_global(&global))
        );
    }

    Ok(())
}

fn marked(display: &str, highlight: Option<Highlight>, palette: &Palette) -> String {
    match highlight {
        Some(Highlight::Highest) => format!("{} ▲", display).color(palette.highest).to_string(),
        Some(Highlight::Lowest) => format!("{} ▼", display).color(palette.lowest).to_string(),
        None => display.to_string(),
    }
}

fn bar(width_pct: f64) -> String {
    let filled = ((width_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

fn format_chart(
    title: &str,
    countries: &[Country],
    values: &[f64],
    label: impl Fn(&Country) -> String,
    palette: &Palette,
) -> String {
    let mut result = format!("\n{}\n", palette.label(title));
    let name_width = countries
        .iter()
        .map(|c| c.name.common.chars().count())
        .max()
        .unwrap_or(0);

    for (country, width) in countries.iter().zip(bar_widths(values)) {
        result.push_str(&format!(
            "  {:<name_width$} {} {}\n",
            country.name.common,
            palette.accent(&bar(width)),
            palette.muted(&label(country)),
        ));
    }
    result
}

fn format_compare_text(countries: &[Country], rows: &[ComparisonRow], palette: &Palette) -> String {
    let names: Vec<&str> = countries.iter().map(|c| c.name.common.as_str()).collect();
    let mut result = palette.header(&format!("COMPARING {}", names.join(" / ").to_uppercase()));

    let mut table = new_table();
    let mut header = vec![Cell::new("")];
    header.extend(names.iter().map(|n| Cell::new(&palette.accent(n).to_string())));
    table.add_row(Row::new(header));

    for row in rows {
        let mut cells = vec![Cell::new(&palette.label(row.label).to_string())];
        cells.extend(
            row.cells
                .iter()
                .map(|cell| Cell::new(&marked(&cell.display, cell.highlight(), palette))),
        );
        table.add_row(Row::new(cells));
    }

    result.push('\n');
    result.push_str(&table.to_string());
    result.push_str(&format!(
        "{}\n",
        palette.muted("▲ highest  ▼ lowest")
    ));

    let population: Vec<f64> = countries.iter().map(|c| c.population as f64).collect();
    result.push_str(&format_chart(
        "Population",
        countries,
        &population,
        |c| format_population(c.population),
        palette,
    ));

    let area: Vec<f64> = countries.iter().map(|c| c.area).collect();
    result.push_str(&format_chart(
        "Area",
        countries,
        &area,
        |c| format!("{} km²", format_area(c.area)),
        palette,
    ));

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagdex_core::country::fixture;

    fn pair() -> Vec<Country> {
        vec![
            fixture("Brazil", "BR", "Americas", 212_000_000, 8_515_767.0),
            fixture("Chile", "CL", "Americas", 19_000_000, 756_102.0),
        ]
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(100.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(50.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0), "");
    }

    #[test]
    fn test_marked() {
        colored::control::set_override(false);
        let palette = Palette::default();
        assert_eq!(marked("212.0M", Some(Highlight::Highest), &palette), "212.0M ▲");
        assert_eq!(marked("19.0M", Some(Highlight::Lowest), &palette), "19.0M ▼");
        assert_eq!(marked("Americas", None, &palette), "Americas");
    }

    #[test]
    fn test_format_compare_text() {
        colored::control::set_override(false);
        let countries = pair();
        let rows = comparison_rows(&countries);

        let text = format_compare_text(&countries, &rows, &Palette::default());

        assert!(text.contains("COMPARING BRAZIL / CHILE"));
        assert!(text.contains("212.0M ▲"));
        assert!(text.contains("19.0M ▼"));
        assert!(text.contains("Population Density"));
        assert!(text.contains(&"█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_selection_rejects_duplicates_and_overflow() {
        let mut selection = ComparisonSelection::new();
        for country in pair() {
            selection.add(country).unwrap();
        }
        selection.add(fixture("Brazil", "BR", "Americas", 1, 1.0)).unwrap();
        assert_eq!(selection.len(), 2);

        selection.add(fixture("Peru", "PE", "Americas", 1, 1.0)).unwrap();
        let err = Error::from(
            selection
                .add(fixture("Japan", "JP", "Asia", 1, 1.0))
                .unwrap_err(),
        );
        assert!(err.to_string().contains("up to 3"));
    }

    #[test]
    fn test_compare_options_accept_codes() {
        let app = <crate::App as clap::Parser>::parse_from(["flagdex", "compare", "br", "cl"]);
        match app.command {
            crate::SubCommands::Compare(options) => assert_eq!(options.codes, vec!["br", "cl"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
