//! Side-by-side comparison of up to three countries
//!
//! [`ComparisonSelection`] holds the countries picked for comparison and
//! [`comparison_rows`] turns them into table rows with best/worst markers.

use crate::country::Country;
use crate::format::{
    format_area, format_capitals, format_currencies, format_languages, format_population,
    group_thousands,
};
use serde::Serialize;

/// Most countries a comparison can hold.
pub const MAX_COMPARED: usize = 3;
/// Fewest countries needed to show a comparison.
pub const MIN_COMPARED: usize = 2;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You can compare up to 3 countries at once. Remove one first.")]
    SelectionFull,

    #[error("Need at least 2 countries for a comparison, got {0}")]
    NotEnough(usize),
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonSelection {
    countries: Vec<Country>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a country. Adding a country that is already selected is a no-op.
    pub fn add(&mut self, country: Country) -> Result<(), SelectionError> {
        if self.countries.iter().any(|c| c.cca2 == country.cca2) {
            return Ok(());
        }
        if self.countries.len() >= MAX_COMPARED {
            return Err(SelectionError::SelectionFull);
        }
        self.countries.push(country);
        Ok(())
    }

    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.countries.len();
        self.countries.retain(|c| !c.has_code(code));
        self.countries.len() != before
    }

    pub fn clear(&mut self) {
        self.countries.clear();
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// The selected countries, once there are enough to compare
    pub fn ready(&self) -> Result<&[Country], SelectionError> {
        if self.countries.len() < MIN_COMPARED {
            return Err(SelectionError::NotEnough(self.countries.len()));
        }
        Ok(&self.countries)
    }
}

/// Highlight applied to a numeric cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Highest,
    Lowest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    /// Short form shown in the table
    pub display: String,
    /// Long form (all capitals, full currency names)
    pub detail: String,
    /// Raw value for numeric rows
    pub value: Option<f64>,
    pub is_highest: bool,
    pub is_lowest: bool,
    /// Size of the group the markers were computed over
    pub group_size: usize,
}

impl Cell {
    fn text(display: String, detail: String, group_size: usize) -> Self {
        Self {
            display,
            detail,
            value: None,
            is_highest: false,
            is_lowest: false,
            group_size,
        }
    }

    /// Marker to render. Single-country groups are never highlighted.
    pub fn highlight(&self) -> Option<Highlight> {
        if self.group_size <= 1 {
            None
        } else if self.is_highest {
            Some(Highlight::Highest)
        } else if self.is_lowest {
            Some(Highlight::Lowest)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub cells: Vec<Cell>,
}

fn numeric_row(
    label: &'static str,
    countries: &[Country],
    value: impl Fn(&Country) -> f64,
    display: impl Fn(&Country) -> String,
    detail: impl Fn(&Country) -> String,
) -> ComparisonRow {
    let values: Vec<f64> = countries.iter().map(&value).collect();
    let cells = countries
        .iter()
        .zip(&values)
        .map(|(country, &v)| Cell {
            display: display(country),
            detail: detail(country),
            value: Some(v),
            is_highest: values.iter().all(|other| *other <= v),
            is_lowest: values.iter().all(|other| *other >= v),
            group_size: countries.len(),
        })
        .collect();

    ComparisonRow { label, cells }
}

fn text_row(
    label: &'static str,
    countries: &[Country],
    display: impl Fn(&Country) -> String,
    detail: impl Fn(&Country) -> String,
) -> ComparisonRow {
    let cells = countries
        .iter()
        .map(|c| Cell::text(display(c), detail(c), countries.len()))
        .collect();
    ComparisonRow { label, cells }
}

fn density(country: &Country) -> f64 {
    country.population_density().unwrap_or(0.0)
}

/// Build the comparison table rows
///
/// Highest and lowest are computed independently, so tied cells are all marked
/// and a single-country group is marked as both.
pub fn comparison_rows(countries: &[Country]) -> Vec<ComparisonRow> {
    vec![
        numeric_row(
            "Population",
            countries,
            |c| c.population as f64,
            |c| format_population(c.population),
            |c| group_thousands(c.population),
        ),
        numeric_row(
            "Area (km²)",
            countries,
            |c| c.area,
            |c| format!("{} km²", format_area(c.area)),
            |c| format!("{} km²", format_area(c.area)),
        ),
        numeric_row(
            "Population Density",
            countries,
            density,
            |c| format!("{}/km²", density(c).round()),
            |c| format!("{:.2} people/km²", density(c)),
        ),
        text_row(
            "Capital",
            countries,
            |c| c.primary_capital().unwrap_or("No capital").to_string(),
            format_capitals,
        ),
        text_row(
            "Region",
            countries,
            |c| c.region.clone(),
            |c| match &c.subregion {
                Some(sub) => format!("{} ({sub})", c.region),
                None => c.region.clone(),
            },
        ),
        numeric_row(
            "Languages",
            countries,
            |c| c.language_count() as f64,
            |c| format!("{} languages", c.language_count()),
            |c| format_languages(c.languages.as_ref()),
        ),
        numeric_row(
            "Currencies",
            countries,
            |c| c.currency_count() as f64,
            |c| format!("{} currencies", c.currency_count()),
            |c| format_currencies(c.currencies.as_ref()),
        ),
    ]
}

/// Bar widths, in percent of the largest value
pub fn bar_widths(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|v| if max > 0.0 { v / max * 100.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::fixture;

    fn trio() -> Vec<Country> {
        vec![
            fixture("Brazil", "BR", "Americas", 213_000_000, 8_515_767.0),
            fixture("Belgium", "BE", "Europe", 11_500_000, 30_528.0),
            fixture("Peru", "PE", "Americas", 33_000_000, 1_285_216.0),
        ]
    }

    fn row<'a>(rows: &'a [ComparisonRow], label: &str) -> &'a ComparisonRow {
        rows.iter().find(|r| r.label == label).unwrap()
    }

    #[test]
    fn test_selection_limits() {
        let mut selection = ComparisonSelection::new();
        for country in trio() {
            selection.add(country).unwrap();
        }
        let extra = fixture("France", "FR", "Europe", 1, 1.0);
        assert_eq!(selection.add(extra), Err(SelectionError::SelectionFull));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_selection_ignores_duplicates() {
        let mut selection = ComparisonSelection::new();
        selection.add(trio()[0].clone()).unwrap();
        selection.add(trio()[0].clone()).unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.ready().unwrap_err(), SelectionError::NotEnough(1));
    }

    #[test]
    fn test_selection_remove_and_clear() {
        let mut selection = ComparisonSelection::new();
        for country in trio() {
            selection.add(country).unwrap();
        }
        assert!(selection.remove("be"));
        assert!(!selection.remove("be"));
        assert_eq!(selection.ready().unwrap().len(), 2);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_population_highest_and_lowest() {
        let rows = comparison_rows(&trio());
        let population = row(&rows, "Population");

        assert_eq!(population.cells[0].highlight(), Some(Highlight::Highest));
        assert_eq!(population.cells[1].highlight(), Some(Highlight::Lowest));
        assert_eq!(population.cells[2].highlight(), None);
    }

    #[test]
    fn test_ties_mark_every_tied_cell() {
        let rows = comparison_rows(&trio());
        let languages = row(&rows, "Languages");

        assert!(languages.cells.iter().all(|c| c.is_highest && c.is_lowest));
        assert!(languages
            .cells
            .iter()
            .all(|c| c.highlight() == Some(Highlight::Highest)));
    }

    #[test]
    fn test_single_country_marks_both_but_is_not_highlighted() {
        let rows = comparison_rows(&trio()[..1]);
        let area = row(&rows, "Area (km²)");

        assert!(area.cells[0].is_highest);
        assert!(area.cells[0].is_lowest);
        assert_eq!(area.cells[0].highlight(), None);
    }

    #[test]
    fn test_text_rows_have_no_markers() {
        let rows = comparison_rows(&trio());
        let region = row(&rows, "Region");
        assert!(region.cells.iter().all(|c| c.highlight().is_none()));
        assert_eq!(row(&rows, "Capital").cells[0].display, "No capital");
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar_widths(&[50.0, 100.0, 25.0]), vec![50.0, 100.0, 25.0]);
        assert_eq!(bar_widths(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(bar_widths(&[]).is_empty());
    }
}
