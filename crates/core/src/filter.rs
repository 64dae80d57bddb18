//! Filter/sort engine
//!
//! Derives the visible view of the country list from a [`Filters`] value. The
//! pipeline is region filter, then search filter, then a stable sort, and has
//! no side effects: the input slice is never reordered.

use crate::collate::locale_compare;
use crate::country::Country;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Region value that disables the region filter.
pub const ALL_REGIONS: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Population,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "population" => Ok(SortBy::Population),
            "area" => Ok(SortBy::Area),
            other => Err(format!(
                "Invalid sort key: {other}. Valid keys: name, population, area"
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {other}. Valid orders: asc, desc")),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Name => write!(f, "name"),
            SortBy::Population => write!(f, "population"),
            SortBy::Area => write!(f, "area"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Parse the combined `key-order` form used by the sort selector
///
/// `"population-desc"` gives `(Population, Desc)`; a bare key defaults to
/// ascending.
pub fn parse_sort_spec(spec: &str) -> Result<(SortBy, SortOrder), String> {
    match spec.split_once('-') {
        Some((key, order)) => Ok((key.parse()?, order.parse()?)),
        None => Ok((spec.parse()?, SortOrder::Asc)),
    }
}

/// View parameters held by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub region: String,
    pub search_term: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            region: ALL_REGIONS.to_string(),
            search_term: String::new(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl Filters {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    pub fn is_default_sort(&self) -> bool {
        self.sort_by == SortBy::Name && self.sort_order == SortOrder::Asc
    }
}

fn matches_region(country: &Country, region: &str) -> bool {
    region == ALL_REGIONS || country.region == region
}

/// Case-insensitive match against names and capitals
///
/// `needle` must already be lowercased.
fn matches_search(country: &Country, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    country.name.common.to_lowercase().contains(needle)
        || country.name.official.to_lowercase().contains(needle)
        || country
            .capital
            .as_ref()
            .is_some_and(|caps| caps.iter().any(|cap| cap.to_lowercase().contains(needle)))
}

fn compare_by(a: &Country, b: &Country, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => locale_compare(&a.name.common, &b.name.common),
        SortBy::Population => a.population.cmp(&b.population),
        SortBy::Area => a.area.total_cmp(&b.area),
    }
}

/// Sort a copy of `countries`
///
/// The sort is stable, so entries with equal keys keep their relative order in
/// both directions.
pub fn sort_countries(countries: &[Country], sort_by: SortBy, sort_order: SortOrder) -> Vec<Country> {
    let mut sorted = countries.to_vec();
    sort_in_place(&mut sorted, sort_by, sort_order);
    sorted
}

fn sort_in_place(countries: &mut [Country], sort_by: SortBy, sort_order: SortOrder) {
    countries.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Sort by common name, ascending. This is the baseline order of the cache.
pub fn sort_by_name(countries: &mut [Country]) {
    sort_in_place(countries, SortBy::Name, SortOrder::Asc);
}

/// Apply the region filter, the search filter and the sort, in that order
pub fn apply(countries: &[Country], filters: &Filters) -> Vec<Country> {
    let needle = filters.search_term.to_lowercase();

    let mut view: Vec<Country> = countries
        .iter()
        .filter(|c| matches_region(c, &filters.region))
        .filter(|c| matches_search(c, &needle))
        .cloned()
        .collect();

    sort_in_place(&mut view, filters.sort_by, filters.sort_order);
    view
}

/// Summary line shown above the results
pub fn stats_text(filtered: usize, total: usize) -> String {
    if filtered == total {
        format!("{total} countries")
    } else {
        format!("{filtered} of {total} countries")
    }
}

/// Human-readable labels for the filters that differ from the defaults
pub fn active_filter_tags(filters: &Filters) -> Vec<String> {
    let mut tags = Vec::new();

    if filters.region != ALL_REGIONS {
        tags.push(format!("Region: {}", filters.region));
    }

    if !filters.search_term.is_empty() {
        tags.push(format!("Search: \"{}\"", filters.search_term));
    }

    if !filters.is_default_sort() {
        let label = match (filters.sort_by, filters.sort_order) {
            (SortBy::Name, SortOrder::Asc) => "Name (A-Z)",
            (SortBy::Name, SortOrder::Desc) => "Name (Z-A)",
            (SortBy::Population, SortOrder::Asc) => "Population (Low-High)",
            (SortBy::Population, SortOrder::Desc) => "Population (High-Low)",
            (SortBy::Area, SortOrder::Asc) => "Area (Small-Large)",
            (SortBy::Area, SortOrder::Desc) => "Area (Large-Small)",
        };
        tags.push(format!("Sort: {label}"));
    }

    tags
}
