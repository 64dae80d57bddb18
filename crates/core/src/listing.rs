//! Paged country views for list output

use crate::country::{Country, CountrySummary};
use crate::filter::{active_filter_tags, apply, stats_text, Filters, ALL_REGIONS};
use crate::pagination::{calculate_pagination, pagination_info, PaginationInfo};
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub stats: String,
    pub active_filters: Vec<String>,
    pub items: Vec<CountrySummary>,
    pub pagination: PaginationInfo,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Command line reproducing `filters` at `page`
pub fn page_command(filters: &Filters, page: usize, limit: usize) -> String {
    let mut command = String::from("flagdex list");

    if filters.region != ALL_REGIONS {
        command.push_str(&format!(" --region {}", filters.region));
    }
    if !filters.search_term.is_empty() {
        command.push_str(&format!(" --search \"{}\"", filters.search_term));
    }
    if !filters.is_default_sort() {
        command.push_str(&format!(" --sort {}-{}", filters.sort_by, filters.sort_order));
    }

    command.push_str(&format!(" --page {page} --limit {limit}"));
    command
}

/// Filter, sort and page `countries`
///
/// `is_favorite` is asked once per item on the requested page.
pub fn build_list_output(
    countries: &[Country],
    filters: &Filters,
    is_favorite: impl Fn(&str) -> bool,
    page: usize,
    limit: usize,
) -> Result<ListOutput, String> {
    let view = apply(countries, filters);
    let (start, end) = calculate_pagination(view.len(), page, limit)?;

    let items = view[start..end]
        .iter()
        .map(|country| CountrySummary::new(country, is_favorite(&country.cca2)))
        .collect();

    let pagination = pagination_info(view.len(), page, limit);
    let next_page_command =
        (page < pagination.total_pages).then(|| page_command(filters, page + 1, limit));
    let prev_page_command = (page > 1).then(|| page_command(filters, page - 1, limit));

    Ok(ListOutput {
        stats: stats_text(view.len(), countries.len()),
        active_filters: active_filter_tags(filters),
        items,
        pagination,
        next_page_command,
        prev_page_command,
    })
}
