//! Page bounds for list output

use serde::Serialize;

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
}

/// Calculate pagination bounds for a given page
///
/// Returns (start_index, end_index) for slicing the items array. An empty list
/// has a single empty page; any other out-of-range page is an error.
pub fn calculate_pagination(
    total_items: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), String> {
    if page == 0 {
        return Err("Page numbers start at 1".to_string());
    }
    if limit == 0 {
        return Err("Limit must be greater than 0".to_string());
    }
    if total_items == 0 && page == 1 {
        return Ok((0, 0));
    }

    let start = (page - 1) * limit;

    if start >= total_items {
        let total_pages = total_items.div_ceil(limit);
        return Err(format!(
            "Page {page} is out of range. Only {total_pages} pages available."
        ));
    }

    let end = (start + limit).min(total_items);
    Ok((start, end))
}

pub fn pagination_info(total_items: usize, page: usize, limit: usize) -> PaginationInfo {
    PaginationInfo {
        current_page: page,
        total_pages: total_items.div_ceil(limit.max(1)).max(1),
        total_items,
        limit,
    }
}
