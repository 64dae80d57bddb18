//! REST Countries API endpoints
//!
//! URL construction and response classification. The shell owns the HTTP
//! client; everything here is string and status-code arithmetic.

use crate::country::Country;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://restcountries.com/v3.1";

/// Attributes requested by the list endpoints
pub const ESSENTIAL_FIELDS: &str = "name,flags,cca2,cca3,region,subregion,population,area,capital";

fn base(api_base: &str) -> &str {
    api_base.trim_end_matches('/')
}

/// Percent-encode a single path segment
fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

pub fn all_url(api_base: &str) -> String {
    format!("{}/all?fields={ESSENTIAL_FIELDS}", base(api_base))
}

pub fn region_url(api_base: &str, region: &str) -> String {
    format!(
        "{}/region/{}?fields={ESSENTIAL_FIELDS}",
        base(api_base),
        segment(region)
    )
}

pub fn name_url(api_base: &str, term: &str) -> String {
    format!(
        "{}/name/{}?fields={ESSENTIAL_FIELDS}",
        base(api_base),
        segment(term)
    )
}

/// Detail lookup; returns the full payload including currencies and languages
pub fn alpha_url(api_base: &str, code: &str) -> String {
    format!("{}/alpha/{}", base(api_base), segment(code))
}

/// How a response status should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    /// 404 on lookups means "no results", not a failure
    NotFound,
    Failure,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        404 => StatusClass::NotFound,
        _ => StatusClass::Failure,
    }
}

/// Result of a remote name search
///
/// Keeps "no country matches" apart from "the request failed".
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<Country>),
    NotFound,
    Failed(String),
}

impl SearchOutcome {
    /// Matches, treating both a miss and a failure as empty
    pub fn countries(&self) -> &[Country] {
        match self {
            SearchOutcome::Found(countries) => countries,
            SearchOutcome::NotFound | SearchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}
