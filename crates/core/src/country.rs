use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Regions accepted by the `/region/{region}` endpoint.
pub const REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

/// Country as returned by the REST Countries API
///
/// Only the essential attributes are modeled. Unknown fields in the payload are
/// ignored, and the optional ones are absent from the `fields=`-restricted list
/// endpoints.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Country {
    pub name: CountryName,
    pub cca2: String,
    pub cca3: String,
    pub flags: Flags,
    pub capital: Option<Vec<String>>,
    pub region: String,
    pub subregion: Option<String>,
    pub population: u64,
    pub area: f64,
    pub currencies: Option<BTreeMap<String, Currency>>,
    pub languages: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Currency {
    pub name: String,
    // A handful of currencies ship without a symbol.
    #[serde(default)]
    pub symbol: String,
}

impl Country {
    /// First capital, if any
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|caps| caps.first())
            .map(String::as_str)
    }

    /// Whether `code` names this country, as either cca2 or cca3
    pub fn has_code(&self, code: &str) -> bool {
        self.cca2.eq_ignore_ascii_case(code) || self.cca3.eq_ignore_ascii_case(code)
    }

    /// People per km², or `None` for countries without a recorded area
    pub fn population_density(&self) -> Option<f64> {
        if self.area > 0.0 {
            Some(self.population as f64 / self.area)
        } else {
            None
        }
    }

    pub fn language_count(&self) -> usize {
        self.languages.as_ref().map_or(0, BTreeMap::len)
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.as_ref().map_or(0, BTreeMap::len)
    }
}

/// Flat projection of a [`Country`] used for list output
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountrySummary {
    pub cca2: String,
    pub cca3: String,
    pub name: String,
    pub official_name: String,
    pub capital: Option<String>,
    pub region: String,
    pub subregion: Option<String>,
    pub population: u64,
    pub area: f64,
    pub flag: String,
    pub favorite: bool,
}

impl CountrySummary {
    pub fn new(country: &Country, favorite: bool) -> Self {
        Self {
            cca2: country.cca2.clone(),
            cca3: country.cca3.clone(),
            name: country.name.common.clone(),
            official_name: country.name.official.clone(),
            capital: country.primary_capital().map(str::to_string),
            region: country.region.clone(),
            subregion: country.subregion.clone(),
            population: country.population,
            area: country.area,
            flag: country.flags.png.clone(),
            favorite,
        }
    }
}

/// Look up a country by cca2 or cca3 code, case-insensitively
pub fn find_by_code<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    countries.iter().find(|c| c.has_code(code))
}

/// Validate a user-supplied country code
///
/// Accepts two or three ASCII letters and returns the code uppercased.
pub fn normalize_code(code: &str) -> Result<String, String> {
    let trimmed = code.trim();
    if !(2..=3).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!(
            "Invalid country code: '{code}'. Expected a 2- or 3-letter code (e.g. BR or BRA)"
        ));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Build a minimal country for tests in this crate and downstream crates.
#[doc(hidden)]
pub fn fixture(common: &str, cca2: &str, region: &str, population: u64, area: f64) -> Country {
    Country {
        name: CountryName {
            common: common.to_string(),
            official: format!("Official {common}"),
        },
        cca2: cca2.to_string(),
        cca3: format!("{cca2}X"),
        flags: Flags {
            png: format!("https://flagcdn.com/w320/{}.png", cca2.to_lowercase()),
            svg: format!("https://flagcdn.com/{}.svg", cca2.to_lowercase()),
        },
        capital: None,
        region: region.to_string(),
        subregion: None,
        population,
        area,
        currencies: None,
        languages: None,
    }
}
