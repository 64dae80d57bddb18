use crate::country::{Country, Currency};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Abbreviate a population figure (`1.4B`, `67.4M`, `29.5K`)
pub fn format_population(population: u64) -> String {
    let value = population as f64;
    if population >= 1_000_000_000 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if population >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if population >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        population.to_string()
    }
}

/// Insert thousands separators into an integer
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an area in km² with en-US grouping, keeping up to three decimals
pub fn format_area(area: f64) -> String {
    let area = area.max(0.0);
    let rounded = (area * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = format!("{:.3}", rounded.fract());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');

    if fraction == "." || fraction.is_empty() {
        group_thousands(whole)
    } else {
        format!("{}{}", group_thousands(whole), fraction)
    }
}

pub fn format_currencies(currencies: Option<&BTreeMap<String, Currency>>) -> String {
    let list = currencies
        .map(|map| {
            map.values()
                .map(|c| format!("{} ({})", c.name, c.symbol))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    if list.is_empty() {
        "No currency data".to_string()
    } else {
        list
    }
}

pub fn format_languages(languages: Option<&BTreeMap<String, String>>) -> String {
    let list = languages
        .map(|map| map.values().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default();

    if list.is_empty() {
        "No language data".to_string()
    } else {
        list
    }
}

/// All capitals joined, or a placeholder
pub fn format_capitals(country: &Country) -> String {
    match &country.capital {
        Some(caps) if !caps.is_empty() => caps.join(", "),
        _ => "No capital".to_string(),
    }
}

/// Convert an epoch-milliseconds timestamp to a formatted string
pub fn format_timestamp_ms(timestamp_ms: i64) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(1_402_112_000), "1.4B");
        assert_eq!(format_population(67_391_582), "67.4M");
        assert_eq!(format_population(29_458), "29.5K");
        assert_eq!(format_population(1_000), "1.0K");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(0), "0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(8_515_767), "8,515,767");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(8_515_767.0), "8,515,767");
        assert_eq!(format_area(30_528.0), "30,528");
        assert_eq!(format_area(0.44), "0.44");
        assert_eq!(format_area(1_580.5), "1,580.5");
        assert_eq!(format_area(2.0004), "2");
    }

    #[test]
    fn test_format_currencies() {
        let mut map = BTreeMap::new();
        map.insert(
            "BRL".to_string(),
            Currency {
                name: "Brazilian real".to_string(),
                symbol: "R$".to_string(),
            },
        );
        assert_eq!(format_currencies(Some(&map)), "Brazilian real (R$)");
        assert_eq!(format_currencies(None), "No currency data");
        assert_eq!(format_currencies(Some(&BTreeMap::new())), "No currency data");
    }

    #[test]
    fn test_format_languages() {
        let mut map = BTreeMap::new();
        map.insert("deu".to_string(), "German".to_string());
        map.insert("fra".to_string(), "French".to_string());
        assert_eq!(format_languages(Some(&map)), "German, French");
        assert_eq!(format_languages(None), "No language data");
    }

    #[test]
    fn test_format_timestamp_ms() {
        assert_eq!(
            format_timestamp_ms(1_609_459_200_000),
            Some("2021-01-01 00:00:00 UTC".to_string())
        );
    }
}
