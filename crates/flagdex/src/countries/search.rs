use crate::prelude::{println, *};
use crate::render::{palette_from_global, spinner, Palette};
use flagdex_core::api::SearchOutcome;
use flagdex_core::country::CountrySummary;
use serde::Serialize;

use super::{client_from_global, favorite_codes, summarize, summary_table};

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// Name, or part of a name, to look up
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    term: String,
    status: &'static str,
    items: Vec<CountrySummary>,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let client = client_from_global(&global)?;

    let progress = spinner(format!("Searching for \"{}\"...", options.term.trim()));
    let outcome = client.search_countries(&options.term).await;
    progress.finish_and_clear();

    let favorites = favorite_codes(&global);
    let items = summarize(outcome.countries(), &favorites);

    if options.json {
        let output = SearchOutput {
            term: options.term.trim().to_string(),
            status: outcome_status(&outcome),
            items,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!(
            "{}",
            format_search_text(
                options.term.trim(),
                &outcome,
                &items,
                &palette_from_global(&global)
            )
        );
    }

    if let SearchOutcome::Failed(message) = outcome {
        return Err(Error::Search(message).into());
    }
    Ok(())
}

fn outcome_status(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Found(_) => "found",
        SearchOutcome::NotFound => "not_found",
        SearchOutcome::Failed(_) => "failed",
    }
}

fn format_search_text(
    term: &str,
    outcome: &SearchOutcome,
    items: &[CountrySummary],
    palette: &Palette,
) -> String {
    let mut result = palette.header(&format!("SEARCH: \"{term}\""));

    match outcome {
        SearchOutcome::Found(_) if items.is_empty() => {
            result.push_str(&format!("\n{}\n", palette.muted("Type a name to search.")));
        }
        SearchOutcome::Found(_) => {
            result.push_str(&format!(
                "\n{}\n\n",
                palette.accent(&format!("{} matches", items.len()))
            ));
            result.push_str(&summary_table(items, palette).to_string());
        }
        SearchOutcome::NotFound => {
            result.push_str(&format!(
                "\n{}\n",
                palette.muted(&format!("No countries found matching \"{term}\"."))
            ));
        }
        SearchOutcome::Failed(_) => {
            result.push_str(&format!(
                "\n{}\n",
                palette.muted("Search failed. Check your connection and try again.")
            ));
        }
    }

    result.push('\n');
    result
}
