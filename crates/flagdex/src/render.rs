//! Terminal styling shared by the commands

use colored::{Color, ColoredString, Colorize};
use flagdex_core::theme::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Colors derived from the theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub label: Color,
    pub muted: Color,
    pub highest: Color,
    pub lowest: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: Color::Blue,
                label: Color::Green,
                muted: Color::BrightBlack,
                highest: Color::Green,
                lowest: Color::Yellow,
            },
            Theme::Dark => Self {
                accent: Color::BrightCyan,
                label: Color::BrightGreen,
                muted: Color::White,
                highest: Color::BrightGreen,
                lowest: Color::BrightYellow,
            },
        }
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        text.color(self.accent)
    }

    pub fn label(&self, text: &str) -> ColoredString {
        text.color(self.label)
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        text.color(self.muted)
    }

    /// Banner line framed by `=` rules
    pub fn header(&self, title: &str) -> String {
        let rule = "=".repeat(80);
        format!(
            "\n{}\n{}\n{}\n",
            self.accent(&rule),
            self.accent(title).bold(),
            self.accent(&rule)
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

/// Load the palette for the stored theme preference
pub fn palette_from_global(global: &crate::Global) -> Palette {
    match crate::config::storage_from_global(global) {
        Ok(storage) => Palette::for_theme(crate::theme::ThemeStore::open(storage).current()),
        Err(err) => {
            log::warn!("Using default theme: {err}");
            Palette::default()
        }
    }
}

/// Spinner on stderr while a request is in flight
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
