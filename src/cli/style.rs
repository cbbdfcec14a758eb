//! Terminal styling helpers
//!
//! Colors are dropped automatically when stdout is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark glyph
pub const CHECK: &str = "✓";

/// Arrow glyph used for list items
pub const ARROW: &str = "→";

/// Semantic color roles for CLI output
pub trait Stylize {
    /// Secondary, de-emphasized text
    fn muted(&self) -> String;
    /// Headings and labels
    fn emphasis(&self) -> String;
    /// Names and values the user cares about
    fn accent(&self) -> String;
    /// Completed operations
    fn success(&self) -> String;
    /// Non-fatal problems
    fn warn(&self) -> String;
    /// Fatal problems
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    fn error(&self) -> String {
        self.if_supports_color(Stream::Stderr, |t| t.red())
            .to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled list arrow
pub fn arrow() -> String {
    ARROW.muted()
}

/// Spinner used while waiting on the network
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Clickable link when the terminal supports it, plain URL otherwise
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        url.to_string()
    }
}
