//! Terminal error reporting.

use colored::Colorize;

/// `error - <message>` with the full cause chain.
pub fn render(error: &anyhow::Error) -> String {
    format!("{} - {}", "error".red().bold(), format!("{error:#}").italic())
}

pub fn error(error: &anyhow::Error) {
    eprintln!("{}", render(error));
}
