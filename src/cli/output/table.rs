//! Table output formatting for CLI commands
//!
//! Renders menu items and fetch history using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;
use crate::domain::models::{MenuItem, ScrapingHistory};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a record's fetch history, newest first.
    pub fn format_history(&self, history: &ScrapingHistory) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("When"),
            header("Result"),
            header("Items"),
            header("Time (ms)"),
            header("Source"),
            header("Error"),
        ]);

        for attempt in history {
            let result = if attempt.success { "ok" } else { "failed" };
            let result_cell = if self.use_colors {
                Cell::new(result).fg(if attempt.success { Color::Green } else { Color::Red })
            } else {
                Cell::new(result)
            };

            table.add_row(vec![
                Cell::new(attempt.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
                result_cell,
                Cell::new(attempt.items_found),
                Cell::new(attempt.processing_time_ms),
                Cell::new(truncate(&attempt.source, 40)),
                Cell::new(attempt.error.as_deref().map_or_else(|| "-".to_string(), |e| truncate(e, 40))),
            ]);
        }

        table.to_string()
    }

    /// Format menu items grouped in their stored order.
    pub fn format_items(&self, items: &[MenuItem]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("Category"),
            header("Name"),
            header("Price"),
            header("Description"),
            header("Flags"),
        ]);

        for item in items {
            let mut flags = Vec::new();
            if item.is_popular {
                flags.push("popular".to_string());
            }
            if !item.availability {
                flags.push("unavailable".to_string());
            }
            if !item.allergens.is_empty() {
                flags.push(format!(
                    "allergens: {}",
                    item.allergens.iter().cloned().collect::<Vec<_>>().join(", ")
                ));
            }

            let name_cell = if self.use_colors && !item.availability {
                Cell::new(&item.name).fg(Color::DarkGrey)
            } else {
                Cell::new(&item.name)
            };

            table.add_row(vec![
                Cell::new(&item.category),
                name_cell,
                Cell::new(&item.price),
                Cell::new(truncate(&item.description, 50)),
                Cell::new(flags.join("; ")),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table.load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
