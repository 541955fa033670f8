//! Output rendering: JSON (default, with affordances), aligned plain-text
//! tables, and markdown tables.

use ascent_domain::Affordances;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Markdown,
}

/// One table column: a header plus a projection from the item.
pub struct Column<T> {
    pub header: &'static str,
    pub value: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(header: &'static str, value: fn(&T) -> String) -> Self {
        Column { header, value }
    }
}

/// Renders a slice of items in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
    pretty: bool,
}

impl Formatter {
    pub fn new(format: OutputFormat, pretty: bool) -> Self {
        Formatter { format, pretty }
    }

    /// Render items without affordances.
    pub fn render<T: Serialize>(&self, items: &[T], columns: &[Column<T>]) -> String {
        let values = items
            .iter()
            .map(|item| serde_json::to_value(item).unwrap_or(Value::Null))
            .collect();
        self.finish(values, items, columns)
    }

    /// Render items, merging each item's affordances into its JSON object.
    pub fn render_with_affordances<T: Serialize + Affordances>(
        &self,
        items: &[T],
        columns: &[Column<T>],
    ) -> String {
        let values = items
            .iter()
            .map(|item| {
                let mut value = serde_json::to_value(item).unwrap_or(Value::Null);
                let affordances = item.affordances();
                if !affordances.is_empty()
                    && let Value::Object(map) = &mut value
                {
                    map.insert("affordances".to_string(), json!(affordances));
                }
                value
            })
            .collect();
        self.finish(values, items, columns)
    }

    fn finish<T>(&self, values: Vec<Value>, items: &[T], columns: &[Column<T>]) -> String {
        match self.format {
            OutputFormat::Json => self.render_json(values),
            OutputFormat::Table => render_table(items, columns),
            OutputFormat::Markdown => render_markdown(items, columns),
        }
    }

    fn render_json(&self, values: Vec<Value>) -> String {
        let document = json!({"data": values});
        if self.pretty {
            serde_json::to_string_pretty(&document).unwrap_or_default()
        } else {
            serde_json::to_string(&document).unwrap_or_default()
        }
    }
}

fn cells<T>(items: &[T], columns: &[Column<T>]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| columns.iter().map(|column| (column.value)(item)).collect())
        .collect()
}

fn render_table<T>(items: &[T], columns: &[Column<T>]) -> String {
    let rows = cells(items, columns);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain([column.header.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", column.header))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn render_markdown<T>(items: &[T], columns: &[Column<T>]) -> String {
    let mut out = String::new();
    let headers: Vec<&str> = columns.iter().map(|column| column.header).collect();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    let separator: Vec<&str> = columns.iter().map(|_| "---").collect();
    out.push_str(&format!("| {} |\n", separator.join(" | ")));
    for row in cells(items, columns) {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}
