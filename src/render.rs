//! Record view.

use colored::Colorize;
use serde::Serialize;

use crate::catalog::Record;

/// JSON shape of a rendered record: the raw record plus metric units.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub height_m: f64,
    pub weight_kg: f64,
}

impl<'a> From<&'a Record> for RecordView<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            record,
            height_m: record.height_m(),
            weight_kg: record.weight_kg(),
        }
    }
}

/// Lines of the human view, without color.
pub fn record_lines(record: &Record) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    lines.push(record.name.to_uppercase());
    if let Some(image) = &record.image {
        lines.push(format!("Image: {}", image));
    }
    lines.push(format!("Type: {}", record.types.join(", ")));
    lines.push(format!("Height: {} m", record.height_m()));
    lines.push(format!("Weight: {} kg", record.weight_kg()));
    lines.push(format!("Abilities: {}", record.abilities.join(", ")));
    lines
}

/// Human view with the name line emphasized.
pub fn render_record(record: &Record) -> String {
    let mut lines = record_lines(record);
    if let Some(first) = lines.first_mut() {
        *first = first.as_str().bold().to_string();
    }
    lines.join("\n")
}
