use serde::Serialize;

use crate::normalize::{format_price, format_rating};
use crate::record::Record;

/// Placeholder shown for a missing spec field
pub const MISSING: &str = "N/A";
const TEXT_ROWS: [&str; 4] = ["Processor", "Memory", "Storage", "Display"];

/// One spec line across every compared laptop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub values: Vec<String>,
}

/// Side-by-side view of selected laptops, one column per laptop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn build(records: &[&Record]) -> Self {
        let mut rows: Vec<ComparisonRow> = TEXT_ROWS
            .iter()
            .map(|label| ComparisonRow {
                label: label.to_string(),
                values: records
                    .iter()
                    .map(|r| {
                        text_value(r, label)
                            .filter(|s| !s.trim().is_empty())
                            .unwrap_or(MISSING)
                            .to_string()
                    })
                    .collect(),
            })
            .collect();

        rows.push(ComparisonRow {
            label: "Price".to_string(),
            values: records.iter().map(|r| format_price(r.price())).collect(),
        });
        rows.push(ComparisonRow {
            label: "Rating".to_string(),
            values: records.iter().map(|r| format_rating(r.rating())).collect(),
        });

        Self {
            columns: records.iter().map(|r| r.label()).collect(),
            rows,
        }
    }

    pub fn row(&self, label: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

fn text_value<'a>(record: &'a Record, label: &str) -> Option<&'a str> {
    match label {
        "Processor" => record.processor.as_deref(),
        "Memory" => record.memory.as_deref(),
        "Storage" => record.storage.as_deref(),
        "Display" => record.display.as_deref(),
        _ => None,
    }
}
