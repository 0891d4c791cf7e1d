use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use ordered_float::OrderedFloat;

use crate::data::dataset::Dataset;

/// Aggregates of one method's records.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodSummary {
    pub method: String,
    pub points: usize,
    pub first_index: u64,
    pub last_index: u64,
    pub total_seconds: f64,
    pub max_seconds: f64,
    pub max_bytes: u64,
}

/// One summary per method, in first-appearance order.
pub fn summarize(dataset: &Dataset) -> Vec<MethodSummary> {
    dataset
        .methods()
        .into_iter()
        .map(|method| {
            let rows: Vec<_> = dataset.iter().filter(|r| r.method == method).collect();
            MethodSummary {
                points: rows.len(),
                first_index: rows.iter().map(|r| r.index).min().unwrap_or(0),
                last_index: rows.iter().map(|r| r.index).max().unwrap_or(0),
                total_seconds: rows.iter().map(|r| r.elapsed_seconds).sum(),
                max_seconds: rows
                    .iter()
                    .map(|r| OrderedFloat(r.elapsed_seconds))
                    .max()
                    .map(|v| v.into_inner())
                    .unwrap_or(0.0),
                max_bytes: rows.iter().map(|r| r.size_bytes).max().unwrap_or(0),
                method,
            }
        })
        .collect()
}

pub fn summary_table(summaries: &[MethodSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Method",
        "Points",
        "Index range",
        "Total time (s)",
        "Max time (s)",
        "Max size (bytes)",
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.method),
            Cell::new(s.points).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}..={}", s.first_index, s.last_index)),
            Cell::new(format!("{:.6}", s.total_seconds)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.6}", s.max_seconds)).set_alignment(CellAlignment::Right),
            Cell::new(s.max_bytes).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
