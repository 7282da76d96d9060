//! Terminal run summary.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use mtx_transform::CycleSource;

use crate::commands::RunResult;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_summary(result: &RunResult) {
    let outcome = &result.outcome;
    println!("Input: {}", outcome.input.display());
    match &outcome.cycle_source {
        CycleSource::Explicit { column } => println!("Cycle column: {column}"),
        CycleSource::Derived => println!("Cycle column: derived per patient"),
    }
    println!(
        "Records: {} ({} truncated)",
        outcome.records, outcome.truncated
    );
    println!("Patients: {}", outcome.views.patient_count);
    if let Some(max_cycle) = outcome.views.max_cycle_considered {
        println!("Maximum cycle considered: {max_cycle}");
    }
    if let Some(report) = &result.report {
        println!("Report: {}", report.display());
    }

    if outcome.views.toxicity.is_empty() {
        println!("No recognized toxicity columns in the input.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Field"),
        Cell::new("Description"),
        Cell::new("Evaluated"),
        Cell::new("Max grade"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for toxicity in &outcome.views.toxicity {
        let evaluated: usize = toxicity
            .mean_severity
            .points
            .iter()
            .map(|point| point.evaluated)
            .sum();
        let max_grade = toxicity
            .max_severity
            .cycles()
            .iter()
            .filter_map(|cycle| toxicity.max_severity.row(*cycle))
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(toxicity.field.label),
            Cell::new(toxicity.field.description),
            Cell::new(evaluated),
            Cell::new(max_grade),
        ]);
    }
    println!("{table}");
}
