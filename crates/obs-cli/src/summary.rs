//! Run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::GenerateResult;

pub fn print_summary(result: &GenerateResult) {
    println!("Input: {}", result.input.display());
    match &result.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    if let Some(bundle) = &result.bundle_file {
        println!("Bundle: {bundle}");
    }

    let summary = &result.summary;
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Rows"),
        header_cell("Succeeded"),
        header_cell("Failed"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        Cell::new(summary.succeeded + summary.failed),
        Cell::new(summary.succeeded).fg(Color::Green),
        count_cell(summary.failed, Color::Red),
        count_cell(summary.warnings.len(), Color::Yellow),
    ]);
    println!("{totals}");

    if !summary.failures.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Row"), header_cell("Reason")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for failure in &summary.failures {
            table.add_row(vec![
                Cell::new(failure.row),
                Cell::new(&failure.reason).fg(Color::Red),
            ]);
        }
        println!("Failures:");
        println!("{table}");
    }

    if !summary.warnings.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Row"), header_cell("Warning")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for warning in &summary.warnings {
            table.add_row(vec![
                Cell::new(warning.row),
                Cell::new(&warning.message).fg(Color::Yellow),
            ]);
        }
        println!("Warnings:");
        println!("{table}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
