use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rwl_model::{AnomalyLog, ErrorCode, MeasurementMatrix};

use crate::types::ReadResult;

/// Line numbers listed per code before the rest are summarized.
const MAX_LISTED_LINES: usize = 8;

pub fn print_summary(result: &ReadResult) {
    println!("File: {}", result.path.display());
    if let Some(path) = &result.csv {
        println!("Matrix CSV: {}", path.display());
    }
    if let Some(path) = &result.log_json {
        println!("Anomaly log: {}", path.display());
    }
    let matrix = &result.output.matrix;
    if matrix.is_empty() {
        println!("No measurements found.");
        return;
    }
    if let (Some(first), Some(last)) = (matrix.years.first(), matrix.years.last()) {
        println!("Years: {first}-{last} ({} rows)", matrix.n_years());
    }
    println!("{}", core_table(matrix));
    print_anomaly_table(&result.output.log);
}

fn core_table(matrix: &MeasurementMatrix) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Core"),
        header_cell("First"),
        header_cell("Last"),
        header_cell("Span"),
        header_cell("Measured"),
        header_cell("Missing"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_measured = 0usize;
    let mut total_missing = 0usize;
    for (col, id) in matrix.core_ids.iter().enumerate() {
        let Some((first, last)) = matrix.core_span(col) else {
            continue;
        };
        let span = usize::try_from(last - first + 1).unwrap_or_default();
        let measured = matrix.measured(col);
        let missing = span.saturating_sub(measured);
        total_measured += measured;
        total_missing += missing;
        table.add_row(vec![
            core_cell(id),
            Cell::new(first),
            Cell::new(last),
            Cell::new(span),
            Cell::new(measured),
            count_cell(missing, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_measured).add_attribute(Attribute::Bold),
        count_cell(total_missing, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn print_anomaly_table(log: &AnomalyLog) {
    if log.is_empty() {
        println!("No anomalies.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Count"),
        header_cell("Lines"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for code in ErrorCode::ALL {
        let lines = log.lines_with(code);
        if lines.is_empty() {
            continue;
        }
        table.add_row(vec![
            code_cell(code),
            Cell::new(code.description()),
            count_cell(lines.len(), code_color(code)),
            Cell::new(list_lines(&lines)),
        ]);
    }
    println!();
    println!("Anomalies:");
    println!("{table}");
}

/// Comma-separated line numbers, truncated after [`MAX_LISTED_LINES`].
pub fn list_lines(lines: &[usize]) -> String {
    let mut listed: Vec<String> = lines
        .iter()
        .take(MAX_LISTED_LINES)
        .map(ToString::to_string)
        .collect();
    if lines.len() > MAX_LISTED_LINES {
        listed.push(format!("... (+{})", lines.len() - MAX_LISTED_LINES));
    }
    listed.join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Dropped and flagged records stand out from in-place repairs.
fn code_color(code: ErrorCode) -> Color {
    match code.major() {
        3 | 4 => Color::Red,
        5 => Color::DarkGrey,
        _ => Color::Yellow,
    }
}

fn code_cell(code: ErrorCode) -> Cell {
    Cell::new(code)
        .fg(code_color(code))
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn core_cell(id: &str) -> Cell {
    Cell::new(id)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_lines_truncates() {
        assert_eq!(list_lines(&[3, 9]), "3, 9");
        let many: Vec<usize> = (1..=10).collect();
        insta::assert_snapshot!(list_lines(&many), @"1, 2, 3, 4, 5, 6, 7, 8, ... (+2)");
    }

    #[test]
    fn test_core_table_has_total_row() {
        let matrix = MeasurementMatrix::from_columns(
            vec![2000, 2001, 2002],
            vec![("ABC01".to_string(), vec![1.0, rwl_model::MISSING, 3.0])],
        );
        let table = core_table(&matrix);
        assert_eq!(table.row_count(), 2);
    }
}
