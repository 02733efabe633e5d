use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use qbank_model::{FieldMapping, LogicalField, NormalizedQuestion};

use qbank_cli::types::{HeadersResult, ImportResult};

const QUESTION_PREVIEW_CHARS: usize = 48;

pub fn print_import_summary(result: &ImportResult, show_invalid: bool) {
    println!("Source: {} ({:?})", result.file.display(), result.kind);
    println!("Exam: {}", result.exam_id);
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: dry run, nothing written"),
    }
    for warning in &result.warnings {
        println!("Note: {warning}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Inserted"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 0..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let summary = &result.summary;
    table.add_row(vec![
        Cell::new(summary.total_rows).add_attribute(Attribute::Bold),
        count_cell(Some(summary.valid_count), Color::Green),
        count_cell(Some(summary.invalid_count), Color::Red),
        count_cell(result.commit.map(|report| report.inserted), Color::Green),
        count_cell(result.commit.map(|report| report.skipped), Color::Yellow),
    ]);
    println!("{table}");

    if show_invalid {
        print_invalid_rows(&result.rows);
    } else if summary.has_invalid() {
        println!(
            "{} invalid row(s) skipped; pass --show-invalid for details",
            summary.invalid_count
        );
    }
    if let Some(error) = &result.commit_error {
        eprintln!("Errors:");
        eprintln!("- {error}");
    }
}

fn print_invalid_rows(rows: &[NormalizedQuestion]) {
    let invalid: Vec<&NormalizedQuestion> =
        rows.iter().filter(|row| !row.is_acceptable()).collect();
    if invalid.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Question"),
        header_cell("Answer"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in invalid {
        let errors: Vec<&str> = row.errors.iter().map(|tag| tag.label()).collect();
        table.add_row(vec![
            Cell::new(row.display_row()),
            text_cell(&row.question),
            text_cell(&row.correct_option),
            Cell::new(errors.join(", ")).fg(Color::Red),
        ]);
    }
    println!();
    println!("Invalid rows:");
    println!("{table}");
}

pub fn print_headers(result: &HeadersResult) {
    println!("Source: {}", result.file.display());
    println!("Headers: {}", result.headers.join(", "));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for field in LogicalField::ALL {
        let mapping = result
            .resolution
            .mapping
            .as_ref()
            .map(|mapping| mapping.get(field));
        let (kind, columns) = match mapping {
            Some(FieldMapping::Bilingual { per_language, .. }) => {
                let columns: Vec<String> = per_language
                    .iter()
                    .map(|(language, header)| format!("{header} ({language})"))
                    .collect();
                (Cell::new("bilingual").fg(Color::Cyan), columns.join(", "))
            }
            Some(mapping) if !mapping.is_empty() => {
                (Cell::new("single"), mapping.source_headers().join(", "))
            }
            _ if result.resolution.missing.contains(&field) => {
                (Cell::new("missing").fg(Color::Red), String::new())
            }
            _ => (dim_cell("-"), String::new()),
        };
        table.add_row(vec![Cell::new(field.label()), kind, Cell::new(columns)]);
    }
    println!("{table}");
    for warning in &result.resolution.warnings {
        println!("Note: {warning}");
    }
    if !result.resolution.valid {
        let missing: Vec<&str> = result
            .resolution
            .missing
            .iter()
            .map(|field| field.label())
            .collect();
        eprintln!("error: missing required columns: {}", missing.join(", "));
    }
}

/// Shortens question text for table display.
pub fn preview_text(value: &str, max_chars: usize) -> String {
    let value = value.trim();
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

fn text_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        dim_cell("-")
    } else {
        Cell::new(preview_text(value, QUESTION_PREVIEW_CHARS))
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(14)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_text_truncates_on_chars() {
        assert_eq!(preview_text("  short  ", 10), "short");
        assert_eq!(preview_text("abcdefghijk", 8), "abcde...");
        assert_eq!(preview_text("ప్రశ్న ఒకటి రెండు", 5).chars().count(), 5);
    }
}
