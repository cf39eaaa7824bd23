use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use subwriter_cli::types::{ExportResult, UpdateReport};
use subwriter_model::Playlist;

pub fn print_playlists(project: &str, playlists: &[Playlist]) {
    println!("Project: {project}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Playlist"),
        header_cell("Id"),
        header_cell("Versions"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for playlist in playlists {
        table.add_row(vec![
            Cell::new(&playlist.code),
            dim_cell(playlist.id),
            count_cell(playlist.versions.len(), Color::Green),
        ]);
    }
    println!("{table}");
}

pub fn print_export_summary(result: &ExportResult) {
    println!("Playlist: {}", result.playlist);
    let Some(output) = &result.output else {
        println!("No versions found for playlist; nothing written.");
        return;
    };
    println!("Output: {}", output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Missing versions"),
        header_cell("Without metrics"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.rows).add_attribute(Attribute::Bold),
        count_cell(result.missing_versions.len(), Color::Red),
        count_cell(result.without_metrics, Color::Yellow),
    ]);
    println!("{table}");
    if !result.missing_versions.is_empty() {
        let ids: Vec<String> = result
            .missing_versions
            .iter()
            .map(u64::to_string)
            .collect();
        eprintln!("Skipped version ids: {}", ids.join(", "));
    }
}

pub fn print_update_summary(report: &UpdateReport) {
    if report.dry_run {
        println!("Dry run: no fields were written.");
    }
    println!("Task filter: {}", report.task);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Shots"),
        header_cell(if report.dry_run {
            "Would update"
        } else {
            "Updated"
        }),
        header_cell("Already updated"),
        header_cell("Failed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(report.shots_scanned),
        count_cell(report.updated.len(), Color::Green),
        dim_cell(report.skipped),
        count_cell(report.failures.len(), Color::Red),
    ]);
    println!("{table}");

    if report.failures.is_empty() {
        return;
    }
    let mut failures = Table::new();
    failures.set_header(vec![header_cell("Version"), header_cell("Reason")]);
    apply_table_style(&mut failures);
    for failure in &report.failures {
        failures.add_row(vec![
            Cell::new(&failure.version).fg(Color::Red),
            Cell::new(&failure.reason),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{failures}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
