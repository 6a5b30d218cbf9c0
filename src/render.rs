use crate::hierarchy::{DisplayFields, Hierarchy};
use crate::types::EntryKind;
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

pub const HEADERS: [&str; 4] = ["", "Name", "Size", "DateTimeMod"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub human_sizes: bool,
    /// Deepest level printed, 0 being the top level. `None` prints everything.
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub depth: usize,
    pub kind: EntryKind,
    pub fields: DisplayFields,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
    pub total_bytes: u64,
}

#[must_use]
pub fn collect_rows(hierarchy: &Hierarchy, max_depth: Option<usize>) -> Vec<DisplayRow> {
    hierarchy
        .walk()
        .into_iter()
        .filter(|(depth, _)| max_depth.is_none_or(|max| *depth <= max))
        .map(|(depth, node)| DisplayRow {
            depth,
            kind: node.kind(),
            fields: node.fields(),
        })
        .collect()
}

#[must_use]
pub fn summarize(hierarchy: &Hierarchy) -> Summary {
    hierarchy
        .nodes()
        .iter()
        .fold(Summary::default(), |mut acc, node| {
            if node.entry.is_directory {
                acc.directories += 1;
            } else {
                acc.files += 1;
                acc.total_bytes += node.entry.size;
            }
            acc
        })
}

fn format_size(size: u64, human: bool) -> String {
    if human {
        human_bytes::human_bytes(size as f64)
    } else {
        size.to_string()
    }
}

#[must_use]
pub fn build_table(rows: &[DisplayRow], options: &RenderOptions) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(HEADERS.to_vec());

    for row in rows {
        let name = format!("{}{}", "  ".repeat(row.depth), row.fields.name);
        let name_cell = match row.kind {
            EntryKind::Directory => Cell::new(name).fg(Color::Cyan),
            EntryKind::File => Cell::new(name),
        };

        table.add_row(vec![
            Cell::new(row.fields.kind),
            name_cell,
            Cell::new(format_size(row.fields.size, options.human_sizes)),
            Cell::new(&row.fields.modified),
        ]);
    }

    table
}

pub fn print_hierarchy(hierarchy: &Hierarchy, options: &RenderOptions) {
    if hierarchy.is_empty() {
        println!("No entries found.");
        return;
    }

    let rows = collect_rows(hierarchy, options.max_depth);
    println!("{}", build_table(&rows, options));
}

pub fn print_summary(hierarchy: &Hierarchy) {
    let summary = summarize(hierarchy);
    println!(
        "{} {} directories, {} files, {} in files.",
        "Total:".cyan(),
        summary.directories.to_string().green(),
        summary.files.to_string().green(),
        human_bytes::human_bytes(summary.total_bytes as f64).green()
    );
}
