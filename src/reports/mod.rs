use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ramseyforge::scorer::Census;

pub struct CheckRow {
    pub name: String,
    pub vertices: usize,
    pub edges: usize,
    pub census: Census,
}

pub fn print_census_report(clique_size: usize, rows: &[CheckRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Graph").add_attribute(Attribute::Bold),
        Cell::new("Vertices"),
        Cell::new("Edges"),
        Cell::new(format!("K{} in G", clique_size)).fg(Color::Red),
        Cell::new(format!("K{} in co-G", clique_size)).fg(Color::Blue),
        Cell::new("Fitness").add_attribute(Attribute::Bold),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in rows {
        let total = r.census.total();
        let fitness = if total == 0 {
            Cell::new(total).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(total).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&r.name).add_attribute(Attribute::Bold),
            Cell::new(r.vertices),
            Cell::new(r.edges),
            Cell::new(r.census.graph).fg(Color::Red),
            Cell::new(r.census.complement).fg(Color::Blue),
            fitness,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_run_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.set_header(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}
