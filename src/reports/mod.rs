use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keysweep::layout::Layout;
use keysweep::optimizer::SwapRecord;
use keysweep::scorer::Metrics;

/// Layout name, metrics and scalar score.
pub type Evaluation = (String, Metrics, f64);

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_layout_grid(layout: &Layout) {
    println!("\nLayout: {}", layout.name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in layout.rows() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|slot| {
                let s = match slot {
                    Some(' ') => "␣".to_string(),
                    Some(c) => c.to_string(),
                    None => " ".to_string(),
                };
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

/// Every metric of one layout, one per line.
pub fn print_metrics_report(name: &str, score: f64, m: &Metrics) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new("%"),
    ]);
    align_right(&mut table, 1..=1);

    table.add_row(vec![
        Cell::new("Score").fg(Color::Cyan),
        Cell::new(format!("{:.3}", score)).fg(Color::Cyan),
    ]);

    for (label, value) in m.fields() {
        table.add_row(vec![Cell::new(label), Cell::new(format!("{:.2}", value))]);
    }
    println!("\n{}", table);
}

/// Side by side metrics of the layout before and after the sweep.
pub fn print_before_after(before: &Evaluation, after: &Evaluation) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new(&before.0),
        Cell::new(&after.0),
        Cell::new("Delta"),
    ]);
    align_right(&mut table, 1..=3);

    let colored = |delta: f64, lower_is_better: bool| -> Cell {
        let text = format!("{:+.2}", delta);
        if delta.abs() < 1e-9 {
            Cell::new(text)
        } else if (delta < 0.0) == lower_is_better {
            Cell::new(text).fg(Color::Green)
        } else {
            Cell::new(text).fg(Color::Red)
        }
    };

    table.add_row(vec![
        Cell::new("Score").fg(Color::Cyan),
        Cell::new(format!("{:.3}", before.2)),
        Cell::new(format!("{:.3}", after.2)),
        colored(after.2 - before.2, true),
    ]);

    for ((label, b), (_, a)) in before.1.fields().into_iter().zip(after.1.fields()) {
        let lower_is_better = !matches!(label, "Roll In" | "Roll Out" | "Alternate");
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.2}", b)),
            Cell::new(format!("{:.2}", a)),
            colored(a - b, lower_is_better),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_swap_log(swaps: &[SwapRecord]) {
    if swaps.is_empty() {
        println!("\nNo improving swap found.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Slot"),
        Cell::new("Swap"),
        Cell::new("Before"),
        Cell::new("After"),
    ]);
    align_right(&mut table, 3..=4);

    for (i, s) in swaps.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(s.position),
            Cell::new(format!("'{}' <-> '{}'", s.from, s.to)),
            Cell::new(format!("{:.3}", s.score_before)),
            Cell::new(format!("{:.3}", s.score_after)).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
}
