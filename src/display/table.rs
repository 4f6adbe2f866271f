use comfy_table::{CellAlignment, Table, presets};

/// Gap between adjacent columns, in spaces
const COLUMN_GAP: u16 = 2;

/// A record that can be shown as one line of a text table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Render rows under their column headers, left-aligned and without borders.
pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(T::headers().iter().copied());

    for item in items {
        table.add_row(item.row());
    }

    for column in table.column_iter_mut() {
        column.set_padding((0, COLUMN_GAP));
        column.set_cell_alignment(CellAlignment::Left);
    }

    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
