pub mod output;
pub mod rows;
pub mod table;

pub use output::{OutputFormat, Printer};
pub use table::{TableRow, render_table};
