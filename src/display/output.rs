use super::table::{TableRow, render_table};
use crate::error::DisplayError;
use crate::utils::error_helpers::convert_output_error;
use serde::Serialize;

const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    /// `table` selects the table format; anything else is JSON.
    pub fn from_str_lossy(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("table") {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    }

    /// Error lines stay JSON only for `json`; any other value prints `Error: ...`.
    pub fn error_format_from_str(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

#[derive(Serialize)]
struct ListEnvelope<'a, T> {
    data: &'a [T],
    total_count: usize,
    has_more: bool,
}

/// Writes command results to stdout and failures to stderr in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
    error_format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            error_format: format,
        }
    }

    /// Printer for a raw `--format` value; `None` means the JSON default.
    pub fn for_format_name(name: Option<&str>) -> Self {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => Self::new(OutputFormat::from_str_lossy(name))
                .with_error_format(OutputFormat::error_format_from_str(name)),
            None => Self::new(OutputFormat::Json),
        }
    }

    pub fn with_error_format(mut self, error_format: OutputFormat) -> Self {
        self.error_format = error_format;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn error_format(&self) -> OutputFormat {
        self.error_format
    }

    pub fn render_list<T>(&self, items: &[T], has_more: bool) -> Result<String, DisplayError>
    where
        T: Serialize + TableRow,
    {
        match self.format {
            OutputFormat::Table if items.is_empty() => Ok(NO_RESULTS.to_string()),
            OutputFormat::Table => Ok(render_table(items)),
            OutputFormat::Json => self.render_value(&ListEnvelope {
                data: items,
                total_count: items.len(),
                has_more,
            }),
        }
    }

    pub fn render_single<T>(&self, item: &T) -> Result<String, DisplayError>
    where
        T: Serialize + TableRow,
    {
        match self.format {
            OutputFormat::Table => Ok(render_table(std::slice::from_ref(item))),
            OutputFormat::Json => self.render_value(item),
        }
    }

    /// Pretty JSON regardless of format, for values without a table layout.
    pub fn render_value<T>(&self, value: &T) -> Result<String, DisplayError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_string_pretty(value).map_err(convert_output_error)
    }

    pub fn render_error(&self, message: &str) -> String {
        match self.error_format {
            OutputFormat::Json => serde_json::json!({ "error": message }).to_string(),
            OutputFormat::Table => format!("Error: {}", message),
        }
    }

    pub fn print_list<T>(&self, items: &[T], has_more: bool) -> Result<(), DisplayError>
    where
        T: Serialize + TableRow,
    {
        println!("{}", self.render_list(items, has_more)?);
        Ok(())
    }

    pub fn print_single<T>(&self, item: &T) -> Result<(), DisplayError>
    where
        T: Serialize + TableRow,
    {
        println!("{}", self.render_single(item)?);
        Ok(())
    }

    pub fn print_value<T>(&self, value: &T) -> Result<(), DisplayError>
    where
        T: Serialize + ?Sized,
    {
        println!("{}", self.render_value(value)?);
        Ok(())
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }
}
