//! CSV export for roster and expense listings.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// A row type that can be written as CSV.
pub trait CsvRecord {
    fn headers() -> &'static [&'static str];
    fn fields(&self) -> Vec<String>;
}

/// Quote a field when it contains a delimiter, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_csv<T: CsvRecord>(rows: &[T]) -> String {
    let mut out = String::new();
    push_line(&mut out, T::headers().iter().map(|h| h.to_string()));
    for row in rows {
        push_line(&mut out, row.fields());
    }
    out
}

fn push_line(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line: Vec<String> = fields.into_iter().map(|f| escape_field(&f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Downloadable CSV body.
#[derive(Debug, Clone)]
pub struct CsvFile {
    pub filename: String,
    pub body: String,
}

impl CsvFile {
    pub fn new<T: CsvRecord>(filename: impl Into<String>, rows: &[T]) -> Self {
        Self {
            filename: filename.into(),
            body: write_csv(rows),
        }
    }
}

impl IntoResponse for CsvFile {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}
