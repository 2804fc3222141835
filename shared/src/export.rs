//! CSV helpers shared by the export actions

use chrono::NaiveDate;

/// Quote one CSV field; embedded quotes are doubled
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// One CSV line, every field quoted
pub fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header line followed by one line per row, newline-separated
pub fn csv_document(header: &[&str], rows: impl IntoIterator<Item = String>) -> String {
    std::iter::once(header.join(","))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `{prefix}-YYYY-MM-DD.{extension}`
pub fn dated_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}
