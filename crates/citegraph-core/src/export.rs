//! # CSV Export
//!
//! Writes any record sequence (search results, or graph records in
//! discovery order) as CSV with a fixed column set.
//!
//! The header is always written, even for an empty sequence. Quoting of
//! titles, journals and joined lists is left to the `csv` writer.

use crate::details::yes_no;
use crate::primitives::{EXPORT_COLUMNS, EXPORT_LIST_SEPARATOR};
use crate::{CiteError, Record};
use serde::Serialize;
use std::io::Write;

/// One exported row. Field order matches `EXPORT_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow<'r> {
    pub url: &'r str,
    pub is_oa: &'static str,
    pub title: &'r str,
    pub doi: &'r str,
    #[serde(rename = "type")]
    pub kind: &'r str,
    pub journal: &'r str,
    pub publication_year: Option<i32>,
    pub keywords: String,
    pub authors: String,
}

impl<'r> ExportRow<'r> {
    #[must_use]
    pub fn from_record(record: &'r Record) -> Self {
        Self {
            url: record.url.as_deref().unwrap_or(""),
            is_oa: yes_no(record.is_oa),
            title: record.title_str(),
            doi: record.doi.as_deref().unwrap_or(""),
            kind: record.kind.as_deref().unwrap_or(""),
            journal: record.journal_str(),
            publication_year: record.publication_year,
            keywords: record.keywords.join(EXPORT_LIST_SEPARATOR),
            authors: record.author_names(EXPORT_LIST_SEPARATOR),
        }
    }
}

fn export_error(e: impl std::fmt::Display) -> CiteError {
    CiteError::Export(e.to_string())
}

/// Write `records` as CSV to `writer`. Returns the number of data rows.
pub fn write_csv<'r, W: Write>(
    records: impl IntoIterator<Item = &'r Record>,
    writer: W,
) -> Result<usize, CiteError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS).map_err(export_error)?;

    let mut rows = 0usize;
    for record in records {
        csv_writer
            .serialize(ExportRow::from_record(record))
            .map_err(export_error)?;
        rows += 1;
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(rows)
}

/// Render `records` as a CSV string.
pub fn to_csv_string<'r>(records: impl IntoIterator<Item = &'r Record>) -> Result<String, CiteError> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;

    #[test]
    fn header_written_for_empty_input() {
        let csv = to_csv_string(std::iter::empty()).expect("csv");
        assert_eq!(
            csv,
            "url,is_oa,title,doi,type,journal,publication_year,keywords,authors\n"
        );
    }

    #[test]
    fn row_values_and_quoting() {
        let mut record = Record::new("W1", "Graphs, \"quoted\" and more");
        record.is_oa = true;
        record.doi = Some("10.1/x".into());
        record.kind = Some("article".into());
        record.journal = Some("J".into());
        record.publication_year = Some(2020);
        record.keywords = vec!["a".into(), "b".into()];
        record.authors = vec![Author::new("Ada"), Author::new("Grace")];

        let csv = to_csv_string([&record]).expect("csv");
        let line = csv.lines().nth(1).expect("data row");
        assert_eq!(
            line,
            ",Yes,\"Graphs, \"\"quoted\"\" and more\",10.1/x,article,J,2020,a|b,Ada|Grace"
        );
    }

    #[test]
    fn missing_fields_export_empty() {
        let record = Record::new("W1", "t");
        let mut out = Vec::new();
        let rows = write_csv([&record], &mut out).expect("csv");
        assert_eq!(rows, 1);
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().nth(1), Some(",No,t,,,,,,"));
    }
}
