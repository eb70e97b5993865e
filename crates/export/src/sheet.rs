//! Sheets and workbooks.

use serde::Serialize;

use crate::error::{ExportError, ExportResult};

/// Styling applied to the heading row. Data cells are never styled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    #[default]
    Bold,
}

/// One named table: a heading row followed by data rows of the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    name: String,
    headings: Vec<String>,
    rows: Vec<Vec<String>>,
    heading_style: HeadingStyle,
}

impl Sheet {
    pub fn new<I, H>(name: impl Into<String>, headings: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        Self {
            name: name.into(),
            headings: headings.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            heading_style: HeadingStyle::Bold,
        }
    }

    /// Append a row; rejects rows whose width differs from the headings.
    pub fn push_row(&mut self, row: Vec<String>) -> ExportResult<()> {
        if row.len() != self.headings.len() {
            return Err(ExportError::ColumnMismatch {
                sheet: self.name.clone(),
                expected: self.headings.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headings.len()
    }

    /// Heading row plus data rows, RFC 4180 quoting.
    pub fn to_csv(&self) -> ExportResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headings)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}

/// Several sheets delivered as one download, in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    pub name: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}
