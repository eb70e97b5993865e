//! `stratboard-export`: tabular reports over the strategy records.
//!
//! A [`Formatter`] turns records of one kind into a [`Sheet`] with fixed
//! headings; the [`Exporter`] loads records from the store and composes sheets
//! into single-sheet CSV downloads or the multi-sheet strategy report.

pub mod error;
pub mod exporter;
pub mod formatters;
pub mod lookup;
pub mod sheet;

pub use error::{ExportError, ExportResult};
pub use exporter::{Exporter, KpiExportQuery};
pub use formatters::{
    AlertFormatter, DepartmentFormatter, Formatter, KpiFormatter, MilestoneFormatter,
    PillarFormatter, PredictionFormatter, ReportFormatter,
};
pub use lookup::Lookup;
pub use sheet::{HeadingStyle, Sheet, Workbook};
