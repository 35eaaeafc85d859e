//! Spreadsheet export of the event log.

pub mod csv_export;

pub use csv_export::{export_csv, ExportOptions};
