//! Export module
//!
//! CSV export of transactions in the layout the importer accepts.

pub mod csv;

pub use self::csv::{export_file_name, export_transactions_csv, render_csv, ExportRow, EXPORT_HEADER};
