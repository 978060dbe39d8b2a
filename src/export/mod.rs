//! Presentation and export of lookup results.
//!
//! Records keep absent fields absent. This module is the only place the
//! `N/A` placeholder is substituted, when a record is flattened into
//! label/value rows for a table or a CSV file.

mod csv;
mod rows;

pub use self::csv::{export_record_csv, write_record_csv};
pub use rows::{record_rows, select_record, ExportRow};
