//! CLI command handlers

pub mod commands;

pub use commands::{get, run, set, worksheets, SheetSelector, WorkbookArgs};
