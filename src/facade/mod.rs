//! Async facade over a [`SpreadsheetService`](crate::service::SpreadsheetService)
//!
//! ```text
//! SpreadsheetDocument ──get_worksheet──▶ Worksheet ──get_cells──▶ CellBuffer
//!                                                  └─get_cell───▶ Cell
//! ```
//!
//! Nothing here retries, times out, or caches cell values. Service errors
//! reach the caller unchanged.

mod cells;
mod document;
mod worksheet;

pub use cells::{Cell, CellBuffer};
pub use document::SpreadsheetDocument;
pub use worksheet::Worksheet;
