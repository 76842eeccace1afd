//! sheets-async - async spreadsheet access with A1 addressing
//!
//! Wraps a spreadsheet service behind `async` methods and translates A1
//! cell and range strings ("B2", "D10:D14") into positions within the flat,
//! row-major block of cells a service returns for a range.
//!
//! # Features
//!
//! - Strict A1 parsing of columns, cells and ranges
//! - Row-major offset map between cell addresses and fetched cells
//! - Document / worksheet / cell-buffer facade over any [`SpreadsheetService`]
//! - In-memory service backed by a YAML workbook file
//! - Parameter runs: write inputs concurrently, then read results
//!
//! # Example
//!
//! ```no_run
//! use sheets_async::config::{Credentials, DocumentKey};
//! use sheets_async::facade::SpreadsheetDocument;
//! use sheets_async::service::MemoryService;
//! use std::path::Path;
//!
//! # async fn demo() -> sheets_async::SheetResult<()> {
//! let service = MemoryService::from_yaml_file(Path::new("workbook.yaml"))?;
//! let mut doc = SpreadsheetDocument::new(service);
//! doc.load(&DocumentKey::new("budget-2025"), &Credentials::from_file(Path::new("creds.json"))?)
//!     .await?;
//!
//! let sheet = doc.get_worksheet(0).await?;
//! let cells = sheet.get_cells("B2:C8").await?;
//! cells.set_value("B4", "0.5").await?;
//! println!("{}", sheet.get_cell("D20").await?.get_value());
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod error;
pub mod facade;
pub mod scenario;
pub mod service;

// Re-export commonly used types
pub use address::{CellAddress, RangeAddress};
pub use error::{SheetError, SheetResult};
pub use facade::{Cell, CellBuffer, SpreadsheetDocument, Worksheet};
pub use service::{RemoteCell, SpreadsheetService};
