//! Spreadsheet service contract
//!
//! The facade only ever talks to a remote spreadsheet through these two
//! traits. A backend authenticates, lists worksheets, and returns cell
//! handles for a rectangle in row-major order; each handle carries the value
//! it was fetched with and can write a new one.
//!
//! [`MemoryService`] implements the contract in-process.

pub mod memory;

use async_trait::async_trait;

use crate::address::{CellAddress, RangeAddress};
use crate::config::{Credentials, DocumentKey};
use crate::error::SheetResult;

pub use memory::{MemoryCell, MemoryService, SheetData, Workbook, WriteAck};

/// One worksheet entry from the document metadata.
#[derive(Debug, Clone)]
pub struct WorksheetInfo<W> {
    pub title: String,
    pub index: usize,
    pub handle: W,
}

/// Document metadata returned by [`SpreadsheetService::fetch_metadata`].
#[derive(Debug, Clone)]
pub struct DocumentInfo<W> {
    pub title: String,
    pub worksheets: Vec<WorksheetInfo<W>>,
}

/// Bounds of a bulk cell fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellQuery {
    pub min_col: u32,
    pub max_col: u32,
    pub min_row: u32,
    pub max_row: u32,
    /// Materialize blank cells instead of skipping them.
    pub force_empty: bool,
}

impl CellQuery {
    /// Query every cell of `range`, blanks included.
    pub fn for_range(range: &RangeAddress) -> Self {
        Self {
            min_col: range.min_col(),
            max_col: range.max_col(),
            min_row: range.min_row(),
            max_row: range.max_row(),
            force_empty: true,
        }
    }

    /// The queried rectangle. Fails on zero or inverted bounds.
    pub fn range(&self) -> SheetResult<RangeAddress> {
        RangeAddress::new(
            CellAddress::new(self.min_col, self.min_row)?,
            CellAddress::new(self.max_col, self.max_row)?,
        )
    }
}

/// A cell handle returned by a fetch.
#[async_trait]
pub trait RemoteCell: Send + Sync {
    fn address(&self) -> CellAddress;

    /// Last fetched (or last written) value. Blank cells read as `""`.
    fn value(&self) -> String;

    /// Write `value` to the service. Resolves once the service acknowledges.
    async fn set_value(&self, value: &str) -> SheetResult<()>;
}

/// A spreadsheet backend.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Opaque reference to one sheet of a document.
    type Worksheet: Clone + Send + Sync;
    type Cell: RemoteCell;

    async fn authenticate(&self, credentials: &Credentials) -> SheetResult<()>;

    async fn fetch_metadata(&self, key: &DocumentKey)
        -> SheetResult<DocumentInfo<Self::Worksheet>>;

    /// Cells of the queried rectangle in row-major order.
    async fn fetch_cells(
        &self,
        worksheet: &Self::Worksheet,
        query: &CellQuery,
    ) -> SheetResult<Vec<Self::Cell>>;
}
