use std::sync::Arc;

use tracing::debug;

use super::cells::{Cell, CellBuffer};
use crate::address::{CellAddress, RangeAddress};
use crate::error::{SheetError, SheetResult};
use crate::service::{CellQuery, SpreadsheetService};

/// One sheet of a loaded document.
pub struct Worksheet<S: SpreadsheetService> {
    service: Arc<S>,
    title: String,
    index: usize,
    handle: S::Worksheet,
}

impl<S: SpreadsheetService> Clone for Worksheet<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            title: self.title.clone(),
            index: self.index,
            handle: self.handle.clone(),
        }
    }
}

impl<S: SpreadsheetService> std::fmt::Debug for Worksheet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worksheet")
            .field("title", &self.title)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S: SpreadsheetService> Worksheet<S> {
    pub(crate) fn new(service: Arc<S>, title: String, index: usize, handle: S::Worksheet) -> Self {
        Self {
            service,
            title,
            index,
            handle,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Fetch every cell of `range` (e.g. `B2:C8`), blanks included.
    pub async fn get_cells(&self, range: &str) -> SheetResult<CellBuffer<S::Cell>> {
        let range = RangeAddress::parse(range)?;
        let cells = self.fetch(&range).await?;
        CellBuffer::new(cells, range)
    }

    /// Fetch a single cell (e.g. `D20`).
    pub async fn get_cell(&self, cell: &str) -> SheetResult<Cell<S::Cell>> {
        let address = CellAddress::parse(cell)?;
        let range = RangeAddress::single(address);
        let cell = self
            .fetch(&range)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SheetError::CellFetch {
                range: range.to_string(),
                reason: "service returned no cells".to_string(),
            })?;
        Ok(Cell::new(address, cell))
    }

    async fn fetch(&self, range: &RangeAddress) -> SheetResult<Vec<S::Cell>> {
        debug!(worksheet = %self.title, range = %range, "fetching cells");
        self.service
            .fetch_cells(&self.handle, &CellQuery::for_range(range))
            .await
    }
}
