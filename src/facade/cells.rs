use tracing::debug;

use crate::address::{CellAddress, RangeAddress};
use crate::error::{SheetError, SheetResult};
use crate::service::RemoteCell;

/// Cells of a fetched range, kept in the row-major order the service
/// returned them in.
#[derive(Debug)]
pub struct CellBuffer<C> {
    cells: Vec<C>,
    range: RangeAddress,
}

impl<C: RemoteCell> CellBuffer<C> {
    /// Wrap `cells` fetched for `range`. The service must have returned one
    /// cell per address.
    pub fn new(cells: Vec<C>, range: RangeAddress) -> SheetResult<Self> {
        if cells.len() != range.len() {
            return Err(SheetError::CellFetch {
                range: range.to_string(),
                reason: format!(
                    "service returned {} cells, expected {}",
                    cells.len(),
                    range.len()
                ),
            });
        }
        Ok(Self { cells, range })
    }

    pub fn range(&self) -> &RangeAddress {
        &self.range
    }

    pub fn width(&self) -> usize {
        self.range.width()
    }

    pub fn height(&self) -> usize {
        self.range.height()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Handle for `address`.
    pub fn get(&self, address: &CellAddress) -> SheetResult<&C> {
        let offset = self.range.offset_of(address)?;
        Ok(&self.cells[offset])
    }

    /// Value at `cell`, e.g. `B4`.
    pub fn get_value(&self, cell: &str) -> SheetResult<String> {
        let address = CellAddress::parse(cell)?;
        Ok(self.get(&address)?.value())
    }

    /// Every value, row-major.
    pub fn get_all_values(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.value()).collect()
    }

    /// Values grouped by row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.width())
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }

    /// Write `value` to `cell`. Resolves once the service acknowledges.
    pub async fn set_value(&self, cell: &str, value: &str) -> SheetResult<()> {
        let address = CellAddress::parse(cell)?;
        let handle = self.get(&address)?;
        debug!(cell = %address, range = %self.range, "writing cell");
        handle.set_value(value).await
    }
}

/// A single fetched cell.
#[derive(Debug)]
pub struct Cell<C> {
    address: CellAddress,
    handle: C,
}

impl<C: RemoteCell> Cell<C> {
    pub(crate) fn new(address: CellAddress, handle: C) -> Self {
        Self { address, handle }
    }

    pub fn address(&self) -> CellAddress {
        self.address
    }

    pub fn get_value(&self) -> String {
        self.handle.value()
    }

    pub async fn set_value(&self, value: &str) -> SheetResult<()> {
        debug!(cell = %self.address, "writing cell");
        self.handle.set_value(value).await
    }
}
