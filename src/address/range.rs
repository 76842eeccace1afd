//! Rectangular ranges and the row-major offset map over them

use std::fmt;
use std::str::FromStr;

use super::cell::CellAddress;
use crate::error::{SheetError, SheetResult};

/// An inclusive rectangle `top-left:bottom-right`, e.g. `B2:C8`.
///
/// Only built through [`new`](Self::new), [`single`](Self::single) or
/// [`parse`](Self::parse), so `min <= max` holds on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeAddress {
    min_col: u32,
    max_col: u32,
    min_row: u32,
    max_row: u32,
}

impl RangeAddress {
    /// Build a range from its two corners. The first must be the top-left.
    pub fn new(top_left: CellAddress, bottom_right: CellAddress) -> SheetResult<Self> {
        if top_left.col > bottom_right.col || top_left.row > bottom_right.row {
            return Err(SheetError::Validation(format!(
                "range {}:{} is not in top-left:bottom-right order",
                top_left, bottom_right
            )));
        }
        Ok(Self {
            min_col: top_left.col,
            max_col: bottom_right.col,
            min_row: top_left.row,
            max_row: bottom_right.row,
        })
    }

    /// The one-cell range `cell:cell`.
    pub fn single(cell: CellAddress) -> Self {
        Self {
            min_col: cell.col,
            max_col: cell.col,
            min_row: cell.row,
            max_row: cell.row,
        }
    }

    /// Parse `<cell>:<cell>`. Exactly one colon is accepted.
    pub fn parse(input: &str) -> SheetResult<Self> {
        let mut parts = input.split(':');
        let (first, second) = match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) => (first, second),
            _ => {
                return Err(SheetError::Validation(format!(
                    "invalid range `{}`: expected exactly one `:`",
                    input
                )))
            }
        };

        Self::new(CellAddress::parse(first)?, CellAddress::parse(second)?)
    }

    pub fn min_col(&self) -> u32 {
        self.min_col
    }

    pub fn max_col(&self) -> u32 {
        self.max_col
    }

    pub fn min_row(&self) -> u32 {
        self.min_row
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn top_left(&self) -> CellAddress {
        CellAddress {
            col: self.min_col,
            row: self.min_row,
        }
    }

    pub fn bottom_right(&self) -> CellAddress {
        CellAddress {
            col: self.max_col,
            row: self.max_row,
        }
    }

    pub fn width(&self) -> usize {
        (self.max_col - self.min_col + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_row - self.min_row + 1) as usize
    }

    /// Number of cells in the rectangle.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false: a range holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, cell: &CellAddress) -> bool {
        (self.min_col..=self.max_col).contains(&cell.col)
            && (self.min_row..=self.max_row).contains(&cell.row)
    }

    /// Row-major offset of `cell` from the top-left corner.
    ///
    /// `(col - min_col) + (row - min_row) * width`
    pub fn offset_of(&self, cell: &CellAddress) -> SheetResult<usize> {
        if !self.contains(cell) {
            return Err(SheetError::OffsetOutOfRange {
                cell: cell.to_string(),
                range: self.to_string(),
            });
        }
        let col_offset = (cell.col - self.min_col) as usize;
        let row_offset = (cell.row - self.min_row) as usize;
        Ok(col_offset + row_offset * self.width())
    }

    /// Inverse of [`offset_of`](Self::offset_of).
    pub fn address_at(&self, offset: usize) -> Option<CellAddress> {
        if offset >= self.len() {
            return None;
        }
        let width = self.width();
        Some(CellAddress {
            col: self.min_col + (offset % width) as u32,
            row: self.min_row + (offset / width) as u32,
        })
    }

    /// Every address in the range, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| CellAddress { col, row }))
    }
}

impl FromStr for RangeAddress {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.top_left(), self.bottom_right())
    }
}
