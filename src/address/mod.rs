//! A1 addressing
//!
//! Translates between column labels, cell and range strings, and the
//! row-major offsets used to index a fetched block of cells:
//! - `AB` ↔ 28
//! - `B4` ↔ (2, 4)
//! - `B4` in `B2:C8` ↔ offset 4

mod cell;
mod column;
mod range;

pub use cell::CellAddress;
pub use column::{column_to_label, parse_column_label};
pub use range::RangeAddress;
