//! Single-cell A1 addresses

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::column::{column_to_label, parse_column_label};
use crate::error::{SheetError, SheetResult};

static CELL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn cell_pattern() -> &'static Regex {
    CELL_PATTERN
        .get_or_init(|| Regex::new(r"^([A-Z]+)([1-9][0-9]*)$").expect("cell pattern is valid"))
}

/// A 1-based (column, row) pair, written `B2` in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellAddress {
    pub(crate) col: u32,
    pub(crate) row: u32,
}

impl CellAddress {
    pub fn new(col: u32, row: u32) -> SheetResult<Self> {
        if col == 0 || row == 0 {
            return Err(SheetError::Validation(format!(
                "cell coordinates are 1-based, got column {} row {}",
                col, row
            )));
        }
        Ok(Self { col, row })
    }

    /// Parse `<ColumnLabel><row>`, e.g. `D10`.
    ///
    /// Letters must come first and be uppercase, and the row must not have
    /// a leading zero. Anything else (`2B3`, `b2`, `B02`, `B2 `) is rejected.
    pub fn parse(input: &str) -> SheetResult<Self> {
        let captures = cell_pattern()
            .captures(input)
            .ok_or_else(|| SheetError::Validation(format!("invalid cell address `{}`", input)))?;

        let col = parse_column_label(&captures[1])?;
        let row: u32 = captures[2]
            .parse()
            .map_err(|_| SheetError::Validation(format!("row out of range in `{}`", input)))?;

        Ok(Self { col, row })
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn column_label(&self) -> String {
        column_to_label(self.col)
    }
}

impl FromStr for CellAddress {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellAddress {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CellAddress> for String {
    fn from(cell: CellAddress) -> Self {
        cell.to_string()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_label(self.col), self.row)
    }
}
