//! Column labels: bijective base-26 with digits A=1 … Z=26

use crate::error::{SheetError, SheetResult};

/// Parse a column label into its 1-based column number.
///
/// Examples:
/// - A → 1
/// - Z → 26
/// - AA → 27
/// - AB → 28
pub fn parse_column_label(label: &str) -> SheetResult<u32> {
    if label.is_empty() {
        return Err(SheetError::Validation("empty column label".to_string()));
    }

    let mut col: u32 = 0;
    for ch in label.chars() {
        if !ch.is_ascii_uppercase() {
            return Err(SheetError::Validation(format!(
                "invalid column label `{}`",
                label
            )));
        }
        let digit = (ch as u8 - b'A' + 1) as u32;
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                SheetError::Validation(format!("column label `{}` is too large", label))
            })?;
    }

    Ok(col)
}

/// Render a 1-based column number as a label. Column 0 has no label and
/// renders as the empty string.
pub fn column_to_label(col: u32) -> String {
    let mut result = String::new();
    let mut idx = col;

    while idx > 0 {
        idx -= 1;
        result.insert(0, (b'A' + (idx % 26) as u8) as char);
        idx /= 26;
    }

    result
}
