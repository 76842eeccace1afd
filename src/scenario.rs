//! Parameter runs
//!
//! Treats a worksheet as a calculator: write a set of named input cells,
//! wait for every write to be acknowledged, then read back a result cell
//! and a range of intermediate values.
//!
//! ```yaml
//! parameter_range: B2:C8
//! parameter_cells:
//!   parameter1: B2
//!   parameter2: B4
//! total_cell: D20
//! intermediate_range: D10:D14
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{CellAddress, RangeAddress};
use crate::error::{SheetError, SheetResult};
use crate::facade::Worksheet;
use crate::service::SpreadsheetService;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterPlan {
    /// Range covering every parameter cell; fetched once per run.
    pub parameter_range: String,
    /// Parameter name → cell inside `parameter_range`.
    pub parameter_cells: BTreeMap<String, String>,
    pub total_cell: String,
    pub intermediate_range: String,
}

/// Values read back after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub total: String,
    #[serde(rename = "intermediate_values_array")]
    pub intermediate_values: Vec<String>,
}

impl ParameterPlan {
    pub fn from_yaml_file(path: &Path) -> SheetResult<Self> {
        let content = fs::read_to_string(path)?;
        let plan: Self = serde_yaml::from_str(&content)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check every address, and that each parameter cell lies inside the
    /// parameter range.
    pub fn validate(&self) -> SheetResult<()> {
        let range = RangeAddress::parse(&self.parameter_range)?;
        for (name, cell) in &self.parameter_cells {
            let address = CellAddress::parse(cell)?;
            if !range.contains(&address) {
                return Err(SheetError::Validation(format!(
                    "parameter `{}` cell {} is outside {}",
                    name, cell, range
                )));
            }
        }
        CellAddress::parse(&self.total_cell)?;
        RangeAddress::parse(&self.intermediate_range)?;
        Ok(())
    }

    /// Write `parameters` into their cells concurrently, then read the
    /// total cell and the intermediate range.
    ///
    /// Every parameter name is checked before anything is written. If any
    /// write fails the run fails; writes that already landed are not undone.
    pub async fn run<S: SpreadsheetService>(
        &self,
        worksheet: &Worksheet<S>,
        parameters: &BTreeMap<String, String>,
    ) -> SheetResult<RunResult> {
        let writes = parameters
            .iter()
            .map(|(name, value)| {
                self.parameter_cells
                    .get(name)
                    .map(|cell| (cell.as_str(), value.as_str()))
                    .ok_or_else(|| SheetError::UnknownParameter(name.clone()))
            })
            .collect::<SheetResult<Vec<_>>>()?;

        let cells = worksheet.get_cells(&self.parameter_range).await?;
        debug!(worksheet = worksheet.title(), writes = writes.len(), "writing parameters");
        try_join_all(
            writes
                .into_iter()
                .map(|(cell, value)| cells.set_value(cell, value)),
        )
        .await?;

        // Only read once all parameter writes are acknowledged
        let total = worksheet.get_cell(&self.total_cell).await?.get_value();
        let intermediate_values = worksheet
            .get_cells(&self.intermediate_range)
            .await?
            .get_all_values();

        Ok(RunResult {
            total,
            intermediate_values,
        })
    }
}

/// Parse `name=value` pairs as given on the command line.
pub fn parse_parameters<I, T>(pairs: I) -> SheetResult<BTreeMap<String, String>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|pair| {
            let pair = pair.as_ref();
            pair.split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| {
                    SheetError::Validation(format!("expected name=value, got `{}`", pair))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> ParameterPlan {
        ParameterPlan {
            parameter_range: "B2:C8".to_string(),
            parameter_cells: [("parameter1", "B2"), ("parameter3", "C7")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            total_cell: "D20".to_string(),
            intermediate_range: "D10:D14".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(plan().validate().is_ok());
    }

    #[test]
    fn test_validate_cell_outside_range() {
        let mut plan = plan();
        plan.parameter_cells
            .insert("stray".to_string(), "D2".to_string());
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("stray"));
    }

    #[test]
    fn test_validate_bad_total() {
        let mut plan = plan();
        plan.total_cell = "20D".to_string();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_parse_parameters() {
        let params = parse_parameters(["a=1", "b=0.5", "c="]).unwrap();
        assert_eq!(params["a"], "1");
        assert_eq!(params["b"], "0.5");
        assert_eq!(params["c"], "");
    }

    #[test]
    fn test_parse_parameters_value_with_equals() {
        let params = parse_parameters(["f==A1*2"]).unwrap();
        assert_eq!(params["f"], "=A1*2");
    }

    #[test]
    fn test_parse_parameters_rejects_missing_name() {
        assert!(parse_parameters(["=1"]).is_err());
        assert!(parse_parameters(["novalue"]).is_err());
    }

    #[test]
    fn test_run_result_json_keys() {
        let result = RunResult {
            total: "42".to_string(),
            intermediate_values: vec!["1".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total"], "42");
        assert_eq!(json["intermediate_values_array"][0], "1");
    }
}
