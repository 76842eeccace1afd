use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to fetch spreadsheet metadata: {0}")]
    MetadataFetch(String),

    #[error("Cannot find worksheet index: {0}")]
    WorksheetIndexNotFound(usize),

    #[error("Cannot find worksheet name: `{0}`")]
    WorksheetNameNotFound(String),

    #[error("Failed to fetch cells {range}: {reason}")]
    CellFetch { range: String, reason: String },

    #[error("Failed to write cell {cell}: {reason}")]
    CellWrite { cell: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cell {cell} is outside range {range}")]
    OffsetOutOfRange { cell: String, range: String },

    #[error("Unknown Parameter: {0}")]
    UnknownParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetError {
    /// True for the two "not found" variants (worksheet index or name).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SheetError::WorksheetIndexNotFound(_) | SheetError::WorksheetNameNotFound(_)
        )
    }
}
