//! In-process spreadsheet service
//!
//! Holds a whole workbook in memory and serves it through
//! [`SpreadsheetService`]. Used by the `sheets` binary (backed by a YAML
//! workbook file) and by tests, which can inject write failures and
//! write latency.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CellQuery, DocumentInfo, RemoteCell, SpreadsheetService, WorksheetInfo};
use crate::address::CellAddress;
use crate::config::{Credentials, DocumentKey};
use crate::error::{SheetError, SheetResult};

fn default_rows() -> u32 {
    1000
}

fn default_cols() -> u32 {
    26
}

/// A workbook as stored in a YAML file.
///
/// ```yaml
/// key: budget-2025
/// title: Budget
/// client_email: bot@example.iam.gserviceaccount.com
/// worksheets:
///   - title: Inputs
///     rows: 20
///     cols: 4
///     cells:
///       B2: "100"
///       D20: "=SUM(B2:C8)"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub key: String,
    #[serde(default)]
    pub title: String,
    /// When set, only credentials with this email authenticate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default)]
    pub worksheets: Vec<SheetData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub title: String,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// Non-blank cells only.
    #[serde(default)]
    pub cells: BTreeMap<CellAddress, String>,
}

impl SheetData {
    pub fn new(title: impl Into<String>, cols: u32, rows: u32) -> Self {
        Self {
            title: title.into(),
            rows,
            cols,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, cell: &str, value: impl Into<String>) -> SheetResult<Self> {
        self.cells.insert(CellAddress::parse(cell)?, value.into());
        Ok(self)
    }
}

/// One acknowledged write, in acknowledgement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    pub worksheet: String,
    pub cell: CellAddress,
    pub value: String,
}

#[derive(Debug)]
struct Store {
    workbook: Mutex<Workbook>,
    acks: Mutex<Vec<WriteAck>>,
    failing: Mutex<HashSet<(usize, CellAddress)>>,
    write_latency: Mutex<Option<Duration>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check_sheet(sheet: &SheetData) -> SheetResult<()> {
    if sheet.title.is_empty() {
        return Err(SheetError::Validation(
            "worksheet title must not be empty".to_string(),
        ));
    }
    if let Some(cell) = sheet
        .cells
        .keys()
        .find(|cell| cell.col > sheet.cols || cell.row > sheet.rows)
    {
        return Err(SheetError::Validation(format!(
            "cell {} is outside worksheet `{}` ({} columns x {} rows)",
            cell, sheet.title, sheet.cols, sheet.rows
        )));
    }
    Ok(())
}

impl Store {
    fn sheet_title(&self, sheet: usize) -> String {
        lock(&self.workbook)
            .worksheets
            .get(sheet)
            .map(|s| s.title.clone())
            .unwrap_or_default()
    }
}

/// Service backed by an in-memory [`Workbook`].
#[derive(Debug, Clone)]
pub struct MemoryService {
    store: Arc<Store>,
    authenticated: Arc<AtomicBool>,
}

impl MemoryService {
    /// Fails on an untitled worksheet or a stored cell outside its sheet.
    pub fn new(workbook: Workbook) -> SheetResult<Self> {
        workbook.worksheets.iter().try_for_each(check_sheet)?;

        Ok(Self {
            store: Arc::new(Store {
                workbook: Mutex::new(workbook),
                acks: Mutex::new(Vec::new()),
                failing: Mutex::new(HashSet::new()),
                write_latency: Mutex::new(None),
            }),
            authenticated: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn from_yaml_str(content: &str) -> SheetResult<Self> {
        Self::new(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: &Path) -> SheetResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Persist the current state of the workbook.
    pub fn save_yaml_file(&self, path: &Path) -> SheetResult<()> {
        let content = serde_yaml::to_string(&self.snapshot())?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Delay every write by `latency` before it is applied and acknowledged.
    pub fn with_write_latency(self, latency: Duration) -> Self {
        *lock(&self.store.write_latency) = Some(latency);
        self
    }

    /// Append a worksheet to the live workbook and return its index.
    ///
    /// Documents loaded earlier keep their cached worksheet list until they
    /// are loaded again.
    pub fn add_worksheet(&self, sheet: SheetData) -> SheetResult<usize> {
        check_sheet(&sheet)?;
        let mut workbook = lock(&self.store.workbook);
        workbook.worksheets.push(sheet);
        Ok(workbook.worksheets.len() - 1)
    }

    /// Make writes to `cell` on worksheet `sheet` fail.
    pub fn fail_writes_to(&self, sheet: usize, cell: CellAddress) {
        lock(&self.store.failing).insert((sheet, cell));
    }

    /// Copy of the current workbook contents.
    pub fn snapshot(&self) -> Workbook {
        lock(&self.store.workbook).clone()
    }

    /// Current value at `cell`, blank cells as `""`.
    pub fn value_at(&self, sheet: usize, cell: CellAddress) -> Option<String> {
        let workbook = lock(&self.store.workbook);
        let data = workbook.worksheets.get(sheet)?;
        Some(data.cells.get(&cell).cloned().unwrap_or_default())
    }

    /// Acknowledged writes so far, oldest first.
    pub fn write_log(&self) -> Vec<WriteAck> {
        lock(&self.store.acks).clone()
    }

    fn ensure_authenticated(&self) -> SheetResult<()> {
        if self.authenticated.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SheetError::Authentication("not authenticated".to_string()))
        }
    }
}

#[async_trait]
impl SpreadsheetService for MemoryService {
    type Worksheet = usize;
    type Cell = MemoryCell;

    async fn authenticate(&self, credentials: &Credentials) -> SheetResult<()> {
        let expected = lock(&self.store.workbook).client_email.clone();
        if let Some(expected) = expected {
            if credentials.client_email != expected {
                return Err(SheetError::Authentication(format!(
                    "service account `{}` has no access to this document",
                    credentials.client_email
                )));
            }
        }
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_metadata(&self, key: &DocumentKey) -> SheetResult<DocumentInfo<usize>> {
        self.ensure_authenticated()?;
        let workbook = lock(&self.store.workbook);
        if workbook.key != key.as_str() {
            return Err(SheetError::MetadataFetch(format!(
                "spreadsheet `{}` not found",
                key
            )));
        }

        Ok(DocumentInfo {
            title: workbook.title.clone(),
            worksheets: workbook
                .worksheets
                .iter()
                .enumerate()
                .map(|(index, sheet)| WorksheetInfo {
                    title: sheet.title.clone(),
                    index,
                    handle: index,
                })
                .collect(),
        })
    }

    async fn fetch_cells(
        &self,
        worksheet: &usize,
        query: &CellQuery,
    ) -> SheetResult<Vec<MemoryCell>> {
        let range = query.range()?;
        let fetch_error = |reason: String| SheetError::CellFetch {
            range: range.to_string(),
            reason,
        };

        self.ensure_authenticated()
            .map_err(|e| fetch_error(e.to_string()))?;

        let workbook = lock(&self.store.workbook);
        let sheet = workbook
            .worksheets
            .get(*worksheet)
            .ok_or_else(|| fetch_error(format!("worksheet {} no longer exists", worksheet)))?;

        if range.max_col() > sheet.cols || range.max_row() > sheet.rows {
            return Err(fetch_error(format!(
                "exceeds grid limits of `{}` ({} columns x {} rows)",
                sheet.title, sheet.cols, sheet.rows
            )));
        }

        let cells = range
            .cells()
            .filter_map(|address| {
                let value = sheet.cells.get(&address).cloned();
                if value.is_none() && !query.force_empty {
                    return None;
                }
                Some(MemoryCell {
                    sheet: *worksheet,
                    address,
                    value: Mutex::new(value.unwrap_or_default()),
                    store: Arc::clone(&self.store),
                })
            })
            .collect();

        Ok(cells)
    }
}

/// Cell handle returned by [`MemoryService`].
#[derive(Debug)]
pub struct MemoryCell {
    sheet: usize,
    address: CellAddress,
    value: Mutex<String>,
    store: Arc<Store>,
}

#[async_trait]
impl RemoteCell for MemoryCell {
    fn address(&self) -> CellAddress {
        self.address
    }

    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    async fn set_value(&self, value: &str) -> SheetResult<()> {
        let latency = *lock(&self.store.write_latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if lock(&self.store.failing).contains(&(self.sheet, self.address)) {
            return Err(SheetError::CellWrite {
                cell: self.address.to_string(),
                reason: "write rejected by service".to_string(),
            });
        }

        {
            let mut workbook = lock(&self.store.workbook);
            let sheet = workbook.worksheets.get_mut(self.sheet).ok_or_else(|| {
                SheetError::CellWrite {
                    cell: self.address.to_string(),
                    reason: format!("worksheet {} no longer exists", self.sheet),
                }
            })?;
            if value.is_empty() {
                sheet.cells.remove(&self.address);
            } else {
                sheet.cells.insert(self.address, value.to_string());
            }
        }

        *lock(&self.value) = value.to_string();
        lock(&self.store.acks).push(WriteAck {
            worksheet: self.store.sheet_title(self.sheet),
            cell: self.address,
            value: value.to_string(),
        });
        Ok(())
    }
}
