use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::worksheet::Worksheet;
use crate::config::{Credentials, DocumentKey};
use crate::error::{SheetError, SheetResult};
use crate::service::{SpreadsheetService, WorksheetInfo};

/// A spreadsheet document opened through a [`SpreadsheetService`].
///
/// The worksheet list and the title → index map are filled once by
/// [`load`](Self::load) and never refreshed. If worksheets are added,
/// removed or renamed on the service afterwards, the cached lookup is stale
/// until the document is loaded again.
pub struct SpreadsheetDocument<S: SpreadsheetService> {
    service: Arc<S>,
    title: String,
    worksheets: Vec<WorksheetInfo<S::Worksheet>>,
    worksheet_names: HashMap<String, usize>,
    loaded: bool,
}

impl<S: SpreadsheetService> SpreadsheetDocument<S> {
    pub fn new(service: S) -> Self {
        Self::with_shared_service(Arc::new(service))
    }

    pub fn with_shared_service(service: Arc<S>) -> Self {
        Self {
            service,
            title: String::new(),
            worksheets: Vec::new(),
            worksheet_names: HashMap::new(),
            loaded: false,
        }
    }

    /// Authenticate, then fetch the worksheet list of `key`.
    ///
    /// Takes `&mut self`, so no other call on this document can be in
    /// flight while it runs. On failure the previously cached worksheets
    /// are kept untouched.
    pub async fn load(&mut self, key: &DocumentKey, credentials: &Credentials) -> SheetResult<()> {
        debug!(document = %key, client_email = %credentials.client_email, "authenticating");
        self.service.authenticate(credentials).await?;

        debug!(document = %key, "fetching worksheet metadata");
        let info = self.service.fetch_metadata(key).await?;

        // First worksheet with a given title wins
        let mut names = HashMap::with_capacity(info.worksheets.len());
        for (position, sheet) in info.worksheets.iter().enumerate() {
            names.entry(sheet.title.clone()).or_insert(position);
        }

        debug!(
            document = %key,
            worksheets = info.worksheets.len(),
            "document loaded"
        );
        self.title = info.title;
        self.worksheets = info.worksheets;
        self.worksheet_names = names;
        self.loaded = true;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Cached worksheet titles, in document order.
    pub fn worksheet_titles(&self) -> Vec<&str> {
        self.worksheets.iter().map(|w| w.title.as_str()).collect()
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Worksheet at `index` in the cached list.
    pub async fn get_worksheet(&self, index: usize) -> SheetResult<Worksheet<S>> {
        let info = self
            .worksheets
            .get(index)
            .ok_or(SheetError::WorksheetIndexNotFound(index))?;

        Ok(Worksheet::new(
            Arc::clone(&self.service),
            info.title.clone(),
            index,
            info.handle.clone(),
        ))
    }

    /// Worksheet with title `name` in the cached list.
    pub async fn get_worksheet_by_name(&self, name: &str) -> SheetResult<Worksheet<S>> {
        let index = *self
            .worksheet_names
            .get(name)
            .ok_or_else(|| SheetError::WorksheetNameNotFound(name.to_string()))?;
        self.get_worksheet(index).await
    }
}
