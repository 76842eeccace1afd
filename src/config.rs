//! Client configuration: document key and service-account credentials

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SheetResult;

/// Environment variable holding the spreadsheet key
pub const DOCUMENT_KEY_ENV: &str = "SHEETS_DOCUMENT_KEY";
/// Environment variable holding the path to the credentials JSON file
pub const CREDENTIALS_ENV: &str = "SHEETS_CREDENTIALS";

/// Key identifying one spreadsheet document on the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(String);

impl DocumentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Service-account credentials, as found in a downloaded key file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_id: Option<String>,
}

impl Credentials {
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: private_key.into(),
            private_key_id: None,
        }
    }

    /// Load credentials from a JSON key file. Unknown fields are ignored.
    pub fn from_file(path: &Path) -> SheetResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

// Keep the private key out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .finish()
    }
}

/// Everything needed to open a document.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub document_key: DocumentKey,
    pub credentials_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(document_key: impl Into<String>) -> Self {
        Self {
            document_key: DocumentKey::new(document_key),
            credentials_path: None,
        }
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Read the configured credentials file. Without one, returns anonymous
    /// credentials with an empty email and key.
    pub fn load_credentials(&self) -> SheetResult<Credentials> {
        match &self.credentials_path {
            Some(path) => Credentials::from_file(path),
            None => Ok(Credentials::new("", "")),
        }
    }
}
