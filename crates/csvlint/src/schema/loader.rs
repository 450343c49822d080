//! Building schemas from JSON Table Schema documents.
//!
//! Documents can be supplied pre-parsed, as text, or fetched by reference
//! (`http`/`https` URL, `file://` URL, or a local path).

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CsvlintError, Result};

use super::field::Field;
use super::table::Schema;
use super::types::Constraints;

/// Default timeout for fetching remote schema documents.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the fetch timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "CSVLINT_HTTP_TIMEOUT";

/// A schema document as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDescriptor>>,
}

/// One entry of a document's `fields` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    fn into_field(self) -> Result<Field> {
        let mut field = Field::new(self.name, self.constraints.unwrap_or_default())?;
        if let Some(title) = self.title {
            field = field.with_title(title);
        }
        if let Some(description) = self.description {
            field = field.with_description(description);
        }
        Ok(field)
    }
}

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Timeout for remote fetches.
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let secs = std::env::var(TIMEOUT_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            timeout: Duration::from_secs(secs),
        }
    }
}

impl Schema {
    /// Build a schema from a parsed document.
    ///
    /// A missing `fields` array yields a schema with no columns, and a field
    /// without `constraints` gets an empty constraint set.
    pub fn from_json_table(uri: impl Into<String>, json: &Value) -> Result<Schema> {
        let document: SchemaDocument = serde_json::from_value(json.clone())
            .map_err(|e| CsvlintError::InvalidSchema(e.to_string()))?;
        Self::from_document(uri, document)
    }

    /// Build a schema from document text.
    pub fn from_json_str(uri: impl Into<String>, text: &str) -> Result<Schema> {
        let json: Value = serde_json::from_str(text)?;
        Self::from_json_table(uri, &json)
    }

    /// Build a schema from a typed document.
    pub fn from_document(uri: impl Into<String>, document: SchemaDocument) -> Result<Schema> {
        let fields = document
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(FieldDescriptor::into_field)
            .collect::<Result<Vec<_>>>()?;

        let mut schema = Schema::new(uri, fields);
        if let Some(title) = document.title {
            schema = schema.with_title(title);
        }
        if let Some(description) = document.description {
            schema = schema.with_description(description);
        }
        Ok(schema)
    }

    /// Describe this schema as a document.
    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            title: self.title().map(str::to_string),
            description: self.description().map(str::to_string),
            fields: Some(
                self.fields()
                    .iter()
                    .map(|f| FieldDescriptor {
                        name: f.name().to_string(),
                        constraints: Some(f.constraints().clone()),
                        title: f.title().map(str::to_string),
                        description: f.description().map(str::to_string),
                    })
                    .collect(),
            ),
        }
    }

    /// Fetch and parse the document at `uri`.
    pub fn fetch(uri: &str) -> Result<Schema> {
        Self::fetch_with_config(uri, &LoaderConfig::default())
    }

    /// Fetch and parse the document at `uri` with explicit configuration.
    pub fn fetch_with_config(uri: &str, config: &LoaderConfig) -> Result<Schema> {
        let text = if uri.starts_with("http://") || uri.starts_with("https://") {
            fetch_remote(uri, config)?
        } else if uri.starts_with("file://") {
            let url = Url::parse(uri).map_err(|e| CsvlintError::Url {
                uri: uri.to_string(),
                source: e,
            })?;
            let path = url
                .to_file_path()
                .map_err(|_| CsvlintError::Config(format!("Not a local file URI: {}", uri)))?;
            read_local(&path)?
        } else {
            read_local(Path::new(uri))?
        };

        let schema = Self::from_json_str(uri, &text)?;
        debug!(uri, columns = schema.column_count(), "loaded schema");
        Ok(schema)
    }

    /// Load a schema, treating any fetch or parse failure as "no schema".
    pub fn load_from_uri(uri: &str) -> Option<Schema> {
        match Self::fetch(uri) {
            Ok(schema) => Some(schema),
            Err(e) => {
                warn!(uri, error = %e, "schema unavailable");
                None
            }
        }
    }
}

fn fetch_remote(uri: &str, config: &LoaderConfig) -> Result<String> {
    let http_error = |message: String| CsvlintError::Http {
        uri: uri.to_string(),
        message,
    };

    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| CsvlintError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(uri)
        .send()
        .map_err(|e| http_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(http_error(format!("status {}", response.status())));
    }

    response.text().map_err(|e| http_error(e.to_string()))
}

fn read_local(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CsvlintError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
