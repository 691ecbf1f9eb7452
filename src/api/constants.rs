//! API Constants and Configuration for the PrestaShop webservice

use serde::{Deserialize, Serialize};

/// Webservice path below the shop base URL
pub const API_BASE_PATH: &str = "/api";

/// Query parameter requesting a write template for a resource
pub const BLANK_SCHEMA_QUERY: &str = "schema=blank";

/// Query parameter asking for full records instead of id/href stubs
pub const DISPLAY_FULL_QUERY: &str = "display=full";

/// Placeholder the webservice uses for an unbounded date
pub const UNLIMITED_DATE: &str = "0000-00-00 00:00:00";

/// Root element of every XML document sent to the webservice
pub const XML_ROOT: &str = "prestashop";

/// Element wrapping each translation of a multi-language field
pub const XML_LANGUAGE: &str = "language";

/// Configuration key holding the default language id
pub const DEFAULT_LANGUAGE_KEY: &str = "PS_LANG_DEFAULT";

/// Response encoding negotiated through `output_format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Xml => "XML",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "JSON" => Ok(OutputFormat::Json),
            "XML" => Ok(OutputFormat::Xml),
            other => anyhow::bail!("Unknown output format '{}', expected JSON or XML", other),
        }
    }
}

/// Standard headers for webservice requests
pub mod headers {
    /// Content type for XML write bodies
    pub const CONTENT_TYPE_XML: &str = "application/xml";

    /// Accept header for JSON responses
    pub const ACCEPT_JSON: &str = "application/json";

    /// Accept header for XML responses
    pub const ACCEPT_XML: &str = "application/xml";

    /// Correlation id attached to every request for log tracing
    pub const X_CORRELATION_ID: &str = "X-Correlation-ID";
}

/// HTTP methods for operations
pub mod methods {
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
    pub const PATCH: &str = "PATCH";
    pub const DELETE: &str = "DELETE";
}

/// Build the webservice root URL for a shop
pub fn api_root(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), API_BASE_PATH)
}

/// Build full resource endpoint URL with query and output format
pub fn resource_endpoint(base_url: &str, resource: &str, query: &str, format: OutputFormat) -> String {
    let resource = resource.trim_start_matches('/');
    let separator = if query.is_empty() { "" } else { "&" };
    format!(
        "{}/{}?{}{}output_format={}",
        api_root(base_url),
        resource,
        query,
        separator,
        format.as_str()
    )
}

/// Build a single record path (e.g. "customers/12")
pub fn record_path(resource: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", resource, id)
}
