use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

use super::constants::{self, OutputFormat, headers};
use super::response::{decode_xml, remote_error_message};
use super::transport::{ApiRequest, Transport};
use crate::config::ShopConfig;

/// PrestaShop webservice client with connection pooling
#[derive(Clone)]
pub struct PrestashopClient {
    base_url: String,
    api_key: String,
    output_format: OutputFormat,
    http_client: reqwest::Client,
}

impl PrestashopClient {
    pub fn new(shop: &ShopConfig, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("prestashop-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(shop, http_client))
    }

    /// Create a new client with custom HTTP client configuration
    pub fn with_custom_client(shop: &ShopConfig, http_client: reqwest::Client) -> Self {
        Self {
            base_url: shop.base_url.trim_end_matches('/').to_string(),
            api_key: shop.api_key.clone(),
            output_format: shop.output_format,
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Full URL for a request; an explicit `uri` is used verbatim
    pub fn endpoint(&self, request: &ApiRequest) -> String {
        match &request.uri {
            Some(uri) => uri.clone(),
            None => constants::resource_endpoint(&self.base_url, &request.resource, &request.query, self.output_format),
        }
    }

    fn decode_body(&self, text: &str) -> anyhow::Result<Value> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        if trimmed.starts_with('<') {
            return decode_xml(trimmed);
        }
        serde_json::from_str(trimmed).context("Failed to parse JSON response")
    }
}

#[async_trait]
impl Transport for PrestashopClient {
    async fn request(&self, request: ApiRequest) -> anyhow::Result<Value> {
        let url = self.endpoint(&request);
        let correlation_id = uuid::Uuid::new_v4().to_string();
        debug!("{} {} [{}]", request.method.as_str(), url, correlation_id);

        let accept = match self.output_format {
            OutputFormat::Json => headers::ACCEPT_JSON,
            OutputFormat::Xml => headers::ACCEPT_XML,
        };

        let mut builder = self
            .http_client
            .request(request.method.into(), &url)
            .basic_auth(&self.api_key, Some(""))
            .header(reqwest::header::ACCEPT, accept)
            .header(headers::X_CORRELATION_ID, &correlation_id);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, headers::CONTENT_TYPE_XML)
                .body(body);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;
        debug!("{} {} -> {} [{}]", request.method.as_str(), request.resource, status, correlation_id);

        if !status.is_success() {
            let message = remote_error_message(&text).unwrap_or_else(|| text.trim().to_string());
            warn!("Webservice error {} [{}]: {}", status, correlation_id, message);
            anyhow::bail!("PrestaShop API error ({}): {}", status, message);
        }

        self.decode_body(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(format: OutputFormat) -> PrestashopClient {
        let shop = ShopConfig {
            base_url: "https://shop.test/".to_string(),
            api_key: "KEY".to_string(),
            output_format: format,
        };
        PrestashopClient::with_custom_client(&shop, reqwest::Client::new())
    }

    #[test]
    fn test_endpoint() {
        let client = client(OutputFormat::Json);
        let request = ApiRequest::get("customers").query("limit=5");
        assert_eq!(client.endpoint(&request), "https://shop.test/api/customers?limit=5&output_format=JSON");

        let request = ApiRequest::get("ignored").uri("https://shop.test/api/orders/1?display=full");
        assert_eq!(client.endpoint(&request), "https://shop.test/api/orders/1?display=full");
    }

    #[test]
    fn test_decode_body_formats() {
        let client = client(OutputFormat::Xml);
        assert_eq!(client.decode_body("").unwrap(), Value::Null);
        assert_eq!(client.decode_body("[]").unwrap(), json!([]));
        assert_eq!(
            client.decode_body("<prestashop><order><id>1</id></order></prestashop>").unwrap(),
            json!({"order": {"id": "1"}})
        );
        assert!(client.decode_body("not json").is_err());
    }
}
