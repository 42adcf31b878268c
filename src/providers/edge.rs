use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::{Client, header};
use url::Url;
use log::{error, debug, warn};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Default endpoint handing out bearer tokens
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://edge.microsoft.com/translate/auth";

/// Default translation endpoint
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://api-edge.cognitive.microsofttranslator.com/translate";

/// Edge translator client: token from one endpoint, translation from another
#[derive(Debug)]
pub struct EdgeTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Token endpoint URL
    auth_endpoint: String,
    /// Translate endpoint URL, without query parameters
    translate_endpoint: String,
    /// API version query parameter
    api_version: String,
    /// Source language tag
    from: String,
    /// Target language tag
    to: String,
}

/// One element of the translate request body
#[derive(Debug, Serialize)]
pub struct EdgeRequestItem {
    /// The text to translate
    pub text: String,
}

/// One element of the translate response body
#[derive(Debug, Deserialize)]
pub struct EdgeResponseItem {
    /// Translations of the matching request item
    #[serde(default)]
    pub translations: Vec<EdgeTranslation>,
}

/// A single translation
#[derive(Debug, Deserialize)]
pub struct EdgeTranslation {
    /// The translated text
    pub text: String,

    /// Target language tag reported by the service
    #[serde(default)]
    pub to: String,
}

impl EdgeTranslator {
    /// Create a new client against the given endpoints
    pub fn new(
        auth_endpoint: impl Into<String>,
        translate_endpoint: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with a {}s timeout, falling back to defaults: {}", timeout_secs, e);
                Client::new()
            });

        Self {
            client,
            auth_endpoint: auth_endpoint.into(),
            translate_endpoint: translate_endpoint.into(),
            api_version: "3.0".to_string(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a client with the public endpoints, English to Simplified Chinese
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_AUTH_ENDPOINT, DEFAULT_TRANSLATE_ENDPOINT, "en", "zh-Hans", 10)
    }

    /// Override the API version query parameter
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Build the full translate URL including query parameters
    pub fn translate_url(&self) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.translate_endpoint,
            &[
                ("api-version", self.api_version.as_str()),
                ("from", self.from.as_str()),
                ("to", self.to.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid translate endpoint '{}': {}", self.translate_endpoint, e)))
    }
}

/// Extract the first translation from a response body
pub fn parse_translation_response(body: &str) -> Result<String, ProviderError> {
    let items: Vec<EdgeResponseItem> = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(e.to_string()))?;

    items.into_iter()
        .next()
        .and_then(|item| item.translations.into_iter().next())
        .map(|translation| translation.text)
        .ok_or_else(|| ProviderError::ParseError("Response contained no translations".to_string()))
}

#[async_trait]
impl TranslationBackend for EdgeTranslator {
    async fn fetch_token(&self) -> Result<String, ProviderError> {
        let response = self.client.get(&self.auth_endpoint)
            .send()
            .await
            .map_err(|e| ProviderError::AuthenticationError(format!("Failed to reach token endpoint: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            error!("Token endpoint error ({})", status);
            return Err(ProviderError::AuthenticationError(format!("Token endpoint returned {}", status)));
        }

        let token = response.text().await
            .map_err(|e| ProviderError::AuthenticationError(format!("Failed to read token: {}", e)))?;

        debug!("Obtained bearer token ({} bytes)", token.len());
        Ok(token.trim().to_string())
    }

    async fn translate(&self, token: &str, text: &str) -> Result<String, ProviderError> {
        let url = self.translate_url()?;
        let body = vec![EdgeRequestItem { text: text.to_string() }];

        let response = self.client.post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(format!("Failed to reach translate endpoint: {}", e))
                } else {
                    ProviderError::RequestFailed(format!("Failed to send request to translate endpoint: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translate endpoint error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read response body: {}", e)))?;

        parse_translation_response(&body)
    }

    fn name(&self) -> &str {
        "edge"
    }
}
