use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::{Client, Response, StatusCode};
use log::{debug, error};

use crate::errors::ProviderError;
use crate::translation::placeholders::contains_marker;
use super::{Provider, TranslateOptions, TranslatedText, Usage, UsageDetail};

/// Endpoint for accounts on the free plan
pub const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2";

/// Endpoint for accounts on a paid plan
pub const PRO_ENDPOINT: &str = "https://api.deepl.com/v2";

/// Pick the endpoint matching an API key; free-plan keys end in `:fx`
pub fn endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

/// DeepL client for interacting with the DeepL REST API
#[derive(Debug, Clone)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL including the version segment
    endpoint: String,
}

/// DeepL translate request
#[derive(Debug, Serialize)]
pub struct DeepLRequest<'a> {
    /// Texts to translate, in order
    text: &'a [String],

    /// Target language code
    target_lang: &'a str,

    /// Source language code, omitted for auto-detection
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,

    /// Formality preference
    formality: &'static str,

    /// `xml` when the batch carries markers, so DeepL keeps them as tags
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_handling: Option<&'static str>,
}

impl<'a> DeepLRequest<'a> {
    /// Build a request for a batch of texts
    pub fn new(texts: &'a [String], options: &'a TranslateOptions) -> Self {
        Self {
            text: texts,
            target_lang: &options.target_language,
            source_lang: options.source_language.as_deref(),
            formality: options.formality.as_str(),
            tag_handling: texts.iter().any(|t| contains_marker(t)).then_some("xml"),
        }
    }
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One translation per submitted text
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language the provider detected in the source text
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

/// DeepL usage response
#[derive(Debug, Deserialize)]
pub struct DeepLUsageResponse {
    /// Characters translated in the current period
    pub character_count: Option<u64>,
    /// Character limit of the current period
    pub character_limit: Option<u64>,
    /// Documents translated in the current period
    pub document_count: Option<u64>,
    /// Document limit of the current period
    pub document_limit: Option<u64>,
}

impl From<DeepLUsageResponse> for Usage {
    fn from(response: DeepLUsageResponse) -> Self {
        let detail = |count: Option<u64>, limit: Option<u64>| match (count, limit) {
            (Some(count), Some(limit)) => Some(UsageDetail { count, limit }),
            _ => None,
        };

        Usage {
            character: detail(response.character_count, response.character_limit),
            document: detail(response.document_count, response.document_limit),
        }
    }
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Build the URL of an API resource
    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), resource)
    }

    /// Value of the authorization header
    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Complete a translate request
    pub async fn complete(&self, request: &DeepLRequest<'_>) -> Result<DeepLResponse, ProviderError> {
        let response = self.client.post(self.url("translate"))
            .header("Authorization", self.auth_header())
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL translate response: {}", e)))
    }

    /// Fetch the usage counters of the account
    pub async fn fetch_usage(&self) -> Result<DeepLUsageResponse, ProviderError> {
        let response = self.client.get(self.url("usage"))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        response.json::<DeepLUsageResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL usage response: {}", e)))
    }
}

/// Classify a transport failure
fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Turn non-success statuses into provider errors
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error!("DeepL API error ({}): {}", status, error_text);

    Err(status_error(status, error_text))
}

/// Map a DeepL status code to the matching error
pub(crate) fn status_error(status: StatusCode, message: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        456 => ProviderError::QuotaExceeded(message),
        code => ProviderError::ApiError { status_code: code, message },
    }
}

#[async_trait]
impl Provider for DeepL {
    async fn translate_batch(
        &self,
        texts: &[String],
        options: &TranslateOptions,
    ) -> Result<Vec<TranslatedText>, ProviderError> {
        debug!("Sending {} texts to DeepL ({} -> {})",
               texts.len(),
               options.source_language.as_deref().unwrap_or("auto"),
               options.target_language);

        let request = DeepLRequest::new(texts, options);
        let response = self.complete(&request).await?;

        Ok(response.translations.into_iter()
            .map(|t| TranslatedText {
                text: t.text,
                detected_source_language: t.detected_source_language,
            })
            .collect())
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        Ok(self.fetch_usage().await?.into())
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}
