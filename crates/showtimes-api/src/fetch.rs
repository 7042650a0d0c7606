//! One-shot GET requests with XML or JSON body decoding.

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Number of body characters quoted in decode error messages.
const BODY_PREVIEW_CHARS: usize = 500;

/// Payload encoding expected from an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// XML document (`quick-xml` serde).
    Xml,
    /// JSON document (`serde_json`).
    Json,
}

impl PayloadFormat {
    /// Short name used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "XML",
            Self::Json => "JSON",
        }
    }
}

/// Sends exactly one GET request and decodes the response body.
///
/// A status other than 200 is logged at error level, but the body is still
/// decoded: endpoints that answer an error page with a well-formed payload
/// keep working. There is no timeout, retry or cancellation.
///
/// # Errors
///
/// Returns an error if the request cannot be sent, the body cannot be read,
/// or the body does not decode as `format`.
pub async fn fetch<T: DeserializeOwned>(
    request: RequestBuilder,
    format: PayloadFormat,
    label: &str,
) -> Result<T> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{label} request failed"))?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::error!(%label, code = status.as_u16(), "Unexpected HTTP status");
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read {label} response"))?;

    tracing::debug!(%label, code = status.as_u16(), body_len = body.len(), "Response body received");

    decode(&body, format, label)
}

/// Decodes a response body as `format`.
///
/// # Errors
///
/// Returns an error with a preview of the body if decoding fails.
pub fn decode<T: DeserializeOwned>(body: &str, format: PayloadFormat, label: &str) -> Result<T> {
    match format {
        PayloadFormat::Xml => {
            let raw_result: std::result::Result<T, _> = quick_xml::de::from_str(body);
            raw_result.with_context(|| decode_error(label, format, body))
        }
        PayloadFormat::Json => {
            let raw_result: std::result::Result<T, _> = serde_json::from_str(body);
            raw_result.with_context(|| decode_error(label, format, body))
        }
    }
}

/// Builds a decode error message with a preview of the response body.
fn decode_error(label: &str, format: PayloadFormat, body: &str) -> String {
    let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    format!(
        "{label} {} decoding failed (len={}): {preview}",
        format.as_str(),
        body.len()
    )
}
