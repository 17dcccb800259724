//! HTTP Response Utilities
//!
//! Maps document store responses onto the domain error taxonomy.
//! These are shared utilities, not ports.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use userdeck_domain::error::{Error, Result};

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Fail unless the response status is a success
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `resource` - What was requested, used in error messages
    ///
    /// # Returns
    /// The response on success; `NotFound` for 404, `Transport` otherwise
    pub async fn check_status(response: Response, resource: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(resource));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let code = status.as_u16();

        Err(match code {
            401 | 403 => transport_error(resource, "authentication failed", &error_text),
            429 => transport_error(resource, "rate limit exceeded", &error_text),
            500..=599 => transport_error(resource, &format!("server error ({code})"), &error_text),
            _ => transport_error(resource, &format!("request failed ({code})"), &error_text),
        })
    }

    /// Check the response status and decode the JSON body
    pub async fn check_and_parse<T: DeserializeOwned>(
        response: Response,
        resource: &str,
    ) -> Result<T> {
        let response = Self::check_status(response, resource).await?;
        response
            .json()
            .await
            .map_err(|e| Error::transport_with_source(format!("{resource}: response parse failed"), e))
    }
}

fn transport_error(resource: &str, context: &str, details: &str) -> Error {
    Error::transport(format!("{resource} {context}: {details}"))
}
