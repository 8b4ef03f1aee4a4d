//! EU VIES REST API client for VATIN validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::format::parse_vatin;
use super::service::{RegistryError, ServiceError, VatinRecord, VatinRegistry};

/// Public VIES endpoint. No authentication required.
pub const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Result of a VIES VAT number check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViesResult {
    /// Whether the VAT number is currently valid.
    pub valid: bool,
    /// Date of the request (YYYY-MM-DD).
    pub request_date: Option<String>,
    /// Registered company name (if available).
    pub name: Option<String>,
    /// Registered address (if available).
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

/// [`VatinRegistry`] backed by the VIES API.
///
/// Checks the format offline first, so malformed numbers never reach the
/// network. Requests block the calling thread.
#[derive(Debug, Clone)]
pub struct ViesRegistry {
    client: reqwest::blocking::Client,
    url: String,
}

impl ViesRegistry {
    /// Registry against the public endpoint with a 30 second timeout.
    pub fn new() -> Result<Self, ServiceError> {
        Self::with_url(VIES_URL)
    }

    /// Registry against another endpoint (a mirror or a test server).
    pub fn with_url(url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Check a VAT number. `prefix` is the VAT prefix ("EL" for Greece),
    /// `number` the part after it.
    ///
    /// # Errors
    ///
    /// `ServiceError::Network` on connection issues or timeouts,
    /// `ServiceError::Api` if a member state is unavailable,
    /// `ServiceError::Parse` on unexpected response formats.
    pub fn check(&self, prefix: &str, number: &str) -> Result<ViesResult, ServiceError> {
        let req = ViesRequest {
            country_code: prefix,
            vat_number: number,
        };

        let resp = self
            .client
            .post(&self.url)
            .json(&req)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::Api(format!("HTTP {status}: {body}")));
        }

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<ViesResult, ServiceError> {
    let api_resp: ViesApiResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Parse(e.to_string()))?;

    if let Some(err) = api_resp.error_wrappers.as_ref().and_then(|e| e.first()) {
        let msg = err
            .message
            .clone()
            .or_else(|| err.error.clone())
            .unwrap_or_else(|| "unknown error".into());
        return Err(ServiceError::Api(msg));
    }

    let valid = api_resp
        .valid
        .ok_or_else(|| ServiceError::Parse("response has no 'valid' field".into()))?;

    Ok(ViesResult {
        valid,
        request_date: api_resp.request_date,
        name: api_resp.name.filter(|n| n != "---" && !n.is_empty()),
        address: api_resp.address.filter(|a| a != "---" && !a.is_empty()),
    })
}

impl VatinRegistry for ViesRegistry {
    fn validate(&self, vatin: &str) -> Result<VatinRecord, RegistryError> {
        let parsed = parse_vatin(vatin)?;
        let result = self.check(&parsed.prefix, &parsed.number)?;
        debug!(vatin = %parsed.normalized(), valid = result.valid, "VIES check");

        if !result.valid {
            return Err(RegistryError::Invalid {
                vatin: parsed.normalized(),
                reason: "not registered in VIES".into(),
            });
        }

        Ok(VatinRecord {
            country: parsed.country().to_string(),
            normalized: parsed.normalized(),
            name: result.name,
        })
    }
}
