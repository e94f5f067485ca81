//! Address to coordinate resolution.
//!
//! The extractor only needs "a pair or nothing" per address, so callers see
//! the object-safe [`Geocoder`] trait. [`GoogleGeocoder`] talks to the Google
//! Geocoding API; [`NoGeocoder`] stands in when no API key is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";

/// Errors returned by a geocoding backend.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status other than `OK` / `ZERO_RESULTS`.
    #[error("geocoding API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("geocoding response could not be decoded: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Resolves a free-text address to `(latitude, longitude)`.
///
/// `Ok(None)` means the backend has no answer for the address; `Err` means the
/// backend could not be asked. Callers in the extractor treat both the same.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Option<(f64, f64)>, GeocodeError>;
}

/// Geocoder that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        Ok(None)
    }
}

/// Client for the Google Geocoding API.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Creates a geocoder pointed at the production Google endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder with a custom base URL (for wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the client cannot be built, or
    /// [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    fn build_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("maps/api/geocode/json")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn lookup(&self, address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = self.build_url(address)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(GeocodeError::Deserialize)?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed
                .results
                .into_iter()
                .next()
                .map(|r| (r.geometry.location.lat, r.geometry.location.lng))),
            "ZERO_RESULTS" => Ok(None),
            _ => Err(GeocodeError::Api {
                message: parsed.error_message.unwrap_or_default(),
                status: parsed.status,
            }),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        self.lookup(address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_encodes_address_and_key() {
        let geocoder = GoogleGeocoder::with_base_url("k3y", 5, "http://localhost:9999/")
            .expect("geocoder");
        let url = geocoder
            .build_url("Jalan Ampang, 50450 Kuala Lumpur")
            .expect("url");
        assert_eq!(url.path(), "/maps/api/geocode/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "address".to_string(),
                    "Jalan Ampang, 50450 Kuala Lumpur".to_string()
                ),
                ("key".to_string(), "k3y".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GoogleGeocoder::with_base_url("k", 5, "not a url").unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_redacts_api_key() {
        let geocoder =
            GoogleGeocoder::with_base_url("secret-key", 5, "http://localhost:1").expect("geocoder");
        let rendered = format!("{geocoder:?}");
        assert!(!rendered.contains("secret-key"));
    }

    #[tokio::test]
    async fn no_geocoder_returns_none() {
        let result = NoGeocoder.geocode("anywhere").await.expect("never fails");
        assert!(result.is_none());
    }
}
