//! HTTP backend source.
//!
//! Issues one GET per dataset against the configured base URL. There are
//! no query parameters, no authentication and no retries: a failed call
//! is reported once and the caller decides what to do with it.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{DashboardSource, Endpoint, SourceError};
use crate::config::ClientConfig;
use crate::domain::{ChangePoint, Event, PriceSeries};

pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("brentlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, SourceError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "fetching {}", endpoint.label());

        let resp = self.client.get(&url).send().map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            SourceError::Network {
                endpoint,
                message: e.to_string(),
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "non-success response");
            return Err(SourceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = resp.text().map_err(|e| SourceError::Network {
            endpoint,
            message: e.to_string(),
        })?;

        let decoded = decode(endpoint, &body)?;
        tracing::debug!(%url, bytes = body.len(), "fetched {}", endpoint.label());
        Ok(decoded)
    }
}

/// Decode a response body, naming the endpoint on failure.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Decode {
        endpoint,
        message: e.to_string(),
    })
}

impl DashboardSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_prices(&self) -> Result<PriceSeries, SourceError> {
        self.get(Endpoint::Prices)
    }

    fn fetch_change_points(&self) -> Result<Vec<ChangePoint>, SourceError> {
        self.get(Endpoint::ChangePoints)
    }

    fn fetch_events(&self) -> Result<Vec<Event>, SourceError> {
        self.get(Endpoint::Events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:5000/".into(),
            ..ClientConfig::default()
        };
        let source = HttpSource::new(&config).unwrap();
        assert_eq!(source.base_url(), "http://127.0.0.1:5000");
        assert_eq!(
            source.url(Endpoint::Prices),
            "http://127.0.0.1:5000/api/brent-oil-data"
        );
    }

    #[test]
    fn decode_reports_endpoint() {
        let err = decode::<PriceSeries>(Endpoint::Prices, "not json").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Decode {
                endpoint: Endpoint::Prices,
                ..
            }
        ));
    }

    #[test]
    fn decode_price_payload() {
        let series: PriceSeries =
            decode(Endpoint::Prices, r#"{"dates":["2020-01-01"],"prices":[40.5]}"#).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.price_at(0), Some(40.5));
    }

    #[test]
    fn unreachable_backend_is_a_network_error() {
        let config = ClientConfig {
            // Reserved port on localhost; nothing listens there.
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
        };
        let source = HttpSource::new(&config).unwrap();
        let err = source.fetch_events().unwrap_err();
        assert!(matches!(err, SourceError::Network { endpoint: Endpoint::Events, .. }));
    }
}
