use std::time::Duration;

use async_trait::async_trait;
use pinpoint_core::{LocationError, LocationProvider};
use pinpoint_types::LatLng;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_STREET_VIEW_BASE_URL: &str = "https://maps.googleapis.com/maps/api/streetview";

/// Body of the Street View metadata endpoint. Only the fields the game reads.
#[derive(Debug, Deserialize)]
pub struct MetadataResponse {
    pub status: String,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Maps a metadata status onto the provider contract: `OK` is a panorama,
/// the two "nothing here" statuses are a miss, everything else is an error.
pub fn interpret_metadata(response: MetadataResponse) -> Result<Option<LatLng>, LocationError> {
    match response.status.as_str() {
        "OK" => response.location.map(Some).ok_or_else(|| {
            LocationError::InvalidResponse("status OK without a location".to_string())
        }),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(None),
        "REQUEST_DENIED" | "OVER_QUERY_LIMIT" | "INVALID_REQUEST" => {
            let detail = response.error_message.unwrap_or_default();
            Err(LocationError::Rejected(
                format!("{} {}", response.status, detail).trim_end().to_string(),
            ))
        }
        other => Err(LocationError::InvalidResponse(format!(
            "unknown status {}",
            other
        ))),
    }
}

/// Looks up panoramas through the Street View metadata endpoint.
pub struct StreetViewClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl StreetViewClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LocationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        })
    }

    fn metadata_url(&self) -> String {
        format!("{}/metadata", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LocationProvider for StreetViewClient {
    async fn resolve_playable_location(
        &self,
        candidate: LatLng,
        radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        let location = format!("{},{}", candidate.lat, candidate.lng);
        let radius = radius_meters.to_string();

        let response = self
            .http
            .get(self.metadata_url())
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("source", "outdoor"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout(self.timeout)
                } else {
                    LocationError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!("HTTP {}", status)));
        }

        let body: MetadataResponse = response
            .json()
            .await
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
        debug!("Street View metadata for {}: {}", candidate, body.status);

        interpret_metadata(body)
    }

    fn name(&self) -> &str {
        "street-view"
    }
}
