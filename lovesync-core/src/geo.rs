use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::GeoError;
use crate::models::Position;

/// Single-shot position lookup. No retry, no cancellation.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Position, GeoError>> + Send;
}

/// Always answers with the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    position: Position,
}

impl FixedGeolocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Position { latitude, longitude },
        }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Position, GeoError> {
        Ok(self.position)
    }
}

/// Asks a JSON endpoint (ipapi-style: `{"latitude": .., "longitude": ..}`).
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    latitude: f64,
    longitude: f64,
}

impl HttpGeolocator {
    pub fn new(client: Client, endpoint: &str, timeout: Duration) -> Result<Self, GeoError> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            timeout,
        })
    }
}

impl Geolocator for HttpGeolocator {
    async fn current_position(&self) -> Result<Position, GeoError> {
        debug!(endpoint = %self.endpoint, "requesting current position");
        let body: LookupResponse = self
            .client
            .get(self.endpoint.clone())
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !(-90.0..=90.0).contains(&body.latitude) || !(-180.0..=180.0).contains(&body.longitude) {
            return Err(GeoError::OutOfRange {
                latitude: body.latitude,
                longitude: body.longitude,
            });
        }
        Ok(Position {
            latitude: body.latitude,
            longitude: body.longitude,
        })
    }
}

/// Geolocator selected from configuration.
#[derive(Debug, Clone)]
pub enum Locator {
    Fixed(FixedGeolocator),
    Http(HttpGeolocator),
}

impl Geolocator for Locator {
    async fn current_position(&self) -> Result<Position, GeoError> {
        match self {
            Locator::Fixed(geo) => geo.current_position().await,
            Locator::Http(geo) => geo.current_position().await,
        }
    }
}

/// OpenStreetMap link centred on `position`.
pub fn map_url(position: Position) -> Result<Url, url::ParseError> {
    let mut url = Url::parse("https://www.openstreetmap.org/")?;
    url.query_pairs_mut()
        .append_pair("mlat", &position.latitude.to_string())
        .append_pair("mlon", &position.longitude.to_string());
    url.set_fragment(Some(&format!(
        "map=16/{}/{}",
        position.latitude, position.longitude
    )));
    Ok(url)
}
