//! Map service capability interface.
//!
//! The resolver, ranker and orchestrator only talk to a `MapProvider`. The
//! concrete vendor binding (`crate::amap::AmapClient`) is chosen by the host
//! in `main`; tests plug in an in-memory fake.

use std::future::Future;
use std::net::IpAddr;

use serde::Serialize;

use crate::domain::{Coordinate, PoiCandidate, PoiCategory, RouteOption, TransportMode};

/// Errors from a map provider call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Network failure, timeout, connection refused
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider answered with an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be understood
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Credential rejected
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Quota or QPS limit hit
    #[error("rate limited by map provider")]
    RateLimited,
}

/// A raw geocoding answer. The components are not validated; the resolver
/// decides whether the point is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub lng: f64,
    pub lat: f64,
    pub formatted_address: String,
}

/// An autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub district: String,
    pub address: String,
    pub coordinate: Option<Coordinate>,
    pub typecode: Option<String>,
}

/// City-level location derived from an IP address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpLocation {
    pub province: String,
    pub city: String,
    /// South-west and north-east corners of the city's bounding box.
    pub bounds: Option<(Coordinate, Coordinate)>,
}

/// Geocoding, routing and search primitives supplied by a map service.
///
/// Every method returns a `Send` future so handlers generic over the
/// provider can be served by axum. Implementations may use `async fn`.
pub trait MapProvider: Send + Sync + 'static {
    /// Forward geocode an address. `Ok(None)` means the service found nothing.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<GeocodeMatch>, ProviderError>> + Send;

    /// Reverse geocode a coordinate to a formatted address.
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;

    /// Route alternatives between two points, best first. An empty list
    /// means no route exists for this mode.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> impl Future<Output = Result<Vec<RouteOption>, ProviderError>> + Send;

    /// Places matching `category`'s keywords within `radius_m` of `center`.
    fn nearby_search(
        &self,
        center: Coordinate,
        category: PoiCategory,
        radius_m: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<PoiCandidate>, ProviderError>> + Send;

    /// Input suggestions for a partial address.
    fn autocomplete(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, ProviderError>> + Send;

    /// City of an IP address; `None` for the caller's own egress address.
    fn locate_ip(
        &self,
        ip: Option<IpAddr>,
    ) -> impl Future<Output = Result<Option<IpLocation>, ProviderError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert_eq!(
            ProviderError::Unauthorized.to_string(),
            "unauthorized (invalid API key)"
        );
        assert_eq!(
            ProviderError::RateLimited.to_string(),
            "rate limited by map provider"
        );
    }
}
