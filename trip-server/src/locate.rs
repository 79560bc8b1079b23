//! Current-position and IP-based location lookups.
//!
//! Both lookups always produce something displayable: a failed reverse
//! geocode falls back to the raw coordinates, a failed IP lookup to a
//! default city.

use std::net::IpAddr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::Coordinate;
use crate::provider::{IpLocation, MapProvider};

/// City assumed when the IP lookup fails.
pub const DEFAULT_CITY: &str = "北京市";

/// A position described for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDescription {
    pub coordinate: Coordinate,
    /// Formatted address, or `坐标: lng, lat` when unresolved.
    pub address: String,
    /// Whether `address` came from the provider.
    pub resolved: bool,
}

/// City-level location of the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityLocation {
    pub province: String,
    pub city: String,
    pub bounds: Option<(Coordinate, Coordinate)>,
    /// True when the provider gave no answer and [`DEFAULT_CITY`] is used.
    pub fallback: bool,
}

impl CityLocation {
    fn fallback() -> Self {
        Self {
            province: DEFAULT_CITY.to_string(),
            city: DEFAULT_CITY.to_string(),
            bounds: None,
            fallback: true,
        }
    }
}

impl From<IpLocation> for CityLocation {
    fn from(loc: IpLocation) -> Self {
        Self {
            province: loc.province,
            city: loc.city,
            bounds: loc.bounds,
            fallback: false,
        }
    }
}

/// Location lookups with display fallbacks.
pub struct LocationService<P> {
    provider: Arc<P>,
}

impl<P: MapProvider> LocationService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Address of a point, or its coordinates as text.
    pub async fn describe_position(&self, coordinate: Coordinate) -> PositionDescription {
        match self.provider.reverse_geocode(coordinate).await {
            Ok(Some(address)) if !address.trim().is_empty() => PositionDescription {
                coordinate,
                address,
                resolved: true,
            },
            Ok(_) => {
                debug!(%coordinate, "reverse geocode found nothing");
                Self::unresolved(coordinate)
            }
            Err(e) => {
                warn!(%coordinate, error = %e, "reverse geocode failed");
                Self::unresolved(coordinate)
            }
        }
    }

    /// City of `ip`, or of the server's egress address when `None`.
    pub async fn locate_ip(&self, ip: Option<IpAddr>) -> CityLocation {
        match self.provider.locate_ip(ip).await {
            Ok(Some(location)) => location.into(),
            Ok(None) => {
                debug!(?ip, "IP location unknown, using default city");
                CityLocation::fallback()
            }
            Err(e) => {
                warn!(?ip, error = %e, "IP location failed, using default city");
                CityLocation::fallback()
            }
        }
    }

    fn unresolved(coordinate: Coordinate) -> PositionDescription {
        PositionDescription {
            coordinate,
            address: format!("坐标: {:.6}, {:.6}", coordinate.lng(), coordinate.lat()),
            resolved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, coord};

    #[tokio::test]
    async fn describes_resolved_position() {
        let point = coord(116.397128, 39.903738);
        let service = LocationService::new(Arc::new(
            FakeProvider::new().with_reverse(point, "北京市东城区东华门街道天安门"),
        ));

        let description = service.describe_position(point).await;
        assert!(description.resolved);
        assert_eq!(description.address, "北京市东城区东华门街道天安门");
    }

    #[tokio::test]
    async fn unresolved_position_shows_coordinates() {
        let service = LocationService::new(Arc::new(FakeProvider::new()));
        let description = service.describe_position(coord(121.49, 31.24)).await;
        assert!(!description.resolved);
        assert_eq!(description.address, "坐标: 121.490000, 31.240000");
    }

    #[tokio::test]
    async fn ip_lookup_and_fallback() {
        let service = LocationService::new(Arc::new(FakeProvider::new().with_ip_location(
            IpLocation {
                province: "浙江省".to_string(),
                city: "杭州市".to_string(),
                bounds: None,
            },
        )));
        let city = service.locate_ip(None).await;
        assert_eq!(city.city, "杭州市");
        assert!(!city.fallback);

        let service = LocationService::new(Arc::new(FakeProvider::new()));
        let city = service.locate_ip("8.8.8.8".parse().ok()).await;
        assert_eq!(city.city, DEFAULT_CITY);
        assert!(city.fallback);
    }
}
