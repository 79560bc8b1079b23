//! In-memory map provider for unit tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

use crate::domain::{Coordinate, PoiCandidate, PoiCategory, RouteOption, RouteStep, TransportMode};
use crate::provider::{GeocodeMatch, IpLocation, MapProvider, ProviderError, Suggestion};

/// Fake provider with canned answers and call recording.
///
/// Addresses without a canned answer geocode to `Ok(None)`; modes without
/// canned routes fail with an API error.
#[derive(Default)]
pub struct FakeProvider {
    geocodes: HashMap<String, Result<Option<GeocodeMatch>, ProviderError>>,
    reverse: HashMap<String, String>,
    routes: HashMap<TransportMode, Result<Vec<RouteOption>, ProviderError>>,
    nearby: HashMap<PoiCategory, Vec<PoiCandidate>>,
    suggestions: Vec<Suggestion>,
    ip_location: Option<IpLocation>,
    geocode_calls: Mutex<Vec<String>>,
    route_calls: Mutex<Vec<TransportMode>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `address` with a point.
    pub fn with_geocode(mut self, address: &str, lng: f64, lat: f64) -> Self {
        self.geocodes.insert(
            address.to_string(),
            Ok(Some(GeocodeMatch {
                lng,
                lat,
                formatted_address: format!("{address}(标准)"),
            })),
        );
        self
    }

    /// Answer `address` with an error.
    pub fn with_geocode_error(mut self, address: &str, err: ProviderError) -> Self {
        self.geocodes.insert(address.to_string(), Err(err));
        self
    }

    pub fn with_reverse(mut self, coordinate: Coordinate, address: &str) -> Self {
        self.reverse
            .insert(coordinate.to_string(), address.to_string());
        self
    }

    pub fn with_routes(mut self, mode: TransportMode, options: Vec<RouteOption>) -> Self {
        self.routes.insert(mode, Ok(options));
        self
    }

    pub fn with_route_error(mut self, mode: TransportMode, err: ProviderError) -> Self {
        self.routes.insert(mode, Err(err));
        self
    }

    pub fn with_nearby(mut self, category: PoiCategory, pois: Vec<PoiCandidate>) -> Self {
        self.nearby.insert(category, pois);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_ip_location(mut self, location: IpLocation) -> Self {
        self.ip_location = Some(location);
        self
    }

    /// Every address passed to `geocode`, in call order.
    pub fn geocode_calls(&self) -> Vec<String> {
        self.geocode_calls.lock().unwrap().clone()
    }

    /// Every mode passed to `route`, in call order.
    pub fn route_calls(&self) -> Vec<TransportMode> {
        self.route_calls.lock().unwrap().clone()
    }
}

impl MapProvider for FakeProvider {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, ProviderError> {
        self.geocode_calls.lock().unwrap().push(address.to_string());
        self.geocodes.get(address).cloned().unwrap_or(Ok(None))
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>, ProviderError> {
        Ok(self.reverse.get(&coordinate.to_string()).cloned())
    }

    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        mode: TransportMode,
    ) -> Result<Vec<RouteOption>, ProviderError> {
        self.route_calls.lock().unwrap().push(mode);
        self.routes.get(&mode).cloned().unwrap_or_else(|| {
            Err(ProviderError::Api {
                status: 0,
                message: format!("no canned route for {mode}"),
            })
        })
    }

    async fn nearby_search(
        &self,
        _center: Coordinate,
        category: PoiCategory,
        _radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PoiCandidate>, ProviderError> {
        let mut pois = self.nearby.get(&category).cloned().unwrap_or_default();
        pois.truncate(limit as usize);
        Ok(pois)
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
        Ok(self
            .suggestions
            .iter()
            .filter(|s| s.name.contains(query))
            .cloned()
            .collect())
    }

    async fn locate_ip(&self, _ip: Option<IpAddr>) -> Result<Option<IpLocation>, ProviderError> {
        Ok(self.ip_location.clone())
    }
}

/// Route option with `n` numbered steps.
pub fn route_option(duration_secs: u64, distance_m: u64, cost: f64, n: usize) -> RouteOption {
    RouteOption {
        duration_secs,
        distance_m,
        cost,
        steps: (1..=n)
            .map(|i| RouteStep {
                instruction: format!("第{i}步"),
                distance_m: 100,
                duration_secs: 60,
                road: None,
                line: None,
            })
            .collect(),
    }
}

pub fn coord(lng: f64, lat: f64) -> Coordinate {
    Coordinate::new(lng, lat).unwrap()
}
