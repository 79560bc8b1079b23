//! Data transfer objects for web requests and responses.
//!
//! Every request may carry a client-chosen `search_id`, echoed unchanged
//! in the response so the page can discard answers to superseded searches.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, PoiCategory, RouteCandidate, RouteStep};
use crate::geocode::Resolution;
use crate::locate::{CityLocation, PositionDescription};
use crate::planner::{Endpoint, RouteDetail, RoutePlan};
use crate::plans::SavedPlan;
use crate::poi::PoiGroup;
use crate::provider::Suggestion;

/// Query for `/api/geocode`.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub address: String,
    pub search_id: Option<String>,
}

/// A resolved address.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    /// Provider's normalized address, absent on cache hits
    pub formatted_address: Option<String>,
    /// Which fallback tier succeeded
    pub tier: crate::geocode::ResolutionTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

impl GeocodeResponse {
    pub fn new(address: &str, resolution: Resolution, search_id: Option<String>) -> Self {
        Self {
            address: address.to_string(),
            lng: resolution.coordinate.lng(),
            lat: resolution.coordinate.lat(),
            formatted_address: resolution.formatted_address,
            tier: resolution.tier,
            search_id,
        }
    }
}

/// Query for `/api/reverse-geocode`.
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub lng: f64,
    pub lat: f64,
    pub search_id: Option<String>,
}

/// Address of a coordinate.
#[derive(Debug, Serialize)]
pub struct ReverseGeocodeResponse {
    pub address: String,
    pub lng: f64,
    pub lat: f64,
    /// False when `address` is only the coordinates as text
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

impl ReverseGeocodeResponse {
    pub fn new(description: PositionDescription, search_id: Option<String>) -> Self {
        Self {
            lng: description.coordinate.lng(),
            lat: description.coordinate.lat(),
            address: description.address,
            resolved: description.resolved,
            search_id,
        }
    }
}

/// Query for `/api/locate/ip`.
#[derive(Debug, Deserialize)]
pub struct LocateIpRequest {
    /// Address to locate; the server's own when absent
    pub ip: Option<String>,
    pub search_id: Option<String>,
}

/// City of the caller.
#[derive(Debug, Serialize)]
pub struct LocateIpResponse {
    pub province: String,
    pub city: String,
    /// `[[sw_lng, sw_lat], [ne_lng, ne_lat]]`
    pub bounds: Option<[[f64; 2]; 2]>,
    /// True when the default city was substituted
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

impl LocateIpResponse {
    pub fn new(location: CityLocation, search_id: Option<String>) -> Self {
        Self {
            bounds: location
                .bounds
                .map(|(sw, ne)| [[sw.lng(), sw.lat()], [ne.lng(), ne.lat()]]),
            province: location.province,
            city: location.city,
            fallback: location.fallback,
            search_id,
        }
    }
}

/// Query for `/api/autocomplete`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteRequest {
    pub q: String,
    pub search_id: Option<String>,
}

/// Input suggestions.
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

/// Body of `POST /api/routes/plan`.
#[derive(Debug, Deserialize)]
pub struct PlanRoutesRequest {
    pub origin: String,
    pub destination: String,

    /// Mode names: driving, walking, transit, riding
    #[serde(default)]
    pub modes: Vec<String>,

    /// time (default), distance or cost
    pub sort: Option<String>,

    pub search_id: Option<String>,
}

/// Joined and sorted route candidates.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    pub origin: EndpointResult,
    pub destination: EndpointResult,
    pub routes: Vec<RouteCandidate>,
    /// Modes whose lookup failed and were left out
    pub failed_modes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

impl PlanRoutesResponse {
    pub fn new(plan: RoutePlan, search_id: Option<String>) -> Self {
        Self {
            origin: EndpointResult::from_endpoint(&plan.origin),
            destination: EndpointResult::from_endpoint(&plan.destination),
            failed_modes: plan
                .failed_modes
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            routes: plan.candidates,
            search_id,
        }
    }
}

/// A resolved endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointResult {
    pub address: String,
    pub lng: f64,
    pub lat: f64,
}

impl EndpointResult {
    pub fn from_endpoint(endpoint: &Endpoint) -> Self {
        Self {
            address: endpoint.address.clone(),
            lng: endpoint.coordinate.lng(),
            lat: endpoint.coordinate.lat(),
        }
    }
}

/// Body of `POST /api/routes/steps`.
#[derive(Debug, Deserialize)]
pub struct RouteStepsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    #[serde(default)]
    pub option_index: usize,
    pub search_id: Option<String>,
}

/// Body of `POST /api/routes/to-place`.
#[derive(Debug, Deserialize)]
pub struct RouteToPlaceRequest {
    pub origin: String,
    pub place_name: String,
    pub lng: f64,
    pub lat: f64,
    pub search_id: Option<String>,
}

/// One option with its full step list.
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub origin: EndpointResult,
    pub destination: EndpointResult,
    pub route: RouteCandidate,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

impl RouteDetailResponse {
    pub fn new(detail: RouteDetail, search_id: Option<String>) -> Self {
        Self {
            origin: EndpointResult::from_endpoint(&detail.origin),
            destination: EndpointResult::from_endpoint(&detail.destination),
            route: detail.candidate,
            steps: detail.steps,
            search_id,
        }
    }
}

/// Query for the POI endpoints.
#[derive(Debug, Deserialize)]
pub struct PoiRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Comma-separated category names; all categories when absent
    pub categories: Option<String>,
    pub search_id: Option<String>,
}

impl PoiRequest {
    /// Parsed categories, in request order without repeats.
    pub fn parse_categories(&self) -> Result<Vec<PoiCategory>, DomainError> {
        let Some(raw) = self.categories.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(PoiCategory::ALL.to_vec());
        };

        let mut categories = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let category: PoiCategory = part.parse()?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }
}

/// Grouped places.
#[derive(Debug, Serialize)]
pub struct PoiResponse {
    pub groups: Vec<PoiGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
}

/// Body of `POST /api/plans`.
#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub name: Option<String>,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

/// Result of saving a plan.
#[derive(Debug, Serialize)]
pub struct SavePlanResponse {
    pub name: String,
    /// Number of stored plans after this save
    pub total: usize,
}

/// All saved plans.
#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<SavedPlan>,
}

/// Body of `POST /api/plans/export`.
#[derive(Debug, Deserialize)]
pub struct ExportPlanRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
