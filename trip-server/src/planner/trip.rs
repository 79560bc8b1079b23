//! Multi-mode route planning.
//!
//! Resolves both endpoints, asks the provider for every selected mode at
//! once, and joins the answers into one sorted candidate list.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    AddressQuery, Coordinate, ModeSelection, RouteCandidate, RouteStep, SortKey, TransportMode,
    sort_routes,
};
use crate::geocode::{GeocodeResolver, ResolutionFailure};
use crate::provider::MapProvider;

use super::config::PlannerConfig;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// An endpoint could not be geocoded
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    /// The provider had no usable route for a single-mode request
    #[error("未找到{}路线: {reason}", .mode.display_name())]
    NoRoute { mode: TransportMode, reason: String },
}

/// A route planning request.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub origin: AddressQuery,
    pub destination: AddressQuery,
    pub modes: ModeSelection,
    pub sort: SortKey,
}

impl PlanRequest {
    pub fn new(origin: AddressQuery, destination: AddressQuery, modes: ModeSelection) -> Self {
        Self {
            origin,
            destination,
            modes,
            sort: SortKey::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// A resolved trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    /// The address as the user gave it.
    pub address: String,
    pub coordinate: Coordinate,
}

/// Result of planning across modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub origin: Endpoint,
    pub destination: Endpoint,
    /// Sorted by the request's key. May be empty.
    pub candidates: Vec<RouteCandidate>,
    /// Modes whose provider call failed, in selection order.
    pub failed_modes: Vec<TransportMode>,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// One route option with its full step list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetail {
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub candidate: RouteCandidate,
    pub steps: Vec<RouteStep>,
}

/// Route orchestrator.
pub struct TripPlanner<P> {
    resolver: Arc<GeocodeResolver<P>>,
    config: PlannerConfig,
}

impl<P: MapProvider> TripPlanner<P> {
    pub fn new(resolver: Arc<GeocodeResolver<P>>, config: PlannerConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &Arc<GeocodeResolver<P>> {
        &self.resolver
    }

    /// Plan routes for every selected mode.
    ///
    /// Either endpoint failing to resolve aborts the plan. A mode whose
    /// provider call fails, or that yields no usable option, is logged and
    /// reported in `failed_modes`; the other modes still contribute.
    pub async fn plan_routes(&self, request: &PlanRequest) -> Result<RoutePlan, PlanError> {
        let (origin, destination) = self
            .resolve_endpoints(&request.origin, &request.destination)
            .await?;

        let provider = self.resolver.provider();
        let (from, to) = (origin.coordinate, destination.coordinate);
        let queries = request
            .modes
            .modes()
            .iter()
            .map(|&mode| async move { (mode, provider.route(from, to, mode).await) });
        let results = join_all(queries).await;

        let mut candidates = Vec::new();
        let mut failed_modes = Vec::new();
        for (mode, result) in results {
            match result {
                Ok(options) => {
                    debug!(%mode, options = options.len(), "route options received");
                    let before = candidates.len();
                    candidates.extend(
                        options
                            .iter()
                            .take(self.config.option_limit(mode))
                            .enumerate()
                            .map(|(index, option)| RouteCandidate::from_option(mode, index, option)),
                    );
                    if candidates.len() == before {
                        warn!(%mode, "no route options, dropping mode");
                        failed_modes.push(mode);
                    }
                }
                Err(e) => {
                    warn!(%mode, error = %e, "route query failed, dropping mode");
                    failed_modes.push(mode);
                }
            }
        }

        sort_routes(&mut candidates, request.sort);
        info!(
            origin = %origin.address,
            destination = %destination.address,
            candidates = candidates.len(),
            failed = failed_modes.len(),
            "routes planned"
        );

        Ok(RoutePlan {
            origin,
            destination,
            candidates,
            failed_modes,
        })
    }

    /// Full steps of one option, for detail expansion.
    ///
    /// Re-resolves both endpoints (normally cache hits) and re-queries the
    /// mode.
    pub async fn route_steps(
        &self,
        origin: &AddressQuery,
        destination: &AddressQuery,
        mode: TransportMode,
        option_index: usize,
    ) -> Result<RouteDetail, PlanError> {
        let (origin, destination) = self.resolve_endpoints(origin, destination).await?;
        self.detail(origin, destination, mode, option_index).await
    }

    /// Driving route from an address to a known point, such as a POI.
    ///
    /// The origin gets one extra simplified-address attempt if the normal
    /// fallback chain fails.
    pub async fn route_to_place(
        &self,
        origin: &AddressQuery,
        place_name: &str,
        place: Coordinate,
    ) -> Result<RouteDetail, PlanError> {
        let coordinate = self
            .resolver
            .resolve_with_simplified(origin.as_str())
            .await?;
        let origin = Endpoint {
            address: origin.as_str().to_string(),
            coordinate,
        };
        let destination = Endpoint {
            address: place_name.to_string(),
            coordinate: place,
        };
        self.detail(origin, destination, TransportMode::Driving, 0)
            .await
    }

    async fn resolve_endpoints(
        &self,
        origin: &AddressQuery,
        destination: &AddressQuery,
    ) -> Result<(Endpoint, Endpoint), ResolutionFailure> {
        let (from, to) = tokio::join!(
            self.resolver.resolve(origin.as_str()),
            self.resolver.resolve(destination.as_str())
        );
        Ok((
            Endpoint {
                address: origin.as_str().to_string(),
                coordinate: from?,
            },
            Endpoint {
                address: destination.as_str().to_string(),
                coordinate: to?,
            },
        ))
    }

    async fn detail(
        &self,
        origin: Endpoint,
        destination: Endpoint,
        mode: TransportMode,
        option_index: usize,
    ) -> Result<RouteDetail, PlanError> {
        let options = self
            .resolver
            .provider()
            .route(origin.coordinate, destination.coordinate, mode)
            .await
            .map_err(|e| PlanError::NoRoute {
                mode,
                reason: e.to_string(),
            })?;

        let option = options
            .into_iter()
            .nth(option_index)
            .ok_or_else(|| PlanError::NoRoute {
                mode,
                reason: format!("方案{}不存在", option_index + 1),
            })?;

        Ok(RouteDetail {
            origin,
            destination,
            candidate: RouteCandidate::from_option(mode, option_index, &option),
            steps: option.steps,
        })
    }
}
