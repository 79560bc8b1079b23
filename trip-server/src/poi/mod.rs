//! Points of interest near the trip's endpoints.
//!
//! Two sources: the provider's nearby search, filtered and ordered by
//! [`rank_pois`], and the hand-curated [`attractions`] table.

pub mod attractions;
mod rank;

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{PoiCandidate, PoiCategory};
use crate::geocode::GeocodeResolver;
use crate::provider::MapProvider;

pub use attractions::{AttractionMiss, attractions_for, identify_city};
pub use rank::{FAMOUS_KEYWORDS, LOW_QUALITY_KEYWORDS, rank_pois, result_limit};

/// Default nearby-search radius in metres.
const DEFAULT_RADIUS_M: u32 = 10_000;

/// Default number of raw results fetched before ranking.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Places of one category around one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiGroup {
    /// The address searched around, or the city for table lookups.
    pub label: String,
    pub category: PoiCategory,
    pub pois: Vec<PoiCandidate>,
}

/// Nearby-search settings.
#[derive(Debug, Clone)]
pub struct PoiSearchConfig {
    /// Search radius in metres.
    pub radius_m: u32,
    /// Raw results requested from the provider per search.
    pub page_size: u32,
}

impl Default for PoiSearchConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PoiSearchConfig {
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Runs ranked nearby searches around addresses.
pub struct PoiFinder<P> {
    resolver: Arc<GeocodeResolver<P>>,
    config: PoiSearchConfig,
}

impl<P: MapProvider> PoiFinder<P> {
    pub fn new(resolver: Arc<GeocodeResolver<P>>, config: PoiSearchConfig) -> Self {
        Self { resolver, config }
    }

    /// Ranked places of `category` around `location`.
    ///
    /// An address that cannot be resolved, or a failed search, yields an
    /// empty list.
    pub async fn nearby(&self, location: &str, category: PoiCategory) -> Vec<PoiCandidate> {
        let center = match self.resolver.resolve(location).await {
            Ok(center) => center,
            Err(e) => {
                warn!(location, error = %e, "POI search skipped");
                return Vec::new();
            }
        };

        let raw = match self
            .resolver
            .provider()
            .nearby_search(center, category, self.config.radius_m, self.config.page_size)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(location, %category, error = %e, "nearby search failed");
                return Vec::new();
            }
        };

        let found = raw.len();
        let ranked = rank_pois(raw, category);
        debug!(location, %category, found, kept = ranked.len(), "nearby search ranked");
        ranked
    }

    /// Ranked places around the origin and destination, one group per
    /// location and category, searched concurrently.
    ///
    /// The destination is skipped when it repeats the origin. Groups keep
    /// request order; empty groups are kept so callers can show "none found".
    pub async fn nearby_for_trip(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        categories: &[PoiCategory],
    ) -> Vec<PoiGroup> {
        let mut locations: Vec<&str> = Vec::with_capacity(2);
        if let Some(origin) = origin.filter(|s| !s.trim().is_empty()) {
            locations.push(origin);
        }
        if let Some(destination) = destination.filter(|s| !s.trim().is_empty()) {
            if !locations.contains(&destination) {
                locations.push(destination);
            }
        }

        let searches = locations.iter().flat_map(|&location| {
            categories.iter().map(move |&category| async move {
                PoiGroup {
                    label: location.to_string(),
                    category,
                    pois: self.nearby(location, category).await,
                }
            })
        });

        join_all(searches).await
    }
}
