//! Application state for the web layer.

use std::sync::Arc;

use crate::locate::LocationService;
use crate::planner::TripPlanner;
use crate::plans::PlanStore;
use crate::poi::PoiFinder;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<P> {
    /// Route planner, which also owns the geocode resolver and its cache
    pub planner: Arc<TripPlanner<P>>,

    /// Nearby place search
    pub poi: Arc<PoiFinder<P>>,

    /// Reverse geocoding and IP location
    pub location: Arc<LocationService<P>>,

    /// Saved plans
    pub plans: Arc<PlanStore>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(
        planner: TripPlanner<P>,
        poi: PoiFinder<P>,
        location: LocationService<P>,
        plans: PlanStore,
    ) -> Self {
        Self {
            planner: Arc::new(planner),
            poi: Arc::new(poi),
            location: Arc::new(location),
            plans: Arc::new(plans),
        }
    }
}

// Manual impl: the provider itself need not be Clone.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
            poi: Arc::clone(&self.poi),
            location: Arc::clone(&self.location),
            plans: Arc::clone(&self.plans),
        }
    }
}
