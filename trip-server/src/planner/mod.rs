//! Route orchestration.
//!
//! Answers "how do I get from A to B?" across several transport modes at
//! once: both addresses go through the shared resolver, one routing query
//! per mode runs concurrently, and the joined options are sorted by the
//! user's chosen key.

mod config;
mod trip;

pub use config::PlannerConfig;
pub use trip::{Endpoint, PlanError, PlanRequest, RouteDetail, RoutePlan, TripPlanner};
