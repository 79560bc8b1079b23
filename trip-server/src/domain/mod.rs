//! Domain types for the trip planner.
//!
//! This module contains the core domain model types shared by the resolver,
//! the POI ranker and the route orchestrator. Types that carry an invariant
//! enforce it at construction time, so code that receives them can trust
//! their validity.

mod address;
mod api_key;
mod coord;
mod error;
mod mode;
mod poi;
mod route;

pub use address::AddressQuery;
pub use api_key::ApiKey;
pub use coord::Coordinate;
pub use error::DomainError;
pub use mode::{ModeSelection, TransportMode};
pub use poi::{PoiCandidate, PoiCategory};
pub use route::{RouteCandidate, RouteOption, RouteStep, SortKey, sort_routes};
