//! Web layer for the trip planner.
//!
//! Serves the planning page and a JSON/HTML API for geocoding, route
//! comparison, nearby places and saved plans.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
