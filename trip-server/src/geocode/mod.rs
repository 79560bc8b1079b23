//! Address resolution.
//!
//! Turns free-text addresses into coordinates. The map service is unreliable
//! for noisy input (embedded punctuation, long descriptive phrases), so the
//! resolver degrades the address in up to three tiers before giving up, and
//! remembers every success for the life of the process.

mod keywords;
mod resolver;

pub use keywords::{
    CITY_NAMES, DISTRICT_NAMES, extract_keywords, preprocess_address, simplify_address,
};
pub use resolver::{GeocodeResolver, Resolution, ResolutionFailure, ResolutionTier};
