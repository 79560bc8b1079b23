//! Route planning configuration.

use crate::domain::TransportMode;

/// Per-mode limits on how many provider options become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub driving_options: usize,
    pub walking_options: usize,
    pub transit_options: usize,
    pub riding_options: usize,
}

impl PlannerConfig {
    /// Option limit for `mode`.
    pub fn option_limit(&self, mode: TransportMode) -> usize {
        match mode {
            TransportMode::Driving => self.driving_options,
            TransportMode::Walking => self.walking_options,
            TransportMode::Transit => self.transit_options,
            TransportMode::Riding => self.riding_options,
        }
    }

    /// Override the limit for one mode.
    pub fn with_option_limit(mut self, mode: TransportMode, limit: usize) -> Self {
        match mode {
            TransportMode::Driving => self.driving_options = limit,
            TransportMode::Walking => self.walking_options = limit,
            TransportMode::Transit => self.transit_options = limit,
            TransportMode::Riding => self.riding_options = limit,
        }
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            driving_options: TransportMode::Driving.default_option_limit(),
            walking_options: TransportMode::Walking.default_option_limit(),
            transit_options: TransportMode::Transit.default_option_limit(),
            riding_options: TransportMode::Riding.default_option_limit(),
        }
    }
}
