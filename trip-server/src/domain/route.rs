//! Route options as returned by the provider, and the candidates built
//! from them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DomainError, TransportMode};

/// Number of steps folded into a candidate's one-line summary.
const SUMMARY_STEPS: usize = 3;

/// One instruction within a route option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Turn-by-turn text, or "步行" for a transit walking segment.
    pub instruction: String,
    /// Step length in metres.
    pub distance_m: u32,
    /// Step duration in seconds.
    pub duration_secs: u32,
    /// Road name, when the provider gives one.
    pub road: Option<String>,
    /// Transit line name for ride segments.
    pub line: Option<String>,
}

impl RouteStep {
    /// Text used for this step in a route summary.
    pub fn label(&self) -> &str {
        self.line.as_deref().unwrap_or(&self.instruction)
    }
}

/// A single route alternative for one mode, in provider units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub duration_secs: u64,
    pub distance_m: u64,
    /// Tolls (driving) or fare (transit), in yuan.
    pub cost: f64,
    pub steps: Vec<RouteStep>,
}

/// One scored option for a single transport mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub mode: TransportMode,
    /// Display label, e.g. "驾车路线1".
    pub label: String,
    pub icon: String,
    pub duration_minutes: u32,
    /// Kilometres, rounded to one decimal.
    pub distance_km: f64,
    pub cost: f64,
    pub step_summary: String,
    pub rank_color: String,
    /// Position of this option in the provider's answer for its mode.
    pub option_index: usize,
}

impl RouteCandidate {
    /// Build the candidate for the `index`-th option of `mode`.
    pub fn from_option(mode: TransportMode, index: usize, option: &RouteOption) -> Self {
        let step_summary = if option.steps.is_empty() {
            mode.fallback_summary().to_string()
        } else {
            option
                .steps
                .iter()
                .take(SUMMARY_STEPS)
                .map(RouteStep::label)
                .collect::<Vec<_>>()
                .join(" → ")
        };

        let cost = match mode {
            TransportMode::Driving | TransportMode::Transit => option.cost,
            TransportMode::Walking | TransportMode::Riding => 0.0,
        };

        Self {
            mode,
            label: format!("{}{}", mode.option_label(), index + 1),
            icon: mode.icon().to_string(),
            duration_minutes: (option.duration_secs as f64 / 60.0).round() as u32,
            distance_km: (option.distance_m as f64 / 100.0).round() / 10.0,
            cost,
            step_summary,
            rank_color: mode.rank_color(index).to_string(),
            option_index: index,
        }
    }

    /// Whether the option costs anything.
    pub fn is_free(&self) -> bool {
        self.cost <= 0.0
    }
}

/// User-chosen ordering for the joined candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Time,
    Distance,
    Cost,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(SortKey::Time),
            "distance" => Ok(SortKey::Distance),
            "cost" => Ok(SortKey::Cost),
            other => Err(DomainError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Time => "time",
            SortKey::Distance => "distance",
            SortKey::Cost => "cost",
        })
    }
}

/// Sort candidates ascending by `key`. The sort is stable, so ties keep
/// the order the modes were joined in.
pub fn sort_routes(routes: &mut [RouteCandidate], key: SortKey) {
    routes.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &RouteCandidate, b: &RouteCandidate, key: SortKey) -> Ordering {
    match key {
        SortKey::Time => a.duration_minutes.cmp(&b.duration_minutes),
        SortKey::Distance => a.distance_km.total_cmp(&b.distance_km),
        SortKey::Cost => a.cost.total_cmp(&b.cost),
    }
}
