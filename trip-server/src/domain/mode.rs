//! Transport modes and mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A way of getting from origin to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Driving,
    Walking,
    Transit,
    Riding,
}

impl TransportMode {
    /// All modes, in display order.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Driving,
        TransportMode::Walking,
        TransportMode::Transit,
        TransportMode::Riding,
    ];

    /// Wire name (`driving`, `walking`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Transit => "transit",
            TransportMode::Riding => "riding",
        }
    }

    /// Card icon.
    pub fn icon(&self) -> &'static str {
        match self {
            TransportMode::Driving => "🚗",
            TransportMode::Walking => "🚶",
            TransportMode::Transit => "🚌",
            TransportMode::Riding => "🚴",
        }
    }

    /// Label stem for a numbered option, e.g. "驾车路线" → "驾车路线1".
    pub fn option_label(&self) -> &'static str {
        match self {
            TransportMode::Driving => "驾车路线",
            TransportMode::Walking => "步行路线",
            TransportMode::Transit => "公交方案",
            TransportMode::Riding => "骑行路线",
        }
    }

    /// Human name of the mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Driving => "驾车",
            TransportMode::Walking => "步行",
            TransportMode::Transit => "公共交通",
            TransportMode::Riding => "骑行",
        }
    }

    /// How many of the provider's options to keep for this mode.
    pub fn default_option_limit(&self) -> usize {
        match self {
            TransportMode::Driving | TransportMode::Transit => 3,
            TransportMode::Walking | TransportMode::Riding => 2,
        }
    }

    /// Card colour for the option at `index` (best option gets the primary).
    pub fn rank_color(&self, index: usize) -> &'static str {
        let (primary, secondary) = match self {
            TransportMode::Driving => ("#1890ff", "#52c41a"),
            TransportMode::Walking => ("#52c41a", "#13c2c2"),
            TransportMode::Transit => ("#fa8c16", "#eb2f96"),
            TransportMode::Riding => ("#722ed1", "#f759ab"),
        };
        if index == 0 { primary } else { secondary }
    }

    /// Summary shown when the provider returned no steps.
    pub fn fallback_summary(&self) -> &'static str {
        match self {
            TransportMode::Driving | TransportMode::Walking => "路线详情",
            TransportMode::Transit => "公交路线",
            TransportMode::Riding => "骑行路线",
        }
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TransportMode::Driving),
            "walking" => Ok(TransportMode::Walking),
            "transit" => Ok(TransportMode::Transit),
            "riding" => Ok(TransportMode::Riding),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of transport modes.
///
/// Duplicates are dropped and first-seen order is kept. An empty selection
/// cannot be constructed, so route planning never starts without a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSelection(Vec<TransportMode>);

impl ModeSelection {
    /// Build a selection, rejecting an empty list.
    pub fn new(modes: impl IntoIterator<Item = TransportMode>) -> Result<Self, DomainError> {
        let mut selected: Vec<TransportMode> = Vec::new();
        for mode in modes {
            if !selected.contains(&mode) {
                selected.push(mode);
            }
        }
        if selected.is_empty() {
            return Err(DomainError::NoModesSelected);
        }
        Ok(Self(selected))
    }

    /// The selected modes.
    pub fn modes(&self) -> &[TransportMode] {
        &self.0
    }

    /// Number of selected modes (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
