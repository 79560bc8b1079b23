//! Point-of-interest types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Coordinate, DomainError};

/// Kind of place the user is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Tourist,
    Food,
    Shopping,
    Hotel,
}

impl PoiCategory {
    /// All categories, in display order.
    pub const ALL: [PoiCategory; 4] = [
        PoiCategory::Tourist,
        PoiCategory::Food,
        PoiCategory::Shopping,
        PoiCategory::Hotel,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::Tourist => "tourist",
            PoiCategory::Food => "food",
            PoiCategory::Shopping => "shopping",
            PoiCategory::Hotel => "hotel",
        }
    }

    /// Display name, also the key of the attraction table.
    pub fn display_name(&self) -> &'static str {
        match self {
            PoiCategory::Tourist => "旅游景点",
            PoiCategory::Food => "美食餐厅",
            PoiCategory::Shopping => "购物中心",
            PoiCategory::Hotel => "酒店住宿",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PoiCategory::Tourist => "🏛️",
            PoiCategory::Food => "🍜",
            PoiCategory::Shopping => "🛍️",
            PoiCategory::Hotel => "🏨",
        }
    }

    /// `|`-separated keywords for the provider's nearby search.
    pub fn search_keywords(&self) -> &'static str {
        match self {
            PoiCategory::Tourist => "旅游景点|风景名胜|博物馆|公园|寺庙|古迹|纪念馆",
            PoiCategory::Food => "美食|餐厅|小吃|特色菜|老字号",
            PoiCategory::Shopping => "购物中心|商场|百货|奥特莱斯",
            PoiCategory::Hotel => "酒店|宾馆|度假村|民宿",
        }
    }
}

impl FromStr for PoiCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tourist" => Ok(PoiCategory::Tourist),
            "food" => Ok(PoiCategory::Food),
            "shopping" => Ok(PoiCategory::Shopping),
            "hotel" => Ok(PoiCategory::Hotel),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named place near a search centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiCandidate {
    pub name: String,
    pub address: String,
    /// Missing when the provider gave no usable location.
    pub coordinate: Option<Coordinate>,
    pub category: PoiCategory,
    /// Assigned by the ranker; zero until ranked.
    pub priority_score: u8,
    /// Distance from the search centre. `None` when the provider did not say.
    pub distance_meters: Option<f64>,
}

impl PoiCandidate {
    /// Create an unranked candidate.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        coordinate: Option<Coordinate>,
        category: PoiCategory,
        distance_meters: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            coordinate,
            category,
            priority_score: 0,
            distance_meters,
        }
    }

    /// Name followed by address, the text keyword lists are matched against.
    pub fn full_text(&self) -> String {
        format!("{}{}", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_categories() {
        assert_eq!("tourist".parse(), Ok(PoiCategory::Tourist));
        assert_eq!("Food".parse(), Ok(PoiCategory::Food));
        assert!("nightlife".parse::<PoiCategory>().is_err());
    }

    #[test]
    fn category_tables() {
        assert_eq!(PoiCategory::Tourist.display_name(), "旅游景点");
        assert!(PoiCategory::Hotel.search_keywords().contains("民宿"));
        assert_eq!(PoiCategory::Shopping.icon(), "🛍️");
    }

    #[test]
    fn new_candidate_is_unranked() {
        let poi = PoiCandidate::new("故宫博物院", "景山前街4号", None, PoiCategory::Tourist, Some(300.0));
        assert_eq!(poi.priority_score, 0);
        assert_eq!(poi.full_text(), "故宫博物院景山前街4号");
    }
}
