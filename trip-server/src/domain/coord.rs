//! Geographic coordinate type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated (longitude, latitude) pair.
///
/// Both components are finite and non-zero. The map service answers with
/// `0` or garbage for addresses it cannot place, so a zero component is
/// treated as "no result" rather than as a point on the equator.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
///
/// let tiananmen = Coordinate::new(116.397128, 39.903738).unwrap();
/// assert_eq!(tiananmen.to_string(), "116.397128,39.903738");
///
/// assert!(Coordinate::new(0.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 39.9).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lng: f64,
    lat: f64,
}

/// Unvalidated wire form, used only for deserialization.
#[derive(Deserialize)]
struct RawCoordinate {
    lng: f64,
    lat: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lng, raw.lat)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting zero and non-finite components.
    pub fn new(lng: f64, lat: f64) -> Result<Self, DomainError> {
        let valid = |v: f64| v.is_finite() && v != 0.0;
        if valid(lng) && valid(lat) {
            Ok(Self { lng, lat })
        } else {
            Err(DomainError::InvalidCoordinate { lng, lat })
        }
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl FromStr for Coordinate {
    type Err = DomainError;

    /// Parse the `"lng,lat"` form used by the map service.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s
            .split_once(',')
            .ok_or_else(|| DomainError::MalformedCoordinate(s.to_string()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| DomainError::MalformedCoordinate(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::MalformedCoordinate(s.to_string()))?;
        Coordinate::new(lng, lat)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lng, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lng, self.lat)
    }
}
