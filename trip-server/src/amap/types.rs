//! AMap Web Service response DTOs.
//!
//! AMap encodes numbers as strings, and an absent string field as an empty
//! JSON array (`"address": []`). The [`lenient`] helpers absorb both, so
//! every scalar field here is an `Option`.

use serde::Deserialize;

/// Status block shared by every v3 response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct V3Status {
    /// `"1"` on success, `"0"` on failure.
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,

    /// Human-readable status, e.g. `"OK"` or `"INVALID_USER_KEY"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub info: Option<String>,

    /// Numeric status code, `"10000"` on success.
    #[serde(default, deserialize_with = "lenient::string")]
    pub infocode: Option<String>,
}

impl V3Status {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("1")
    }
}

/// Response from `/v3/geocode/geo`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default)]
    pub geocodes: Vec<Geocode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geocode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub formatted_address: Option<String>,

    /// `"lng,lat"`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub citycode: Option<String>,
}

/// Response from `/v3/geocode/regeo`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegeoResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default, deserialize_with = "lenient::object")]
    pub regeocode: Option<Regeocode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Regeocode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub formatted_address: Option<String>,

    #[serde(
        default,
        rename = "addressComponent",
        deserialize_with = "lenient::object"
    )]
    pub address_component: Option<AddressComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub province: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,

    /// Telephone area code, e.g. `"010"`. Accepted as `city` by transit.
    #[serde(default, deserialize_with = "lenient::string")]
    pub citycode: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub adcode: Option<String>,
}

/// Response from `/v3/direction/driving` and `/v3/direction/walking`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default, deserialize_with = "lenient::object")]
    pub route: Option<PathRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathRoute {
    #[serde(default)]
    pub paths: Vec<Path>,
}

/// One driving or walking alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct Path {
    /// Metres.
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    /// Seconds.
    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,

    /// Yuan. Driving only.
    #[serde(default, deserialize_with = "lenient::number")]
    pub tolls: Option<f64>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One instruction of a path. Shared by driving, walking, cycling, and the
/// walking legs of transit.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient::string")]
    pub instruction: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub road: Option<String>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,
}

/// Response from `/v3/direction/transit/integrated`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default, deserialize_with = "lenient::object")]
    pub route: Option<TransitRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitRoute {
    #[serde(default)]
    pub transits: Vec<Transit>,
}

/// One public-transport plan.
#[derive(Debug, Clone, Deserialize)]
pub struct Transit {
    /// Fare in yuan.
    #[serde(default, deserialize_with = "lenient::number")]
    pub cost: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub walking_distance: Option<f64>,

    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// A walking leg followed by a ride. Either part may be empty (`[]`).
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient::object")]
    pub walking: Option<Walking>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub bus: Option<Bus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Walking {
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bus {
    /// Alternative lines for this ride; the first is the recommended one.
    #[serde(default)]
    pub buslines: Vec<Busline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Busline {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub departure_stop: Option<Stop>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub arrival_stop: Option<Stop>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub via_num: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stop {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

/// Response from `/v4/direction/bicycling`.
///
/// The v4 API reports errors with `errcode`/`errmsg` instead of `status`.
#[derive(Debug, Clone, Deserialize)]
pub struct BicyclingResponse {
    #[serde(default, deserialize_with = "lenient::number")]
    pub errcode: Option<f64>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub errmsg: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub errdetail: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub data: Option<BicyclingData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BicyclingData {
    #[serde(default)]
    pub paths: Vec<Path>,
}

/// Response from `/v3/place/around`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceAroundResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default)]
    pub pois: Vec<Poi>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Poi {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,

    /// Metres from the search centre.
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,
}

/// Response from `/v3/assistant/inputtips`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputTipsResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default)]
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tip {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub district: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub typecode: Option<String>,
}

/// Response from `/v3/ip`.
#[derive(Debug, Clone, Deserialize)]
pub struct IpResponse {
    #[serde(flatten)]
    pub status: V3Status,

    #[serde(default, deserialize_with = "lenient::string")]
    pub province: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub adcode: Option<String>,

    /// `"lng,lat;lng,lat"`, south-west then north-east.
    #[serde(default, deserialize_with = "lenient::string")]
    pub rectangle: Option<String>,
}

/// Deserializers for AMap's loosely typed scalars.
pub mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// A string that may arrive as a number, `null`, or `[]`.
    ///
    /// Blank strings and empty arrays become `None`. A non-empty array of
    /// strings is joined.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(items) => {
                let joined: String = items.iter().filter_map(Value::as_str).collect();
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        })
    }

    /// A number that may arrive as a string, `null`, or `[]`.
    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// An object that may arrive as `[]` or `null` when empty.
    pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_with_string_fields() {
        let json = r#"{
            "status": "1", "info": "OK", "infocode": "10000", "count": "1",
            "geocodes": [{
                "formatted_address": "北京市朝阳区国贸",
                "province": "北京市", "citycode": "010",
                "location": "116.461841,39.909104",
                "level": "兴趣点", "township": [], "neighborhood": {"name": [], "type": []}
            }]
        }"#;
        let resp: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert!(resp.status.is_ok());
        assert_eq!(resp.geocodes.len(), 1);
        assert_eq!(
            resp.geocodes[0].location.as_deref(),
            Some("116.461841,39.909104")
        );
        assert_eq!(resp.geocodes[0].citycode.as_deref(), Some("010"));
    }

    #[test]
    fn regeo_with_empty_array_address() {
        let json = r#"{
            "status": "1", "info": "OK", "infocode": "10000",
            "regeocode": {
                "formatted_address": [],
                "addressComponent": {"province": [], "city": [], "citycode": [], "adcode": []}
            }
        }"#;
        let resp: RegeoResponse = serde_json::from_str(json).unwrap();
        let regeo = resp.regeocode.unwrap();
        assert_eq!(regeo.formatted_address, None);
        assert_eq!(regeo.address_component.unwrap().citycode, None);
    }

    #[test]
    fn error_status() {
        let json = r#"{"status": "0", "info": "INVALID_USER_KEY", "infocode": "10001"}"#;
        let resp: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.status.is_ok());
        assert_eq!(resp.status.infocode.as_deref(), Some("10001"));
        assert!(resp.geocodes.is_empty());
    }

    #[test]
    fn transit_with_empty_walking_and_bus() {
        let json = r#"{
            "status": "1", "info": "OK", "infocode": "10000",
            "route": {"transits": [{
                "cost": "4.0", "duration": "2400", "distance": "15000", "walking_distance": "800",
                "segments": [
                    {"walking": {"distance": "300", "duration": "240", "steps": []},
                     "bus": {"buslines": [{
                        "name": "地铁1号线(古城--环球度假区)",
                        "departure_stop": {"name": "国贸"}, "arrival_stop": {"name": "天安门东"},
                        "distance": "5200", "duration": "900", "via_num": "4"
                     }]}},
                    {"walking": {"distance": "500", "duration": "400", "steps": []}, "bus": {"buslines": []}},
                    {"walking": [], "bus": []}
                ]
            }]}
        }"#;
        let resp: TransitResponse = serde_json::from_str(json).unwrap();
        let transit = &resp.route.unwrap().transits[0];
        assert_eq!(transit.cost, Some(4.0));
        assert_eq!(transit.segments.len(), 3);
        let line = &transit.segments[0].bus.as_ref().unwrap().buslines[0];
        assert_eq!(line.via_num, Some(4.0));
        assert!(transit.segments[2].walking.is_none());
        assert!(transit.segments[2].bus.is_none());
    }

    #[test]
    fn bicycling_numbers() {
        let json = r#"{
            "errcode": 0, "errmsg": "OK",
            "data": {"paths": [{"distance": 3120, "duration": 748, "steps": [
                {"instruction": "骑行120米左转", "road": "建国路", "distance": 120, "duration": 29}
            ]}]}
        }"#;
        let resp: BicyclingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.errcode, Some(0.0));
        let path = &resp.data.unwrap().paths[0];
        assert_eq!(path.distance, Some(3120.0));
        assert_eq!(path.steps[0].road.as_deref(), Some("建国路"));
    }

    #[test]
    fn lenient_string_handles_arrays_and_numbers() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "lenient::string")]
            a: Option<String>,
            #[serde(default, deserialize_with = "lenient::string")]
            b: Option<String>,
            #[serde(default, deserialize_with = "lenient::string")]
            c: Option<String>,
            #[serde(default, deserialize_with = "lenient::string")]
            d: Option<String>,
        }
        let probe: Probe =
            serde_json::from_str(r#"{"a": [], "b": 42, "c": "  ", "d": ["朝阳", "区"]}"#)
                .unwrap();
        assert_eq!(probe.a, None);
        assert_eq!(probe.b.as_deref(), Some("42"));
        assert_eq!(probe.c, None);
        assert_eq!(probe.d.as_deref(), Some("朝阳区"));
    }
}
