//! Conversion from AMap DTOs to provider and domain types.
//!
//! Nothing here validates coordinates beyond parsing: the resolver decides
//! whether a geocoded point is usable, and POIs without a parseable
//! location keep `coordinate: None`.

use crate::domain::{Coordinate, PoiCandidate, PoiCategory, RouteOption, RouteStep};
use crate::provider::{GeocodeMatch, IpLocation, Suggestion};

use super::types::{Geocode, Path, Poi, Step, Tip, Transit};

/// Split `"lng,lat"` into raw components.
pub fn parse_lng_lat(location: &str) -> Option<(f64, f64)> {
    let (lng, lat) = location.split_once(',')?;
    Some((lng.trim().parse().ok()?, lat.trim().parse().ok()?))
}

/// First geocode with a parseable location.
pub fn convert_geocodes(geocodes: &[Geocode]) -> Option<GeocodeMatch> {
    geocodes.iter().find_map(|g| {
        let (lng, lat) = parse_lng_lat(g.location.as_deref()?)?;
        Some(GeocodeMatch {
            lng,
            lat,
            formatted_address: g.formatted_address.clone().unwrap_or_default(),
        })
    })
}

/// Driving, walking or cycling paths.
pub fn convert_paths(paths: &[Path]) -> Vec<RouteOption> {
    paths
        .iter()
        .map(|path| RouteOption {
            duration_secs: whole(path.duration),
            distance_m: whole(path.distance),
            cost: path.tolls.unwrap_or(0.0),
            steps: path.steps.iter().map(convert_step).collect(),
        })
        .collect()
}

fn convert_step(step: &Step) -> RouteStep {
    RouteStep {
        instruction: step.instruction.clone().unwrap_or_default(),
        distance_m: whole(step.distance) as u32,
        duration_secs: whole(step.duration) as u32,
        road: step.road.clone(),
        line: None,
    }
}

/// Transit plans. Each segment yields a walking step (when it walks any
/// distance) and a ride step on its recommended line.
pub fn convert_transits(transits: &[Transit]) -> Vec<RouteOption> {
    transits
        .iter()
        .map(|transit| {
            let mut steps = Vec::new();
            for segment in &transit.segments {
                if let Some(walking) = &segment.walking {
                    let distance = whole(walking.distance);
                    if distance > 0 {
                        steps.push(RouteStep {
                            instruction: "步行".to_string(),
                            distance_m: distance as u32,
                            duration_secs: whole(walking.duration) as u32,
                            road: None,
                            line: None,
                        });
                    }
                }

                let line = segment
                    .bus
                    .as_ref()
                    .and_then(|bus| bus.buslines.first());
                if let Some(line) = line {
                    let name = line.name.clone().unwrap_or_else(|| "换乘".to_string());
                    let mut instruction = format!("乘坐{name}");
                    if let Some(from) = line.departure_stop.as_ref().and_then(|s| s.name.as_ref()) {
                        instruction.push_str(&format!(" 从{from}"));
                    }
                    if let Some(to) = line.arrival_stop.as_ref().and_then(|s| s.name.as_ref()) {
                        instruction.push_str(&format!(" 到{to}"));
                    }
                    if let Some(via) = line.via_num.filter(|n| *n > 0.0) {
                        instruction.push_str(&format!("，途经{via}站"));
                    }
                    steps.push(RouteStep {
                        instruction,
                        distance_m: whole(line.distance) as u32,
                        duration_secs: whole(line.duration) as u32,
                        road: None,
                        line: Some(name),
                    });
                }
            }

            RouteOption {
                duration_secs: whole(transit.duration),
                distance_m: whole(transit.distance),
                cost: transit.cost.unwrap_or(0.0),
                steps,
            }
        })
        .collect()
}

/// Nearby-search results, unranked.
pub fn convert_pois(pois: &[Poi], category: PoiCategory) -> Vec<PoiCandidate> {
    pois.iter()
        .filter_map(|poi| {
            let name = poi.name.clone()?;
            let coordinate = poi
                .location
                .as_deref()
                .and_then(|loc| loc.parse::<Coordinate>().ok());
            Some(PoiCandidate::new(
                name,
                poi.address.clone().unwrap_or_default(),
                coordinate,
                category,
                poi.distance.filter(|d| d.is_finite() && *d >= 0.0),
            ))
        })
        .collect()
}

/// Autocomplete tips that have both a name and a district.
pub fn convert_tips(tips: &[Tip]) -> Vec<Suggestion> {
    tips.iter()
        .filter_map(|tip| {
            Some(Suggestion {
                name: tip.name.clone()?,
                district: tip.district.clone()?,
                address: tip.address.clone().unwrap_or_default(),
                coordinate: tip
                    .location
                    .as_deref()
                    .and_then(|loc| loc.parse::<Coordinate>().ok()),
                typecode: tip.typecode.clone(),
            })
        })
        .collect()
}

/// IP lookup. `None` when AMap could not place the address (city is `[]`).
pub fn convert_ip(
    province: Option<&str>,
    city: Option<&str>,
    rectangle: Option<&str>,
) -> Option<IpLocation> {
    let city = city?.to_string();
    let bounds = rectangle.and_then(|rect| {
        let (sw, ne) = rect.split_once(';')?;
        Some((sw.parse().ok()?, ne.parse().ok()?))
    });
    Some(IpLocation {
        province: province.unwrap_or_default().to_string(),
        city,
        bounds,
    })
}

/// Non-negative whole number from an optional float.
fn whole(value: Option<f64>) -> u64 {
    value.filter(|v| v.is_finite() && *v > 0.0).map_or(0, |v| v.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amap::types::{Bus, Busline, Segment, Stop, Walking};

    fn step(instruction: &str, distance: f64) -> Step {
        Step {
            instruction: Some(instruction.to_string()),
            road: Some("长安街".to_string()),
            distance: Some(distance),
            duration: Some(distance / 10.0),
        }
    }

    #[test]
    fn parse_lng_lat_forms() {
        assert_eq!(parse_lng_lat("116.4,39.9"), Some((116.4, 39.9)));
        assert_eq!(parse_lng_lat(" 116.4 , 39.9 "), Some((116.4, 39.9)));
        assert_eq!(parse_lng_lat("116.4"), None);
        assert_eq!(parse_lng_lat("a,b"), None);
        // Raw parse keeps zeros; the resolver rejects them.
        assert_eq!(parse_lng_lat("0,0"), Some((0.0, 0.0)));
    }

    #[test]
    fn geocode_skips_missing_locations() {
        let geocodes = vec![
            Geocode {
                formatted_address: Some("无坐标".to_string()),
                location: None,
                citycode: None,
            },
            Geocode {
                formatted_address: Some("北京市东城区天安门".to_string()),
                location: Some("116.397128,39.903738".to_string()),
                citycode: Some("010".to_string()),
            },
        ];
        let found = convert_geocodes(&geocodes).unwrap();
        assert_eq!(found.lng, 116.397128);
        assert_eq!(found.formatted_address, "北京市东城区天安门");
        assert_eq!(convert_geocodes(&[]), None);
    }

    #[test]
    fn path_conversion() {
        let paths = vec![Path {
            distance: Some(12345.0),
            duration: Some(1770.0),
            tolls: Some(10.0),
            steps: vec![step("向东行驶", 500.0), step("左转", 1500.0)],
        }];
        let options = convert_paths(&paths);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].distance_m, 12345);
        assert_eq!(options[0].duration_secs, 1770);
        assert_eq!(options[0].cost, 10.0);
        assert_eq!(options[0].steps[1].instruction, "左转");
        assert_eq!(options[0].steps[1].distance_m, 1500);
        assert_eq!(options[0].steps[0].road.as_deref(), Some("长安街"));
    }

    #[test]
    fn transit_conversion() {
        let transit = Transit {
            cost: Some(4.0),
            duration: Some(2400.0),
            distance: Some(15000.0),
            walking_distance: Some(800.0),
            segments: vec![
                Segment {
                    walking: Some(Walking {
                        distance: Some(300.0),
                        duration: Some(240.0),
                        steps: vec![],
                    }),
                    bus: Some(Bus {
                        buslines: vec![Busline {
                            name: Some("地铁1号线".to_string()),
                            distance: Some(5200.0),
                            duration: Some(900.0),
                            departure_stop: Some(Stop {
                                name: Some("国贸".to_string()),
                            }),
                            arrival_stop: Some(Stop {
                                name: Some("天安门东".to_string()),
                            }),
                            via_num: Some(4.0),
                        }],
                    }),
                },
                Segment {
                    walking: Some(Walking {
                        distance: Some(0.0),
                        duration: Some(0.0),
                        steps: vec![],
                    }),
                    bus: None,
                },
            ],
        };

        let options = convert_transits(&[transit]);
        let steps = &options[0].steps;
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].instruction, "步行");
        assert_eq!(steps[0].distance_m, 300);
        assert_eq!(steps[1].line.as_deref(), Some("地铁1号线"));
        assert_eq!(steps[1].instruction, "乘坐地铁1号线 从国贸 到天安门东，途经4站");
        assert_eq!(options[0].cost, 4.0);
    }

    #[test]
    fn pois_keep_missing_location_as_none() {
        let pois = vec![
            Poi {
                name: Some("故宫博物院".to_string()),
                address: Some("景山前街4号".to_string()),
                location: Some("116.397026,39.918058".to_string()),
                distance: Some(812.0),
            },
            Poi {
                name: Some("某公园".to_string()),
                address: None,
                location: None,
                distance: None,
            },
            Poi {
                name: None,
                address: None,
                location: None,
                distance: None,
            },
        ];
        let candidates = convert_pois(&pois, PoiCategory::Tourist);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].coordinate.is_some());
        assert_eq!(candidates[0].distance_meters, Some(812.0));
        assert_eq!(candidates[1].coordinate, None);
        assert_eq!(candidates[1].address, "");
        assert_eq!(candidates[1].distance_meters, None);
    }

    #[test]
    fn tips_need_name_and_district() {
        let tip = |name: Option<&str>, district: Option<&str>| Tip {
            name: name.map(str::to_string),
            district: district.map(str::to_string),
            address: None,
            location: None,
            typecode: None,
        };
        let tips = vec![
            tip(Some("国贸"), Some("北京市朝阳区")),
            tip(Some("国贸站"), None),
            tip(None, Some("北京市朝阳区")),
        ];
        let suggestions = convert_tips(&tips);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "国贸");
    }

    #[test]
    fn ip_conversion() {
        let loc = convert_ip(
            Some("北京市"),
            Some("北京市"),
            Some("116.0119343,39.66127144;116.7829835,40.2164962"),
        )
        .unwrap();
        assert_eq!(loc.city, "北京市");
        let (sw, ne) = loc.bounds.unwrap();
        assert!(sw.lng() < ne.lng());

        assert_eq!(convert_ip(None, None, None), None);
        assert!(convert_ip(Some("局域网"), Some("x"), Some("garbage")).unwrap().bounds.is_none());
    }
}
