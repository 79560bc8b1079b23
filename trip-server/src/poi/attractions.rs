//! Hand-curated attractions for major cities.
//!
//! Used when the user wants well-known places for a city rather than
//! whatever the nearby search turns up. Coordinates are GCJ-02.

use crate::domain::{Coordinate, PoiCandidate, PoiCategory};

use super::PoiGroup;

/// A fixed entry in the attraction table.
#[derive(Debug, Clone, Copy)]
pub struct Attraction {
    pub name: &'static str,
    pub address: &'static str,
    pub lng: f64,
    pub lat: f64,
}

impl Attraction {
    fn to_candidate(self, category: PoiCategory) -> PoiCandidate {
        PoiCandidate::new(
            self.name,
            self.address,
            Coordinate::new(self.lng, self.lat).ok(),
            category,
            Some(0.0),
        )
    }
}

struct CityTable {
    city: &'static str,
    /// Short forms matched after every full city name has been tried.
    aliases: &'static [&'static str],
    tourist: &'static [Attraction],
    food: &'static [Attraction],
    shopping: &'static [Attraction],
}

const fn a(name: &'static str, address: &'static str, lng: f64, lat: f64) -> Attraction {
    Attraction {
        name,
        address,
        lng,
        lat,
    }
}

static CITIES: &[CityTable] = &[
    CityTable {
        city: "北京",
        aliases: &["京"],
        tourist: &[
            a("天安门广场", "北京市东城区天安门广场", 116.397128, 39.903738),
            a("故宫博物院", "北京市东城区景山前街4号", 116.397026, 39.918058),
            a("天坛公园", "北京市东城区天坛路甲1号", 116.407394, 39.882171),
            a("颐和园", "北京市海淀区新建宫门路19号", 116.275, 39.999),
            a("圆明园", "北京市海淀区清华西路28号", 116.295, 39.999),
            a("八达岭长城", "北京市延庆区八达岭镇", 116.017, 40.359),
            a("鸟巢(国家体育场)", "北京市朝阳区国家体育场南路1号", 116.388, 39.993),
            a("水立方", "北京市朝阳区天辰东路11号", 116.389, 39.992),
            a("雍和宫", "北京市东城区雍和宫大街12号", 116.418, 39.948),
            a("恭王府", "北京市西城区柳荫街甲14号", 116.384, 39.937),
            a("北海公园", "北京市西城区文津街1号", 116.388, 39.928),
            a("景山公园", "北京市西城区景山西街44号", 116.395, 39.928),
            a("什刹海", "北京市西城区什刹海", 116.384, 39.937),
            a("南锣鼓巷", "北京市东城区南锣鼓巷", 116.403, 39.937),
        ],
        food: &[
            a("全聚德(前门店)", "北京市东城区前门大街30号", 116.395, 39.898),
            a("东来顺(王府井店)", "北京市东城区王府井大街198号", 116.407, 39.915),
            a("便宜坊(鲜鱼口店)", "北京市东城区鲜鱼口街87号", 116.398, 39.897),
            a("护国寺小吃", "北京市西城区护国寺大街93号", 116.374, 39.938),
            a("老北京炸酱面大王", "北京市东城区东四北大街107号", 116.418, 39.928),
        ],
        shopping: &[
            a("王府井大街", "北京市东城区王府井大街", 116.407, 39.915),
            a("西单大悦城", "北京市西城区西单北大街131号", 116.374, 39.913),
            a("三里屯太古里", "北京市朝阳区三里屯路19号", 116.456, 39.937),
            a("国贸商城", "北京市朝阳区建国门外大街1号", 116.458, 39.908),
        ],
    },
    CityTable {
        city: "上海",
        aliases: &["沪"],
        tourist: &[
            a("外滩", "上海市黄浦区中山东一路", 121.490, 31.240),
            a("东方明珠", "上海市浦东新区世纪大道1号", 121.506, 31.240),
            a("豫园", "上海市黄浦区福佑路168号", 121.492, 31.228),
            a("城隍庙", "上海市黄浦区方浜中路249号", 121.492, 31.228),
            a("南京路步行街", "上海市黄浦区南京东路", 121.475, 31.235),
            a("新天地", "上海市黄浦区太仓路181弄", 121.477, 31.220),
            a("田子坊", "上海市黄浦区泰康路210弄", 121.466, 31.210),
            a("上海迪士尼乐园", "上海市浦东新区川沙镇黄赵路310号", 121.666, 31.150),
        ],
        food: &[
            a("南翔馒头店", "上海市黄浦区豫园路85号", 121.492, 31.228),
            a("小杨生煎", "上海市黄浦区黄河路90号", 121.475, 31.235),
            a("老正兴", "上海市黄浦区福佑路242号", 121.492, 31.228),
        ],
        shopping: &[],
    },
    CityTable {
        city: "广州",
        aliases: &["穗"],
        tourist: &[
            a("广州塔", "广州市海珠区阅江西路222号", 113.319, 23.109),
            a("陈家祠", "广州市荔湾区中山七路恩龙里34号", 113.243, 23.125),
            a("沙面岛", "广州市荔湾区沙面", 113.236, 23.115),
            a("越秀公园", "广州市越秀区解放北路988号", 113.267, 23.135),
            a("白云山", "广州市白云区白云大道南", 113.300, 23.183),
        ],
        food: &[],
        shopping: &[],
    },
    CityTable {
        city: "深圳",
        aliases: &["深"],
        tourist: &[
            a("世界之窗", "深圳市南山区深南大道9037号", 113.975, 22.539),
            a("欢乐谷", "深圳市南山区侨城西街18号", 113.985, 22.548),
            a("大梅沙海滨公园", "深圳市盐田区盐梅路9号", 114.309, 22.599),
            a("莲花山公园", "深圳市福田区红荔路6030号", 114.095, 22.549),
        ],
        food: &[],
        shopping: &[],
    },
    CityTable {
        city: "杭州",
        aliases: &["杭"],
        tourist: &[
            a("西湖", "杭州市西湖区西湖", 120.139, 30.259),
            a("雷峰塔", "杭州市西湖区南山路15号", 120.149, 30.231),
            a("灵隐寺", "杭州市西湖区灵隐路法云弄1号", 120.101, 30.242),
            a("三潭印月", "杭州市西湖区西湖", 120.139, 30.259),
            a("断桥残雪", "杭州市西湖区北山街", 120.142, 30.264),
        ],
        food: &[],
        shopping: &[],
    },
    CityTable {
        city: "南京",
        aliases: &["宁"],
        tourist: &[
            a("中山陵", "南京市玄武区石象路7号", 118.848, 32.067),
            a("明孝陵", "南京市玄武区石象路7号", 118.848, 32.067),
            a("夫子庙", "南京市秦淮区夫子庙", 118.794, 32.034),
            a("玄武湖", "南京市玄武区玄武巷1号", 118.797, 32.068),
        ],
        food: &[],
        shopping: &[],
    },
    CityTable {
        city: "西安",
        aliases: &[],
        tourist: &[
            a("兵马俑", "西安市临潼区秦始皇帝陵博物院", 109.273, 34.385),
            a("华清宫", "西安市临潼区华清路38号", 109.213, 34.362),
            a("大雁塔", "西安市雁塔区雁塔路", 108.964, 34.218),
            a("古城墙", "西安市碑林区南大街2号", 108.940, 34.266),
            a("钟楼", "西安市碑林区东大街", 108.940, 34.266),
            a("回民街", "西安市莲湖区回民街", 108.937, 34.267),
        ],
        food: &[],
        shopping: &[],
    },
    CityTable {
        city: "成都",
        aliases: &["蓉"],
        tourist: &[
            a("宽窄巷子", "成都市青羊区长顺街127号", 104.055, 30.674),
            a("锦里", "成都市武侯区武侯祠大街231号", 104.050, 30.647),
            a("武侯祠", "成都市武侯区武侯祠大街231号", 104.050, 30.647),
            a("杜甫草堂", "成都市青羊区青华路37号", 104.023, 30.660),
            a("大熊猫繁育研究基地", "成都市成华区熊猫大道1375号", 104.148, 30.735),
        ],
        food: &[],
        shopping: &[],
    },
];

/// Why no attractions could be listed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttractionMiss {
    /// Neither address names a city in the table.
    #[error("无法识别城市，请输入具体的城市名称，如\"北京\"、\"上海\"等")]
    UnknownCity,

    /// The cities are known but have nothing in the chosen categories.
    #[error("暂未收录 {} 的景点信息，请尝试其他城市", .0.join("、"))]
    NotCovered(Vec<String>),
}

/// The table city an address belongs to.
///
/// Full city names are matched before single-character aliases, so
/// "南京路步行街" is not taken for 北京 by its "京".
pub fn identify_city(address: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|t| address.contains(t.city))
        .or_else(|| {
            CITIES
                .iter()
                .find(|t| t.aliases.iter().any(|alias| address.contains(alias)))
        })
        .map(|t| t.city)
}

/// Attractions of one category in a table city.
pub fn attractions_in(city: &str, category: PoiCategory) -> &'static [Attraction] {
    let Some(table) = CITIES.iter().find(|t| t.city == city) else {
        return &[];
    };
    match category {
        PoiCategory::Tourist => table.tourist,
        PoiCategory::Food => table.food,
        PoiCategory::Shopping => table.shopping,
        PoiCategory::Hotel => &[],
    }
}

/// Attractions for the cities of `origin` and `destination`.
///
/// The destination is skipped when it is the same text as the origin.
/// Returns one group per city and category that has entries.
pub fn attractions_for(
    origin: Option<&str>,
    destination: Option<&str>,
    categories: &[PoiCategory],
) -> Result<Vec<PoiGroup>, AttractionMiss> {
    let mut cities = Vec::new();
    if let Some(origin) = origin.filter(|s| !s.trim().is_empty()) {
        cities.extend(identify_city(origin));
    }
    if let Some(destination) = destination.filter(|s| !s.trim().is_empty()) {
        if Some(destination) != origin {
            cities.extend(identify_city(destination));
        }
    }

    if cities.is_empty() {
        return Err(AttractionMiss::UnknownCity);
    }

    let groups: Vec<PoiGroup> = cities
        .iter()
        .flat_map(|city| {
            categories.iter().filter_map(move |&category| {
                let entries = attractions_in(city, category);
                (!entries.is_empty()).then(|| PoiGroup {
                    label: city.to_string(),
                    category,
                    pois: entries.iter().map(|e| e.to_candidate(category)).collect(),
                })
            })
        })
        .collect();

    if groups.is_empty() {
        return Err(AttractionMiss::NotCovered(
            cities.iter().map(|c| c.to_string()).collect(),
        ));
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identify_by_name_and_alias() {
        assert_eq!(identify_city("北京市朝阳区"), Some("北京"));
        assert_eq!(identify_city("沪上某地"), Some("上海"));
        assert_eq!(identify_city("蓉城春熙路"), Some("成都"));
        assert_eq!(identify_city("拉萨布达拉宫"), None);
    }

    #[test]
    fn full_name_beats_alias() {
        assert_eq!(identify_city("南京夫子庙"), Some("南京"));
        assert_eq!(identify_city("深圳湾"), Some("深圳"));
    }

    #[test]
    fn every_entry_has_valid_coordinates() {
        for table in CITIES {
            for category in PoiCategory::ALL {
                for entry in attractions_in(table.city, category) {
                    assert!(
                        Coordinate::new(entry.lng, entry.lat).is_ok(),
                        "{} has a bad coordinate",
                        entry.name
                    );
                }
            }
        }
    }

    #[test]
    fn origin_and_destination_cities() {
        let groups = attractions_for(
            Some("北京天安门"),
            Some("上海外滩"),
            &[PoiCategory::Tourist, PoiCategory::Food],
        )
        .unwrap();

        let labels: Vec<(&str, PoiCategory)> = groups
            .iter()
            .map(|g| (g.label.as_str(), g.category))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("北京", PoiCategory::Tourist),
                ("北京", PoiCategory::Food),
                ("上海", PoiCategory::Tourist),
                ("上海", PoiCategory::Food),
            ]
        );
        assert_eq!(groups[0].pois.len(), 14);
        assert!(groups[0].pois.iter().all(|p| p.distance_meters == Some(0.0)));
    }

    #[test]
    fn same_destination_is_skipped() {
        let groups = attractions_for(Some("杭州"), Some("杭州"), &[PoiCategory::Tourist]).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn unknown_city() {
        let err = attractions_for(Some("某个小镇"), None, &[PoiCategory::Tourist]).unwrap_err();
        assert_eq!(err, AttractionMiss::UnknownCity);
        assert!(err.to_string().starts_with("无法识别城市"));
    }

    #[test]
    fn city_without_data_for_category() {
        let err = attractions_for(Some("广州"), Some("深圳"), &[PoiCategory::Hotel]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "暂未收录 广州、深圳 的景点信息，请尝试其他城市"
        );
    }
}
