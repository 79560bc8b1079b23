//! Relevance filtering and ordering of nearby places.

use crate::domain::{PoiCandidate, PoiCategory};

/// Well-known landmarks and landmark types. A match scores highest.
pub const FAMOUS_KEYWORDS: &[&str] = &[
    // 北京
    "天安门", "故宫", "颐和园", "圆明园", "长城", "鸟巢", "水立方", "天坛", "雍和宫", "恭王府",
    "北海公园", "景山公园", "香山", "十三陵", "明十三陵", "慕田峪", "八达岭", "司马台",
    "什刹海", "南锣鼓巷", "王府井", "前门", "大栅栏", "琉璃厂", "潘家园", "798",
    "清华大学", "北京大学", "中国科学院", "国家博物馆", "首都博物馆", "军事博物馆",
    // 上海
    "外滩", "东方明珠", "豫园", "城隍庙", "南京路", "淮海路", "新天地", "田子坊",
    "朱家角", "七宝", "上海博物馆", "上海科技馆", "中华艺术宫", "上海迪士尼",
    // 广州
    "广州塔", "陈家祠", "沙面", "越秀公园", "白云山", "长隆", "珠江夜游",
    // 深圳
    "世界之窗", "欢乐谷", "大梅沙", "小梅沙", "莲花山", "深圳湾公园",
    // 杭州
    "西湖", "雷峰塔", "灵隐寺", "三潭印月", "苏堤", "白堤", "断桥", "花港观鱼",
    // 南京
    "中山陵", "明孝陵", "夫子庙", "秦淮河", "玄武湖", "紫金山",
    // 西安
    "兵马俑", "华清池", "大雁塔", "小雁塔", "古城墙", "钟楼", "鼓楼", "回民街",
    // 成都
    "宽窄巷子", "锦里", "武侯祠", "杜甫草堂", "青城山", "都江堰", "大熊猫基地",
    // generic
    "博物馆", "纪念馆", "艺术馆", "科技馆", "图书馆", "大学", "公园", "广场", "寺庙", "教堂",
    "古镇", "古城", "古街", "步行街", "商业街", "购物中心", "奥特莱斯", "万达", "银泰", "大悦城",
];

/// Places whose name or address contains any of these are dropped.
pub const LOW_QUALITY_KEYWORDS: &[&str] = &[
    "故址", "遗址", "会馆", "胡同", "小区", "社区", "村", "厂", "公司", "有限公司",
    "门店", "专卖店", "维修", "服务", "中心", "站点", "停车场", "加油站",
    "银行", "ATM", "药店", "诊所", "理发", "美容", "洗车", "快递", "物流",
];

/// Name fragments that mark a tourist place as worth showing.
const LANDMARK_NAME_KEYWORDS: &[&str] = &[
    "公园", "博物馆", "纪念馆", "寺", "庙", "塔", "广场", "山", "湖", "河",
];

const SCORE_FAMOUS: u8 = 10;
const SCORE_LANDMARK: u8 = 5;
const SCORE_DEFAULT: u8 = 3;
const SCORE_NEARBY: u8 = 1;

/// Unremarkable tourist places are kept only within this distance.
const NEARBY_METRES: f64 = 2000.0;

/// Maximum results for a category.
pub fn result_limit(category: PoiCategory) -> usize {
    match category {
        PoiCategory::Tourist => 8,
        _ => 6,
    }
}

/// Filter, score, sort and truncate raw nearby-search results.
///
/// Output is ordered by score descending, then distance ascending with
/// unknown distances last, and is at most [`result_limit`] long.
pub fn rank_pois(raw: Vec<PoiCandidate>, category: PoiCategory) -> Vec<PoiCandidate> {
    let mut ranked: Vec<PoiCandidate> = raw
        .into_iter()
        .filter_map(|mut poi| {
            poi.priority_score = score(&poi, category)?;
            Some(poi)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then_with(|| sort_distance(a).total_cmp(&sort_distance(b)))
    });
    ranked.truncate(result_limit(category));
    ranked
}

/// Score for a candidate, `None` if it should be dropped.
fn score(poi: &PoiCandidate, category: PoiCategory) -> Option<u8> {
    let text = poi.full_text();
    if contains_any(&text, LOW_QUALITY_KEYWORDS) {
        return None;
    }

    let famous = contains_any(&text, FAMOUS_KEYWORDS);
    if category != PoiCategory::Tourist {
        return Some(if famous { SCORE_FAMOUS } else { SCORE_DEFAULT });
    }

    if famous {
        Some(SCORE_FAMOUS)
    } else if contains_any(&poi.name, LANDMARK_NAME_KEYWORDS) {
        Some(SCORE_LANDMARK)
    } else if poi.distance_meters.is_some_and(|d| d < NEARBY_METRES) {
        Some(SCORE_NEARBY)
    } else {
        None
    }
}

fn sort_distance(poi: &PoiCandidate) -> f64 {
    poi.distance_meters.unwrap_or(f64::INFINITY)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(name: &str, address: &str, category: PoiCategory, distance: f64) -> PoiCandidate {
        PoiCandidate::new(name, address, None, category, Some(distance))
    }

    fn names(pois: &[PoiCandidate]) -> Vec<&str> {
        pois.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn tourist_scoring_tiers() {
        let raw = vec![
            poi("无名景点", "某路1号", PoiCategory::Tourist, 1500.0),
            poi("故宫博物院", "景山前街4号", PoiCategory::Tourist, 3000.0),
            poi("玉渊潭", "西三环中路", PoiCategory::Tourist, 2500.0),
            poi("小山坡", "某路2号", PoiCategory::Tourist, 4000.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Tourist);

        assert_eq!(names(&ranked), vec!["故宫博物院", "小山坡", "无名景点"]);
        assert_eq!(ranked[0].priority_score, 10);
        assert_eq!(ranked[1].priority_score, 5);
        assert_eq!(ranked[2].priority_score, 1);
    }

    #[test]
    fn deny_list_checks_address_too() {
        let raw = vec![
            poi("景山公园", "景山西街44号", PoiCategory::Tourist, 500.0),
            poi("北海公园", "某某小区旁", PoiCategory::Tourist, 100.0),
            poi("国家博物馆服务中心", "天安门广场东侧", PoiCategory::Tourist, 50.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Tourist);
        assert_eq!(names(&ranked), vec!["景山公园"]);
    }

    #[test]
    fn other_categories_default_score() {
        let raw = vec![
            poi("老北京炸酱面", "东四北大街", PoiCategory::Food, 900.0),
            poi("王府井小吃街", "王府井大街", PoiCategory::Food, 1200.0),
            poi("面馆", "远处", PoiCategory::Food, 9000.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Food);
        assert_eq!(names(&ranked), vec!["王府井小吃街", "老北京炸酱面", "面馆"]);
        assert_eq!(ranked[0].priority_score, 10);
        assert_eq!(ranked[1].priority_score, 3);
    }

    #[test]
    fn ties_sorted_by_distance() {
        let raw = vec![
            poi("甲公园", "", PoiCategory::Tourist, 900.0),
            poi("乙公园", "", PoiCategory::Tourist, 300.0),
            poi("丙公园", "", PoiCategory::Tourist, 600.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Tourist);
        assert_eq!(names(&ranked), vec!["乙公园", "丙公园", "甲公园"]);
    }

    #[test]
    fn truncates_per_category() {
        let raw: Vec<_> = (0..20)
            .map(|i| poi(&format!("景点{i}号公园"), "", PoiCategory::Tourist, i as f64))
            .collect();
        assert_eq!(rank_pois(raw, PoiCategory::Tourist).len(), 8);

        let raw: Vec<_> = (0..20)
            .map(|i| poi(&format!("酒店{i}"), "", PoiCategory::Hotel, i as f64))
            .collect();
        assert_eq!(rank_pois(raw, PoiCategory::Hotel).len(), 6);
    }

    #[test]
    fn unknown_distance_is_not_nearby() {
        let raw = vec![
            PoiCandidate::new("远处某景点", "某路3号", None, PoiCategory::Tourist, None),
            poi("近处某景点", "某路4号", PoiCategory::Tourist, 500.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Tourist);
        assert_eq!(names(&ranked), vec!["近处某景点"]);
        assert_eq!(ranked[0].priority_score, 1);
    }

    #[test]
    fn unknown_distance_sorts_last_within_score() {
        let raw = vec![
            PoiCandidate::new("甲公园", "", None, PoiCategory::Tourist, None),
            poi("乙公园", "", PoiCategory::Tourist, 4000.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Tourist);
        assert_eq!(names(&ranked), vec!["乙公园", "甲公园"]);

        let raw = vec![
            PoiCandidate::new("面馆", "", None, PoiCategory::Food, None),
            poi("饺子馆", "", PoiCategory::Food, 9000.0),
        ];
        let ranked = rank_pois(raw, PoiCategory::Food);
        assert_eq!(names(&ranked), vec!["饺子馆", "面馆"]);
        assert_eq!(ranked[1].priority_score, 3);
    }

    #[test]
    fn empty_input() {
        assert!(rank_pois(vec![], PoiCategory::Shopping).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Names drawn from a mix of deny-list, allow-list and plain fragments.
    fn arb_poi() -> impl Strategy<Value = PoiCandidate> {
        let fragment = prop::sample::select(vec![
            "故宫", "公园", "小区", "湖", "餐厅", "公司", "塔", "某", "街", "ATM", "外滩", "村",
        ]);
        (
            prop::collection::vec(fragment.clone(), 1..4),
            prop::collection::vec(fragment, 0..3),
            prop::option::weighted(0.9, 0.0f64..20_000.0),
            prop::sample::select(PoiCategory::ALL.to_vec()),
        )
            .prop_map(|(name, address, distance, category)| {
                PoiCandidate::new(name.concat(), address.concat(), None, category, distance)
            })
    }

    proptest! {
        /// Nothing containing a deny-list keyword survives ranking.
        #[test]
        fn no_low_quality_results(
            raw in prop::collection::vec(arb_poi(), 0..40),
            category in prop::sample::select(PoiCategory::ALL.to_vec()),
        ) {
            for poi in rank_pois(raw, category) {
                let text = poi.full_text();
                prop_assert!(!LOW_QUALITY_KEYWORDS.iter().any(|k| text.contains(k)));
            }
        }

        /// Scores never increase; equal scores never get further away.
        #[test]
        fn ordered_by_score_then_distance(
            raw in prop::collection::vec(arb_poi(), 0..40),
            category in prop::sample::select(PoiCategory::ALL.to_vec()),
        ) {
            let ranked = rank_pois(raw, category);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].priority_score >= pair[1].priority_score);
                if pair[0].priority_score == pair[1].priority_score {
                    prop_assert!(sort_distance(&pair[0]) <= sort_distance(&pair[1]));
                }
            }
        }

        /// Output never exceeds the category's limit.
        #[test]
        fn bounded_length(
            raw in prop::collection::vec(arb_poi(), 0..40),
            category in prop::sample::select(PoiCategory::ALL.to_vec()),
        ) {
            prop_assert!(rank_pois(raw, category).len() <= result_limit(category));
        }
    }
}
