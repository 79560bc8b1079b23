//! Address cleaning and keyword extraction.
//!
//! All indexing here is by `char`, never by byte: addresses are mostly CJK.

/// Major cities recognised by keyword extraction, in match-priority order.
pub const CITY_NAMES: &[&str] = &[
    "北京", "上海", "广州", "深圳", "杭州", "南京", "武汉", "成都", "重庆", "天津", "西安", "青岛",
    "大连", "厦门", "苏州", "无锡", "宁波", "长沙", "郑州", "济南", "哈尔滨", "沈阳", "长春",
    "石家庄", "太原", "呼和浩特", "兰州", "西宁", "银川", "乌鲁木齐", "拉萨", "昆明", "贵阳",
    "南宁", "海口", "三亚", "福州", "南昌", "合肥",
];

/// Administrative districts recognised by keyword extraction.
pub const DISTRICT_NAMES: &[&str] = &[
    "朝阳", "海淀", "丰台", "石景山", "东城", "西城", "通州", "昌平", "大兴", "房山", "门头沟",
    "平谷", "密云", "延庆", "怀柔", "顺义",
];

/// Cities whose "city + district" form is tried by [`simplify_address`].
const SIMPLIFY_CITIES: &[&str] = &[
    "北京", "上海", "广州", "深圳", "杭州", "南京", "西安", "成都",
];

/// Landmark suffixes tried by [`simplify_address`], in order. A match keeps
/// the text before the suffix.
const LANDMARK_SUFFIXES: &[&[&str]] = &[
    &["酒店", "宾馆", "饭店"],
    &["医院", "诊所"],
    &["学校", "大学", "学院"],
    &["商场", "购物中心", "广场"],
];

/// Characters kept when falling back to a plain prefix.
const PREFIX_CHARS: usize = 6;

/// Strip characters the geocoder chokes on.
///
/// Removes parentheses (ASCII and full-width), all whitespace, and every
/// character that is not a CJK ideograph, ASCII letter, digit or underscore.
///
/// ```
/// use trip_server::geocode::preprocess_address;
///
/// assert_eq!(preprocess_address("北京市朝阳区(国贸)"), "北京市朝阳区国贸");
/// assert_eq!(preprocess_address("上海 · 外滩【观景台】"), "上海外滩观景台");
/// ```
pub fn preprocess_address(address: &str) -> String {
    address
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '（' | '）'))
        .filter(|c| !c.is_whitespace())
        .filter(|&c| is_cjk_ideograph(c) || c.is_ascii_alphanumeric() || c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Reduce an address to "city + district" keywords.
///
/// Takes the earliest city name and the earliest district name found
/// anywhere in the string and concatenates them. With neither present, falls
/// back to the first six characters.
///
/// ```
/// use trip_server::geocode::extract_keywords;
///
/// assert_eq!(extract_keywords("在北京的朝阳那边某个地方"), "北京朝阳");
/// assert_eq!(extract_keywords("某某不存在的地方寺庙小区"), "某某不存在的");
/// ```
pub fn extract_keywords(address: &str) -> String {
    let mut keywords = String::new();
    if let Some(city) = earliest_match(address, CITY_NAMES) {
        keywords.push_str(city);
    }
    if let Some(district) = earliest_match(address, DISTRICT_NAMES) {
        keywords.push_str(district);
    }

    if keywords.is_empty() {
        keywords = char_prefix(address, PREFIX_CHARS);
    }

    if keywords.is_empty() {
        address.to_string()
    } else {
        keywords
    }
}

/// Shorten an address to its main landmark or area.
///
/// Tried in order: text before a hotel, hospital, school or mall suffix;
/// "city + district" for the major cities; otherwise the first six
/// characters.
pub fn simplify_address(address: &str) -> String {
    for suffixes in LANDMARK_SUFFIXES {
        if let Some(prefix) = text_before_suffix(address, suffixes) {
            return prefix.to_string();
        }
    }

    if let Some(area) = city_district(address) {
        return area;
    }

    char_prefix(address, PREFIX_CHARS)
}

/// The name from `names` that occurs earliest in `text`. Ties at the same
/// position go to the name listed first.
fn earliest_match<'a>(text: &str, names: &[&'a str]) -> Option<&'a str> {
    names
        .iter()
        .enumerate()
        .filter_map(|(rank, name)| text.find(name).map(|pos| (pos, rank, *name)))
        .min_by_key(|(pos, rank, _)| (*pos, *rank))
        .map(|(_, _, name)| name)
}

/// Shortest non-empty prefix of `text` that is immediately followed by one
/// of `suffixes`.
fn text_before_suffix<'t>(text: &'t str, suffixes: &[&str]) -> Option<&'t str> {
    text.char_indices()
        .skip(1)
        .find(|(i, _)| suffixes.iter().any(|s| text[*i..].starts_with(s)))
        .map(|(i, _)| &text[..i])
}

/// "北京…朝阳区" style match: a major city followed, after at least one
/// character, by 区 or 县. Returns the city through the suffix.
fn city_district(text: &str) -> Option<String> {
    for (start, _) in text.char_indices() {
        for city in SIMPLIFY_CITIES {
            let rest = &text[start..];
            if !rest.starts_with(city) {
                continue;
            }
            let after_city = &rest[city.len()..];
            if let Some(middle) = text_before_suffix(after_city, &["区", "县"]) {
                let suffix_start = middle.len();
                let suffix: String = after_city[suffix_start..].chars().take(1).collect();
                return Some(format!("{city}{middle}{suffix}"));
            }
        }
    }
    None
}

fn char_prefix(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Cleaned text only contains kept characters.
        #[test]
        fn preprocess_output_is_clean(s in "\\PC{0,40}") {
            let cleaned = preprocess_address(&s);
            prop_assert!(cleaned
                .chars()
                .all(|c| is_cjk_ideograph(c) || c.is_ascii_alphanumeric() || c == '_'));
        }

        /// Cleaning twice changes nothing.
        #[test]
        fn preprocess_is_idempotent(s in "\\PC{0,40}") {
            let once = preprocess_address(&s);
            prop_assert_eq!(preprocess_address(&once), once.clone());
        }

        /// Non-empty input always yields something to retry with.
        #[test]
        fn keywords_nonempty_for_nonempty_input(s in "\\PC{1,40}") {
            prop_assert!(!extract_keywords(&s).is_empty());
        }
    }
}
