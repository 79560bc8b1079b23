//! Plain-text trip report for download.

use std::fmt::Write;

use chrono::{DateTime, Local, NaiveDate};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::RouteCandidate;

/// Characters left unescaped in an RFC 5987 `filename*` value.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Render the route comparison report.
pub fn export_report(
    origin: &str,
    destination: &str,
    routes: &[RouteCandidate],
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, origin, destination, routes, generated_at);
    out
}

fn write_report(
    out: &mut String,
    origin: &str,
    destination: &str,
    routes: &[RouteCandidate],
    generated_at: DateTime<Local>,
) -> std::fmt::Result {
    writeln!(out, "🌟 旅游路线规划报告")?;
    writeln!(out, "生成时间: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;
    writeln!(out, "📍 出发地: {origin}")?;
    writeln!(out, "🎯 目的地: {destination}")?;
    writeln!(out)?;
    writeln!(out, "📊 路线方案对比:")?;
    writeln!(out)?;

    for (i, route) in routes.iter().enumerate() {
        writeln!(out, "{}. {} {}", i + 1, route.icon, route.label)?;
        writeln!(out, "   ⏱️ 时间: {}分钟", route.duration_minutes)?;
        writeln!(out, "   📏 距离: {:.1}公里", route.distance_km)?;
        if route.is_free() {
            writeln!(out, "   💰 费用: 免费")?;
        } else {
            writeln!(out, "   💰 费用: ¥{}", route.cost)?;
        }
        writeln!(out, "   📝 路线: {}", route.step_summary)?;
        writeln!(out)?;
    }

    writeln!(out)?;
    write!(out, "📱 由智能旅游路线规划助手生成")
}

/// Download name for a report.
pub fn export_filename(origin: &str, destination: &str, date: NaiveDate) -> String {
    format!(
        "旅游路线规划_{}_{}_{}.txt",
        sanitize(origin),
        sanitize(destination),
        date.format("%Y-%m-%d")
    )
}

/// `Content-Disposition` value carrying `filename` for any browser.
///
/// The plain `filename` parameter gets an ASCII stand-in; the real name
/// travels in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

/// Drop characters that are unsafe in file names on common systems.
fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
