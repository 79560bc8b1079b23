//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{PoiCandidate, PoiCategory, RouteCandidate, RouteStep, TransportMode};
use crate::planner::RouteDetail;
use crate::poi::PoiGroup;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the planning form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub modes: Vec<ChoiceView>,
    pub categories: Vec<ChoiceView>,
}

impl IndexTemplate {
    pub fn new() -> Self {
        Self {
            modes: TransportMode::ALL
                .iter()
                .map(|m| ChoiceView {
                    value: m.as_str(),
                    label: format!("{} {}", m.icon(), m.display_name()),
                    checked: true,
                })
                .collect(),
            categories: PoiCategory::ALL
                .iter()
                .map(|c| ChoiceView {
                    value: c.as_str(),
                    label: format!("{} {}", c.icon(), c.display_name()),
                    checked: *c == PoiCategory::Tourist,
                })
                .collect(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route comparison fragment.
#[derive(Template)]
#[template(path = "route_results.html")]
pub struct RouteResultsTemplate {
    pub origin: String,
    pub destination: String,
    pub routes: Vec<RouteView>,
    /// Display names of modes that produced nothing
    pub failed_modes: Vec<String>,
    pub search_id: String,
    /// The candidates as JSON, kept by the page for save and export
    pub routes_json: String,
}

impl RouteResultsTemplate {
    /// The first card after sorting, shown as the summary.
    pub fn best(&self) -> Option<&RouteView> {
        self.routes.first()
    }
}

/// Expanded steps of one route.
#[derive(Template)]
#[template(path = "route_steps.html")]
pub struct RouteStepsTemplate {
    pub origin: String,
    pub destination: String,
    pub route: RouteView,
    pub steps: Vec<StepView>,
}

impl RouteStepsTemplate {
    pub fn from_detail(detail: &RouteDetail) -> Self {
        Self {
            origin: detail.origin.address.clone(),
            destination: detail.destination.address.clone(),
            route: RouteView::from_candidate(&detail.candidate),
            steps: detail
                .steps
                .iter()
                .enumerate()
                .map(|(i, s)| StepView::from_step(i, s))
                .collect(),
        }
    }
}

/// Grouped places fragment.
#[derive(Template)]
#[template(path = "poi_list.html")]
pub struct PoiListTemplate {
    pub groups: Vec<PoiGroupView>,
    /// Shown instead of groups when nothing could be listed
    pub message: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A checkbox on the index form.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: String,
    pub checked: bool,
}

/// A route card.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub mode: &'static str,
    pub option_index: usize,
    pub title: String,
    pub minutes: u32,
    /// Kilometres to one decimal, e.g. "12.0"
    pub distance_km: String,
    /// `None` for free routes
    pub cost: Option<String>,
    pub summary: String,
    pub color: String,
}

impl RouteView {
    pub fn from_candidate(candidate: &RouteCandidate) -> Self {
        Self {
            mode: candidate.mode.as_str(),
            option_index: candidate.option_index,
            title: format!("{} {}", candidate.icon, candidate.label),
            minutes: candidate.duration_minutes,
            distance_km: format!("{:.1}", candidate.distance_km),
            cost: (!candidate.is_free()).then(|| format!("¥{}", candidate.cost)),
            summary: candidate.step_summary.clone(),
            color: candidate.rank_color.clone(),
        }
    }

    /// Cost for the summary line.
    pub fn cost_text(&self) -> &str {
        self.cost.as_deref().unwrap_or("免费")
    }
}

/// One numbered instruction.
#[derive(Debug, Clone)]
pub struct StepView {
    pub number: usize,
    pub instruction: String,
    pub line: Option<String>,
    pub distance: String,
    pub duration: String,
}

impl StepView {
    pub fn from_step(index: usize, step: &RouteStep) -> Self {
        Self {
            number: index + 1,
            instruction: step.instruction.clone(),
            line: step.line.clone(),
            distance: format_distance(step.distance_m),
            duration: format_duration(step.duration_secs),
        }
    }
}

/// Places of one category around one location.
#[derive(Debug, Clone)]
pub struct PoiGroupView {
    pub heading: String,
    pub pois: Vec<PoiView>,
}

impl PoiGroupView {
    pub fn from_group(group: &PoiGroup) -> Self {
        Self {
            heading: format!(
                "{} {} · {}",
                group.category.icon(),
                group.label,
                group.category.display_name()
            ),
            pois: group.pois.iter().map(PoiView::from_candidate).collect(),
        }
    }
}

/// A place row.
#[derive(Debug, Clone)]
pub struct PoiView {
    pub name: String,
    pub address: String,
    /// Absent for table entries, which carry no distance
    pub distance: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
}

impl PoiView {
    pub fn from_candidate(poi: &PoiCandidate) -> Self {
        let distance = poi
            .distance_meters
            .filter(|d| *d > 0.0)
            .map(|d| format_distance(d.round() as u32));
        Self {
            name: poi.name.clone(),
            address: poi.address.clone(),
            distance,
            lng: poi.coordinate.map(|c| c.lng()),
            lat: poi.coordinate.map(|c| c.lat()),
        }
    }

    /// Whether a route can be planned to this place.
    pub fn routable(&self) -> bool {
        self.lng.is_some() && self.lat.is_some()
    }
}

/// "850米" below a kilometre, "1.2公里" above.
pub fn format_distance(metres: u32) -> String {
    if metres < 1000 {
        format!("{metres}米")
    } else {
        format!("{:.1}公里", metres as f64 / 1000.0)
    }
}

/// "45秒", "12分钟" or "1小时5分钟".
pub fn format_duration(secs: u32) -> String {
    if secs < 60 {
        return format!("{secs}秒");
    }
    let minutes = (secs as f64 / 60.0).round() as u32;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}分钟"),
        (h, 0) => format!("{h}小时"),
        (h, m) => format!("{h}小时{m}分钟"),
    }
}
