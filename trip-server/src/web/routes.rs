//! HTTP route handlers.

use std::net::IpAddr;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::{
    AddressQuery, Coordinate, DomainError, ModeSelection, SortKey, TransportMode,
};
use crate::geocode::ResolutionFailure;
use crate::planner::{PlanError, PlanRequest};
use crate::plans::{
    PlanStoreError, SavedPlan, content_disposition, export_filename, export_report,
};
use crate::poi::attractions_for;
use crate::provider::{MapProvider, ProviderError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<P: MapProvider>(state: AppState<P>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/geocode", get(geocode::<P>))
        .route("/api/reverse-geocode", get(reverse_geocode::<P>))
        .route("/api/locate/ip", get(locate_ip::<P>))
        .route("/api/autocomplete", get(autocomplete::<P>))
        .route("/api/routes/plan", post(plan_routes::<P>))
        .route("/api/routes/steps", post(route_steps::<P>))
        .route("/api/routes/to-place", post(route_to_place::<P>))
        .route("/api/poi/nearby", get(poi_nearby::<P>))
        .route("/api/poi/attractions", get(poi_attractions))
        .route("/api/plans", get(list_plans::<P>).post(save_plan::<P>))
        .route("/api/plans/export", post(export_plan))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the planning form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::new()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Resolve one address through the fallback chain.
async fn geocode<P: MapProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let address = AddressQuery::parse(&req.address)?;
    let resolution = state
        .planner
        .resolver()
        .resolve_detailed(address.as_str())
        .await?;

    Ok(Json(GeocodeResponse::new(
        address.as_str(),
        resolution,
        req.search_id,
    )))
}

/// Describe a coordinate, falling back to the coordinate text.
async fn reverse_geocode<P: MapProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<ReverseGeocodeRequest>,
) -> Result<Json<ReverseGeocodeResponse>, AppError> {
    let coordinate = Coordinate::new(req.lng, req.lat)?;
    let description = state.location.describe_position(coordinate).await;
    Ok(Json(ReverseGeocodeResponse::new(description, req.search_id)))
}

/// City of an IP address, or of the server when none is given.
async fn locate_ip<P: MapProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<LocateIpRequest>,
) -> Result<Json<LocateIpResponse>, AppError> {
    let ip = req
        .ip
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<IpAddr>().map_err(|_| AppError::BadRequest {
                message: format!("Invalid IP address: {s}"),
            })
        })
        .transpose()?;

    let location = state.location.locate_ip(ip).await;
    Ok(Json(LocateIpResponse::new(location, req.search_id)))
}

/// Input suggestions for a partial address.
async fn autocomplete<P: MapProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<AutocompleteRequest>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let query = req.q.trim();
    let suggestions = if query.is_empty() {
        Vec::new()
    } else {
        state
            .planner
            .resolver()
            .provider()
            .autocomplete(query)
            .await?
    };

    Ok(Json(AutocompleteResponse {
        suggestions,
        search_id: req.search_id,
    }))
}

/// Plan routes for every selected mode and compare them.
async fn plan_routes<P: MapProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanRoutesRequest = parse_body(&body)?;

    // Modes first, so an empty selection never reaches the provider.
    let modes = req
        .modes
        .iter()
        .map(|m| m.parse::<TransportMode>())
        .collect::<Result<Vec<_>, _>>()?;
    let modes = ModeSelection::new(modes)?;

    let origin = AddressQuery::parse(&req.origin)?;
    let destination = AddressQuery::parse(&req.destination)?;
    let sort = req
        .sort
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<SortKey>)
        .transpose()?
        .unwrap_or_default();

    let request = PlanRequest::new(origin, destination, modes).with_sort(sort);
    let plan = state.planner.plan_routes(&request).await?;

    if accepts_html(&headers) {
        let routes_json =
            serde_json::to_string(&plan.candidates).map_err(|e| AppError::Internal {
                message: format!("JSON error: {e}"),
            })?;
        let template = RouteResultsTemplate {
            origin: plan.origin.address.clone(),
            destination: plan.destination.address.clone(),
            routes: plan
                .candidates
                .iter()
                .map(RouteView::from_candidate)
                .collect(),
            failed_modes: plan
                .failed_modes
                .iter()
                .map(|m| m.display_name().to_string())
                .collect(),
            search_id: req.search_id.unwrap_or_default(),
            routes_json,
        };
        render(&template)
    } else {
        Ok(Json(PlanRoutesResponse::new(plan, req.search_id)).into_response())
    }
}

/// Full steps for one route card.
async fn route_steps<P: MapProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: RouteStepsRequest = parse_body(&body)?;
    let mode: TransportMode = req.mode.parse()?;
    let origin = AddressQuery::parse(&req.origin)?;
    let destination = AddressQuery::parse(&req.destination)?;

    let detail = state
        .planner
        .route_steps(&origin, &destination, mode, req.option_index)
        .await?;

    if accepts_html(&headers) {
        render(&RouteStepsTemplate::from_detail(&detail))
    } else {
        Ok(Json(RouteDetailResponse::new(detail, req.search_id)).into_response())
    }
}

/// Driving route from an address to a chosen place.
async fn route_to_place<P: MapProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: RouteToPlaceRequest = parse_body(&body)?;
    let origin = AddressQuery::parse(&req.origin)?;
    let place = Coordinate::new(req.lng, req.lat)?;
    let place_name = req.place_name.trim();
    if place_name.is_empty() {
        return Err(AppError::BadRequest {
            message: "place_name must not be empty".to_string(),
        });
    }

    let detail = state
        .planner
        .route_to_place(&origin, place_name, place)
        .await?;

    if accepts_html(&headers) {
        render(&RouteStepsTemplate::from_detail(&detail))
    } else {
        Ok(Json(RouteDetailResponse::new(detail, req.search_id)).into_response())
    }
}

/// Ranked nearby places around the trip's endpoints.
async fn poi_nearby<P: MapProvider>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(req): Query<PoiRequest>,
) -> Result<Response, AppError> {
    let categories = req.parse_categories()?;
    let origin = non_blank(&req.origin);
    let destination = non_blank(&req.destination);
    if origin.is_none() && destination.is_none() {
        return Err(AppError::BadRequest {
            message: "请先输入出发地或目的地".to_string(),
        });
    }

    let groups = state
        .poi
        .nearby_for_trip(origin, destination, &categories)
        .await;

    if accepts_html(&headers) {
        render(&PoiListTemplate {
            groups: groups.iter().map(PoiGroupView::from_group).collect(),
            message: None,
        })
    } else {
        Ok(Json(PoiResponse {
            groups,
            search_id: req.search_id,
        })
        .into_response())
    }
}

/// Curated attractions for the cities named by the trip's endpoints.
async fn poi_attractions(
    headers: HeaderMap,
    Query(req): Query<PoiRequest>,
) -> Result<Response, AppError> {
    let categories = req.parse_categories()?;
    let found = attractions_for(
        non_blank(&req.origin),
        non_blank(&req.destination),
        &categories,
    );

    match (found, accepts_html(&headers)) {
        (Ok(groups), true) => render(&PoiListTemplate {
            groups: groups.iter().map(PoiGroupView::from_group).collect(),
            message: None,
        }),
        (Ok(groups), false) => Ok(Json(PoiResponse {
            groups,
            search_id: req.search_id,
        })
        .into_response()),
        (Err(miss), true) => render(&PoiListTemplate {
            groups: Vec::new(),
            message: Some(miss.to_string()),
        }),
        (Err(miss), false) => Err(AppError::NotFound {
            message: miss.to_string(),
        }),
    }
}

/// All saved plans.
async fn list_plans<P: MapProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<PlanListResponse>, AppError> {
    let plans = state.plans.list().await?;
    Ok(Json(PlanListResponse { plans }))
}

/// Append a plan to the store.
async fn save_plan<P: MapProvider>(
    State(state): State<AppState<P>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: SavePlanRequest = parse_body(&body)?;
    let plan = SavedPlan::new(
        req.name.as_deref(),
        &req.origin,
        &req.destination,
        req.waypoints,
        req.routes,
        Local::now(),
    );
    let name = plan.name.clone();
    let total = state.plans.save(plan).await?;

    Ok((StatusCode::CREATED, Json(SavePlanResponse { name, total })).into_response())
}

/// Download the route comparison as a text report.
async fn export_plan(body: Bytes) -> Result<Response, AppError> {
    let req: ExportPlanRequest = parse_body(&body)?;
    if req.routes.is_empty() {
        return Err(AppError::BadRequest {
            message: "没有可导出的路线方案".to_string(),
        });
    }

    let now = Local::now();
    let report = export_report(&req.origin, &req.destination, &req.routes, now);
    let filename = export_filename(&req.origin, &req.destination, now.date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        report,
    )
        .into_response())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ResolutionFailure> for AppError {
    fn from(e: ResolutionFailure) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Resolution(failure) => failure.into(),
            PlanError::NoRoute { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream {
            message: format!("地图服务错误: {e}"),
        }
    }
}

impl From<PlanStoreError> for AppError {
    fn from(e: PlanStoreError) -> Self {
        match e {
            PlanStoreError::EmptyPlan => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, reason = %message, "request failed");
        } else {
            warn!(%status, reason = %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
