//! AMap Web Service HTTP client.
//!
//! Provides async methods for the geocoding, routing, place-search and IP
//! endpoints, and implements [`MapProvider`] on top of them. Handles key
//! injection, concurrency limiting, and AMap's in-body error statuses.

use std::net::IpAddr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::domain::{ApiKey, Coordinate, PoiCandidate, PoiCategory, RouteOption, TransportMode};
use crate::provider::{GeocodeMatch, IpLocation, MapProvider, ProviderError, Suggestion};

use super::convert::{
    convert_geocodes, convert_ip, convert_paths, convert_pois, convert_tips, convert_transits,
};
use super::error::AmapError;
use super::types::{
    BicyclingResponse, GeocodeResponse, InputTipsResponse, IpResponse, PathResponse,
    PlaceAroundResponse, RegeoResponse, TransitResponse, V3Status,
};

/// Default base URL for the AMap Web Service API.
const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// City used for transit when the endpoints cannot be reverse geocoded.
const DEFAULT_CITY: &str = "北京";

/// Driving strategy that returns up to three alternatives.
const DRIVING_STRATEGY_ALTERNATIVES: &str = "10";

/// Configuration for the AMap client.
#[derive(Debug, Clone)]
pub struct AmapConfig {
    /// Web Service key
    pub api_key: ApiKey,
    /// Base URL for the API (defaults to production AMap)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Transit city when neither endpoint's city can be determined
    pub default_city: String,
}

impl AmapConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            default_city: DEFAULT_CITY.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the fallback transit city.
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }
}

/// AMap Web Service client.
///
/// Uses a semaphore to limit concurrent requests so a multi-mode plan does
/// not trip the per-key QPS limit.
#[derive(Debug, Clone)]
pub struct AmapClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    default_city: String,
    semaphore: Arc<Semaphore>,
}

impl AmapClient {
    /// Create a new AMap client with the given configuration.
    pub fn new(config: AmapConfig) -> Result<Self, AmapError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            default_city: config.default_city,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Forward geocode an address.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<GeocodeMatch>, AmapError> {
        let resp: GeocodeResponse = self
            .get_json("/v3/geocode/geo", &[("address", address.to_string())])
            .await?;
        check_v3(&resp.status)?;
        Ok(convert_geocodes(&resp.geocodes))
    }

    /// Reverse geocode a point.
    pub async fn regeo(&self, coordinate: Coordinate) -> Result<RegeoResponse, AmapError> {
        let resp: RegeoResponse = self
            .get_json("/v3/geocode/regeo", &[("location", coordinate.to_string())])
            .await?;
        check_v3(&resp.status)?;
        Ok(resp)
    }

    /// Driving alternatives.
    pub async fn driving(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteOption>, AmapError> {
        let resp: PathResponse = self
            .get_json(
                "/v3/direction/driving",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("strategy", DRIVING_STRATEGY_ALTERNATIVES.to_string()),
                    ("extensions", "base".to_string()),
                ],
            )
            .await?;
        check_v3(&resp.status)?;
        Ok(resp
            .route
            .map(|route| convert_paths(&route.paths))
            .unwrap_or_default())
    }

    /// Walking route.
    pub async fn walking(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteOption>, AmapError> {
        let resp: PathResponse = self
            .get_json(
                "/v3/direction/walking",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                ],
            )
            .await?;
        check_v3(&resp.status)?;
        Ok(resp
            .route
            .map(|route| convert_paths(&route.paths))
            .unwrap_or_default())
    }

    /// Public transport plans.
    ///
    /// AMap needs the city of each endpoint; they are looked up by reverse
    /// geocoding, falling back to the configured default city.
    pub async fn transit(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteOption>, AmapError> {
        let (city, cityd) = tokio::join!(self.city_code(origin), self.city_code(destination));
        let city = city.unwrap_or_else(|| self.default_city.clone());
        let cityd = cityd.unwrap_or_else(|| city.clone());
        trace!(%city, %cityd, "transit cities");

        let resp: TransitResponse = self
            .get_json(
                "/v3/direction/transit/integrated",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("city", city),
                    ("cityd", cityd),
                ],
            )
            .await?;
        check_v3(&resp.status)?;
        Ok(resp
            .route
            .map(|route| convert_transits(&route.transits))
            .unwrap_or_default())
    }

    /// Cycling route (v4 API).
    pub async fn bicycling(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteOption>, AmapError> {
        let resp: BicyclingResponse = self
            .get_json(
                "/v4/direction/bicycling",
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                ],
            )
            .await?;

        let errcode = resp.errcode.unwrap_or(0.0);
        if errcode != 0.0 {
            let message = resp.errdetail.or(resp.errmsg).unwrap_or_default();
            return Err(AmapError::from_infocode(format!("{errcode}"), message));
        }
        Ok(resp
            .data
            .map(|data| convert_paths(&data.paths))
            .unwrap_or_default())
    }

    /// Places matching `keywords` around `center`, nearest first.
    pub async fn place_around(
        &self,
        center: Coordinate,
        keywords: &str,
        radius_m: u32,
        limit: u32,
        category: PoiCategory,
    ) -> Result<Vec<PoiCandidate>, AmapError> {
        let resp: PlaceAroundResponse = self
            .get_json(
                "/v3/place/around",
                &[
                    ("location", center.to_string()),
                    ("keywords", keywords.to_string()),
                    ("radius", radius_m.to_string()),
                    ("offset", limit.to_string()),
                    ("page", "1".to_string()),
                    ("sortrule", "distance".to_string()),
                    ("extensions", "base".to_string()),
                ],
            )
            .await?;
        check_v3(&resp.status)?;
        Ok(convert_pois(&resp.pois, category))
    }

    /// Input suggestions for a partial query.
    pub async fn input_tips(&self, query: &str) -> Result<Vec<Suggestion>, AmapError> {
        let resp: InputTipsResponse = self
            .get_json(
                "/v3/assistant/inputtips",
                &[
                    ("keywords", query.to_string()),
                    ("datatype", "all".to_string()),
                ],
            )
            .await?;
        check_v3(&resp.status)?;
        Ok(convert_tips(&resp.tips))
    }

    /// City of an IP address, or of the caller when `ip` is `None`.
    pub async fn ip_location(&self, ip: Option<IpAddr>) -> Result<Option<IpLocation>, AmapError> {
        let params: Vec<(&str, String)> = ip.map(|ip| ("ip", ip.to_string())).into_iter().collect();
        let resp: IpResponse = self.get_json("/v3/ip", &params).await?;
        check_v3(&resp.status)?;
        Ok(convert_ip(
            resp.province.as_deref(),
            resp.city.as_deref(),
            resp.rectangle.as_deref(),
        ))
    }

    /// City code of a point, `None` when it cannot be determined.
    async fn city_code(&self, coordinate: Coordinate) -> Option<String> {
        match self.regeo(coordinate).await {
            Ok(resp) => resp
                .regeocode
                .and_then(|r| r.address_component)
                .and_then(|c| c.citycode),
            Err(e) => {
                debug!(%coordinate, error = %e, "city lookup failed");
                None
            }
        }
    }

    /// GET `path` with the key appended and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AmapError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AmapError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        trace!(%url, "AMap request");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.expose())])
            .query(&[("output", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AmapError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AmapError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmapError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AmapError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Turn a v3 `status: "0"` into an error.
fn check_v3(status: &V3Status) -> Result<(), AmapError> {
    if status.is_ok() {
        return Ok(());
    }
    Err(AmapError::from_infocode(
        status.infocode.clone().unwrap_or_default(),
        status.info.clone().unwrap_or_else(|| "unknown error".to_string()),
    ))
}

impl MapProvider for AmapClient {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, ProviderError> {
        Ok(self.geocode_address(address).await?)
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>, ProviderError> {
        let resp = self.regeo(coordinate).await?;
        Ok(resp.regeocode.and_then(|r| r.formatted_address))
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<Vec<RouteOption>, ProviderError> {
        let options = match mode {
            TransportMode::Driving => self.driving(origin, destination).await?,
            TransportMode::Walking => self.walking(origin, destination).await?,
            TransportMode::Transit => self.transit(origin, destination).await?,
            TransportMode::Riding => self.bicycling(origin, destination).await?,
        };
        Ok(options)
    }

    async fn nearby_search(
        &self,
        center: Coordinate,
        category: PoiCategory,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PoiCandidate>, ProviderError> {
        Ok(self
            .place_around(center, category.search_keywords(), radius_m, limit, category)
            .await?)
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
        Ok(self.input_tips(query).await?)
    }

    async fn locate_ip(&self, ip: Option<IpAddr>) -> Result<Option<IpLocation>, ProviderError> {
        Ok(self.ip_location(ip).await?)
    }
}
