//! Tiered address resolution with caching.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{CacheConfig, GeocodeCache};
use crate::domain::Coordinate;
use crate::provider::MapProvider;

use super::keywords::{extract_keywords, preprocess_address, simplify_address};

/// An address that could not be turned into a coordinate.
///
/// Carries the address exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("地址解析失败: {address}，请尝试更简单的地址描述")]
pub struct ResolutionFailure {
    pub address: String,
}

/// Which attempt produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionTier {
    /// Served from the cache without calling the provider.
    Cached,
    /// The address as typed.
    Raw,
    /// After stripping punctuation and whitespace.
    Cleaned,
    /// City plus district keywords, or the leading characters.
    Keywords,
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    pub tier: ResolutionTier,
    /// The provider's normalized address. `None` for cache hits.
    pub formatted_address: Option<String>,
}

/// Resolves addresses through the provider, degrading the text on failure.
///
/// Successful lookups are cached under the exact string the caller passed.
/// Concurrent lookups of the same uncached address each reach the provider.
pub struct GeocodeResolver<P> {
    provider: Arc<P>,
    cache: GeocodeCache,
}

impl<P: MapProvider> GeocodeResolver<P> {
    pub fn new(provider: Arc<P>, config: &CacheConfig) -> Self {
        Self {
            provider,
            cache: GeocodeCache::new(config),
        }
    }

    /// The provider this resolver queries.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// The cache of resolved addresses.
    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    /// Resolve `address` to a coordinate.
    pub async fn resolve(&self, address: &str) -> Result<Coordinate, ResolutionFailure> {
        self.resolve_detailed(address)
            .await
            .map(|resolution| resolution.coordinate)
    }

    /// Resolve `address`, reporting which tier succeeded.
    ///
    /// Tiers run in order: cache, raw text, cleaned text, keywords. A tier
    /// whose text is empty or repeats an earlier attempt is skipped.
    pub async fn resolve_detailed(&self, address: &str) -> Result<Resolution, ResolutionFailure> {
        if let Some(coordinate) = self.cache.get(address).await {
            trace!(address, "geocode cache hit");
            return Ok(Resolution {
                coordinate,
                tier: ResolutionTier::Cached,
                formatted_address: None,
            });
        }

        let cleaned = preprocess_address(address);
        let keywords = extract_keywords(address);
        let attempts = [
            (ResolutionTier::Raw, address.to_string()),
            (ResolutionTier::Cleaned, cleaned),
            (ResolutionTier::Keywords, keywords),
        ];

        let mut tried: Vec<&str> = Vec::with_capacity(attempts.len());
        for (tier, text) in &attempts {
            if text.trim().is_empty() || tried.contains(&text.as_str()) {
                trace!(address, ?tier, "skipping tier");
                continue;
            }
            tried.push(text);

            if let Some((coordinate, formatted)) = self.attempt(text).await {
                debug!(address, attempt = %text, ?tier, %coordinate, "address resolved");
                self.cache.insert(address, coordinate).await;
                return Ok(Resolution {
                    coordinate,
                    tier: *tier,
                    formatted_address: Some(formatted),
                });
            }
            debug!(address, attempt = %text, ?tier, "geocode attempt failed");
        }

        Err(ResolutionFailure {
            address: address.to_string(),
        })
    }

    /// Resolve `address`; on failure retry once with a simplified form.
    ///
    /// The simplified form is the name before a landmark suffix ("…酒店"),
    /// else the city and district, else the leading characters.
    pub async fn resolve_with_simplified(
        &self,
        address: &str,
    ) -> Result<Coordinate, ResolutionFailure> {
        let err = match self.resolve(address).await {
            Ok(coordinate) => return Ok(coordinate),
            Err(err) => err,
        };

        let simplified = simplify_address(address);
        if simplified.is_empty() || simplified == address {
            return Err(err);
        }

        debug!(address, %simplified, "retrying with simplified address");
        self.resolve(&simplified).await.map_err(|_| err)
    }

    /// One provider call. Errors and unusable points count as a miss.
    async fn attempt(&self, text: &str) -> Option<(Coordinate, String)> {
        match self.provider.geocode(text).await {
            Ok(Some(found)) => match Coordinate::new(found.lng, found.lat) {
                Ok(coordinate) => Some((coordinate, found.formatted_address)),
                Err(e) => {
                    debug!(attempt = text, error = %e, "provider returned unusable point");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                debug!(attempt = text, error = %e, "geocode request failed");
                None
            }
        }
    }
}
