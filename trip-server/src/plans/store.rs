//! File-backed store of saved trip plans.
//!
//! Plans live in a single JSON array. Every save reads the whole file,
//! appends, and replaces it through a temporary sibling, serialised by a
//! mutex so concurrent saves cannot lose each other's writes.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::RouteCandidate;

/// Default location of the plan file.
const DEFAULT_PATH: &str = "saved_plans.json";

/// Errors from reading or writing the plan file.
#[derive(Debug, thiserror::Error)]
pub enum PlanStoreError {
    #[error("plan file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("plan file {path} is not a valid plan list: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("没有可保存的路线方案")]
    EmptyPlan,
}

/// Plan store settings.
#[derive(Debug, Clone)]
pub struct PlanStoreConfig {
    pub path: PathBuf,
}

impl Default for PlanStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
        }
    }
}

impl PlanStoreConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// A saved comparison of routes between two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub name: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub waypoints: Vec<String>,
    pub routes: Vec<RouteCandidate>,
    pub timestamp: DateTime<Local>,
}

impl SavedPlan {
    /// Build a plan stamped `now`. A blank or missing name becomes
    /// `旅行计划_{date}`.
    pub fn new(
        name: Option<&str>,
        origin: &str,
        destination: &str,
        waypoints: Vec<String>,
        routes: Vec<RouteCandidate>,
        now: DateTime<Local>,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_plan_name(now.date_naive()));

        Self {
            name,
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            waypoints,
            routes,
            timestamp: now,
        }
    }
}

/// Name given to a plan saved without one.
pub fn default_plan_name(date: NaiveDate) -> String {
    format!("旅行计划_{}", date.format("%Y-%m-%d"))
}

/// Append-only plan persistence.
pub struct PlanStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PlanStore {
    pub fn new(config: &PlanStoreConfig) -> Self {
        Self {
            path: config.path.clone(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved plans, oldest first. A missing file is an empty list.
    pub async fn list(&self) -> Result<Vec<SavedPlan>, PlanStoreError> {
        let _guard = self.write_lock.lock().await;
        self.read_all().await
    }

    /// Append `plan` and return the number of stored plans.
    ///
    /// A plan without routes is rejected. A corrupt file is reported and
    /// left untouched.
    pub async fn save(&self, plan: SavedPlan) -> Result<usize, PlanStoreError> {
        if plan.routes.is_empty() {
            return Err(PlanStoreError::EmptyPlan);
        }

        let _guard = self.write_lock.lock().await;
        let mut plans = self.read_all().await?;
        let name = plan.name.clone();
        plans.push(plan);

        let json = serde_json::to_vec_pretty(&plans).map_err(|source| PlanStoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        self.write_atomic(&json).await?;

        info!(name, total = plans.len(), path = %self.path.display(), "plan saved");
        Ok(plans.len())
    }

    async fn read_all(&self) -> Result<Vec<SavedPlan>, PlanStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no plan file yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_slice(&bytes).map_err(|source| PlanStoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_atomic(&self, contents: &[u8]) -> Result<(), PlanStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> PlanStoreError {
        PlanStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
