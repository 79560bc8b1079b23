//! Saved plans and downloadable reports.

mod export;
mod store;

pub use export::{content_disposition, export_filename, export_report};
pub use store::{PlanStore, PlanStoreConfig, PlanStoreError, SavedPlan, default_plan_name};
