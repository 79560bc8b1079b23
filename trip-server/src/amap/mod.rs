//! AMap (Gaode) Web Service client.
//!
//! The concrete [`MapProvider`](crate::provider::MapProvider) binding.
//!
//! Quirks of the API handled here:
//! - Errors arrive with HTTP 200 and `status: "0"` plus an `infocode`; the
//!   v4 cycling endpoint uses `errcode` instead
//! - Numbers are usually strings, and empty fields are `[]`
//! - Coordinates are `"lng,lat"` strings (GCJ-02)
//! - Transit routing needs the city of both endpoints

mod client;
mod convert;
mod error;
pub mod types;

pub use client::{AmapClient, AmapConfig};
pub use convert::parse_lng_lat;
pub use error::AmapError;
