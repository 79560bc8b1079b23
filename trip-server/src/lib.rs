//! Trip planner server.
//!
//! A web application that answers: "how do I get from here to there, and
//! what is worth seeing on the way?" It geocodes free-text addresses,
//! compares routes across transport modes and suggests places nearby.

pub mod amap;
pub mod cache;
pub mod domain;
pub mod geocode;
pub mod locate;
pub mod planner;
pub mod plans;
pub mod poi;
pub mod provider;
pub mod web;

#[cfg(test)]
mod testing;
