//! Résumé-to-job compatibility scoring and suggestion calibration.
//!
//! The scoring core (`candidate`, `matching`, `qualification`, `scoring`,
//! `calibration`, `structure`) is synchronous and pure; `routes` exposes it
//! over HTTP.

pub mod calibration;
pub mod candidate;
pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod qualification;
pub mod reference;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod structure;

pub use routes::build_router;
pub use state::AppState;
