//! Klaxon — axum HTTP adapter and composition root.
//!
//! Routes are thin translators: they build a command or query object and
//! forward it to the `AlarmService`; no domain logic lives here.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod sweep;
