//! Klaxon — Alarms bounded context.
//!
//! Write side: aggregate construction and authoritative persistence of
//! alarms. Read side: event-triggered projection of each alarm into
//! independently-stored materialized views, queried through per-store
//! finders.

pub mod application;
pub mod domain;

#[cfg(test)]
pub(crate) mod testing;
