//! Klaxon — store adapters.
//!
//! PostgreSQL implementations of the write and read-store ports, plus
//! in-memory equivalents for the `in-memory` driver. Each adapter owns its
//! own connections; no transaction ever spans store boundaries.

pub mod in_memory;
pub mod pg_document_view;
pub mod pg_materialized_view;
pub mod pg_write;

pub use in_memory::{InMemoryCreateAlarmRepository, InMemoryMaterializedAlarmRepository};
pub use pg_document_view::PgDocumentAlarmRepository;
pub use pg_materialized_view::PgMaterializedAlarmRepository;
pub use pg_write::PgCreateAlarmRepository;
