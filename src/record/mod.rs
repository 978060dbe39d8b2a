//! Canonical record model.
//!
//! Providers disagree on field names, types and precision. Adapters translate
//! into [`GeoRecord`]; everything downstream (aggregation, HTTP API, export)
//! only ever sees this shape.

mod types;

pub use types::{GeoRecord, GeoRecordBuilder};
