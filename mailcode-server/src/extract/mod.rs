//! Custom [axum::extract] Extractors.

pub mod json;
