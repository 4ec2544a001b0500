//! Custom axum extractors.

mod handler_context;
mod validated_json;

pub use validated_json::ValidatedJson;
