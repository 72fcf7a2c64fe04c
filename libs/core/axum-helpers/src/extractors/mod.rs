//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with [`crate::AppError`] so malformed input is
//! rendered through the same `{statusCode, message}` body as every other
//! error.

pub mod id_path;
pub mod query;
pub mod validated_json;

pub use id_path::IdPath;
pub use query::ValidQuery;
pub use validated_json::ValidatedJson;
