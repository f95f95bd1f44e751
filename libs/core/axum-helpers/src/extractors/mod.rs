//! Custom extractors whose rejections render as envelopes.

pub mod id_path;
pub mod query_params;
pub mod validated_json;

pub use id_path::IdPath;
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
