//! Request extractors that reject with [`AppError`](crate::errors::AppError).

pub mod validated_json;

pub use validated_json::ValidatedJson;
