#![deny(missing_docs)]

//! # Apiscout Core
//!
//! Core library for the API exploration client: pure data transformations
//! from OpenAPI document text to a browsable endpoint catalog, plus request
//! URL construction. No I/O lives here.

/// Shared error types.
pub mod error;

/// OpenAPI parsing: reference resolution and catalog normalization.
pub mod oas;

/// Request URL construction.
pub mod request;

pub use error::{AppError, AppResult};
pub use oas::{
    build_catalog, parse_catalog, parse_spec_text, resolve_refs, Catalog, Endpoint,
    EndpointParameter, HttpMethod, ParamLocation, RequestBodySchema, UNTAGGED,
};
pub use request::build_request_url;
