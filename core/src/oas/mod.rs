#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **resolver**: Recursive `$ref` inlining with cycle protection.
//! - **catalog**: Projection of a resolved document into an endpoint catalog.
//! - **document**: Outer text parsing and the parse → resolve → normalize pipeline.

pub mod catalog;
pub mod document;
pub mod resolver;

pub use catalog::{
    build_catalog, Catalog, Endpoint, EndpointParameter, HttpMethod, ParamLocation,
    RequestBodySchema, UNTAGGED,
};
pub use document::{parse_catalog, parse_spec_text};
pub use resolver::resolve_refs;
