#![deny(missing_docs)]

//! # Apiscout Web
//!
//! The forwarding relay: a same-origin hop that executes upstream HTTP
//! requests on the client's behalf, injecting the authorization and host
//! headers server-side. The relay itself is a plain library type; the Actix
//! routes are a thin surface over it.

/// Relay core: request forwarding and the diagnostic ring buffer.
pub mod relay;

/// HTTP routes over the relay.
pub mod routes;

pub use relay::{Credentials, ForwardRequest, Relay, RelayLog, RelayResponse};
pub use routes::health_check;
