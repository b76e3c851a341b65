#![deny(missing_docs)]

//! # Relay Routes
//!
//! Thin Actix surface over [`Relay`](crate::relay::Relay): one forwarding
//! operation, the diagnostic buffer, and a liveness probe. The relay status
//! is mirrored as the HTTP status of the response.

use crate::relay::{ForwardRequest, Relay, RelayLog, RelayResponse};
use actix_web::http::StatusCode;
use actix_web::{error, get, post, web, HttpRequest, HttpResponse, Responder};

/// Liveness probe.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Executes one forwarded upstream request.
#[post("/api/proxy")]
pub async fn proxy(relay: web::Data<Relay>, payload: web::Json<ForwardRequest>) -> HttpResponse {
    let request = payload.into_inner();
    let relay = relay.clone();

    // The upstream call is blocking; keep it off the async workers.
    let response = web::block(move || relay.forward(&request)).await;
    let response = match response {
        Ok(response) => response,
        Err(e) => RelayResponse::transport_error(&e.to_string()),
    };
    mirror_status(response)
}

/// Returns the relay diagnostic buffer, oldest entry first.
#[get("/api/logs")]
pub async fn relay_logs(log: web::Data<RelayLog>) -> impl Responder {
    HttpResponse::Ok().json(log.snapshot())
}

/// Shapes a malformed `/api/proxy` payload as a relay-style 400 body
/// instead of Actix's plain-text default.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = RelayResponse::client_error(&err.to_string());
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn mirror_status(response: RelayResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response)
}
