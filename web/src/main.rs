#![deny(missing_docs)]

//! # Apiscout Relay Binary
//!
//! Entry point for the Actix Web forwarding relay.

use actix_web::{web, App, HttpServer};
use apiscout_web::relay::{Relay, RelayLog};
use apiscout_web::routes::{health_check, json_error_handler, proxy, relay_logs};
use std::net::TcpListener;

fn build_server(listener: TcpListener) -> std::io::Result<actix_web::dev::Server> {
    let log = RelayLog::new();
    let relay = web::Data::new(Relay::new(log.clone()));
    let log = web::Data::new(log);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(relay.clone())
            .app_data(log.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(health_check)
            .service(proxy)
            .service(relay_logs)
    })
    .listen(listener)?
    .run())
}

fn resolve_bind_addr() -> String {
    std::env::var("APISCOUT_RELAY_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let bind_addr = resolve_bind_addr();
    let listener = TcpListener::bind(bind_addr)?;
    let server = build_server(listener)?;

    if std::env::var("APISCOUT_RELAY_ONESHOT").is_ok() {
        server.handle().stop(true).await;
    }

    server.await
}
