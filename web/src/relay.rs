#![deny(missing_docs)]

//! # Forwarding Relay
//!
//! Given a method, URL, and credentials, issues the upstream HTTP request
//! with an `Authorization` header carrying the token and a `host` header
//! carrying the configured host, and returns a normalized response
//! descriptor. Every failure mode is returned as data: validation failures
//! are 400-shaped, upstream errors mirror the upstream status, and transport
//! failures become a synthetic 500. [`Relay::forward`] never panics and
//! never returns an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Upstream credentials supplied with each forwarded request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// API token injected as `Authorization: Token <token>`.
    #[serde(default)]
    pub token: String,
    /// Value for the upstream `host` header.
    #[serde(default)]
    pub host: String,
}

/// A forwarding request as posted to `/api/proxy`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForwardRequest {
    /// HTTP verb; defaults to GET when absent.
    #[serde(default)]
    pub method: String,
    /// Fully built upstream URL.
    #[serde(default)]
    pub url: String,
    /// Upstream credentials.
    #[serde(default)]
    pub credentials: Credentials,
    /// JSON body, forwarded only for body-carrying verbs.
    #[serde(default)]
    pub body: Option<Value>,
}

/// Normalized HTTP response descriptor returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Upstream (or synthetic) status code.
    pub status: u16,
    /// Status reason phrase.
    #[serde(rename = "statusText")]
    pub status_text: String,
    /// Body parsed as JSON when possible, else the raw text.
    pub data: Value,
    /// Upstream response headers.
    pub headers: Map<String, Value>,
    /// True whenever `status >= 400`.
    pub error: bool,
}

impl RelayResponse {
    /// 400-shaped response for a request the relay refuses to forward.
    pub fn client_error(message: &str) -> Self {
        Self {
            status: 400,
            status_text: "Bad Request".to_string(),
            data: json!({ "message": message }),
            headers: Map::new(),
            error: true,
        }
    }

    /// Synthetic 500 carrying a transport failure message.
    pub fn transport_error(message: &str) -> Self {
        Self {
            status: 500,
            status_text: "Error".to_string(),
            data: json!({ "message": message }),
            headers: Map::new(),
            error: true,
        }
    }
}

/// One timestamped diagnostic line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// When the line was recorded.
    pub timestamp: DateTime<Utc>,
    /// The line itself.
    pub message: String,
}

/// Entries retained in the ring buffer; oldest are dropped first.
const LOG_CAPACITY: usize = 50;

/// Bounded diagnostic ring buffer, shared by handle between the relay and
/// the log route. Constructed explicitly and injected; there is no ambient
/// global buffer.
#[derive(Debug, Clone, Default)]
pub struct RelayLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl RelayLog {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line, evicting the oldest entry at capacity.
    pub fn push(&self, message: impl Into<String>) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.len() == LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Utc::now(),
            message: message.into(),
        });
    }

    /// Current contents, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

/// Verbs that conventionally carry a request body.
const BODY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

/// The forwarding hop: a configured HTTP agent plus an injected log.
pub struct Relay {
    agent: ureq::Agent,
    log: RelayLog,
}

impl Relay {
    /// Builds a relay around `log`. Upstream HTTP error statuses are
    /// surfaced as data, not as agent errors.
    pub fn new(log: RelayLog) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(30)))
            .build();
        Self {
            agent: config.new_agent(),
            log,
        }
    }

    /// Forwards one request and returns the normalized descriptor.
    pub fn forward(&self, request: &ForwardRequest) -> RelayResponse {
        if request.url.is_empty()
            || request.credentials.token.is_empty()
            || request.credentials.host.is_empty()
        {
            self.log.push("rejected forward: missing url or credentials");
            return RelayResponse::client_error(
                "Missing required parameters: url, credentials.token, credentials.host",
            );
        }

        let method = if request.method.is_empty() {
            "GET".to_string()
        } else {
            request.method.to_uppercase()
        };
        let payload = if BODY_METHODS.contains(&method.as_str()) {
            request.body.as_ref().filter(|body| carries_payload(body))
        } else {
            None
        };

        self.log.push(format!(
            "forwarding {} {} (body: {})",
            method,
            request.url,
            payload.is_some()
        ));

        match self.send(&method, &request.url, &request.credentials, payload) {
            Ok(response) => {
                self.log
                    .push(format!("upstream responded {}", response.status));
                response
            }
            Err(message) => {
                self.log.push(format!("transport failure: {}", message));
                RelayResponse::transport_error(&message)
            }
        }
    }

    fn send(
        &self,
        method: &str,
        url: &str,
        credentials: &Credentials,
        payload: Option<&Value>,
    ) -> Result<RelayResponse, String> {
        let auth = format!("Token {}", credentials.token);

        let result = match method {
            "POST" | "PUT" | "PATCH" => {
                let builder = match method {
                    "POST" => self.agent.post(url),
                    "PUT" => self.agent.put(url),
                    _ => self.agent.patch(url),
                }
                .header("Authorization", auth.as_str())
                .header("host", credentials.host.as_str());
                match payload {
                    // send_json attaches the JSON content type
                    Some(body) => builder.send_json(body),
                    None => builder.send_empty(),
                }
            }
            "DELETE" => self
                .agent
                .delete(url)
                .header("Authorization", auth.as_str())
                .header("host", credentials.host.as_str())
                .call(),
            _ => self
                .agent
                .get(url)
                .header("Authorization", auth.as_str())
                .header("host", credentials.host.as_str())
                .call(),
        };

        let mut response = result.map_err(|e| e.to_string())?;
        normalize_response(&mut response)
    }
}

/// A body worth forwarding: a non-empty mapping or sequence, or any
/// non-null scalar.
fn carries_payload(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn normalize_response(
    response: &mut ureq::http::Response<ureq::Body>,
) -> Result<RelayResponse, String> {
    let status = response.status();

    let mut headers = Map::new();
    for (name, value) in response.headers() {
        if let Ok(text) = value.to_str() {
            headers.insert(name.as_str().to_string(), Value::String(text.to_string()));
        }
    }

    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| e.to_string())?;
    let data = serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok(RelayResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        data,
        headers,
        error: status.as_u16() >= 400,
    })
}
