#![deny(missing_docs)]

//! # Request URL Builder
//!
//! Substitutes `{param}` placeholders in a path template and appends a
//! percent-encoded query string. A placeholder with no matching entry is
//! left literally in the URL; callers own that contract.

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

/// Characters escaped in a URL component. Alphanumerics and `-_.!~*'()`
/// pass through, matching `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// String form of a parameter value; `None` for null.
fn value_as_component(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Builds the full request URL from a base host, a path template, and
/// parameter assignments.
///
/// Query entries whose value is null or an empty string are omitted
/// entirely; surviving pairs keep the map's iteration order.
pub fn build_request_url(
    base: &str,
    path_template: &str,
    path_params: &IndexMap<String, Value>,
    query_params: &IndexMap<String, Value>,
) -> String {
    let mut url = format!("{}{}", base, path_template);

    for (name, value) in path_params {
        if let Some(text) = value_as_component(value) {
            url = url.replace(&format!("{{{}}}", name), &encode_component(&text));
        }
    }

    let query = query_params
        .iter()
        .filter_map(|(name, value)| {
            let text = value_as_component(value)?;
            if text.is_empty() {
                return None;
            }
            Some(format!(
                "{}={}",
                encode_component(name),
                encode_component(&text)
            ))
        })
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}
