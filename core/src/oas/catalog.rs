#![deny(missing_docs)]

//! # Endpoint Catalog
//!
//! Projects a resolved OpenAPI document into a flat, query-friendly catalog:
//! every (path, method) operation becomes one [`Endpoint`] record with
//! resolved parameter schemas, resolved request-body schema, resolved
//! per-status response schemas, and tag memberships. Tag fan-out is an index
//! of positions over the single canonical endpoint store, so an endpoint with
//! N tags has exactly one record.
//!
//! The catalog is immutable once built; a spec reload replaces it wholesale.

use crate::error::{AppError, AppResult};
use crate::oas::resolver::resolve_refs;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Sentinel tag assigned to operations that declare none.
pub const UNTAGGED: &str = "Other";

/// Supported HTTP verbs. HEAD/OPTIONS/TRACE path-item keys are excluded
/// from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Parses a path-item key, case-insensitively. Non-verb keys (shared
    /// `parameters`, `servers`, vendor extensions) and unsupported verbs
    /// return `None`.
    pub fn from_path_item_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Uppercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Path template segment.
    Path,
    /// Query string entry.
    Query,
    /// Request header.
    Header,
    /// Cookie entry.
    Cookie,
}

impl ParamLocation {
    /// Parses the OpenAPI `in` field.
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// One operation parameter with its resolved schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointParameter {
    /// Parameter name.
    pub name: String,
    /// Wire location.
    pub location: ParamLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Resolved schema.
    pub schema: Value,
    /// Free-text description, empty when absent.
    pub description: String,
}

/// Resolved `application/json` request-body schema plus its required fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodySchema {
    /// Resolved schema.
    pub schema: Value,
    /// Names listed in the schema's `required` array.
    pub required_fields: Vec<String>,
}

/// One normalized HTTP operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Path template with `{param}` placeholders.
    pub path: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Declared summary, else the operation id, else `"METHOD path"`.
    pub summary: String,
    /// Free-text description, empty when absent.
    pub description: String,
    /// Non-empty tag list; defaults to [`UNTAGGED`].
    pub tags: Vec<String>,
    /// Parameters in declared order.
    pub parameters: Vec<EndpointParameter>,
    /// JSON request body, when the operation declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodySchema>,
    /// Status-code string (or wildcard like `"2xx"`, or `"default"`) to
    /// resolved JSON-content schema; null when the response has no JSON body.
    pub responses: IndexMap<String, Value>,
    /// Operation security, inherited from the document root when absent.
    pub security: Vec<Value>,
    /// Source operation id passthrough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// The normalized catalog: read-only input to presentation and execution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Document `info` object, null when absent.
    pub info: Value,
    /// Document `servers` list.
    pub servers: Vec<Value>,
    /// `components.securitySchemes`, empty object when absent.
    pub security_schemes: Value,
    /// Canonical endpoint store in document encounter order.
    pub endpoints: Vec<Endpoint>,
    /// Tag → endpoint positions in [`Catalog::endpoints`], each list in
    /// global encounter order.
    pub endpoints_by_tag: IndexMap<String, Vec<usize>>,
}

impl Catalog {
    /// Tag names in first-encounter order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.endpoints_by_tag.keys().map(String::as_str)
    }

    /// Endpoints carrying `tag`, in global encounter order.
    pub fn endpoints_with_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a Endpoint> {
        self.endpoints_by_tag
            .get(tag)
            .into_iter()
            .flatten()
            .filter_map(move |&index| self.endpoints.get(index))
    }

    /// Looks up an endpoint by its source operation id.
    pub fn find_by_operation_id(&self, operation_id: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.operation_id.as_deref() == Some(operation_id))
    }

    /// Looks up an endpoint by verb and path template.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.method == method && endpoint.path == path)
    }
}

/// Normalizes a resolved OpenAPI document into a [`Catalog`].
///
/// The input is expected to have passed through
/// [`resolve_refs`](crate::oas::resolver::resolve_refs); references that
/// surface inside parameter, request-body, and response schemas are resolved
/// again here against the document, so the final endpoint schemas carry no
/// unresolved markers for resolvable paths.
///
/// A document that is not a mapping, or whose `paths` value is present but
/// not a mapping, is rejected. A missing or empty `paths` object is valid
/// and yields an empty catalog.
pub fn build_catalog(resolved: &Value) -> AppResult<Catalog> {
    let doc = resolved
        .as_object()
        .ok_or_else(|| AppError::InvalidDocument("OpenAPI document must be a mapping".into()))?;

    let root_security = doc
        .get("security")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut endpoints: Vec<Endpoint> = Vec::new();
    let mut endpoints_by_tag: IndexMap<String, Vec<usize>> = IndexMap::new();

    if let Some(paths_value) = doc.get("paths") {
        let paths = paths_value
            .as_object()
            .ok_or_else(|| AppError::InvalidDocument("'paths' must be a mapping".into()))?;

        for (path, path_item) in paths {
            let Some(operations) = path_item.as_object() else {
                continue;
            };
            for (key, operation) in operations {
                let Some(method) = HttpMethod::from_path_item_key(key) else {
                    continue;
                };
                let endpoint = build_endpoint(path, method, operation, &root_security, resolved);
                let index = endpoints.len();
                for tag in &endpoint.tags {
                    endpoints_by_tag.entry(tag.clone()).or_default().push(index);
                }
                endpoints.push(endpoint);
            }
        }
    }

    Ok(Catalog {
        info: doc.get("info").cloned().unwrap_or(Value::Null),
        servers: doc
            .get("servers")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        security_schemes: doc
            .get("components")
            .and_then(|components| components.get("securitySchemes"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new())),
        endpoints,
        endpoints_by_tag,
    })
}

fn build_endpoint(
    path: &str,
    method: HttpMethod,
    operation: &Value,
    root_security: &[Value],
    root: &Value,
) -> Endpoint {
    let operation_id = operation
        .get("operationId")
        .and_then(Value::as_str)
        .map(str::to_string);

    let summary = operation
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| operation_id.clone())
        .unwrap_or_else(|| format!("{} {}", method, path));

    let description = operation
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|tags| !tags.is_empty())
        .unwrap_or_else(|| vec![UNTAGGED.to_string()]);

    let security = operation
        .get("security")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_else(|| root_security.to_vec());

    Endpoint {
        path: path.to_string(),
        method,
        summary,
        description,
        tags,
        parameters: collect_parameters(operation, root),
        request_body: extract_request_body(operation, root),
        responses: collect_responses(operation, root),
        security,
        operation_id,
    }
}

fn collect_parameters(operation: &Value, root: &Value) -> Vec<EndpointParameter> {
    let Some(parameters) = operation.get("parameters").and_then(Value::as_array) else {
        return Vec::new();
    };
    parameters
        .iter()
        .filter_map(|parameter| parse_parameter(parameter, root))
        .collect()
}

fn parse_parameter(parameter: &Value, root: &Value) -> Option<EndpointParameter> {
    let name = parameter.get("name")?.as_str()?.to_string();
    let location = ParamLocation::from_field(parameter.get("in")?.as_str()?)?;
    let required = parameter
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let description = parameter
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    // The schema may itself still be a reference at this level.
    let schema = parameter
        .get("schema")
        .map(|schema| resolve_refs(schema, root))
        .unwrap_or_else(|| json!({ "type": "string" }));

    Some(EndpointParameter {
        name,
        location,
        required,
        schema,
        description,
    })
}

fn extract_request_body(operation: &Value, root: &Value) -> Option<RequestBodySchema> {
    let schema_node = operation
        .get("requestBody")?
        .get("content")?
        .get("application/json")?
        .get("schema")?;
    let schema = resolve_refs(schema_node, root);
    let required_fields = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|required| {
            required
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(RequestBodySchema {
        schema,
        required_fields,
    })
}

fn collect_responses(operation: &Value, root: &Value) -> IndexMap<String, Value> {
    let mut out = IndexMap::new();
    let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
        return out;
    };
    for (status, response) in responses {
        let schema = response
            .get("content")
            .and_then(|content| content.get("application/json"))
            .and_then(|media| media.get("schema"))
            .map(|schema| resolve_refs(schema, root))
            .unwrap_or(Value::Null);
        out.insert(status.clone(), schema);
    }
    out
}
