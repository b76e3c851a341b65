#![deny(missing_docs)]

//! # Explore Commands
//!
//! Catalog browsing: tag listing, endpoint listing, endpoint detail, and
//! request URL construction. Display-time sorting (alphabetical tags)
//! happens here, never in the catalog itself.

use crate::fetch::fetch_spec_text;
use apiscout_core::{
    build_request_url, parse_catalog, AppError, AppResult, Catalog, Endpoint, HttpMethod,
};
use indexmap::IndexMap;
use serde_json::Value;

/// Spec source shared by the browsing commands.
#[derive(clap::Args, Debug, Clone)]
pub struct SpecArgs {
    /// URL or file path of the OpenAPI document.
    #[clap(long, env = "APISCOUT_SPEC")]
    pub spec: String,
}

/// Arguments for the tags command.
#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    #[clap(flatten)]
    spec: SpecArgs,
}

/// Arguments for the endpoints command.
#[derive(clap::Args, Debug, Clone)]
pub struct EndpointsArgs {
    #[clap(flatten)]
    spec: SpecArgs,

    /// Only list endpoints carrying this tag.
    #[clap(long)]
    tag: Option<String>,
}

/// Arguments for the show command.
#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    #[clap(flatten)]
    spec: SpecArgs,

    /// Look up by source operation id.
    #[clap(long, conflicts_with_all = ["method", "path"])]
    operation_id: Option<String>,

    /// HTTP verb, paired with --path.
    #[clap(long, requires = "path")]
    method: Option<String>,

    /// Path template, paired with --method.
    #[clap(long, requires = "method")]
    path: Option<String>,
}

/// Arguments for the url command.
#[derive(clap::Args, Debug, Clone)]
pub struct UrlArgs {
    /// Base host, e.g. https://app.example.com/api/admin/v2.
    #[clap(long)]
    base: String,

    /// Path template with {param} placeholders.
    #[clap(long)]
    path: String,

    /// Path parameter assignment, `name=value`. Repeatable.
    #[clap(short = 'p', long = "path-param", value_parser = parse_key_val)]
    path_params: Vec<(String, String)>,

    /// Query parameter assignment, `name=value`. Repeatable.
    #[clap(short = 'q', long = "query", value_parser = parse_key_val)]
    query_params: Vec<(String, String)>,
}

/// Helper to parse "key=value" arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn load_catalog(args: &SpecArgs) -> AppResult<Catalog> {
    let text = fetch_spec_text(&args.spec)?;
    parse_catalog(&text)
}

/// Lists tags alphabetically with their endpoint counts.
pub fn tags(args: &TagsArgs) -> AppResult<()> {
    let catalog = load_catalog(&args.spec)?;

    let mut names: Vec<&str> = catalog.tags().collect();
    names.sort_unstable();
    for name in names {
        println!("{:4}  {}", catalog.endpoints_with_tag(name).count(), name);
    }
    Ok(())
}

/// Lists endpoints in catalog order, optionally filtered by tag.
pub fn endpoints(args: &EndpointsArgs) -> AppResult<()> {
    let catalog = load_catalog(&args.spec)?;

    let rows: Vec<&Endpoint> = match &args.tag {
        Some(tag) => catalog.endpoints_with_tag(tag).collect(),
        None => catalog.endpoints.iter().collect(),
    };
    for endpoint in rows {
        println!(
            "{:<6} {:<40} {}",
            endpoint.method, endpoint.path, endpoint.summary
        );
    }
    Ok(())
}

/// Prints one endpoint in full detail as pretty JSON.
pub fn show(args: &ShowArgs) -> AppResult<()> {
    let catalog = load_catalog(&args.spec)?;
    let endpoint = lookup(&catalog, args)?;

    let detail = serde_json::to_string_pretty(endpoint)
        .map_err(|e| AppError::General(e.to_string()))?;
    println!("{}", detail);
    Ok(())
}

fn lookup<'a>(catalog: &'a Catalog, args: &ShowArgs) -> AppResult<&'a Endpoint> {
    if let Some(operation_id) = &args.operation_id {
        return catalog.find_by_operation_id(operation_id).ok_or_else(|| {
            AppError::General(format!("No endpoint with operation id '{}'", operation_id))
        });
    }
    match (&args.method, &args.path) {
        (Some(method), Some(path)) => {
            let verb = HttpMethod::from_path_item_key(method).ok_or_else(|| {
                AppError::General(format!("Unsupported HTTP method '{}'", method))
            })?;
            catalog.find(verb, path).ok_or_else(|| {
                AppError::General(format!("No endpoint matching {} {}", verb, path))
            })
        }
        _ => Err(AppError::General(
            "Pass --operation-id, or --method together with --path".into(),
        )),
    }
}

/// Builds and prints a request URL.
pub fn url(args: &UrlArgs) -> AppResult<()> {
    println!("{}", build_url_from_args(args));
    Ok(())
}

fn build_url_from_args(args: &UrlArgs) -> String {
    let path_params: IndexMap<String, Value> = args
        .path_params
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();
    let query_params: IndexMap<String, Value> = args
        .query_params
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();

    build_request_url(&args.base, &args.path, &path_params, &query_params)
}
