#![deny(missing_docs)]

//! # Apiscout CLI
//!
//! Command line driver for the API exploration core.
//!
//! Supported Commands:
//! - `tags`: List catalog tags with endpoint counts.
//! - `endpoints`: List endpoints, optionally filtered by tag.
//! - `show`: Print one endpoint in full detail.
//! - `url`: Build a request URL from parameter assignments.
//! - `credentials`: Manage the stored token and host.

use apiscout_core::AppResult;
use clap::{Parser, Subcommand};

mod credentials;
mod explore;
mod fetch;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI exploration client")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog tags with endpoint counts.
    Tags(explore::TagsArgs),
    /// List endpoints, optionally filtered by tag.
    Endpoints(explore::EndpointsArgs),
    /// Show one endpoint in full detail.
    Show(explore::ShowArgs),
    /// Build a request URL for an endpoint.
    Url(explore::UrlArgs),
    /// Manage stored credentials.
    Credentials(credentials::CredentialsArgs),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Tags(args) => explore::tags(args),
        Commands::Endpoints(args) => explore::endpoints(args),
        Commands::Show(args) => explore::show(args),
        Commands::Url(args) => explore::url(args),
        Commands::Credentials(args) => credentials::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
