//! Print a service's OpenAPI document as JSON.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin openapi-dump -- --gateway
//! ```

use std::io::Write;

use cep_weather::{GatewayApiDoc, ResolverApiDoc};
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Print a service's OpenAPI document as JSON")]
struct CliArgs {
    /// Print the gateway document instead of the resolver's.
    #[arg(long)]
    gateway: bool,
}

fn render(args: &CliArgs) -> Result<String> {
    let doc = if args.gateway {
        GatewayApiDoc::openapi()
    } else {
        ResolverApiDoc::openapi()
    };
    doc.to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = render(&CliArgs::parse())?;
    writeln!(std::io::stdout().lock(), "{json}").wrap_err("failed to write document")
}
