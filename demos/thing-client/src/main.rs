//! Thing Client Demo
//!
//! Consumes a Thing Description and talks to the device it describes.
//!
//! # Usage
//!
//! ```bash
//! # Read a property
//! cargo run --package thing-client -- http://192.168.0.10/counter --property count
//!
//! # Write a property of a thing described by a local file
//! cargo run --package thing-client -- ./lamp.json --property level --set 5
//!
//! # Invoke an action
//! cargo run --package thing-client -- http://192.168.0.10/counter --action increment
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use tracing::info;
use url::Url;
use wot::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "thing-client")]
#[command(about = "Consume a thing and read, write or invoke one of its interactions")]
struct Cli {
    /// Description URI, or a path to a local description file.
    description: String,
    /// Configuration file; searched for as `wot.toml` when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Property to read, or to write with `--set`.
    #[arg(long, conflicts_with = "action")]
    property: Option<String>,
    /// JSON value to write to `--property`.
    #[arg(long, requires = "property")]
    set: Option<String>,
    /// Action to invoke.
    #[arg(long)]
    action: Option<String>,
    /// JSON parameter for `--action`.
    #[arg(long, requires = "action")]
    param: Option<String>,
}

/// Accepts URIs as given and turns local paths into `file://` URLs.
fn description_uri(input: &str) -> Result<String> {
    if Url::parse(input).is_ok_and(|url| url.scheme().len() > 1) {
        return Ok(input.to_string());
    }
    let path = Path::new(input)
        .canonicalize()
        .with_context(|| format!("resolving description path {input}"))?;
    Url::from_file_path(&path)
        .map(String::from)
        .map_err(|()| anyhow::anyhow!("cannot express {} as a file URL", path.display()))
}

fn parse_json(raw: &str) -> Result<Content> {
    let value: Value = serde_json::from_str(raw).with_context(|| format!("parsing JSON {raw}"))?;
    Ok(Content::from(value))
}

fn print_content(content: &Content) {
    if content.is_json()
        && let Ok(value) = content.to_json::<Value>()
    {
        println!("{value:#}");
    } else {
        println!("{}", content.text());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = Wot::builder();
    if let Some(config) = &cli.config {
        builder = builder.config_file(config);
    }
    let wot = builder.build()?;

    let uri = description_uri(&cli.description)?;
    let thing = wot
        .consume_description_uri(&uri)
        .await
        .with_context(|| format!("consuming {uri}"))?;
    info!(thing = %thing.name(), "Consumed");

    match (&cli.property, &cli.action) {
        (Some(property), _) => match &cli.set {
            Some(raw) => {
                thing.set_property(property, parse_json(raw)?).await?;
                info!(property = %property, "Property written");
            }
            None => print_content(&thing.get_property(property).await?),
        },
        (None, Some(action)) => {
            let parameter = cli.param.as_deref().map(parse_json).transpose()?;
            print_content(&thing.invoke_action(action, parameter).await?);
        }
        (None, None) => {
            let properties: Vec<_> = thing
                .thing_description()
                .interactions_of(InteractionType::Property)
                .map(|p| p.name.as_str())
                .collect();
            if properties.is_empty() {
                bail!("{} has no properties; pass --action", thing.name());
            }
            println!("{}: {}", thing.name(), properties.join(", "));
        }
    }

    Ok(())
}
