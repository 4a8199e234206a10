extern crate clap;

pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod validation;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches};

use config::SearchProfile;
use domain::description::{DescriptionDocument, UrlRole};
use domain::template::SearchValues;

pub use domain::description::{DescriptionParser, DescriptionSerializer};
pub use domain::template::TemplateResolver;
pub use error::{DescriptionError, DescriptionResult};

pub fn build_cli() -> clap::Command {
    let source = Arg::new("source")
        .value_name("SOURCE")
        .required(true)
        .help("Path or http(s) URL of an OpenSearch description document");

    clap::Command::new("opensearch")
        .about("Inspect OpenSearch description documents and resolve their URL templates")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log recovered defaults and other parse details to stderr"),
        )
        .subcommand(
            clap::Command::new("inspect")
                .about("Parse a description document and print it in canonical form")
                .arg(source.clone())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .value_parser(services::serializers::FORMATS)
                        .default_value("xml")
                        .help("Output format"),
                ),
        )
        .subcommand(
            clap::Command::new("resolve")
                .about("Resolve one endpoint of a description document into a request URL")
                .arg(source)
                .arg(
                    Arg::new("profile")
                        .short('p')
                        .long("profile")
                        .value_name("PROFILE")
                        .help("Path to a YAML search profile"),
                )
                .arg(
                    Arg::new("set")
                        .short('s')
                        .long("set")
                        .value_name("NAME=VALUE")
                        .action(ArgAction::Append)
                        .help("Value for a placeholder, e.g. searchTerms=rust (repeatable)"),
                )
                .arg(
                    Arg::new("role")
                        .short('r')
                        .long("role")
                        .value_name("ROLE")
                        .help("Endpoint role: results, suggestions, self or collection"),
                )
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_name("MIME")
                        .help("Endpoint MIME type, e.g. application/rss+xml"),
                )
                .arg(
                    Arg::new("defaults")
                        .long("defaults")
                        .action(ArgAction::SetTrue)
                        .help("Fill startIndex, startPage, language and encodings with their defaults"),
                )
                .arg(
                    Arg::new("example")
                        .long("example")
                        .action(ArgAction::SetTrue)
                        .help("Start from the document's first example query"),
                ),
        )
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "opensearch_description=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run a parsed command line and return what should be printed
pub async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("inspect", sub)) => inspect(sub).await,
        Some(("resolve", sub)) => resolve(sub).await,
        _ => Err(anyhow!("No subcommand given")),
    }
}

async fn load(matches: &ArgMatches) -> anyhow::Result<DescriptionDocument> {
    let source = matches
        .get_one::<String>("source")
        .ok_or_else(|| anyhow!("No source given"))?;
    services::load_document(source)
        .await
        .with_context(|| format!("Failed to load description document from {}", source))
}

async fn inspect(matches: &ArgMatches) -> anyhow::Result<String> {
    let doc = load(matches).await?;
    let format = matches
        .get_one::<String>("format")
        .map(|f| f.as_str())
        .unwrap_or("xml");
    let serializer =
        services::serializer_for(format).ok_or_else(|| anyhow!("Unknown format: {}", format))?;
    serializer.serialize(&doc)
}

async fn resolve(matches: &ArgMatches) -> anyhow::Result<String> {
    let doc = load(matches).await?;

    let profile = match matches.get_one::<String>("profile") {
        Some(path) => SearchProfile::load(path)
            .with_context(|| format!("Failed to load search profile {}", path))?,
        None => SearchProfile::default(),
    };

    let role = match matches.get_one::<String>("role") {
        Some(role) => UrlRole::parse(role)?,
        None => profile.role()?,
    };
    let mime_type = matches
        .get_one::<String>("type")
        .or(profile.mime_type.as_ref())
        .map(|t| t.as_str());

    let endpoint = doc.find_endpoint(role, mime_type).ok_or_else(|| match mime_type {
        Some(t) => anyhow!("No {} endpoint with type {}", role, t),
        None => anyhow!("No {} endpoint", role),
    })?;

    let mut values = SearchValues::new();
    if matches.get_flag("example") {
        let query = doc
            .example_queries()
            .next()
            .ok_or_else(|| anyhow!("The document has no example query"))?;
        values = SearchValues::from_query(query);
    }
    values = values.overlay(&profile.search_values()?);

    let overrides = matches
        .get_many::<String>("set")
        .unwrap_or_default()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| anyhow!("Expected NAME=VALUE, got {}", pair))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    values = values.overlay(&SearchValues::from_pairs(overrides)?);

    if matches.get_flag("defaults") || profile.use_defaults() {
        values = values.with_endpoint_defaults(endpoint);
    }

    Ok(endpoint.resolve(&values)?)
}
