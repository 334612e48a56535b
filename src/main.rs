//! Metabuscador CLI - legal meta search server and one-shot client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use metabuscador::{
    config::{parse_sources, ServiceConfig},
    AggregationPolicy, FetcherConfig, SearchRequest, Source,
};

/// Metabuscador - legal meta search over PUCP, UNMSM and PJ/TC sources
#[derive(Parser)]
#[command(name = "metabuscador")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP search service
    Serve(ServeArgs),

    /// Run a single search and print the results
    Search(SearchArgs),

    /// List configured sources and their domains
    Sources,
}

/// Options shared by `serve` and `search`.
#[derive(Args)]
struct UpstreamArgs {
    /// Keep results from healthy sources when one source fails
    #[arg(long)]
    best_effort: bool,

    /// Overall per-request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Connect timeout in seconds
    #[arg(long, default_value = "10")]
    connect_timeout: u64,

    /// Base URL for Google Scholar requests
    #[arg(long, default_value = metabuscador::extractors::DEFAULT_SCHOLAR_BASE)]
    scholar_base: String,

    /// Base URL for Google Web Search requests
    #[arg(long, default_value = metabuscador::extractors::DEFAULT_WEB_BASE)]
    web_base: String,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "METABUSCADOR_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Args)]
struct SearchArgs {
    /// Search term
    term: String,

    /// Sources to query (comma-separated)
    /// Available: pucp, unmsm, pjtc
    #[arg(short, long, value_delimiter = ',')]
    sources: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output, as served by the HTTP endpoint
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Serve(args) => run_server(args).await,
        Commands::Search(args) => run_search(args).await,
        Commands::Sources => list_sources(),
    }
}

fn service_config(args: &UpstreamArgs) -> ServiceConfig {
    let policy = if args.best_effort {
        AggregationPolicy::BestEffort
    } else {
        AggregationPolicy::FailFast
    };
    ServiceConfig {
        scholar_base: args.scholar_base.clone(),
        web_base: args.web_base.clone(),
        ..Default::default()
    }
    .with_policy(policy)
    .with_fetcher(
        FetcherConfig::default()
            .with_timeout(Duration::from_secs(args.timeout))
            .with_connect_timeout(Duration::from_secs(args.connect_timeout)),
    )
}

async fn run_server(args: ServeArgs) -> Result<()> {
    let search = service_config(&args.upstream).build()?;
    metabuscador::server::serve(&args.host, args.port, Arc::new(search)).await
}

fn list_sources() -> Result<()> {
    println!("Available sources:\n");
    for source in Source::ALL {
        println!(
            "  {:<6} ({:?}) {}",
            source.name(),
            source.extractor_kind(),
            source.domains().join(", ")
        );
    }
    println!();
    println!("Usage: metabuscador search \"responsabilidad civil\" -s pucp,pjtc");
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut config = service_config(&args.upstream);
    if let Some(names) = &args.sources {
        config = config.with_sources(parse_sources(names)?);
    }
    let search = config.build()?;

    let response = search.search(&SearchRequest::new(&args.term)).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nResults for \"{}\" ({} results):\n",
                response.term,
                response.results.len()
            );
            for (i, result) in response.results.iter().enumerate() {
                println!("{}. [{}] {}", i + 1, result.source, result.title);
                println!("   URL: {}", result.link);
                if !result.snippet.is_empty() {
                    let snippet: String = result.snippet.chars().take(150).collect();
                    if snippet.len() < result.snippet.len() {
                        println!("   {}...", snippet);
                    } else {
                        println!("   {}", snippet);
                    }
                }
                println!();
            }
            for failure in &response.failed_sources {
                eprintln!("Warning: {} failed: {}", failure.source, failure.reason);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for result in &response.results {
                println!("{}\t{}\t{}", result.source, result.title, result.link);
            }
        }
    }

    Ok(())
}
