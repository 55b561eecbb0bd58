//! # gnews
//!
//! Command-line front end for the [`gnews`] library: runs one query against
//! the Google News RSS feed and prints the normalized records as JSON.
//!
//! ## Usage
//!
//! ```sh
//! gnews --language english --country "United States" top
//! gnews --period 7d search climate change
//! RUST_LOG=debug gnews topic technology
//! ```

use clap::Parser;
use gnews::outputs::{JsonStore, NewsStore};
use gnews::utils::ensure_writable_dir;
use gnews::{GNews, GNewsConfig, load_config};
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => GNewsConfig::default(),
    };
    let config = args.apply_to(base);

    if let Some(dir) = &args.output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let client = GNews::from_config(config)?;
    info!(
        language = client.language(),
        country = client.country(),
        period = client.period().unwrap_or("-"),
        excluded = client.exclude_websites().len(),
        "Client ready"
    );

    let news = match &args.command {
        Command::Search { term } => client.search(&term.join(" ")).await,
        Command::Top => client.top_headlines().await,
        Command::Topic { topic } => client.by_topic(topic).await,
        Command::Location { location } => client.by_location(location).await,
        Command::Article { url } => {
            match client.full_article(url).await {
                Some(article) => println!("{}", serde_json::to_string_pretty(&article)?),
                None => warn!(%url, "No article extracted"),
            }
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&news)?);

    if let Some(dir) = &args.output_dir {
        let store = JsonStore::new(dir);
        match store.insert(&args.command.label(), &news).await {
            Ok(count) => info!(count, path = %dir, "Stored news records"),
            Err(e) => error!(path = %dir, error = %e, "Failed to store news records"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        count = news.len(),
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}
