//! Command-line interface definitions.
//!
//! Global options override values from the optional YAML config file. Most
//! options can also come from the environment.

use clap::{Parser, Subcommand};

use gnews::GNewsConfig;

/// Fetch news headlines from the Google News RSS feed.
///
/// # Examples
///
/// ```sh
/// gnews top
/// gnews --language german --country Germany topic business
/// gnews --period 7d --exclude cnn.com,foxnews.com search climate change
/// gnews --output-dir ./news location "New York"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "GNEWS_CONFIG")]
    pub config: Option<String>,

    /// Language code or name (e.g. `en`, `german`)
    #[arg(short, long, env = "GNEWS_LANGUAGE")]
    pub language: Option<String>,

    /// Country code or name (e.g. `US`, `Germany`)
    #[arg(short = 'C', long, env = "GNEWS_COUNTRY")]
    pub country: Option<String>,

    /// Advisory maximum number of results
    #[arg(short, long, env = "GNEWS_MAX_RESULTS")]
    pub max_results: Option<usize>,

    /// Time window such as `1h`, `7d`, `1y`
    #[arg(short, long, env = "GNEWS_PERIOD")]
    pub period: Option<String>,

    /// Comma-separated publisher hosts to exclude
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Also store results as JSON under this directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for a free-text term
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Top headlines for the locale
    Top,
    /// Headlines for a section topic (WORLD, NATION, BUSINESS, ...)
    Topic { topic: String },
    /// Headlines for a geographic location
    Location { location: String },
    /// Download the full article at a URL
    Article { url: String },
}

impl Command {
    /// Label used when storing results.
    pub fn label(&self) -> String {
        match self {
            Command::Search { term } => term.join(" "),
            Command::Top => "top-headlines".to_string(),
            Command::Topic { topic } => topic.clone(),
            Command::Location { location } => location.clone(),
            Command::Article { url } => url.clone(),
        }
    }
}

impl Cli {
    /// Layer command-line overrides on top of `base`.
    pub fn apply_to(&self, mut base: GNewsConfig) -> GNewsConfig {
        if let Some(language) = &self.language {
            base.language = language.clone();
        }
        if let Some(country) = &self.country {
            base.country = country.clone();
        }
        if let Some(max_results) = self.max_results {
            base.max_results = max_results;
        }
        if let Some(period) = &self.period {
            base.period = Some(period.clone());
        }
        if !self.exclude.is_empty() {
            base.exclude_websites = self.exclude.clone();
        }
        base
    }
}
