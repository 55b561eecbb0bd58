//! The [`GNews`] client.
//!
//! `GNews` owns the configuration (locale, period, exclusion list), the
//! compiled [`WebsiteFilter`], and the transport. Each query reads the
//! configuration once when it starts; setters take `&mut self`, so a query in
//! flight always sees a consistent snapshot and changes apply to the next
//! query only.
//!
//! Query operations never fail. Invalid input (unknown topic, empty location
//! or search term) and fetch failures are logged and produce an empty list.
//!
//! # Known limitation
//!
//! `max_results` is stored and reported but not applied: every entry the
//! feed returns that passes the exclusion filter is kept.

use itertools::Itertools;
use std::collections::BTreeSet;
use tracing::{debug, error, info, instrument, warn};

use crate::article;
use crate::config::GNewsConfig;
use crate::error::GNewsError;
use crate::feed;
use crate::filter::WebsiteFilter;
use crate::locale::{self, resolve_country, resolve_language};
use crate::models::{Article, NewsRecord};
use crate::normalize::normalize;
use crate::query::{Query, Topic, build_url};
use crate::transport::{FeedTransport, HttpTransport, RetryTransport};

/// Transport used by [`GNews::new`] and [`GNewsBuilder::build`].
pub type DefaultTransport = RetryTransport<HttpTransport>;

/// News feed client.
#[derive(Debug)]
pub struct GNews<T = DefaultTransport> {
    config: GNewsConfig,
    filter: WebsiteFilter,
    transport: T,
}

impl GNews {
    /// Client with default settings (`en`, `US`, no period, no exclusions).
    pub fn new() -> Result<Self, GNewsError> {
        GNews::builder().build()
    }

    /// Start a [`GNewsBuilder`] from the default configuration.
    pub fn builder() -> GNewsBuilder {
        GNewsBuilder::default()
    }

    /// Client from a loaded configuration.
    pub fn from_config(config: GNewsConfig) -> Result<Self, GNewsError> {
        GNewsBuilder::from(config).build()
    }
}

impl<T: FeedTransport> GNews<T> {
    /// Language code sent as `hl` (for example `en`, `es-419`).
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Country code sent as `gl` (for example `US`).
    pub fn country(&self) -> &str {
        &self.config.country
    }

    /// Advisory result limit; see the module docs.
    pub fn max_results(&self) -> usize {
        self.config.max_results
    }

    /// Recency window such as `7d` or `12h`, if one is set.
    pub fn period(&self) -> Option<&str> {
        self.config.period.as_deref()
    }

    /// Excluded publisher hosts, as given.
    pub fn exclude_websites(&self) -> &[String] {
        self.filter.hosts()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set the language by code or name; unknown values are kept as given.
    pub fn set_language(&mut self, language: &str) {
        self.config.language = resolve_language(language);
        if !locale::is_known_language(&self.config.language) {
            debug!(language = %self.config.language, "Unknown language; using it as given");
        }
    }

    /// Set the country by code or name; unknown values are kept as given.
    pub fn set_country(&mut self, country: &str) {
        self.config.country = resolve_country(country);
        if !locale::is_known_country(&self.config.country) {
            debug!(country = %self.config.country, "Unknown country; using it as given");
        }
    }

    /// Store a new advisory limit. Results are not truncated to it.
    pub fn set_max_results(&mut self, max_results: usize) {
        self.config.max_results = max_results;
    }

    /// Set or clear the recency window.
    ///
    /// # Arguments
    ///
    /// * `period` - Window such as `7d`; `None` or a blank value clears it
    pub fn set_period(&mut self, period: Option<&str>) {
        self.config.period = period
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
    }

    /// Replace the exclusion list. On error the previous list stays active.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Publisher host names such as `cnn.com`; blank entries are skipped
    ///
    /// # Returns
    ///
    /// [`GNewsError::Pattern`] if a pattern fails to compile.
    pub fn set_exclude_websites<I, S>(&mut self, hosts: I) -> Result<(), GNewsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filter = WebsiteFilter::new(hosts)?;
        self.config.exclude_websites = filter.hosts().to_vec();
        self.filter = filter;
        Ok(())
    }

    /// Canonical language codes the client knows names for.
    pub fn available_languages(&self) -> &'static BTreeSet<&'static str> {
        locale::available_languages()
    }

    pub fn available_countries(&self) -> &'static BTreeSet<&'static str> {
        locale::available_countries()
    }

    /// Request URL for `query` under the current configuration.
    pub fn request_url(&self, query: &Query<'_>) -> String {
        build_url(
            query,
            &self.config.language,
            &self.config.country,
            self.config.period.as_deref(),
        )
    }

    /// Articles matching a free-text search term.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, term: &str) -> Vec<NewsRecord> {
        let term = term.trim();
        if term.is_empty() {
            warn!("Enter a non-empty search term.");
            return Vec::new();
        }
        let url = self.request_url(&Query::Search(term));
        self.get_news(&url).await
    }

    /// Current top headlines for the configured locale.
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(&self) -> Vec<NewsRecord> {
        let url = self.request_url(&Query::TopHeadlines);
        self.get_news(&url).await
    }

    /// Headlines for a section topic, matched case-insensitively.
    #[instrument(level = "info", skip(self))]
    pub async fn by_topic(&self, topic: &str) -> Vec<NewsRecord> {
        match topic.parse::<Topic>() {
            Ok(topic) => {
                let url = self.request_url(&Query::Topic(topic));
                self.get_news(&url).await
            }
            Err(_) => {
                info!(
                    "Invalid topic. Available topics are: {}.",
                    Topic::ALL.iter().join(", ")
                );
                Vec::new()
            }
        }
    }

    /// Headlines for a geographic location (city, region, country name).
    #[instrument(level = "info", skip(self))]
    pub async fn by_location(&self, location: &str) -> Vec<NewsRecord> {
        let location = location.trim();
        if location.is_empty() {
            warn!("Enter a valid location.");
            return Vec::new();
        }
        let url = self.request_url(&Query::Location(location));
        self.get_news(&url).await
    }

    /// Download and extract the article at `url`.
    ///
    /// Failures, including a build without the `article` feature, are
    /// logged and reported as `None`.
    #[instrument(level = "info", skip(self))]
    pub async fn full_article(&self, url: &str) -> Option<Article> {
        match article::download(&self.transport, url, &self.config.language).await {
            Ok(article) => Some(article),
            Err(e) => {
                error!(%url, error = %e, "Could not download full article");
                None
            }
        }
    }

    async fn get_news(&self, url: &str) -> Vec<NewsRecord> {
        let pairs = match feed::fetch(&self.transport, url).await {
            Ok(pairs) => pairs,
            Err(e) => {
                error!(%url, error = %e, "Feed fetch failed; returning no results");
                return Vec::new();
            }
        };

        let total = pairs.len();
        let records: Vec<NewsRecord> = pairs
            .into_iter()
            .filter(|(_, resolved)| self.filter.is_allowed(resolved))
            .map(|(entry, resolved)| normalize(&entry, &resolved))
            .collect();

        info!(
            total,
            kept = records.len(),
            excluded = total - records.len(),
            "Collected news records"
        );
        records
    }
}

/// Builder for [`GNews`].
///
/// ```
/// let client = gnews::GNews::builder()
///     .language("german")
///     .country("Germany")
///     .period("7d")
///     .exclude_websites(["example.com"])
///     .build()
///     .unwrap();
/// assert_eq!(client.language(), "de");
/// assert_eq!(client.country(), "DE");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GNewsBuilder {
    config: GNewsConfig,
}

impl From<GNewsConfig> for GNewsBuilder {
    fn from(config: GNewsConfig) -> Self {
        Self { config }
    }
}

impl GNewsBuilder {
    /// Language code or name; names are resolved when the client is built.
    pub fn language(mut self, language: &str) -> Self {
        self.config.language = language.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.config.country = country.to_string();
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Recency window such as `7d`. Surrounding whitespace is dropped and a
    /// blank value means no window.
    pub fn period(mut self, period: &str) -> Self {
        self.config.period = Some(period.trim().to_string()).filter(|p| !p.is_empty());
        self
    }

    pub fn exclude_websites<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.exclude_websites = hosts.into_iter().map(|h| h.as_ref().to_string()).collect();
        self
    }

    /// Per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Build a client backed by HTTP with timeouts and bounded retries.
    pub fn build(self) -> Result<GNews, GNewsError> {
        let http = HttpTransport::new(self.config.timeout(), self.config.max_redirects)?;
        let transport = RetryTransport::new(
            http,
            self.config.max_retries,
            self.config.retry_base_delay(),
        );
        self.build_with_transport(transport)
    }

    /// Build a client on top of a caller-supplied transport.
    pub fn build_with_transport<T: FeedTransport>(self, transport: T) -> Result<GNews<T>, GNewsError> {
        let config = self.config.normalized();
        let filter = WebsiteFilter::new(&config.exclude_websites)?;
        Ok(GNews {
            config,
            filter,
            transport,
        })
    }
}
