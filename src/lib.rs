//! # gnews
//!
//! Client for the Google News RSS feed. Fetches article metadata by search
//! term, section topic, or location for a chosen language/country edition,
//! resolves aggregator links to publisher URLs, strips HTML from
//! descriptions, and drops articles from excluded publishers.
//!
//! ## Pipeline
//!
//! 1. **Query**: build the request URL from the query mode and locale ([`query`])
//! 2. **Fetch**: download and parse the feed ([`feed`])
//! 3. **Resolve**: follow each aggregator link to the publisher URL ([`feed`])
//! 4. **Filter**: drop excluded publishers ([`filter`])
//! 5. **Normalize**: produce [`NewsRecord`]s ([`normalize`])
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> gnews::Result<()> {
//! let mut client = gnews::GNews::builder()
//!     .language("english")
//!     .country("United Kingdom")
//!     .period("7d")
//!     .exclude_websites(["example.com"])
//!     .build()?;
//!
//! for record in client.by_topic("technology").await {
//!     println!("{} ({})", record.title, record.publisher);
//! }
//!
//! client.set_country("US");
//! let results = client.search("climate change").await;
//! # let _ = results;
//! # Ok(())
//! # }
//! ```

pub mod article;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod gnews;
pub mod locale;
pub mod models;
pub mod normalize;
pub mod outputs;
pub mod query;
pub mod transport;
pub mod utils;

pub use config::{GNewsConfig, load_config};
pub use error::GNewsError;
pub use filter::WebsiteFilter;
pub use gnews::{GNews, GNewsBuilder};
pub use models::{Article, NewsRecord, RawEntry};
pub use query::{Query, Topic};

pub type Result<T> = std::result::Result<T, GNewsError>;
