//! Request URL construction.
//!
//! Every request goes to [`BASE_URL`] plus a mode-specific path and the
//! locale suffix produced by [`locale_suffix`]:
//!
//! | Mode | Path |
//! |------|------|
//! | Top headlines | `?` |
//! | Search | `/search?q=<term>` |
//! | Topic | `/headlines/section/topic/<TOPIC>?` |
//! | Location | `/headlines/section/geo/<location>?` |

use std::fmt;
use std::str::FromStr;

use crate::error::GNewsError;

/// Root of the news feed service.
pub const BASE_URL: &str = "https://news.google.com/rss";

/// Section topics served by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::World,
        Topic::Nation,
        Topic::Business,
        Topic::Technology,
        Topic::Entertainment,
        Topic::Sports,
        Topic::Science,
        Topic::Health,
    ];

    /// Upper-case token used in the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::World => "WORLD",
            Topic::Nation => "NATION",
            Topic::Business => "BUSINESS",
            Topic::Technology => "TECHNOLOGY",
            Topic::Entertainment => "ENTERTAINMENT",
            Topic::Sports => "SPORTS",
            Topic::Science => "SCIENCE",
            Topic::Health => "HEALTH",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = GNewsError;

    /// Case-insensitive: `"technology"` and `"TECHNOLOGY"` parse the same.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| GNewsError::InvalidTopic(s.to_string()))
    }
}

/// What to ask the feed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<'a> {
    TopHeadlines,
    Search(&'a str),
    Topic(Topic),
    Location(&'a str),
}

/// Locale and time-window tail appended to every request.
///
/// With a period the tail starts with `when:<period>`, otherwise with
/// `&ceid=`; in both cases the path before it already ends in `?` or in the
/// search term.
pub fn locale_suffix(language: &str, country: &str, period: Option<&str>) -> String {
    let locale = format!("&ceid={country}:{language}&hl={language}&gl={country}");
    match period {
        Some(p) if !p.is_empty() => format!("when:{p}{locale}"),
        _ => locale,
    }
}

/// Build the full request URL for `query`.
pub fn build_url(query: &Query<'_>, language: &str, country: &str, period: Option<&str>) -> String {
    let suffix = locale_suffix(language, country, period);
    match query {
        Query::TopHeadlines => format!("{BASE_URL}?{suffix}"),
        Query::Search(term) => {
            format!("{BASE_URL}/search?q={}{suffix}", urlencoding::encode(term))
        }
        Query::Topic(topic) => format!("{BASE_URL}/headlines/section/topic/{topic}?{suffix}"),
        Query::Location(location) => format!(
            "{BASE_URL}/headlines/section/geo/{}?{suffix}",
            urlencoding::encode(location)
        ),
    }
}
