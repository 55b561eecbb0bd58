//! Publisher exclusion.
//!
//! Each excluded host name becomes a case-insensitive pattern
//! `^http(s)?://(www\.)?<host>.*`. Patterns are compiled once, when the
//! exclusion list is configured, and a URL is allowed only if it matches
//! none of them.

use regex::{Regex, RegexBuilder};

use crate::error::GNewsError;

/// Pattern source for one excluded host. The host is lower-cased and
/// escaped, so `example.com` does not also match `exampleXcom`.
pub fn exclusion_pattern(host: &str) -> String {
    format!(
        r"^http(s)?://(www\.)?{}.*",
        regex::escape(&host.trim().to_lowercase())
    )
}

/// `true` if `url` matches none of `patterns`.
pub fn is_allowed(url: &str, patterns: &[Regex]) -> bool {
    patterns.iter().all(|re| !re.is_match(url))
}

/// Precompiled exclusion list.
#[derive(Debug, Clone, Default)]
pub struct WebsiteFilter {
    hosts: Vec<String>,
    patterns: Vec<Regex>,
}

impl WebsiteFilter {
    /// Compile one pattern per host.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Host names such as `cnn.com`; blank entries are skipped
    ///
    /// # Returns
    ///
    /// The filter, or [`GNewsError::Pattern`] if a pattern does not compile.
    pub fn new<I, S>(hosts: I) -> Result<Self, GNewsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = WebsiteFilter::default();
        for host in hosts {
            let host = host.as_ref();
            if host.trim().is_empty() {
                continue;
            }
            let re = RegexBuilder::new(&exclusion_pattern(host))
                .case_insensitive(true)
                .build()?;
            filter.hosts.push(host.to_string());
            filter.patterns.push(re);
        }
        Ok(filter)
    }

    /// `true` if `url` belongs to none of the excluded hosts.
    pub fn is_allowed(&self, url: &str) -> bool {
        is_allowed(url, &self.patterns)
    }

    /// Host names as configured.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_host_variants_are_rejected() {
        let filter = WebsiteFilter::new(["example.com"]).unwrap();
        for url in [
            "http://example.com/story",
            "https://example.com/story",
            "http://www.example.com/",
            "https://www.example.com/2024/01/01/news.html",
            "HTTPS://WWW.EXAMPLE.COM/upper",
        ] {
            assert!(!filter.is_allowed(url), "{url} should be excluded");
        }
    }

    #[test]
    fn test_unrelated_hosts_are_allowed() {
        let filter = WebsiteFilter::new(["example.com", "news.example.org"]).unwrap();
        assert!(filter.is_allowed("https://www.reuters.com/world/"));
        assert!(filter.is_allowed("https://apnews.com/article/abc"));
        assert!(filter.is_allowed("https://sub.example.com/story"));
    }

    #[test]
    fn test_host_is_case_insensitive() {
        let filter = WebsiteFilter::new(["CNN.com"]).unwrap();
        assert!(!filter.is_allowed("https://www.cnn.com/politics"));
    }

    #[test]
    fn test_dot_is_literal() {
        let filter = WebsiteFilter::new(["bbc.com"]).unwrap();
        assert!(filter.is_allowed("https://bbcxcom.net/"));
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = WebsiteFilter::new(Vec::<String>::new()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.is_allowed("https://anything.example/"));
    }

    #[test]
    fn test_blank_hosts_are_skipped() {
        let filter = WebsiteFilter::new(["", "  ", "foo.com"]).unwrap();
        assert_eq!(filter.hosts(), &["foo.com".to_string()]);
        assert_eq!(filter.patterns().len(), 1);
    }

    #[test]
    fn test_free_function_matches_filter() {
        let filter = WebsiteFilter::new(["foo.com"]).unwrap();
        assert!(!is_allowed("http://foo.com/x", filter.patterns()));
        assert!(is_allowed("http://bar.com/x", filter.patterns()));
        assert!(is_allowed("http://bar.com/x", &[]));
    }
}
