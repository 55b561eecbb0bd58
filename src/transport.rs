//! HTTP access with explicit timeouts and bounded retries.
//!
//! # Architecture
//!
//! - [`FeedTransport`]: the two network operations the pipeline needs
//! - [`HttpTransport`]: `reqwest` implementation with request/connect
//!   timeouts and a capped redirect policy
//! - [`RetryTransport`]: decorator that retries any [`FeedTransport`] with
//!   exponential backoff and jitter
//!
//! # Retry Strategy
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), 30s) + random_jitter(0..250ms)
//! ```

use rand::{Rng, rng};
use reqwest::header::LOCATION;
use reqwest::{Client, redirect};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

use crate::error::GNewsError;

const USER_AGENT: &str = concat!("gnews/", env!("CARGO_PKG_VERSION"));

/// Network operations used by the feed pipeline.
pub trait FeedTransport {
    /// GET `url` and return the response body.
    async fn get(&self, url: &str) -> Result<Vec<u8>, GNewsError>;

    /// HEAD `url`, follow redirects, and return where it ends up.
    async fn resolve(&self, url: &str) -> Result<String, GNewsError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Arguments
    ///
    /// * `timeout` - Total time allowed per request
    /// * `max_redirects` - Redirect hops followed before giving up
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self, GNewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .redirect(redirect::Policy::limited(max_redirects))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedTransport for HttpTransport {
    #[instrument(level = "debug", skip(self))]
    async fn get(&self, url: &str) -> Result<Vec<u8>, GNewsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GNewsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Fetched body");
        Ok(bytes.to_vec())
    }

    /// Resolve `url` to the address it redirects to.
    ///
    /// Redirects are followed up to the configured cap. The terminal
    /// response decides the result:
    ///
    /// - 2xx: its `Location` header if present, otherwise the final URL
    /// - 3xx that was not followed: its `Location` header
    /// - anything else: [`GNewsError::Status`], so 429/5xx are retried
    ///   by [`RetryTransport`]
    #[instrument(level = "debug", skip(self))]
    async fn resolve(&self, url: &str) -> Result<String, GNewsError> {
        let response = self.client.head(url).send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let resolved = match location {
            Some(location) if status.is_success() || status.is_redirection() => location,
            None if status.is_success() => response.url().to_string(),
            _ => {
                return Err(GNewsError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
        };
        debug!(%resolved, "Resolved link");
        Ok(resolved)
    }
}

/// Adds bounded retries with exponential backoff to a [`FeedTransport`].
pub struct RetryTransport<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<T> RetryTransport<T>
where
    T: FeedTransport,
{
    /// Wrap `inner`, retrying transient failures.
    ///
    /// # Arguments
    ///
    /// * `inner` - Transport that performs the requests
    /// * `max_retries` - Extra attempts after the first failure
    /// * `base_delay` - Delay before the first retry, doubled on each further one
    pub fn new(inner: T, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(16) as u32;
        let delay = self
            .base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + Duration::from_millis(jitter_ms)
    }

    async fn with_retries<R, F, Fut>(&self, op: &'static str, url: &str, mut call: F) -> Result<R, GNewsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, GNewsError>>,
    {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries || !is_retryable(&e) {
                        error!(
                            op,
                            url,
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "Giving up"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        op,
                        url,
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "Attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

impl<T> fmt::Debug for RetryTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryTransport")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FeedTransport for RetryTransport<T>
where
    T: FeedTransport,
{
    async fn get(&self, url: &str) -> Result<Vec<u8>, GNewsError> {
        self.with_retries("get", url, move || self.inner.get(url)).await
    }

    async fn resolve(&self, url: &str) -> Result<String, GNewsError> {
        self.with_retries("resolve", url, move || self.inner.resolve(url)).await
    }
}

/// Client errors (4xx) and redirect loops will not change on retry.
fn is_retryable(e: &GNewsError) -> bool {
    match e {
        GNewsError::Status { status, .. } => *status >= 500 || *status == 429,
        GNewsError::Http(e) => !e.is_redirect(),
        _ => false,
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let mock = MockTransport::new()
            .with_body("https://feed.example/rss", "<rss/>")
            .failing_first(2);
        let transport = RetryTransport::new(mock, 3, Duration::from_millis(1));

        let body = transport.get("https://feed.example/rss").await.unwrap();
        assert_eq!(body, b"<rss/>");
        assert_eq!(transport.inner().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let mock = MockTransport::new()
            .with_body("https://feed.example/rss", "<rss/>")
            .failing_first(10);
        let transport = RetryTransport::new(mock, 2, Duration::from_millis(1));

        let result = transport.get("https://feed.example/rss").await;
        assert!(matches!(result, Err(GNewsError::Status { status: 503, .. })));
        assert_eq!(transport.inner().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let transport = RetryTransport::new(MockTransport::new(), 5, Duration::from_millis(1));

        let result = transport.resolve("https://news.google.com/rss/articles/x").await;
        assert!(matches!(result, Err(GNewsError::Status { status: 404, .. })));
        assert_eq!(transport.inner().resolves().len(), 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let transport = RetryTransport::new(MockTransport::new(), 50, Duration::from_secs(1));
        let delay = transport.backoff(40);
        assert!(delay <= Duration::from_secs(30) + Duration::from_millis(250));
        assert!(delay >= Duration::from_secs(30));
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(10), 10).is_ok());
    }

    /// Loopback HTTP/1.1 server. `/hop/N` redirects to `/hop/N-1`, `/hop/0`
    /// redirects to `/publisher/story` (200), `/busy` is 503, `/slow-down`
    /// is 429, anything else 404. Returns the base URL.
    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&head);
                    let mut request_line = head.split_whitespace();
                    let method = request_line.next().unwrap_or("GET").to_string();
                    let path = request_line.next().unwrap_or("/").to_string();
                    let _ = socket.write_all(route(&method, &path).as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}")
    }

    fn route(method: &str, path: &str) -> String {
        const STORY: &str = "<html><body>story</body></html>";
        let (status, location, body) = match path.strip_prefix("/hop/") {
            Some(n) => {
                let n: usize = n.parse().unwrap_or(0);
                let next = if n == 0 {
                    "/publisher/story".to_string()
                } else {
                    format!("/hop/{}", n - 1)
                };
                ("302 Found", Some(next), "")
            }
            None => match path {
                "/publisher/story" => ("200 OK", None, STORY),
                "/busy" => ("503 Service Unavailable", None, ""),
                "/slow-down" => ("429 Too Many Requests", None, ""),
                _ => ("404 Not Found", None, ""),
            },
        };

        let mut response = format!(
            "HTTP/1.1 {status}\r\nConnection: close\r\nContent-Length: {}\r\n",
            body.len()
        );
        if let Some(location) = location {
            response.push_str(&format!("Location: {location}\r\n"));
        }
        response.push_str("\r\n");
        if method != "HEAD" {
            response.push_str(body);
        }
        response
    }

    fn http(max_redirects: usize) -> HttpTransport {
        HttpTransport::new(Duration::from_secs(5), max_redirects).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_follows_redirect_chain_to_publisher() {
        let base = spawn_server().await;
        let resolved = http(10).resolve(&format!("{base}/hop/3")).await.unwrap();
        assert_eq!(resolved, format!("{base}/publisher/story"));
    }

    #[tokio::test]
    async fn test_resolve_gives_up_past_redirect_cap() {
        let base = spawn_server().await;
        let result = http(2).resolve(&format!("{base}/hop/5")).await;
        match result {
            Err(e @ GNewsError::Http(_)) => assert!(!is_retryable(&e)),
            other => panic!("expected redirect error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_non_redirect_keeps_url() {
        let base = spawn_server().await;
        let url = format!("{base}/publisher/story");
        assert_eq!(http(10).resolve(&url).await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_resolve_reports_throttling_and_server_errors() {
        let base = spawn_server().await;
        let transport = http(10);

        let busy = transport.resolve(&format!("{base}/busy")).await.unwrap_err();
        assert!(matches!(busy, GNewsError::Status { status: 503, .. }));
        assert!(is_retryable(&busy));

        let throttled = transport.resolve(&format!("{base}/slow-down")).await.unwrap_err();
        assert!(matches!(throttled, GNewsError::Status { status: 429, .. }));
        assert!(is_retryable(&throttled));
    }

    #[tokio::test]
    async fn test_retry_transport_retries_failed_resolution() {
        let base = spawn_server().await;
        let transport = RetryTransport::new(http(10), 1, Duration::from_millis(1));
        let result = transport.resolve(&format!("{base}/busy")).await;
        assert!(matches!(result, Err(GNewsError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_get_returns_body_and_rejects_errors() {
        let base = spawn_server().await;
        let transport = http(10);

        let body = transport.get(&format!("{base}/hop/1")).await.unwrap();
        assert_eq!(body, b"<html><body>story</body></html>");

        let missing = transport.get(&format!("{base}/missing")).await;
        assert!(matches!(missing, Err(GNewsError::Status { status: 404, .. })));
    }
}
