use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

use crate::error::SampleError;

pub const CLASS_NAMER_URL: &str = "https://www.classnamer.org/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const BODY_PREVIEW_CHARS: usize = 200;

/// Status code and raw body of one response. Dropped once the words are extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_preview(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let trimmed = text.trim();
        if trimmed.chars().count() > BODY_PREVIEW_CHARS {
            let mut preview: String = trimmed.chars().take(BODY_PREVIEW_CHARS).collect();
            preview.push_str("...");
            preview
        } else {
            trimmed.to_string()
        }
    }
}

/// What to do with a response whose status is not 2xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Fail the sample.
    #[default]
    Reject,
    /// Log a warning and parse the body anyway.
    Warn,
}

/// Source of class name pages. One call per sample, possibly from many threads.
pub trait Fetcher: Sync {
    fn fetch(&self) -> Result<RawResponse, SampleError>;
}

pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let url = Url::parse(CLASS_NAMER_URL)
            .with_context(|| format!("Invalid target URL: {}", CLASS_NAMER_URL))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        info!(action = "create", component = "http_fetcher", url = %url, timeout_ms = timeout.as_millis(), "HTTP client ready");
        Ok(Self { client, url })
    }

    pub fn from_client(client: Client, url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid target URL: {}", url))?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self) -> Result<RawResponse, SampleError> {
        let start_time = Instant::now();
        let response = self.client.get(self.url.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        info!(
            action = "fetch",
            component = "http_fetcher",
            status = status,
            bytes = body.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Fetched class name page"
        );
        Ok(RawResponse { status, body })
    }
}

/// Applies `policy` to a response. Non-2xx is always logged.
pub fn check_status(response: RawResponse, policy: StatusPolicy) -> Result<RawResponse, SampleError> {
    if response.is_success() {
        return Ok(response);
    }

    let body = response.body_preview();
    warn!(action = "check", component = "status", status = response.status, body = %body, "Unexpected response status");

    match policy {
        StatusPolicy::Warn => Ok(response),
        StatusPolicy::Reject => Err(SampleError::Status {
            status: response.status,
            body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}/", addr)
    }

    fn local_fetcher(url: &str) -> HttpFetcher {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpFetcher::from_client(client, url).unwrap()
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn default_target_is_classnamer() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        assert_eq!(fetcher.url().as_str(), CLASS_NAMER_URL);
    }

    #[test]
    fn malformed_url_is_rejected() {
        let client = Client::new();
        assert!(HttpFetcher::from_client(client, "not a url").is_err());
    }

    #[test]
    fn fetches_status_and_body_from_server() {
        let url = serve_once("200 OK", "<p id=\"classname\">RedHouseDoor</p>");
        let raw = local_fetcher(&url).fetch().unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.body, b"<p id=\"classname\">RedHouseDoor</p>".to_vec());
    }

    #[test]
    fn non_success_status_is_returned_not_raised() {
        let url = serve_once("503 Service Unavailable", "busy");
        let raw = local_fetcher(&url).fetch().unwrap();
        assert_eq!(raw.status, 503);
        assert!(!raw.is_success());
    }

    #[test]
    fn refused_connection_is_a_network_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = local_fetcher(&format!("http://{}/", addr)).fetch().unwrap_err();
        assert!(matches!(err, SampleError::Network(_) | SampleError::Timeout(_)));
    }

    #[test]
    fn reject_policy_fails_non_success() {
        let err = check_status(response(500, "oops"), StatusPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            SampleError::Status {
                status: 500,
                body: "oops".to_string()
            }
        );
    }

    #[test]
    fn warn_policy_passes_non_success_through() {
        let raw = check_status(response(404, "<p id=\"classname\">A</p>"), StatusPolicy::Warn).unwrap();
        assert_eq!(raw.status, 404);
    }

    #[test]
    fn success_passes_either_policy() {
        assert!(check_status(response(200, "ok"), StatusPolicy::Reject).is_ok());
        assert!(check_status(response(204, ""), StatusPolicy::Warn).is_ok());
    }

    #[test]
    fn long_bodies_are_truncated_in_preview() {
        let long = "x".repeat(BODY_PREVIEW_CHARS + 50);
        let preview = response(500, &long).body_preview();
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }
}
