use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;

use crate::error::NotifyError;

pub const API_KEY_HEADER: &str = "api-key";

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Without an api key no `api-key` header is sent at all.
    pub fn new(
        base_url: String,
        api_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            let mut value = HeaderValue::from_str(api_key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, base_url })
    }

    /// Plain concatenation, the base url is used exactly as configured.
    pub fn url(&self, path: &str) -> Result<Url, NotifyError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| NotifyError::InvalidUrl(raw, e.to_string()))
    }

    pub fn post(&self, path: &str) -> Result<reqwest::RequestBuilder, NotifyError> {
        let url = self.url(path)?;
        log::info!("POST {}", log_target(&url));
        Ok(self.client.post(url))
    }
}

/// Host and path only, userinfo and query stay out of the logs.
fn log_target(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}{}", host, port, url.path()),
        (Some(host), None) => format!("{}{}", host, url.path()),
        (None, _) => url.path().to_string(),
    }
}
