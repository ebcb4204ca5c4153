use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Transport used to retrieve search and detail pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body, failing on non-2xx status
    /// or when `timeout` elapses.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, AppError>;
}

/// reqwest-backed fetcher sending browser-like headers.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, AppError> {
        tracing::debug!("GET {url}");

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "fr-FR,fr;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(url.to_string())
                } else {
                    AppError::Http(e)
                }
            })?;

        if !resp.status().is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory fetcher: serves canned bodies and records every request.
    #[derive(Default)]
    pub struct StaticFetcher {
        pages: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| AppError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }
}
