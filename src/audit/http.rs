//! HTTP-backed auditor.
//!
//! Fetches the page once, probes the origin's sitemap, and runs the check
//! pipeline over the response. One GET per audit; redirects are followed by
//! the client and checks run against the final URL.

use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::config::MonitorConfig;
use crate::error_handling::InitializationError;

use super::checks::{build_outcome, FetchedPage};
use super::{AuditOutcome, Auditor};

/// Audits pages by fetching them over HTTP.
pub struct HttpAuditor {
    client: Client,
}

impl HttpAuditor {
    /// Builds an auditor with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &MonitorConfig) -> Result<Self, InitializationError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Checks whether the origin's /sitemap.xml answers with a success
    /// status. Any failure counts as "not found" — the sitemap check is a
    /// scoring signal, not a hard requirement.
    async fn probe_sitemap(&self, page_url: &Url) -> bool {
        let Ok(sitemap_url) = page_url.join("/sitemap.xml") else {
            return false;
        };
        match self.client.get(sitemap_url.clone()).send().await {
            Ok(response) => {
                let found = response.status().is_success();
                debug!(
                    "Sitemap probe {} -> {}",
                    sitemap_url,
                    response.status()
                );
                found
            }
            Err(e) => {
                debug!("Sitemap probe {sitemap_url} failed: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl Auditor for HttpAuditor {
    async fn audit(&self, url: &str) -> Result<AuditOutcome> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        let response_time_ms = started.elapsed().as_millis() as u64;

        let sitemap_found = self.probe_sitemap(&final_url).await;

        // All awaits are done; parsing and checks are synchronous from here.
        let page = FetchedPage {
            url: &final_url,
            status,
            headers: &headers,
            body: &body,
            response_time_ms,
            sitemap_found,
        };
        Ok(build_outcome(&page))
    }
}
