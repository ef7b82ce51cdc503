//! Reachability checks for candidate page URLs.

use std::time::Duration;
use tracing::debug;

/// Confirms that a URL answers with a successful status.
///
/// HEAD is tried first; a non-success response (including 405 from servers
/// that reject HEAD outright) is retried once with GET. Both attempts run
/// under one shared deadline, so a slow HEAD eats into the GET's budget.
pub struct Validator {
    client: reqwest::Client,
    skip: bool,
    timeout: Duration,
}

impl Validator {
    pub fn new(client: reqwest::Client, skip: bool, timeout: Duration) -> Self {
        Self {
            client,
            skip,
            timeout,
        }
    }

    /// Returns `true` only if some attempt yields a successful status.
    /// Network errors, timeouts, and non-success final statuses are all
    /// "unreachable", never run-fatal. In skip mode every URL is trusted.
    pub async fn is_reachable(&self, url: &str) -> bool {
        if self.skip {
            return true;
        }
        match tokio::time::timeout(self.timeout, self.check(url)).await {
            Ok(ok) => ok,
            Err(_) => {
                debug!("validation timed out for {url}");
                false
            }
        }
    }

    async fn check(&self, url: &str) -> bool {
        let resp = match self.client.head(url).send().await {
            Ok(resp) => resp,
            Err(_) => return false,
        };
        if resp.status().is_success() {
            return true;
        }
        // HEAD answered but not successfully; one GET retry on the same clock.
        match self.client.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
