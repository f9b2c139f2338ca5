//! Blocking HTTP client for the catalog backend.
//!
//! Transport failures are non-fatal by design: callers report them inline
//! and keep whatever was already rendered. A 404 on source/example lookups
//! is an empty availability state, not an error.

use crate::model::{DetailResponse, Example, Native, SourceCode};
use anyhow::{Context, Result};
use std::time::Duration;

pub struct ApiClient {
    base: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        ApiClient {
            base: base.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(10))
                .build(),
        }
    }

    /// Bulk catalog listing, fetched once at startup.
    pub fn natives(&self) -> Result<Vec<Native>> {
        let url = format!("{}/api/natives", self.base);
        self.agent
            .get(&url)
            .call()
            .with_context(|| format!("request failed: {}", url))?
            .into_json()
            .with_context(|| format!("malformed response from {}", url))
    }

    /// Per-id detail enrichment.
    pub fn detail(&self, hash: &str) -> Result<DetailResponse> {
        let url = format!("{}/api/native/{}", self.base, hash);
        self.agent
            .get(&url)
            .call()
            .with_context(|| format!("request failed: {}", url))?
            .into_json()
            .with_context(|| format!("malformed response from {}", url))
    }

    /// Reverse-engineered source attached to a native; `Ok(None)` when the
    /// backend has none recorded.
    pub fn source(&self, hash: &str) -> Result<Option<SourceCode>> {
        let url = format!("{}/api/native/{}/source", self.base, hash);
        match self.agent.get(&url).call() {
            Ok(resp) => Ok(Some(
                resp.into_json()
                    .with_context(|| format!("malformed response from {}", url))?,
            )),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(err).with_context(|| format!("request failed: {}", url)),
        }
    }

    /// Contributed examples for a native; empty when none are recorded.
    pub fn examples(&self, hash: &str) -> Result<Vec<Example>> {
        let url = format!("{}/api/native/{}/example", self.base, hash);
        match self.agent.get(&url).call() {
            Ok(resp) => resp
                .into_json()
                .with_context(|| format!("malformed response from {}", url)),
            Err(ureq::Error::Status(404, _)) => Ok(Vec::new()),
            Err(err) => Err(err).with_context(|| format!("request failed: {}", url)),
        }
    }
}
