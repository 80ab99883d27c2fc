use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::Result;

/// Seam between the batch machinery and the network.
///
/// The production implementation speaks HTTP; tests substitute
/// instrumented fakes (scripted latency, scripted failures, call
/// counters) so batch behavior is verifiable without a network.
///
/// THREAD SAFETY:
/// - Must be Send + Sync; one instance is shared across all tasks
///   of a batch.
#[async_trait::async_trait]
pub trait SymbolSource: Send + Sync {
    /// Fetches one listing document.
    ///
    /// Any failure (connect, status, body) is an ordinary error here;
    /// the task boundary converts it into `ExecutionFailure`. This
    /// function must never panic on malformed input.
    async fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// HTTP source backed by a shared `reqwest` client.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Builds the shared client once per downloader.
    ///
    /// The connect timeout here is a transport-level floor; the real
    /// bound on a slow source is the pool's per-task deadline.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl SymbolSource for HttpSource {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
