use serde::Deserialize;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// This is the top-level configuration structure loaded from
// `config.json`.
//
// It defines:
// - Pool sizing and per-task deadline
// - HTTP client settings
// - The exchange list the binary fetches by default
//
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Pool and deadline settings
    pub pool: PoolConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Exchange codes the binary fetches; empty means "all supported"
    #[serde(default)]
    pub exchanges: Vec<String>,
}

// ------------------------------------------------------------
// Pool configuration
// ------------------------------------------------------------
//
// Controls the only shared mutable resource of the system.
//
// Notes:
// - `width` is fixed for the pool's lifetime; larger batches queue.
// - `task_deadline_ms` bounds each task, so the worst-case batch
//   time is batch_size x deadline.
//
#[derive(Debug, Deserialize, Clone)]
pub struct PoolConfig {
    /// Number of parallel workers (e.g. 100)
    pub width: usize,

    /// Per-task deadline in milliseconds
    pub task_deadline_ms: u64,

    /// Extra wait the drain loop grants on top of the deadline
    /// before classifying a silent task; default 250ms
    pub drain_grace_ms: Option<u64>,
}

impl PoolConfig {
    pub fn drain_grace_ms(&self) -> u64 {
        self.drain_grace_ms.unwrap_or(250)
    }
}

// ------------------------------------------------------------
// HTTP configuration
// ------------------------------------------------------------
//
// Transport-level settings for the shared client. The per-task
// deadline, not these, is the real bound on a slow source.
//
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    /// User agent sent to listing endpoints
    pub user_agent: Option<String>,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses() {
        let cfg: Config = serde_json::from_str(
            r#"{ "pool": { "width": 100, "task_deadline_ms": 15000 } }"#,
        )
        .unwrap();

        assert_eq!(cfg.pool.width, 100);
        assert_eq!(cfg.pool.drain_grace_ms(), 250);
        assert!(cfg.exchanges.is_empty());
        assert!(cfg.http.user_agent.is_none());
    }

    #[test]
    fn full_config_parses() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "pool": { "width": 8, "task_deadline_ms": 5000, "drain_grace_ms": 500 },
                "http": { "user_agent": "symbol-batch-collector/1.0", "connect_timeout_ms": 3000 },
                "exchanges": ["NYSE", "NASDAQ"]
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.pool.drain_grace_ms(), 500);
        assert_eq!(cfg.exchanges, ["NYSE", "NASDAQ"]);
        assert_eq!(cfg.http.connect_timeout_ms, Some(3000));
    }
}
