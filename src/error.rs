use thiserror::Error;

// ------------------------------------------------------------
// Collector error taxonomy
// ------------------------------------------------------------
//
// Two error classes exist in this system:
//
// - Configuration errors: raised synchronously, before any task
//   is dispatched. Always fatal to the call that triggered them.
// - Transport errors: raised at the HTTP seam when building the
//   shared client.
//
// Per-source failures (network error, malformed response, parse
// exception, timeout, cancellation) are NOT errors at this level.
// They are confined to their task and absorbed into the result
// map through the outcome handler.
//
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Invalid call-level or construction-level configuration.
    ///
    /// Examples:
    /// - empty exchange list passed to `download`
    /// - non-positive column index on a `ColumnTransform`
    /// - collation root that is missing or is a regular file
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure building the shared HTTP client.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CollectorError>;
