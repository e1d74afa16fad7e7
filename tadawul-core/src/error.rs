use thiserror::Error;

/// Unified error type for the tadawul workspace.
///
/// Wraps registry-load failures, typed per-provider failures, not-found
/// conditions, timeouts, and an aggregate for multi-provider attempts.
#[derive(Debug, Error)]
pub enum TadawulError {
    /// The requested capability is not implemented by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "quote").
        capability: &'static str,
    },

    /// The symbol registry could not be loaded. Fatal: no run can proceed
    /// without a universe.
    #[error("registry load failed: {0}")]
    RegistryLoad(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A provider call failed at the transport layer.
    #[error("{connector} network failure: {msg}")]
    Network {
        /// Connector name that failed.
        connector: String,
        /// Human-readable transport error.
        msg: String,
    },

    /// A provider responded but the payload could not be decoded or carried
    /// invalid data (e.g. a non-positive price).
    #[error("{connector} unparsable response: {msg}")]
    Parse {
        /// Connector name that failed.
        connector: String,
        /// Human-readable description of the bad payload.
        msg: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "quote for 2222".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<TadawulError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
    },

    /// Every attempted provider timed out for the requested symbol.
    #[error("all providers timed out: quote for {ticker}")]
    AllProvidersTimedOut {
        /// Ticker whose fallback chain timed out end to end.
        ticker: String,
    },

    /// The run deadline elapsed before a single symbol resolved.
    #[error("run deadline exceeded with no successful fetch")]
    DeadlineExceeded,
}

impl TadawulError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `Network` error with the connector name and message.
    pub fn network(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Parse` error with the connector name and message.
    pub fn parse(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
        }
    }

    /// Whether this error is a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is a per-provider timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::ProviderTimeout { .. })
    }
}
