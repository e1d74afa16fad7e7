use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use tadawul_core::correct::CorrectionPolicy;
use tadawul_core::registry::{Symbol, SymbolRegistry};
use tadawul_core::{Quote, ReferenceTable, TadawulConfig, TadawulConnector, TadawulError};

use crate::router::util::collapse_errors;

/// Orchestrator that routes quote requests across registered providers and
/// turns the reconciled quote set into market snapshots.
pub struct Tadawul {
    pub(crate) connectors: Vec<Arc<dyn TadawulConnector>>,
    pub(crate) registry: SymbolRegistry,
    pub(crate) references: ReferenceTable,
    pub(crate) cfg: TadawulConfig,
}

impl std::fmt::Debug for Tadawul {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tadawul")
            .field(
                "connectors",
                &self.connectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("registry", &self.registry)
            .field("references", &self.references)
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Tadawul` orchestrator with custom configuration.
pub struct TadawulBuilder {
    connectors: Vec<Arc<dyn TadawulConnector>>,
    registry: Option<SymbolRegistry>,
    references: ReferenceTable,
    cfg: TadawulConfig,
}

impl Default for TadawulBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TadawulBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors and no registry; both must be supplied.
    /// - Defaults are conservative: 5 s per-provider timeout, no run
    ///   deadline, worker pool of 8, default correction tolerances, ranked
    ///   lists of 10, minimum-viable count of 10.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            registry: None,
            references: ReferenceTable::default(),
            cfg: TadawulConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is used as the fallback priority when no explicit
    /// order is set via [`priority`](Self::priority); connectors omitted
    /// from an explicit order keep their registration order after the
    /// listed ones.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TadawulConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the explicit provider priority, most authoritative first, using
    /// connector instances. Type-safe: eliminates key typos and makes
    /// refactoring safer.
    #[must_use]
    pub fn priority(mut self, connectors_desc: &[Arc<dyn TadawulConnector>]) -> Self {
        self.cfg.priority = connectors_desc.iter().map(|c| c.key()).collect();
        self
    }

    /// Supply the symbol universe. Required.
    #[must_use]
    pub fn registry(mut self, registry: SymbolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Supply the trusted reference table used by the corrector. Optional;
    /// without it every quote passes through uncorrected.
    #[must_use]
    pub fn references(mut self, references: ReferenceTable) -> Self {
        self.references = references;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for snapshot builds. Symbols still in flight
    /// when it elapses are counted as failures, not retried.
    #[must_use]
    pub const fn run_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.cfg.run_deadline = Some(deadline);
        self
    }

    /// Width of the bounded worker pool used by snapshot builds.
    #[must_use]
    pub const fn max_concurrency(mut self, workers: usize) -> Self {
        self.cfg.max_concurrency = workers;
        self
    }

    /// Override the correction tolerances and blend weights.
    #[must_use]
    pub fn correction_policy(mut self, policy: CorrectionPolicy) -> Self {
        self.cfg.correction = policy;
        self
    }

    /// Target length K of each ranked list.
    #[must_use]
    pub const fn ranked_len(mut self, k: usize) -> Self {
        self.cfg.ranked_len = k;
        self
    }

    /// Below this many valid quotes the snapshot confidence is `LOW`.
    #[must_use]
    pub const fn min_viable_quotes(mut self, count: usize) -> Self {
        self.cfg.min_viable_quotes = count;
        self
    }

    /// Build the `Tadawul` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered or no registry
    /// was supplied.
    pub fn build(mut self) -> Result<Tadawul, TadawulError> {
        // Validate priority keys against registered connectors; drop unknowns
        // and dedup.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let mut seen: HashSet<&'static str> = HashSet::new();
        self.cfg
            .priority
            .retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));

        if self.connectors.is_empty() {
            return Err(TadawulError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_owned(),
            ));
        }
        let Some(registry) = self.registry else {
            return Err(TadawulError::InvalidArg(
                "no symbol registry supplied; add one via registry(...)".to_owned(),
            ));
        };

        Ok(Tadawul {
            connectors: self.connectors,
            registry,
            references: self.references,
            cfg: self.cfg,
        })
    }
}

impl Tadawul {
    /// Start building a new `Tadawul` instance.
    #[must_use]
    pub fn builder() -> TadawulBuilder {
        TadawulBuilder::new()
    }

    /// The loaded symbol universe.
    #[must_use]
    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// The trusted reference table.
    #[must_use]
    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    /// Wrap a provider future with the per-call timeout and standardized
    /// timeout error mapping.
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, TadawulError>
    where
        Fut: core::future::Future<Output = Result<T, TadawulError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TadawulError::provider_timeout(connector_name)))
    }

    /// Connectors in effective priority order: configured keys first, then
    /// the remaining connectors in registration order.
    pub(crate) fn ordered(&self) -> Vec<Arc<dyn TadawulConnector>> {
        let pos: HashMap<&'static str, usize> = self
            .cfg
            .priority
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();
        let mut out: Vec<(usize, Arc<dyn TadawulConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        out.sort_by_key(|(orig_i, c)| (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i));
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Walk the fallback chain for one symbol: strict priority order, first
    /// success wins and is stamped with the winning connector's key and
    /// quality tier. A success with a non-positive price is demoted to a
    /// `Parse` failure and the chain advances.
    pub(crate) async fn fetch_with_fallback(&self, symbol: &Symbol) -> Result<Quote, TadawulError> {
        let mut attempted_any = false;
        let mut errors: Vec<TadawulError> = Vec::new();

        for c in self.ordered() {
            let Some(provider) = c.as_quote_provider() else {
                continue;
            };
            attempted_any = true;
            let outcome = Self::provider_call_with_timeout(
                c.name(),
                self.cfg.provider_timeout,
                provider.fetch_quote(symbol),
            )
            .await;
            match outcome {
                Ok(quote) if quote.price > Decimal::ZERO => {
                    let mut quote = quote;
                    quote.source = c.key();
                    quote.quality = c.quality();
                    tracing::debug!(
                        ticker = %symbol.ticker,
                        connector = c.name(),
                        quality = quote.quality.as_str(),
                        "fallback chain satisfied"
                    );
                    return Ok(quote);
                }
                Ok(quote) => {
                    tracing::debug!(
                        ticker = %symbol.ticker,
                        connector = c.name(),
                        price = %quote.price,
                        "rejected non-positive price"
                    );
                    errors.push(TadawulError::parse(
                        c.name(),
                        format!("non-positive price {}", quote.price),
                    ));
                }
                Err(e) => {
                    tracing::debug!(
                        ticker = %symbol.ticker,
                        connector = c.name(),
                        error = %e,
                        "provider failed; advancing"
                    );
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(collapse_errors(attempted_any, errors, &symbol.ticker))
    }
}

/// Attribute an untyped failure to the connector that produced it. Typed
/// provider failures pass through untouched.
pub(crate) fn tag_err(connector: &str, e: TadawulError) -> TadawulError {
    match e {
        e @ (TadawulError::Network { .. }
        | TadawulError::Parse { .. }
        | TadawulError::NotFound { .. }
        | TadawulError::ProviderTimeout { .. }) => e,
        other => TadawulError::parse(connector, other.to_string()),
    }
}
