use tadawul_core::{CorrectedQuote, TadawulError, correct};

use crate::Tadawul;

impl Tadawul {
    /// Fetch, correct, and return one symbol's quote.
    ///
    /// Behavior and trade-offs:
    /// - The ticker must exist in the registry; unknown or malformed tickers
    ///   return `NotFound` without any provider traffic.
    /// - Providers are tried in strict priority order with the per-provider
    ///   timeout; the first success wins and later providers are not invoked.
    /// - The reference corrector runs on the winning quote; without a
    ///   reference record the quote passes through with
    ///   `correction_applied == false`.
    ///
    /// # Errors
    /// `NotFound` for unknown tickers, otherwise the collapsed fallback
    /// outcome (`NotFound`, `AllProvidersTimedOut`, or `AllProvidersFailed`).
    pub async fn quote(&self, ticker: &str) -> Result<CorrectedQuote, TadawulError> {
        let Some(symbol) = self.registry.lookup(ticker) else {
            return Err(TadawulError::not_found(format!("symbol {ticker}")));
        };
        let quote = self.fetch_with_fallback(symbol).await?;
        let reference = self.references.get(&symbol.ticker);
        Ok(correct(quote, reference, &self.cfg.correction))
    }

    /// Fetch corrected quotes for multiple tickers concurrently.
    ///
    /// Returns `(successes, failures)` where `failures` carries the
    /// per-ticker error (including `NotFound`), allowing partial success
    /// without failing the batch.
    pub async fn quotes(
        &self,
        tickers: &[&str],
    ) -> (Vec<CorrectedQuote>, Vec<(String, TadawulError)>) {
        let tasks = tickers.iter().map(|t| {
            let this = self;
            async move { ((*t).to_owned(), this.quote(t).await) }
        });

        let results = futures::future::join_all(tasks).await;

        let mut ok: Vec<CorrectedQuote> = Vec::new();
        let mut failures: Vec<(String, TadawulError)> = Vec::new();
        for (ticker, res) in results {
            match res {
                Ok(q) => ok.push(q),
                Err(e) => failures.push((ticker, e)),
            }
        }
        (ok, failures)
    }
}
