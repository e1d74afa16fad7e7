use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tadawul_core::{
    CorrectedQuote, GuaranteedCounts, MarketSummary, QuoteQuality, QuoteRecord, SummaryMetadata,
    TadawulError, confidence, correct, rank,
};

use crate::Tadawul;

impl Tadawul {
    /// Build one reconciled market snapshot over the whole registry,
    /// stamped with the current time.
    ///
    /// # Errors
    /// `DeadlineExceeded` only when the configured run deadline elapsed with
    /// zero successful fetches; individual symbol failures never abort the
    /// run.
    pub async fn market_snapshot(&self) -> Result<MarketSummary, TadawulError> {
        self.market_snapshot_at(Utc::now()).await
    }

    /// Build one reconciled market snapshot stamped with an explicit
    /// timestamp. Identical provider and reference fixtures with a pinned
    /// `as_of` produce byte-identical serialized output.
    ///
    /// Each symbol's fetch-and-correct sequence runs independently on a
    /// bounded worker pool; within one symbol the fallback chain is strictly
    /// ordered, across symbols nothing is. Outcomes are sorted by ticker
    /// before aggregation so completion order cannot leak into the result.
    ///
    /// # Errors
    /// `DeadlineExceeded` only when the run deadline elapsed with zero
    /// successful fetches.
    pub async fn market_snapshot_at(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<MarketSummary, TadawulError> {
        let total_symbols = self.registry.len();
        tracing::info!(
            symbols = total_symbols,
            workers = self.cfg.max_concurrency,
            "building market snapshot"
        );

        let mut corrected: Vec<CorrectedQuote> = Vec::with_capacity(total_symbols);
        let mut deadline_hit = false;
        {
            let this = self;
            let mut outcomes = stream::iter(self.registry.iter())
                .map(|symbol| async move {
                    let outcome = this.fetch_with_fallback(symbol).await;
                    (symbol, outcome)
                })
                .buffer_unordered(self.cfg.max_concurrency.max(1));

            match self.cfg.run_deadline {
                None => {
                    while let Some((symbol, outcome)) = outcomes.next().await {
                        match outcome {
                            Ok(quote) => corrected.push(correct(
                                quote,
                                self.references.get(&symbol.ticker),
                                &self.cfg.correction,
                            )),
                            Err(e) => {
                                tracing::debug!(ticker = %symbol.ticker, error = %e, "symbol excluded");
                            }
                        }
                    }
                }
                Some(deadline) => {
                    let sleep = tokio::time::sleep(deadline);
                    tokio::pin!(sleep);
                    loop {
                        tokio::select! {
                            biased;
                            () = &mut sleep => {
                                deadline_hit = true;
                                tracing::warn!(
                                    resolved = corrected.len(),
                                    "run deadline elapsed; in-flight symbols count as failures"
                                );
                                break;
                            }
                            next = outcomes.next() => match next {
                                Some((symbol, Ok(quote))) => corrected.push(correct(
                                    quote,
                                    self.references.get(&symbol.ticker),
                                    &self.cfg.correction,
                                )),
                                Some((symbol, Err(e))) => {
                                    tracing::debug!(ticker = %symbol.ticker, error = %e, "symbol excluded");
                                }
                                None => break,
                            }
                        }
                    }
                }
            }
        }

        if deadline_hit && corrected.is_empty() {
            return Err(TadawulError::DeadlineExceeded);
        }

        // Failures are everything that did not resolve: errored chains plus
        // symbols still in flight at the deadline.
        let failed_fetches = total_symbols - corrected.len();
        corrected.sort_by(|a, b| a.quote.ticker.cmp(&b.quote.ticker));

        let rankings = rank(&corrected, self.cfg.ranked_len);

        let mut source_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut high_quality_source_count = 0usize;
        for c in &corrected {
            *source_counts
                .entry(c.quote.source.as_str().to_owned())
                .or_default() += 1;
            if c.quote.quality == QuoteQuality::High {
                high_quality_source_count += 1;
            }
        }
        let data_confidence = confidence(
            corrected.len(),
            high_quality_source_count,
            self.cfg.min_viable_quotes,
        );

        let metadata = SummaryMetadata {
            total_stocks_processed: corrected.len(),
            data_confidence,
            high_quality_source_count,
            other_source_count: corrected.len() - high_quality_source_count,
            failed_fetches,
            timestamp: as_of,
            guaranteed_counts: GuaranteedCounts {
                gainers: rankings.gainers.entries.len(),
                losers: rankings.losers.entries.len(),
                volume: rankings.volume_movers.entries.len(),
                value: rankings.value_movers.entries.len(),
            },
            source_counts,
        };
        tracing::info!(
            processed = metadata.total_stocks_processed,
            failed = metadata.failed_fetches,
            confidence = ?metadata.data_confidence,
            "market snapshot ready"
        );

        Ok(MarketSummary {
            top_gainers: QuoteRecord::from_ranked(&rankings.gainers, &self.registry),
            top_losers: QuoteRecord::from_ranked(&rankings.losers, &self.registry),
            volume_movers: QuoteRecord::from_ranked(&rankings.volume_movers, &self.registry),
            value_movers: QuoteRecord::from_ranked(&rankings.value_movers, &self.registry),
            metadata,
        })
    }
}
