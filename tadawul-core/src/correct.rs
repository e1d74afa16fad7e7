//! Reference-based quote correction.
//!
//! When a fetched quote diverges from its trusted reference beyond tolerance,
//! price and percent change are each recomputed as a fixed weighted blend
//! favoring the reference, and the previous close is back-derived so the
//! triple stays mutually consistent. Volume is corrected independently under
//! its own rule. Pre-correction values are retained for audit.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::reference::ReferenceRecord;
use crate::types::{CorrectedQuote, Quote, UncorrectedFields};

/// Tolerances and blend weights for reference-based correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionPolicy {
    /// Absolute price deviation (currency units) above which correction fires.
    pub price_tolerance: Decimal,
    /// Percent-change deviation (percentage points) above which correction fires.
    pub change_tolerance: Decimal,
    /// Weight given to the reference side of the price/change blend.
    pub reference_weight: Decimal,
    /// Volume correction fires when the volumes differ by more than this
    /// fraction of the fetched volume.
    pub volume_deviation_ratio: Decimal,
    /// Weight given to the reference side of the volume blend.
    pub volume_reference_weight: Decimal,
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self {
            price_tolerance: Decimal::new(30, 2),
            change_tolerance: Decimal::new(20, 2),
            reference_weight: Decimal::new(80, 2),
            volume_deviation_ratio: Decimal::new(50, 2),
            volume_reference_weight: Decimal::new(70, 2),
        }
    }
}

/// Blend a fetched quote toward its reference when tolerances are breached.
///
/// Without a reference the quote passes through unchanged with
/// `correction_applied == false`; a skipped correction is not an error.
#[must_use]
pub fn correct(
    quote: Quote,
    reference: Option<&ReferenceRecord>,
    policy: &CorrectionPolicy,
) -> CorrectedQuote {
    let Some(reference) = reference else {
        return CorrectedQuote::unchanged(quote);
    };

    let original = UncorrectedFields {
        price: quote.price,
        previous_close: quote.previous_close,
        change_percent: quote.change_percent,
        volume: quote.volume,
    };

    let mut q = quote;
    let mut applied = false;

    let price_deviation = (q.price - reference.price).abs();
    let change_deviation = (q.change_percent - reference.change_percent).abs();
    if price_deviation > policy.price_tolerance || change_deviation > policy.change_tolerance {
        let reference_weight = policy.reference_weight;
        let fetched_weight = Decimal::ONE - reference_weight;
        q.price = q.price * fetched_weight + reference.price * reference_weight;
        q.change_percent =
            q.change_percent * fetched_weight + reference.change_percent * reference_weight;
        q.previous_close = derive_previous_close(q.price, q.change_percent);
        q.change = q.price - q.previous_close;
        applied = true;
        tracing::debug!(
            ticker = %q.ticker,
            price = %q.price,
            change_percent = %q.change_percent,
            %price_deviation,
            %change_deviation,
            "applied reference correction"
        );
    }

    if let Some(reference_volume) = reference.volume {
        let fetched = Decimal::from(q.volume);
        let deviation = (fetched - Decimal::from(reference_volume)).abs();
        if deviation > policy.volume_deviation_ratio * fetched {
            let reference_weight = policy.volume_reference_weight;
            let fetched_weight = Decimal::ONE - reference_weight;
            let blended = fetched * fetched_weight + Decimal::from(reference_volume) * reference_weight;
            q.volume = blended.round().to_u64().unwrap_or(q.volume);
            applied = true;
        }
    }

    CorrectedQuote {
        quote: q,
        correction_applied: applied,
        original: applied.then_some(original),
    }
}

/// Back-derive the previous close from a corrected price and percent change:
/// `price / (1 + change/100)`.
fn derive_previous_close(price: Decimal, change_percent: Decimal) -> Decimal {
    let denominator = Decimal::ONE + change_percent / Decimal::ONE_HUNDRED;
    if denominator.is_zero() {
        price
    } else {
        price / denominator
    }
}
