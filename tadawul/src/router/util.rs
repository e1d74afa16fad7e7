use tadawul_core::{TadawulError, Ticker};

/// Collapse a set of provider errors into a uniform `TadawulError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported("quote")`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut`.
/// - If all errors are `NotFound` → `NotFound("quote for <ticker>")`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    attempted_any: bool,
    errors: Vec<TadawulError>,
    ticker: &Ticker,
) -> TadawulError {
    if !attempted_any {
        return TadawulError::unsupported("quote");
    }
    if !errors.is_empty() && errors.iter().all(TadawulError::is_timeout) {
        return TadawulError::AllProvidersTimedOut {
            ticker: ticker.to_string(),
        };
    }
    if !errors.is_empty() && errors.iter().all(TadawulError::is_not_found) {
        return TadawulError::not_found(format!("quote for {ticker}"));
    }
    TadawulError::AllProvidersFailed(errors)
}
