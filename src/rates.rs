//! Rate snapshots and the HTTP rate source.
//!
//! Rates come from a single fixed JSON endpoint shaped
//! `{date, eur: {code: rate, ...}}`, expressed relative to one unit of EUR.
//! The endpoint is the sole source of truth for both rates and currency
//! availability; there is no authentication and no pagination.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::currencies;
use crate::error::{ValutaError, ValutaResult};

/// A dated, EUR-based rate table filtered to the supported currency set.
///
/// Created per fetch and owned exclusively by the invocation that fetched it.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    /// Quote date as reported by the endpoint, e.g. "2024-01-01".
    pub date: String,
    /// Lowercase currency code to EUR-relative rate.
    pub rates: HashMap<String, Decimal>,
}

impl RateSnapshot {
    /// Look up the rate for a code (expects lowercase).
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }
}

/// Source of rate snapshots.
///
/// The trait seam exists so the query handler can be exercised against a
/// fixed table without touching the network.
pub trait RateSource {
    /// Fetch a fresh snapshot. One fetch per call, no caching.
    fn fetch(&self) -> ValutaResult<RateSnapshot>;
}

/// Blocking HTTP rate source against the configured endpoint.
pub struct HttpRateSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url,
        }
    }
}

impl RateSource for HttpRateSource {
    fn fetch(&self) -> ValutaResult<RateSnapshot> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ValutaError::UpstreamStatus(status));
        }
        let raw: RawSnapshot = response
            .json()
            .map_err(|e| ValutaError::Payload(e.to_string()))?;
        parse_snapshot(raw)
    }
}

/// Wire shape of the endpoint payload.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    date: String,
    eur: HashMap<String, Value>,
}

/// Convert the wire payload into a snapshot, keeping only supported codes.
fn parse_snapshot(raw: RawSnapshot) -> ValutaResult<RateSnapshot> {
    let total = raw.eur.len();
    let mut rates = HashMap::new();

    for (code, value) in raw.eur {
        let code = code.to_lowercase();
        if !currencies::is_allowed(&code) {
            continue;
        }
        let rate = decimal_from_value(&value)
            .ok_or_else(|| ValutaError::Payload(format!("unparseable rate for {code}")))?;
        rates.insert(code, rate);
    }

    if total > rates.len() {
        debug!(dropped = total - rates.len(), "dropped unsupported currencies from feed");
    }

    Ok(RateSnapshot { date: raw.date, rates })
}

/// Parse a rate from its JSON representation without going through `f64`.
///
/// The feed serves rates as numbers (sometimes in scientific notation) and
/// occasionally as strings.
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// The currency codes the plugin can offer, upper-cased and sorted.
///
/// On a successful fetch this is the supported subset of the feed, with EUR
/// forced in (the base currency is not always listed in its own table). On
/// any failure the built-in allow-list is returned instead; this never fails
/// and never returns an empty list.
pub fn available_currencies<S: RateSource>(source: &S) -> Vec<String> {
    match source.fetch() {
        Ok(snapshot) => {
            let mut codes: Vec<String> =
                snapshot.rates.keys().map(|c| c.to_uppercase()).collect();
            if !codes.iter().any(|c| c == "EUR") {
                codes.push("EUR".to_string());
            }
            codes.sort();
            codes
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch currencies, using built-in list");
            currencies::all_upper_sorted()
        }
    }
}

/// Fixed-table rate source for exercising the handler without a network.
#[cfg(test)]
pub(crate) struct StaticRateSource {
    pub date: &'static str,
    pub rates: Vec<(&'static str, Decimal)>,
}

#[cfg(test)]
impl RateSource for StaticRateSource {
    fn fetch(&self) -> ValutaResult<RateSnapshot> {
        Ok(RateSnapshot {
            date: self.date.to_string(),
            rates: self
                .rates
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        })
    }
}

/// Rate source that always fails, standing in for a dead endpoint.
#[cfg(test)]
pub(crate) struct FailingRateSource;

#[cfg(test)]
impl RateSource for FailingRateSource {
    fn fetch(&self) -> ValutaResult<RateSnapshot> {
        Err(ValutaError::UpstreamStatus(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(date: &str, eur: Value) -> RawSnapshot {
        serde_json::from_value(json!({ "date": date, "eur": eur })).unwrap()
    }

    #[test]
    fn test_parse_numeric_rates() {
        let snapshot = parse_snapshot(raw("2024-01-01", json!({"usd": 1.08, "gbp": 0.86})))
            .unwrap();
        assert_eq!(snapshot.date, "2024-01-01");
        assert_eq!(snapshot.rate("usd"), Some(dec!(1.08)));
        assert_eq!(snapshot.rate("gbp"), Some(dec!(0.86)));
    }

    #[test]
    fn test_parse_string_and_scientific_rates() {
        let snapshot =
            parse_snapshot(raw("2024-01-01", json!({"usd": "1.08", "vnd": 2.6521e4}))).unwrap();
        assert_eq!(snapshot.rate("usd"), Some(dec!(1.08)));
        assert_eq!(snapshot.rate("vnd"), Some(dec!(26521)));
    }

    #[test]
    fn test_unsupported_codes_dropped() {
        let snapshot = parse_snapshot(raw(
            "2024-01-01",
            json!({"usd": 1.08, "btc": 0.000016, "doge": 7.1}),
        ))
        .unwrap();
        assert_eq!(snapshot.rates.len(), 1);
        assert!(snapshot.rate("btc").is_none());
    }

    #[test]
    fn test_uppercase_feed_keys_normalized() {
        let snapshot = parse_snapshot(raw("2024-01-01", json!({"USD": 1.08}))).unwrap();
        assert_eq!(snapshot.rate("usd"), Some(dec!(1.08)));
    }

    #[test]
    fn test_bad_rate_value_is_malformed() {
        let result = parse_snapshot(raw("2024-01-01", json!({"usd": [1, 2]})));
        assert!(matches!(result, Err(ValutaError::Payload(_))));
    }

    #[test]
    fn test_available_currencies_forces_eur() {
        let source = StaticRateSource {
            date: "2024-01-01",
            rates: vec![("usd", dec!(1.08)), ("gbp", dec!(0.86))],
        };
        assert_eq!(available_currencies(&source), vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_available_currencies_fallback() {
        let codes = available_currencies(&FailingRateSource);
        assert_eq!(codes, currencies::all_upper_sorted());
        assert!(!codes.is_empty());
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }
}
