//! The query handler: tokenization and result-row production.
//!
//! The host invokes [`CurrencyPlugin::handle_query`] once per
//! keystroke-triggered query and renders the returned rows; every code path
//! ends in zero or more items, never in an error reaching the host.

use rust_decimal::Decimal;

use crate::config::Config;
use crate::convert;
use crate::format::format_amount;
use crate::item::{ContextPayload, DisplayItem};
use crate::rates::{available_currencies, RateSource};

/// Icon reference attached to every row; resolved by the host.
const ICON: &str = "icons/currency.png";

/// Currency-conversion query handler.
///
/// Holds the rate source and the offerable currency list, which is computed
/// once at construction. Each invocation owns its fetched data exclusively;
/// there is no shared mutable state.
pub struct CurrencyPlugin<S> {
    config: Config,
    source: S,
    /// Offerable codes, upper-case and sorted ascending.
    currencies: Vec<String>,
}

impl<S: RateSource> CurrencyPlugin<S> {
    /// Build the plugin, resolving the currency list from the source (with
    /// the built-in allow-list as fallback, so construction never fails).
    pub fn new(config: Config, source: S) -> Self {
        let currencies = available_currencies(&source);
        Self {
            config,
            source,
            currencies,
        }
    }

    /// The codes this plugin offers, upper-case and sorted.
    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    /// Produce result rows for a raw query.
    ///
    /// Behavior branches strictly on whitespace token count:
    /// usage help (0), code prefix search (1), conversion proposals (2),
    /// an actual conversion (3), no match (4+).
    pub fn handle_query(&self, raw: &str) -> Vec<DisplayItem> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        match tokens.as_slice() {
            [] => vec![self.usage_item()],
            [prefix] => self.prefix_search(prefix),
            [amount, source] => self.proposals(amount, source),
            [amount, source, dest] => self.conversion(amount, source, dest),
            _ => Vec::new(),
        }
    }

    /// Re-offer copy actions for a previously produced conversion row.
    ///
    /// Pure presentation over the echoed payload; nothing is recomputed.
    pub fn handle_context(&self, payload: &ContextPayload) -> Vec<DisplayItem> {
        let original = format!("{} {}", payload.amount, payload.source);
        let converted = format!("{} {}", payload.converted, payload.dest);

        vec![
            DisplayItem {
                title: format!("Copy: {original}"),
                subtitle: "Copy original amount".to_string(),
                icon: ICON.to_string(),
                copy_text: Some(original),
                context: None,
            },
            DisplayItem {
                title: format!("Copy: {converted}"),
                subtitle: "Copy converted amount".to_string(),
                icon: ICON.to_string(),
                copy_text: Some(converted),
                context: None,
            },
        ]
    }

    fn usage_item(&self) -> DisplayItem {
        DisplayItem::message(
            "Currency Converter",
            "Usage: <amount> <source currency> <target currency>",
            ICON,
        )
    }

    fn invalid_amount_item(&self) -> DisplayItem {
        DisplayItem::message("Invalid amount", "Please enter a valid number", ICON)
    }

    /// Case-insensitive prefix search over the offerable codes.
    fn prefix_search(&self, prefix: &str) -> Vec<DisplayItem> {
        let prefix = prefix.to_uppercase();
        self.currencies
            .iter()
            .filter(|code| code.starts_with(&prefix))
            .take(self.config.max_results as usize)
            .map(|code| {
                DisplayItem::message(
                    format!("Currency: {code}"),
                    format!("Available currency: {code}"),
                    ICON,
                )
            })
            .collect()
    }

    /// Suggestion rows for `<amount> <source>` - no rates are fetched here.
    fn proposals(&self, amount: &str, source: &str) -> Vec<DisplayItem> {
        if convert::parse_amount(amount).is_err() {
            return vec![self.invalid_amount_item()];
        }

        let source = source.to_uppercase();
        self.currencies
            .iter()
            .filter(|code| **code != source)
            .take(self.config.max_results as usize)
            .map(|code| {
                DisplayItem::message(
                    format!("Convert {amount} {source} to {code}"),
                    format!("Press enter to convert to {code}"),
                    ICON,
                )
            })
            .collect()
    }

    /// A full `<amount> <source> <dest>` conversion row.
    fn conversion(&self, amount: &str, source: &str, dest: &str) -> Vec<DisplayItem> {
        let parsed: Decimal = match convert::parse_amount(amount) {
            Ok(value) => value,
            Err(_) => return vec![self.invalid_amount_item()],
        };

        match convert::convert(&self.source, amount, source, dest) {
            Ok(result) => {
                let source = source.to_uppercase();
                let dest = dest.to_uppercase();
                let formatted = format_amount(result.amount, &self.config.format);
                // Amount is nonzero on the success path.
                let effective_rate = result.amount.checked_div(parsed).unwrap_or_default();
                let rate = format_amount(effective_rate, &self.config.format);

                vec![DisplayItem {
                    title: format!("{amount} {source} = {formatted} {dest}"),
                    subtitle: format!(
                        "Rate: 1 {source} = {rate} {dest} (as of {})",
                        result.date
                    ),
                    icon: ICON.to_string(),
                    copy_text: Some(format!("{formatted} {dest}")),
                    context: Some(ContextPayload {
                        amount: amount.to_string(),
                        converted: formatted,
                        source,
                        dest,
                    }),
                }]
            }
            Err(e) => vec![DisplayItem::message(e.to_string(), "Please try again", ICON)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currencies;
    use crate::rates::{FailingRateSource, StaticRateSource};
    use rust_decimal_macros::dec;

    fn plugin() -> CurrencyPlugin<StaticRateSource> {
        CurrencyPlugin::new(
            Config::default(),
            StaticRateSource {
                date: "2024-01-01",
                rates: vec![
                    ("eur", dec!(1)),
                    ("usd", dec!(1.08)),
                    ("gbp", dec!(0.86)),
                    ("jpy", dec!(157.25)),
                ],
            },
        )
    }

    /// Plugin whose fetch always fails: full allow-list, no conversions.
    fn offline_plugin() -> CurrencyPlugin<FailingRateSource> {
        CurrencyPlugin::new(Config::default(), FailingRateSource)
    }

    #[test]
    fn test_empty_query_yields_usage() {
        let items = plugin().handle_query("");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Currency Converter");

        let items = plugin().handle_query("   ");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_prefix_search() {
        let items = offline_plugin().handle_query("u");
        assert!(!items.is_empty());
        assert!(items.len() <= 8);
        assert!(items.iter().all(|i| i.title.starts_with("Currency: U")));
        assert!(items.iter().any(|i| i.title == "Currency: USD"));
    }

    #[test]
    fn test_prefix_search_case_insensitive() {
        let upper = offline_plugin().handle_query("US");
        let lower = offline_plugin().handle_query("us");
        assert_eq!(upper.len(), lower.len());
        assert!(upper.iter().any(|i| i.title == "Currency: USD"));
    }

    #[test]
    fn test_prefix_search_no_match() {
        assert!(offline_plugin().handle_query("qq").is_empty());
    }

    #[test]
    fn test_proposals_exclude_source() {
        let items = plugin().handle_query("100 usd");
        assert!(!items.is_empty());
        assert!(items.len() <= 8);
        assert!(items.iter().all(|i| !i.title.ends_with("to USD")));
        assert!(items.iter().any(|i| i.title == "Convert 100 USD to EUR"));
    }

    #[test]
    fn test_proposals_capped() {
        let items = offline_plugin().handle_query("100 usd");
        assert_eq!(items.len(), 8);
    }

    #[test]
    fn test_proposals_invalid_amount() {
        let items = plugin().handle_query("abc usd");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Invalid amount");
    }

    #[test]
    fn test_conversion_row() {
        let items = plugin().handle_query("100 usd eur");
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "100 USD = 92.59 EUR");
        assert!(item.subtitle.starts_with("Rate: 1 USD = 0.93 EUR"));
        assert!(item.subtitle.ends_with("(as of 2024-01-01)"));
        assert_eq!(item.copy_text.as_deref(), Some("92.59 EUR"));

        let payload = item.context.as_ref().unwrap();
        assert_eq!(payload.amount, "100");
        assert_eq!(payload.converted, "92.59");
        assert_eq!(payload.source, "USD");
        assert_eq!(payload.dest, "EUR");
    }

    #[test]
    fn test_conversion_grouping() {
        let items = plugin().handle_query("1000 eur jpy");
        assert_eq!(items[0].title, "1000 EUR = 157,250.00 JPY");
    }

    #[test]
    fn test_conversion_zero_amount() {
        let items = plugin().handle_query("0 usd eur");
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].title,
            "Warning - amount entered must be greater than zero"
        );
        assert_eq!(items[0].subtitle, "Please try again");
        assert!(items[0].context.is_none());
    }

    #[test]
    fn test_conversion_unsupported_code() {
        let items = plugin().handle_query("100 xxx usd");
        assert_eq!(items[0].title, "Currency not supported: xxx");

        let items = plugin().handle_query("100 usd yyy");
        assert_eq!(items[0].title, "Currency not supported: yyy");
    }

    #[test]
    fn test_conversion_fetch_failure() {
        let items = offline_plugin().handle_query("100 usd eur");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Error fetching rates");
        assert_eq!(items[0].subtitle, "Please try again");
    }

    #[test]
    fn test_conversion_invalid_amount() {
        let items = plugin().handle_query("12..5 usd eur");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Invalid amount");
    }

    #[test]
    fn test_too_many_tokens() {
        assert!(plugin().handle_query("100 usd eur gbp").is_empty());
    }

    #[test]
    fn test_offline_currency_list_is_full_allow_list() {
        let plugin = offline_plugin();
        assert_eq!(plugin.currencies().len(), currencies::ALLOWED_CODES.len());
        assert!(plugin.currencies().contains(&"EUR".to_string()));
    }

    #[test]
    fn test_context_menu() {
        let payload = ContextPayload {
            amount: "100".to_string(),
            converted: "92.59".to_string(),
            source: "USD".to_string(),
            dest: "EUR".to_string(),
        };
        let items = plugin().handle_context(&payload);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Copy: 100 USD");
        assert_eq!(items[0].copy_text.as_deref(), Some("100 USD"));
        assert_eq!(items[0].subtitle, "Copy original amount");
        assert_eq!(items[1].title, "Copy: 92.59 EUR");
        assert_eq!(items[1].copy_text.as_deref(), Some("92.59 EUR"));
        assert_eq!(items[1].subtitle, "Copy converted amount");
    }
}
