//! Valuta - currency conversion for keyboard-driven launchers.
//!
//! Valuta turns a free-text launcher query like `100 usd eur` into selectable
//! result rows with copy-to-clipboard actions, using exchange rates fetched
//! from a public EUR-based rates endpoint.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`currencies`] - Built-in allow-list of supported currency codes
//! - [`rates`] - Rate snapshots and the HTTP rate source
//! - [`convert`] - Decimal conversion between currencies
//! - [`format`] - Display formatting for amounts and rates
//! - [`item`] - Result items handed to the host launcher
//! - [`plugin`] - The query handler itself
//!
//! # Host boundary
//!
//! The host framework feeds [`plugin::CurrencyPlugin::handle_query`] the raw
//! query string and renders the returned [`item::DisplayItem`] list. When the
//! user opens the context menu of a conversion row, the host echoes the
//! attached [`item::ContextPayload`] back through
//! [`plugin::CurrencyPlugin::handle_context`].
//!
//! # Example
//!
//! ```ignore
//! use valuta::{Config, CurrencyPlugin, HttpRateSource};
//!
//! let config = Config::load();
//! let source = HttpRateSource::new(config.rates_url.clone());
//! let plugin = CurrencyPlugin::new(config, source);
//!
//! for item in plugin.handle_query("100 usd eur") {
//!     println!("{} - {}", item.title, item.subtitle);
//! }
//! ```

// Public modules
pub mod config;
pub mod convert;
pub mod currencies;
pub mod format;
pub mod item;
pub mod plugin;
pub mod rates;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use config::{Config, NumberFormat};
pub use convert::{ConvertError, Converted};
pub use error::{ValutaError, ValutaResult};
pub use item::{ContextPayload, DisplayItem};
pub use plugin::CurrencyPlugin;
pub use rates::{HttpRateSource, RateSnapshot, RateSource};
