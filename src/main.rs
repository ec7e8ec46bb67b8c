//! Valuta CLI - run one launcher query from the command line.
//!
//! Useful for exercising the plugin without a host framework:
//!
//!   cargo run -- 100 usd eur
//!
//! Prints the produced result rows as JSON, the same shape the host consumes.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valuta::{Config, CurrencyPlugin, HttpRateSource};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valuta=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();
    let source = HttpRateSource::new(config.rates_url.clone());
    let plugin = CurrencyPlugin::new(config, source);

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let items = plugin.handle_query(&query);

    match serde_json::to_string_pretty(&items) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
