//! CoinGecko simple-price lookup.

use std::collections::HashMap;

use reqwest::Client;
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_CURRENCY: &str = "usd";

/// Price of one asset in the configured currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub amount: f64,
}

impl PriceQuote {
    /// Amount rounded half away from zero to cents.
    pub fn rounded(&self) -> f64 {
        (self.amount * 100.0).round() / 100.0
    }

    /// `Current Bitcoin price: $67890.13\n`
    pub fn describe(&self, id: &str) -> String {
        format!("Current {} price: ${:.2}\n", label(id), self.rounded())
    }
}

fn label(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decodes `{"<id>": {"<currency>": <number>}}` and picks the requested price.
pub fn parse_quote(body: &[u8], id: &str, currency: &str) -> Result<PriceQuote> {
    let mut prices: HashMap<String, HashMap<String, f64>> = serde_json::from_slice(body)?;

    prices
        .remove(id)
        .and_then(|mut by_currency| by_currency.remove(currency))
        .map(|amount| PriceQuote { amount })
        .ok_or_else(|| Error::MissingQuote {
            id: id.to_string(),
            currency: currency.to_string(),
        })
}

pub struct PriceClient {
    base_url: String,
    currency: String,
    client: Client,
}

impl PriceClient {
    pub fn new(base_url: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            currency: currency.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.quote_base_url, &config.currency)
    }

    /// One GET per call, nothing is cached.
    pub async fn quote(&self, id: &str) -> Result<PriceQuote> {
        let url = format!("{}/simple/price", self.base_url.trim_end_matches('/'));
        debug!(%url, id, currency = %self.currency, "fetching price quote");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", id), ("vs_currencies", self.currency.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::Api {
                service: "coingecko",
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_quote(&body, id, &self.currency)
    }

    /// Fetches and formats the price for `id`.
    pub async fn describe(&self, id: &str) -> Result<String> {
        Ok(self.quote(id).await?.describe(id))
    }
}
