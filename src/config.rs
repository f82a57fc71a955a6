//! Command-line / environment configuration.
//!
//! Only [`Cli`] touches the environment; everything downstream receives an
//! explicit [`Config`].

use clap::Parser;

use crate::{
    chat::gemini,
    error::{Error, Result},
    price,
};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DEFAULT_PROMPT: &str = "What is the current value of ethereum ?";

#[derive(Debug, Parser)]
#[command(name = "toolcall")]
#[command(about = "Ask a Gemini model about crypto prices, answering its tool calls locally")]
#[command(version)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = gemini::DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini REST API
    #[arg(long, env = "GEMINI_BASE_URL", default_value = gemini::DEFAULT_BASE_URL)]
    pub chat_base_url: String,

    /// Base URL of the CoinGecko API
    #[arg(long, env = "QUOTE_BASE_URL", default_value = price::DEFAULT_BASE_URL)]
    pub quote_base_url: String,

    /// Currency prices are quoted in
    #[arg(long, default_value = price::DEFAULT_CURRENCY)]
    pub currency: String,

    /// Opening question sent to the model
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub chat_base_url: String,
    pub quote_base_url: String,
    pub currency: String,
    pub prompt: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let api_key = cli
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingCredential { var: API_KEY_VAR })?;

        Ok(Self {
            api_key,
            model: cli.model,
            chat_base_url: cli.chat_base_url,
            quote_base_url: cli.quote_base_url,
            currency: cli.currency,
            prompt: cli.prompt,
        })
    }
}
