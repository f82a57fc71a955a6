//! Tools advertised to the model.

use std::sync::Arc;

use serde::Deserialize;
use toolcall_core::{ToolCollection, ToolError};
use toolcall_macros::ToolSchema;

use crate::price::PriceClient;

pub const GET_CRYPTO: &str = "getCrypto";
pub const GET_CRYPTO_DESCRIPTION: &str = "Get the current value of a particular cryptocurrency";

#[derive(Debug, Deserialize, ToolSchema)]
pub struct CryptoArgs {
    /// The id of a cryto currency
    pub crypto: String,
}

/// Registers `getCrypto`, answered by `prices`.
pub fn register_price_tool(
    tools: &mut ToolCollection,
    prices: Arc<PriceClient>,
) -> Result<(), ToolError> {
    tools.register(GET_CRYPTO, GET_CRYPTO_DESCRIPTION, move |args: CryptoArgs| {
        let prices = prices.clone();
        async move {
            prices
                .describe(&args.crypto)
                .await
                .map_err(ToolError::handler)
        }
    })?;
    Ok(())
}

/// The registry used by the binary.
pub fn default_tools(prices: PriceClient) -> Result<ToolCollection, ToolError> {
    let mut tools = ToolCollection::new();
    register_price_tool(&mut tools, Arc::new(prices))?;
    Ok(tools)
}
