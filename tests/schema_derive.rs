use serde::Deserialize;
use serde_json::json;
use toolcall::{FunctionCall, ToolCollection, ToolSchema};

#[derive(Debug, Deserialize, ToolSchema)]
struct QuoteRequest {
    /// CoinGecko id of the asset
    asset: String,
    /// Quote currency, defaults to usd
    currency: Option<String>,
    decimals: u32,
}

#[derive(Debug, Deserialize, ToolSchema)]
struct NoArgs;

#[test]
fn test_derived_schema_lists_required_fields() {
    assert_eq!(
        QuoteRequest::schema(),
        json!({
            "type": "object",
            "properties": {
                "asset": {"type": "string", "description": "CoinGecko id of the asset"},
                "currency": {
                    "anyOf": [{"type": "string"}, {"type": "null"}],
                    "description": "Quote currency, defaults to usd"
                },
                "decimals": {"type": "integer"}
            },
            "required": ["asset", "decimals"]
        })
    );
}

#[test]
fn test_unit_struct_schema_is_empty_object() {
    assert_eq!(
        NoArgs::schema(),
        json!({"type": "object", "properties": {}, "required": []})
    );
}

#[test]
fn test_derived_schema_is_cached() {
    assert_eq!(QuoteRequest::schema(), QuoteRequest::schema());
}

#[tokio::test]
async fn test_derived_type_registers_and_dispatches() {
    let mut tools = ToolCollection::new();
    tools
        .register("quote", "Quote an asset", |req: QuoteRequest| async move {
            Ok(format!(
                "{} in {} to {} places",
                req.asset,
                req.currency.unwrap_or_else(|| "usd".into()),
                req.decimals
            ))
        })
        .unwrap();

    assert_eq!(tools.declarations()[0].parameters, QuoteRequest::schema());

    let response = tools
        .call(&FunctionCall::new("quote", r#"{"asset":"solana","decimals":2}"#))
        .await
        .unwrap();
    assert_eq!(response.content, "solana in usd to 2 places");
}
