//! Parameter schemas advertised to the model.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Value, json};

/// Types that can describe themselves as a JSON-schema-like value.
pub trait ToolSchema {
    fn schema() -> Value;
}

macro_rules! prim {
    ($ty:ty, $name:expr) => {
        impl ToolSchema for $ty {
            fn schema() -> Value {
                static SCHEMA: Lazy<Value> = Lazy::new(|| json!({ "type": $name }));
                SCHEMA.clone()
            }
        }
    };
}

prim!(bool, "boolean");
prim!(i32, "integer");
prim!(i64, "integer");
prim!(u32, "integer");
prim!(u64, "integer");
prim!(usize, "integer");
prim!(f32, "number");
prim!(f64, "number");
prim!(String, "string");
prim!((), "null");

impl ToolSchema for &'_ str {
    fn schema() -> Value {
        String::schema()
    }
}

impl<T: ToolSchema> ToolSchema for Option<T> {
    fn schema() -> Value {
        // generic over T, so not cached here
        json!({
            "anyOf": [
                T::schema(),
                { "type": "null" }
            ]
        })
    }
}

impl<T: ToolSchema> ToolSchema for Vec<T> {
    fn schema() -> Value {
        json!({
            "type": "array",
            "items": T::schema()
        })
    }
}

impl<T: ToolSchema> ToolSchema for HashMap<String, T> {
    fn schema() -> Value {
        json!({
            "type": "object",
            "additionalProperties": T::schema()
        })
    }
}

/// One entry of the tool list sent with every chat request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

impl FunctionDecl {
    pub fn new(name: &'static str, description: &'static str, parameters: Value) -> Self {
        Self {
            name,
            description,
            parameters,
        }
    }
}
