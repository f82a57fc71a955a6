#![deny(unsafe_code)]

pub mod error;
pub mod models;
pub mod schema;

use std::{borrow::Cow, collections::HashMap, future::Future, marker::PhantomData, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{DeserializationError, ToolError};
pub use models::{FunctionCall, FunctionResponse, ToolHandler};
pub use schema::{FunctionDecl, ToolSchema};

// Re-export once_cell for use in generated code
pub use once_cell;

/// Adapts a typed async closure to [`ToolHandler`].
///
/// The argument JSON is decoded into `I` before `func` runs, so a malformed
/// payload never reaches the closure.
struct TypedHandler<I, F> {
    func: F,
    _input: PhantomData<fn() -> I>,
}

impl<I, F, Fut> ToolHandler for TypedHandler<I, F>
where
    I: DeserializeOwned + Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    fn invoke<'a>(&'a self, arguments: &'a str) -> BoxFuture<'a, Result<String, ToolError>> {
        async move {
            let input: I =
                serde_json::from_str(arguments).map_err(DeserializationError::from)?;
            (self.func)(input).await
        }
        .boxed()
    }
}

/// Name → handler mapping plus the declarations advertised to the model.
///
/// Built once at startup and then shared read-only; declarations keep
/// registration order.
#[derive(Default)]
pub struct ToolCollection {
    handlers: HashMap<&'static str, Arc<dyn ToolHandler>>,
    declarations: Vec<FunctionDecl>,
}

impl ToolCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<I, F, Fut>(
        &mut self,
        name: &'static str,
        desc: &'static str,
        func: F,
    ) -> Result<&mut Self, ToolError>
    where
        I: 'static + DeserializeOwned + Send + ToolSchema,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler = TypedHandler {
            func,
            _input: PhantomData::<fn() -> I>,
        };
        self.register_handler(name, desc, I::schema(), Arc::new(handler))
    }

    pub fn register_handler(
        &mut self,
        name: &'static str,
        desc: &'static str,
        parameters: Value,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<&mut Self, ToolError> {
        if self.handlers.contains_key(name) {
            return Err(ToolError::AlreadyRegistered { name });
        }

        self.handlers.insert(name, handler);
        self.declarations
            .push(FunctionDecl::new(name, desc, parameters));

        Ok(self)
    }

    pub async fn call(&self, call: &FunctionCall) -> Result<FunctionResponse, ToolError> {
        let handler = self
            .handlers
            .get(call.name.as_str())
            .ok_or_else(|| ToolError::FunctionNotFound {
                name: Cow::Owned(call.name.clone()),
            })?;
        let content = handler.invoke(&call.arguments).await?;

        Ok(FunctionResponse {
            name: call.name.clone(),
            content,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn declarations(&self) -> &[FunctionDecl] {
        &self.declarations
    }

    pub fn json(&self) -> Result<Value, ToolError> {
        Ok(serde_json::to_value(&self.declarations)?)
    }
}
