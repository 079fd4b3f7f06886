//! Built-in handlers and the name registry.
//!
//! Every function of `stx-transforms` is exposed as a [`FnHandler`] under its
//! own name. Optional parameters are accepted positionally or by keyword,
//! exactly once; anything else makes the handler fail, which in turn makes
//! a wrongly parameterized step fail its registration probe.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use serde_json::Value;
use stx_transforms::{
    DEFAULT_HASH_ALGORITHM, DEFAULT_PUNCTUATION_REPLACEMENT, hash_string, multi_replace,
    normalize, snake_case, split_camel, strip_punctuation,
};

use crate::handler::{FnHandler, Handler, Kwargs};

/// Handlers addressable by name.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in transforms.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(FnHandler::from_str_fn("normalize", normalize))
            .register(FnHandler::new("strip_punctuation", strip_punctuation_handler))
            .register(FnHandler::new("multi_replace", multi_replace_handler))
            .register(FnHandler::new("hash_string", hash_string_handler))
            .register(FnHandler::from_str_fn("split_camel", split_camel))
            .register(FnHandler::from_str_fn("snake_case", snake_case));
        registry
    }

    /// Register a handler under its own name, replacing any previous entry.
    pub fn register(&mut self, handler: impl Handler + 'static) -> &mut Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a shared handler under its own name.
    pub fn register_arc(&mut self, handler: Arc<dyn Handler>) -> &mut Self {
        self.handlers.insert(handler.name().to_string(), handler);
        self
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Positional/keyword view over a call's arguments.
struct Params<'a> {
    handler: &'static str,
    args: &'a [Value],
    kwargs: &'a Kwargs,
}

impl<'a> Params<'a> {
    /// Checks that the call uses at most the given parameters.
    fn new(
        handler: &'static str,
        accepted: &[&str],
        args: &'a [Value],
        kwargs: &'a Kwargs,
    ) -> anyhow::Result<Self> {
        if args.len() > accepted.len() {
            bail!(
                "{handler}() takes from 1 to {} positional arguments but {} were given",
                accepted.len() + 1,
                args.len() + 1
            );
        }
        if let Some(key) = kwargs.keys().find(|key| !accepted.contains(&key.as_str())) {
            bail!("{handler}() got an unexpected keyword argument '{key}'");
        }
        Ok(Self {
            handler,
            args,
            kwargs,
        })
    }

    /// The parameter at `position`, given either positionally or as `key`.
    fn get(&self, position: usize, key: &str) -> anyhow::Result<Option<&'a Value>> {
        match (self.args.get(position), self.kwargs.get(key)) {
            (Some(_), Some(_)) => bail!(
                "{}() got multiple values for argument '{key}'",
                self.handler
            ),
            (positional, keyword) => Ok(positional.or(keyword)),
        }
    }

    fn get_str(&self, position: usize, key: &str) -> anyhow::Result<Option<&'a str>> {
        self.get(position, key)?
            .map(|value| {
                value.as_str().ok_or_else(|| {
                    anyhow!(
                        "{}() argument '{key}' must be a string, not {}",
                        self.handler,
                        json_type_name(value)
                    )
                })
            })
            .transpose()
    }
}

fn strip_punctuation_handler(value: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<Value> {
    let params = Params::new("strip_punctuation", &["replace"], args, kwargs)?;
    let replace = params
        .get_str(0, "replace")?
        .unwrap_or(DEFAULT_PUNCTUATION_REPLACEMENT);
    Ok(Value::String(strip_punctuation(value, replace)))
}

fn multi_replace_handler(value: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<Value> {
    let params = Params::new("multi_replace", &["mapping"], args, kwargs)?;
    let mapping = params
        .get(0, "mapping")?
        .context("multi_replace() requires a 'mapping' argument")?
        .as_object()
        .context("multi_replace() argument 'mapping' must be an object")?;

    let mut pairs = Vec::with_capacity(mapping.len());
    for (search, replace) in mapping {
        let replace = replace.as_str().with_context(|| {
            format!(
                "multi_replace() replacement for '{search}' must be a string, not {}",
                json_type_name(replace)
            )
        })?;
        pairs.push((search.as_str(), replace));
    }
    Ok(Value::String(multi_replace(value, pairs)))
}

fn hash_string_handler(value: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<Value> {
    let params = Params::new("hash_string", &["algorithm"], args, kwargs)?;
    let algorithm = params
        .get_str(0, "algorithm")?
        .unwrap_or(DEFAULT_HASH_ALGORITHM);
    Ok(Value::String(hash_string(value, algorithm)?))
}

/// Short type name of a JSON value, for messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
