//! The step handler abstraction.
//!
//! A handler is anything that turns a string plus fixed arguments into a
//! value. Handlers return a JSON [`Value`] rather than a `String` so that the
//! pipeline can check, at registration time, that a handler really produces
//! strings.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Named step arguments, kept in insertion order.
pub type Kwargs = serde_json::Map<String, Value>;

/// A string processing function usable as a pipeline step.
pub trait Handler: Send + Sync {
    /// Display name, used for registry lookup and error messages.
    fn name(&self) -> &str;

    /// Processes `value` with the step's fixed positional and named arguments.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying function.
    fn call(&self, value: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<Value>;
}

type BoxedFn = dyn Fn(&str, &[Value], &Kwargs) -> anyhow::Result<Value> + Send + Sync;

/// A [`Handler`] backed by a closure.
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use stx_pipeline::{FnHandler, Handler, Kwargs};
///
/// let trim = FnHandler::from_str_fn("trim", |s| s.trim().to_string());
/// let out = trim.call("  padded  ", &[], &Kwargs::new()).unwrap();
/// assert_eq!(out, Value::from("padded"));
/// ```
#[derive(Clone)]
pub struct FnHandler {
    name: String,
    func: Arc<BoxedFn>,
}

impl FnHandler {
    /// Wraps a function that receives the step arguments.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str, &[Value], &Kwargs) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wraps an infallible `&str -> String` function that takes no arguments.
    ///
    /// Supplying arguments to such a handler is an error.
    pub fn from_str_fn<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        let label = name.clone();
        Self::new(name, move |value, args, kwargs| {
            reject_arguments(&label, args, kwargs)?;
            Ok(Value::String(func(value)))
        })
    }

    /// Wraps a fallible `&str -> String` function that takes no arguments.
    pub fn from_try_str_fn<F, E>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<String, E> + Send + Sync + 'static,
        E: Into<anyhow::Error>,
    {
        let name = name.into();
        let label = name.clone();
        Self::new(name, move |value, args, kwargs| {
            reject_arguments(&label, args, kwargs)?;
            func(value).map(Value::String).map_err(Into::into)
        })
    }
}

impl Handler for FnHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, value: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<Value> {
        (self.func)(value, args, kwargs)
    }
}

impl fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

fn reject_arguments(name: &str, args: &[Value], kwargs: &Kwargs) -> anyhow::Result<()> {
    if let Some(key) = kwargs.keys().next() {
        anyhow::bail!("{name}() got an unexpected keyword argument '{key}'");
    }
    if !args.is_empty() {
        anyhow::bail!(
            "{name}() takes 1 positional argument but {} were given",
            args.len() + 1
        );
    }
    Ok(())
}

/// A reference to a handler: either the handler itself or a registry name.
///
/// Names are resolved against the pipeline's
/// [`HandlerRegistry`](crate::HandlerRegistry) when a step is added.
#[derive(Clone)]
pub enum HandlerRef {
    Handler(Arc<dyn Handler>),
    Name(String),
}

impl HandlerRef {
    /// Returns the handler's name, or the unresolved name.
    pub fn name(&self) -> &str {
        match self {
            Self::Handler(handler) => handler.name(),
            Self::Name(name) => name,
        }
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(handler) => f.debug_tuple("Handler").field(&handler.name()).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
        }
    }
}

impl From<Arc<dyn Handler>> for HandlerRef {
    fn from(handler: Arc<dyn Handler>) -> Self {
        Self::Handler(handler)
    }
}

impl From<FnHandler> for HandlerRef {
    fn from(handler: FnHandler) -> Self {
        Self::Handler(Arc::new(handler))
    }
}

impl From<&str> for HandlerRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for HandlerRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_fn_rejects_arguments() {
        let upper = FnHandler::from_str_fn("upper", |s| s.to_uppercase());
        assert_eq!(
            upper.call("abc", &[], &Kwargs::new()).unwrap(),
            Value::from("ABC")
        );

        let err = upper
            .call("abc", &[Value::from(1)], &Kwargs::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "upper() takes 1 positional argument but 2 were given"
        );

        let mut kwargs = Kwargs::new();
        kwargs.insert("flag".into(), Value::Bool(true));
        let err = upper.call("abc", &[], &kwargs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "upper() got an unexpected keyword argument 'flag'"
        );
    }

    #[test]
    fn test_from_try_str_fn_propagates_errors() {
        let parse = FnHandler::from_try_str_fn("parse", |s: &str| {
            s.parse::<i64>().map(|n| (n * 2).to_string())
        });
        assert_eq!(
            parse.call("21", &[], &Kwargs::new()).unwrap(),
            Value::from("42")
        );
        assert!(parse.call("test_string", &[], &Kwargs::new()).is_err());
    }

    #[test]
    fn test_handler_ref_names() {
        let by_name = HandlerRef::from("snake_case");
        assert_eq!(by_name.name(), "snake_case");

        let direct = HandlerRef::from(FnHandler::from_str_fn("trim", |s| s.trim().to_string()));
        assert_eq!(direct.name(), "trim");
        assert_eq!(format!("{direct:?}"), "Handler(\"trim\")");
    }
}
