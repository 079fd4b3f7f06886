//! Pipeline steps and step descriptions.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builtin::json_type_name;
use crate::error::{PipelineError, Result};
use crate::handler::{FnHandler, Handler, HandlerRef, Kwargs};

/// A validated handler bound to fixed arguments.
///
/// Steps are only created by [`Pipeline::add`](crate::Pipeline::add) after the
/// handler passed its probe, and are immutable afterwards.
#[derive(Clone)]
pub struct Step {
    handler: Arc<dyn Handler>,
    args: Vec<Value>,
    kwargs: Kwargs,
}

impl Step {
    pub(crate) fn new(handler: Arc<dyn Handler>, args: Vec<Value>, kwargs: Kwargs) -> Self {
        Self {
            handler,
            args,
            kwargs,
        }
    }

    /// Name of the step's handler.
    pub fn name(&self) -> &str {
        self.handler.name()
    }

    /// The validated handler this step calls.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Fixed positional arguments passed after the value.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Fixed named arguments.
    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    /// Runs the handler on `value` with the step's fixed arguments.
    pub(crate) fn call(&self, value: &str) -> anyhow::Result<Value> {
        self.handler.call(value, &self.args, &self.kwargs)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("handler", &self.name())
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .finish()
    }
}

/// Renders the step as a call signature, e.g. `strip_punctuation(replace="_")`.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        let positional = self.args.iter().map(ToString::to_string);
        let named = self.kwargs.iter().map(|(key, value)| format!("{key}={value}"));
        let rendered: Vec<String> = positional.chain(named).collect();
        write!(f, "{})", rendered.join(", "))
    }
}

/// One element of a combined step description.
#[derive(Debug, Clone)]
pub enum StepPart {
    Handler(HandlerRef),
    Args(Vec<Value>),
    Kwargs(Kwargs),
}

/// A compact description of a step, normalized by
/// [`Pipeline::then`](crate::Pipeline::then).
///
/// Either a bare handler reference or a combination of parts in any order.
/// When a part kind appears more than once, the last one wins.
///
/// The tuple conversions take the handler first, as in `(name, args)` or
/// `(name, args, kwargs)`; build [`StepDescription::Parts`] for any other
/// order.
///
/// ```
/// use serde_json::json;
/// use stx_pipeline::{Pipeline, StepPart};
///
/// let mut pipeline = Pipeline::new();
/// pipeline.then(vec![
///     StepPart::Args(vec![json!("_")]),
///     StepPart::Handler("strip_punctuation".into()),
/// ])?;
/// assert_eq!(pipeline.apply("a,b")?, "a_b");
/// # Ok::<(), stx_pipeline::PipelineError>(())
/// ```
#[derive(Debug, Clone)]
pub enum StepDescription {
    Handler(HandlerRef),
    Parts(Vec<StepPart>),
}

impl StepDescription {
    /// Builds a description from a JSON value.
    ///
    /// A string names a handler. An array is a combination whose strings name
    /// the handler, whose arrays are positional arguments and whose objects
    /// are named arguments; other elements are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidStepDescription`] for any other JSON
    /// value.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Self::Handler(HandlerRef::Name(name.clone()))),
            Value::Array(elements) => Ok(Self::Parts(
                elements
                    .iter()
                    .filter_map(|element| match element {
                        Value::String(name) => Some(StepPart::Handler(HandlerRef::Name(name.clone()))),
                        Value::Array(args) => Some(StepPart::Args(args.clone())),
                        Value::Object(kwargs) => Some(StepPart::Kwargs(kwargs.clone())),
                        _ => None,
                    })
                    .collect(),
            )),
            other => Err(PipelineError::InvalidStepDescription(
                json_type_name(other).to_string(),
            )),
        }
    }

    /// Normalizes into `(handler, args, kwargs)`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingHandler`] if a combination names no
    /// handler.
    pub fn into_parts(self) -> Result<(HandlerRef, Vec<Value>, Kwargs)> {
        match self {
            Self::Handler(handler) => Ok((handler, Vec::new(), Kwargs::new())),
            Self::Parts(parts) => {
                let mut handler = None;
                let mut args = Vec::new();
                let mut kwargs = Kwargs::new();
                for part in parts {
                    match part {
                        StepPart::Handler(h) => handler = Some(h),
                        StepPart::Args(a) => args = a,
                        StepPart::Kwargs(k) => kwargs = k,
                    }
                }
                let handler = handler.ok_or(PipelineError::MissingHandler)?;
                Ok((handler, args, kwargs))
            }
        }
    }
}

impl From<HandlerRef> for StepDescription {
    fn from(handler: HandlerRef) -> Self {
        Self::Handler(handler)
    }
}

impl From<FnHandler> for StepDescription {
    fn from(handler: FnHandler) -> Self {
        Self::Handler(handler.into())
    }
}

impl From<Arc<dyn Handler>> for StepDescription {
    fn from(handler: Arc<dyn Handler>) -> Self {
        Self::Handler(handler.into())
    }
}

impl From<&str> for StepDescription {
    fn from(name: &str) -> Self {
        Self::Handler(name.into())
    }
}

impl From<String> for StepDescription {
    fn from(name: String) -> Self {
        Self::Handler(name.into())
    }
}

impl From<Vec<StepPart>> for StepDescription {
    fn from(parts: Vec<StepPart>) -> Self {
        Self::Parts(parts)
    }
}

impl<H: Into<HandlerRef>> From<(H, Vec<Value>)> for StepDescription {
    fn from((handler, args): (H, Vec<Value>)) -> Self {
        Self::Parts(vec![StepPart::Handler(handler.into()), StepPart::Args(args)])
    }
}

impl<H: Into<HandlerRef>> From<(H, Kwargs)> for StepDescription {
    fn from((handler, kwargs): (H, Kwargs)) -> Self {
        Self::Parts(vec![StepPart::Handler(handler.into()), StepPart::Kwargs(kwargs)])
    }
}

impl<H: Into<HandlerRef>> From<(H, Vec<Value>, Kwargs)> for StepDescription {
    fn from((handler, args, kwargs): (H, Vec<Value>, Kwargs)) -> Self {
        Self::Parts(vec![
            StepPart::Handler(handler.into()),
            StepPart::Args(args),
            StepPart::Kwargs(kwargs),
        ])
    }
}
