//! Pipeline construction and per-value execution.

use serde_json::Value;

use crate::builtin::{HandlerRegistry, json_type_name};
use crate::error::{PipelineError, Result};
use crate::handler::{Handler, HandlerRef, Kwargs};
use crate::step::{Step, StepDescription};

/// Value every handler is called with before it is accepted as a step.
pub const PROBE_VALUE: &str = "test_string";

/// Checks that a handler works as a string step.
///
/// The handler is called once with [`PROBE_VALUE`] and the given arguments.
/// This is a runtime contract check: it catches handlers that reject strings
/// or the supplied arguments, before any table is processed.
///
/// # Errors
///
/// - [`PipelineError::Incompatible`] if the call fails
/// - [`PipelineError::NonStringResult`] if the call returns a non-string
pub fn check_handler(handler: &dyn Handler, args: &[Value], kwargs: &Kwargs) -> Result<()> {
    let result = handler
        .call(PROBE_VALUE, args, kwargs)
        .map_err(|source| PipelineError::Incompatible {
            name: handler.name().to_string(),
            source,
        })?;

    if result.is_string() {
        Ok(())
    } else {
        Err(PipelineError::NonStringResult {
            name: handler.name().to_string(),
            found: json_type_name(&result),
        })
    }
}

/// An ordered sequence of validated string steps.
///
/// Steps run in insertion order. The target columns are either an explicit
/// list given at construction or, when none is given, every string column of
/// the table being transformed.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use stx_pipeline::{Kwargs, Pipeline};
///
/// let mut pipeline = Pipeline::new();
/// pipeline
///     .add("strip_punctuation", vec![json!("_")], Kwargs::new())?
///     .then("snake_case")?;
///
/// assert_eq!(pipeline.apply("Hello, World")?, "hello__world");
/// # Ok::<(), stx_pipeline::PipelineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    columns: Option<Vec<String>>,
    steps: Vec<Step>,
    registry: HandlerRegistry,
}

impl Pipeline {
    /// Create an empty pipeline that targets every string column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pipeline that targets the given columns.
    ///
    /// An empty list behaves like no list: string columns are discovered.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: Some(columns.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Use `registry` to resolve handler names.
    #[must_use]
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The explicit column selection, if any.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// The registered steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The registry handler names are resolved against.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validates a handler and appends it as a step.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NotCallable`] if a handler name is not registered
    /// - [`PipelineError::Incompatible`] / [`PipelineError::NonStringResult`]
    ///   if the probe call fails (see [`check_handler`])
    pub fn add(
        &mut self,
        handler: impl Into<HandlerRef>,
        args: Vec<Value>,
        kwargs: Kwargs,
    ) -> Result<&mut Self> {
        let handler = match handler.into() {
            HandlerRef::Handler(handler) => handler,
            HandlerRef::Name(name) => self
                .registry
                .get(&name)
                .ok_or(PipelineError::NotCallable { name })?,
        };

        check_handler(handler.as_ref(), &args, &kwargs)?;

        tracing::debug!(
            handler = %handler.name(),
            args = args.len(),
            kwargs = kwargs.len(),
            position = self.steps.len(),
            "Added pipeline step"
        );
        self.steps.push(Step::new(handler, args, kwargs));
        Ok(self)
    }

    /// Adds a step from a compact description and returns the pipeline for
    /// chaining.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::MissingHandler`] if a combination names no handler
    /// - any error of [`Pipeline::add`]
    pub fn then(&mut self, step: impl Into<StepDescription>) -> Result<&mut Self> {
        let (handler, args, kwargs) = step.into().into_parts()?;
        self.add(handler, args, kwargs)
    }

    /// Adds a step from its JSON description.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidStepDescription`] if the value is neither a
    ///   handler name nor an array
    /// - any error of [`Pipeline::then`]
    pub fn then_json(&mut self, step: &Value) -> Result<&mut Self> {
        self.then(StepDescription::from_json(step)?)
    }

    /// Runs every step, in order, on a single value.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Handler`] with the handler's own error if a step fails
    /// - [`PipelineError::NonStringOutput`] if a step returns a non-string
    pub fn apply(&self, value: &str) -> Result<String> {
        let mut current = value.to_string();
        for step in &self.steps {
            current = match step.call(&current).map_err(PipelineError::Handler)? {
                Value::String(next) => next,
                other => {
                    return Err(PipelineError::NonStringOutput {
                        step: step.name().to_string(),
                        found: json_type_name(&other),
                    });
                }
            };
        }
        Ok(current)
    }

    /// One line per step, numbered in execution order.
    pub fn describe(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(idx, step)| format!("{}. {step}\n", idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FnHandler;
    use serde_json::json;

    #[test]
    fn test_add_resolves_builtin_names() {
        let mut pipeline = Pipeline::new();
        pipeline.add("normalize", vec![], Kwargs::new()).unwrap();
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.steps()[0].name(), "normalize");
    }

    #[test]
    fn test_unknown_name_is_not_callable() {
        let mut pipeline = Pipeline::new();
        let err = pipeline
            .add("does_not_exist", vec![], Kwargs::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotCallable { ref name } if name == "does_not_exist"));
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_probe_failure_is_incompatible() {
        let mut pipeline = Pipeline::new();
        let explode = FnHandler::new("explode", |_, _, _| anyhow::bail!("boom"));
        let err = pipeline.add(explode, vec![], Kwargs::new()).unwrap_err();
        assert!(matches!(err, PipelineError::Incompatible { .. }));
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_non_string_probe_result() {
        let mut pipeline = Pipeline::new();
        let length = FnHandler::new("length", |value, _, _| Ok(json!(value.len())));
        let err = pipeline.add(length, vec![], Kwargs::new()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NonStringResult { found: "number", .. }
        ));
    }

    #[test]
    fn test_probe_uses_supplied_arguments() {
        let mut pipeline = Pipeline::new();
        let err = pipeline
            .add("hash_string", vec![json!("not_an_algo")], Kwargs::new())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Incompatible { .. }));

        pipeline
            .add("hash_string", vec![json!("sha256")], Kwargs::new())
            .unwrap();
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn test_apply_runs_steps_in_order() {
        let mut pipeline = Pipeline::new();
        pipeline
            .then(("multi_replace", vec![json!({"a": "b"})]))
            .unwrap()
            .then(("multi_replace", vec![json!({"b": "c"})]))
            .unwrap();
        assert_eq!(pipeline.apply("abc").unwrap(), "ccc");
    }

    #[test]
    fn test_apply_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.apply(" As Is ").unwrap(), " As Is ");
    }

    #[test]
    fn test_apply_non_string_output_after_probe() {
        // Passes the probe but returns null for empty input.
        let flaky = FnHandler::new("flaky", |value, _, _| {
            Ok(if value.is_empty() {
                Value::Null
            } else {
                Value::String(value.to_string())
            })
        });
        let mut pipeline = Pipeline::new();
        pipeline.then(flaky).unwrap();

        assert_eq!(pipeline.apply("x").unwrap(), "x");
        assert!(matches!(
            pipeline.apply(""),
            Err(PipelineError::NonStringOutput { found: "null", .. })
        ));
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = HandlerRegistry::new();
        registry.register(FnHandler::from_str_fn("trim", |s| s.trim().to_string()));

        let mut pipeline = Pipeline::new().with_registry(registry);
        assert_eq!(pipeline.registry().len(), 1);
        assert!(pipeline.registry().contains("trim"));
        pipeline.then("trim").unwrap();
        assert!(matches!(
            pipeline.then("snake_case"),
            Err(PipelineError::NotCallable { .. })
        ));
        assert_eq!(pipeline.apply("  x  ").unwrap(), "x");
    }

    #[test]
    fn test_describe() {
        let mut pipeline = Pipeline::new();
        pipeline
            .then("normalize")
            .unwrap()
            .then(("strip_punctuation", vec![json!("_")]))
            .unwrap();
        assert_eq!(
            pipeline.describe(),
            "1. normalize()\n2. strip_punctuation(\"_\")\n"
        );
    }
}
