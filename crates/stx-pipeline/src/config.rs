//! Declarative pipeline configuration.
//!
//! A pipeline can be described as JSON and built against a handler registry:
//!
//! ```json
//! {
//!   "columns": ["label"],
//!   "steps": [
//!     "normalize",
//!     ["strip_punctuation", {"replace": "_"}],
//!     ["hash_string", ["sha256"]]
//!   ]
//! }
//! ```
//!
//! Each step goes through the same validation as [`Pipeline::then`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builtin::HandlerRegistry;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Serializable description of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Explicit target columns. When absent, string columns are discovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    /// Step descriptions, in execution order.
    #[serde(default)]
    pub steps: Vec<Value>,
}

impl PipelineConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`](crate::PipelineError::Config) if the
    /// text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Pipeline {
    /// Build a validated pipeline from a configuration using the built-in
    /// handlers.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while adding a step.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::from_config_with_registry(config, HandlerRegistry::builtin())
    }

    /// Build a validated pipeline from a configuration, resolving handler
    /// names against `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while adding a step.
    pub fn from_config_with_registry(
        config: &PipelineConfig,
        registry: HandlerRegistry,
    ) -> Result<Self> {
        let mut pipeline = match &config.columns {
            Some(columns) => Pipeline::with_columns(columns.iter().cloned()),
            None => Pipeline::new(),
        }
        .with_registry(registry);

        for step in &config.steps {
            pipeline.then_json(step)?;
        }
        Ok(pipeline)
    }

    /// Parse a JSON configuration and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid JSON, otherwise the first
    /// error raised while adding a step.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_config(&PipelineConfig::from_json_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PipelineError};
    use serde_json::json;

    #[test]
    fn test_from_json_str() {
        let pipeline = Pipeline::from_json_str(
            r#"{
                "columns": ["label"],
                "steps": [
                    "normalize",
                    ["strip_punctuation", {"replace": "_"}],
                    "snake_case"
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(pipeline.columns(), Some(&["label".to_string()][..]));
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.apply("Café, Bar").unwrap(), "cafe__bar");
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        let pipeline = Pipeline::from_config(&config).unwrap();
        assert!(pipeline.is_empty());
        assert!(pipeline.columns().is_none());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = Pipeline::from_json_str("{\"steps\": [").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = PipelineConfig::from_json_str(r#"{"stepz": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_step_errors_keep_their_kind() {
        let cases = [
            (json!({"steps": [42]}), ErrorKind::Type),
            (json!({"steps": ["nope"]}), ErrorKind::Type),
            (json!({"steps": [[["sha1"]]]}), ErrorKind::Value),
            (json!({"steps": [["hash_string", ["nope"]]]}), ErrorKind::Value),
        ];
        for (value, kind) in cases {
            let config: PipelineConfig = serde_json::from_value(value).unwrap();
            let err = Pipeline::from_config(&config).unwrap_err();
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_config_serializes_back() {
        let config = PipelineConfig {
            columns: None,
            steps: vec![json!("snake_case")],
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"steps": ["snake_case"]})
        );
    }
}
