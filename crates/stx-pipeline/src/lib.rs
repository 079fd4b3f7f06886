//! String transformation pipelines.
//!
//! A [`Pipeline`] is an ordered list of validated string steps that is applied
//! to every cell of the text columns of a Polars `DataFrame`.
//!
//! # Overview
//!
//! This crate provides:
//! - **Handlers**: the [`Handler`] trait, closure wrappers ([`FnHandler`]) and a
//!   [`HandlerRegistry`] holding the built-in transforms by name
//! - **Registration**: [`Pipeline::add`] and the chainable [`Pipeline::then`],
//!   which probe every step with a test string before accepting it
//! - **Execution**: [`Pipeline::apply`] for one value and
//!   [`Pipeline::transform`] for a whole `DataFrame`
//! - **Configuration**: [`PipelineConfig`] to build pipelines from JSON
//!
//! # Example
//!
//! ```
//! use polars::prelude::*;
//! use stx_pipeline::Pipeline;
//!
//! let mut pipeline = Pipeline::with_columns(["label"]);
//! pipeline.then("strip_punctuation")?.then("snake_case")?;
//!
//! let df = DataFrame::new(vec![
//!     Series::new("x".into(), vec![1i32]).into(),
//!     Series::new("label".into(), vec![" One, Two! "]).into(),
//! ])?;
//!
//! let out = pipeline.transform(&df)?;
//! assert_eq!(out.column("label")?.str()?.get(0), Some("_one_two_"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Principles
//!
//! - **Eager validation**: a misbehaving step fails at registration, not
//!   halfway through a table
//! - **Pure execution**: `transform` never mutates the pipeline or its input
//! - **All or nothing**: the first failing cell aborts the whole transform

mod builtin;
mod config;
mod error;
mod executor;
mod handler;
mod pipeline;
mod step;

// Handlers
pub use builtin::HandlerRegistry;
pub use handler::{FnHandler, Handler, HandlerRef, Kwargs};

// Steps and pipeline
pub use pipeline::{PROBE_VALUE, Pipeline, check_handler};
pub use step::{Step, StepDescription, StepPart};

// Configuration
pub use config::PipelineConfig;

// Error type
pub use error::{ErrorKind, PipelineError, Result};
