//! String sanitization functions.
//!
//! A fixed library of stateless `&str -> String` transforms, usable directly
//! or as steps of a `stx-pipeline` string pipeline:
//!
//! - [`normalize`]: fold accented characters to ASCII
//! - [`strip_punctuation`]: remove or substitute ASCII punctuation
//! - [`multi_replace`]: ordered literal substring replacement
//! - [`hash_string`]: hex digest with a named algorithm
//! - [`split_camel`]: split `CamelCase` words with spaces
//! - [`snake_case`]: lowercase and join words with underscores
//!
//! # Example
//!
//! ```
//! use stx_transforms::{normalize, snake_case, strip_punctuation};
//!
//! let cleaned = snake_case(&strip_punctuation(&normalize("Crème, Brûlée!"), ""));
//! assert_eq!(cleaned, "creme_brulee");
//! ```

mod error;
mod hash;
mod text;

pub use error::{Result, TransformError};
pub use hash::{DEFAULT_HASH_ALGORITHM, HashAlgorithm, hash_string, hash_string_with};
pub use text::{
    DEFAULT_PUNCTUATION_REPLACEMENT, multi_replace, normalize, snake_case, split_camel,
    strip_punctuation,
};
