//! settings-compare library
//!
//! Flattens nested JSON settings into colon-keyed leaves, rebuilds nested
//! documents from such leaves, and computes the override-only diff between a
//! base document and an override.
//!
//! ```
//! use serde_json::json;
//! use settings_compare::{FlatView, KeyValue, TreeValue, diff};
//!
//! let base = TreeValue::from_json(json!({"top-level": "v1", "a": {"a": "aa"}})).unwrap();
//! let over = TreeValue::from_json(json!({"top-level": "v2", "a": {"a": "aa"}, "b": "new"})).unwrap();
//!
//! let kvs = diff(&FlatView::from_tree(&base).unwrap(), &FlatView::from_tree(&over).unwrap());
//! assert_eq!(kvs, vec![KeyValue::new("b", "new"), KeyValue::new("top-level", "v2")]);
//! ```

pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod flat;
pub mod flatten;
pub mod logging;
pub mod path;
pub mod render;
pub mod unflatten;
pub mod value;

pub use diff::{ConfigDiff, DiffOptions, NullPolicy, diff, diff_views};
pub use error::{Error, ErrorCode, Result};
pub use flat::{FlatView, KeyValue};
pub use flatten::{KeyPolicy, flatten, flatten_with};
pub use path::{KeyPath, SEPARATOR};
pub use unflatten::unflatten;
pub use value::{Scalar, TreeValue};
