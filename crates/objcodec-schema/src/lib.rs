//! Type identities, shapes and the type registry for objcodec.
//!
//! This crate holds everything the serializer needs to know about types
//! without knowing anything about wire formats:
//!
//! - [`GroupVersionKind`] - type identity carried by `apiVersion` / `kind`
//! - [`Shape`] / [`FieldType`] - structural schema of a record
//! - [`Object`] / [`Record`] / [`Value`] - the decoded, typed representation
//! - [`Scheme`] / [`TypeResolver`] - explicit registry mapping identities to shapes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape, TypeResolver};
//!
//! let pod = Shape::builder("Pod")
//!     .type_meta()
//!     .field("spec", FieldType::Any)
//!     .build()
//!     .unwrap();
//!
//! let mut scheme = Scheme::new();
//! scheme.register(GroupVersionKind::new("", "v1", "Pod"), pod).unwrap();
//! let resolver: Arc<dyn TypeResolver> = Arc::new(scheme);
//! assert!(resolver.recognizes(&GroupVersionKind::new("", "v1", "Pod")));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod gvk;
pub mod object;
pub mod scheme;
pub mod shape;

pub use error::{SchemeError, SchemeResult};
pub use gvk::{GroupVersionKind, split_api_version};
pub use object::{Object, Record, Value};
pub use scheme::{Scheme, TypeResolver};
pub use shape::{API_VERSION_FIELD, Field, FieldType, KIND_FIELD, Shape, ShapeBuilder};
