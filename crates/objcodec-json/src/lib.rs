//! JSON and YAML object serializer with selectable strictness.
//!
//! A [`Serializer`] decodes bytes into typed [`Object`](objcodec_schema::Object)s
//! and encodes them back. Its behaviour is fixed at construction by
//! [`SerializerOptions`]:
//!
//! - `yaml`: read and write YAML (transcoded through canonical JSON)
//! - `pretty`: indent JSON output
//! - `strict`: reject unknown and duplicate fields
//!
//! Canonical compact JSON round-trips exactly: decoding it in non-strict mode
//! and encoding the result reproduces the input bytes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use objcodec_json::{DecodeErrorKind, Serializer, SerializerOptions};
//! use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape};
//!
//! let shape = Shape::builder("Pod").type_meta().field("spec", FieldType::Any).build().unwrap();
//! let scheme = Arc::new(Scheme::new().with(GroupVersionKind::new("", "v1", "Pod"), shape).unwrap());
//!
//! let strict = Serializer::new(scheme.clone(), SerializerOptions::default().with_strict(true));
//! let lenient = Serializer::new(scheme, SerializerOptions::default());
//!
//! let payload = br#"{"apiVersion":"v1","kind":"Pod","unknownField":true}"#;
//! let err = strict.decode(payload, None).unwrap_err();
//! assert_eq!(err.kind(), DecodeErrorKind::Strict);
//!
//! let (object, _) = lenient.decode(payload, None).unwrap();
//! assert!(object.get("unknownField").is_none());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod decoder;
pub mod differential;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod options;
pub mod serializer;

pub use config::{ConfigError, LimitsConfig, SerializerConfig};
pub use decoder::Decoder;
pub use differential::{DifferentialHarness, Divergence, Variant, Verdict};
pub use encoder::Encoder;
pub use error::{
	DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult, FieldViolation,
	StrictError, ViolationKind,
};
pub use factory::{CodecFactory, SUPPORTED_MEDIA_TYPES};
pub use options::SerializerOptions;
pub use serializer::Serializer;
