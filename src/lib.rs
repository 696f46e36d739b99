//! # objcodec
//!
//! Configurable object serializer for Kubernetes-style typed objects.
//!
//! Objects are identified by `apiVersion` and `kind`, resolved against an
//! explicit [`Scheme`] of record shapes, and read or written as compact JSON,
//! pretty JSON or YAML. Strict serializers reject unknown and duplicate
//! fields; non-strict ones drop unknown fields and keep the last of any
//! repeated key.
//!
//! ## Crates
//!
//! - [`schema`] - type identities, shapes, objects and the type registry
//! - [`format`] - document parsing, metadata probing, YAML transcoding and
//!   pretty printing
//! - [`json`] - decoder, encoder, serializer, factory, configuration and the
//!   differential harness
//!
//! ## Feature Flags
//!
//! - `test` - sample types and fixtures (`objcodec::test`)
//! - `property-based` - proptest strategies on top of `test`
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use objcodec::prelude::*;
//!
//! let shape = Shape::builder("ConfigMap")
//!     .type_meta()
//!     .field("data", FieldType::map(FieldType::String))
//!     .build()
//!     .unwrap();
//! let scheme = Scheme::new()
//!     .with(GroupVersionKind::new("", "v1", "ConfigMap"), shape)
//!     .unwrap();
//!
//! let factory = CodecFactory::new(Arc::new(scheme));
//! let yaml = b"apiVersion: v1\nkind: ConfigMap\ndata:\n  mode: fast\n";
//! let (object, gvk) = factory.decode(yaml, None, true).unwrap();
//! assert_eq!(gvk.kind, "ConfigMap");
//!
//! let json = factory.serializer(SerializerOptions::default()).encode_to_vec(&object).unwrap();
//! assert_eq!(json, br#"{"apiVersion":"v1","kind":"ConfigMap","data":{"mode":"fast"}}"#);
//! ```

pub use objcodec_format as format;
pub use objcodec_json as json;
pub use objcodec_schema as schema;
#[cfg(feature = "test")]
pub use objcodec_testkit as test;

pub use objcodec_format::{
	DecodeLimits, DefaultMetaFactory, FormatAdapter, FormatError, IndentFormatter, MetaFactory,
	Node, PrettyFormatter, WireFormat, YamlAdapter,
};
pub use objcodec_json::{
	CodecFactory, ConfigError, DecodeError, DecodeErrorKind, DifferentialHarness, EncodeError,
	Serializer, SerializerConfig, SerializerOptions, StrictError, Verdict,
};
pub use objcodec_schema::{
	FieldType, GroupVersionKind, Object, Record, Scheme, SchemeError, Shape, TypeResolver, Value,
};

/// Prelude module for convenient imports
///
/// Import everything needed to build a scheme and serialize objects:
/// ```
/// use objcodec::prelude::*;
/// ```
pub mod prelude {
	pub use crate::{
		CodecFactory, DecodeError, DecodeErrorKind, EncodeError, FieldType, GroupVersionKind,
		Object, Record, Scheme, Serializer, SerializerConfig, SerializerOptions, Shape,
		TypeResolver, Value,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}

#[cfg(test)]
mod tests {
	use super::prelude::*;
	use rstest::rstest;
	use std::sync::Arc;

	#[rstest]
	fn test_prelude_round_trip() {
		let shape = Shape::builder("Pod").type_meta().build().unwrap();
		let scheme = Scheme::new()
			.with(GroupVersionKind::new("", "v1", "Pod"), shape)
			.unwrap();
		let serializer = Serializer::new(Arc::new(scheme), SerializerOptions::default());

		let payload = br#"{"apiVersion":"v1","kind":"Pod"}"#;
		let (object, _) = serializer.decode(payload, None).unwrap();

		assert_eq!(serializer.encode_to_vec(&object).unwrap(), payload);
	}
}
