//! Differential checks across strictness modes and surface formats.
//!
//! [`DifferentialHarness`] feeds one payload through several serializer
//! configurations and compares the outcomes. Any disagreement is returned as
//! a [`Divergence`] value; nothing here panics, so the same checks serve
//! proptest suites, cargo-fuzz targets and regular tests.

use std::fmt;
use std::sync::Arc;

use objcodec_format::{DEFAULT_INDENT, DecodeLimits, Node};
use objcodec_schema::{GroupVersionKind, Object, TypeResolver};

use crate::options::SerializerOptions;
use crate::serializer::Serializer;

/// Outcome of a check that found no divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	/// The payload was rejected consistently.
	Rejected,
	/// Decoded, and re-encoding reproduced the input exactly.
	Exact,
	/// Decoded; the input was not canonical but its encoding is a fixpoint.
	Normalized,
}

/// Alternative surface rendering of the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
	/// The payload bytes as they are, read by a YAML serializer.
	RawYaml,
	/// The payload rendered as YAML.
	Yaml,
	/// The payload rendered as indented JSON.
	Pretty,
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::RawYaml => f.write_str("raw YAML"),
			Self::Yaml => f.write_str("YAML"),
			Self::Pretty => f.write_str("pretty JSON"),
		}
	}
}

/// A contract violation found by the harness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Divergence {
	/// Non-strict decoding failed on a payload strict decoding accepted.
	#[error("non-strict decoding rejected a payload accepted in strict mode: {error}")]
	NonStrictRejected {
		/// Non-strict error message.
		error: String,
	},

	/// Both modes succeeded but produced different objects.
	#[error("strict and non-strict decoding produced different objects")]
	NonStrictDiffers,

	/// A rendering of a rejected payload was accepted.
	#[error("{variant} rendering accepted a payload rejected by compact JSON decoding")]
	VariantAccepted {
		/// Rendering that was accepted.
		variant: Variant,
	},

	/// A rendering of an accepted payload was rejected.
	#[error("{variant} rendering rejected a payload accepted by compact JSON decoding: {error}")]
	VariantRejected {
		/// Rendering that was rejected.
		variant: Variant,
		/// Decode error message.
		error: String,
	},

	/// A rendering decoded to a different object.
	#[error("{variant} rendering decoded to a different object")]
	VariantDiffers {
		/// Rendering that differed.
		variant: Variant,
	},

	/// A decoded object could not be encoded.
	#[error("encoding a decoded object failed with {}: {error}", .options.identifier())]
	EncodeFailed {
		/// Serializer configuration that failed.
		options: SerializerOptions,
		/// Encode error message.
		error: String,
	},

	/// Re-decoding the encoder output did not reproduce the object or bytes.
	#[error("encoding is not a fixpoint: {first} became {second}")]
	RoundTripUnstable {
		/// First encoding.
		first: String,
		/// Encoding after another decode/encode cycle.
		second: String,
	},
}

/// Runs cross-configuration checks against one resolver.
///
/// ```
/// use std::sync::Arc;
/// use objcodec_json::{DifferentialHarness, Verdict};
/// use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape};
///
/// let shape = Shape::builder("Pod").type_meta().build().unwrap();
/// let scheme = Scheme::new().with(GroupVersionKind::new("", "v1", "Pod"), shape).unwrap();
/// let harness = DifferentialHarness::new(Arc::new(scheme));
///
/// assert_eq!(harness.check_strict_decode(br#"{"apiVersion":"v1","kind":"Pod"}"#), Ok(Verdict::Exact));
/// assert_eq!(harness.check_strict_decode(br#"{"apiVersion":"v1","kind":"Pod","x":1}"#), Ok(Verdict::Rejected));
/// ```
#[derive(Debug, Clone)]
pub struct DifferentialHarness {
	hint: Option<GroupVersionKind>,
	limits: DecodeLimits,
	strict: Serializer,
	non_strict: Serializer,
	strict_raw_yaml: Serializer,
	strict_yaml: Serializer,
	strict_pretty: Serializer,
	pretty: Serializer,
	yaml: Serializer,
}

impl DifferentialHarness {
	/// Creates a harness with default limits and no type hint.
	pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
		Self::with_limits(resolver, DecodeLimits::default())
	}

	/// Creates a harness whose serializers share `limits`.
	pub fn with_limits(resolver: Arc<dyn TypeResolver>, limits: DecodeLimits) -> Self {
		let build = |options: SerializerOptions, limits: DecodeLimits| {
			Serializer::new(Arc::clone(&resolver), options).with_limits(limits)
		};
		// Renderings are larger than their source; only depth is bounded for them.
		let variant_limits = limits.without_body_limit();
		Self {
			hint: None,
			limits,
			strict: build(SerializerOptions::new(false, false, true), limits),
			non_strict: build(SerializerOptions::new(false, false, false), limits),
			strict_raw_yaml: build(SerializerOptions::new(true, false, true), limits),
			strict_yaml: build(SerializerOptions::new(true, false, true), variant_limits),
			strict_pretty: build(SerializerOptions::new(false, true, true), variant_limits),
			pretty: build(SerializerOptions::new(false, true, false), limits),
			yaml: build(SerializerOptions::new(true, false, false), limits),
		}
	}

	/// Type hint passed to every decode.
	pub fn with_hint(mut self, hint: GroupVersionKind) -> Self {
		self.hint = Some(hint);
		self
	}

	/// Checks strict decoding of `data` against the other configurations.
	///
	/// - a strict rejection must also reject the YAML and pretty renderings,
	///   and the payload itself read as YAML when it is a JSON document;
	/// - a strict success implies non-strict success with an equal object, and
	///   equal objects from the renderings and from the payload read as YAML;
	/// - the strict object must round-trip (exactly, or as a fixpoint).
	pub fn check_strict_decode(&self, data: &[u8]) -> Result<Verdict, Divergence> {
		let hint = self.hint.as_ref();
		let renderings = self.renderings(data);

		let object = match self.strict.decode(data, hint) {
			Ok((object, _)) => object,
			Err(_) => {
				for (variant, bytes) in &renderings {
					if self.variant_serializer(*variant).decode(bytes, hint).is_ok() {
						return Err(Divergence::VariantAccepted { variant: *variant });
					}
				}
				return Ok(Verdict::Rejected);
			}
		};

		match self.non_strict.decode(data, hint) {
			Ok((lenient, _)) if lenient == object => {}
			Ok(_) => return Err(Divergence::NonStrictDiffers),
			Err(err) => {
				return Err(Divergence::NonStrictRejected {
					error: err.to_string(),
				});
			}
		}

		for (variant, bytes) in &renderings {
			match self.variant_serializer(*variant).decode(bytes, hint) {
				Ok((decoded, _)) if decoded == object => {}
				Ok(_) => return Err(Divergence::VariantDiffers { variant: *variant }),
				Err(err) => {
					return Err(Divergence::VariantRejected {
						variant: *variant,
						error: err.to_string(),
					});
				}
			}
		}

		self.round_trip(&self.strict, data, &object)
	}

	/// Checks that whatever non-strict decoding accepts can be encoded in
	/// every output format and round-trips.
	///
	/// A JSON payload read by the non-strict YAML serializer must get the
	/// same outcome.
	pub fn check_non_strict_decode(&self, data: &[u8]) -> Result<Verdict, Divergence> {
		let hint = self.hint.as_ref();
		let is_json = Node::from_json_slice(data, &self.limits).is_ok();

		let Ok((object, _)) = self.non_strict.decode(data, hint) else {
			if is_json && self.yaml.decode(data, hint).is_ok() {
				return Err(Divergence::VariantAccepted {
					variant: Variant::RawYaml,
				});
			}
			return Ok(Verdict::Rejected);
		};

		match self.yaml.decode(data, hint) {
			Ok((decoded, _)) if decoded == object => {}
			Ok(_) => {
				return Err(Divergence::VariantDiffers {
					variant: Variant::RawYaml,
				});
			}
			Err(err) => {
				return Err(Divergence::VariantRejected {
					variant: Variant::RawYaml,
					error: err.to_string(),
				});
			}
		}

		let verdict = self.round_trip(&self.non_strict, data, &object)?;
		for serializer in [&self.yaml, &self.pretty] {
			encode(serializer, &object)?;
		}
		Ok(verdict)
	}

	fn round_trip(&self, serializer: &Serializer, data: &[u8], object: &Object) -> Result<Verdict, Divergence> {
		let first = encode(serializer, object)?;
		if first == data {
			return Ok(Verdict::Exact);
		}

		let unstable = |second: &[u8]| Divergence::RoundTripUnstable {
			first: String::from_utf8_lossy(&first).into_owned(),
			second: String::from_utf8_lossy(second).into_owned(),
		};
		let redecoded = match self.non_strict.decode(&first, self.hint.as_ref()) {
			Ok((redecoded, _)) => redecoded,
			Err(err) => return Err(unstable(err.to_string().as_bytes())),
		};
		let second = encode(serializer, &redecoded)?;
		if redecoded != *object || second != first {
			return Err(unstable(&second));
		}
		Ok(Verdict::Normalized)
	}

	/// `data` itself plus its YAML and pretty renderings, or none when it
	/// does not parse as JSON.
	fn renderings(&self, data: &[u8]) -> Vec<(Variant, Vec<u8>)> {
		let Ok(node) = Node::from_json_slice(data, &self.limits) else {
			return Vec::new();
		};
		let mut out = Vec::with_capacity(3);
		out.push((Variant::RawYaml, data.to_vec()));
		if let Ok(yaml) = node.to_yaml_vec() {
			out.push((Variant::Yaml, yaml));
		}
		if let Ok(pretty) = node.to_pretty_json_vec(DEFAULT_INDENT) {
			out.push((Variant::Pretty, pretty));
		}
		out
	}

	fn variant_serializer(&self, variant: Variant) -> &Serializer {
		match variant {
			Variant::RawYaml => &self.strict_raw_yaml,
			Variant::Yaml => &self.strict_yaml,
			Variant::Pretty => &self.strict_pretty,
		}
	}
}

fn encode(serializer: &Serializer, object: &Object) -> Result<Vec<u8>, Divergence> {
	serializer
		.encode_to_vec(object)
		.map_err(|err| Divergence::EncodeFailed {
			options: serializer.options(),
			error: err.to_string(),
		})
}
