//! The serializer: one fixed configuration wiring the metadata probe, type
//! resolution, transcoding and the decoder/encoder together.

use std::fmt;
use std::io;
use std::sync::Arc;

use objcodec_format::{
	DecodeLimits, DefaultMetaFactory, FormatAdapter, IndentFormatter, MetaFactory, Node,
	PrettyFormatter, YamlAdapter,
};
use objcodec_schema::{GroupVersionKind, Object, TypeResolver};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::options::SerializerOptions;

/// Decodes and encodes objects for one [`SerializerOptions`] combination.
///
/// A serializer holds no mutable state; one instance can be shared across
/// threads and used concurrently.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use objcodec_json::{Serializer, SerializerOptions};
/// use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape};
///
/// let mut scheme = Scheme::new();
/// scheme
///     .register(
///         GroupVersionKind::new("", "v1", "ConfigMap"),
///         Shape::builder("ConfigMap")
///             .type_meta()
///             .field("data", FieldType::map(FieldType::String))
///             .build()
///             .unwrap(),
///     )
///     .unwrap();
///
/// let serializer = Serializer::new(Arc::new(scheme), SerializerOptions::default().with_strict(true));
/// let input = br#"{"apiVersion":"v1","kind":"ConfigMap","data":{"a":"1"}}"#;
/// let (object, gvk) = serializer.decode(input, None).unwrap();
/// assert_eq!(gvk.kind, "ConfigMap");
///
/// let mut out = Vec::new();
/// serializer.encode(&object, &mut out).unwrap();
/// assert_eq!(out, input);
/// ```
#[derive(Clone)]
pub struct Serializer {
	options: SerializerOptions,
	limits: DecodeLimits,
	resolver: Arc<dyn TypeResolver>,
	meta: Arc<dyn MetaFactory>,
	adapter: Arc<dyn FormatAdapter>,
	pretty: Arc<dyn PrettyFormatter>,
	decoder: Decoder,
	encoder: Encoder,
}

impl Serializer {
	/// Creates a serializer with default collaborators and limits.
	pub fn new(resolver: Arc<dyn TypeResolver>, options: SerializerOptions) -> Self {
		let limits = DecodeLimits::default();
		Self {
			options,
			limits,
			resolver,
			meta: Arc::new(DefaultMetaFactory),
			adapter: Arc::new(YamlAdapter),
			pretty: Arc::new(IndentFormatter::default()),
			decoder: Decoder::new(options.strict),
			encoder: Encoder::new(&limits),
		}
	}

	/// Replaces the metadata probe.
	pub fn with_meta_factory(mut self, meta: Arc<dyn MetaFactory>) -> Self {
		self.meta = meta;
		self
	}

	/// Replaces the YAML adapter.
	pub fn with_format_adapter(mut self, adapter: Arc<dyn FormatAdapter>) -> Self {
		self.adapter = adapter;
		self
	}

	/// Replaces the pretty printer.
	pub fn with_pretty_formatter(mut self, pretty: Arc<dyn PrettyFormatter>) -> Self {
		self.pretty = pretty;
		self
	}

	/// Replaces the decoding limits. The encoder refuses objects deeper than
	/// `limits.max_depth()` as well.
	pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
		self.limits = limits;
		self.encoder = Encoder::new(&limits);
		self
	}

	/// Options this serializer was built with.
	pub fn options(&self) -> SerializerOptions {
		self.options
	}

	/// Active limits.
	pub fn limits(&self) -> &DecodeLimits {
		&self.limits
	}

	/// Type resolver used for both directions.
	pub fn resolver(&self) -> &Arc<dyn TypeResolver> {
		&self.resolver
	}

	/// Stable identifier of this configuration.
	pub fn identifier(&self) -> String {
		self.options.identifier()
	}

	/// Returns true if `data` looks like something this serializer reads.
	///
	/// JSON serializers claim payloads starting with `{`; YAML has no
	/// reliable signature, so YAML serializers never claim anything.
	pub fn recognizes_data(&self, data: &[u8]) -> bool {
		if self.options.yaml {
			return false;
		}
		data.iter()
			.find(|b| !b.is_ascii_whitespace())
			.is_some_and(|&b| b == b'{')
	}

	/// Decodes `data` into an object.
	///
	/// The type comes from the payload's `apiVersion` and `kind`, with gaps
	/// filled from `hint`. Returns the object together with the resolved type.
	pub fn decode(
		&self,
		data: &[u8],
		hint: Option<&GroupVersionKind>,
	) -> DecodeResult<(Object, GroupVersionKind)> {
		self.limits.check_body_size(data.len())?;

		let transcoded;
		let json: &[u8] = if self.options.yaml {
			transcoded = self.adapter.yaml_to_json(data, &self.limits)?;
			&transcoded
		} else {
			data
		};

		let actual = self.meta.extract_meta(json)?.with_defaults(hint);
		if actual.kind.is_empty() {
			return Err(DecodeError::MissingKind);
		}
		if actual.version.is_empty() {
			return Err(DecodeError::MissingVersion);
		}
		let shape = self
			.resolver
			.resolve(&actual)
			.ok_or_else(|| DecodeError::UnknownType(actual.clone()))?;

		// Transcoded YAML was size-checked on the way in.
		let node_limits = if self.options.yaml {
			self.limits.without_body_limit()
		} else {
			self.limits
		};
		let node = Node::from_json_slice(json, &node_limits)?;

		tracing::trace!(gvk = %actual, strict = self.options.strict, yaml = self.options.yaml, "decoding object");
		let object = self.decoder.decode(node, &shape, &actual)?;
		Ok((object, actual))
	}

	/// Encodes `object` and writes it to `sink`.
	pub fn encode<W: io::Write + ?Sized>(&self, object: &Object, sink: &mut W) -> EncodeResult<()> {
		let bytes = self.encode_to_vec(object)?;
		sink.write_all(&bytes)?;
		Ok(())
	}

	/// Encodes `object` into a fresh buffer.
	pub fn encode_to_vec(&self, object: &Object) -> EncodeResult<Vec<u8>> {
		let gvk = object.gvk();
		let shape = self
			.resolver
			.resolve(gvk)
			.ok_or_else(|| EncodeError::UnregisteredShape(gvk.clone()))?;

		let mut out = self.encoder.to_canonical(object, &shape)?;
		if self.options.pretty {
			out = self.pretty.format(&out)?;
		}
		if self.options.yaml {
			out = self.adapter.json_to_yaml(&out)?;
		}
		tracing::trace!(gvk = %gvk, bytes = out.len(), "encoded object");
		Ok(out)
	}
}

impl fmt::Debug for Serializer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Serializer")
			.field("options", &self.options)
			.field("limits", &self.limits)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use objcodec_format::{FormatError, FormatResult, LimitExceeded};
	use objcodec_schema::{FieldType, Scheme, Shape};
	use rstest::{fixture, rstest};

	use crate::error::DecodeErrorKind;

	#[fixture]
	fn scheme() -> Arc<dyn TypeResolver> {
		let pod = Shape::builder("Pod")
			.type_meta()
			.field("spec", FieldType::Any)
			.build()
			.unwrap();
		Arc::new(Scheme::new().with(GroupVersionKind::new("", "v1", "Pod"), pod).unwrap())
	}

	fn serializer(resolver: &Arc<dyn TypeResolver>, options: SerializerOptions) -> Serializer {
		Serializer::new(Arc::clone(resolver), options)
	}

	#[rstest]
	fn test_hint_fills_kind(scheme: Arc<dyn TypeResolver>) {
		let hint = GroupVersionKind::new("", "v1", "Pod");
		let (object, gvk) = serializer(&scheme, SerializerOptions::default())
			.decode(br#"{"apiVersion":"v1"}"#, Some(&hint))
			.unwrap();
		assert_eq!(gvk, hint);
		assert_eq!(object.kind(), None);
	}

	#[rstest]
	#[case(br#"{"apiVersion":"v1"}"#.as_slice(), DecodeErrorKind::MissingKind)]
	#[case(br#"{"kind":"Pod"}"#.as_slice(), DecodeErrorKind::MissingVersion)]
	#[case(br#"{"apiVersion":"v2","kind":"Pod"}"#.as_slice(), DecodeErrorKind::UnknownType)]
	#[case(br#"{"apiVersion":"v1","kind":"Pod""#.as_slice(), DecodeErrorKind::Truncated)]
	#[case(b"not json".as_slice(), DecodeErrorKind::Syntax)]
	fn test_decode_errors(scheme: Arc<dyn TypeResolver>, #[case] input: &[u8], #[case] kind: DecodeErrorKind) {
		let err = serializer(&scheme, SerializerOptions::default())
			.decode(input, None)
			.unwrap_err();
		assert_eq!(err.kind(), kind);
	}

	#[rstest]
	fn test_body_limit(scheme: Arc<dyn TypeResolver>) {
		let ser = serializer(&scheme, SerializerOptions::default())
			.with_limits(DecodeLimits::default().with_max_body_size(8));
		let err = ser
			.decode(br#"{"apiVersion":"v1","kind":"Pod"}"#, None)
			.unwrap_err();
		assert_eq!(
			err,
			DecodeError::Format(FormatError::Limit(LimitExceeded::BodyTooLarge {
				limit: 8,
				actual: 32
			}))
		);
	}

	#[rstest]
	fn test_yaml_decode_encode(scheme: Arc<dyn TypeResolver>) {
		let ser = serializer(&scheme, SerializerOptions::new(true, false, true));
		let (object, _) = ser
			.decode(b"apiVersion: v1\nkind: Pod\nspec:\n  replicas: 2\n", None)
			.unwrap();
		let out = String::from_utf8(ser.encode_to_vec(&object).unwrap()).unwrap();
		assert_eq!(out, "apiVersion: v1\nkind: Pod\nspec:\n  replicas: 2\n");
	}

	#[rstest]
	fn test_pretty_encode(scheme: Arc<dyn TypeResolver>) {
		let ser = serializer(&scheme, SerializerOptions::new(false, true, false));
		let (object, _) = ser.decode(br#"{"kind":"Pod","apiVersion":"v1"}"#, None).unwrap();
		let out = String::from_utf8(ser.encode_to_vec(&object).unwrap()).unwrap();
		assert_eq!(out, "{\n  \"apiVersion\": \"v1\",\n  \"kind\": \"Pod\"\n}");
	}

	#[rstest]
	fn test_encode_unregistered(scheme: Arc<dyn TypeResolver>) {
		let object = Object::with_type_meta(GroupVersionKind::new("", "v1", "Service"), Default::default());
		let err = serializer(&scheme, SerializerOptions::default())
			.encode_to_vec(&object)
			.unwrap_err();
		assert!(matches!(err, EncodeError::UnregisteredShape(gvk) if gvk.kind == "Service"));
	}

	struct FailingSink;

	impl io::Write for FailingSink {
		fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[rstest]
	fn test_sink_error_propagates(scheme: Arc<dyn TypeResolver>) {
		let ser = serializer(&scheme, SerializerOptions::default());
		let (object, _) = ser.decode(br#"{"apiVersion":"v1","kind":"Pod"}"#, None).unwrap();
		let err = ser.encode(&object, &mut FailingSink).unwrap_err();
		assert!(matches!(err, EncodeError::SinkWrite(_)));
	}

	#[rstest]
	#[case(SerializerOptions::default(), b"  \n{\"a\":1}".as_slice(), true)]
	#[case(SerializerOptions::default(), b"[1]".as_slice(), false)]
	#[case(SerializerOptions::default(), b"".as_slice(), false)]
	#[case(SerializerOptions::new(true, false, false), b"{\"a\":1}".as_slice(), false)]
	fn test_recognizes_data(
		scheme: Arc<dyn TypeResolver>,
		#[case] options: SerializerOptions,
		#[case] data: &[u8],
		#[case] expected: bool,
	) {
		assert_eq!(serializer(&scheme, options).recognizes_data(data), expected);
	}

	struct UppercaseAdapter;

	impl FormatAdapter for UppercaseAdapter {
		fn yaml_to_json(&self, data: &[u8], limits: &DecodeLimits) -> FormatResult<Vec<u8>> {
			YamlAdapter.yaml_to_json(data, limits)
		}

		fn json_to_yaml(&self, data: &[u8]) -> FormatResult<Vec<u8>> {
			Ok(YamlAdapter.json_to_yaml(data)?.to_ascii_uppercase())
		}
	}

	#[rstest]
	fn test_custom_adapter_is_used(scheme: Arc<dyn TypeResolver>) {
		let ser = serializer(&scheme, SerializerOptions::new(true, false, false))
			.with_format_adapter(Arc::new(UppercaseAdapter));
		let (object, _) = ser.decode(b"apiVersion: v1\nkind: Pod\n", None).unwrap();
		assert_eq!(ser.encode_to_vec(&object).unwrap(), b"APIVERSION: V1\nKIND: POD\n");
	}
}
