//! One serializer per option combination, looked up by options or media type.

use std::sync::Arc;

use objcodec_format::{DecodeLimits, WireFormat};
use objcodec_schema::{GroupVersionKind, Object, TypeResolver};

use crate::error::DecodeResult;
use crate::options::SerializerOptions;
use crate::serializer::Serializer;

/// Media types the factory answers to.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &["application/json", "application/yaml", "application/x-yaml"];

/// Holds all eight serializers over one shared resolver.
///
/// ```
/// use std::sync::Arc;
/// use objcodec_json::{CodecFactory, SerializerOptions};
/// use objcodec_schema::Scheme;
///
/// let factory = CodecFactory::new(Arc::new(Scheme::new()));
/// let yaml = factory.for_media_type("application/x-yaml", true, false).unwrap();
/// assert_eq!(yaml.options(), SerializerOptions::new(true, false, true));
/// assert!(factory.for_media_type("text/plain", false, false).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CodecFactory {
	serializers: [Serializer; 8],
}

impl CodecFactory {
	/// Builds serializers with default limits.
	pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
		Self::with_limits(resolver, DecodeLimits::default())
	}

	/// Builds serializers sharing `limits`.
	pub fn with_limits(resolver: Arc<dyn TypeResolver>, limits: DecodeLimits) -> Self {
		Self::from_fn(|options| Serializer::new(Arc::clone(&resolver), options).with_limits(limits))
	}

	/// Builds each serializer with `build`, called once per combination.
	pub fn from_fn(mut build: impl FnMut(SerializerOptions) -> Serializer) -> Self {
		Self {
			serializers: SerializerOptions::all().map(&mut build),
		}
	}

	/// Serializer for exactly these options.
	pub fn serializer(&self, options: SerializerOptions) -> &Serializer {
		&self.serializers[slot(options)]
	}

	/// Serializer for a media type, e.g. `application/json; charset=utf-8`.
	pub fn for_media_type(&self, media_type: &str, strict: bool, pretty: bool) -> Option<&Serializer> {
		let format = WireFormat::from_media_type(media_type)?;
		let options = SerializerOptions::new(format == WireFormat::Yaml, pretty, strict);
		Some(self.serializer(options))
	}

	/// All serializers, in [`SerializerOptions::all`] order.
	pub fn serializers(&self) -> impl Iterator<Item = &Serializer> {
		self.serializers.iter()
	}

	/// Decodes a payload of unknown surface format.
	///
	/// JSON objects go to the JSON serializer; anything else is read as YAML.
	pub fn decode(
		&self,
		data: &[u8],
		hint: Option<&GroupVersionKind>,
		strict: bool,
	) -> DecodeResult<(Object, GroupVersionKind)> {
		let json = self.serializer(SerializerOptions::new(false, false, strict));
		if json.recognizes_data(data) {
			return json.decode(data, hint);
		}
		self.serializer(SerializerOptions::new(true, false, strict))
			.decode(data, hint)
	}
}

fn slot(options: SerializerOptions) -> usize {
	(usize::from(options.yaml) << 2) | (usize::from(options.pretty) << 1) | usize::from(options.strict)
}

#[cfg(test)]
mod tests {
	use super::*;
	use objcodec_schema::{FieldType, Scheme, Shape};
	use rstest::{fixture, rstest};

	#[fixture]
	fn factory() -> CodecFactory {
		let shape = Shape::builder("ConfigMap")
			.type_meta()
			.field("data", FieldType::map(FieldType::String))
			.build()
			.unwrap();
		let scheme = Scheme::new()
			.with(GroupVersionKind::new("", "v1", "ConfigMap"), shape)
			.unwrap();
		CodecFactory::new(Arc::new(scheme))
	}

	#[rstest]
	fn test_slots_match_options(factory: CodecFactory) {
		for options in SerializerOptions::all() {
			assert_eq!(factory.serializer(options).options(), options);
		}
		assert_eq!(factory.serializers().count(), 8);
	}

	#[rstest]
	#[case("application/json", false, true, SerializerOptions::new(false, true, false))]
	#[case("application/yaml", true, false, SerializerOptions::new(true, false, true))]
	#[case("application/x-yaml; charset=utf-8", false, false, SerializerOptions::new(true, false, false))]
	fn test_for_media_type(
		factory: CodecFactory,
		#[case] media_type: &str,
		#[case] strict: bool,
		#[case] pretty: bool,
		#[case] expected: SerializerOptions,
	) {
		let serializer = factory.for_media_type(media_type, strict, pretty).unwrap();
		assert_eq!(serializer.options(), expected);
	}

	#[rstest]
	fn test_supported_media_types_resolve(factory: CodecFactory) {
		for media_type in SUPPORTED_MEDIA_TYPES {
			assert!(factory.for_media_type(media_type, false, false).is_some());
		}
	}

	#[rstest]
	#[case(br#"{"apiVersion":"v1","kind":"ConfigMap","data":{"k":"v"}}"#.as_slice())]
	#[case(b"apiVersion: v1\nkind: ConfigMap\ndata:\n  k: v\n".as_slice())]
	fn test_decode_sniffs_format(factory: CodecFactory, #[case] data: &[u8]) {
		let (object, gvk) = factory.decode(data, None, true).unwrap();
		assert_eq!(gvk.kind, "ConfigMap");
		let value = object.fields().lookup(&["data", "k"]);
		assert_eq!(value.and_then(|v| v.as_str()), Some("v"));
	}

	#[rstest]
	fn test_shared_limits() {
		let limits = DecodeLimits::strict();
		let factory = CodecFactory::with_limits(Arc::new(Scheme::new()), limits);
		assert!(factory.serializers().all(|s| *s.limits() == limits));
	}
}
