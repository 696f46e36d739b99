//! Serializer options.

use objcodec_format::WireFormat;
use serde::{Deserialize, Serialize};

/// The three independent switches of a [`Serializer`](crate::Serializer).
///
/// All eight combinations are valid.
///
/// # Examples
///
/// ```
/// use objcodec_json::SerializerOptions;
///
/// let options = SerializerOptions::default().with_strict(true);
/// assert_eq!(
///     options.identifier(),
///     r#"json:{"name":"json","pretty":"false","strict":"true","yaml":"false"}"#
/// );
/// assert_eq!(SerializerOptions::all().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
	/// Read and write YAML instead of JSON.
	pub yaml: bool,

	/// Indent JSON output. Applied before YAML transcoding.
	pub pretty: bool,

	/// Reject unknown and duplicate fields.
	pub strict: bool,
}

impl SerializerOptions {
	/// Creates options from the three switches.
	pub const fn new(yaml: bool, pretty: bool, strict: bool) -> Self {
		Self {
			yaml,
			pretty,
			strict,
		}
	}

	/// Every combination, in a stable order.
	pub const fn all() -> [Self; 8] {
		[
			Self::new(false, false, false),
			Self::new(false, false, true),
			Self::new(false, true, false),
			Self::new(false, true, true),
			Self::new(true, false, false),
			Self::new(true, false, true),
			Self::new(true, true, false),
			Self::new(true, true, true),
		]
	}

	/// Sets `yaml`.
	pub const fn with_yaml(mut self, yaml: bool) -> Self {
		self.yaml = yaml;
		self
	}

	/// Sets `pretty`.
	pub const fn with_pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	/// Sets `strict`.
	pub const fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Surface format read and written.
	pub fn wire_format(&self) -> WireFormat {
		if self.yaml {
			WireFormat::Yaml
		} else {
			WireFormat::Json
		}
	}

	/// Stable identifier; two serializers with the same identifier produce
	/// identical output for identical input.
	pub fn identifier(&self) -> String {
		format!(
			r#"json:{{"name":"json","pretty":"{}","strict":"{}","yaml":"{}"}}"#,
			self.pretty, self.strict, self.yaml
		)
	}
}
