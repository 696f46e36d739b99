//! Wire format definitions.

use std::path::Path;

/// Surface encodings understood by objcodec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum WireFormat {
	/// JSON (default). Canonical form is compact JSON.
	#[default]
	Json,

	/// YAML, transcoded to JSON before decoding.
	Yaml,
}

impl WireFormat {
	/// Determines the format from a file extension.
	///
	/// ```
	/// # use objcodec_format::WireFormat;
	/// assert_eq!(WireFormat::from_extension("json"), Some(WireFormat::Json));
	/// assert_eq!(WireFormat::from_extension("YML"), Some(WireFormat::Yaml));
	/// assert_eq!(WireFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Determines the format from a media type, ignoring parameters.
	///
	/// ```
	/// # use objcodec_format::WireFormat;
	/// assert_eq!(
	///     WireFormat::from_media_type("application/json; charset=utf-8"),
	///     Some(WireFormat::Json)
	/// );
	/// assert_eq!(WireFormat::from_media_type("application/x-yaml"), Some(WireFormat::Yaml));
	/// ```
	pub fn from_media_type(media_type: &str) -> Option<Self> {
		let essence = media_type
			.split(';')
			.next()
			.unwrap_or_default()
			.trim()
			.to_ascii_lowercase();
		match essence.as_str() {
			"application/json" => Some(Self::Json),
			"application/yaml" | "application/x-yaml" | "text/yaml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Returns the default file extension for this format.
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}

	/// Returns the canonical media type for this format.
	pub fn media_type(&self) -> &'static str {
		match self {
			Self::Json => "application/json",
			Self::Yaml => "application/yaml",
		}
	}
}

impl std::fmt::Display for WireFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}
