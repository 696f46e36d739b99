//! YAML and JSON transcoding.

use crate::document::Node;
use crate::error::FormatResult;
use crate::limits::DecodeLimits;

/// Purely syntactic conversion between YAML text and canonical JSON text.
///
/// Implementations must not coerce values: numbers stay numbers, strings stay
/// strings, key order and duplicate keys survive. Non-string YAML keys are
/// stringified; float keys take their JSON number form (`1e3` becomes
/// `"1000.0"`).
pub trait FormatAdapter: Send + Sync {
	/// Converts one YAML document into compact JSON.
	fn yaml_to_json(&self, data: &[u8], limits: &DecodeLimits) -> FormatResult<Vec<u8>>;

	/// Converts a JSON document into YAML.
	fn json_to_yaml(&self, data: &[u8]) -> FormatResult<Vec<u8>>;
}

/// [`FormatAdapter`] backed by `serde_yaml` and `serde_json` via [`Node`].
///
/// ```
/// use objcodec_format::{DecodeLimits, FormatAdapter, YamlAdapter};
///
/// let json = YamlAdapter
///     .yaml_to_json(b"apiVersion: v1\nkind: Pod\n", &DecodeLimits::default())
///     .unwrap();
/// assert_eq!(json, br#"{"apiVersion":"v1","kind":"Pod"}"#);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlAdapter;

impl FormatAdapter for YamlAdapter {
	fn yaml_to_json(&self, data: &[u8], limits: &DecodeLimits) -> FormatResult<Vec<u8>> {
		// libyaml caps implicit keys at 1024 characters, so JSON input takes
		// the JSON parser.
		let node = match Node::from_json_slice(data, limits) {
			Ok(node) => node,
			Err(err) if err.is_limit() => return Err(err),
			Err(_) => Node::from_yaml_slice(data, limits)?,
		};
		node.to_json_vec()
	}

	fn json_to_yaml(&self, data: &[u8]) -> FormatResult<Vec<u8>> {
		// Input comes from our own encoder, already depth-checked.
		let limits = DecodeLimits::relaxed().without_body_limit();
		Node::from_json_slice(data, &limits)?.to_yaml_vec()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("a: 1\nb: 1.5\nc: \"1\"\nd: true\ne: null\n", r#"{"a":1,"b":1.5,"c":"1","d":true,"e":null}"#)]
	#[case("z: [x, y]\na: {}\n", r#"{"z":["x","y"],"a":{}}"#)]
	#[case("{\"kind\": \"Pod\"}", r#"{"kind":"Pod"}"#)]
	fn test_yaml_to_json(#[case] yaml: &str, #[case] json: &str) {
		let out = YamlAdapter
			.yaml_to_json(yaml.as_bytes(), &DecodeLimits::default())
			.unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), json);
	}

	#[rstest]
	fn test_yaml_to_json_long_key_in_json_input() {
		let key = "k".repeat(1100);
		let json = format!(r#"{{"kind":"Pod","spec":{{"{key}":1}}}}"#);
		let out = YamlAdapter
			.yaml_to_json(json.as_bytes(), &DecodeLimits::default())
			.unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), json);
	}

	#[rstest]
	fn test_yaml_to_json_json_input_keeps_depth_limit() {
		let limits = DecodeLimits::default().with_max_depth(2);
		let err = YamlAdapter
			.yaml_to_json(br#"{"a":{"b":{"c":1}}}"#, &limits)
			.unwrap_err();
		assert!(err.is_limit());
	}

	#[rstest]
	fn test_yaml_to_json_comment_after_json_falls_back_to_yaml() {
		let out = YamlAdapter
			.yaml_to_json(b"{\"kind\": \"Pod\"}\n# trailing\n", &DecodeLimits::default())
			.unwrap();
		assert_eq!(out, br#"{"kind":"Pod"}"#);
	}

	#[rstest]
	fn test_yaml_to_json_rejects_invalid() {
		let err = YamlAdapter
			.yaml_to_json(b"a: [1, 2\n", &DecodeLimits::default())
			.unwrap_err();
		assert!(err.is_syntax());
	}

	#[rstest]
	fn test_json_to_yaml_keeps_strings_quoted() {
		let yaml = YamlAdapter
			.json_to_yaml(br#"{"port":"8080","enabled":"true","n":8080}"#)
			.unwrap();
		let back = YamlAdapter
			.yaml_to_json(&yaml, &DecodeLimits::default())
			.unwrap();
		assert_eq!(back, br#"{"port":"8080","enabled":"true","n":8080}"#);
	}

	#[rstest]
	fn test_json_to_yaml_invalid_json() {
		assert!(YamlAdapter.json_to_yaml(b"{").is_err());
	}
}
