//! Strict and Non-Strict Decode Scenario Tests
//!
//! Exercises full serializers built over the sample scheme against the
//! payload shapes that drive strictness.
//!
//! # Test Categories
//!
//! - Known fields only: both modes agree
//! - Duplicate keys: strict fails, non-strict keeps the last value
//! - Unknown fields: strict fails, non-strict drops them
//! - Surface formats: YAML, pretty and compact JSON agree in strict mode

use objcodec_json::{DecodeErrorKind, Serializer, SerializerOptions, ViolationKind};
use objcodec_schema::{GroupVersionKind, Object, Value};
use objcodec_testkit::{MINIMAL_POD_JSON, POD_JSON, POD_PRETTY, POD_YAML, pod_gvk, sample_resolver};
use rstest::*;

// =============================================================================
// Fixtures
// =============================================================================

fn serializer(yaml: bool, pretty: bool, strict: bool) -> Serializer {
	Serializer::new(sample_resolver(), SerializerOptions::new(yaml, pretty, strict))
}

#[fixture]
fn strict() -> Serializer {
	serializer(false, false, true)
}

#[fixture]
fn lenient() -> Serializer {
	serializer(false, false, false)
}

#[fixture]
fn hint() -> GroupVersionKind {
	pod_gvk()
}

// =============================================================================
// Known Fields Only
// =============================================================================

#[rstest]
fn test_minimal_pod_decodes_in_both_modes(strict: Serializer, lenient: Serializer) {
	let (strict_object, strict_gvk) = strict.decode(MINIMAL_POD_JSON.as_bytes(), None).unwrap();
	let (lenient_object, lenient_gvk) = lenient.decode(MINIMAL_POD_JSON.as_bytes(), None).unwrap();

	assert_eq!(strict_gvk, pod_gvk());
	assert_eq!(lenient_gvk, pod_gvk());
	assert_eq!(strict_object, lenient_object);

	let encoded = strict.encode_to_vec(&strict_object).unwrap();
	assert_eq!(encoded, MINIMAL_POD_JSON.as_bytes());
}

// =============================================================================
// Duplicate Keys
// =============================================================================

#[rstest]
fn test_duplicate_key_fails_strict(strict: Serializer, hint: GroupVersionKind) {
	let payload = br#"{"apiVersion":"v1","apiVersion":"v1"}"#;

	let err = strict.decode(payload, Some(&hint)).unwrap_err();

	assert_eq!(err.kind(), DecodeErrorKind::Strict);
	let violations = err.strict_violations().unwrap();
	assert_eq!(violations.len(), 1);
	assert_eq!(violations[0].kind, ViolationKind::Duplicate);
	assert_eq!(violations[0].path, "apiVersion");
}

#[rstest]
fn test_duplicate_key_last_value_wins_non_strict(lenient: Serializer, hint: GroupVersionKind) {
	let payload = br#"{"apiVersion":"v1","kind":"Pod","spec":{"restartPolicy":"Never","restartPolicy":"Always"}}"#;

	let (object, _) = lenient.decode(payload, Some(&hint)).unwrap();

	let policy = object.fields().lookup(&["spec", "restartPolicy"]);
	assert_eq!(policy.and_then(Value::as_str), Some("Always"));
}

#[rstest]
fn test_nested_duplicate_reports_path(strict: Serializer) {
	let payload = br#"{"apiVersion":"v1","kind":"Pod","spec":{"containers":[{"name":"a","name":"b"}]}}"#;

	let err = strict.decode(payload, None).unwrap_err();

	let violations = err.strict_violations().unwrap();
	assert_eq!(violations[0].path, "spec.containers[0].name");
	assert_eq!(violations[0].kind, ViolationKind::Duplicate);
}

// =============================================================================
// Unknown Fields
// =============================================================================

#[rstest]
fn test_unknown_field_fails_strict(strict: Serializer, hint: GroupVersionKind) {
	let payload = br#"{"apiVersion":"v1","unknownField":true}"#;

	let err = strict.decode(payload, Some(&hint)).unwrap_err();

	assert!(err.is_strict());
	assert_eq!(
		err.to_string(),
		r#"strict decoding error for v1, Kind=Pod: unknown field "unknownField""#
	);
}

#[rstest]
fn test_unknown_field_dropped_non_strict(lenient: Serializer, hint: GroupVersionKind) {
	let payload = br#"{"apiVersion":"v1","unknownField":true}"#;

	let (object, gvk) = lenient.decode(payload, Some(&hint)).unwrap();

	assert_eq!(gvk, pod_gvk());
	assert!(object.get("unknownField").is_none());

	// Dropped content does not come back.
	let encoded = lenient.encode_to_vec(&object).unwrap();
	assert_ne!(encoded, payload.as_slice());
}

#[rstest]
fn test_strict_reports_every_violation(strict: Serializer) {
	let payload = br#"{"apiVersion":"v1","kind":"Pod","extra":1,"metadata":{"name":"a","name":"b","owner":"x"}}"#;

	let err = strict.decode(payload, None).unwrap_err();

	let violations = err.strict_violations().unwrap();
	let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
	assert!(paths.contains(&"extra"));
	assert!(paths.contains(&"metadata.name"));
	assert!(paths.contains(&"metadata.owner"));
}

// =============================================================================
// Error Kinds
// =============================================================================

#[rstest]
#[case(b"{".as_slice(), DecodeErrorKind::Truncated)]
#[case(b"".as_slice(), DecodeErrorKind::Truncated)]
#[case(b"{]".as_slice(), DecodeErrorKind::Syntax)]
#[case(b"[1,2]".as_slice(), DecodeErrorKind::Syntax)]
#[case(br#"{"apiVersion":"v1","kind":"Deployment"}"#.as_slice(), DecodeErrorKind::UnknownType)]
#[case(br#"{"apiVersion":"v1"}"#.as_slice(), DecodeErrorKind::MissingKind)]
#[case(br#"{"kind":"Pod"}"#.as_slice(), DecodeErrorKind::MissingVersion)]
#[case(br#"{"apiVersion":"v1","kind":"Pod","spec":{"hostNetwork":"yes"}}"#.as_slice(), DecodeErrorKind::TypeMismatch)]
fn test_error_kinds(strict: Serializer, #[case] payload: &[u8], #[case] expected: DecodeErrorKind) {
	let err = strict.decode(payload, None).unwrap_err();
	assert_eq!(err.kind(), expected, "unexpected error: {}", err);
}

// =============================================================================
// Surface Formats
// =============================================================================

#[rstest]
fn test_surface_formats_decode_equal(strict: Serializer) {
	let (from_json, _) = strict.decode(POD_JSON.as_bytes(), None).unwrap();
	let (from_yaml, _) = serializer(true, false, true)
		.decode(POD_YAML.as_bytes(), None)
		.unwrap();
	let (from_pretty, _) = serializer(false, true, true)
		.decode(POD_PRETTY.as_bytes(), None)
		.unwrap();

	assert_eq!(from_json, from_yaml);
	assert_eq!(from_json, from_pretty);
}

#[rstest]
#[case(false, "{\n  \"apiVersion\": \"v1\",\n  \"kind\": \"Pod\",\n  \"apiVersion\": \"v1\"\n}")]
#[case(true, "apiVersion: v1\nkind: Pod\nunknownField: true\n")]
fn test_surface_formats_fail_equally(#[case] yaml: bool, #[case] payload: &str) {
	let err = serializer(yaml, !yaml, true)
		.decode(payload.as_bytes(), None)
		.unwrap_err();
	assert_eq!(err.kind(), DecodeErrorKind::Strict);

	let (object, _): (Object, _) = serializer(yaml, !yaml, false)
		.decode(payload.as_bytes(), None)
		.unwrap();
	assert_eq!(object.kind(), Some("Pod"));
}

#[rstest]
fn test_yaml_duplicate_key_fails_strict() {
	let payload = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: a\n  name: b\n";

	let err = serializer(true, false, true)
		.decode(payload.as_bytes(), None)
		.unwrap_err();

	let violations = err.strict_violations().unwrap();
	assert_eq!(violations[0].path, "metadata.name");
}

#[rstest]
#[case::long_key(format!(r#"{{"apiVersion":"v1","kind":"Pod","status":{{"{}":1}}}}"#, "k".repeat(1100)))]
#[case::long_unknown_key(format!(r#"{{"apiVersion":"v1","kind":"Pod","{}":1}}"#, "k".repeat(1100)))]
#[case::compact(POD_JSON.to_string())]
fn test_yaml_serializer_reads_json_like_json_serializer(strict: Serializer, #[case] payload: String) {
	let from_json = strict.decode(payload.as_bytes(), None);
	let from_yaml = serializer(true, false, true).decode(payload.as_bytes(), None);

	match (from_json, from_yaml) {
		(Ok((json, _)), Ok((yaml, _))) => assert_eq!(json, yaml),
		(Err(json), Err(yaml)) => assert_eq!(json.kind(), yaml.kind()),
		(json, yaml) => panic!("outcomes differ: {json:?} vs {yaml:?}"),
	}
}
