//! Fuzz tests using proptest
//!
//! Drives the differential harness with generated payloads. Every payload must
//! yield a verdict: the strict compact decode agrees with its YAML and pretty
//! renderings, and accepted objects re-encode to a fixpoint.

use objcodec_json::{DifferentialHarness, Verdict};
use objcodec_testkit::strategies::{canonical_pod, canonical_widget, json_document, noisy_pod};
use objcodec_testkit::{pod_gvk, sample_resolver};
use proptest::prelude::*;

fn harness() -> DifferentialHarness {
	DifferentialHarness::new(sample_resolver())
}

fn hinted_harness() -> DifferentialHarness {
	harness().with_hint(pod_gvk())
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(100))]

	// =============================================================================
	// Canonical Payloads
	// =============================================================================

	/// Fuzz strict decode with canonical Pods
	///
	/// **Category**: Fuzz
	/// **Verifies**: Canonical compact JSON round-trips byte for byte
	#[test]
	fn fuzz_canonical_pod_is_exact(data in canonical_pod()) {
		prop_assert_eq!(harness().check_strict_decode(&data), Ok(Verdict::Exact));
		prop_assert_eq!(harness().check_non_strict_decode(&data), Ok(Verdict::Exact));
	}

	/// Fuzz strict decode with canonical Widgets
	///
	/// **Category**: Fuzz
	/// **Verifies**: Free-form content round-trips byte for byte
	#[test]
	fn fuzz_canonical_widget_is_exact(data in canonical_widget()) {
		prop_assert_eq!(harness().check_strict_decode(&data), Ok(Verdict::Exact));
	}

	// =============================================================================
	// Perturbed Payloads
	// =============================================================================

	/// Fuzz both modes with shuffled and noisy Pods
	///
	/// **Category**: Fuzz
	/// **Verifies**: Unknown and repeated members never break variant agreement
	#[test]
	fn fuzz_noisy_pod(data in noisy_pod()) {
		let harness = hinted_harness();
		let strict = harness.check_strict_decode(&data);
		prop_assert!(strict.is_ok(), "strict: {:?}", strict);
		let non_strict = harness.check_non_strict_decode(&data);
		prop_assert!(non_strict.is_ok(), "non-strict: {:?}", non_strict);
	}

	/// Fuzz both modes with arbitrary JSON objects
	///
	/// **Category**: Fuzz
	/// **Verifies**: Arbitrary objects are accepted or rejected consistently
	#[test]
	fn fuzz_json_document(data in json_document()) {
		let harness = hinted_harness();
		let strict = harness.check_strict_decode(&data);
		prop_assert!(strict.is_ok(), "strict: {:?}", strict);
		let non_strict = harness.check_non_strict_decode(&data);
		prop_assert!(non_strict.is_ok(), "non-strict: {:?}", non_strict);
	}

	/// Strict acceptance implies non-strict acceptance
	///
	/// **Category**: Fuzz
	/// **Verifies**: Non-strict mode never fails where strict mode succeeds
	#[test]
	fn fuzz_strict_subset_of_non_strict(data in json_document()) {
		let harness = hinted_harness();
		if let Ok(Verdict::Exact | Verdict::Normalized) = harness.check_strict_decode(&data) {
			prop_assert_ne!(harness.check_non_strict_decode(&data), Ok(Verdict::Rejected));
		}
	}

	// =============================================================================
	// Raw Bytes
	// =============================================================================

	/// Fuzz both modes with random bytes
	///
	/// **Category**: Fuzz
	/// **Verifies**: Malformed input is rejected without panicking
	#[test]
	fn fuzz_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..256)) {
		let harness = hinted_harness();
		prop_assert!(harness.check_strict_decode(&data).is_ok());
		prop_assert!(harness.check_non_strict_decode(&data).is_ok());
	}

	/// Fuzz both modes with printable text
	///
	/// **Category**: Fuzz
	/// **Verifies**: Text that is almost JSON never causes a divergence
	#[test]
	fn fuzz_json_like_text(data in r#"\{[ "a-zA-Z0-9:,\[\]{}.-]{0,64}"#) {
		let harness = hinted_harness();
		prop_assert!(harness.check_strict_decode(data.as_bytes()).is_ok());
		prop_assert!(harness.check_non_strict_decode(data.as_bytes()).is_ok());
	}
}
