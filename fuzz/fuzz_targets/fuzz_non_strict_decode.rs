//! Fuzz target for non-strict decoding
//!
//! Whatever non-strict decoding accepts must encode in every output format and
//! round-trip to a fixpoint.

#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use objcodec_json::DifferentialHarness;
use objcodec_testkit::{pod_gvk, sample_resolver};

static HARNESS: LazyLock<DifferentialHarness> =
	LazyLock::new(|| DifferentialHarness::new(sample_resolver()).with_hint(pod_gvk()));

fuzz_target!(|data: &[u8]| {
	if let Err(divergence) = HARNESS.check_non_strict_decode(data) {
		panic!("{divergence}");
	}
});
