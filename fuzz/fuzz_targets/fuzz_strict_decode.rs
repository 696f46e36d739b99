//! Fuzz target for strict decoding
//!
//! A strict compact-JSON decode must agree with the YAML and pretty renderings
//! of the same payload, and accepted objects must re-encode to a fixpoint.

#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use objcodec_json::DifferentialHarness;
use objcodec_testkit::{pod_gvk, sample_resolver};

static HARNESS: LazyLock<DifferentialHarness> =
	LazyLock::new(|| DifferentialHarness::new(sample_resolver()).with_hint(pod_gvk()));

fuzz_target!(|data: &[u8]| {
	if let Err(divergence) = HARNESS.check_strict_decode(data) {
		panic!("{divergence}");
	}
});
