//! Test infrastructure for objcodec.
//!
//! Provides a [`Scheme`](objcodec_schema::Scheme) of sample types, canonical
//! payloads for them and, with the `property-based` feature, proptest
//! strategies that generate payloads.

pub mod fixtures;
pub mod scheme;
#[cfg(feature = "property-based")]
pub mod strategies;

pub use fixtures::{
	CONFIG_MAP_JSON, MINIMAL_POD_JSON, POD_JSON, POD_PRETTY, POD_YAML, WIDGET_JSON,
};
pub use scheme::{
	config_map_gvk, config_map_shape, pod_gvk, pod_shape, sample_resolver, sample_scheme,
	widget_gvk, widget_shape,
};
