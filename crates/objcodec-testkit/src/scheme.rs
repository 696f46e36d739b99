//! Sample types registered in a ready-made [`Scheme`].
//!
//! | Type | Notes |
//! |---|---|
//! | `v1/Pod` | nested records, lists of records, maps, an `Any` status |
//! | `v1/ConfigMap` | string maps and a boolean |
//! | `example.com/v1alpha1/Widget` | grouped type with an `Any` payload |

use std::sync::Arc;

use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape, TypeResolver};

/// `v1, Kind=Pod`
pub fn pod_gvk() -> GroupVersionKind {
	GroupVersionKind::new("", "v1", "Pod")
}

/// `v1, Kind=ConfigMap`
pub fn config_map_gvk() -> GroupVersionKind {
	GroupVersionKind::new("", "v1", "ConfigMap")
}

/// `example.com/v1alpha1, Kind=Widget`
pub fn widget_gvk() -> GroupVersionKind {
	GroupVersionKind::new("example.com", "v1alpha1", "Widget")
}

/// Names and labels shared by every sample type.
pub fn object_meta_shape() -> Shape {
	Shape::builder("ObjectMeta")
		.field("name", FieldType::String)
		.field("namespace", FieldType::String)
		.field("labels", FieldType::map(FieldType::String))
		.field("annotations", FieldType::map(FieldType::String))
		.build()
		.expect("ObjectMeta shape is valid")
}

/// Container port.
pub fn container_port_shape() -> Shape {
	Shape::builder("ContainerPort")
		.field("name", FieldType::String)
		.field("containerPort", FieldType::Integer)
		.field("protocol", FieldType::String)
		.build()
		.expect("ContainerPort shape is valid")
}

/// Container.
pub fn container_shape() -> Shape {
	Shape::builder("Container")
		.field("name", FieldType::String)
		.field("image", FieldType::String)
		.field("args", FieldType::list(FieldType::String))
		.field("ports", FieldType::list(FieldType::record(container_port_shape())))
		.build()
		.expect("Container shape is valid")
}

/// Pod spec.
pub fn pod_spec_shape() -> Shape {
	Shape::builder("PodSpec")
		.field("containers", FieldType::list(FieldType::record(container_shape())))
		.field("restartPolicy", FieldType::String)
		.field("nodeSelector", FieldType::map(FieldType::String))
		.field("hostNetwork", FieldType::Bool)
		.field("terminationGracePeriodSeconds", FieldType::Integer)
		.build()
		.expect("PodSpec shape is valid")
}

/// Pod.
pub fn pod_shape() -> Shape {
	Shape::builder("Pod")
		.type_meta()
		.field("metadata", FieldType::record(object_meta_shape()))
		.field("spec", FieldType::record(pod_spec_shape()))
		.field("status", FieldType::Any)
		.build()
		.expect("Pod shape is valid")
}

/// ConfigMap.
pub fn config_map_shape() -> Shape {
	Shape::builder("ConfigMap")
		.type_meta()
		.field("metadata", FieldType::record(object_meta_shape()))
		.field("data", FieldType::map(FieldType::String))
		.field("binaryData", FieldType::map(FieldType::String))
		.field("immutable", FieldType::Bool)
		.build()
		.expect("ConfigMap shape is valid")
}

/// Widget, a custom type with free-form content.
pub fn widget_shape() -> Shape {
	Shape::builder("Widget")
		.type_meta()
		.field("metadata", FieldType::record(object_meta_shape()))
		.field("size", FieldType::Number)
		.field("payload", FieldType::Any)
		.build()
		.expect("Widget shape is valid")
}

/// Scheme holding all sample types.
pub fn sample_scheme() -> Scheme {
	Scheme::new()
		.with(pod_gvk(), pod_shape())
		.and_then(|s| s.with(config_map_gvk(), config_map_shape()))
		.and_then(|s| s.with(widget_gvk(), widget_shape()))
		.expect("sample types register cleanly")
}

/// [`sample_scheme`] behind a shared resolver.
pub fn sample_resolver() -> Arc<dyn TypeResolver> {
	Arc::new(sample_scheme())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_sample_scheme_contents() {
		let scheme = sample_scheme();
		assert_eq!(scheme.len(), 3);
		assert_eq!(
			scheme.known_kinds(),
			[config_map_gvk(), pod_gvk(), widget_gvk()]
		);
	}

	#[rstest]
	fn test_resolver_resolves_pod() {
		let shape = sample_resolver().resolve(&pod_gvk()).unwrap();
		assert!(shape.has_type_meta());
		assert!(shape.field("spec").is_some());
	}
}
