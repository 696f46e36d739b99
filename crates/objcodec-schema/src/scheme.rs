//! Type registry.
//!
//! A [`Scheme`] maps a [`GroupVersionKind`] to the [`Shape`] objects of that
//! type must follow. It is an ordinary value: build one, register shapes,
//! then share it behind an `Arc` with every serializer that needs it.
//! Nothing is registered globally, so independent registries (for example
//! one per test) never interfere.

use std::collections::HashMap;
use std::sync::Arc;

use crate::GroupVersionKind;
use crate::error::{SchemeError, SchemeResult};
use crate::shape::Shape;

/// Resolves a fully merged type identity to its shape.
///
/// Implementations must be deterministic for a fixed registry state and safe
/// for concurrent reads.
pub trait TypeResolver: Send + Sync {
	/// Returns the shape registered for `gvk`, or `None` if the type is unknown.
	fn resolve(&self, gvk: &GroupVersionKind) -> Option<Arc<Shape>>;

	/// Returns true if `gvk` resolves to a shape.
	fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
		self.resolve(gvk).is_some()
	}
}

/// Default in-memory registry.
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use objcodec_schema::{FieldType, GroupVersionKind, Scheme, Shape, TypeResolver};
/// let mut scheme = Scheme::new();
/// let config_map = Shape::builder("ConfigMap")
///     .type_meta()
///     .field("data", FieldType::map(FieldType::String))
///     .build()
///     .unwrap();
/// scheme.register(GroupVersionKind::new("", "v1", "ConfigMap"), config_map).unwrap();
///
/// let scheme = Arc::new(scheme);
/// assert!(scheme.recognizes(&GroupVersionKind::new("", "v1", "ConfigMap")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheme {
	shapes: HashMap<GroupVersionKind, Arc<Shape>>,
}

impl Scheme {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a top-level shape.
	///
	/// # Errors
	///
	/// Returns an error if
	/// - the identity lacks a version or kind,
	/// - the shape does not declare `apiVersion` and `kind` string fields,
	/// - the identity is already registered.
	pub fn register(&mut self, gvk: GroupVersionKind, shape: Shape) -> SchemeResult<()> {
		if !gvk.is_complete() {
			return Err(SchemeError::IncompleteType(gvk));
		}
		if let Some(field) = shape.missing_type_meta() {
			return Err(SchemeError::MissingTypeMeta { gvk, field });
		}
		if self.shapes.contains_key(&gvk) {
			return Err(SchemeError::AlreadyRegistered(gvk));
		}
		tracing::trace!(gvk = %gvk, shape = shape.name(), "registering shape");
		self.shapes.insert(gvk, Arc::new(shape));
		Ok(())
	}

	/// Builder-style [`Scheme::register`].
	pub fn with(mut self, gvk: GroupVersionKind, shape: Shape) -> SchemeResult<Self> {
		self.register(gvk, shape)?;
		Ok(self)
	}

	/// Returns true if `gvk` is registered.
	pub fn is_registered(&self, gvk: &GroupVersionKind) -> bool {
		self.shapes.contains_key(gvk)
	}

	/// Returns every registered identity, sorted.
	pub fn known_kinds(&self) -> Vec<GroupVersionKind> {
		let mut kinds: Vec<_> = self.shapes.keys().cloned().collect();
		kinds.sort();
		kinds
	}

	/// Returns the kinds registered for one group/version, sorted.
	pub fn kinds_for(&self, group: &str, version: &str) -> Vec<String> {
		let mut kinds: Vec<_> = self
			.shapes
			.keys()
			.filter(|gvk| gvk.group == group && gvk.version == version)
			.map(|gvk| gvk.kind.clone())
			.collect();
		kinds.sort();
		kinds
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.shapes.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.shapes.is_empty()
	}
}

impl TypeResolver for Scheme {
	fn resolve(&self, gvk: &GroupVersionKind) -> Option<Arc<Shape>> {
		self.shapes.get(gvk).cloned()
	}
}

impl<T: TypeResolver + ?Sized> TypeResolver for Arc<T> {
	fn resolve(&self, gvk: &GroupVersionKind) -> Option<Arc<Shape>> {
		(**self).resolve(gvk)
	}
}
