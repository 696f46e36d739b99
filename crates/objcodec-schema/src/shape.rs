//! Structural schemas.
//!
//! A [`Shape`] lists the fields a record may carry, in the order the encoder
//! emits them. Field order is part of the canonical form: two payloads with
//! the same content but different field order decode to equal objects, yet
//! only the one in shape order survives an exact round trip.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SchemeError, SchemeResult};

/// Name of the type-meta field holding `group/version`.
pub const API_VERSION_FIELD: &str = "apiVersion";

/// Name of the type-meta field holding the kind.
pub const KIND_FIELD: &str = "kind";

/// Type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
	/// UTF-8 string.
	String,
	/// `true` / `false`.
	Bool,
	/// Integral number fitting `i64` or `u64`.
	Integer,
	/// Any finite number.
	Number,
	/// Arbitrary JSON content, kept as-is.
	Any,
	/// Homogeneous list.
	List(Box<FieldType>),
	/// String-keyed map with homogeneous values.
	Map(Box<FieldType>),
	/// Nested record with its own shape.
	Record(Arc<Shape>),
}

impl FieldType {
	/// List of `inner`.
	pub fn list(inner: FieldType) -> Self {
		Self::List(Box::new(inner))
	}

	/// Map from string to `inner`.
	pub fn map(inner: FieldType) -> Self {
		Self::Map(Box::new(inner))
	}

	/// Nested record.
	pub fn record(shape: Shape) -> Self {
		Self::Record(Arc::new(shape))
	}

	/// Short human readable name used in error messages.
	pub fn describe(&self) -> &'static str {
		match self {
			Self::String => "string",
			Self::Bool => "boolean",
			Self::Integer => "integer",
			Self::Number => "number",
			Self::Any => "any",
			Self::List(_) => "array",
			Self::Map(_) => "map",
			Self::Record(_) => "object",
		}
	}
}

/// A named field inside a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	name: String,
	ty: FieldType,
}

impl Field {
	/// Field name as it appears on the wire.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared type.
	pub fn ty(&self) -> &FieldType {
		&self.ty
	}
}

/// Ordered set of fields describing one record type.
///
/// # Example
///
/// ```
/// # use objcodec_schema::{FieldType, Shape};
/// let meta = Shape::builder("ObjectMeta")
///     .field("name", FieldType::String)
///     .field("labels", FieldType::map(FieldType::String))
///     .build()
///     .unwrap();
///
/// let pod = Shape::builder("Pod")
///     .type_meta()
///     .field("metadata", FieldType::record(meta))
///     .build()
///     .unwrap();
///
/// assert!(pod.has_type_meta());
/// assert_eq!(pod.field_names().collect::<Vec<_>>(), ["apiVersion", "kind", "metadata"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
	name: String,
	fields: Vec<Field>,
	index: HashMap<String, usize>,
}

impl Shape {
	/// Starts building a shape.
	pub fn builder(name: impl Into<String>) -> ShapeBuilder {
		ShapeBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Name of the shape, used in diagnostics only.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Looks up a field by wire name.
	pub fn field(&self, name: &str) -> Option<&Field> {
		self.index.get(name).map(|&idx| &self.fields[idx])
	}

	/// Iterates fields in canonical order.
	pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
		self.fields.iter()
	}

	/// Iterates field names in canonical order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|f| f.name.as_str())
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if no fields are declared.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Returns true when both `apiVersion` and `kind` are declared as strings.
	pub fn has_type_meta(&self) -> bool {
		self.missing_type_meta().is_none()
	}

	/// Returns the first type-meta field that is missing or not a string.
	pub fn missing_type_meta(&self) -> Option<&'static str> {
		[API_VERSION_FIELD, KIND_FIELD].into_iter().find(|name| {
			!matches!(self.field(name).map(Field::ty), Some(FieldType::String))
		})
	}
}

/// Builder for [`Shape`].
#[derive(Debug)]
pub struct ShapeBuilder {
	name: String,
	fields: Vec<Field>,
}

impl ShapeBuilder {
	/// Appends the `apiVersion` and `kind` string fields.
	pub fn type_meta(self) -> Self {
		self.field(API_VERSION_FIELD, FieldType::String)
			.field(KIND_FIELD, FieldType::String)
	}

	/// Appends a field.
	pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
		self.fields.push(Field {
			name: name.into(),
			ty,
		});
		self
	}

	/// Finishes the shape, rejecting duplicate field names.
	pub fn build(self) -> SchemeResult<Shape> {
		let mut index = HashMap::with_capacity(self.fields.len());
		for (idx, field) in self.fields.iter().enumerate() {
			if index.insert(field.name.clone(), idx).is_some() {
				return Err(SchemeError::DuplicateField(field.name.clone()));
			}
		}
		Ok(Shape {
			name: self.name,
			fields: self.fields,
			index,
		})
	}
}
