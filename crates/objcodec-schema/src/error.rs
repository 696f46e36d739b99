//! Error types for the schema crate.

use thiserror::Error;

use crate::GroupVersionKind;

/// Errors raised while building or populating a type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
	/// A shape is already registered under this type.
	#[error("type already registered: {0}")]
	AlreadyRegistered(GroupVersionKind),

	/// A registered shape lacks one of the type-meta fields.
	#[error("shape for {gvk} is missing the type-meta field `{field}`")]
	MissingTypeMeta {
		/// Type being registered.
		gvk: GroupVersionKind,
		/// Missing field name.
		field: &'static str,
	},

	/// The type identity has no version or no kind.
	#[error("type identity is incomplete: {0}")]
	IncompleteType(GroupVersionKind),

	/// The apiVersion string could not be parsed.
	#[error("unexpected GroupVersion string: {0}")]
	InvalidApiVersion(String),

	/// A shape declares the same field twice.
	#[error("field `{0}` declared more than once")]
	DuplicateField(String),
}

/// Result type alias for schema operations.
pub type SchemeResult<T> = Result<T, SchemeError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_already_registered_message() {
		let error = SchemeError::AlreadyRegistered(GroupVersionKind::new("", "v1", "Pod"));
		assert_eq!(error.to_string(), "type already registered: v1, Kind=Pod");
	}

	#[rstest]
	fn test_missing_type_meta_message() {
		let error = SchemeError::MissingTypeMeta {
			gvk: GroupVersionKind::new("apps", "v1", "Deployment"),
			field: "kind",
		};
		assert_eq!(
			error.to_string(),
			"shape for apps/v1, Kind=Deployment is missing the type-meta field `kind`"
		);
	}
}
