//! Error types for decoding and encoding.

use std::fmt;

use objcodec_format::{FormatError, LimitExceeded};
use objcodec_schema::GroupVersionKind;
use thiserror::Error;

/// What is wrong with a field in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
	/// The shape does not declare the field.
	Unknown,
	/// The key appears more than once in the same object.
	Duplicate,
}

/// A single strict-mode finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
	/// Kind of problem.
	pub kind: ViolationKind,
	/// Dotted path of the field, e.g. `spec.containers[0].name`.
	pub path: String,
}

impl FieldViolation {
	/// Unknown field at `path`.
	pub fn unknown(path: impl Into<String>) -> Self {
		Self {
			kind: ViolationKind::Unknown,
			path: path.into(),
		}
	}

	/// Duplicate field at `path`.
	pub fn duplicate(path: impl Into<String>) -> Self {
		Self {
			kind: ViolationKind::Duplicate,
			path: path.into(),
		}
	}
}

impl fmt::Display for FieldViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind {
			ViolationKind::Unknown => write!(f, "unknown field \"{}\"", self.path),
			ViolationKind::Duplicate => write!(f, "duplicate field \"{}\"", self.path),
		}
	}
}

/// Strict decoding rejected the payload.
///
/// Lists every violation found, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictError {
	/// Resolved type of the rejected payload.
	pub gvk: GroupVersionKind,
	/// Field-level findings; never empty.
	pub violations: Vec<FieldViolation>,
}

impl StrictError {
	/// Paths of all unknown fields.
	pub fn unknown_fields(&self) -> impl Iterator<Item = &str> {
		self.paths_of(ViolationKind::Unknown)
	}

	/// Paths of all duplicated fields.
	pub fn duplicate_fields(&self) -> impl Iterator<Item = &str> {
		self.paths_of(ViolationKind::Duplicate)
	}

	fn paths_of(&self, kind: ViolationKind) -> impl Iterator<Item = &str> {
		self.violations
			.iter()
			.filter(move |v| v.kind == kind)
			.map(|v| v.path.as_str())
	}
}

impl fmt::Display for StrictError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "strict decoding error for {}: ", self.gvk)?;
		for (idx, violation) in self.violations.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{violation}")?;
		}
		Ok(())
	}
}

impl std::error::Error for StrictError {}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
	/// Malformed input.
	Syntax,
	/// Input ended early.
	Truncated,
	/// Size or depth bound exceeded.
	LimitExceeded,
	/// No shape registered for the resolved type.
	UnknownType,
	/// No kind in payload or hint.
	MissingKind,
	/// No version in payload or hint.
	MissingVersion,
	/// Strict-mode rejection.
	Strict,
	/// A value does not match its declared field type.
	TypeMismatch,
}

/// Errors returned by decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
	/// Parsing, probing or transcoding failed.
	#[error(transparent)]
	Format(#[from] FormatError),

	/// The resolved type is not registered.
	#[error("no kind \"{}\" is registered for version \"{}\"", .0.kind, .0.api_version())]
	UnknownType(GroupVersionKind),

	/// Neither the payload nor the hint provide a kind.
	#[error("object 'kind' is missing")]
	MissingKind,

	/// Neither the payload nor the hint provide a version.
	#[error("object 'apiVersion' is missing")]
	MissingVersion,

	/// Strict mode found unknown or duplicate fields.
	#[error(transparent)]
	Strict(#[from] StrictError),

	/// A value has the wrong JSON type for its field.
	#[error("{path}: expected {expected}, found {found}")]
	TypeMismatch {
		/// Dotted field path.
		path: String,
		/// Declared type.
		expected: &'static str,
		/// Type found in the payload.
		found: &'static str,
	},
}

impl DecodeError {
	/// Classifies the error.
	pub fn kind(&self) -> DecodeErrorKind {
		match self {
			Self::Format(FormatError::Truncated { .. }) => DecodeErrorKind::Truncated,
			Self::Format(FormatError::Limit(_)) => DecodeErrorKind::LimitExceeded,
			Self::Format(_) => DecodeErrorKind::Syntax,
			Self::UnknownType(_) => DecodeErrorKind::UnknownType,
			Self::MissingKind => DecodeErrorKind::MissingKind,
			Self::MissingVersion => DecodeErrorKind::MissingVersion,
			Self::Strict(_) => DecodeErrorKind::Strict,
			Self::TypeMismatch { .. } => DecodeErrorKind::TypeMismatch,
		}
	}

	/// Returns true for strict-mode rejections.
	pub fn is_strict(&self) -> bool {
		matches!(self, Self::Strict(_))
	}

	/// Strict-mode findings, if this is a strict rejection.
	pub fn strict_violations(&self) -> Option<&[FieldViolation]> {
		match self {
			Self::Strict(err) => Some(&err.violations),
			_ => None,
		}
	}
}

impl From<LimitExceeded> for DecodeError {
	fn from(err: LimitExceeded) -> Self {
		Self::Format(FormatError::Limit(err))
	}
}

/// Result type alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors returned by encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
	/// The object's type has no registered shape.
	#[error("no shape is registered for {0}")]
	UnregisteredShape(GroupVersionKind),

	/// The object does not fit its shape.
	#[error("{path}: {reason}")]
	ShapeMismatch {
		/// Dotted field path, empty for the root.
		path: String,
		/// What is wrong.
		reason: String,
	},

	/// The object nests deeper than allowed.
	#[error(transparent)]
	LimitExceeded(#[from] LimitExceeded),

	/// Pretty printing or YAML transcoding failed.
	#[error(transparent)]
	Format(#[from] FormatError),

	/// Writing to the sink failed.
	#[error("failed to write encoded object: {0}")]
	SinkWrite(#[from] std::io::Error),
}

/// Result type alias for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;
