//! Error types for the format crate.

use thiserror::Error;

use crate::WireFormat;
use crate::limits::LimitExceeded;

/// Errors raised while parsing, probing or transcoding payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	/// Input is not valid under the surface format.
	#[error("{format} syntax error: {message}")]
	Syntax {
		/// Surface format being parsed.
		format: WireFormat,
		/// Parser message.
		message: String,
		/// 1-based line, 0 when unknown.
		line: usize,
		/// 1-based column, 0 when unknown.
		column: usize,
	},

	/// Input ended in the middle of a value.
	#[error("unexpected end of {format} input")]
	Truncated {
		/// Surface format being parsed.
		format: WireFormat,
	},

	/// Size or depth bound exceeded.
	#[error(transparent)]
	Limit(#[from] LimitExceeded),

	/// The top-level value is not an object.
	#[error("expected a {format} object at the top level, found {found}")]
	NotAnObject {
		/// Surface format being parsed.
		format: WireFormat,
		/// What was found instead.
		found: &'static str,
	},

	/// The `apiVersion` field could not be split into group and version.
	#[error("unexpected GroupVersion string: {0}")]
	InvalidApiVersion(String),

	/// Writing a document out failed.
	#[error("failed to render {format}: {message}")]
	Render {
		/// Target format.
		format: WireFormat,
		/// Serializer message.
		message: String,
	},
}

impl FormatError {
	/// Builds an error from a `serde_json` failure.
	pub fn from_json(error: serde_json::Error) -> Self {
		match error.classify() {
			serde_json::error::Category::Eof => Self::Truncated {
				format: WireFormat::Json,
			},
			_ => Self::Syntax {
				format: WireFormat::Json,
				line: error.line(),
				column: error.column(),
				message: error.to_string(),
			},
		}
	}

	/// Builds an error from a `serde_yaml` failure.
	pub fn from_yaml(error: serde_yaml::Error) -> Self {
		let (line, column) = error
			.location()
			.map(|loc| (loc.line(), loc.column()))
			.unwrap_or_default();
		Self::Syntax {
			format: WireFormat::Yaml,
			message: error.to_string(),
			line,
			column,
		}
	}

	/// Returns true for syntax errors.
	pub fn is_syntax(&self) -> bool {
		matches!(
			self,
			Self::Syntax { .. } | Self::NotAnObject { .. } | Self::InvalidApiVersion(_)
		)
	}

	/// Returns true when input ended early.
	pub fn is_truncated(&self) -> bool {
		matches!(self, Self::Truncated { .. })
	}

	/// Returns true when a size or depth bound was hit.
	pub fn is_limit(&self) -> bool {
		matches!(self, Self::Limit(_))
	}
}

/// Result type alias for format operations.
pub type FormatResult<T> = Result<T, FormatError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_json_truncated() {
		let error = serde_json::from_str::<serde_json::Value>(r#"{"a":"#).unwrap_err();
		assert_eq!(
			FormatError::from_json(error),
			FormatError::Truncated {
				format: WireFormat::Json
			}
		);
	}

	#[rstest]
	fn test_from_json_syntax_has_position() {
		let error = serde_json::from_str::<serde_json::Value>("{\n  x}").unwrap_err();
		match FormatError::from_json(error) {
			FormatError::Syntax { line, column, .. } => {
				assert_eq!(line, 2);
				assert!(column > 0);
			}
			other => panic!("Expected Syntax, got {other:?}"),
		}
	}

	#[rstest]
	fn test_from_yaml_is_syntax() {
		let error = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
		assert!(FormatError::from_yaml(error).is_syntax());
	}

	#[rstest]
	fn test_limit_is_transparent() {
		let error: FormatError = LimitExceeded::TooDeep { limit: 4 }.into();
		assert_eq!(error.to_string(), "nesting depth exceeds limit of 4");
		assert!(error.is_limit());
	}
}
