//! Pretty JSON output.

use crate::document::Node;
use crate::error::FormatResult;
use crate::limits::DecodeLimits;

/// Default indentation width.
pub const DEFAULT_INDENT: usize = 2;

/// Reformats canonical compact JSON for humans.
///
/// Output must be deterministic and carry exactly the same content.
pub trait PrettyFormatter: Send + Sync {
	/// Reformats `canonical`.
	fn format(&self, canonical: &[u8]) -> FormatResult<Vec<u8>>;
}

/// Indents nested values by a fixed number of spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentFormatter {
	indent: usize,
}

impl IndentFormatter {
	/// Creates a formatter using `indent` spaces per level.
	pub fn new(indent: usize) -> Self {
		Self { indent }
	}

	/// Spaces per nesting level.
	pub fn indent(&self) -> usize {
		self.indent
	}
}

impl Default for IndentFormatter {
	fn default() -> Self {
		Self::new(DEFAULT_INDENT)
	}
}

impl PrettyFormatter for IndentFormatter {
	fn format(&self, canonical: &[u8]) -> FormatResult<Vec<u8>> {
		let limits = DecodeLimits::relaxed().without_body_limit();
		Node::from_json_slice(canonical, &limits)?.to_pretty_json_vec(self.indent)
	}
}
