//! Resource limits for decoding.
//!
//! Decoding adversarial input must stay bounded in both memory and stack, so
//! every parse into a [`Node`](crate::Node) runs under a [`DecodeLimits`].

/// Default maximum payload size: 3 MiB
const DEFAULT_MAX_BODY_SIZE: usize = 3 * 1024 * 1024;
/// Default maximum nesting depth
const DEFAULT_MAX_DEPTH: usize = 64;

/// Highest nesting depth that can be configured.
///
/// The JSON and YAML parsers underneath refuse to recurse past 128 levels on
/// their own; capping the configurable depth below that keeps the reported
/// error a [`LimitExceeded::TooDeep`] regardless of the surface format.
pub const MAX_SUPPORTED_DEPTH: usize = 100;

/// Size and depth bounds applied while parsing.
///
/// Depth counts containers: a top-level object is depth 1, an array inside it
/// depth 2, and so on. Scalars do not add depth.
///
/// # Examples
///
/// ```
/// use objcodec_format::DecodeLimits;
///
/// let limits = DecodeLimits::default();
/// assert_eq!(limits.max_body_size(), Some(3 * 1024 * 1024));
/// assert_eq!(limits.max_depth(), 64);
///
/// let custom = DecodeLimits::default().with_max_depth(16);
/// assert!(custom.check_depth(17).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
	max_body_size: Option<usize>,
	max_depth: usize,
}

impl Default for DecodeLimits {
	fn default() -> Self {
		Self {
			max_body_size: Some(DEFAULT_MAX_BODY_SIZE),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl DecodeLimits {
	/// Conservative limits for untrusted, user-authored input.
	///
	/// ```
	/// use objcodec_format::DecodeLimits;
	///
	/// let limits = DecodeLimits::strict();
	/// assert_eq!(limits.max_body_size(), Some(1024 * 1024));
	/// assert_eq!(limits.max_depth(), 32);
	/// ```
	pub fn strict() -> Self {
		Self {
			max_body_size: Some(1024 * 1024), // 1 MiB
			max_depth: 32,
		}
	}

	/// Generous limits for trusted producers.
	pub fn relaxed() -> Self {
		Self {
			max_body_size: Some(64 * 1024 * 1024), // 64 MiB
			max_depth: MAX_SUPPORTED_DEPTH,
		}
	}

	/// Sets the maximum payload size in bytes.
	pub fn with_max_body_size(mut self, size: usize) -> Self {
		self.max_body_size = Some(size);
		self
	}

	/// Removes the payload size bound. Depth stays bounded.
	pub fn without_body_limit(mut self) -> Self {
		self.max_body_size = None;
		self
	}

	/// Sets the maximum nesting depth, clamped to `1..=MAX_SUPPORTED_DEPTH`.
	pub fn with_max_depth(mut self, depth: usize) -> Self {
		self.max_depth = depth.clamp(1, MAX_SUPPORTED_DEPTH);
		self
	}

	/// Maximum payload size in bytes, if bounded.
	pub fn max_body_size(&self) -> Option<usize> {
		self.max_body_size
	}

	/// Maximum nesting depth.
	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Check if a payload size is within limits.
	pub fn check_body_size(&self, actual: usize) -> Result<(), LimitExceeded> {
		if let Some(limit) = self.max_body_size
			&& actual > limit
		{
			return Err(LimitExceeded::BodyTooLarge { limit, actual });
		}
		Ok(())
	}

	/// Check if a nesting depth is within limits.
	pub fn check_depth(&self, actual: usize) -> Result<(), LimitExceeded> {
		if actual > self.max_depth {
			return Err(LimitExceeded::TooDeep {
				limit: self.max_depth,
			});
		}
		Ok(())
	}
}

/// Error type for limit violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
	/// Payload exceeds the configured size
	#[error("payload too large: {actual} bytes exceeds limit of {limit} bytes")]
	BodyTooLarge {
		/// Configured limit
		limit: usize,
		/// Actual size
		actual: usize,
	},

	/// Payload nests containers deeper than allowed
	#[error("nesting depth exceeds limit of {limit}")]
	TooDeep {
		/// Configured limit
		limit: usize,
	},
}
