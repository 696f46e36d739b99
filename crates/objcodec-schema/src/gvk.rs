//! Type identity for encoded objects.
//!
//! Every object on the wire carries an `apiVersion` (`group/version` or just
//! `version` for the core group) and a `kind`. Together they form a
//! [`GroupVersionKind`], which is what a [`TypeResolver`](crate::TypeResolver)
//! maps to a [`Shape`](crate::Shape).

use serde::{Deserialize, Serialize};

use crate::error::{SchemeError, SchemeResult};

/// Group, version and kind of an object type.
///
/// Empty strings mean "absent". A partially filled value is used as a type
/// hint when decoding; see [`GroupVersionKind::with_defaults`].
///
/// # Example
///
/// ```
/// # use objcodec_schema::GroupVersionKind;
/// let gvk = GroupVersionKind::from_api_version("apps/v1", "Deployment").unwrap();
/// assert_eq!(gvk.group, "apps");
/// assert_eq!(gvk.version, "v1");
/// assert_eq!(gvk.api_version(), "apps/v1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
	/// API group. Empty for the core group.
	#[serde(default)]
	pub group: String,

	/// API version within the group.
	#[serde(default)]
	pub version: String,

	/// Kind name, e.g. `Pod`.
	#[serde(default)]
	pub kind: String,
}

impl GroupVersionKind {
	/// Creates a new group/version/kind triple.
	pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			version: version.into(),
			kind: kind.into(),
		}
	}

	/// Creates a hint carrying only a version.
	pub fn version_only(version: impl Into<String>) -> Self {
		Self {
			version: version.into(),
			..Self::default()
		}
	}

	/// Parses an `apiVersion` string and pairs it with a kind.
	///
	/// Accepts `""`, `"v1"` and `"group/v1"`. More than one `/` is rejected.
	pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> SchemeResult<Self> {
		let (group, version) = split_api_version(api_version)?;
		Ok(Self {
			group: group.to_string(),
			version: version.to_string(),
			kind: kind.into(),
		})
	}

	/// Renders the `apiVersion` string for this type.
	pub fn api_version(&self) -> String {
		if self.group.is_empty() {
			self.version.clone()
		} else {
			format!("{}/{}", self.group, self.version)
		}
	}

	/// Returns true when no component is set.
	pub fn is_empty(&self) -> bool {
		self.group.is_empty() && self.version.is_empty() && self.kind.is_empty()
	}

	/// Returns true when version and kind are both set.
	///
	/// The group may legitimately be empty (core group).
	pub fn is_complete(&self) -> bool {
		!self.version.is_empty() && !self.kind.is_empty()
	}

	/// Fills the components missing from `self` using `hint`.
	///
	/// Values found in the payload always win; the hint only fills gaps:
	///
	/// 1. an empty kind takes the hint's kind;
	/// 2. when both group and version are empty they take the hint's;
	/// 3. an empty version whose group equals the hint's group takes the hint's version.
	///
	/// ```
	/// # use objcodec_schema::GroupVersionKind;
	/// let actual = GroupVersionKind::new("", "v1", "");
	/// let hint = GroupVersionKind::new("", "v2", "Pod");
	/// assert_eq!(actual.with_defaults(Some(&hint)), GroupVersionKind::new("", "v1", "Pod"));
	/// ```
	pub fn with_defaults(mut self, hint: Option<&GroupVersionKind>) -> Self {
		let Some(hint) = hint else {
			return self;
		};
		if self.kind.is_empty() {
			self.kind = hint.kind.clone();
		}
		if self.version.is_empty() && self.group.is_empty() {
			self.group = hint.group.clone();
			self.version = hint.version.clone();
		}
		if self.version.is_empty() && self.group == hint.group {
			self.version = hint.version.clone();
		}
		self
	}
}

impl std::fmt::Display for GroupVersionKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, Kind={}", self.api_version(), self.kind)
	}
}

/// Splits an `apiVersion` into `(group, version)`.
pub fn split_api_version(api_version: &str) -> SchemeResult<(&str, &str)> {
	if api_version.is_empty() || api_version == "/" {
		return Ok(("", ""));
	}
	match api_version.split_once('/') {
		None => Ok(("", api_version)),
		Some((group, version)) if !version.contains('/') => Ok((group, version)),
		Some(_) => Err(SchemeError::InvalidApiVersion(api_version.to_string())),
	}
}
