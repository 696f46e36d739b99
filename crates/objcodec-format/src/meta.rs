//! Type-meta extraction.
//!
//! Finding out what an object *is* must not require decoding it. The
//! [`DefaultMetaFactory`] scans only the top-level `apiVersion` and `kind`
//! members and skips everything else without building values.

use std::fmt;

use objcodec_schema::{API_VERSION_FIELD, GroupVersionKind, KIND_FIELD};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};

use crate::error::{FormatError, FormatResult};

/// Extracts the type identity carried by a JSON payload.
///
/// Absent members yield empty components; they are not an error here.
pub trait MetaFactory: Send + Sync {
	/// Reads `apiVersion` and `kind` from `data`.
	fn extract_meta(&self, data: &[u8]) -> FormatResult<GroupVersionKind>;
}

/// Probes the top-level object with a streaming scan.
///
/// When a member appears more than once the last occurrence wins, matching
/// how non-strict decoding resolves duplicates.
///
/// ```
/// use objcodec_format::{DefaultMetaFactory, MetaFactory};
///
/// let gvk = DefaultMetaFactory
///     .extract_meta(br#"{"apiVersion":"apps/v1","kind":"Deployment","spec":{}}"#)
///     .unwrap();
/// assert_eq!(gvk.group, "apps");
/// assert_eq!(gvk.kind, "Deployment");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMetaFactory;

impl MetaFactory for DefaultMetaFactory {
	fn extract_meta(&self, data: &[u8]) -> FormatResult<GroupVersionKind> {
		let mut de = serde_json::Deserializer::from_slice(data);
		let probe = (&mut de)
			.deserialize_map(ProbeVisitor)
			.and_then(|probe| de.end().map(|()| probe))
			.map_err(FormatError::from_json)?;

		let api_version = probe.api_version.unwrap_or_default();
		GroupVersionKind::from_api_version(&api_version, probe.kind.unwrap_or_default())
			.map_err(|_| FormatError::InvalidApiVersion(api_version))
	}
}

#[derive(Default)]
struct TypeMetaProbe {
	api_version: Option<String>,
	kind: Option<String>,
}

struct ProbeVisitor;

impl<'de> Visitor<'de> for ProbeVisitor {
	type Value = TypeMetaProbe;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a JSON object")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TypeMetaProbe, A::Error> {
		let mut probe = TypeMetaProbe::default();
		while let Some(key) = map.next_key::<ProbeKey>()? {
			match key {
				ProbeKey::ApiVersion => probe.api_version = map.next_value()?,
				ProbeKey::Kind => probe.kind = map.next_value()?,
				ProbeKey::Other => {
					map.next_value::<IgnoredAny>()?;
				}
			}
		}
		Ok(probe)
	}
}

enum ProbeKey {
	ApiVersion,
	Kind,
	Other,
}

impl<'de> de::Deserialize<'de> for ProbeKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct KeyVisitor;

		impl Visitor<'_> for KeyVisitor {
			type Value = ProbeKey;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a member name")
			}

			fn visit_str<E: de::Error>(self, v: &str) -> Result<ProbeKey, E> {
				Ok(match v {
					API_VERSION_FIELD => ProbeKey::ApiVersion,
					KIND_FIELD => ProbeKey::Kind,
					_ => ProbeKey::Other,
				})
			}
		}

		deserializer.deserialize_identifier(KeyVisitor)
	}
}
