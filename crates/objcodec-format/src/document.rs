//! Format-neutral document tree.
//!
//! [`Node`] is what JSON and YAML payloads parse into before anything looks at
//! types. Unlike `serde_json::Value` it keeps mapping entries in source order
//! and keeps duplicate keys, which is what strict decoding needs to report
//! them. Parsing is bounded by [`DecodeLimits`].

use std::cell::Cell;
use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::error::{FormatError, FormatResult};
use crate::format::WireFormat;
use crate::limits::{DecodeLimits, LimitExceeded};

/// A parsed document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// `null` (YAML `~` and empty scalars included).
	Null,
	/// Boolean.
	Bool(bool),
	/// Finite number.
	Number(Number),
	/// String.
	String(String),
	/// Sequence of values.
	Sequence(Vec<Node>),
	/// Mapping entries in source order, duplicates included.
	Mapping(Vec<(String, Node)>),
}

impl Node {
	/// Parses a single JSON document.
	///
	/// Trailing non-whitespace after the document is a syntax error.
	///
	/// ```
	/// use objcodec_format::{DecodeLimits, Node};
	///
	/// let node = Node::from_json_slice(br#"{"a":1,"a":2}"#, &DecodeLimits::default()).unwrap();
	/// let entries = node.as_mapping().unwrap();
	/// assert_eq!(entries.len(), 2);
	/// ```
	pub fn from_json_slice(data: &[u8], limits: &DecodeLimits) -> FormatResult<Self> {
		limits.check_body_size(data.len())?;
		let tripped = Cell::new(false);
		let mut de = serde_json::Deserializer::from_slice(data);
		let parsed = NodeSeed::root(limits, &tripped)
			.deserialize(&mut de)
			.and_then(|node| de.end().map(|()| node));
		parsed.map_err(|err| {
			if tripped.get() {
				too_deep(limits)
			} else {
				FormatError::from_json(err)
			}
		})
	}

	/// Parses a single YAML document.
	///
	/// Multiple documents in one stream are rejected. Non-string scalar keys
	/// are converted to their string form.
	pub fn from_yaml_slice(data: &[u8], limits: &DecodeLimits) -> FormatResult<Self> {
		limits.check_body_size(data.len())?;
		let tripped = Cell::new(false);
		let de = serde_yaml::Deserializer::from_slice(data);
		NodeSeed::root(limits, &tripped)
			.deserialize(de)
			.map_err(|err| {
				if tripped.get() {
					too_deep(limits)
				} else {
					FormatError::from_yaml(err)
				}
			})
	}

	/// Renders compact JSON.
	pub fn to_json_vec(&self) -> FormatResult<Vec<u8>> {
		serde_json::to_vec(self).map_err(|err| render_error(WireFormat::Json, err))
	}

	/// Renders indented JSON using `indent` spaces per level.
	pub fn to_pretty_json_vec(&self, indent: usize) -> FormatResult<Vec<u8>> {
		let spaces = vec![b' '; indent];
		let formatter = serde_json::ser::PrettyFormatter::with_indent(&spaces);
		let mut out = Vec::new();
		let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
		self.serialize(&mut ser)
			.map_err(|err| render_error(WireFormat::Json, err))?;
		Ok(out)
	}

	/// Renders a YAML document.
	pub fn to_yaml_vec(&self) -> FormatResult<Vec<u8>> {
		serde_yaml::to_string(self)
			.map(String::into_bytes)
			.map_err(|err| render_error(WireFormat::Yaml, err))
	}

	/// Borrows mapping entries.
	pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
		match self {
			Self::Mapping(entries) => Some(entries),
			_ => None,
		}
	}

	/// Looks up the last entry with the given key.
	pub fn get(&self, key: &str) -> Option<&Node> {
		self.as_mapping()?
			.iter()
			.rev()
			.find_map(|(k, v)| (k == key).then_some(v))
	}

	/// Container nesting depth. Scalars are depth 0.
	pub fn depth(&self) -> usize {
		match self {
			Self::Sequence(items) => 1 + items.iter().map(Node::depth).max().unwrap_or(0),
			Self::Mapping(entries) => 1 + entries.iter().map(|(_, v)| v.depth()).max().unwrap_or(0),
			_ => 0,
		}
	}

	/// Short name of the variant, used in error messages.
	pub fn describe(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Sequence(_) => "array",
			Self::Mapping(_) => "object",
		}
	}
}

fn too_deep(limits: &DecodeLimits) -> FormatError {
	LimitExceeded::TooDeep {
		limit: limits.max_depth(),
	}
	.into()
}

fn render_error(format: WireFormat, err: impl fmt::Display) -> FormatError {
	FormatError::Render {
		format,
		message: err.to_string(),
	}
}

impl Serialize for Node {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(b) => serializer.serialize_bool(*b),
			Self::Number(n) => n.serialize(serializer),
			Self::String(s) => serializer.serialize_str(s),
			Self::Sequence(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Mapping(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

/// Depth-tracking seed. `tripped` records that the error came from the depth
/// bound rather than from the input syntax.
#[derive(Clone, Copy)]
struct NodeSeed<'a> {
	depth: usize,
	max_depth: usize,
	tripped: &'a Cell<bool>,
}

impl<'a> NodeSeed<'a> {
	fn root(limits: &DecodeLimits, tripped: &'a Cell<bool>) -> Self {
		Self {
			depth: 0,
			max_depth: limits.max_depth(),
			tripped,
		}
	}

	fn enter<E: de::Error>(self) -> Result<Self, E> {
		let depth = self.depth + 1;
		if depth > self.max_depth {
			self.tripped.set(true);
			return Err(E::custom(format_args!(
				"nesting depth exceeds limit of {}",
				self.max_depth
			)));
		}
		Ok(Self { depth, ..self })
	}
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
	type Value = Node;

	fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
		deserializer.deserialize_any(self)
	}
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
	type Value = Node;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("any JSON-compatible value")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
		Ok(Node::Bool(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
		Ok(Node::Number(v.into()))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
		Ok(Node::Number(v.into()))
	}

	// Integers outside 64 bits degrade to floats, matching serde_json.
	fn visit_i128<E: de::Error>(self, v: i128) -> Result<Node, E> {
		match i64::try_from(v) {
			Ok(n) => self.visit_i64(n),
			Err(_) => self.visit_f64(v as f64),
		}
	}

	fn visit_u128<E: de::Error>(self, v: u128) -> Result<Node, E> {
		match u64::try_from(v) {
			Ok(n) => self.visit_u64(n),
			Err(_) => self.visit_f64(v as f64),
		}
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
		Number::from_f64(v)
			.map(Node::Number)
			.ok_or_else(|| E::custom(format_args!("non-finite number {v} is not representable")))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
		Ok(Node::String(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
		Ok(Node::String(v))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
		Ok(Node::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Node, E> {
		Ok(Node::Null)
	}

	fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
		self.deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
		let child = self.enter()?;
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
		while let Some(item) = seq.next_element_seed(child)? {
			items.push(item);
		}
		Ok(Node::Sequence(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
		let child = self.enter()?;
		let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0).min(64));
		while let Some(key) = map.next_key_seed(KeySeed)? {
			let value = map.next_value_seed(child)?;
			entries.push((key, value));
		}
		Ok(Node::Mapping(entries))
	}
}

/// Mapping key. YAML allows scalar keys of any type; they are stringified.
///
/// Integer keys keep their digits, wide ones included. Float keys are
/// written in their JSON number form, so `1e3` becomes `"1000.0"`.
struct KeySeed;

impl<'de> DeserializeSeed<'de> for KeySeed {
	type Value = String;

	fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
		deserializer.deserialize_any(self)
	}
}

impl<'de> Visitor<'de> for KeySeed {
	type Value = String;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a scalar mapping key")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
		Number::from_f64(v)
			.map(|n| n.to_string())
			.ok_or_else(|| E::custom(format_args!("non-finite number {v} is not a valid key")))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
		Ok(v.to_string())
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
		Ok(v)
	}

	fn visit_unit<E: de::Error>(self) -> Result<String, E> {
		Ok("null".to_string())
	}
}
