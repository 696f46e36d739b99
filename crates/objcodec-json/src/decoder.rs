//! Shape-driven decoding with selectable strictness.
//!
//! The [`Decoder`] walks a parsed [`Node`] tree alongside a [`Shape`]. In
//! strict mode every unknown or repeated key is collected and the decode fails
//! with a [`StrictError`] listing all of them. In non-strict mode unknown
//! fields are dropped and repeated keys resolve to the last value.
//!
//! Value types are checked in both modes: a strictness setting changes which
//! *field names* are tolerated, never which *values* are.

use std::collections::{BTreeMap, HashSet};

use objcodec_format::{FormatError, Node, WireFormat};
use objcodec_schema::{FieldType, GroupVersionKind, Object, Record, Shape, Value};

use crate::error::{DecodeError, DecodeResult, FieldViolation, StrictError};

/// Decodes document trees into [`Object`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
	strict: bool,
}

impl Decoder {
	/// Creates a decoder.
	pub fn new(strict: bool) -> Self {
		Self { strict }
	}

	/// Returns true if unknown and duplicate fields are rejected.
	pub fn is_strict(&self) -> bool {
		self.strict
	}

	/// Decodes `node` as an object of type `gvk` described by `shape`.
	///
	/// ```
	/// use objcodec_format::{DecodeLimits, Node};
	/// use objcodec_json::Decoder;
	/// use objcodec_schema::{FieldType, GroupVersionKind, Shape};
	///
	/// let shape = Shape::builder("Thing").type_meta().field("size", FieldType::Integer).build().unwrap();
	/// let gvk = GroupVersionKind::new("", "v1", "Thing");
	/// let node = Node::from_json_slice(br#"{"kind":"Thing","size":3,"extra":1}"#, &DecodeLimits::default()).unwrap();
	///
	/// let object = Decoder::new(false).decode(node.clone(), &shape, &gvk).unwrap();
	/// assert_eq!(object.get("size").and_then(|v| v.as_i64()), Some(3));
	/// assert!(object.get("extra").is_none());
	///
	/// assert!(Decoder::new(true).decode(node, &shape, &gvk).is_err());
	/// ```
	pub fn decode(&self, node: Node, shape: &Shape, gvk: &GroupVersionKind) -> DecodeResult<Object> {
		let entries = match node {
			Node::Mapping(entries) => entries,
			other => {
				return Err(FormatError::NotAnObject {
					format: WireFormat::Json,
					found: other.describe(),
				}
				.into());
			}
		};

		let mut walk = Walk {
			strict: self.strict,
			violations: Vec::new(),
		};
		let fields = walk.record(entries, shape, &FieldPath::ROOT)?;

		if !walk.violations.is_empty() {
			tracing::debug!(
				gvk = %gvk,
				violations = walk.violations.len(),
				"strict decoding rejected payload"
			);
			return Err(StrictError {
				gvk: gvk.clone(),
				violations: walk.violations,
			}
			.into());
		}
		Ok(Object::new(gvk.clone(), fields))
	}
}

/// Per-call decoding state.
struct Walk {
	strict: bool,
	violations: Vec<FieldViolation>,
}

impl Walk {
	fn record(&mut self, entries: Vec<(String, Node)>, shape: &Shape, path: &FieldPath<'_>) -> DecodeResult<Record> {
		self.check_duplicates(&entries, path);

		let mut record = Record::new();
		let mut unknown: HashSet<String> = HashSet::new();
		for (name, node) in entries {
			let Some(field) = shape.field(&name) else {
				if self.strict {
					if !unknown.contains(&name) {
						self.violations.push(FieldViolation::unknown(path.field(&name).render()));
						unknown.insert(name);
					}
				} else {
					tracing::debug!(
						shape = shape.name(),
						field = %path.field(&name).render(),
						"dropping unknown field"
					);
				}
				continue;
			};
			let value = self.value(node, field.ty(), &path.field(&name))?;
			record.insert(name, value);
		}
		Ok(record)
	}

	fn map(&mut self, entries: Vec<(String, Node)>, inner: &FieldType, path: &FieldPath<'_>) -> DecodeResult<BTreeMap<String, Value>> {
		self.check_duplicates(&entries, path);

		let mut map = BTreeMap::new();
		for (key, node) in entries {
			let value = self.value(node, inner, &path.field(&key))?;
			map.insert(key, value);
		}
		Ok(map)
	}

	fn check_duplicates(&mut self, entries: &[(String, Node)], path: &FieldPath<'_>) {
		if !self.strict || entries.len() < 2 {
			return;
		}
		let mut seen = HashSet::with_capacity(entries.len());
		let mut reported = HashSet::new();
		for (key, _) in entries {
			if !seen.insert(key.as_str()) && reported.insert(key.as_str()) {
				self.violations.push(FieldViolation::duplicate(path.field(key).render()));
			}
		}
	}

	fn value(&mut self, node: Node, ty: &FieldType, path: &FieldPath<'_>) -> DecodeResult<Value> {
		let value = match (ty, node) {
			(_, Node::Null) => Value::Null,
			(FieldType::Any, node) => self.any(node, path)?,
			(FieldType::String, Node::String(s)) => Value::String(s),
			(FieldType::Bool, Node::Bool(b)) => Value::Bool(b),
			(FieldType::Integer, Node::Number(n)) if n.is_i64() || n.is_u64() => Value::Number(n),
			(FieldType::Number, Node::Number(n)) => Value::Number(n),
			(FieldType::List(inner), Node::Sequence(items)) => {
				let mut list = Vec::with_capacity(items.len());
				for (idx, item) in items.into_iter().enumerate() {
					list.push(self.value(item, inner, &path.index(idx))?);
				}
				Value::List(list)
			}
			(FieldType::Map(inner), Node::Mapping(entries)) => Value::Map(self.map(entries, inner, path)?),
			(FieldType::Record(shape), Node::Mapping(entries)) => Value::Record(self.record(entries, shape, path)?),
			(ty, node) => {
				return Err(DecodeError::TypeMismatch {
					path: path.render(),
					expected: ty.describe(),
					found: node.describe(),
				});
			}
		};
		Ok(value)
	}

	fn any(&mut self, node: Node, path: &FieldPath<'_>) -> DecodeResult<Value> {
		Ok(match node {
			Node::Null => Value::Null,
			Node::Bool(b) => Value::Bool(b),
			Node::Number(n) => Value::Number(n),
			Node::String(s) => Value::String(s),
			Node::Sequence(items) => {
				let mut list = Vec::with_capacity(items.len());
				for (idx, item) in items.into_iter().enumerate() {
					list.push(self.any(item, &path.index(idx))?);
				}
				Value::List(list)
			}
			Node::Mapping(entries) => Value::Map(self.map(entries, &FieldType::Any, path)?),
		})
	}
}

/// Borrowed, lazily rendered field path.
///
/// Paths are only turned into strings when an error or violation is reported.
#[derive(Clone, Copy)]
struct FieldPath<'a> {
	parent: Option<&'a FieldPath<'a>>,
	segment: Segment<'a>,
}

#[derive(Clone, Copy)]
enum Segment<'a> {
	Root,
	Field(&'a str),
	Index(usize),
}

impl<'a> FieldPath<'a> {
	const ROOT: FieldPath<'static> = FieldPath {
		parent: None,
		segment: Segment::Root,
	};

	fn field(&'a self, name: &'a str) -> FieldPath<'a> {
		FieldPath {
			parent: Some(self),
			segment: Segment::Field(name),
		}
	}

	fn index(&'a self, idx: usize) -> FieldPath<'a> {
		FieldPath {
			parent: Some(self),
			segment: Segment::Index(idx),
		}
	}

	fn render(&self) -> String {
		let mut segments = Vec::new();
		let mut cursor = Some(self);
		while let Some(path) = cursor {
			segments.push(path.segment);
			cursor = path.parent;
		}

		let mut out = String::new();
		for segment in segments.into_iter().rev() {
			match segment {
				Segment::Root => {}
				Segment::Field(name) => {
					if !out.is_empty() {
						out.push('.');
					}
					out.push_str(name);
				}
				Segment::Index(idx) => {
					out.push('[');
					out.push_str(&idx.to_string());
					out.push(']');
				}
			}
		}
		out
	}
}
