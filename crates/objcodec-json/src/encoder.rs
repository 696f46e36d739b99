//! Canonical JSON rendering.
//!
//! The canonical form of an object is compact JSON with record fields in
//! shape order, only present fields emitted, and map keys sorted. Decoding a
//! canonical payload and encoding it again reproduces it byte for byte.

use objcodec_format::{DecodeLimits, LimitExceeded, Node};
use objcodec_schema::{FieldType, Object, Record, Shape, Value};

use crate::error::{EncodeError, EncodeResult};

/// Renders objects into canonical JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
	max_depth: usize,
}

impl Default for Encoder {
	fn default() -> Self {
		Self::new(&DecodeLimits::default())
	}
}

impl Encoder {
	/// Creates an encoder that refuses objects nested deeper than
	/// `limits.max_depth()`, so that everything it writes can be decoded again.
	pub fn new(limits: &DecodeLimits) -> Self {
		Self {
			max_depth: limits.max_depth(),
		}
	}

	/// Converts `object` into an ordered document tree.
	pub fn to_node(&self, object: &Object, shape: &Shape) -> EncodeResult<Node> {
		let mut path = Vec::new();
		self.record(object.fields(), shape, 1, &mut path)
	}

	/// Renders `object` as canonical compact JSON.
	pub fn to_canonical(&self, object: &Object, shape: &Shape) -> EncodeResult<Vec<u8>> {
		Ok(self.to_node(object, shape)?.to_json_vec()?)
	}

	fn enter(&self, depth: usize) -> EncodeResult<()> {
		if depth > self.max_depth {
			return Err(LimitExceeded::TooDeep {
				limit: self.max_depth,
			}
			.into());
		}
		Ok(())
	}

	fn record(&self, record: &Record, shape: &Shape, depth: usize, path: &mut Vec<String>) -> EncodeResult<Node> {
		self.enter(depth)?;
		if let Some((name, _)) = record.iter().find(|(name, _)| shape.field(name).is_none()) {
			path.push(name.to_string());
			return Err(mismatch(path, format!("field is not declared by {}", shape.name())));
		}

		let mut entries = Vec::with_capacity(record.len());
		for field in shape.fields() {
			let Some(value) = record.get(field.name()) else {
				continue;
			};
			path.push(field.name().to_string());
			let node = self.value(value, field.ty(), depth, path)?;
			path.pop();
			entries.push((field.name().to_string(), node));
		}
		Ok(Node::Mapping(entries))
	}

	fn value(&self, value: &Value, ty: &FieldType, depth: usize, path: &mut Vec<String>) -> EncodeResult<Node> {
		let node = match (ty, value) {
			(_, Value::Null) => Node::Null,
			(FieldType::Any, value) => self.any(value, depth, path)?,
			(FieldType::String, Value::String(s)) => Node::String(s.clone()),
			(FieldType::Bool, Value::Bool(b)) => Node::Bool(*b),
			(FieldType::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Node::Number(n.clone()),
			(FieldType::Number, Value::Number(n)) => Node::Number(n.clone()),
			(FieldType::List(inner), Value::List(items)) => {
				self.enter(depth + 1)?;
				let mut nodes = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					path.push(format!("[{idx}]"));
					nodes.push(self.value(item, inner, depth + 1, path)?);
					path.pop();
				}
				Node::Sequence(nodes)
			}
			(FieldType::Map(inner), Value::Map(map)) => {
				self.enter(depth + 1)?;
				let mut entries = Vec::with_capacity(map.len());
				for (key, item) in map {
					path.push(key.clone());
					entries.push((key.clone(), self.value(item, inner, depth + 1, path)?));
					path.pop();
				}
				Node::Mapping(entries)
			}
			(FieldType::Record(shape), Value::Record(record)) => self.record(record, shape, depth + 1, path)?,
			(ty, value) => {
				return Err(mismatch(
					path,
					format!("expected {}, found {}", ty.describe(), value.describe()),
				));
			}
		};
		Ok(node)
	}

	fn any(&self, value: &Value, depth: usize, path: &mut Vec<String>) -> EncodeResult<Node> {
		let node = match value {
			Value::Null => Node::Null,
			Value::Bool(b) => Node::Bool(*b),
			Value::Number(n) => Node::Number(n.clone()),
			Value::String(s) => Node::String(s.clone()),
			Value::List(items) => {
				self.enter(depth + 1)?;
				let mut nodes = Vec::with_capacity(items.len());
				for (idx, item) in items.iter().enumerate() {
					path.push(format!("[{idx}]"));
					nodes.push(self.any(item, depth + 1, path)?);
					path.pop();
				}
				Node::Sequence(nodes)
			}
			Value::Map(map) => self.any_entries(map.iter().map(|(k, v)| (k.as_str(), v)), depth, path)?,
			Value::Record(record) => self.any_entries(record.iter(), depth, path)?,
		};
		Ok(node)
	}

	fn any_entries<'v>(
		&self,
		entries: impl Iterator<Item = (&'v str, &'v Value)>,
		depth: usize,
		path: &mut Vec<String>,
	) -> EncodeResult<Node> {
		self.enter(depth + 1)?;
		let mut out = Vec::new();
		for (key, item) in entries {
			path.push(key.to_string());
			out.push((key.to_string(), self.any(item, depth + 1, path)?));
			path.pop();
		}
		Ok(Node::Mapping(out))
	}
}

fn mismatch(path: &[String], reason: String) -> EncodeError {
	let mut rendered = String::new();
	for segment in path {
		if !rendered.is_empty() && !segment.starts_with('[') {
			rendered.push('.');
		}
		rendered.push_str(segment);
	}
	EncodeError::ShapeMismatch {
		path: rendered,
		reason,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use objcodec_schema::GroupVersionKind;
	use rstest::{fixture, rstest};
	use std::collections::BTreeMap;

	#[fixture]
	fn shape() -> Shape {
		let item = Shape::builder("Item")
			.field("name", FieldType::String)
			.field("count", FieldType::Integer)
			.build()
			.unwrap();
		Shape::builder("Widget")
			.type_meta()
			.field("items", FieldType::list(FieldType::record(item)))
			.field("labels", FieldType::map(FieldType::String))
			.field("extra", FieldType::Any)
			.build()
			.unwrap()
	}

	fn widget(fields: Record) -> Object {
		Object::with_type_meta(GroupVersionKind::new("example.com", "v1alpha1", "Widget"), fields)
	}

	fn encode(object: &Object, shape: &Shape) -> String {
		String::from_utf8(Encoder::default().to_canonical(object, shape).unwrap()).unwrap()
	}

	#[rstest]
	fn test_fields_in_shape_order(shape: Shape) {
		let mut labels = BTreeMap::new();
		labels.insert("z".to_string(), Value::from("1"));
		labels.insert("a".to_string(), Value::from("2"));
		let object = widget(
			Record::new()
				.with("labels", labels)
				.with("items", vec![Value::from(Record::new().with("count", 2i64).with("name", "x"))]),
		);
		assert_eq!(
			encode(&object, &shape),
			r#"{"apiVersion":"example.com/v1alpha1","kind":"Widget","items":[{"name":"x","count":2}],"labels":{"a":"2","z":"1"}}"#
		);
	}

	#[rstest]
	fn test_absent_fields_are_omitted_and_null_kept(shape: Shape) {
		let object = Object::new(
			GroupVersionKind::new("example.com", "v1alpha1", "Widget"),
			Record::new().with("extra", Value::Null),
		);
		assert_eq!(encode(&object, &shape), r#"{"extra":null}"#);
	}

	#[rstest]
	fn test_undeclared_field_is_rejected(shape: Shape) {
		let object = widget(Record::new().with("bogus", true));
		let err = Encoder::default().to_canonical(&object, &shape).unwrap_err();
		assert!(matches!(err, EncodeError::ShapeMismatch { ref path, .. } if path == "bogus"));
	}

	#[rstest]
	fn test_wrong_value_type_is_rejected(shape: Shape) {
		let object = widget(Record::new().with(
			"items",
			vec![Value::from(Record::new().with("count", "many"))],
		));
		let err = Encoder::default().to_canonical(&object, &shape).unwrap_err();
		match err {
			EncodeError::ShapeMismatch { path, reason } => {
				assert_eq!(path, "items[0].count");
				assert_eq!(reason, "expected integer, found string");
			}
			other => panic!("Expected ShapeMismatch, got {other:?}"),
		}
	}

	#[rstest]
	fn test_depth_limit(shape: Shape) {
		let mut nested = Value::from(1i64);
		for _ in 0..10 {
			nested = Value::List(vec![nested]);
		}
		let object = widget(Record::new().with("extra", nested));
		let limits = DecodeLimits::default().with_max_depth(5);
		let err = Encoder::new(&limits).to_canonical(&object, &shape).unwrap_err();
		assert!(matches!(err, EncodeError::LimitExceeded(LimitExceeded::TooDeep { limit: 5 })));
	}

	#[rstest]
	fn test_any_renders_sorted_maps(shape: Shape) {
		let mut inner = BTreeMap::new();
		inner.insert("b".to_string(), Value::from(true));
		inner.insert("a".to_string(), Value::from_f64(1.5).unwrap());
		let object = Object::new(
			GroupVersionKind::new("example.com", "v1alpha1", "Widget"),
			Record::new().with("extra", inner),
		);
		assert_eq!(encode(&object, &shape), r#"{"extra":{"a":1.5,"b":true}}"#);
	}
}
