//! Decoded objects.
//!
//! An [`Object`] is the typed in-memory form of a payload: the resolved
//! [`GroupVersionKind`] plus a [`Record`] holding exactly the fields that were
//! present on the wire. Field order is not stored; the encoder re-derives it
//! from the shape.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::GroupVersionKind;
use crate::shape::{API_VERSION_FIELD, KIND_FIELD};

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit `null`.
	Null,
	/// Boolean.
	Bool(bool),
	/// Number, keeping the integer/float distinction of the source.
	Number(Number),
	/// String.
	String(String),
	/// List of values.
	List(Vec<Value>),
	/// String-keyed map; keys are kept sorted.
	Map(BTreeMap<String, Value>),
	/// Nested record described by a shape.
	Record(Record),
}

impl Value {
	/// Builds a float value. Returns `None` for NaN and infinities.
	pub fn from_f64(value: f64) -> Option<Self> {
		Number::from_f64(value).map(Self::Number)
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrows the string content.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the boolean content.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the number as `i64` when it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Number(n) => n.as_i64(),
			_ => None,
		}
	}

	/// Returns the number as `u64` when it fits.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Number(n) => n.as_u64(),
			_ => None,
		}
	}

	/// Returns the number as `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => n.as_f64(),
			_ => None,
		}
	}

	/// Borrows the list content.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Borrows the map content.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrows the nested record.
	pub fn as_record(&self) -> Option<&Record> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}

	/// Short name of the variant, used in error messages.
	pub fn describe(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::List(_) => "array",
			Self::Map(_) => "map",
			Self::Record(_) => "object",
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Number(value.into())
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::Number(value.into())
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Number(value.into())
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Record> for Value {
	fn from(value: Record) -> Self {
		Self::Record(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::List(value)
	}
}

impl From<BTreeMap<String, Value>> for Value {
	fn from(value: BTreeMap<String, Value>) -> Self {
		Self::Map(value)
	}
}

/// Fields present on a record, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
	fields: BTreeMap<String, Value>,
}

impl Record {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	///
	/// ```
	/// # use objcodec_schema::Record;
	/// let record = Record::new().with("name", "web").with("replicas", 3i64);
	/// assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("web"));
	/// ```
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(name, value);
		self
	}

	/// Inserts a field, returning the previous value.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.fields.insert(name.into(), value.into())
	}

	/// Looks up a field.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Mutable lookup.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
		self.fields.get_mut(name)
	}

	/// Removes a field.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.fields.remove(name)
	}

	/// Returns true if the field is present (including explicit null).
	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Follows a path of nested record fields.
	///
	/// ```
	/// # use objcodec_schema::Record;
	/// let record = Record::new().with("metadata", Record::new().with("name", "web"));
	/// let name = record.lookup(&["metadata", "name"]).and_then(|v| v.as_str());
	/// assert_eq!(name, Some("web"));
	/// ```
	pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
		let (first, rest) = path.split_first()?;
		let value = self.get(first)?;
		if rest.is_empty() {
			return Some(value);
		}
		match value {
			Value::Record(record) => record.lookup(rest),
			Value::Map(map) => lookup_map(map, rest),
			_ => None,
		}
	}

	/// Number of present fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if no field is present.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Iterates present fields in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}
}

fn lookup_map<'a>(map: &'a BTreeMap<String, Value>, path: &[&str]) -> Option<&'a Value> {
	let (first, rest) = path.split_first()?;
	let value = map.get(*first)?;
	if rest.is_empty() {
		return Some(value);
	}
	match value {
		Value::Record(record) => record.lookup(rest),
		Value::Map(inner) => lookup_map(inner, rest),
		_ => None,
	}
}

impl FromIterator<(String, Value)> for Record {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Record {
	type Item = (String, Value);
	type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}

/// A typed object: resolved type identity plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
	gvk: GroupVersionKind,
	fields: Record,
}

impl Object {
	/// Creates an object of the given type.
	pub fn new(gvk: GroupVersionKind, fields: Record) -> Self {
		Self { gvk, fields }
	}

	/// Creates an object whose type-meta fields are filled from `gvk`.
	///
	/// ```
	/// # use objcodec_schema::{GroupVersionKind, Object, Record};
	/// let pod = Object::with_type_meta(GroupVersionKind::new("", "v1", "Pod"), Record::new());
	/// assert_eq!(pod.api_version(), Some("v1"));
	/// assert_eq!(pod.kind(), Some("Pod"));
	/// ```
	pub fn with_type_meta(gvk: GroupVersionKind, fields: Record) -> Self {
		let fields = fields
			.with(API_VERSION_FIELD, gvk.api_version())
			.with(KIND_FIELD, gvk.kind.clone());
		Self { gvk, fields }
	}

	/// Resolved type identity, used to find the shape when encoding.
	pub fn gvk(&self) -> &GroupVersionKind {
		&self.gvk
	}

	/// The `apiVersion` field, if present on the object.
	pub fn api_version(&self) -> Option<&str> {
		self.fields.get(API_VERSION_FIELD).and_then(Value::as_str)
	}

	/// The `kind` field, if present on the object.
	pub fn kind(&self) -> Option<&str> {
		self.fields.get(KIND_FIELD).and_then(Value::as_str)
	}

	/// Borrows the fields.
	pub fn fields(&self) -> &Record {
		&self.fields
	}

	/// Mutably borrows the fields.
	pub fn fields_mut(&mut self) -> &mut Record {
		&mut self.fields
	}

	/// Shorthand for `fields().get(name)`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Splits the object into its type and fields.
	pub fn into_parts(self) -> (GroupVersionKind, Record) {
		(self.gvk, self.fields)
	}
}
