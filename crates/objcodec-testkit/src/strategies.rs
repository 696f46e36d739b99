//! proptest strategies for payloads of the sample types.
//!
//! - [`canonical_pod`] / [`canonical_widget`]: canonical compact JSON, which
//!   must round-trip exactly
//! - [`noisy_pod`]: a canonical Pod with shuffled members, unknown members and
//!   repeated members mixed in
//! - [`json_document`]: arbitrary JSON objects, duplicates allowed

use std::collections::BTreeMap;

use objcodec_format::Node;
use proptest::prelude::*;
use serde_json::Number;

/// Keys used both for known and made-up members.
const TOP_LEVEL_NAMES: &[&str] = &["apiVersion", "kind", "metadata", "spec", "status"];

const RESTART_POLICIES: &[&str] = &["Always", "OnFailure", "Never"];

fn label_key() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9.-]{0,12}"
}

fn string_map() -> impl Strategy<Value = BTreeMap<String, String>> {
	prop::collection::btree_map(label_key(), any::<String>(), 0..4)
}

fn mapping(map: BTreeMap<String, String>) -> Node {
	Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::String(v))).collect())
}

fn int(value: i64) -> Node {
	Node::Number(value.into())
}

/// Pushes `(name, node)` when present; keeps shape order intact.
fn push(entries: &mut Vec<(String, Node)>, name: &str, node: Option<Node>) {
	if let Some(node) = node {
		entries.push((name.to_string(), node));
	}
}

/// Finite scalar.
pub fn scalar() -> impl Strategy<Value = Node> {
	prop_oneof![
		Just(Node::Null),
		any::<bool>().prop_map(Node::Bool),
		any::<i64>().prop_map(int),
		any::<u64>().prop_map(|n| Node::Number(n.into())),
		any::<f64>()
			.prop_filter_map("finite", Number::from_f64)
			.prop_map(Node::Number),
		any::<String>().prop_map(Node::String),
	]
}

/// Free-form content with sorted, unique keys, as an `Any` field is encoded.
pub fn canonical_any() -> impl Strategy<Value = Node> {
	scalar().prop_recursive(4, 32, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
			prop::collection::btree_map(label_key(), inner, 0..4)
				.prop_map(|map| Node::Mapping(map.into_iter().collect())),
		]
	})
}

/// Free-form content in any order, duplicates allowed.
pub fn any_node() -> impl Strategy<Value = Node> {
	scalar().prop_recursive(4, 32, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
			prop::collection::vec((prop::sample::select(TOP_LEVEL_NAMES).prop_map(String::from), inner), 0..4)
				.prop_map(Node::Mapping),
		]
	})
}

fn object_meta() -> impl Strategy<Value = Node> {
	(
		prop::option::of(any::<String>()),
		prop::option::of(any::<String>()),
		prop::option::of(string_map()),
		prop::option::of(string_map()),
	)
		.prop_map(|(name, namespace, labels, annotations)| {
			let mut entries = Vec::new();
			push(&mut entries, "name", name.map(Node::String));
			push(&mut entries, "namespace", namespace.map(Node::String));
			push(&mut entries, "labels", labels.map(mapping));
			push(&mut entries, "annotations", annotations.map(mapping));
			Node::Mapping(entries)
		})
}

fn container() -> impl Strategy<Value = Node> {
	let port = (prop::option::of("[a-z]{1,8}"), prop::option::of(1i64..65536)).prop_map(|(name, port)| {
		let mut entries = Vec::new();
		push(&mut entries, "name", name.map(Node::String));
		push(&mut entries, "containerPort", port.map(int));
		Node::Mapping(entries)
	});
	(
		prop::option::of("[a-z][a-z0-9-]{0,15}"),
		prop::option::of("[a-z0-9./:-]{1,24}"),
		prop::option::of(prop::collection::vec(any::<String>(), 0..3)),
		prop::option::of(prop::collection::vec(port, 0..3)),
	)
		.prop_map(|(name, image, args, ports)| {
			let mut entries = Vec::new();
			push(&mut entries, "name", name.map(Node::String));
			push(&mut entries, "image", image.map(Node::String));
			push(
				&mut entries,
				"args",
				args.map(|args| Node::Sequence(args.into_iter().map(Node::String).collect())),
			);
			push(&mut entries, "ports", ports.map(Node::Sequence));
			Node::Mapping(entries)
		})
}

fn pod_spec() -> impl Strategy<Value = Node> {
	(
		prop::option::of(prop::collection::vec(container(), 0..3)),
		prop::option::of(prop::sample::select(RESTART_POLICIES)),
		prop::option::of(string_map()),
		prop::option::of(any::<bool>()),
		prop::option::of(any::<i64>()),
	)
		.prop_map(|(containers, restart, selector, host_network, grace)| {
			let mut entries = Vec::new();
			push(&mut entries, "containers", containers.map(Node::Sequence));
			push(&mut entries, "restartPolicy", restart.map(|s| Node::String(s.to_string())));
			push(&mut entries, "nodeSelector", selector.map(mapping));
			push(&mut entries, "hostNetwork", host_network.map(Node::Bool));
			push(&mut entries, "terminationGracePeriodSeconds", grace.map(int));
			Node::Mapping(entries)
		})
}

/// Canonical Pod document.
pub fn canonical_pod_node() -> impl Strategy<Value = Node> {
	(
		prop::option::of(object_meta()),
		prop::option::of(pod_spec()),
		prop::option::of(canonical_any()),
	)
		.prop_map(|(metadata, spec, status)| {
			let mut entries = vec![
				("apiVersion".to_string(), Node::String("v1".to_string())),
				("kind".to_string(), Node::String("Pod".to_string())),
			];
			push(&mut entries, "metadata", metadata);
			push(&mut entries, "spec", spec);
			push(&mut entries, "status", status);
			Node::Mapping(entries)
		})
}

/// Canonical compact JSON for a Pod.
pub fn canonical_pod() -> impl Strategy<Value = Vec<u8>> {
	canonical_pod_node().prop_filter_map("renders as JSON", |node| node.to_json_vec().ok())
}

/// Canonical compact JSON for a Widget.
pub fn canonical_widget() -> impl Strategy<Value = Vec<u8>> {
	(
		prop::option::of(any::<f64>().prop_filter_map("finite", Number::from_f64)),
		prop::option::of(canonical_any()),
	)
		.prop_filter_map("renders as JSON", |(size, payload)| {
			let mut entries = vec![
				("apiVersion".to_string(), Node::String("example.com/v1alpha1".to_string())),
				("kind".to_string(), Node::String("Widget".to_string())),
			];
			push(&mut entries, "size", size.map(Node::Number));
			push(&mut entries, "payload", payload);
			Node::Mapping(entries).to_json_vec().ok()
		})
}

/// A canonical Pod with its top-level members shuffled, and unknown or
/// repeated members mixed in.
pub fn noisy_pod() -> impl Strategy<Value = Vec<u8>> {
	let extra = (
		prop_oneof![
			prop::sample::select(TOP_LEVEL_NAMES).prop_map(String::from),
			"[a-zA-Z]{1,10}",
		],
		scalar(),
	);
	(canonical_pod_node(), prop::collection::vec(extra, 0..3))
		.prop_flat_map(|(node, extras)| {
			let mut entries = match node {
				Node::Mapping(entries) => entries,
				other => vec![("status".to_string(), other)],
			};
			entries.extend(extras);
			Just(entries).prop_shuffle()
		})
		.prop_filter_map("renders as JSON", |entries| Node::Mapping(entries).to_json_vec().ok())
}

/// Arbitrary JSON object, possibly with repeated keys.
pub fn json_document() -> impl Strategy<Value = Vec<u8>> {
	prop::collection::vec(
		(prop::sample::select(TOP_LEVEL_NAMES).prop_map(String::from), any_node()),
		0..6,
	)
	.prop_filter_map("renders as JSON", |entries| Node::Mapping(entries).to_json_vec().ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use objcodec_format::DecodeLimits;
	use proptest::strategy::ValueTree;
	use proptest::test_runner::TestRunner;

	#[test]
	fn test_canonical_pod_parses() {
		let mut runner = TestRunner::default();
		for _ in 0..32 {
			let bytes = canonical_pod().new_tree(&mut runner).unwrap().current();
			let node = Node::from_json_slice(&bytes, &DecodeLimits::default()).unwrap();
			assert_eq!(node.get("kind"), Some(&Node::String("Pod".to_string())));
		}
	}

	#[test]
	fn test_json_document_is_object() {
		let mut runner = TestRunner::default();
		for _ in 0..32 {
			let bytes = json_document().new_tree(&mut runner).unwrap().current();
			assert_eq!(bytes.first(), Some(&b'{'));
		}
	}
}
