//! Ready-made payloads for the sample types.
//!
//! The `*_JSON` constants are canonical: decoding and re-encoding them with a
//! compact JSON serializer reproduces them byte for byte. The YAML and pretty
//! constants carry the same content.

/// Canonical compact Pod.
pub const POD_JSON: &str = concat!(
	r#"{"apiVersion":"v1","kind":"Pod","#,
	r#""metadata":{"name":"web","namespace":"default","labels":{"app":"web","tier":"frontend"}},"#,
	r#""spec":{"containers":[{"name":"nginx","image":"nginx","ports":[{"containerPort":80}]}],"#,
	r#""restartPolicy":"Always"}}"#
);

/// [`POD_JSON`] as YAML, as the serializer writes it.
pub const POD_YAML: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: web
  namespace: default
  labels:
    app: web
    tier: frontend
spec:
  containers:
  - name: nginx
    image: nginx
    ports:
    - containerPort: 80
  restartPolicy: Always
";

/// [`POD_JSON`] indented by two spaces.
pub const POD_PRETTY: &str = r#"{
  "apiVersion": "v1",
  "kind": "Pod",
  "metadata": {
    "name": "web",
    "namespace": "default",
    "labels": {
      "app": "web",
      "tier": "frontend"
    }
  },
  "spec": {
    "containers": [
      {
        "name": "nginx",
        "image": "nginx",
        "ports": [
          {
            "containerPort": 80
          }
        ]
      }
    ],
    "restartPolicy": "Always"
  }
}"#;

/// Canonical compact ConfigMap.
pub const CONFIG_MAP_JSON: &str = r#"{"apiVersion":"v1","kind":"ConfigMap","metadata":{"name":"settings"},"data":{"mode":"fast","retries":"3"},"immutable":true}"#;

/// Canonical compact Widget with free-form content.
pub const WIDGET_JSON: &str = r#"{"apiVersion":"example.com/v1alpha1","kind":"Widget","size":2.5,"payload":{"enabled":false,"items":[1,-2,"three",null],"nested":{"a":{}}}}"#;

/// Minimal Pod, identified by type meta only.
pub const MINIMAL_POD_JSON: &str = r#"{"apiVersion":"v1","kind":"Pod"}"#;
