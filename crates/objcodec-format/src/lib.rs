//! Wire format plumbing for objcodec.
//!
//! Everything here is syntactic: parsing bytes into a [`Node`] tree under
//! [`DecodeLimits`], probing type metadata, transcoding YAML to and from JSON,
//! and pretty printing. Nothing in this crate knows about shapes beyond the
//! `apiVersion` / `kind` members.
//!
//! ## Features
//!
//! - **Order-preserving documents**: [`Node`] keeps mapping entries in source
//!   order with duplicates, so strict decoding can see them
//! - **Bounded parsing**: payload size and nesting depth are checked on every parse
//! - **Streaming metadata probe**: [`DefaultMetaFactory`] skips everything but
//!   `apiVersion` and `kind`
//! - **Transcoding**: [`YamlAdapter`] and [`IndentFormatter`]

#![warn(missing_docs)]

pub mod adapter;
pub mod document;
pub mod error;
pub mod format;
pub mod limits;
pub mod meta;
pub mod pretty;

pub use adapter::{FormatAdapter, YamlAdapter};
pub use document::Node;
pub use error::{FormatError, FormatResult};
pub use format::WireFormat;
pub use limits::{DecodeLimits, LimitExceeded, MAX_SUPPORTED_DEPTH};
pub use meta::{DefaultMetaFactory, MetaFactory};
pub use pretty::{DEFAULT_INDENT, IndentFormatter, PrettyFormatter};
