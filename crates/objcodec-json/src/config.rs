//! Serializer configuration.
//!
//! Supports TOML configuration files:
//!
//! ```toml
//! strict = true
//! pretty = false
//! yaml = false
//! indent = 2
//!
//! [limits]
//! max_body_size = 3145728   # 0 disables the size bound
//! max_depth = 64
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use objcodec_format::{DEFAULT_INDENT, DecodeLimits, IndentFormatter, MAX_SUPPORTED_DEPTH};
use objcodec_schema::TypeResolver;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::factory::CodecFactory;
use crate::options::SerializerOptions;
use crate::serializer::Serializer;

const MAX_INDENT: usize = 16;

/// Configuration for building serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
	/// Read and write YAML.
	pub yaml: bool,

	/// Indent JSON output.
	pub pretty: bool,

	/// Reject unknown and duplicate fields.
	pub strict: bool,

	/// Spaces per level for pretty output.
	pub indent: usize,

	/// Decoding bounds.
	pub limits: LimitsConfig,
}

impl Default for SerializerConfig {
	fn default() -> Self {
		Self {
			yaml: false,
			pretty: false,
			strict: false,
			indent: DEFAULT_INDENT,
			limits: LimitsConfig::default(),
		}
	}
}

/// Decoding bounds as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
	/// Maximum payload size in bytes; `0` means unbounded.
	pub max_body_size: usize,

	/// Maximum nesting depth, `1..=100`.
	pub max_depth: usize,
}

impl Default for LimitsConfig {
	fn default() -> Self {
		let limits = DecodeLimits::default();
		Self {
			max_body_size: limits.max_body_size().unwrap_or(0),
			max_depth: limits.max_depth(),
		}
	}
}

impl SerializerConfig {
	/// Load configuration from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read, parsed or validated.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Parse configuration from a TOML string.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
			message: e.to_string(),
		})?;
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(1..=MAX_SUPPORTED_DEPTH).contains(&self.limits.max_depth) {
			return Err(ConfigError::Invalid {
				field: "limits.max_depth",
				message: format!(
					"must be between 1 and {MAX_SUPPORTED_DEPTH}, got {}",
					self.limits.max_depth
				),
			});
		}
		if self.indent > MAX_INDENT {
			return Err(ConfigError::Invalid {
				field: "indent",
				message: format!("must be at most {MAX_INDENT}, got {}", self.indent),
			});
		}
		Ok(())
	}

	/// Serializer switches.
	pub fn options(&self) -> SerializerOptions {
		SerializerOptions::new(self.yaml, self.pretty, self.strict)
	}

	/// Decoding bounds.
	pub fn limits(&self) -> DecodeLimits {
		let limits = DecodeLimits::default().with_max_depth(self.limits.max_depth);
		match self.limits.max_body_size {
			0 => limits.without_body_limit(),
			size => limits.with_max_body_size(size),
		}
	}

	/// Builds the configured serializer.
	pub fn build(&self, resolver: Arc<dyn TypeResolver>) -> Result<Serializer, ConfigError> {
		self.validate()?;
		Ok(self.configure(Serializer::new(resolver, self.options())))
	}

	/// Builds all eight serializers with these limits and indentation.
	///
	/// The switches in this configuration are ignored; the factory covers
	/// every combination.
	pub fn build_factory(&self, resolver: Arc<dyn TypeResolver>) -> Result<CodecFactory, ConfigError> {
		self.validate()?;
		Ok(CodecFactory::from_fn(|options| {
			self.configure(Serializer::new(Arc::clone(&resolver), options))
		}))
	}

	fn configure(&self, serializer: Serializer) -> Serializer {
		serializer
			.with_limits(self.limits())
			.with_pretty_formatter(Arc::new(IndentFormatter::new(self.indent)))
	}
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("IO error reading {path}: {source}")]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// The TOML is malformed or has wrongly typed values.
	#[error("Failed to parse configuration: {message}")]
	Parse {
		/// Parser message.
		message: String,
	},

	/// A value is out of range.
	#[error("Invalid configuration value for {field}: {message}")]
	Invalid {
		/// Offending key.
		field: &'static str,
		/// What is wrong.
		message: String,
	},
}
