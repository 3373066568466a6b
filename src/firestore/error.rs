use thiserror::Error;

use crate::firestore::{Kind, Tag, WireShape};

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, FcfError>;

/// Errors produced while loading event envelopes and decoding their values.
#[derive(Debug, Error)]
pub enum FcfError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Envelope text was not valid event JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Field data could not be decoded into the destination.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Failure of a single decode call, annotated with the failing field path.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Destination container cannot host the wire node's structure.
	#[error("{}: cannot decode {wire} into a {dest} destination", display_path(.path))]
	ShapeMismatch {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// Structural kind of the wire node.
		wire: WireShape,
		/// Resolved destination kind.
		dest: Kind,
	},
	/// Wire tag and destination kind are incompatible.
	#[error("{}: type mismatch: cannot decode firestore {tag} into a {kind} field", display_path(.path))]
	TypeMismatch {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// Wire union tag.
		tag: Tag,
		/// Resolved destination kind.
		kind: Kind,
	},
	/// Value transformation failed.
	#[error("{}: {source}", display_path(.path))]
	Conversion {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// Underlying conversion failure.
		#[source]
		source: ConversionError,
	},
	/// Wire node is not a well-formed tagged value.
	#[error("{}: malformed wire value: {reason}", display_path(.path))]
	Malformed {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// What was wrong with the node.
		reason: String,
	},
	/// Container nesting exceeded the configured limit.
	#[error("{}: decode depth exceeded (max={max_depth})", display_path(.path))]
	DepthExceeded {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Wire array exceeded the configured element limit.
	#[error("{}: array too large: count={count}, max={max}", display_path(.path))]
	ArrayTooLarge {
		/// Dotted/bracketed path of the failing field.
		path: String,
		/// Wire array length.
		count: usize,
		/// Maximum permitted length.
		max: usize,
	},
}

impl DecodeError {
	/// Path of the field that failed, empty for the document root.
	pub fn path(&self) -> &str {
		match self {
			Self::ShapeMismatch { path, .. }
			| Self::TypeMismatch { path, .. }
			| Self::Conversion { path, .. }
			| Self::Malformed { path, .. }
			| Self::DepthExceeded { path, .. }
			| Self::ArrayTooLarge { path, .. } => path,
		}
	}
}

/// Failed transformation of one wire scalar.
#[derive(Debug, Error)]
pub enum ConversionError {
	/// Integer text did not parse.
	#[error("invalid integer {text:?}")]
	InvalidInteger {
		/// Raw integer text.
		text: String,
	},
	/// Number does not fit the destination width.
	#[error("value {text} out of range for {kind}")]
	OutOfRange {
		/// Raw numeric text.
		text: String,
		/// Destination kind.
		kind: Kind,
	},
	/// Timestamp text is not RFC 3339.
	#[error("invalid timestamp {text:?}: {source}")]
	Timestamp {
		/// Raw timestamp text.
		text: String,
		/// Parser failure.
		#[source]
		source: time::error::Parse,
	},
	/// Bytes payload is not standard base64.
	#[error("invalid base64 payload: {0}")]
	Bytes(#[from] base64::DecodeError),
	/// Reference path lacks the database documents marker.
	#[error("reference {path:?} is not below /databases/(default)/documents")]
	Reference {
		/// Raw reference path.
		path: String,
	},
	/// Tagged payload has the wrong JSON type.
	#[error("{tag} payload must be {expected}, got {got}")]
	Payload {
		/// Wire union tag.
		tag: Tag,
		/// Expected JSON type.
		expected: &'static str,
		/// Actual JSON type.
		got: &'static str,
	},
	/// Destination cannot store the converted scalar.
	#[error("cannot store {value} in a {kind} destination")]
	Unsupported {
		/// Converted scalar kind.
		value: &'static str,
		/// Destination kind.
		kind: Kind,
	},
}

fn display_path(path: &str) -> &str {
	if path.is_empty() { "<document>" } else { path }
}
