use std::fmt;

use serde_json::Value as JsonValue;

/// Firestore value union tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
	/// `stringValue`
	String,
	/// `booleanValue`
	Boolean,
	/// `integerValue`, carried as decimal text.
	Integer,
	/// `doubleValue`
	Double,
	/// `timestampValue`, RFC 3339 text.
	Timestamp,
	/// `referenceValue`, a full document resource path.
	Reference,
	/// `bytesValue`, standard base64 text.
	Bytes,
	/// `nullValue`
	Null,
	/// `geoPointValue`
	GeoPoint,
	/// `mapValue`
	Map,
	/// `arrayValue`
	Array,
	/// Untagged member, as found inside geo-points.
	Raw,
}

impl Tag {
	/// Every tag that appears as a wrapper key.
	pub const WRAPPED: [Tag; 11] = [
		Tag::String,
		Tag::Boolean,
		Tag::Integer,
		Tag::Double,
		Tag::Timestamp,
		Tag::Reference,
		Tag::Bytes,
		Tag::Null,
		Tag::GeoPoint,
		Tag::Map,
		Tag::Array,
	];

	/// Wire key for this tag, empty for raw members.
	pub fn as_str(self) -> &'static str {
		match self {
			Tag::String => "stringValue",
			Tag::Boolean => "booleanValue",
			Tag::Integer => "integerValue",
			Tag::Double => "doubleValue",
			Tag::Timestamp => "timestampValue",
			Tag::Reference => "referenceValue",
			Tag::Bytes => "bytesValue",
			Tag::Null => "nullValue",
			Tag::GeoPoint => "geoPointValue",
			Tag::Map => "mapValue",
			Tag::Array => "arrayValue",
			Tag::Raw => "",
		}
	}

	/// Look up a tag by wire key.
	pub fn from_key(key: &str) -> Option<Tag> {
		Tag::WRAPPED.into_iter().find(|tag| tag.as_str() == key)
	}

	/// Wire structure of the payload the converter recurses into, if any.
	pub fn container_shape(self) -> Option<WireShape> {
		match self {
			Tag::Map | Tag::GeoPoint => Some(WireShape::Map),
			Tag::Array => Some(WireShape::Array),
			_ => None,
		}
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Tag::Raw => f.write_str("raw value"),
			tag => f.write_str(tag.as_str()),
		}
	}
}

/// Structural kind of a wire node handed to the field enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireShape {
	/// JSON object of named members.
	Map,
	/// JSON array of elements.
	Array,
}

impl fmt::Display for WireShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			WireShape::Map => "map",
			WireShape::Array => "array",
		})
	}
}

/// Unwrap failure, reported by the engine as a malformed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UnwrapError {
	KeyCount(usize),
	UnknownTag(String),
}

impl fmt::Display for UnwrapError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UnwrapError::KeyCount(count) => write!(f, "expected a single union tag key, found {count} keys"),
			UnwrapError::UnknownTag(key) => write!(f, "unknown union tag {key:?}"),
		}
	}
}

/// Strip the single-key tag wrapper from a wire node.
///
/// Non-object nodes are raw geo-point members and come back with [`Tag::Raw`].
pub(crate) fn unwrap_tagged(node: &JsonValue) -> Result<(Tag, &JsonValue), UnwrapError> {
	let JsonValue::Object(wrapper) = node else {
		return Ok((Tag::Raw, node));
	};

	let mut entries = wrapper.iter();
	let (Some((key, inner)), None) = (entries.next(), entries.next()) else {
		return Err(UnwrapError::KeyCount(wrapper.len()));
	};
	let tag = Tag::from_key(key).ok_or_else(|| UnwrapError::UnknownTag(key.clone()))?;
	Ok((tag, inner))
}

/// Locate the child node a container tag recurses into.
///
/// Firestore omits `fields`/`values` for empty containers; those resolve to `None`.
pub(crate) fn container_payload(tag: Tag, inner: &JsonValue) -> Option<&JsonValue> {
	match tag {
		Tag::Map => inner.get("fields").filter(|node| !node.is_null()),
		Tag::Array => inner.get("values").filter(|node| !node.is_null()),
		Tag::GeoPoint => Some(inner),
		_ => None,
	}
}

/// Short JSON type label used in payload errors.
pub(crate) fn json_type(node: &JsonValue) -> &'static str {
	match node {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "boolean",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}
