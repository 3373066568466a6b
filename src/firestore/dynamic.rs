use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::firestore::{ConversionError, Container, Decode, Kind, Scalar, WireShape};

/// Open destination whose representation is chosen from the wire tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dynamic {
	/// `nullValue`, or nothing decoded yet.
	#[default]
	Null,
	/// `booleanValue`
	Bool(bool),
	/// `integerValue`, always signed 64-bit.
	Int(i64),
	/// `doubleValue`, and raw geo-point members.
	Float(f64),
	/// `stringValue`, or a stripped `referenceValue`.
	String(String),
	/// `bytesValue`
	Bytes(Vec<u8>),
	/// `timestampValue`
	Timestamp(OffsetDateTime),
	/// `arrayValue`
	Array(Vec<Dynamic>),
	/// `mapValue`, or `geoPointValue` with `latitude`/`longitude` keys.
	Map(BTreeMap<String, Dynamic>),
}

impl Dynamic {
	/// Whether the value is null.
	pub fn is_null(&self) -> bool {
		matches!(self, Dynamic::Null)
	}

	/// Borrow as text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Dynamic::String(v) => Some(v),
			_ => None,
		}
	}

	/// Copy out a boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Dynamic::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Copy out an integer.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Dynamic::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Copy out a number, widening integers.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Dynamic::Float(v) => Some(*v),
			Dynamic::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Borrow a byte payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Dynamic::Bytes(v) => Some(v),
			_ => None,
		}
	}

	/// Copy out a timestamp.
	pub fn as_timestamp(&self) -> Option<OffsetDateTime> {
		match self {
			Dynamic::Timestamp(v) => Some(*v),
			_ => None,
		}
	}

	/// Borrow array elements.
	pub fn as_array(&self) -> Option<&[Dynamic]> {
		match self {
			Dynamic::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow map entries.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Dynamic>> {
		match self {
			Dynamic::Map(entries) => Some(entries),
			_ => None,
		}
	}

	/// Look up a map entry.
	pub fn get(&self, key: &str) -> Option<&Dynamic> {
		self.as_map().and_then(|entries| entries.get(key))
	}

	/// Variant label.
	pub fn type_label(&self) -> &'static str {
		match self {
			Dynamic::Null => "null",
			Dynamic::Bool(_) => "bool",
			Dynamic::Int(_) => "int",
			Dynamic::Float(_) => "float",
			Dynamic::String(_) => "string",
			Dynamic::Bytes(_) => "bytes",
			Dynamic::Timestamp(_) => "timestamp",
			Dynamic::Array(_) => "array",
			Dynamic::Map(_) => "map",
		}
	}
}

impl Decode for Dynamic {
	const KIND: Kind = Kind::Dynamic;

	fn zero() -> Self {
		Dynamic::Null
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		*self = match value {
			Scalar::Bool(v) => Dynamic::Bool(v),
			Scalar::Int(v) => Dynamic::Int(v),
			Scalar::Uint(v) => Dynamic::Int(i64::try_from(v).map_err(|_| ConversionError::OutOfRange {
				text: v.to_string(),
				kind: Kind::Dynamic,
			})?),
			Scalar::Float(v) => Dynamic::Float(v),
			Scalar::String(v) => Dynamic::String(v),
			Scalar::Bytes(v) => Dynamic::Bytes(v),
			Scalar::Timestamp(v) => Dynamic::Timestamp(v),
		};
		Ok(())
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		match shape {
			WireShape::Map => {
				*self = Dynamic::Map(BTreeMap::new());
				match self {
					Dynamic::Map(entries) => Some(Container::Entries(entries)),
					_ => None,
				}
			}
			WireShape::Array => {
				*self = Dynamic::Array(Vec::new());
				match self {
					Dynamic::Array(items) => Some(Container::Items(items)),
					_ => None,
				}
			}
		}
	}
}

impl From<&str> for Dynamic {
	fn from(value: &str) -> Self {
		Dynamic::String(value.to_owned())
	}
}

impl From<String> for Dynamic {
	fn from(value: String) -> Self {
		Dynamic::String(value)
	}
}

impl From<bool> for Dynamic {
	fn from(value: bool) -> Self {
		Dynamic::Bool(value)
	}
}

impl From<i64> for Dynamic {
	fn from(value: i64) -> Self {
		Dynamic::Int(value)
	}
}

impl From<f64> for Dynamic {
	fn from(value: f64) -> Self {
		Dynamic::Float(value)
	}
}
