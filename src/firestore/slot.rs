use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use time::OffsetDateTime;

use crate::firestore::{ConversionError, Kind, Record, WireShape};

/// One converted wire scalar, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Boolean value.
	Bool(bool),
	/// Signed integer already range-checked for the destination.
	Int(i64),
	/// Unsigned integer already range-checked for the destination.
	Uint(u64),
	/// Floating point value.
	Float(f64),
	/// UTF-8 text.
	String(String),
	/// Decoded byte payload.
	Bytes(Vec<u8>),
	/// Parsed timestamp.
	Timestamp(OffsetDateTime),
}

impl Scalar {
	/// Short label for error messages.
	pub fn label(&self) -> &'static str {
		match self {
			Scalar::Bool(_) => "bool",
			Scalar::Int(_) => "signed integer",
			Scalar::Uint(_) => "unsigned integer",
			Scalar::Float(_) => "float",
			Scalar::String(_) => "string",
			Scalar::Bytes(_) => "bytes",
			Scalar::Timestamp(_) => "timestamp",
		}
	}

	/// Error for a destination that cannot store this scalar.
	pub fn unsupported(&self, kind: Kind) -> ConversionError {
		ConversionError::Unsupported { value: self.label(), kind }
	}
}

/// Statically typed decode destination.
///
/// Implemented for primitives, `String`, `OffsetDateTime`, `Option`, `Box`,
/// `Vec`, string-keyed maps, [`Dynamic`](crate::firestore::Dynamic), and any
/// structure declared through [`decode_struct!`](crate::decode_struct).
pub trait Decode: Sized {
	/// Resolved destination kind.
	const KIND: Kind;
	/// Whether the type is a byte, making `Vec<Self>` a byte sequence.
	const BYTE: bool = false;

	/// Zero value written for `nullValue` and used for fresh container slots.
	fn zero() -> Self;

	/// Store one converted scalar.
	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		Err(value.unsupported(Self::KIND))
	}

	/// Resolve (allocating if needed) the container a map or array recurses into.
	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		let _ = shape;
		None
	}

	/// Build one element from a decoded byte. Only called when `BYTE` is set.
	fn from_byte(byte: u8) -> Option<Self> {
		let _ = byte;
		None
	}
}

/// Object-safe write target the engine resolves every decode target to.
pub trait Slot {
	/// Resolved destination kind.
	fn kind(&self) -> Kind;
	/// Reset to the zero value.
	fn reset(&mut self);
	/// Commit a converted scalar.
	fn write(&mut self, value: Scalar) -> Result<(), ConversionError>;
	/// Resolve or allocate the container for a map or array payload.
	fn open(&mut self, shape: WireShape) -> Option<Container<'_>>;
}

impl<T: Decode> Slot for T {
	fn kind(&self) -> Kind {
		T::KIND
	}

	fn reset(&mut self) {
		*self = T::zero();
	}

	fn write(&mut self, value: Scalar) -> Result<(), ConversionError> {
		self.write_scalar(value)
	}

	fn open(&mut self, shape: WireShape) -> Option<Container<'_>> {
		self.open_container(shape)
	}
}

/// Container view handed to the field enumerator.
pub enum Container<'a> {
	/// Structure with a fixed field table.
	Record(&'a mut dyn Record),
	/// String-keyed mapping.
	Entries(&'a mut dyn Entries),
	/// Positional sequence.
	Items(&'a mut dyn Items),
}

/// Mapping destination keyed by wire map keys.
pub trait Entries {
	/// Kind shared by every entry.
	fn element_kind(&self) -> Kind;
	/// Reserve room for `additional` entries.
	fn reserve_entries(&mut self, additional: usize);
	/// Insert a fresh zero entry under `key` and return it.
	fn entry_slot(&mut self, key: &str) -> &mut dyn Slot;
}

/// Sequence destination indexed by wire array position.
pub trait Items {
	/// Kind shared by every element.
	fn element_kind(&self) -> Kind;
	/// Replace contents with `len` zero elements.
	fn reset_len(&mut self, len: usize);
	/// Element at `index`, if in bounds.
	fn item_slot(&mut self, index: usize) -> Option<&mut dyn Slot>;
}

macro_rules! signed_decode {
	($($ty:ty),* $(,)?) => {$(
		impl Decode for $ty {
			const KIND: Kind = Kind::Int { bits: <$ty>::BITS };

			fn zero() -> Self {
				0
			}

			fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
				*self = match value {
					Scalar::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
					Scalar::Uint(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
					other => return Err(other.unsupported(Self::KIND)),
				};
				Ok(())
			}
		}
	)*};
}

macro_rules! unsigned_decode {
	($($ty:ty),* $(,)?) => {$(
		impl Decode for $ty {
			const KIND: Kind = Kind::Uint { bits: <$ty>::BITS };

			fn zero() -> Self {
				0
			}

			fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
				*self = match value {
					Scalar::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
					Scalar::Uint(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
					other => return Err(other.unsupported(Self::KIND)),
				};
				Ok(())
			}
		}
	)*};
}

signed_decode!(i8, i16, i32, i64, isize);
unsigned_decode!(u16, u32, u64, usize);

impl Decode for u8 {
	const KIND: Kind = Kind::Uint { bits: 8 };
	const BYTE: bool = true;

	fn zero() -> Self {
		0
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		*self = match value {
			Scalar::Int(v) => u8::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
			Scalar::Uint(v) => u8::try_from(v).map_err(|_| out_of_range(v, Self::KIND))?,
			other => return Err(other.unsupported(Self::KIND)),
		};
		Ok(())
	}

	fn from_byte(byte: u8) -> Option<Self> {
		Some(byte)
	}
}

fn out_of_range(value: impl ToString, kind: Kind) -> ConversionError {
	ConversionError::OutOfRange {
		text: value.to_string(),
		kind,
	}
}

impl Decode for f32 {
	const KIND: Kind = Kind::Float { bits: 32 };

	fn zero() -> Self {
		0.0
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		*self = match value {
			Scalar::Float(v) => v as f32,
			Scalar::Int(v) => v as f32,
			Scalar::Uint(v) => v as f32,
			other => return Err(other.unsupported(Self::KIND)),
		};
		Ok(())
	}
}

impl Decode for f64 {
	const KIND: Kind = Kind::Float { bits: 64 };

	fn zero() -> Self {
		0.0
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		*self = match value {
			Scalar::Float(v) => v,
			Scalar::Int(v) => v as f64,
			Scalar::Uint(v) => v as f64,
			other => return Err(other.unsupported(Self::KIND)),
		};
		Ok(())
	}
}

impl Decode for bool {
	const KIND: Kind = Kind::Bool;

	fn zero() -> Self {
		false
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		match value {
			Scalar::Bool(v) => {
				*self = v;
				Ok(())
			}
			other => Err(other.unsupported(Self::KIND)),
		}
	}
}

impl Decode for String {
	const KIND: Kind = Kind::String;

	fn zero() -> Self {
		String::new()
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		match value {
			Scalar::String(v) => {
				*self = v;
				Ok(())
			}
			other => Err(other.unsupported(Self::KIND)),
		}
	}
}

impl Decode for OffsetDateTime {
	const KIND: Kind = Kind::Timestamp;

	fn zero() -> Self {
		OffsetDateTime::UNIX_EPOCH
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		match value {
			Scalar::Timestamp(v) => {
				*self = v;
				Ok(())
			}
			other => Err(other.unsupported(Self::KIND)),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	const KIND: Kind = T::KIND;

	fn zero() -> Self {
		None
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		let mut inner = T::zero();
		inner.write_scalar(value)?;
		*self = Some(inner);
		Ok(())
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		self.get_or_insert_with(T::zero).open_container(shape)
	}
}

impl<T: Decode> Decode for Box<T> {
	const KIND: Kind = T::KIND;

	fn zero() -> Self {
		Box::new(T::zero())
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		(**self).write_scalar(value)
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		(**self).open_container(shape)
	}
}

impl<T: Decode> Decode for Vec<T> {
	const KIND: Kind = Kind::Seq { bytes: T::BYTE };

	fn zero() -> Self {
		Vec::new()
	}

	fn write_scalar(&mut self, value: Scalar) -> Result<(), ConversionError> {
		match value {
			Scalar::Bytes(bytes) if T::BYTE => {
				*self = bytes
					.into_iter()
					.map(T::from_byte)
					.collect::<Option<Vec<T>>>()
					.ok_or(ConversionError::Unsupported {
						value: "bytes",
						kind: Self::KIND,
					})?;
				Ok(())
			}
			other => Err(other.unsupported(Self::KIND)),
		}
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		match shape {
			WireShape::Array => Some(Container::Items(self)),
			WireShape::Map => None,
		}
	}
}

impl<T: Decode> Items for Vec<T> {
	fn element_kind(&self) -> Kind {
		T::KIND
	}

	fn reset_len(&mut self, len: usize) {
		self.clear();
		self.resize_with(len, T::zero);
	}

	fn item_slot(&mut self, index: usize) -> Option<&mut dyn Slot> {
		self.get_mut(index).map(|item| item as &mut dyn Slot)
	}
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
	const KIND: Kind = Kind::Map;

	fn zero() -> Self {
		HashMap::default()
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		match shape {
			WireShape::Map => Some(Container::Entries(self)),
			WireShape::Array => None,
		}
	}
}

impl<T: Decode, S: BuildHasher> Entries for HashMap<String, T, S> {
	fn element_kind(&self) -> Kind {
		T::KIND
	}

	fn reserve_entries(&mut self, additional: usize) {
		self.reserve(additional);
	}

	fn entry_slot(&mut self, key: &str) -> &mut dyn Slot {
		let slot = self.entry(key.to_owned()).or_insert_with(T::zero);
		*slot = T::zero();
		slot
	}
}

impl<T: Decode> Decode for BTreeMap<String, T> {
	const KIND: Kind = Kind::Map;

	fn zero() -> Self {
		BTreeMap::new()
	}

	fn open_container(&mut self, shape: WireShape) -> Option<Container<'_>> {
		match shape {
			WireShape::Map => Some(Container::Entries(self)),
			WireShape::Array => None,
		}
	}
}

impl<T: Decode> Entries for BTreeMap<String, T> {
	fn element_kind(&self) -> Kind {
		T::KIND
	}

	fn reserve_entries(&mut self, _additional: usize) {}

	fn entry_slot(&mut self, key: &str) -> &mut dyn Slot {
		let slot = self.entry(key.to_owned()).or_insert_with(T::zero);
		*slot = T::zero();
		slot
	}
}
