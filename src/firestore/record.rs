use crate::firestore::Slot;

/// One declared structure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
	/// Declared Rust field name, also used in error paths.
	pub name: &'static str,
	/// Explicit wire key overriding the declared name.
	pub alias: Option<&'static str>,
}

impl FieldSpec {
	/// Create a field entry.
	pub const fn new(name: &'static str, alias: Option<&'static str>) -> Self {
		Self { name, alias }
	}

	/// Wire key this field reads: the alias if present, else the declared name verbatim.
	pub fn key(&self) -> &'static str {
		self.alias.unwrap_or(self.name)
	}
}

/// Structure destination with a static field table.
///
/// Usually generated with [`decode_struct!`](crate::decode_struct).
pub trait Record {
	/// Declared type name.
	fn type_name(&self) -> &'static str;
	/// Fields in declaration order.
	fn fields(&self) -> &'static [FieldSpec];
	/// Shared access to a field by declared name.
	fn field(&self, name: &str) -> Option<&dyn Slot>;
	/// Mutable access to a field by declared name.
	fn field_mut(&mut self, name: &str) -> Option<&mut dyn Slot>;
}

/// Generate the field table and decode glue for a structure.
///
/// Every listed field must implement [`Decode`](crate::firestore::Decode) and the
/// structure must implement `Default`. A field reads the wire key given after
/// `as`, or its declared name when no alias is given. Unlisted fields are never
/// touched by decoding.
///
/// ```
/// #[derive(Debug, Default)]
/// struct Profile {
/// 	name: String,
/// 	age: Option<u32>,
/// }
///
/// fcf::decode_struct!(Profile { name as "displayName", age });
/// ```
#[macro_export]
macro_rules! decode_struct {
	($ty:ident { $($field:ident $(as $alias:literal)?),* $(,)? }) => {
		impl $crate::firestore::Record for $ty {
			fn type_name(&self) -> &'static str {
				stringify!($ty)
			}

			fn fields(&self) -> &'static [$crate::firestore::FieldSpec] {
				const FIELDS: &[$crate::firestore::FieldSpec] = &[
					$($crate::firestore::FieldSpec::new(stringify!($field), $crate::__fcf_alias!($($alias)?))),*
				];
				FIELDS
			}

			#[allow(unused_variables)]
			fn field(&self, name: &str) -> Option<&dyn $crate::firestore::Slot> {
				$(
					if name == stringify!($field) {
						return Some(&self.$field);
					}
				)*
				None
			}

			#[allow(unused_variables)]
			fn field_mut(&mut self, name: &str) -> Option<&mut dyn $crate::firestore::Slot> {
				$(
					if name == stringify!($field) {
						return Some(&mut self.$field);
					}
				)*
				None
			}
		}

		impl $crate::firestore::Decode for $ty {
			const KIND: $crate::firestore::Kind = $crate::firestore::Kind::Struct(stringify!($ty));

			fn zero() -> Self {
				::core::default::Default::default()
			}

			fn open_container(&mut self, shape: $crate::firestore::WireShape) -> Option<$crate::firestore::Container<'_>> {
				match shape {
					$crate::firestore::WireShape::Map => Some($crate::firestore::Container::Record(self)),
					$crate::firestore::WireShape::Array => None,
				}
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __fcf_alias {
	() => {
		None
	};
	($alias:literal) => {
		Some($alias)
	};
}
