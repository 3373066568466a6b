use std::fmt;

/// Resolved static kind of a decode destination.
///
/// Indirection through `Option` and `Box` is already stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// `bool`
	Bool,
	/// Signed integer of the given bit width.
	Int {
		/// Declared bit width.
		bits: u32,
	},
	/// Unsigned integer of the given bit width.
	Uint {
		/// Declared bit width.
		bits: u32,
	},
	/// Floating point of the given bit width.
	Float {
		/// Declared bit width (32 or 64).
		bits: u32,
	},
	/// Owned UTF-8 string.
	String,
	/// `time::OffsetDateTime`
	Timestamp,
	/// Structure with a generated field table.
	Struct(&'static str),
	/// String-keyed mapping.
	Map,
	/// Growable sequence.
	Seq {
		/// Element type is `u8`, so the sequence also accepts byte payloads.
		bytes: bool,
	},
	/// Open slot whose representation is picked from the wire tag.
	Dynamic,
	/// Constrained abstract contract; never decodable.
	Interface(&'static str),
}

impl Kind {
	/// Whether the kind is any integer or float.
	pub fn is_numeric(self) -> bool {
		matches!(self, Kind::Int { .. } | Kind::Uint { .. } | Kind::Float { .. })
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Kind::Bool => f.write_str("bool"),
			Kind::Int { bits } => write!(f, "int{bits}"),
			Kind::Uint { bits } => write!(f, "uint{bits}"),
			Kind::Float { bits } => write!(f, "float{bits}"),
			Kind::String => f.write_str("string"),
			Kind::Timestamp => f.write_str("timestamp"),
			Kind::Struct(name) => write!(f, "struct {name}"),
			Kind::Map => f.write_str("map"),
			Kind::Seq { bytes: true } => f.write_str("byte sequence"),
			Kind::Seq { bytes: false } => f.write_str("sequence"),
			Kind::Dynamic => f.write_str("dynamic"),
			Kind::Interface(name) => write!(f, "interface {name}"),
		}
	}
}
