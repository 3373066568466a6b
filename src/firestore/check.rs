use crate::firestore::{DecodeError, Kind, Tag};

/// Decide whether a wire tag may be decoded into a destination kind.
pub fn is_compatible(kind: Kind, tag: Tag) -> bool {
	match kind {
		Kind::Dynamic => return true,
		Kind::Interface(_) => return false,
		_ => {}
	}

	match tag {
		Tag::Null | Tag::Raw => true,
		Tag::Integer => kind.is_numeric(),
		Tag::Double => matches!(kind, Kind::Float { .. }),
		Tag::Timestamp => kind == Kind::Timestamp,
		Tag::String | Tag::Reference => kind == Kind::String,
		Tag::Map => matches!(kind, Kind::Struct(_) | Kind::Map),
		Tag::Array => matches!(kind, Kind::Seq { .. }),
		Tag::Bytes => kind == Kind::Seq { bytes: true },
		Tag::Boolean => kind == Kind::Bool,
		Tag::GeoPoint => matches!(kind, Kind::Struct(_)),
	}
}

/// Gate one decode target before any conversion is attempted.
pub(crate) fn check(path: &str, kind: Kind, tag: Tag) -> Result<(), DecodeError> {
	if is_compatible(kind, tag) {
		return Ok(());
	}
	Err(DecodeError::TypeMismatch {
		path: path.to_owned(),
		tag,
		kind,
	})
}
