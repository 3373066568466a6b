use std::borrow::Cow;
use std::num::IntErrorKind;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::firestore::decode::Decoder;
use crate::firestore::target::{DecodeTarget, WireNode};
use crate::firestore::wire::{container_payload, json_type};
use crate::firestore::{ConversionError, DecodeError, Kind, Scalar, Slot, Tag, WireShape};

/// Marker separating the project/database prefix from the document path.
pub const DOCUMENTS_MARKER: &str = "/databases/(default)/documents";

/// Write one checked target into its resolved slot, recursing for containers.
pub(crate) fn convert(decoder: &Decoder<'_>, target: &DecodeTarget<'_>, slot: &mut dyn Slot, depth: u32) -> Result<(), DecodeError> {
	if let Some(shape) = target.tag.container_shape() {
		let empty;
		let payload = match container_payload(target.tag, target.wire) {
			Some(payload) => payload,
			None => {
				empty = empty_payload(shape);
				&empty
			}
		};
		let node = WireNode::from_json(payload, shape).ok_or_else(|| DecodeError::Malformed {
			path: target.path.clone(),
			reason: format!("{} payload must hold a JSON {}, got {}", target.tag, json_shape(shape), json_type(payload)),
		})?;
		return decoder.walk(node, slot, &target.path, depth + 1);
	}

	if target.tag == Tag::Null {
		slot.reset();
		return Ok(());
	}

	let conversion = |source| DecodeError::Conversion {
		path: target.path.clone(),
		source,
	};
	match scalar(target.tag, target.wire, target.kind).map_err(conversion)? {
		Some(value) => slot.write(value).map_err(conversion),
		None => {
			slot.reset();
			Ok(())
		}
	}
}

fn empty_payload(shape: WireShape) -> JsonValue {
	match shape {
		WireShape::Map => JsonValue::Object(serde_json::Map::new()),
		WireShape::Array => JsonValue::Array(Vec::new()),
	}
}

fn json_shape(shape: WireShape) -> &'static str {
	match shape {
		WireShape::Map => "object",
		WireShape::Array => "array",
	}
}

/// Convert a scalar payload for a destination of `kind`.
///
/// `None` means the payload is a raw JSON null and the slot should be reset.
fn scalar(tag: Tag, inner: &JsonValue, kind: Kind) -> Result<Option<Scalar>, ConversionError> {
	let value = match tag {
		Tag::String => Scalar::String(text(tag, inner)?.to_owned()),
		Tag::Reference => Scalar::String(reference_path(text(tag, inner)?)?.to_owned()),
		Tag::Boolean => Scalar::Bool(inner.as_bool().ok_or_else(|| payload_error(tag, "a boolean", inner))?),
		Tag::Integer => parse_integer(&integer_text(inner)?, kind)?,
		Tag::Double => Scalar::Float(double_value(inner)?),
		Tag::Timestamp => Scalar::Timestamp(parse_timestamp(text(tag, inner)?)?),
		Tag::Bytes => Scalar::Bytes(decode_bytes(text(tag, inner)?)?),
		Tag::Raw => return raw_scalar(inner, kind),
		Tag::Null | Tag::Map | Tag::Array | Tag::GeoPoint => {
			return Err(ConversionError::Unsupported { value: "container", kind });
		}
	};
	Ok(Some(value))
}

fn text(tag: Tag, inner: &JsonValue) -> Result<&str, ConversionError> {
	inner.as_str().ok_or_else(|| payload_error(tag, "a string", inner))
}

fn payload_error(tag: Tag, expected: &'static str, inner: &JsonValue) -> ConversionError {
	ConversionError::Payload {
		tag,
		expected,
		got: json_type(inner),
	}
}

fn integer_text(inner: &JsonValue) -> Result<Cow<'_, str>, ConversionError> {
	match inner {
		JsonValue::String(text) => Ok(Cow::Borrowed(text)),
		JsonValue::Number(number) => Ok(Cow::Owned(number.to_string())),
		other => Err(payload_error(Tag::Integer, "decimal text", other)),
	}
}

fn raw_scalar(inner: &JsonValue, kind: Kind) -> Result<Option<Scalar>, ConversionError> {
	let value = match inner {
		JsonValue::Null => return Ok(None),
		JsonValue::Bool(v) => Scalar::Bool(*v),
		JsonValue::String(v) => Scalar::String(v.clone()),
		JsonValue::Number(number) => match kind {
			Kind::Int { .. } | Kind::Uint { .. } => parse_integer(&integral_text(number)?, kind)?,
			_ => Scalar::Float(number.as_f64().ok_or_else(|| payload_error(Tag::Raw, "a finite number", inner))?),
		},
		other => return Err(payload_error(Tag::Raw, "a scalar", other)),
	};
	Ok(Some(value))
}

/// Integer text for a raw number; whole floats such as `52.0` are accepted.
fn integral_text(number: &serde_json::Number) -> Result<String, ConversionError> {
	if number.is_i64() || number.is_u64() {
		return Ok(number.to_string());
	}
	match number.as_f64() {
		Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(format!("{value:.0}")),
		_ => Err(ConversionError::InvalidInteger { text: number.to_string() }),
	}
}

/// Strip a full resource name down to the path below the database root.
///
/// `projects/p/databases/(default)/documents/users/alice` becomes `/users/alice`.
pub fn reference_path(raw: &str) -> Result<&str, ConversionError> {
	raw.split(DOCUMENTS_MARKER)
		.nth(1)
		.ok_or_else(|| ConversionError::Reference { path: raw.to_owned() })
}

/// Parse RFC 3339 text with optional fractional seconds.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, ConversionError> {
	OffsetDateTime::parse(text, &Rfc3339).map_err(|source| ConversionError::Timestamp {
		text: text.to_owned(),
		source,
	})
}

/// Decode standard base64 text.
pub fn decode_bytes(text: &str) -> Result<Vec<u8>, ConversionError> {
	Ok(BASE64.decode(text)?)
}

/// Parse integer text for a destination of `kind`, honoring its bit width.
///
/// Dynamic destinations receive a signed 64-bit value.
pub fn parse_integer(text: &str, kind: Kind) -> Result<Scalar, ConversionError> {
	match kind {
		Kind::Dynamic => parse_signed(text, 64, kind).map(Scalar::Int),
		Kind::Int { bits } => parse_signed(text, bits, kind).map(Scalar::Int),
		Kind::Uint { bits } => parse_unsigned(text, bits, kind).map(Scalar::Uint),
		Kind::Float { bits } => parse_float(text, bits, kind).map(Scalar::Float),
		other => Err(ConversionError::Unsupported {
			value: "integer",
			kind: other,
		}),
	}
}

fn parse_signed(text: &str, bits: u32, kind: Kind) -> Result<i64, ConversionError> {
	let value = text.parse::<i64>().map_err(|err| int_error(text, kind, err.kind()))?;
	if bits < 64 {
		let max = (1_i64 << (bits - 1)) - 1;
		let min = -max - 1;
		if value < min || value > max {
			return Err(out_of_range(text, kind));
		}
	}
	Ok(value)
}

fn parse_unsigned(text: &str, bits: u32, kind: Kind) -> Result<u64, ConversionError> {
	let value = text.parse::<u64>().map_err(|err| int_error(text, kind, err.kind()))?;
	if bits < 64 && value > (1_u64 << bits) - 1 {
		return Err(out_of_range(text, kind));
	}
	Ok(value)
}

fn parse_float(text: &str, bits: u32, kind: Kind) -> Result<f64, ConversionError> {
	let invalid = || ConversionError::InvalidInteger { text: text.to_owned() };
	let value = if bits == 32 {
		f64::from(text.parse::<f32>().map_err(|_| invalid())?)
	} else {
		text.parse::<f64>().map_err(|_| invalid())?
	};
	if !value.is_finite() {
		return Err(out_of_range(text, kind));
	}
	Ok(value)
}

fn int_error(text: &str, kind: Kind, err: &IntErrorKind) -> ConversionError {
	match err {
		IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(text, kind),
		// "-1" into an unsigned destination parses as InvalidDigit
		IntErrorKind::InvalidDigit if matches!(kind, Kind::Uint { .. }) && text.starts_with('-') && text[1..].parse::<u64>().is_ok() => {
			out_of_range(text, kind)
		}
		_ => ConversionError::InvalidInteger { text: text.to_owned() },
	}
}

fn out_of_range(text: &str, kind: Kind) -> ConversionError {
	ConversionError::OutOfRange {
		text: text.to_owned(),
		kind,
	}
}

/// Read a `doubleValue` payload; the special values arrive as text.
fn double_value(inner: &JsonValue) -> Result<f64, ConversionError> {
	match inner {
		JsonValue::Number(number) => number.as_f64().ok_or_else(|| payload_error(Tag::Double, "a number", inner)),
		JsonValue::String(text) => match text.as_str() {
			"NaN" => Ok(f64::NAN),
			"Infinity" => Ok(f64::INFINITY),
			"-Infinity" => Ok(f64::NEG_INFINITY),
			_ => Err(payload_error(Tag::Double, "a number", inner)),
		},
		other => Err(payload_error(Tag::Double, "a number", other)),
	}
}
