use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use time::OffsetDateTime;

use crate::firestore::convert::reference_path;
use crate::firestore::{Decode, DecodeError, DecodeOptions, Result, decode_fields};

/// Payload of a Firestore document trigger.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
	/// Document before the change; empty for create events.
	#[serde(default)]
	pub old_value: Value,
	/// Document after the change; empty for delete events.
	#[serde(default)]
	pub value: Value,
	/// Field paths touched by an update.
	#[serde(default)]
	pub update_mask: UpdateMask,
}

impl Event {
	/// Parse an event envelope from JSON bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(bytes)?)
	}

	/// Read and parse an event envelope from a JSON file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Self::from_slice(&bytes)
	}

	/// Whether `field_path` is listed in the update mask.
	pub fn updated(&self, field_path: &str) -> bool {
		self.update_mask.field_paths.iter().any(|path| path == field_path)
	}
}

/// Update mask of an update event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMask {
	/// Dotted paths of the changed fields.
	#[serde(default)]
	pub field_paths: Vec<String>,
}

/// One Firestore document snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
	/// Document creation time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub create_time: Option<OffsetDateTime>,
	/// Tagged field data; the decode traversal root.
	#[serde(default)]
	pub fields: Map<String, JsonValue>,
	/// Full document resource name.
	#[serde(default)]
	pub name: String,
	/// Last update time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub update_time: Option<OffsetDateTime>,
}

impl Value {
	/// Decode the document fields into `dest` with default limits.
	pub fn decode<T: Decode>(&self, dest: &mut T) -> std::result::Result<(), DecodeError> {
		decode_fields(&self.fields, dest, &DecodeOptions::default())
	}

	/// Decode the document fields into `dest` with explicit limits.
	pub fn decode_with<T: Decode>(&self, dest: &mut T, options: &DecodeOptions) -> std::result::Result<(), DecodeError> {
		decode_fields(&self.fields, dest, options)
	}

	/// Whether this side of the event carries no document.
	pub fn is_empty(&self) -> bool {
		self.name.is_empty() && self.fields.is_empty()
	}

	/// Document path below the database root, e.g. `/users/alice`.
	pub fn document_path(&self) -> Option<&str> {
		reference_path(&self.name).ok()
	}

	/// Last segment of the document path.
	pub fn document_id(&self) -> Option<&str> {
		self.document_path()?.rsplit('/').next().filter(|id| !id.is_empty())
	}
}

/// Convenience destination for `geoPointValue` fields.
///
/// Any structure with `latitude`/`longitude` fields (declared or aliased) works as well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
	/// Degrees north.
	pub latitude: f64,
	/// Degrees east.
	pub longitude: f64,
}

crate::decode_struct!(GeoPoint { latitude, longitude });
