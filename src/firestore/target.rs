use serde_json::{Map, Value as JsonValue};

use crate::firestore::wire::unwrap_tagged;
use crate::firestore::{Container, DecodeError, DecodeOptions, Kind, Record, Slot, Tag, WireShape};

/// Wire node the enumerator walks: the children of one map or array.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WireNode<'w> {
	Map(&'w Map<String, JsonValue>),
	Array(&'w [JsonValue]),
}

impl<'w> WireNode<'w> {
	pub(crate) fn from_json(node: &'w JsonValue, shape: WireShape) -> Option<Self> {
		match (shape, node) {
			(WireShape::Map, JsonValue::Object(fields)) => Some(WireNode::Map(fields)),
			(WireShape::Array, JsonValue::Array(values)) => Some(WireNode::Array(values)),
			_ => None,
		}
	}

	pub(crate) fn shape(self) -> WireShape {
		match self {
			WireNode::Map(_) => WireShape::Map,
			WireNode::Array(_) => WireShape::Array,
		}
	}
}

/// Where inside the opened container a target writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Location {
	/// Structure field by declared name.
	Field(&'static str),
	/// Mapping entry by wire key.
	Entry(String),
	/// Sequence slot by position.
	Index(usize),
}

/// One (wire sub-value, destination location) pairing.
#[derive(Debug)]
pub(crate) struct DecodeTarget<'w> {
	pub path: String,
	pub tag: Tag,
	pub wire: &'w JsonValue,
	pub kind: Kind,
	pub location: Location,
}

/// Whether a destination kind can host a wire structure at all.
fn hosts(kind: Kind, shape: WireShape) -> bool {
	match shape {
		WireShape::Map => matches!(kind, Kind::Struct(_) | Kind::Map | Kind::Dynamic),
		WireShape::Array => matches!(kind, Kind::Seq { .. } | Kind::Dynamic),
	}
}

/// Open `dest` for `node` and list one target per wire child.
///
/// Structure fields come out in declaration order, mapping entries in wire
/// iteration order, sequence slots by index. Sequences are resized to the wire
/// length before any target is produced.
pub(crate) fn enumerate<'d, 'w>(
	node: WireNode<'w>,
	dest: &'d mut dyn Slot,
	path: &str,
	options: &DecodeOptions,
) -> Result<(Container<'d>, Vec<DecodeTarget<'w>>), DecodeError> {
	let dest_kind = dest.kind();
	let mismatch = || DecodeError::ShapeMismatch {
		path: path.to_owned(),
		wire: node.shape(),
		dest: dest_kind,
	};
	if !hosts(dest_kind, node.shape()) {
		return Err(mismatch());
	}
	if let WireNode::Array(values) = node {
		if values.len() > options.max_array_elems {
			return Err(DecodeError::ArrayTooLarge {
				path: path.to_owned(),
				count: values.len(),
				max: options.max_array_elems,
			});
		}
	}

	let mut container = dest.open(node.shape()).ok_or_else(mismatch)?;
	let targets = match (&mut container, node) {
		(Container::Record(record), WireNode::Map(fields)) => record_targets(fields, &**record, path)?,
		(Container::Entries(entries), WireNode::Map(fields)) => {
			entries.reserve_entries(fields.len());
			entry_targets(fields, entries.element_kind(), path)?
		}
		(Container::Items(items), WireNode::Array(values)) => {
			items.reset_len(values.len());
			array_targets(values, items.element_kind(), path)?
		}
		_ => return Err(mismatch()),
	};
	Ok((container, targets))
}

fn record_targets<'w>(fields: &'w Map<String, JsonValue>, record: &dyn Record, path: &str) -> Result<Vec<DecodeTarget<'w>>, DecodeError> {
	let specs = record.fields();
	let mut targets = Vec::with_capacity(specs.len());
	for spec in specs {
		let Some(wrapped) = fields.get(spec.key()) else {
			continue;
		};
		let field_path = join_field(path, spec.name);
		let kind = record.field(spec.name).map(|slot| slot.kind()).ok_or_else(|| DecodeError::ShapeMismatch {
			path: field_path.clone(),
			wire: WireShape::Map,
			dest: Kind::Struct(record.type_name()),
		})?;
		let (tag, wire) = unwrap_tagged(wrapped).map_err(|err| DecodeError::Malformed {
			path: field_path.clone(),
			reason: err.to_string(),
		})?;
		targets.push(DecodeTarget {
			path: field_path,
			tag,
			wire,
			kind,
			location: Location::Field(spec.name),
		});
	}
	Ok(targets)
}

fn entry_targets<'w>(fields: &'w Map<String, JsonValue>, kind: Kind, path: &str) -> Result<Vec<DecodeTarget<'w>>, DecodeError> {
	let mut targets = Vec::with_capacity(fields.len());
	for (key, wrapped) in fields {
		let entry_path = format!("{path}[{key:?}]");
		let (tag, wire) = unwrap_tagged(wrapped).map_err(|err| DecodeError::Malformed {
			path: entry_path.clone(),
			reason: err.to_string(),
		})?;
		targets.push(DecodeTarget {
			path: entry_path,
			tag,
			wire,
			kind,
			location: Location::Entry(key.clone()),
		});
	}
	Ok(targets)
}

fn array_targets<'w>(values: &'w [JsonValue], kind: Kind, path: &str) -> Result<Vec<DecodeTarget<'w>>, DecodeError> {
	let mut targets = Vec::with_capacity(values.len());
	for (index, wrapped) in values.iter().enumerate() {
		let item_path = format!("{path}[{index}]");
		let (tag, wire) = unwrap_tagged(wrapped).map_err(|err| DecodeError::Malformed {
			path: item_path.clone(),
			reason: err.to_string(),
		})?;
		targets.push(DecodeTarget {
			path: item_path,
			tag,
			wire,
			kind,
			location: Location::Index(index),
		});
	}
	Ok(targets)
}

/// Resolve a target location to its slot, allocating mapping entries.
pub(crate) fn resolve<'c>(container: &'c mut Container<'_>, at: &Location) -> Option<&'c mut dyn Slot> {
	match (container, at) {
		(Container::Record(record), Location::Field(name)) => record.field_mut(name),
		(Container::Entries(entries), Location::Entry(key)) => Some(entries.entry_slot(key)),
		(Container::Items(items), Location::Index(index)) => items.item_slot(*index),
		_ => None,
	}
}

fn join_field(parent: &str, name: &str) -> String {
	if parent.is_empty() {
		name.to_owned()
	} else {
		format!("{parent}.{name}")
	}
}
