use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

use crate::firestore::check::check;
use crate::firestore::convert::convert;
use crate::firestore::target::{WireNode, enumerate, resolve};
use crate::firestore::{Decode, DecodeError, Slot};

/// Runtime limits for type-directed decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting depth below the document root.
	pub max_depth: u32,
	/// Maximum element count accepted for one wire array.
	pub max_array_elems: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_array_elems: 1 << 20,
		}
	}
}

impl DecodeOptions {
	/// Preset matching Firestore's own document limits.
	pub fn strict() -> Self {
		Self {
			max_depth: 20,
			max_array_elems: 20_000,
		}
	}
}

/// Decode a document `fields` map into `dest`.
///
/// Stops at the first failing target; fields written before the failure stay written.
pub fn decode_fields<T: Decode>(fields: &Map<String, JsonValue>, dest: &mut T, options: &DecodeOptions) -> Result<(), DecodeError> {
	debug!(fields = fields.len(), dest = %T::KIND, "decoding firestore fields");
	let decoder = Decoder { options };
	let result = decoder.walk(WireNode::Map(fields), dest, "", 0);
	match &result {
		Ok(()) => debug!(dest = %T::KIND, "firestore fields decoded"),
		Err(err) => debug!(path = err.path(), error = %err, "firestore decode failed"),
	}
	result
}

/// Stateless traversal driver; one per top-level call.
pub(crate) struct Decoder<'o> {
	options: &'o DecodeOptions,
}

impl Decoder<'_> {
	/// Enumerate, check, and convert every child of `node` into `dest`.
	pub(crate) fn walk(&self, node: WireNode<'_>, dest: &mut dyn Slot, path: &str, depth: u32) -> Result<(), DecodeError> {
		if depth > self.options.max_depth {
			return Err(DecodeError::DepthExceeded {
				path: path.to_owned(),
				max_depth: self.options.max_depth,
			});
		}

		let (mut container, targets) = enumerate(node, dest, path, self.options)?;
		for target in &targets {
			trace!(path = %target.path, tag = %target.tag, kind = %target.kind, "decode target");
			check(&target.path, target.kind, target.tag)?;
			let slot = resolve(&mut container, &target.location).ok_or_else(|| DecodeError::ShapeMismatch {
				path: target.path.clone(),
				wire: node.shape(),
				dest: target.kind,
			})?;
			convert(self, target, slot, depth)?;
		}
		Ok(())
	}
}
