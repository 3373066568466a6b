mod check;
mod convert;
mod decode;
mod dynamic;
mod error;
mod event;
mod kind;
mod record;
mod slot;
mod target;
mod wire;

/// Type compatibility rules between wire tags and destination kinds.
pub use check::is_compatible;
/// Standalone scalar conversions used by the engine.
pub use convert::{DOCUMENTS_MARKER, decode_bytes, parse_integer, parse_timestamp, reference_path};
/// Decode entry point and limits.
pub use decode::{DecodeOptions, decode_fields};
/// Open destination value.
pub use dynamic::Dynamic;
/// Error and result aliases.
pub use error::{ConversionError, DecodeError, FcfError, Result};
/// Event envelope types.
pub use event::{Event, GeoPoint, UpdateMask, Value};
/// Resolved destination kinds.
pub use kind::Kind;
/// Structure field tables.
pub use record::{FieldSpec, Record};
/// Destination traits and container views.
pub use slot::{Container, Decode, Entries, Items, Scalar, Slot};
/// Wire union tags and node shapes.
pub use wire::{Tag, WireShape};
