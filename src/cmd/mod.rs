/// Decode a document into a dynamic tree and print it.
pub mod decode;
/// Envelope summary command.
pub mod info;
