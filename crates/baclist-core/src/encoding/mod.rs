/// Encode/decode functions for primitive contents and context-tagged fields.
pub mod primitives;
/// Zero-copy byte reader used as the decode cursor.
pub mod reader;
/// BACnet tag system (application, context, opening/closing).
pub mod tag;
/// Byte writer for encoding into a caller-owned or growable buffer.
pub mod writer;
