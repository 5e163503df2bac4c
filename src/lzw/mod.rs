//! The LZW `.Z` codec: bit I/O, dictionaries, and the
//! streaming compressor/decompressor built on top of them.

pub mod bitio;
pub mod codec;
pub mod dict;

pub use codec::{compress, compression_ratio, decompress, probe, CodecStats};
