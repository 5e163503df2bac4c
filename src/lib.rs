//! A general-purpose file (de)compression library and CLI: the historical
//! `compress(1)`/`.Z` LZW format, plus gzip and xz via pluggable codec
//! adapters behind one algorithm registry.

pub mod algorithm;
pub mod cli;
pub mod codecs;
pub mod config;
pub mod error;
pub mod file_info;
pub mod lzw;
pub mod pipeline;
pub mod util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
