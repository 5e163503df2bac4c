//! Codec adapters, each exposing [`crate::algorithm::CompressFn`] /
//! [`DecompressFn`] / [`ProbeFn`]-shaped entry points so the registry in
//! [`crate::algorithm`] can treat LZW, gzip, and xz uniformly.

pub mod deflate;
pub mod lzw_adapter;
pub mod xz;
