//! **gexkit** - a reusable Rust library for reading and writing GameMaker
//! 8-era extension containers.
//!
//! # Supported formats
//! | Module | Format |
//! |--------|--------|
//! | [`formats::ged`] | GED / GMP - editable extension project (metadata only) |
//! | [`formats::gex`] | GEX - compiled extension package (metadata + payloads) |
//! | [`formats::dat`] | DAT - generic enciphered + compressed blob container |
//!
//! All three share one stack: the [`crypto::gmkrypt`] substitution
//! cipher, zlib-compressed payload blocks ([`compression::zlib`],
//! [`payload`]), and the revision-prefixed metadata tree ([`entry`]).
//! Payload bytes themselves are exchanged with the caller through the
//! [`payload::PayloadProvider`] / [`payload::PayloadConsumer`] traits;
//! the library never touches the filesystem on its own.

pub mod compression;
pub mod crypto;
pub mod entry;
pub mod error;
pub mod formats;
pub mod payload;
pub mod utils;

pub use error::{Error, Result};
