//! Compression helpers for the payload region.
//!
//! GEX and DAT containers store each payload slot as one independent zlib
//! stream, prefixed by its packed byte length. The helpers here handle a
//! single stream; framing (the length prefix, skip handling) lives in
//! [`crate::payload`].
//!
//! ## Submodules
//!
//! | Module | Algorithm | Typical use in gexkit |
//! |--------|-----------|-----------------------|
//! | [`zlib`] | DEFLATE with zlib header | GEX/DAT payload blocks |

pub mod zlib;
