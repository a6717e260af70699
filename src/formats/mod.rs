//! Codecs for the GameMaker extension container family.
//!
//! Each submodule targets one on-disk flavor. All codecs follow the same
//! conventions:
//!
//! * **Generic over** [`std::io::Read`] / [`std::io::Write`] (plus
//!   [`std::io::Seek`] where slots can be skipped) - pass a
//!   [`std::fs::File`], a [`std::io::Cursor`], or anything else that
//!   implements them.
//! * **Metadata in memory, payloads streamed** - the entry tree is built
//!   as owned values; payload bytes flow straight between the container
//!   and the caller's [`crate::payload`] callbacks, never held by the
//!   codec.
//! * **Byte-exact round trips** - reading a file and writing the result
//!   back (with the same optimize setting) reproduces it bit for bit.
//!
//! ## Format overview
//!
//! | Module  | Extension      | Description |
//! |---------|----------------|-------------|
//! | [`ged`] | `.ged`, `.gmp` | Editable extension project; bare metadata tree, no signature, no cipher, no payload |
//! | [`gex`] | `.gex`         | Compiled extension package; signed, enciphered, payload blocks appended |
//! | [`dat`] | `.dat`         | Generic blob container; key seed plus payload blocks, no metadata tree |
//!
//! GED and GMP carry no signature and are told apart from other files
//! only by suffix; a GEX opens with the little-endian signature
//! [`gex::SIGNATURE`].

pub mod dat;
pub mod ged;
pub mod gex;
