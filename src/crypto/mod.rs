//! The byte-substitution cipher used by GameMaker extension containers.
//!
//! GEX packages and DAT blobs are enciphered with a keyed permutation of
//! the byte alphabet, optionally combined with position-dependent additive
//! keying. The scheme (community name "GMKrypt") is obfuscation, not
//! cryptography: the key seed is stored in the file itself, inside an
//! identity-configured run of the very cipher it re-keys.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`gmkrypt`] | [`gmkrypt::KryptStream`] - transparent enciphering/deciphering stream adapter |

pub mod gmkrypt;
