//! Winternitz one-time signatures over the Kerl sponge.
//!
//! - **Key derivation**: seed + index → subseed → per-level key fragments
//! - **Addresses**: key fragments → hardened digests → address hash
//! - **Signing**: normalized bundle hash values pick per-segment hash depths
//! - **Verification**: recomputes the address from a signature, no key needed
//!
//! Keys are one-time: signing two different hashes with the same key leaks
//! enough segments to forge. Callers must never reuse an address after
//! spending from it.

pub mod address;
pub mod error;
pub mod keys;
pub mod normalize;
pub mod security;
pub mod sign;

pub use address::{address_from_digests, digests, new_address};
pub use error::SigningError;
pub use keys::{key, subseed};
pub use normalize::{has_max_value, normalized_bundle_hash, NormalizedHash};
pub use security::SecurityLevel;
pub use sign::{sig_fragment_digest, signature_fragment, validate_signatures};
