//! Bundles: atomic groups of transactions bound by one essence hash.
//!
//! - [`transaction`] owns the fixed 8019-trit wire layout
//! - [`transfer`] expands caller intents into bundle rows
//! - [`bundle`] assembles, finalizes, signs and validates

pub mod bundle;
pub mod error;
pub mod transaction;
pub mod transfer;

pub use bundle::{
    add_entry, add_signature_fragments, finalize, sign_inputs, tail_transaction, validate_bundle,
    Input,
};
pub use error::BundleError;
pub use transaction::{Transaction, TRANSACTION_TRIT_LEN, TRANSACTION_TRYTE_LEN};
pub use transfer::{transfers_to_bundle_entries, BundleEntry, Transfer};
