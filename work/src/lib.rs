//! Anti-spam proof-of-work.
//!
//! A transaction proves work by having a CurlP81 hash with enough trailing
//! zero trits. [`validate_work`] is the normative check; [`WorkGenerator`]
//! is a portable CPU reference search, not a mandated strategy.

pub mod error;
pub mod generator;
pub mod validator;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use validator::{validate_work, weight_magnitude};

pub use tanglekit_ternary::constants::DEFAULT_MIN_WEIGHT_MAGNITUDE;
