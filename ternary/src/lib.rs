//! Balanced-ternary numeral layer for the tanglekit ledger client.
//!
//! - **Trits** are digits in {-1, 0, 1}; **trytes** are the 27-symbol string
//!   encoding, three trits per symbol
//! - Balanced-ternary integer codec and a trit full-adder
//! - ASCII payload codec (two trytes per byte)
//! - The shared constant table (hash width 243, fragment geometry, checksum
//!   lengths) every higher layer builds on

pub mod ascii;
pub mod constants;
pub mod error;
pub mod trits;
pub mod trytes;

pub use ascii::{ascii_to_trytes, trytes_to_ascii};
pub use error::TernaryError;
pub use trits::{
    add_trits, increment_trits, int_to_trits, is_valid_trit, pad_trits, trailing_zeros,
    trits_to_int, trits_to_trytes, validate_trits, Trit, Trits,
};
pub use trytes::{
    pad_trytes, trits_triplet_to_tryte, tryte_index, tryte_value, trytes_to_trits, validate_trytes,
};
