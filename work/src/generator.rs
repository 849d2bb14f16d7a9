//! Reference nonce search (multi-threaded CPU).
//!
//! The transaction is absorbed up to its final 243-trit block once; workers
//! then copy that mid-state, splice candidate nonces into the final block,
//! run one permutation and test the trailing zeros. Dedicated searchers
//! (GPU, FPGA) can replace this freely; only `validate_work` is normative.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::debug;

use tanglekit_bundle::{TRANSACTION_TRIT_LEN, TRANSACTION_TRYTE_LEN};
use tanglekit_sponge::{Curl, CurlRounds, Sponge};
use tanglekit_ternary::constants::HASH_TRIT_LEN;
use tanglekit_ternary::{
    increment_trits, int_to_trits, pad_trits, trailing_zeros, trits_to_trytes, trytes_to_trits,
    Trits,
};

use crate::WorkError;

/// Trit width of the nonce field at the tail of the final block.
const NONCE_TRIT_LEN: usize = 81;
/// Offset of the nonce within the final 243-trit block.
const NONCE_BLOCK_OFFSET: usize = HASH_TRIT_LEN - NONCE_TRIT_LEN;
/// Leading nonce trits reserved to keep worker search spaces disjoint.
const WORKER_PREFIX_TRIT_LEN: usize = 27;

/// Candidates tried per worker before re-checking the cancellation flag.
const BATCH_SIZE: usize = 4096;

/// Reference proof-of-work searcher over all available CPU cores.
pub struct WorkGenerator;

impl WorkGenerator {
    /// Find a nonce giving the transaction at least `mwm` trailing zero
    /// trits, returning the transaction trytes with the nonce spliced in.
    pub fn generate(&self, tx_trytes: &str, mwm: usize) -> Result<String, WorkError> {
        if tx_trytes.len() != TRANSACTION_TRYTE_LEN {
            return Err(WorkError::InvalidTransactionLength(tx_trytes.len()));
        }
        if mwm == 0 || mwm > HASH_TRIT_LEN {
            return Err(WorkError::InvalidWeightMagnitude(mwm));
        }

        let trits = trytes_to_trits(tx_trytes)?;

        // Absorb everything up to the final block once; every candidate
        // shares this prefix state.
        let mut curl = Curl::new(CurlRounds::P81);
        curl.absorb(&trits[..TRANSACTION_TRIT_LEN - HASH_TRIT_LEN])?;
        let mid_state = *curl.state();
        let final_block: Trits = trits[TRANSACTION_TRIT_LEN - HASH_TRIT_LEN..].to_vec();

        let found = AtomicBool::new(false);
        let result: Mutex<Option<Trits>> = Mutex::new(None);
        let num_workers = rayon::current_num_threads().max(1);

        (0..num_workers).into_par_iter().for_each(|worker_id| {
            let mut block = final_block.clone();

            // Distinct prefix per worker, counter in the remaining trits.
            let prefix = pad_trits(&int_to_trits(worker_id as i64), WORKER_PREFIX_TRIT_LEN);
            block[NONCE_BLOCK_OFFSET..NONCE_BLOCK_OFFSET + WORKER_PREFIX_TRIT_LEN]
                .copy_from_slice(&prefix);

            loop {
                if found.load(Ordering::Relaxed) {
                    return;
                }

                for _ in 0..BATCH_SIZE {
                    let mut state = mid_state;
                    state[..HASH_TRIT_LEN].copy_from_slice(&block);
                    tanglekit_sponge::curl::transform(&mut state, CurlRounds::P81 as usize);

                    if trailing_zeros(&state[..HASH_TRIT_LEN]) >= mwm {
                        if !found.swap(true, Ordering::Relaxed) {
                            debug!(worker_id, "nonce found");
                            if let Ok(mut slot) = result.lock() {
                                *slot = Some(block[NONCE_BLOCK_OFFSET..].to_vec());
                            }
                        }
                        return;
                    }
                    increment_trits(
                        &mut block[NONCE_BLOCK_OFFSET + WORKER_PREFIX_TRIT_LEN..],
                    );
                }
            }
        });

        let nonce = result
            .lock()
            .map_err(|_| WorkError::Cancelled)?
            .take()
            .ok_or(WorkError::Cancelled)?;

        let nonce_trytes = trits_to_trytes(&nonce)?;
        let mut out = tx_trytes[..TRANSACTION_TRYTE_LEN - NONCE_TRIT_LEN / 3].to_string();
        out.push_str(&nonce_trytes);
        Ok(out)
    }
}
