//! The fixed transaction layout and its tryte codec.
//!
//! A transaction is exactly 8019 trits (2673 trytes). Field offsets are
//! frozen by the wire format and shared by every client implementation; the
//! essence (the signed region) is the 486 trits from address through last
//! index.

use serde::{Deserialize, Serialize};

use tanglekit_ternary::constants::{HASH_TRIT_LEN, HASH_TRYTE_LEN, SIG_FRAGMENT_TRYTE_LEN};
use tanglekit_ternary::{
    int_to_trits, pad_trits, pad_trytes, trits_to_int, trits_to_trytes, trytes_to_trits,
    validate_trytes, Trits,
};
use tanglekit_sponge::{Curl, CurlRounds, Sponge};

use crate::BundleError;

/// Full transaction length in trits.
pub const TRANSACTION_TRIT_LEN: usize = 8019;
/// Full transaction length in trytes.
pub const TRANSACTION_TRYTE_LEN: usize = TRANSACTION_TRIT_LEN / 3;

/// Length of the signed essence region in trits.
pub const ESSENCE_TRIT_LEN: usize = 486;

/// Trit length of the value field.
pub const VALUE_TRIT_LEN: usize = 81;
/// Trit length of the tag fields.
pub const TAG_TRIT_LEN: usize = 81;
/// Tryte length of the tag fields.
pub const TAG_TRYTE_LEN: usize = TAG_TRIT_LEN / 3;
/// Trit length of timestamp and index fields.
pub const INDEX_TRIT_LEN: usize = 27;
/// Trit length of the nonce field.
pub const NONCE_TRIT_LEN: usize = 81;
/// Tryte length of the nonce field.
pub const NONCE_TRYTE_LEN: usize = NONCE_TRIT_LEN / 3;

// Tryte offsets of each field within the 2673-tryte encoding.
const SIG_OFFSET: usize = 0;
const ADDRESS_OFFSET: usize = SIG_OFFSET + SIG_FRAGMENT_TRYTE_LEN;
const VALUE_OFFSET: usize = ADDRESS_OFFSET + HASH_TRYTE_LEN;
const OBSOLETE_TAG_OFFSET: usize = VALUE_OFFSET + VALUE_TRIT_LEN / 3;
const TIMESTAMP_OFFSET: usize = OBSOLETE_TAG_OFFSET + TAG_TRYTE_LEN;
const CURRENT_INDEX_OFFSET: usize = TIMESTAMP_OFFSET + INDEX_TRIT_LEN / 3;
const LAST_INDEX_OFFSET: usize = CURRENT_INDEX_OFFSET + INDEX_TRIT_LEN / 3;
const BUNDLE_OFFSET: usize = LAST_INDEX_OFFSET + INDEX_TRIT_LEN / 3;
const TRUNK_OFFSET: usize = BUNDLE_OFFSET + HASH_TRYTE_LEN;
const BRANCH_OFFSET: usize = TRUNK_OFFSET + HASH_TRYTE_LEN;
const TAG_OFFSET: usize = BRANCH_OFFSET + HASH_TRYTE_LEN;
const ATTACHMENT_TS_OFFSET: usize = TAG_OFFSET + TAG_TRYTE_LEN;
const ATTACHMENT_TS_LOWER_OFFSET: usize = ATTACHMENT_TS_OFFSET + INDEX_TRIT_LEN / 3;
const ATTACHMENT_TS_UPPER_OFFSET: usize = ATTACHMENT_TS_LOWER_OFFSET + INDEX_TRIT_LEN / 3;
const NONCE_OFFSET: usize = ATTACHMENT_TS_UPPER_OFFSET + INDEX_TRIT_LEN / 3;

/// One transaction of a bundle.
///
/// Tryte-string fields hold their on-wire width; numeric fields are decoded
/// balanced-ternary integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub signature_message_fragment: String,
    pub address: String,
    pub value: i64,
    pub obsolete_tag: String,
    pub timestamp: i64,
    pub current_index: usize,
    pub last_index: usize,
    pub bundle: String,
    pub trunk: String,
    pub branch: String,
    pub tag: String,
    pub attachment_timestamp: i64,
    pub attachment_timestamp_lower: i64,
    pub attachment_timestamp_upper: i64,
    pub nonce: String,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            signature_message_fragment: "9".repeat(SIG_FRAGMENT_TRYTE_LEN),
            address: "9".repeat(HASH_TRYTE_LEN),
            value: 0,
            obsolete_tag: "9".repeat(TAG_TRYTE_LEN),
            timestamp: 0,
            current_index: 0,
            last_index: 0,
            bundle: "9".repeat(HASH_TRYTE_LEN),
            trunk: "9".repeat(HASH_TRYTE_LEN),
            branch: "9".repeat(HASH_TRYTE_LEN),
            tag: "9".repeat(TAG_TRYTE_LEN),
            attachment_timestamp: 0,
            attachment_timestamp_lower: 0,
            attachment_timestamp_upper: 0,
            nonce: "9".repeat(NONCE_TRYTE_LEN),
        }
    }
}

impl Transaction {
    /// Encode the transaction into its 2673-tryte wire form.
    pub fn to_trytes(&self) -> Result<String, BundleError> {
        let mut out = String::with_capacity(TRANSACTION_TRYTE_LEN);
        out.push_str(&pad_trytes(&self.signature_message_fragment, SIG_FRAGMENT_TRYTE_LEN));
        out.push_str(&pad_trytes(&self.address, HASH_TRYTE_LEN));
        out.push_str(&int_field(self.value, VALUE_TRIT_LEN)?);
        out.push_str(&pad_trytes(&self.obsolete_tag, TAG_TRYTE_LEN));
        out.push_str(&int_field(self.timestamp, INDEX_TRIT_LEN)?);
        out.push_str(&int_field(self.current_index as i64, INDEX_TRIT_LEN)?);
        out.push_str(&int_field(self.last_index as i64, INDEX_TRIT_LEN)?);
        out.push_str(&pad_trytes(&self.bundle, HASH_TRYTE_LEN));
        out.push_str(&pad_trytes(&self.trunk, HASH_TRYTE_LEN));
        out.push_str(&pad_trytes(&self.branch, HASH_TRYTE_LEN));
        out.push_str(&pad_trytes(&self.tag, TAG_TRYTE_LEN));
        out.push_str(&int_field(self.attachment_timestamp, INDEX_TRIT_LEN)?);
        out.push_str(&int_field(self.attachment_timestamp_lower, INDEX_TRIT_LEN)?);
        out.push_str(&int_field(self.attachment_timestamp_upper, INDEX_TRIT_LEN)?);
        out.push_str(&pad_trytes(&self.nonce, NONCE_TRYTE_LEN));
        // Overlong fields would shift every later offset.
        if out.len() != TRANSACTION_TRYTE_LEN {
            return Err(BundleError::InvalidTransactionLength(out.len()));
        }
        Ok(out)
    }

    /// Decode a transaction from its 2673-tryte wire form.
    pub fn from_trytes(trytes: &str) -> Result<Self, BundleError> {
        if trytes.len() != TRANSACTION_TRYTE_LEN {
            return Err(BundleError::InvalidTransactionLength(trytes.len()));
        }
        validate_trytes(trytes)?;

        Ok(Self {
            signature_message_fragment: trytes[SIG_OFFSET..ADDRESS_OFFSET].to_string(),
            address: trytes[ADDRESS_OFFSET..VALUE_OFFSET].to_string(),
            value: int_from_field(&trytes[VALUE_OFFSET..OBSOLETE_TAG_OFFSET])?,
            obsolete_tag: trytes[OBSOLETE_TAG_OFFSET..TIMESTAMP_OFFSET].to_string(),
            timestamp: int_from_field(&trytes[TIMESTAMP_OFFSET..CURRENT_INDEX_OFFSET])?,
            current_index: int_from_field(&trytes[CURRENT_INDEX_OFFSET..LAST_INDEX_OFFSET])?
                as usize,
            last_index: int_from_field(&trytes[LAST_INDEX_OFFSET..BUNDLE_OFFSET])? as usize,
            bundle: trytes[BUNDLE_OFFSET..TRUNK_OFFSET].to_string(),
            trunk: trytes[TRUNK_OFFSET..BRANCH_OFFSET].to_string(),
            branch: trytes[BRANCH_OFFSET..TAG_OFFSET].to_string(),
            tag: trytes[TAG_OFFSET..ATTACHMENT_TS_OFFSET].to_string(),
            attachment_timestamp: int_from_field(
                &trytes[ATTACHMENT_TS_OFFSET..ATTACHMENT_TS_LOWER_OFFSET],
            )?,
            attachment_timestamp_lower: int_from_field(
                &trytes[ATTACHMENT_TS_LOWER_OFFSET..ATTACHMENT_TS_UPPER_OFFSET],
            )?,
            attachment_timestamp_upper: int_from_field(
                &trytes[ATTACHMENT_TS_UPPER_OFFSET..NONCE_OFFSET],
            )?,
            nonce: trytes[NONCE_OFFSET..].to_string(),
        })
    }

    /// The 486-trit signable region: address, value, obsolete tag, timestamp,
    /// current index and last index, in wire order.
    pub fn essence_trits(&self) -> Result<Trits, BundleError> {
        let mut essence = Trits::with_capacity(ESSENCE_TRIT_LEN);
        essence.extend_from_slice(&trytes_to_trits(&pad_trytes(&self.address, HASH_TRYTE_LEN))?);
        essence.extend_from_slice(&pad_trits(&int_to_trits(self.value), VALUE_TRIT_LEN));
        essence.extend_from_slice(&trytes_to_trits(&pad_trytes(
            &self.obsolete_tag,
            TAG_TRYTE_LEN,
        ))?);
        essence.extend_from_slice(&pad_trits(&int_to_trits(self.timestamp), INDEX_TRIT_LEN));
        essence.extend_from_slice(&pad_trits(
            &int_to_trits(self.current_index as i64),
            INDEX_TRIT_LEN,
        ));
        essence.extend_from_slice(&pad_trits(
            &int_to_trits(self.last_index as i64),
            INDEX_TRIT_LEN,
        ));
        Ok(essence)
    }

    /// Hash of the full transaction, the identity by which the network
    /// references it.
    pub fn hash(&self) -> Result<String, BundleError> {
        let trits = trytes_to_trits(&self.to_trytes()?)?;
        let mut curl = Curl::new(CurlRounds::P81);
        curl.absorb(&trits)?;
        Ok(trits_to_trytes(&curl.squeeze(HASH_TRIT_LEN)?)?)
    }
}

fn int_field(value: i64, trit_len: usize) -> Result<String, BundleError> {
    let trits = pad_trits(&int_to_trits(value), trit_len);
    Ok(trits_to_trytes(&trits[..trit_len])?)
}

fn int_from_field(trytes: &str) -> Result<i64, BundleError> {
    Ok(trits_to_int(&trytes_to_trits(trytes)?))
}
