//! Transfers: what a caller wants to happen, before bundle assembly.

use serde::{Deserialize, Serialize};

use tanglekit_ternary::constants::{HASH_TRYTE_LEN, SIG_FRAGMENT_TRYTE_LEN};
use tanglekit_ternary::{pad_trytes, validate_trytes};

use crate::transaction::TAG_TRYTE_LEN;
use crate::BundleError;

/// One requested output: send `value` to `address`, optionally carrying a
/// tryte-encoded message in the signature-message region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub address: String,
    pub value: i64,
    pub message: String,
    pub tag: String,
}

impl Transfer {
    pub fn new(address: &str, value: i64) -> Self {
        Self {
            address: address.to_string(),
            value,
            message: String::new(),
            tag: String::new(),
        }
    }
}

/// The expansion of one transfer into bundle rows.
///
/// A message longer than one 2187-tryte fragment spreads over additional
/// zero-value transactions at the same address; `length` is the number of
/// transactions the entry occupies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub length: usize,
    pub address: String,
    pub value: i64,
    pub tag: String,
    pub timestamp: i64,
    pub signature_message_fragments: Vec<String>,
}

/// Expand transfers into bundle entries, splitting overlong messages across
/// signature-message fragments.
pub fn transfers_to_bundle_entries(
    timestamp: i64,
    transfers: &[Transfer],
) -> Result<Vec<BundleEntry>, BundleError> {
    let mut entries = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        if transfer.address.len() != HASH_TRYTE_LEN {
            return Err(BundleError::InvalidBundle {
                reason: "transfer address must be 81 trytes",
            });
        }
        validate_trytes(&transfer.address)?;
        if !transfer.message.is_empty() {
            validate_trytes(&transfer.message)?;
        }
        if !transfer.tag.is_empty() {
            validate_trytes(&transfer.tag)?;
        }
        if transfer.tag.len() > TAG_TRYTE_LEN {
            return Err(BundleError::InvalidBundle {
                reason: "transfer tag must fit 27 trytes",
            });
        }

        let mut fragments: Vec<String> = transfer
            .message
            .as_bytes()
            .chunks(SIG_FRAGMENT_TRYTE_LEN)
            .map(|chunk| {
                // Chunking a validated tryte string on byte boundaries is
                // safe: the alphabet is ASCII.
                pad_trytes(std::str::from_utf8(chunk).unwrap_or(""), SIG_FRAGMENT_TRYTE_LEN)
            })
            .collect();
        if fragments.is_empty() {
            fragments.push("9".repeat(SIG_FRAGMENT_TRYTE_LEN));
        }

        entries.push(BundleEntry {
            length: fragments.len(),
            address: transfer.address.clone(),
            value: transfer.value,
            tag: pad_trytes(&transfer.tag, TAG_TRYTE_LEN),
            timestamp,
            signature_message_fragments: fragments,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> String {
        "ADDRESS99".repeat(9)
    }

    #[test]
    fn empty_message_yields_one_blank_fragment() {
        let entries =
            transfers_to_bundle_entries(1000, &[Transfer::new(&address(), 5)]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].length, 1);
        assert_eq!(entries[0].signature_message_fragments[0], "9".repeat(2187));
    }

    #[test]
    fn long_message_spans_fragments() {
        let mut transfer = Transfer::new(&address(), 0);
        transfer.message = "MESSAGE".repeat(400); // 2800 trytes
        let entries = transfers_to_bundle_entries(1000, &[transfer]).unwrap();
        assert_eq!(entries[0].length, 2);
        assert_eq!(entries[0].signature_message_fragments.len(), 2);
        assert_eq!(entries[0].signature_message_fragments[0].len(), 2187);
        assert_eq!(entries[0].signature_message_fragments[1].len(), 2187);
        assert!(entries[0].signature_message_fragments[1].ends_with('9'));
    }

    #[test]
    fn bad_address_rejected() {
        let transfer = Transfer::new("SHORT", 1);
        assert!(transfers_to_bundle_entries(0, &[transfer]).is_err());
    }

    #[test]
    fn bad_message_rejected() {
        let mut transfer = Transfer::new(&address(), 1);
        transfer.message = "lowercase".to_string();
        assert!(transfers_to_bundle_entries(0, &[transfer]).is_err());
    }

    #[test]
    fn tag_is_padded_to_field_width() {
        let mut transfer = Transfer::new(&address(), 1);
        transfer.tag = "TAG".to_string();
        let entries = transfers_to_bundle_entries(0, &[transfer]).unwrap();
        assert_eq!(entries[0].tag, format!("TAG{}", "9".repeat(24)));
    }
}
