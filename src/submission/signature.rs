//! Normalization of ledger signatures into their display form.

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::ledger::types::{RawSignature, TxHash};

/// Canonical string form of a raw signature.
///
/// Bytes are base58-encoded, strings pass through untouched, anything else
/// is rejected.
pub fn display_hash(raw: &RawSignature) -> OrchestrationResult<TxHash> {
    match raw {
        RawSignature::Bytes(bytes) => Ok(TxHash::new(bs58::encode(bytes).into_string())),
        RawSignature::Encoded(s) => Ok(TxHash::new(s.clone())),
        RawSignature::Other(value) => {
            tracing::error!(signature = %value, "Unrecognized signature shape");
            Err(OrchestrationError::UnexpectedSignatureFormat(value.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_signature::Signature;

    #[test]
    fn test_bytes_encode_to_canonical_form() {
        let signature = Signature::from([7u8; 64]);
        let raw = RawSignature::Bytes(signature.as_ref().to_vec());
        assert_eq!(display_hash(&raw).unwrap().as_str(), signature.to_string());
    }

    #[test]
    fn test_string_passes_through() {
        let raw = RawSignature::Encoded("already-encoded".to_string());
        assert_eq!(display_hash(&raw).unwrap(), TxHash::new("already-encoded"));
    }

    #[test]
    fn test_other_shapes_are_rejected() {
        for value in [
            serde_json::json!({"signature": "abc"}),
            serde_json::json!(42),
            serde_json::Value::Null,
        ] {
            let err = display_hash(&RawSignature::Other(value)).unwrap_err();
            assert!(matches!(err, OrchestrationError::UnexpectedSignatureFormat(_)));
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_json_dispatch() {
        let bytes: RawSignature = serde_json::from_str("[0, 0, 1]").unwrap();
        assert_eq!(display_hash(&bytes).unwrap().as_str(), "112");

        let shaped: RawSignature = serde_json::from_str("true").unwrap();
        assert!(display_hash(&shaped).is_err());
    }
}
