//! Single-field response envelope.
//!
//! Every payload leaving the aggregation boundary is serialized to JSON,
//! XORed with a SHA-256 keystream derived from a static secret and then
//! base64-encoded into `{ "data": "<opaque>" }`. The same secret reverses it.
//!
//! This hides the normalized payload from casual inspection in transit. It
//! offers no confidentiality: there is no nonce and no authentication tag,
//! and identical payloads always produce identical envelopes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::EnvelopeError;

/// Length of one keystream block (one SHA-256 digest).
const BLOCK_LEN: usize = 32;

/// Transport wrapper around an encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: String,
}

/// Symmetric encoder/decoder bound to one secret.
#[derive(Clone)]
pub struct EnvelopeCodec {
    secret: Vec<u8>,
}

impl std::fmt::Debug for EnvelopeCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCodec").finish_non_exhaustive()
    }
}

impl EnvelopeCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Serialize `payload` and wrap it.
    pub fn encode<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Envelope, EnvelopeError> {
        let mut bytes =
            serde_json::to_vec(payload).map_err(|e| EnvelopeError::Serialize(e.to_string()))?;
        self.apply_keystream(&mut bytes);
        Ok(Envelope {
            data: STANDARD.encode(bytes),
        })
    }

    /// Unwrap an envelope into a typed payload.
    pub fn decode<T: DeserializeOwned>(&self, envelope: &Envelope) -> Result<T, EnvelopeError> {
        self.decode_str(&envelope.data)
    }

    /// Unwrap into an untyped JSON value.
    pub fn decode_value(&self, envelope: &Envelope) -> Result<serde_json::Value, EnvelopeError> {
        self.decode(envelope)
    }

    /// Unwrap the raw `data` string of an envelope.
    pub fn decode_str<T: DeserializeOwned>(&self, data: &str) -> Result<T, EnvelopeError> {
        let mut bytes = STANDARD.decode(data.trim())?;
        self.apply_keystream(&mut bytes);
        serde_json::from_slice(&bytes).map_err(|e| EnvelopeError::Payload(e.to_string()))
    }

    /// XOR `buf` in place with SHA-256(secret || counter) blocks.
    fn apply_keystream(&self, buf: &mut [u8]) {
        for (counter, chunk) in buf.chunks_mut(BLOCK_LEN).enumerate() {
            let mut hasher = Sha256::new();
            hasher.update(&self.secret);
            hasher.update((counter as u64).to_le_bytes());
            let block = hasher.finalize();
            for (b, k) in chunk.iter_mut().zip(block.iter()) {
                *b ^= k;
            }
        }
    }
}
