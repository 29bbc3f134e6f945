// [libs/core/rho-hash/src/instance.rs]
//! =================================================================
//! APARATO: INSTANCE DESCRIPTOR (V2.0)
//! RESPONSABILIDAD: (L, P, S) COMO CONTRATO ENTRE ESTRATOS
//!
//! Workers and the coordinator must agree on this tuple; DPs from
//! different instances must never be mixed in one store.
//! =================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on `prefix_bytes + suffix_bytes` so the ASCII rendering
/// plus SHA-256 padding fits in a single 512-bit block (54 ASCII bytes
/// of message + 0x80 + length leaves one byte to spare at 27).
pub const ONE_BLOCK_BYTE_LIMIT: usize = 27;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashInstanceError {
    #[error("prefix_bytes + suffix_bytes must be at least 1")]
    Empty,
    #[error("prefix_bytes ({prefix}) + suffix_bytes ({suffix}) = {total} exceeds the one-block limit of {limit}")]
    TooLarge {
        prefix: usize,
        suffix: usize,
        total: usize,
        limit: usize,
    },
}

/// Describes how the truncated hash primitive H derives its L-byte
/// output from a SHA-256 digest: the first `prefix_bytes` bytes of the
/// digest, plus (if `suffix_bytes > 0`) the last `suffix_bytes` bytes,
/// skipping the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashInstance {
    pub prefix_bytes: usize,
    pub suffix_bytes: usize,
}

impl HashInstance {
    pub fn new(prefix_bytes: usize, suffix_bytes: usize) -> Result<Self, HashInstanceError> {
        let total = prefix_bytes + suffix_bytes;
        if total == 0 {
            return Err(HashInstanceError::Empty);
        }
        if total > ONE_BLOCK_BYTE_LIMIT {
            return Err(HashInstanceError::TooLarge {
                prefix: prefix_bytes,
                suffix: suffix_bytes,
                total,
                limit: ONE_BLOCK_BYTE_LIMIT,
            });
        }
        Ok(Self {
            prefix_bytes,
            suffix_bytes,
        })
    }

    /// `L`: the truncated output length in bytes.
    pub fn total_bytes(&self) -> usize {
        self.prefix_bytes + self.suffix_bytes
    }

    /// Number of 32-bit words needed to hold `L` bytes (the GPU walker
    /// state representation), rounding up.
    pub fn num_uint32s(&self) -> usize {
        (self.total_bytes() + 3) / 4
    }

    /// Number of ASCII characters the nibble encoding produces, i.e. `2L`.
    pub fn ascii_bytes(&self) -> usize {
        self.total_bytes() * 2
    }

    /// Slice a full 32-byte SHA-256 digest down to this instance's `L`
    /// bytes, taking the prefix (and, if configured, the suffix,
    /// skipping the middle).
    pub fn truncate(&self, digest: &[u8; 32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_bytes());
        out.extend_from_slice(&digest[..self.prefix_bytes]);
        if self.suffix_bytes > 0 {
            out.extend_from_slice(&digest[32 - self.suffix_bytes..]);
        }
        out
    }
}

impl Default for HashInstance {
    /// `L = 8`, prefix-only, matching the reference examples throughout
    /// the specification (`hash-prefix-bytes=8`, `hash-suffix-bytes=0`).
    fn default() -> Self {
        Self {
            prefix_bytes: 8,
            suffix_bytes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_byte_prefix_only() {
        let instance = HashInstance::default();
        assert_eq!(instance.total_bytes(), 8);
        assert_eq!(instance.num_uint32s(), 2);
    }

    #[test]
    fn rejects_empty_instance() {
        assert_eq!(HashInstance::new(0, 0), Err(HashInstanceError::Empty));
    }

    #[test]
    fn rejects_instance_above_one_block_limit() {
        assert!(matches!(
            HashInstance::new(20, 10),
            Err(HashInstanceError::TooLarge { .. })
        ));
    }

    #[test]
    fn accepts_boundary_instance() {
        assert!(HashInstance::new(27, 0).is_ok());
        assert!(HashInstance::new(0, 27).is_ok());
        assert!(HashInstance::new(28, 0).is_err());
    }

    #[test]
    fn truncate_skips_the_middle_when_suffix_is_set() {
        let instance = HashInstance::new(4, 4).unwrap();
        let mut digest = [0u8; 32];
        for (i, b) in digest.iter_mut().enumerate() {
            *b = i as u8;
        }
        let truncated = instance.truncate(&digest);
        assert_eq!(truncated, vec![0, 1, 2, 3, 28, 29, 30, 31]);
    }
}
