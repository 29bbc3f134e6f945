// [libs/core/rho-hash/src/packing.rs]
//! APARATO: WORD PACKING ADAPTER
//!
//! Byte <-> u32-word marshalling for the GPU walker buffers. The kernel
//! stores every L-byte chain value as `ceil(L/4)` big-endian 32-bit
//! words, MSB of the sequence first; a value shorter than a whole
//! number of words leaves the low bits of the last word as padding
//! zeroes rather than shifting real bytes into them.

/// Pack `bytes` into `num_words` big-endian 32-bit words, matching the
/// layout `pack_truncated` produces in `kernel.wgsl`. Bytes beyond
/// `num_words * 4` are silently dropped (the caller is expected to size
/// `num_words` from the same `HashInstance` the bytes were truncated
/// to).
pub fn pack_bytes_to_words(bytes: &[u8], num_words: usize) -> Vec<u32> {
    let mut words = vec![0u32; num_words];
    for (i, &byte) in bytes.iter().enumerate() {
        let word = i / 4;
        if word >= num_words {
            break;
        }
        let shift = (3 - (i % 4)) * 8;
        words[word] |= (byte as u32) << shift;
    }
    words
}

/// Inverse of [`pack_bytes_to_words`]: render `words` as big-endian
/// bytes and truncate to `total_bytes`.
pub fn unpack_words_to_bytes(words: &[u32], total_bytes: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 4);
    for &word in words {
        out.extend_from_slice(&word.to_be_bytes());
    }
    out.truncate(total_bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_whole_number_of_words() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef, 0xca, 0xfe, 0xba, 0xbe];
        let words = pack_bytes_to_words(&bytes, 2);
        assert_eq!(words, vec![0xdeadbeef, 0xcafebabe]);
        assert_eq!(unpack_words_to_bytes(&words, 8), bytes);
    }

    #[test]
    fn pads_a_partial_final_word_with_trailing_zeroes() {
        let bytes = vec![0x11, 0x22, 0x33, 0x44, 0x55];
        let words = pack_bytes_to_words(&bytes, 2);
        assert_eq!(words, vec![0x11223344, 0x55000000]);
        assert_eq!(unpack_words_to_bytes(&words, 5), bytes);
    }

    #[test]
    fn drops_bytes_beyond_the_word_capacity() {
        let bytes = vec![0xff; 16];
        let words = pack_bytes_to_words(&bytes, 2);
        assert_eq!(words.len(), 2);
    }
}
