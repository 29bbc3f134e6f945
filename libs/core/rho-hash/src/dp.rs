// [libs/core/rho-hash/src/dp.rs]
/*!
 * =================================================================
 * APARATO: DISTINGUISHED POINT PREDICATE (V2.0)
 * CLASIFICACIÓN: DOMAIN ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: D_k Y EL CAMINANTE DE CADENA
 *
 * # Mathematical Proof (Monotonicity of D_k):
 * D_k(y) requires at least k leading zero bits; D_{k-1}(y) requires
 * one fewer. Any y satisfying D_k therefore satisfies D_{k-1}, so
 * raising k can only shrink the distinguished set, never grow it.
 * =================================================================
 */

use crate::hash::hash_once;
use crate::instance::HashInstance;

/// Number of leading zero bits in `value`, big-endian, capped at
/// `value.len() * 8`.
pub fn leading_zero_bits(value: &[u8]) -> u32 {
    let mut count = 0u32;
    for &byte in value {
        if byte == 0 {
            count += 8;
            continue;
        }
        count += byte.leading_zeros();
        break;
    }
    count
}

/// D_k(y): true iff `y` has at least `k` leading zero bits.
pub fn is_distinguished(value: &[u8], k: u32) -> bool {
    leading_zero_bits(value) >= k
}

/// One step of the chain: `H(value)`.
pub fn step(value: &[u8], instance: &HashInstance) -> Vec<u8> {
    hash_once(value, instance)
}

/// Walk the chain `s, H(s), H^2(s), ...` from `start`, returning the
/// first value satisfying `D_k` together with the number of hash
/// applications it took to reach it, or `None` if `max_steps` is
/// exhausted first.
pub fn walk_to_distinguished(
    start: &[u8],
    instance: &HashInstance,
    k: u32,
    max_steps: u64,
) -> Option<(Vec<u8>, u64)> {
    let mut current = start.to_vec();
    for taken in 1..=max_steps {
        current = step(&current, instance);
        if is_distinguished(&current, k) {
            return Some((current, taken));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn leading_zero_bits_of_all_zero_bytes_is_full_width() {
        assert_eq!(leading_zero_bits(&[0, 0, 0]), 24);
    }

    #[test]
    fn leading_zero_bits_stops_at_first_nonzero_byte() {
        assert_eq!(leading_zero_bits(&[0x00, 0x0f]), 12);
        assert_eq!(leading_zero_bits(&[0x80]), 0);
    }

    #[test]
    fn k_zero_is_always_distinguished() {
        assert!(is_distinguished(&[0xff, 0xff], 0));
    }

    proptest! {
        #[test]
        fn d_k_is_monotonic_in_k(bytes in proptest::collection::vec(any::<u8>(), 1..8), k in 0u32..40) {
            if is_distinguished(&bytes, k) && k > 0 {
                prop_assert!(is_distinguished(&bytes, k - 1));
            }
        }
    }

    #[test]
    fn chain_walk_reaches_a_distinguished_point_within_the_budget() {
        let instance = HashInstance::default();
        let start = hex::decode("0000000000000000").unwrap();
        let k = 4;
        let result = walk_to_distinguished(&start, &instance, k, 4 * (1u64 << k).max(16));
        let (dp, _) = result.expect("a low-difficulty chain should terminate quickly");
        assert!(is_distinguished(&dp, k));
    }
}
