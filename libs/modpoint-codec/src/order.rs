//! Byte and register ordering primitives
//!
//! In-place reordering of the canonical little-endian byte image of a value:
//! byte swap inside each 16-bit register lane, and the four register-lane
//! permutations for 32-/64-bit values.
//!
//! All permutations are involutions (applying one twice restores the
//! buffer), which is what lets the codec run the same routine for encode and
//! decode. Buffers are fixed-size byte arrays with the wiring spelled out as
//! index swaps; no pointer reinterpretation anywhere.

use crate::types::{DataOrder, RegisterOrder};

/// Swap the two bytes of one 16-bit register.
#[inline]
pub fn swap_bytes16(buf: &mut [u8; 2]) {
    buf.swap(0, 1);
}

/// Apply the register byte order across a buffer.
///
/// `MostSignifiedFirst` swaps the two bytes of every complete 16-bit lane;
/// `LessSignifiedFirst` is the canonical layout and leaves the buffer
/// untouched. A trailing odd byte is left in place.
pub fn apply_data_order(buf: &mut [u8], order: DataOrder) {
    if order == DataOrder::MostSignifiedFirst {
        for lane in buf.chunks_exact_mut(2) {
            lane.swap(0, 1);
        }
    }
}

/// Permute the two 16-bit lanes of a 32-bit value.
///
/// At this width the permutation is the order's macro-order bit: orders that
/// lead with the more significant register (`R3R2R1R0`, `R1R0R3R2`) swap the
/// lanes, the rest leave the canonical least-significant-first layout alone.
pub fn swap_words32(buf: &mut [u8; 4], order: RegisterOrder) {
    if order.to_data_order() == DataOrder::MostSignifiedFirst {
        buf.swap(0, 2);
        buf.swap(1, 3);
    }
}

/// Permute the four 16-bit lanes of a 64-bit value.
///
/// Each order has one fixed wiring of pairwise lane swaps; this is a
/// permutation network, not a sort.
pub fn swap_words64(buf: &mut [u8; 8], order: RegisterOrder) {
    match order {
        RegisterOrder::R0R1R2R3 => {}
        RegisterOrder::R3R2R1R0 => {
            swap_lanes(buf, 0, 3);
            swap_lanes(buf, 1, 2);
        }
        RegisterOrder::R1R0R3R2 => {
            swap_lanes(buf, 0, 1);
            swap_lanes(buf, 2, 3);
        }
        RegisterOrder::R2R3R0R1 => {
            swap_lanes(buf, 0, 2);
            swap_lanes(buf, 1, 3);
        }
    }
}

#[inline]
fn swap_lanes(buf: &mut [u8; 8], a: usize, b: usize) {
    buf.swap(2 * a, 2 * b);
    buf.swap(2 * a + 1, 2 * b + 1);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    const ORDERS: [RegisterOrder; 4] = [
        RegisterOrder::R0R1R2R3,
        RegisterOrder::R3R2R1R0,
        RegisterOrder::R1R0R3R2,
        RegisterOrder::R2R3R0R1,
    ];

    #[test]
    fn test_swap_bytes16() {
        let mut buf = [0x12, 0x34];
        swap_bytes16(&mut buf);
        assert_eq!(buf, [0x34, 0x12]);
    }

    #[test]
    fn test_apply_data_order() {
        let mut buf = [0x78, 0x56, 0x34, 0x12];
        apply_data_order(&mut buf, DataOrder::LessSignifiedFirst);
        assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]);
        apply_data_order(&mut buf, DataOrder::MostSignifiedFirst);
        assert_eq!(buf, [0x56, 0x78, 0x12, 0x34]);
    }

    #[test]
    fn test_apply_data_order_odd_tail() {
        let mut buf = [0x01, 0x02, 0x03];
        apply_data_order(&mut buf, DataOrder::MostSignifiedFirst);
        assert_eq!(buf, [0x02, 0x01, 0x03]);
    }

    #[test]
    fn test_swap_words32_table() {
        // Canonical image of 0x12345678: lanes [0x5678][0x1234], LSB first.
        let canonical = [0x78, 0x56, 0x34, 0x12];

        let mut buf = canonical;
        swap_words32(&mut buf, RegisterOrder::R0R1R2R3);
        assert_eq!(buf, canonical);

        let mut buf = canonical;
        swap_words32(&mut buf, RegisterOrder::R2R3R0R1);
        assert_eq!(buf, canonical);

        let mut buf = canonical;
        swap_words32(&mut buf, RegisterOrder::R3R2R1R0);
        assert_eq!(buf, [0x34, 0x12, 0x78, 0x56]);

        let mut buf = canonical;
        swap_words32(&mut buf, RegisterOrder::R1R0R3R2);
        assert_eq!(buf, [0x34, 0x12, 0x78, 0x56]);
    }

    #[test]
    fn test_swap_words64_table() {
        let canonical: [u8; 8] = [0xF0, 0xDE, 0xBC, 0x9A, 0x78, 0x56, 0x34, 0x12];

        let mut buf = canonical;
        swap_words64(&mut buf, RegisterOrder::R0R1R2R3);
        assert_eq!(buf, canonical);

        let mut buf = canonical;
        swap_words64(&mut buf, RegisterOrder::R3R2R1R0);
        assert_eq!(buf, [0x34, 0x12, 0x78, 0x56, 0xBC, 0x9A, 0xF0, 0xDE]);

        let mut buf = canonical;
        swap_words64(&mut buf, RegisterOrder::R1R0R3R2);
        assert_eq!(buf, [0xBC, 0x9A, 0xF0, 0xDE, 0x34, 0x12, 0x78, 0x56]);

        let mut buf = canonical;
        swap_words64(&mut buf, RegisterOrder::R2R3R0R1);
        assert_eq!(buf, [0x78, 0x56, 0x34, 0x12, 0xF0, 0xDE, 0xBC, 0x9A]);
    }

    #[test]
    fn test_swap_words64_involution() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x6D6F6470);
        for _ in 0..256 {
            let original: [u8; 8] = rng.gen();
            for order in ORDERS {
                let mut buf = original;
                swap_words64(&mut buf, order);
                swap_words64(&mut buf, order);
                assert_eq!(buf, original, "{order}");
            }
        }
    }

    #[test]
    fn test_swap_words32_involution() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x636F6465);
        for _ in 0..256 {
            let original: [u8; 4] = rng.gen();
            for order in ORDERS {
                let mut buf = original;
                swap_words32(&mut buf, order);
                swap_words32(&mut buf, order);
                assert_eq!(buf, original, "{order}");
            }
        }
    }
}
