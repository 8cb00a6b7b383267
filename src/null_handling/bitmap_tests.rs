//==================================================================================
// Unit Tests for the validity bitmap codec
//==================================================================================

#[cfg(test)]
mod tests {
    use crate::error::ArrowHostError;
    use crate::null_handling::bitmap::*;
    use arrow::array::{Array, Int32Array};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pack_bit_order_is_lsb_first() {
        // Element 0 -> bit 0, element 7 -> bit 7, element 8 -> byte 1 bit 0.
        let bools = vec![true, false, true, true, false, false, false, true, true];
        let packed = pack(&bools).unwrap();

        assert_eq!(packed.len(), 2);
        assert_eq!(packed.as_slice(), &[0b1000_1101, 0b0000_0001]);
    }

    #[test]
    fn test_pack_empty_is_zero_length() {
        let packed = pack(&[]).unwrap();
        assert_eq!(packed.len(), 0);
        assert_eq!(pack_valid(&[], true).unwrap(), None);
    }

    #[test]
    fn test_pack_valid_elides_all_valid() {
        let all_valid = vec![true; 20];
        assert!(pack_valid(&all_valid, true).unwrap().is_none());

        let forced = pack_valid(&all_valid, false).unwrap().unwrap();
        assert_eq!(forced.as_slice(), &[0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_pack_valid_keeps_bitmap_with_nulls() {
        let valid = vec![true, true, false];
        let packed = pack_valid(&valid, true).unwrap().unwrap();
        assert_eq!(packed.as_slice(), &[0b0000_0011]);
    }

    #[test]
    fn test_pack_does_not_alias_input() {
        let bools = vec![true; 64];
        let packed = pack(&bools).unwrap();
        assert_ne!(packed.as_ptr(), bools.as_ptr() as *const u8);
    }

    #[test]
    fn test_unpack_roundtrip_random_lengths() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for length in [0usize, 1, 7, 8, 9, 63, 64, 65, 1000] {
            let bools: Vec<bool> = (0..length).map(|_| rng.random_bool(0.5)).collect();
            let packed = pack(&bools).unwrap();
            assert_eq!(unpack(packed.as_slice(), length).unwrap(), bools, "length {}", length);
        }
    }

    #[test]
    fn test_unpack_truncated_bitmap() {
        let result = unpack(&[0xFF], 9);
        match result {
            Err(ArrowHostError::TruncatedBitmap { length, needed, actual }) => {
                assert_eq!((length, needed, actual), (9, 2, 1));
            }
            other => panic!("Expected TruncatedBitmap, got {:?}", other),
        }
    }

    #[test]
    fn test_unpack_ignores_padding_bits() {
        // The high five bits are padding and must not leak into the output.
        assert_eq!(unpack(&[0b1111_1010], 3).unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_unpack_valid_absent_bitmap_is_all_true() {
        assert_eq!(unpack_valid(None, 4).unwrap(), vec![true; 4]);
    }

    #[test]
    fn test_unpack_nulls_honours_slice_offset() {
        let array = Int32Array::from(vec![Some(1), None, Some(3), None, Some(5)]);
        let sliced = array.slice(1, 3);

        let valid = unpack_nulls(sliced.nulls(), sliced.len()).unwrap();
        assert_eq!(valid, vec![false, true, false]);
    }

    #[test]
    fn test_unpack_nulls_without_buffer() {
        let array = Int32Array::from(vec![1, 2, 3]);
        assert_eq!(unpack_nulls(array.nulls(), array.len()).unwrap(), vec![true; 3]);
    }
}
