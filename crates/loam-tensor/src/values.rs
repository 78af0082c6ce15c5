//! f32 <-> byte conversion at the pool boundary.
//!
//! Pools deal in bytes; tensors deal in f32. Conversion is explicit
//! little-endian per element, keeping the whole crate free of unsafe casts.

/// Decode a byte slice into f32 values.
///
/// # Panics
///
/// Panics if the byte length is not a multiple of 4.
pub(crate) fn read_f32s(bytes: &[u8]) -> Vec<f32> {
    assert!(bytes.len() % 4 == 0, "byte length {} not a multiple of 4", bytes.len());
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Encode f32 values into a byte slice.
///
/// # Panics
///
/// Panics if `bytes.len() != values.len() * 4`.
pub(crate) fn write_f32s(bytes: &mut [u8], values: &[f32]) {
    assert_eq!(
        bytes.len(),
        values.len() * 4,
        "byte buffer does not match value count"
    );
    for (chunk, value) in bytes.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn round_trip_preserves_values() {
        let values = [0.0f32, 1.5, -2.25, f32::MAX, f32::MIN_POSITIVE];
        let mut bytes = vec![0u8; values.len() * 4];
        write_f32s(&mut bytes, &values);
        assert_eq!(read_f32s(&bytes), values);
    }

    #[test]
    fn zero_bytes_decode_to_zero_values() {
        assert_eq!(read_f32s(&[0u8; 12]), vec![0.0, 0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn any_finite_values_round_trip(values in proptest::collection::vec(-1e30f32..1e30, 0..64)) {
            let mut bytes = vec![0u8; values.len() * 4];
            write_f32s(&mut bytes, &values);
            prop_assert_eq!(read_f32s(&bytes), values);
        }
    }
}
