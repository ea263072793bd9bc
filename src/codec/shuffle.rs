//! Byte-shuffle preconditioning.
//!
//! Reorders a buffer of fixed-size samples so that byte plane 0 of every
//! sample comes first, then plane 1, and so on. Typed numeric data (e.g.
//! little-endian u16 pixels with mostly-zero high bytes) compresses markedly
//! better after this transform. The transform is exactly invertible.

/// Shuffle `src` into `dst` by byte plane. Both slices must be the same
/// length and that length must be a multiple of `element_size`.
pub fn shuffle_bytes(element_size: usize, src: &[u8], dst: &mut [u8]) {
    assert_eq!(src.len(), dst.len());
    assert!(element_size > 0 && src.len() % element_size == 0);
    let elems = src.len() / element_size;
    for plane in 0..element_size {
        for i in 0..elems {
            dst[plane * elems + i] = src[i * element_size + plane];
        }
    }
}

/// Inverse of [`shuffle_bytes`]. Present for completeness and testing; the
/// benchmark itself never reads compressed output back.
pub fn unshuffle_bytes(element_size: usize, src: &[u8], dst: &mut [u8]) {
    assert_eq!(src.len(), dst.len());
    assert!(element_size > 0 && src.len() % element_size == 0);
    let elems = src.len() / element_size;
    for plane in 0..element_size {
        for i in 0..elems {
            dst[i * element_size + plane] = src[plane * elems + i];
        }
    }
}
