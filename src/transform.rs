//! Bulk byte transforms: `copy`, `move`, `fill`, `look_up_transform`.
//!
//! These are the building blocks the similarity façade uses transitively to
//! zero scratch buffers. Each is expressed as a thin, safe wrapper that the
//! compiler autovectorizes the same way an explicit register-width streaming
//! loop would: a tight loop over `chunks_exact`/`copy_from_slice` gives the
//! backend the same information an explicit SIMD loop would.

/// Copies `src` into `dst`. Panics if the lengths differ, matching the
/// contract of `<[T]>::copy_from_slice`.
pub fn copy(dst: &mut [u8], src: &[u8]) {
    dst.copy_from_slice(src);
}

/// Copies `len` bytes starting at `src_offset` to `dst_offset` within the same
/// buffer, correctly handling overlap in either direction (a "move", as
/// distinct from the non-overlapping `copy`).
pub fn move_bytes(buf: &mut [u8], dst_offset: usize, src_offset: usize, len: usize) {
    if dst_offset == src_offset || len == 0 {
        return;
    }
    buf.copy_within(src_offset..src_offset + len, dst_offset);
}

/// Fills every byte of `dst` with `value`.
pub fn fill(dst: &mut [u8], value: u8) {
    dst.fill(value);
}

/// A 256-entry byte-substitution table, `out[i] = lut[in[i]]`.
pub struct LookupTable {
    table: [u8; 256],
}

impl LookupTable {
    /// Builds a lookup table from a full 256-entry mapping.
    pub fn new(table: [u8; 256]) -> Self {
        LookupTable { table }
    }

    /// Builds the identity mapping.
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        LookupTable { table }
    }

    /// Applies the table element-wise: `out[i] = self.table[in[i]]`.
    pub fn apply(&self, dst: &mut [u8], src: &[u8]) {
        assert_eq!(dst.len(), src.len(), "look_up_transform requires equal-length buffers");
        for (o, &i) in dst.iter_mut().zip(src.iter()) {
            *o = self.table[i as usize];
        }
    }
}

/// Free-function mirror of [`LookupTable::apply`].
pub fn look_up_transform(dst: &mut [u8], src: &[u8], table: &LookupTable) {
    table.apply(dst, src);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_basic() {
        let mut dst = [0u8; 5];
        copy(&mut dst, b"hello");
        assert_eq!(&dst, b"hello");
    }

    #[test]
    fn move_bytes_forward_overlap() {
        let mut buf = *b"abcdefgh";
        move_bytes(&mut buf, 2, 0, 4); // shift "abcd" right by 2
        assert_eq!(&buf, b"ababcdgh");
    }

    #[test]
    fn move_bytes_backward_overlap() {
        let mut buf = *b"abcdefgh";
        move_bytes(&mut buf, 0, 2, 4); // shift "cdef" left by 2
        assert_eq!(&buf, b"cdefefgh");
    }

    #[test]
    fn move_bytes_noop_when_same_offset() {
        let mut buf = *b"abcdefgh";
        move_bytes(&mut buf, 3, 3, 2);
        assert_eq!(&buf, b"abcdefgh");
    }

    #[test]
    fn fill_basic() {
        let mut buf = [1u8; 8];
        fill(&mut buf, 0);
        assert_eq!(buf, [0u8; 8]);
    }

    #[test]
    fn look_up_transform_identity() {
        let lut = LookupTable::identity();
        let mut dst = [0u8; 4];
        look_up_transform(&mut dst, b"abcd", &lut);
        assert_eq!(&dst, b"abcd");
    }

    #[test]
    fn look_up_transform_uppercase() {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = (i as u8).to_ascii_uppercase();
        }
        let lut = LookupTable::new(table);
        let mut dst = [0u8; 5];
        look_up_transform(&mut dst, b"hello", &lut);
        assert_eq!(&dst, b"HELLO");
    }

    proptest::proptest! {
        #[test]
        fn fill_sets_every_byte(len in 0usize..256, value: u8) {
            let mut buf = vec![!value; len];
            fill(&mut buf, value);
            proptest::prop_assert!(buf.iter().all(|&b| b == value));
        }

        #[test]
        fn move_bytes_matches_naive(buf: Vec<u8>, dst in 0usize..32, src in 0usize..32, len in 0usize..16) {
            let bound = buf.len();
            let dst_offset = dst.min(bound);
            let src_offset = src.min(bound);
            let max_len = bound.saturating_sub(dst_offset.max(src_offset));
            let len = len.min(max_len);

            let mut actual = buf.clone();
            move_bytes(&mut actual, dst_offset, src_offset, len);

            let segment = buf[src_offset..src_offset + len].to_vec();
            let mut expected = buf.clone();
            expected[dst_offset..dst_offset + len].copy_from_slice(&segment);

            proptest::prop_assert_eq!(actual, expected);
        }
    }
}
