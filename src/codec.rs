//! Fixed-width big-endian integer codec

/// The largest number of bytes that fit into the `u64` value handled by this codec.
pub const MAX_WIDTH: usize = 8;

/// Writes the low `8 * width` bits of `value` into `buf[offset..offset + width]`, most
/// significant byte first.
///
/// Bits of `value` above `8 * width` are discarded. Callers that care about overflow should mask
/// the value beforehand.
///
/// # Panics
///
/// Panics if `width` is not between 1 and 8 or if `offset + width` exceeds the length of `buf`.
///
/// # Examples
///
/// ```rust
/// use comb::codec::encode_fixed_width;
///
/// let mut buf = [0u8; 8];
/// encode_fixed_width(&mut buf, 2, 3, 0x0102_0304);
/// assert_eq!(buf, [0, 0, 2, 3, 4, 0, 0, 0]);
/// ```
pub fn encode_fixed_width(buf: &mut [u8], offset: usize, width: usize, value: u64) {
    let range = checked_range(buf.len(), offset, width);
    buf[range].copy_from_slice(&value.to_be_bytes()[MAX_WIDTH - width..]);
}

/// Reads `width` big-endian bytes starting at `offset` and returns them as a zero-extended
/// unsigned integer.
///
/// # Panics
///
/// Panics if `width` is not between 1 and 8 or if `offset + width` exceeds the length of `buf`.
///
/// # Examples
///
/// ```rust
/// use comb::codec::decode_fixed_width;
///
/// let buf = [0xff, 0x01, 0x02, 0x03];
/// assert_eq!(decode_fixed_width(&buf, 1, 3), 0x01_0203);
/// ```
pub fn decode_fixed_width(buf: &[u8], offset: usize, width: usize) -> u64 {
    let src = &buf[checked_range(buf.len(), offset, width)];
    let mut bytes = [0u8; MAX_WIDTH];
    bytes[MAX_WIDTH - width..].copy_from_slice(src);
    u64::from_be_bytes(bytes)
}

/// Validates the arguments of the codec functions, returning the byte range to access.
fn checked_range(len: usize, offset: usize, width: usize) -> std::ops::Range<usize> {
    assert!(
        (1..=MAX_WIDTH).contains(&width),
        "`width` must be between 1 and {MAX_WIDTH} bytes, got {width}"
    );
    let end = offset
        .checked_add(width)
        .filter(|&end| end <= len)
        .unwrap_or_else(|| {
            panic!("range {offset}+{width} out of bounds for buffer of length {len}")
        });
    offset..end
}
