/// Computes the Internet Checksum as defined in RFC 1071.
///
/// The buffer is summed as big-endian 16-bit words. A trailing odd byte is treated as the high
/// byte of a zero-padded word. Carries are folded back until the sum fits in 16 bits, and the
/// one's complement of that sum is returned.
///
/// Over a buffer that already carries a correct checksum the result is `0`.
pub fn internet_checksum(buf: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = buf.chunks_exact(2);
    for word in &mut words {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
        // Fold early so very large buffers cannot overflow the accumulator.
        if sum > 0xFFFF_0000 {
            sum = (sum & 0xFFFF) + (sum >> 16);
        }
    }
    if let [last] = words.remainder() {
        sum += u32::from(u16::from_be_bytes([*last, 0]));
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    #[allow(clippy::cast_possible_truncation)]
    let folded = sum as u16;
    !folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer() {
        assert_eq!(0xFFFF, internet_checksum(&[]));
    }

    #[test]
    fn rfc_1071_example() {
        // RFC 1071 section 3: the words sum to 0xddf2.
        let buf = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(!0xddf2_u16, internet_checksum(&buf));
    }

    #[test]
    fn odd_length_pads_trailing_byte() {
        assert_eq!(internet_checksum(&[0xFF, 0x00]), internet_checksum(&[0xFF]));
        assert_eq!(0x00FF, internet_checksum(&[0xFF]));

        let odd = [0x12, 0x34, 0x56];
        let padded = [0x12, 0x34, 0x56, 0x00];
        assert_eq!(internet_checksum(&padded), internet_checksum(&odd));
    }

    #[test]
    fn carries_are_folded() {
        // 0xFFFF + 0x0001 = 0x1_0000, folds to 0x0001.
        assert_eq!(!0x0001_u16, internet_checksum(&[0xFF, 0xFF, 0x00, 0x01]));
        // 0xFFFF + 0xFFFF = 0x1_FFFE, folds to 0xFFFF.
        assert_eq!(0x0000, internet_checksum(&[0xFF, 0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn long_buffer_does_not_overflow() {
        let buf = vec![0xFFu8; 1 << 20];
        assert_eq!(0x0000, internet_checksum(&buf));
    }

    #[test]
    fn appending_checksum_sums_to_zero() {
        let mut buf = vec![0x08, 0x00, 0x00, 0x00, 0xAB, 0xCD, 0x00, 0x07, b'x'];
        let checksum = internet_checksum(&buf);
        buf[2..4].copy_from_slice(&checksum.to_be_bytes());
        assert_eq!(0, internet_checksum(&buf));
    }
}
