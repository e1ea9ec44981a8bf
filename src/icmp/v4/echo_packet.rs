use super::checksum::internet_checksum;
use pnet_packet::icmp::{
    echo_reply::EchoReplyPacket,
    echo_request::{EchoRequestPacket, MutableEchoRequestPacket},
    IcmpCode, IcmpType, IcmpTypes,
};
use pnet_packet::Packet;
use std::{error::Error, fmt};

pub const ICMP_HEADER_SIZE: usize = 8;
pub const IPV4_HEADER_SIZE: usize = 20;

pub const ECHO_REPLY: u8 = 0;
pub const DESTINATION_UNREACHABLE: u8 = 3;
pub const ECHO_REQUEST: u8 = 8;
pub const TIME_EXCEEDED: u8 = 11;

const CHECKSUM_OFFSET: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The buffer does not sum to zero, no field of it can be trusted.
    ChecksumInvalid,
    /// The buffer passed the checksum but is shorter than an ICMP header.
    Truncated(usize),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ChecksumInvalid => write!(f, "invalid ICMP checksum"),
            DecodeError::Truncated(len) => write!(
                f,
                "ICMP message of {len} bytes is shorter than the {ICMP_HEADER_SIZE} byte header"
            ),
        }
    }
}

impl Error for DecodeError {}

/// An ICMP echo message, either a request we built or a message we received.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EchoPacket {
    pub icmp_type: u8,
    pub code: u8,
    pub identifier: u16,
    pub sequence_number: u16,
    pub payload: Vec<u8>,
}

impl EchoPacket {
    pub fn echo_request(identifier: u16, sequence_number: u16, payload: &[u8]) -> Self {
        EchoPacket {
            icmp_type: ECHO_REQUEST,
            code: 0,
            identifier,
            sequence_number,
            payload: payload.to_vec(),
        }
    }

    /// Serializes the packet into wire format and fills in the checksum.
    ///
    /// The checksum is computed over the whole message with the checksum field zeroed, so the
    /// returned buffer always checksums to `0`.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; EchoRequestPacket::minimum_packet_size() + self.payload.len()];
        {
            let mut packet =
                MutableEchoRequestPacket::new(&mut buf[..]).expect("logic error: buffer too small");
            packet.set_icmp_type(IcmpType::new(self.icmp_type));
            packet.set_icmp_code(IcmpCode::new(self.code));
            packet.set_checksum(0);
            packet.set_identifier(self.identifier);
            packet.set_sequence_number(self.sequence_number);
            packet.set_payload(&self.payload);
        }
        let checksum = internet_checksum(&buf);
        buf[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&checksum.to_be_bytes());
        buf
    }

    /// Parses an ICMP message whose IP header has already been stripped.
    ///
    /// The checksum over the full buffer is verified before anything else is read. Type and code
    /// are taken as they are; deciding whether the message is an echo reply is up to the caller.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if internet_checksum(buf) != 0 {
            return Err(DecodeError::ChecksumInvalid);
        }
        let packet = EchoReplyPacket::new(buf).ok_or(DecodeError::Truncated(buf.len()))?;
        Ok(EchoPacket {
            icmp_type: packet.get_icmp_type().0,
            code: packet.get_icmp_code().0,
            identifier: packet.get_identifier(),
            sequence_number: packet.get_sequence_number(),
            payload: packet.payload().to_vec(),
        })
    }

    pub fn is_echo_request(&self) -> bool {
        self.icmp_type == IcmpTypes::EchoRequest.0
    }

    pub fn is_echo_reply(&self) -> bool {
        self.icmp_type == IcmpTypes::EchoReply.0
    }

    /// Whether this message answers `request`, by identifier and sequence number.
    pub fn answers(&self, request: &EchoPacket) -> bool {
        self.identifier == request.identifier && self.sequence_number == request.sequence_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet_packet::icmp::IcmpPacket;

    fn ping_payload() -> Vec<u8> {
        vec![b'w'; 32]
    }

    #[test]
    fn encode_echo_request_with_default_payload() {
        let buf = EchoPacket::echo_request(1, 0, &ping_payload()).encode();

        assert_eq!(40, buf.len());
        assert_eq!(&[ECHO_REQUEST, 0], &buf[..2]);
        assert_eq!(&[0x00, 0x01, 0x00, 0x00], &buf[4..8]);
        assert!(buf[8..].iter().all(|&b| b == b'w'));
        assert_ne!(&[0, 0], &buf[2..4]);
        assert_eq!(0, internet_checksum(&buf));
    }

    #[test]
    fn encode_is_deterministic() {
        let packet = EchoPacket::echo_request(0xBEEF, 17, b"abc");
        assert_eq!(packet.encode(), packet.encode());
    }

    #[test]
    fn encode_agrees_with_pnet_checksum() {
        for payload_len in [0usize, 1, 31, 32, 57] {
            let payload: Vec<u8> = (0..payload_len).map(|i| (i * 7) as u8).collect();
            let buf = EchoPacket::echo_request(0x1234, 0xFFFF, &payload).encode();
            let icmp = IcmpPacket::new(&buf).unwrap();
            assert_eq!(pnet_packet::icmp::checksum(&icmp), icmp.get_checksum());
        }
    }

    #[test]
    fn decode_returns_encoded_fields() {
        let request = EchoPacket::echo_request(0xABCD, 3, b"hello, world");

        let decoded = EchoPacket::decode(&request.encode()).unwrap();

        assert_eq!(request, decoded);
        assert!(decoded.is_echo_request());
        assert!(decoded.answers(&request));
    }

    #[test]
    fn decode_empty_payload() {
        let request = EchoPacket::echo_request(7, 9, &[]);
        let decoded = EchoPacket::decode(&request.encode()).unwrap();
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn decode_echo_reply() {
        let mut reply = EchoPacket::echo_request(1, 2, &ping_payload());
        reply.icmp_type = ECHO_REPLY;

        let decoded = EchoPacket::decode(&reply.encode()).unwrap();

        assert!(decoded.is_echo_reply());
        assert_eq!(1, decoded.identifier);
        assert_eq!(2, decoded.sequence_number);
        assert_eq!(ping_payload(), decoded.payload);
    }

    #[test]
    fn any_single_bit_flip_is_rejected() {
        let buf = EchoPacket::echo_request(1, 0, &ping_payload()).encode();
        for byte in 0..buf.len() {
            for bit in 0..8 {
                let mut corrupted = buf.clone();
                corrupted[byte] ^= 1 << bit;
                assert_ne!(0, internet_checksum(&corrupted), "byte {byte} bit {bit}");
                assert_eq!(
                    Err(DecodeError::ChecksumInvalid),
                    EchoPacket::decode(&corrupted)
                );
            }
        }
    }

    #[test]
    fn decode_short_buffer_with_zero_checksum_is_truncated() {
        assert_eq!(Err(DecodeError::Truncated(2)), EchoPacket::decode(&[0xFF, 0xFF]));
    }

    #[test]
    fn decode_empty_buffer_fails_checksum() {
        assert_eq!(Err(DecodeError::ChecksumInvalid), EchoPacket::decode(&[]));
    }

    #[test]
    fn reply_with_other_sequence_number_does_not_answer() {
        let request = EchoPacket::echo_request(1, 5, b"x");
        let mut reply = request.clone();
        reply.sequence_number = 4;
        assert!(!reply.answers(&request));
        reply.sequence_number = 5;
        reply.identifier = 2;
        assert!(!reply.answers(&request));
    }

    #[test]
    fn fmt_decode_error() {
        assert_eq!("invalid ICMP checksum", format!("{}", DecodeError::ChecksumInvalid));
        assert_eq!(
            "ICMP message of 3 bytes is shorter than the 8 byte header",
            format!("{}", DecodeError::Truncated(3))
        );
    }
}
