mod checksum;
pub use checksum::internet_checksum;

mod echo_packet;
pub use echo_packet::{
    DecodeError, EchoPacket, DESTINATION_UNREACHABLE, ECHO_REPLY, ECHO_REQUEST, ICMP_HEADER_SIZE,
    IPV4_HEADER_SIZE, TIME_EXCEEDED,
};

mod sequence_number;
pub use sequence_number::SequenceNumber;

mod ttl;
pub use ttl::Ttl;

mod socket;
pub use socket::raw_socket::RawSocket;
pub use socket::{Receive, Transport};

#[cfg(test)]
pub(crate) use socket::tests;
