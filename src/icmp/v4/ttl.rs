use pnet_packet::ipv4::Ipv4Packet;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ttl(pub u8);

impl Ttl {
    /// Reads the time-to-live out of the IPv4 header at the start of `datagram`.
    pub(crate) fn from_ipv4_header(datagram: &[u8]) -> Option<Ttl> {
        Ipv4Packet::new(datagram).map(|header| Ttl(header.get_ttl()))
    }
}

impl From<u8> for Ttl {
    fn from(integer: u8) -> Self {
        Ttl(integer)
    }
}

impl From<Ttl> for u8 {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
