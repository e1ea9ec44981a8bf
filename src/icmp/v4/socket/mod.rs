use std::{io, time::Duration};

pub(crate) mod raw_socket;

/// What a transport hands back while the session waits for a reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Receive {
    /// A full IPv4 datagram, IP header included.
    Data(Vec<u8>),
    Timeout,
    Unreachable,
}

/// A transport bound to one IPv4 destination for the lifetime of a probe session.
pub trait Transport {
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
    fn receive(&self, timeout: Duration) -> Receive;
}
