use super::{Receive, Transport};
use socket2::{Domain, Protocol, SockAddr, Type};
use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

// Large enough for an IPv4 header with options plus any reply we expect.
const RECV_BUFFER_SIZE: usize = 1024;

/// A raw ICMPv4 socket connected to a single destination.
///
/// Raw sockets need root privileges or `CAP_NET_RAW`. Reads return the complete IP datagram.
/// The socket is closed when the value is dropped.
pub struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    pub fn connect(ip_addr: Ipv4Addr) -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket for {ip_addr}");
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        let addr: SockAddr = SocketAddr::V4(SocketAddrV4::new(ip_addr, 0)).into();
        socket.connect(&addr)?;
        Ok(RawSocket { socket })
    }

    fn recv_datagram(&self, timeout: Duration) -> io::Result<Vec<u8>> {
        self.socket.set_read_timeout(Some(timeout))?;
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let n = (&self.socket).read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }
}

impl Transport for RawSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn receive(&self, timeout: Duration) -> Receive {
        match self.recv_datagram(timeout) {
            Ok(datagram) => Receive::Data(datagram),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                Receive::Timeout
            }
            Err(e) => {
                tracing::debug!("receiving on raw socket failed: {e}");
                Receive::Unreachable
            }
        }
    }
}
