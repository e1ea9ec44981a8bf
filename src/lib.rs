#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! ICMP echo (ping) for IPv4.
//!
//! [`icmp::v4::EchoPacket`] encodes and decodes echo messages, [`ProbeSession`] sends a fixed
//! number of them one at a time over a [`Transport`](icmp::v4::Transport) and classifies what
//! comes back. [`ping`] wires both to name resolution and a raw socket.

pub use ping_error::{GenericError, PingError};
pub use probe_report::{ProbeOutcome, ProbeReport, Reporter};
pub use probe_session::{
    ProbeConfig, ProbeSession, DEFAULT_COUNT, DEFAULT_INTERVAL, DEFAULT_PAYLOAD_SIZE, DEFAULT_TIMEOUT,
};
pub use probe_statistics::ProbeStatistics;

use icmp::v4::RawSocket;

pub mod icmp;
mod ping_error;
mod probe_report;
mod probe_session;
mod probe_statistics;
pub mod resolve;

/// Resolves `host`, opens a raw socket to it and runs one probe session.
///
/// The socket is closed when this function returns.
///
/// # Errors
///
/// Fails before any probe is sent when `host` cannot be resolved to an IPv4 address or when the
/// raw socket cannot be opened and connected. Per-probe failures are reported, not returned.
pub fn ping<R>(host: &str, config: ProbeConfig, reporter: &mut R) -> Result<ProbeStatistics, PingError>
where
    R: Reporter + ?Sized,
{
    let ip_addr = resolve::lookup_host_v4(host)?;
    tracing::trace!("{host} resolved to {ip_addr}");

    let socket = RawSocket::connect(ip_addr).map_err(|source| PingError::Connect { ip_addr, source })?;
    let mut session = ProbeSession::new(socket, ip_addr, config);
    Ok(session.run(reporter))
}
