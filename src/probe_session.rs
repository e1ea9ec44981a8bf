use crate::icmp::v4::{
    DecodeError, EchoPacket, Receive, SequenceNumber, Transport, Ttl, DESTINATION_UNREACHABLE,
    ECHO_REPLY, ICMP_HEADER_SIZE, IPV4_HEADER_SIZE, TIME_EXCEEDED,
};
use crate::{ProbeOutcome, ProbeReport, ProbeStatistics, Reporter};
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

pub const DEFAULT_COUNT: u16 = 4;
pub const DEFAULT_PAYLOAD_SIZE: usize = 32;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Number of echo requests to send.
    pub count: u16,
    /// How long to wait for the reply to each request.
    pub timeout: Duration,
    /// Minimum time between the starts of two probes.
    pub interval: Duration,
    /// Identifies this run among other pingers on the same host.
    pub identifier: u16,
    pub payload: Vec<u8>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            count: DEFAULT_COUNT,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            identifier: rand::random(),
            payload: vec![b'w'; DEFAULT_PAYLOAD_SIZE],
        }
    }
}

/// Sends `count` echo requests to one address, strictly one at a time, and reports on each.
///
/// The session owns its transport. Dropping the session releases it.
#[allow(clippy::module_name_repetitions)]
pub struct ProbeSession<S> {
    socket: S,
    ip_addr: Ipv4Addr,
    config: ProbeConfig,
}

impl<S> ProbeSession<S>
where
    S: Transport,
{
    pub fn new(socket: S, ip_addr: Ipv4Addr, config: ProbeConfig) -> Self {
        ProbeSession { socket, ip_addr, config }
    }

    pub fn ip_addr(&self) -> Ipv4Addr {
        self.ip_addr
    }

    /// Runs every probe and hands each outcome to `reporter` as soon as it is known.
    ///
    /// Per-probe failures never end the run early.
    pub fn run<R>(&mut self, reporter: &mut R) -> ProbeStatistics
    where
        R: Reporter + ?Sized,
    {
        tracing::trace!("probe session start with count {}", self.config.count);
        reporter.on_start(self.ip_addr, self.config.payload.len());

        let mut statistics = ProbeStatistics::default();
        let mut sequence_number = SequenceNumber::start_value();
        for repetition in 0..self.config.count {
            let iteration_start = Instant::now();

            let outcome = self.probe(sequence_number);
            tracing::debug!("probe {sequence_number} to {}: {outcome:?}", self.ip_addr);
            statistics.record(&outcome);
            reporter.on_report(&ProbeReport {
                ip_addr: self.ip_addr,
                sequence_number: sequence_number.into(),
                outcome,
            });

            // Keep roughly one probe per interval, but don't linger after the last one.
            if repetition + 1 < self.config.count {
                if let Some(rest) = self.config.interval.checked_sub(iteration_start.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
            sequence_number = sequence_number.next();
        }

        tracing::trace!("probe session end");
        statistics
    }

    fn probe(&self, sequence_number: SequenceNumber) -> ProbeOutcome {
        let request =
            EchoPacket::echo_request(self.config.identifier, sequence_number.into(), &self.config.payload);
        let buf = request.encode();

        let send_time = Instant::now();
        if let Err(e) = self.socket.send(&buf) {
            tracing::warn!("sending echo request {sequence_number} to {} failed: {e}", self.ip_addr);
            return ProbeOutcome::Unreachable;
        }
        tracing::trace!("echo request {sequence_number} sent");

        loop {
            let remaining = match self.config.timeout.checked_sub(send_time.elapsed()) {
                Some(remaining) if !remaining.is_zero() => remaining,
                _ => return ProbeOutcome::NoReply,
            };
            let datagram = match self.socket.receive(remaining) {
                Receive::Data(datagram) => datagram,
                Receive::Timeout => return ProbeOutcome::NoReply,
                Receive::Unreachable => return ProbeOutcome::Unreachable,
            };
            let rtt = send_time.elapsed();

            match classify(&request, &datagram, rtt) {
                Some(outcome) => return outcome,
                None => tracing::trace!("ignoring unrelated ICMP message while waiting for {sequence_number}"),
            }
        }
    }
}

/// Decides what a received datagram means for the outstanding `request`.
///
/// Returns `None` for traffic that is not an answer at all, such as our own request looped back
/// on a raw socket.
///
/// The IP header is assumed to be exactly [`IPV4_HEADER_SIZE`] bytes long. Datagrams carrying IP
/// options are not supported.
fn classify(request: &EchoPacket, datagram: &[u8], rtt: Duration) -> Option<ProbeOutcome> {
    let (Some(ttl), Some(icmp)) = (Ttl::from_ipv4_header(datagram), datagram.get(IPV4_HEADER_SIZE..)) else {
        return Some(ProbeOutcome::Malformed);
    };

    let reply = match EchoPacket::decode(icmp) {
        Ok(reply) => reply,
        Err(DecodeError::ChecksumInvalid) => return Some(ProbeOutcome::ChecksumInvalid),
        Err(DecodeError::Truncated(_)) => return Some(ProbeOutcome::Malformed),
    };

    match reply.icmp_type {
        ECHO_REPLY if reply.answers(request) => Some(ProbeOutcome::Matched {
            rtt,
            ttl,
            reply_size: datagram.len() - IPV4_HEADER_SIZE - ICMP_HEADER_SIZE,
        }),
        ECHO_REPLY => {
            tracing::warn!(
                "echo reply {}/{} does not match request {}/{}",
                reply.identifier,
                reply.sequence_number,
                request.identifier,
                request.sequence_number
            );
            Some(ProbeOutcome::SequenceMismatch)
        }
        DESTINATION_UNREACHABLE | TIME_EXCEEDED => Some(ProbeOutcome::Unreachable),
        _ => None,
    }
}
