use crate::icmp::v4::Ttl;
use std::net::Ipv4Addr;
use std::time::Duration;

/// How a single probe ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeOutcome {
    /// A reply with our identifier and sequence number arrived in time.
    Matched {
        rtt: Duration,
        ttl: Ttl,
        /// Echoed payload bytes, i.e. datagram length minus IP and ICMP headers.
        reply_size: usize,
    },
    /// An echo reply arrived, but for another run or an earlier probe.
    SequenceMismatch,
    ChecksumInvalid,
    /// The datagram was too short to carry the headers it claims.
    Malformed,
    Unreachable,
    NoReply,
}

impl ProbeOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, ProbeOutcome::Matched { .. })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProbeReport {
    pub ip_addr: Ipv4Addr,
    pub sequence_number: u16,
    pub outcome: ProbeOutcome,
}

/// Receives one report per probe. Turning reports into text is up to the implementor.
pub trait Reporter {
    /// Called once before the first probe is sent.
    fn on_start(&mut self, ip_addr: Ipv4Addr, payload_size: usize) {
        let _ = (ip_addr, payload_size);
    }

    fn on_report(&mut self, report: &ProbeReport);
}

impl Reporter for Vec<ProbeReport> {
    fn on_report(&mut self, report: &ProbeReport) {
        self.push(report.clone());
    }
}
