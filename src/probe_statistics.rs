use crate::ProbeOutcome;
use std::time::Duration;

/// Totals over one probe run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProbeStatistics {
    pub transmitted: u16,
    pub received: u16,
    pub rtt_min: Option<Duration>,
    pub rtt_max: Option<Duration>,
    rtt_total: Duration,
}

impl ProbeStatistics {
    pub(crate) fn record(&mut self, outcome: &ProbeOutcome) {
        self.transmitted += 1;
        if let ProbeOutcome::Matched { rtt, .. } = *outcome {
            self.received += 1;
            self.rtt_total += rtt;
            self.rtt_min = Some(self.rtt_min.map_or(rtt, |min| min.min(rtt)));
            self.rtt_max = Some(self.rtt_max.map_or(rtt, |max| max.max(rtt)));
        }
    }

    pub fn lost(&self) -> u16 {
        self.transmitted - self.received
    }

    pub fn rtt_avg(&self) -> Option<Duration> {
        (self.received > 0).then(|| self.rtt_total / u32::from(self.received))
    }
}
