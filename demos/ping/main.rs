use ping_probe::{GenericError, PingError, ProbeConfig, ProbeOutcome, ProbeReport, ProbeStatistics, Reporter};
use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(argh::FromArgs)]
/// ping - send ICMP ECHO_REQUEST to a host
struct Args {
    #[argh(option, short = 'n', default = "ping_probe::DEFAULT_COUNT")]
    /// number of echo requests to send
    count: u16,

    #[argh(option, short = 'l', default = "ping_probe::DEFAULT_PAYLOAD_SIZE")]
    /// payload size in bytes
    size: usize,

    #[argh(option, short = 'w', default = "1000")]
    /// timeout in milliseconds to wait for each reply
    timeout: u64,

    #[argh(switch, short = 'v')]
    /// log what the prober is doing
    verbose: bool,

    #[argh(positional)]
    /// host name or IPv4 address
    host: String,
}

struct ConsoleReporter<'a> {
    host: &'a str,
}

impl Reporter for ConsoleReporter<'_> {
    fn on_start(&mut self, ip_addr: Ipv4Addr, payload_size: usize) {
        if self.host == ip_addr.to_string() {
            println!("Pinging {} with {payload_size} bytes of data:", self.host);
        } else {
            println!("Pinging {} [{ip_addr}] with {payload_size} bytes of data:", self.host);
        }
    }

    fn on_report(&mut self, report: &ProbeReport) {
        let ip_addr = report.ip_addr;
        match report.outcome {
            ProbeOutcome::Matched { rtt, ttl, reply_size } => {
                println!("Reply from {ip_addr}: bytes={reply_size} time={}ms TTL={ttl}", rtt.as_millis());
            }
            ProbeOutcome::SequenceMismatch => println!("Reply from {ip_addr}: wrong identifier or sequence number"),
            ProbeOutcome::ChecksumInvalid => println!("Reply from {ip_addr}: INCORRECT CHECKSUM"),
            ProbeOutcome::Malformed => println!("Reply from {ip_addr}: malformed reply"),
            ProbeOutcome::Unreachable => println!("Reply from {ip_addr}: Destination host unreachable."),
            ProbeOutcome::NoReply => println!("Request timed out."),
        }
    }
}

fn print_statistics(host: &str, statistics: &ProbeStatistics) {
    println!();
    println!("Ping statistics for {host}:");
    println!(
        "    Packets: Sent = {}, Received = {}, Lost = {}",
        statistics.transmitted,
        statistics.received,
        statistics.lost()
    );
    if let (Some(min), Some(max), Some(avg)) = (statistics.rtt_min, statistics.rtt_max, statistics.rtt_avg()) {
        println!(
            "    Minimum = {}ms, Maximum = {}ms, Average = {}ms",
            min.as_millis(),
            max.as_millis(),
            avg.as_millis()
        );
    }
}

fn main() -> Result<(), GenericError> {
    let args: Args = argh::from_env();

    let level = if args.verbose { tracing::Level::TRACE } else { tracing::Level::WARN };
    let subscriber = tracing_subscriber::FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = ProbeConfig {
        count: args.count,
        timeout: Duration::from_millis(args.timeout),
        payload: vec![b'w'; args.size],
        ..ProbeConfig::default()
    };

    let mut reporter = ConsoleReporter { host: &args.host };
    match ping_probe::ping(&args.host, config, &mut reporter) {
        Ok(statistics) => {
            print_statistics(&args.host, &statistics);
            Ok(())
        }
        Err(PingError::Resolution { .. }) => {
            println!("Ping request could not find host {}. Please check the name and try again.", args.host);
            Ok(())
        }
        Err(e @ PingError::Connect { .. }) => {
            println!("Ping could not connect to {}.", args.host);
            Err(e.into())
        }
    }
}
