use std::net::Ipv4Addr;
use std::{error::Error, fmt, io};

pub type GenericError = Box<dyn Error + Send + Sync + 'static>;

/// Errors that end a run before or instead of probing.
///
/// Everything that can go wrong with a single probe is reported as a
/// [`ProbeOutcome`](crate::ProbeOutcome) instead.
#[derive(Debug)]
pub enum PingError {
    /// No IPv4 address could be found for the target.
    Resolution { host: String, message: String },
    /// The transport could not be opened or associated with the destination.
    Connect { ip_addr: Ipv4Addr, source: io::Error },
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            PingError::Resolution { host, message } => {
                write!(f, "could not resolve {host}")?;
                if !message.is_empty() {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            PingError::Connect { ip_addr, source } => {
                write!(f, "could not connect to {ip_addr}: {source}")
            }
        }
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PingError::Resolution { .. } => None,
            PingError::Connect { source, .. } => Some(source),
        }
    }
}
