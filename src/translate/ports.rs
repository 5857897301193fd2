// ABOUTME: Exposed-port and host-binding parsing.
// ABOUTME: "80", "53/udp" for container ports; "8080", "127.0.0.1:8080" for host bindings.

use super::TranslateError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Host address used when a binding names only a port.
pub const DEFAULT_HOST_IP: &str = "0.0.0.0";

/// Transport protocol of an exposed port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Sctp => "sctp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "sctp" => Ok(Protocol::Sctp),
            other => Err(format!("unknown protocol {other:?}")),
        }
    }
}

/// A container-side port and its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExposedPort {
    pub port: u16,
    pub protocol: Protocol,
}

impl ExposedPort {
    pub fn tcp(port: u16) -> Self {
        Self {
            port,
            protocol: Protocol::Tcp,
        }
    }

    /// Parse `port` (TCP) or `port/proto`.
    pub fn parse(spec: &str) -> Result<Self, TranslateError> {
        match spec.split_once('/') {
            Some((port, proto)) => Ok(Self {
                port: parse_port(port).map_err(|reason| TranslateError::port(spec, reason))?,
                protocol: proto
                    .parse()
                    .map_err(|reason: String| TranslateError::port(spec, reason))?,
            }),
            None => parse_port(spec)
                .map(Self::tcp)
                .map_err(|reason| TranslateError::port(spec, reason)),
        }
    }
}

/// Renders the daemon's key form, e.g. `80/tcp`.
impl fmt::Display for ExposedPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// A host-side address a container port is published on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostBinding {
    pub host_ip: String,
    pub host_port: u16,
}

impl HostBinding {
    /// Parse `port` (all interfaces) or `ip:port`. IPv6 hosts are written `[::1]:port`.
    pub fn parse(spec: &str) -> Result<Self, TranslateError> {
        let (host_ip, port) = match spec.rsplit_once(':') {
            Some(("", port)) => (DEFAULT_HOST_IP, port),
            Some((ip, port)) => (ip.trim_start_matches('[').trim_end_matches(']'), port),
            None => (DEFAULT_HOST_IP, spec),
        };
        let host_port = parse_port(port).map_err(|reason| TranslateError::binding(spec, reason))?;
        Ok(Self {
            host_ip: host_ip.to_string(),
            host_port,
        })
    }
}

impl fmt::Display for HostBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_ip, self.host_port)
    }
}

/// Exposed ports and the host bindings published for each.
///
/// Two specs that name the same port (`80` and `80/tcp`) share one entry and
/// their bindings accumulate in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortBindings {
    bindings: BTreeMap<ExposedPort, Vec<HostBinding>>,
}

impl PortBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, port: ExposedPort, binding: HostBinding) {
        self.bindings.entry(port).or_default().push(binding);
    }

    pub fn get(&self, port: &ExposedPort) -> Option<&[HostBinding]> {
        self.bindings.get(port).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExposedPort, &[HostBinding])> {
        self.bindings.iter().map(|(port, b)| (port, b.as_slice()))
    }

    /// Number of distinct exposed ports.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Parse every key of a port mapping into an exposed port.
pub fn exposed_ports<I, K, V>(ports: I) -> Result<Vec<ExposedPort>, TranslateError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    ports
        .into_iter()
        .map(|(spec, _)| ExposedPort::parse(spec.as_ref()))
        .collect()
}

/// Build the bindings table from a mapping of port spec to host binding.
pub fn port_bindings<I, K, V>(ports: I) -> Result<PortBindings, TranslateError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut table = PortBindings::new();
    for (spec, binding) in ports {
        table.bind(
            ExposedPort::parse(spec.as_ref())?,
            HostBinding::parse(binding.as_ref())?,
        );
    }
    Ok(table)
}

fn parse_port(s: &str) -> Result<u16, String> {
    s.trim()
        .parse::<u16>()
        .map_err(|e| format!("{s:?} is not a valid port number: {e}"))
}
