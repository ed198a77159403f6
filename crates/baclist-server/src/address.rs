use core::fmt;
use std::net::{IpAddr, SocketAddr};

/// Network address of the peer that sent a request.
///
/// Passed to the access-control and notification hooks; the handler itself
/// never routes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeerAddress {
    Ip(SocketAddr),
    Mstp(u8),
}

impl PeerAddress {
    pub const BACNET_IP_DEFAULT_PORT: u16 = 47808;

    pub fn bacnet_default(addr: IpAddr) -> Self {
        Self::Ip(SocketAddr::new(addr, Self::BACNET_IP_DEFAULT_PORT))
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(addr) => write!(f, "{addr}"),
            Self::Mstp(mac) => write!(f, "mstp:{mac}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PeerAddress;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn display_forms() {
        let ip = PeerAddress::bacnet_default(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)));
        assert_eq!(ip.to_string(), "192.168.1.20:47808");
        assert_eq!(PeerAddress::Mstp(12).to_string(), "mstp:12");
    }
}
