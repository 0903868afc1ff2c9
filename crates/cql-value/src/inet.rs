use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Capacity of an [`Inet`]: large enough for an IPv6 address.
pub const MAX_INET_LEN: usize = 16;

/// A network address copied out of an `inet` value.
///
/// Unlike text and blobs this is an owned, fixed-size value: the address
/// bytes are copied into `address` and `address_length` records how many
/// of them are meaningful (4 for IPv4, 16 for IPv6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Inet {
    address: [u8; MAX_INET_LEN],
    address_length: u8,
}

impl Inet {
    /// Copy a 4- or 16-byte address. Any other length returns `None`.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 4 && bytes.len() != MAX_INET_LEN {
            return None;
        }
        let mut address = [0u8; MAX_INET_LEN];
        address[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            address,
            address_length: bytes.len() as u8,
        })
    }

    /// The meaningful address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.address[..self.len()]
    }

    /// Number of address bytes: 4 or 16.
    pub fn len(&self) -> usize {
        usize::from(self.address_length)
    }

    pub fn is_empty(&self) -> bool {
        self.address_length == 0
    }

    pub fn is_ipv4(&self) -> bool {
        self.address_length == 4
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        if self.is_ipv4() {
            let [a, b, c, d, ..] = self.address;
            IpAddr::V4(Ipv4Addr::new(a, b, c, d))
        } else {
            IpAddr::V6(Ipv6Addr::from(self.address))
        }
    }
}

impl From<IpAddr> for Inet {
    fn from(addr: IpAddr) -> Self {
        let mut address = [0u8; MAX_INET_LEN];
        let address_length = match addr {
            IpAddr::V4(v4) => {
                address[..4].copy_from_slice(&v4.octets());
                4
            }
            IpAddr::V6(v6) => {
                address = v6.octets();
                16
            }
        };
        Self {
            address,
            address_length,
        }
    }
}

impl fmt::Display for Inet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}
