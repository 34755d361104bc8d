//! CIDR and IP-family utilities.
//!
//! Network ranges in an install configuration are loosely typed strings. This
//! module provides the strongly-typed [`Cidr`] wrapper used to parse, classify
//! and normalize them before they are copied into a manifest.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;

/// The address family of an IP address or network range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// A 32-bit IPv4 address or range.
    Ipv4,
    /// A 128-bit IPv6 address or range.
    Ipv6,
}

impl IpFamily {
    /// Classify a bare IP address.
    #[must_use]
    pub const fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(_) => Self::Ipv6,
        }
    }

    /// Whether this is the IPv6 family.
    #[must_use]
    pub const fn is_ipv6(self) -> bool {
        matches!(self, Self::Ipv6)
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Classify the address family of a CIDR string.
///
/// # Errors
///
/// Returns [`CidrError::Syntax`] if the string is not a valid CIDR.
pub fn classify(cidr: &str) -> Result<IpFamily, CidrError> {
    Cidr::parse(cidr).map(|c| c.family())
}

/// A parsed CIDR range.
///
/// The address is kept exactly as written, so `10.0.0.5/24` parses and
/// remembers the host bits; use [`Cidr::network`] for the masked range or
/// [`Cidr::parse_subnet`] to reject misaligned input.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr(IpNet);

impl Cidr {
    /// Parse a CIDR string of the form `address/prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`CidrError::Syntax`] if the address or prefix length is invalid.
    pub fn parse(s: &str) -> Result<Self, CidrError> {
        IpNet::from_str(s)
            .map(Self)
            .map_err(|_| CidrError::Syntax(s.to_string()))
    }

    /// Parse a CIDR string and require it to describe a subnet.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not parse or fails
    /// [`Cidr::validate_subnet`].
    pub fn parse_subnet(s: &str) -> Result<Self, CidrError> {
        let cidr = Self::parse(s)?;
        cidr.validate_subnet()?;
        Ok(cidr)
    }

    /// The address as written, host bits included.
    #[must_use]
    pub fn address(&self) -> IpAddr {
        self.0.addr()
    }

    /// The address family of this range.
    #[must_use]
    pub fn family(&self) -> IpFamily {
        IpFamily::of(&self.0.addr())
    }

    /// The range with all host bits cleared.
    #[must_use]
    pub fn network(&self) -> Self {
        Self(self.0.trunc())
    }

    /// Whether the address is aligned to the prefix (no host bits set).
    #[must_use]
    pub fn is_network_address(&self) -> bool {
        self.0.addr() == self.0.network()
    }

    /// Check that this range is a usable subnet.
    ///
    /// The address must not be unspecified (`0.0.0.0`, `::`) and must have no
    /// host bits set.
    ///
    /// # Errors
    ///
    /// Returns [`CidrError::Unspecified`] or [`CidrError::NotNetworkAddress`].
    pub fn validate_subnet(&self) -> Result<(), CidrError> {
        if self.address().is_unspecified() {
            return Err(CidrError::Unspecified(self.to_string()));
        }
        if !self.is_network_address() {
            return Err(CidrError::NotNetworkAddress {
                got: self.to_string(),
                expected: self.network().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cidr({})", self.0)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when parsing or validating a CIDR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CidrError {
    /// The input is not of the form `address/prefix`.
    #[error("invalid CIDR address: {0}")]
    Syntax(String),

    /// The network address is `0.0.0.0` or `::`.
    #[error("address must be specified: {0}")]
    Unspecified(String),

    /// The address has host bits set.
    #[error("invalid network address. got {got}, expecting {expected}")]
    NotNetworkAddress {
        /// The range as written.
        got: String,
        /// The aligned range.
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ipv4() {
        let cidr = Cidr::parse("10.128.0.0/14").unwrap();
        assert_eq!(cidr.family(), IpFamily::Ipv4);
        assert_eq!(cidr.to_string(), "10.128.0.0/14");
    }

    #[test]
    fn parse_ipv6_is_canonicalized() {
        let cidr = Cidr::parse("fd01:0000:0:0::/48").unwrap();
        assert_eq!(cidr.family(), IpFamily::Ipv6);
        assert_eq!(cidr.to_string(), "fd01::/48");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Cidr::parse("not-a-cidr"),
            Err(CidrError::Syntax(_))
        ));
        assert!(matches!(Cidr::parse("10.0.0.0"), Err(CidrError::Syntax(_))));
        assert!(matches!(
            Cidr::parse("10.0.0.0/33"),
            Err(CidrError::Syntax(_))
        ));
        assert!(matches!(Cidr::parse(""), Err(CidrError::Syntax(_))));
    }

    #[test]
    fn parse_keeps_host_bits() {
        let cidr = Cidr::parse("10.0.0.5/24").unwrap();
        assert_eq!(cidr.to_string(), "10.0.0.5/24");
        assert!(!cidr.is_network_address());
        assert_eq!(cidr.network().to_string(), "10.0.0.0/24");
    }

    #[test]
    fn subnet_rejects_host_bits() {
        let err = Cidr::parse_subnet("10.0.0.5/24").unwrap_err();
        assert_eq!(
            err,
            CidrError::NotNetworkAddress {
                got: "10.0.0.5/24".to_string(),
                expected: "10.0.0.0/24".to_string(),
            }
        );
    }

    #[test]
    fn subnet_accepts_aligned_network() {
        assert!(Cidr::parse_subnet("10.0.0.0/24").is_ok());
        assert!(Cidr::parse_subnet("fd01::/48").is_ok());
    }

    #[test]
    fn subnet_rejects_unspecified() {
        assert!(matches!(
            Cidr::parse_subnet("0.0.0.0/0"),
            Err(CidrError::Unspecified(_))
        ));
        assert!(matches!(
            Cidr::parse_subnet("::/0"),
            Err(CidrError::Unspecified(_))
        ));
    }

    #[test]
    fn classify_families() {
        assert_eq!(classify("172.30.0.0/16").unwrap(), IpFamily::Ipv4);
        assert_eq!(classify("fd02::/112").unwrap(), IpFamily::Ipv6);
        assert!(classify("fd02::").is_err());
    }

    #[test]
    fn family_of_address() {
        let v4: IpAddr = "192.168.1.10".parse().unwrap();
        let v6: IpAddr = "fd00::10".parse().unwrap();
        assert!(!IpFamily::of(&v4).is_ipv6());
        assert!(IpFamily::of(&v6).is_ipv6());
        assert_eq!(IpFamily::of(&v6).to_string(), "IPv6");
    }
}
