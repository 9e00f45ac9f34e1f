use crate::address::{Address, InvalidAddress};
use core::ops::Add;
use core::ops::Sub;

/// An element address in `0x0001..=0x7FFF`.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnicastAddress(pub(crate) u16);

impl core::fmt::LowerHex for UnicastAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        self.0.fmt(f)
    }
}

impl core::fmt::Display for UnicastAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(f, "{:04x}", self.0)
    }
}

impl UnicastAddress {
    pub fn new(addr: u16) -> Result<Self, InvalidAddress> {
        if Self::is_unicast_address(&addr.to_be_bytes()) {
            Ok(Self(addr))
        } else {
            Err(InvalidAddress)
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_unicast_address(data: &[u8; 2]) -> bool {
        data[0] & 0b10000000 == 0 && (data[0] | data[1]) != 0
    }

    pub fn parse(data: [u8; 2]) -> Result<Self, InvalidAddress> {
        Self::new(u16::from_be_bytes(data))
    }

    /// Checked offset to the address of a secondary element.
    pub fn checked_add(self, rhs: u8) -> Option<Self> {
        self.0
            .checked_add(rhs as u16)
            .and_then(|addr| Self::new(addr).ok())
    }
}

impl From<UnicastAddress> for Address {
    fn from(addr: UnicastAddress) -> Self {
        Self::Unicast(addr)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UnicastAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u16:04x}", self.0);
    }
}

impl From<UnicastAddress> for u16 {
    fn from(addr: UnicastAddress) -> Self {
        addr.0
    }
}

impl TryFrom<u16> for UnicastAddress {
    type Error = InvalidAddress;

    fn try_from(addr: u16) -> Result<Self, Self::Error> {
        Self::new(addr)
    }
}

impl Add<u8> for UnicastAddress {
    type Output = UnicastAddress;

    fn add(self, rhs: u8) -> Self::Output {
        Self(self.0 + rhs as u16)
    }
}

impl Sub<UnicastAddress> for UnicastAddress {
    type Output = u16;

    fn sub(self, rhs: UnicastAddress) -> Self::Output {
        self.0 - rhs.0
    }
}
