pub mod unicast_address;

pub use unicast_address::UnicastAddress;

use crate::ParseError;

/// Indicates an invalid address.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress;

impl From<InvalidAddress> for ParseError {
    fn from(_: InvalidAddress) -> Self {
        ParseError::InvalidValue
    }
}

/// Represents any node address within a Bluetooth mesh network.
///
/// Only unicast addresses identify a single element, and therefore a single
/// device key. Group and virtual addresses are carried as their raw 16-bit
/// value, since nothing here needs to interpret them further.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Address {
    Unassigned,
    Unicast(UnicastAddress),
    Virtual(u16),
    Group(u16),
}

impl Address {
    /// convert an Address to it's big-endian 2-byte array representation.
    pub fn as_bytes(&self) -> [u8; 2] {
        match self {
            Address::Unassigned => [0, 0],
            Address::Unicast(inner) => inner.as_bytes(),
            Address::Virtual(inner) => inner.to_be_bytes(),
            Address::Group(inner) => inner.to_be_bytes(),
        }
    }

    /// Parse a big-endian 2-byte array into a mesh address.
    pub fn parse(data: [u8; 2]) -> Self {
        Self::from(u16::from_be_bytes(data))
    }

    pub fn is_unicast(&self) -> bool {
        matches!(self, Self::Unicast(_))
    }
}

impl From<u16> for Address {
    fn from(val: u16) -> Self {
        match val {
            0x0000 => Self::Unassigned,
            0x0001..=0x7FFF => Self::Unicast(UnicastAddress(val)),
            0x8000..=0xBFFF => Self::Virtual(val),
            _ => Self::Group(val),
        }
    }
}

impl From<Address> for u16 {
    fn from(addr: Address) -> Self {
        u16::from_be_bytes(addr.as_bytes())
    }
}

impl TryFrom<Address> for UnicastAddress {
    type Error = InvalidAddress;

    fn try_from(addr: Address) -> Result<Self, Self::Error> {
        match addr {
            Address::Unicast(inner) => Ok(inner),
            _ => Err(InvalidAddress),
        }
    }
}
