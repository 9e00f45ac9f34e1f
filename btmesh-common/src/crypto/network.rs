use core::ops::Deref;

/// A 16-byte network key.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkKey([u8; 16]);

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkKey {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "NetworkKey(..)");
    }
}

impl NetworkKey {
    pub fn new(network_key: [u8; 16]) -> Self {
        Self(network_key)
    }

    pub fn key_bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl From<[u8; 16]> for NetworkKey {
    fn from(network_key: [u8; 16]) -> Self {
        Self(network_key)
    }
}

impl Deref for NetworkKey {
    type Target = [u8; 16];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
