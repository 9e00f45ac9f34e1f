use core::ops::Deref;

/// Per-node key securing configuration messages addressed to one node.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceKey([u8; 16]);

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceKey {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{:02x}", self.0);
    }
}

impl DeviceKey {
    pub fn new(device_key: [u8; 16]) -> Self {
        Self(device_key)
    }

    pub fn key_bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl Deref for DeviceKey {
    type Target = [u8; 16];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
