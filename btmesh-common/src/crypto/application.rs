/// A 16-byte application key.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplicationKey([u8; 16]);

#[cfg(feature = "defmt")]
impl defmt::Format for ApplicationKey {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ApplicationKey(..)");
    }
}

impl ApplicationKey {
    pub fn new(application_key: [u8; 16]) -> Self {
        Self(application_key)
    }

    pub fn key_bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl From<[u8; 16]> for ApplicationKey {
    fn from(application_key: [u8; 16]) -> Self {
        Self(application_key)
    }
}
