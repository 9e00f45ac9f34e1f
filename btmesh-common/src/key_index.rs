use core::fmt;

/// Key indexes are 12 bits wide on the wire.
pub const KEY_INDEX_MAX: u16 = 0x0FFF;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidKeyIndex;

#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct KeyIndex(u16);

#[cfg(feature = "defmt")]
impl defmt::Format for KeyIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u16:#x}", self.0);
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05x}", self.0)
    }
}

impl KeyIndex {
    pub fn new(index: u16) -> Result<Self, InvalidKeyIndex> {
        if index <= KEY_INDEX_MAX {
            Ok(Self(index))
        } else {
            Err(InvalidKeyIndex)
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

macro_rules! key_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Eq, PartialEq, PartialOrd, Ord, Copy, Clone, Debug, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(KeyIndex);

        impl $name {
            pub fn new(index: u16) -> Result<Self, InvalidKeyIndex> {
                Ok(Self(KeyIndex::new(index)?))
            }

            pub fn value(&self) -> u16 {
                self.0.value()
            }
        }

        impl From<$name> for KeyIndex {
            fn from(index: $name) -> Self {
                index.0
            }
        }

        impl From<$name> for u16 {
            fn from(index: $name) -> Self {
                index.0.value()
            }
        }

        impl TryFrom<u16> for $name {
            type Error = InvalidKeyIndex;

            fn try_from(index: u16) -> Result<Self, Self::Error> {
                Self::new(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

key_index!(
    /// Global index of a network key.
    NetKeyIndex
);

key_index!(
    /// Global index of an application key.
    AppKeyIndex
);

#[cfg(test)]
mod tests {
    use super::{AppKeyIndex, NetKeyIndex, KEY_INDEX_MAX};

    #[test]
    fn index_is_twelve_bits() {
        assert!(NetKeyIndex::new(KEY_INDEX_MAX).is_ok());
        assert!(NetKeyIndex::new(KEY_INDEX_MAX + 1).is_err());
        assert!(AppKeyIndex::new(0xFFFF).is_err());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(format!("{}", AppKeyIndex::new(0x12).unwrap()), "0x012");
    }
}
