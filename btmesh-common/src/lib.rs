#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod crypto;
pub mod key_index;

pub use key_index::{AppKeyIndex, InvalidKeyIndex, KeyIndex, NetKeyIndex};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    InvalidValue,
    InvalidLength,
}

impl From<InvalidKeyIndex> for ParseError {
    fn from(_: InvalidKeyIndex) -> Self {
        Self::InvalidValue
    }
}
