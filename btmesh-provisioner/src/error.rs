use btmesh_bearer::BearerError;
use btmesh_common::address::InvalidAddress;
use btmesh_common::{InvalidKeyIndex, ParseError};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProvisionerError {
    InvalidState,
    InvalidAction,
    InvalidAddress,
    InvalidKeyIndex,
    InvalidNetKeyIndex,
    InvalidAppKeyIndex,
    NetKeyIndexAlreadyStored,
    AppKeyIndexAlreadyStored,
    InsufficientSpace,
    Bearer(BearerError),
    Parse(ParseError),
}

impl From<InvalidAddress> for ProvisionerError {
    fn from(_: InvalidAddress) -> Self {
        Self::InvalidAddress
    }
}

impl From<InvalidKeyIndex> for ProvisionerError {
    fn from(_: InvalidKeyIndex) -> Self {
        Self::InvalidKeyIndex
    }
}

impl From<BearerError> for ProvisionerError {
    fn from(err: BearerError) -> Self {
        Self::Bearer(err)
    }
}

impl From<ParseError> for ProvisionerError {
    fn from(inner: ParseError) -> Self {
        Self::Parse(inner)
    }
}
