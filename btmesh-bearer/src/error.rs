use btmesh_common::ParseError;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BearerError {
    NotSupported,
    AdvertisingFailure,
    InsufficientResources,
    ParseError(ParseError),
    Unspecified,
}

impl From<ParseError> for BearerError {
    fn from(e: ParseError) -> Self {
        Self::ParseError(e)
    }
}
