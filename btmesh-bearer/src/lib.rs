#![cfg_attr(not(test), no_std)]

pub mod beacon;
mod error;

pub use beacon::{BeaconControl, BeaconState};
pub use error::BearerError;

/// Transport carrying the provisioning protocol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProvisioningBearer {
    /// PB-ADV
    Advertising,
    /// PB-GATT
    Gatt,
}

/// Connectable advertising for the mesh provisioning service.
///
/// Implementations on builds without PB-GATT support may make both
/// operations no-ops.
pub trait PbGattControl {
    /// Start advertising the provisioning service.
    fn enable(&mut self) -> Result<(), BearerError>;

    /// Stop advertising the provisioning service.
    fn disable(&mut self) -> Result<(), BearerError>;
}

impl<T: PbGattControl + ?Sized> PbGattControl for &mut T {
    fn enable(&mut self) -> Result<(), BearerError> {
        T::enable(self)
    }

    fn disable(&mut self) -> Result<(), BearerError> {
        T::disable(self)
    }
}
