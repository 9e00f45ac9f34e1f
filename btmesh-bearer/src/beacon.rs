/// Whether secure network beacons are being broadcast.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeaconState {
    Disabled,
    Enabled,
}

impl BeaconState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for BeaconState {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl From<BeaconState> for u8 {
    fn from(state: BeaconState) -> Self {
        match state {
            BeaconState::Disabled => 0x00,
            BeaconState::Enabled => 0x01,
        }
    }
}

/// The secure network beacon subsystem.
///
/// `state` is the configured beacon setting. Starting and stopping the
/// broadcast does not change it.
pub trait BeaconControl {
    fn state(&self) -> BeaconState;

    /// Resume broadcasting secure network beacons.
    fn start(&mut self);

    /// Stop broadcasting secure network beacons.
    fn stop(&mut self);
}

impl<T: BeaconControl + ?Sized> BeaconControl for &mut T {
    fn state(&self) -> BeaconState {
        T::state(self)
    }

    fn start(&mut self) {
        T::start(self)
    }

    fn stop(&mut self) {
        T::stop(self)
    }
}
