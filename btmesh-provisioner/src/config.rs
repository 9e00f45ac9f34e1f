/// Capabilities fixed when the fast provisioning controller is built.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FastProvConfig {
    /// PB-GATT provisioning advertising is available and should be
    /// toggled alongside the provisioner role.
    pub pb_gatt: bool,
}

impl Default for FastProvConfig {
    fn default() -> Self {
        Self {
            pb_gatt: cfg!(feature = "pb-gatt"),
        }
    }
}

impl FastProvConfig {
    pub fn with_pb_gatt(mut self, pb_gatt: bool) -> Self {
        self.pb_gatt = pb_gatt;
        self
    }
}
