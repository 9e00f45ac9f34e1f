use crate::fast_prov::{FastProv, FastProvAction, FastProvStatus};
use crate::flags::Flags;
use crate::provisioner::Provisioner;
use btmesh_bearer::{BeaconControl, PbGattControl, ProvisioningBearer};

impl<'f, B: BeaconControl, G: PbGattControl, P: Provisioner> FastProv<'f, B, G, P> {
    /// Apply a raw action byte as received from the configuration client.
    pub fn set_action(&mut self, action: u8) -> FastProvStatus {
        match FastProvAction::parse(action) {
            Ok(action) => self.apply(action),
            Err(err) => {
                warn!("invalid fast provisioning action {:#x}", action);
                (&err).into()
            }
        }
    }

    /// Switch between acting as a normal node and acting as a provisioner.
    ///
    /// The steps are independent calls into independent subsystems and are
    /// not atomic as a whole. Their order is what is guaranteed: the role
    /// flags are updated only after beacons and the PB-GATT bearer have been
    /// switched over. A failing bearer call is logged and the sequence
    /// carries on.
    pub fn apply(&mut self, action: FastProvAction) -> FastProvStatus {
        if self.mode() == action.target_mode() {
            warn!("fast provisioning {}: already in that mode", action);
            return FastProvStatus::Success;
        }

        match action {
            FastProvAction::Enter => self.enter(),
            FastProvAction::Suspend | FastProvAction::Exit => self.leave(action),
        }

        info!("fast provisioning {}", action);
        FastProvStatus::Success
    }

    fn enter(&mut self) {
        if self.beacon.state().is_enabled() {
            debug!("stopping beacons");
            self.beacon.stop();
        }

        if self.config.pb_gatt {
            debug!("enabling PB-GATT advertising");
            if let Err(err) = self.pb_gatt.enable() {
                warn!("unable to enable PB-GATT: {:?}", err);
            }
        }

        self.provisioner
            .set_primary_element_address(self.device_info.primary_unicast_address());
        self.provisioner
            .set_provisioning_bearer(ProvisioningBearer::Advertising, false);
        self.provisioner.set_fast_prov_enabled(true);

        self.flags.set(Flags::PROVISIONING);
    }

    fn leave(&mut self, action: FastProvAction) {
        if self.config.pb_gatt {
            debug!("disabling PB-GATT advertising");
            if let Err(err) = self.pb_gatt.disable() {
                warn!("unable to disable PB-GATT: {:?}", err);
            }
        }

        if self.beacon.state().is_enabled() {
            debug!("resuming beacons");
            self.beacon.start();
        }

        self.flags.clear(Flags::PROVISIONING);
        self.provisioner.set_fast_prov_enabled(false);

        if action == FastProvAction::Exit {
            debug!("discarding provisioned nodes");
            self.provisioner.remove_all_nodes();
        }
    }
}
