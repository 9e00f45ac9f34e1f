use crate::fast_prov::{FastProv, FastProvStatus};
use crate::provisioner::Provisioner;
use crate::ProvisionerError;
use btmesh_bearer::{BeaconControl, PbGattControl};
use btmesh_common::NetKeyIndex;

impl<'f, B: BeaconControl, G: PbGattControl, P: Provisioner> FastProv<'f, B, G, P> {
    /// Select the network key new devices will be provisioned with.
    ///
    /// If no subnet with `net_key_index` is known yet, the index is still
    /// recorded so the key can be delivered later, and `Failure` is reported.
    pub fn select_fast_prov_net_key_index(&mut self, net_key_index: NetKeyIndex) -> FastProvStatus {
        let net_key = self
            .resolver()
            .subnet(net_key_index)
            .map(|subnet| subnet.active_key());

        let status = if net_key.is_some() {
            FastProvStatus::Success
        } else {
            debug!("net key {} pending", net_key_index);
            FastProvStatus::Failure
        };

        self.provisioner
            .set_fast_prov_net_key_index(net_key, net_key_index);
        status
    }

    /// Install `net_key` under the selected fast provisioning index.
    pub fn add_fast_prov_net_key(&mut self, net_key: [u8; 16]) -> FastProvStatus {
        let result = self.install_fast_prov_net_key(net_key);
        match &result {
            Ok(index) => info!("fast provisioning net key index {}", index),
            Err(err) => warn!("unable to add fast provisioning net key: {:?}", err),
        }
        (&result).into()
    }

    fn install_fast_prov_net_key(
        &mut self,
        net_key: [u8; 16],
    ) -> Result<NetKeyIndex, ProvisionerError> {
        let requested = self.provisioner.fast_prov_net_key_index();
        self.next_net_key_index.replace(requested);

        let index = self.provisioner.add_local_net_key(net_key, requested)?;

        // read back what was actually stored under the confirmed index
        let installed = self
            .provisioner
            .local_net_key(index)
            .ok_or(ProvisionerError::InvalidNetKeyIndex)?;

        self.provisioner
            .set_fast_prov_net_key_index(Some(installed), index);
        Ok(index)
    }
}
