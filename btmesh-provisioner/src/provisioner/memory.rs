use crate::provisioner::{Node, Provisioner};
use crate::secrets::{AppKey, AppKeys, Subnet, Subnets};
use crate::ProvisionerError;
use btmesh_bearer::ProvisioningBearer;
use btmesh_common::address::{Address, UnicastAddress};
use btmesh_common::crypto::application::ApplicationKey;
use btmesh_common::crypto::device::DeviceKey;
use btmesh_common::crypto::network::NetworkKey;
use btmesh_common::{AppKeyIndex, NetKeyIndex};
use heapless::Vec;

#[derive(Copy, Clone, Debug, Default)]
struct FastProvInfo {
    enabled: bool,
    net_key_index: Option<NetKeyIndex>,
    net_key: Option<NetworkKey>,
}

/// Provisioner state held entirely in RAM.
pub struct MemoryProvisioner<
    const SUBNETS: usize = 4,
    const APP_KEYS: usize = 8,
    const NODES: usize = 16,
> {
    primary_element_address: Option<UnicastAddress>,
    bearer: ProvisioningBearer,
    gatt_allowed: bool,
    fast_prov: FastProvInfo,
    subnets: Subnets<SUBNETS>,
    app_keys: AppKeys<APP_KEYS>,
    nodes: Vec<Node, NODES>,
}

impl<const SUBNETS: usize, const APP_KEYS: usize, const NODES: usize> Default
    for MemoryProvisioner<SUBNETS, APP_KEYS, NODES>
{
    fn default() -> Self {
        Self {
            primary_element_address: None,
            bearer: ProvisioningBearer::Advertising,
            gatt_allowed: true,
            fast_prov: Default::default(),
            subnets: Default::default(),
            app_keys: Default::default(),
            nodes: Vec::new(),
        }
    }
}

impl<const SUBNETS: usize, const APP_KEYS: usize, const NODES: usize>
    MemoryProvisioner<SUBNETS, APP_KEYS, NODES>
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provisioning_bearer(&self) -> (ProvisioningBearer, bool) {
        (self.bearer, self.gatt_allowed)
    }

    pub fn fast_prov_enabled(&self) -> bool {
        self.fast_prov.enabled
    }

    /// The fast provisioning network key, once delivered.
    pub fn fast_prov_net_key(&self) -> Option<NetworkKey> {
        self.fast_prov.net_key
    }

    pub fn add_local_app_key(
        &mut self,
        net_key_index: NetKeyIndex,
        app_key_index: AppKeyIndex,
        app_key: [u8; 16],
    ) -> Result<(), ProvisionerError> {
        if self.subnets.by_index(net_key_index).is_none() {
            return Err(ProvisionerError::InvalidNetKeyIndex);
        }
        let app_key = ApplicationKey::new(app_key);
        self.app_keys
            .add(AppKey::new(net_key_index, app_key_index, app_key))
    }

    /// Delete a network key, leaving the application keys bound to it unused.
    pub fn delete_local_net_key(&mut self, index: NetKeyIndex) -> Result<(), ProvisionerError> {
        self.subnets
            .remove(index)
            .ok_or(ProvisionerError::InvalidNetKeyIndex)?;
        self.app_keys.unbind_net_key(index);
        debug!("deleted net key {}", index);
        Ok(())
    }

    pub fn subnet_mut(&mut self, index: NetKeyIndex) -> Option<&mut Subnet> {
        self.subnets.by_index_mut(index)
    }

    pub fn app_key_mut(&mut self, index: AppKeyIndex) -> Option<&mut AppKey> {
        self.app_keys.by_index_mut(index)
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), ProvisionerError> {
        if self.nodes.iter().any(|existing| existing.overlaps(&node)) {
            return Err(ProvisionerError::InvalidAddress);
        }
        self.nodes
            .push(node)
            .map_err(|_| ProvisionerError::InsufficientSpace)?;
        debug!("added node {}", node.unicast_address());
        Ok(())
    }

    pub fn node(&self, address: UnicastAddress) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.covers(Address::Unicast(address)))
    }

    pub fn remove_node(&mut self, address: UnicastAddress) -> Option<Node> {
        let position = self
            .nodes
            .iter()
            .position(|node| node.covers(Address::Unicast(address)))?;
        Some(self.nodes.swap_remove(position))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<const SUBNETS: usize, const APP_KEYS: usize, const NODES: usize> Provisioner
    for MemoryProvisioner<SUBNETS, APP_KEYS, NODES>
{
    fn primary_element_address(&self) -> Option<UnicastAddress> {
        self.primary_element_address
    }

    fn set_primary_element_address(&mut self, address: UnicastAddress) {
        self.primary_element_address.replace(address);
    }

    fn set_provisioning_bearer(&mut self, bearer: ProvisioningBearer, gatt_allowed: bool) {
        self.bearer = bearer;
        self.gatt_allowed = gatt_allowed;
    }

    fn set_fast_prov_enabled(&mut self, enabled: bool) {
        self.fast_prov.enabled = enabled;
    }

    fn fast_prov_net_key_index(&self) -> NetKeyIndex {
        // the primary network key unless another one was selected
        self.fast_prov.net_key_index.unwrap_or_else(|| {
            self.subnets
                .iter()
                .map(Subnet::net_key_index)
                .min()
                .unwrap_or_default()
        })
    }

    fn set_fast_prov_net_key_index(&mut self, net_key: Option<NetworkKey>, index: NetKeyIndex) {
        self.fast_prov.net_key_index.replace(index);
        self.fast_prov.net_key = net_key;
    }

    fn add_local_net_key(
        &mut self,
        net_key: [u8; 16],
        index: NetKeyIndex,
    ) -> Result<NetKeyIndex, ProvisionerError> {
        if let Some(existing) = self.subnets.by_index(index) {
            // the same key delivered twice is confirmed, not duplicated,
            // whichever key refresh slot holds it
            let stored = existing.old_key().key_bytes() == net_key
                || existing.new_key().map(|key| key.key_bytes()) == Some(net_key);
            return if stored {
                Ok(index)
            } else {
                Err(ProvisionerError::NetKeyIndexAlreadyStored)
            };
        }

        let network_key = NetworkKey::new(net_key);
        self.subnets.add(Subnet::new(index, network_key))?;
        debug!("added net key {}", index);
        Ok(index)
    }

    fn local_net_key(&self, index: NetKeyIndex) -> Option<NetworkKey> {
        self.subnets.by_index(index).map(Subnet::active_key)
    }

    fn remove_all_nodes(&mut self) {
        debug!("removing {} nodes", self.nodes.len());
        self.nodes.clear();
    }

    fn device_key(&self, address: UnicastAddress) -> Option<DeviceKey> {
        self.node(address).map(Node::device_key)
    }

    fn subnets(&self) -> &[Option<Subnet>] {
        self.subnets.slots()
    }

    fn app_keys(&self) -> &[Option<AppKey>] {
        self.app_keys.slots()
    }
}
