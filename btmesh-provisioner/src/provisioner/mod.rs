use crate::secrets::{AppKey, Subnet};
use crate::ProvisionerError;
use btmesh_bearer::ProvisioningBearer;
use btmesh_common::address::{Address, UnicastAddress};
use btmesh_common::crypto::device::DeviceKey;
use btmesh_common::crypto::network::NetworkKey;
use btmesh_common::NetKeyIndex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryProvisioner;

/// The provisioner role's own state: the keys it has learned or been
/// assigned, the nodes it has provisioned, and its fast provisioning settings.
pub trait Provisioner {
    fn primary_element_address(&self) -> Option<UnicastAddress>;

    fn set_primary_element_address(&mut self, address: UnicastAddress);

    fn set_provisioning_bearer(&mut self, bearer: ProvisioningBearer, gatt_allowed: bool);

    fn set_fast_prov_enabled(&mut self, enabled: bool);

    fn fast_prov_net_key_index(&self) -> NetKeyIndex;

    /// Select the network key used for fast provisioning. `net_key` is
    /// `None` while the key itself has not been delivered yet.
    fn set_fast_prov_net_key_index(&mut self, net_key: Option<NetworkKey>, index: NetKeyIndex);

    /// Store a network key, returning the index it was stored under.
    fn add_local_net_key(
        &mut self,
        net_key: [u8; 16],
        index: NetKeyIndex,
    ) -> Result<NetKeyIndex, ProvisionerError>;

    fn local_net_key(&self, index: NetKeyIndex) -> Option<NetworkKey>;

    /// Forget every provisioned node.
    fn remove_all_nodes(&mut self);

    fn device_key(&self, address: UnicastAddress) -> Option<DeviceKey>;

    /// Provisioner-owned network keys. Free slots are `None`.
    fn subnets(&self) -> &[Option<Subnet>];

    /// Provisioner-owned application keys. Free slots are `None`.
    fn app_keys(&self) -> &[Option<AppKey>];
}

/// A node enrolled by this provisioner.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct Node {
    unicast_address: UnicastAddress,
    number_of_elements: u8,
    net_key_index: NetKeyIndex,
    device_key: DeviceKey,
}

impl Node {
    pub fn new(
        unicast_address: UnicastAddress,
        number_of_elements: u8,
        net_key_index: NetKeyIndex,
        device_key: DeviceKey,
    ) -> Result<Self, ProvisionerError> {
        if number_of_elements == 0
            || unicast_address
                .checked_add(number_of_elements - 1)
                .is_none()
        {
            return Err(ProvisionerError::InvalidAddress);
        }
        Ok(Self {
            unicast_address,
            number_of_elements,
            net_key_index,
            device_key,
        })
    }

    pub fn unicast_address(&self) -> UnicastAddress {
        self.unicast_address
    }

    pub fn number_of_elements(&self) -> u8 {
        self.number_of_elements
    }

    pub fn net_key_index(&self) -> NetKeyIndex {
        self.net_key_index
    }

    pub fn device_key(&self) -> DeviceKey {
        self.device_key
    }

    /// Whether `address` belongs to one of this node's elements.
    pub fn covers(&self, address: Address) -> bool {
        match address {
            Address::Unicast(address) if address >= self.unicast_address => {
                address - self.unicast_address < self.number_of_elements as u16
            }
            _ => false,
        }
    }

    fn last_address(&self) -> UnicastAddress {
        // a deserialized record may not have gone through `Node::new`
        self.unicast_address + self.number_of_elements.saturating_sub(1)
    }

    fn overlaps(&self, other: &Node) -> bool {
        self.unicast_address <= other.last_address() && other.unicast_address <= self.last_address()
    }
}
