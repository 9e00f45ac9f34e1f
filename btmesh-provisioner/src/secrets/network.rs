use crate::ProvisionerError;
use btmesh_common::crypto::network::NetworkKey;
use btmesh_common::NetKeyIndex;
use heapless::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A network key record.
///
/// The old slot is always populated. During a key refresh the new slot is
/// filled first, and only selected once the key-refresh flag is raised.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct Subnet {
    net_key_index: NetKeyIndex,
    key_refresh: bool,
    old: NetworkKey,
    new: Option<NetworkKey>,
}

impl Subnet {
    pub fn new(net_key_index: NetKeyIndex, network_key: NetworkKey) -> Self {
        Self {
            net_key_index,
            key_refresh: false,
            old: network_key,
            new: None,
        }
    }

    pub fn net_key_index(&self) -> NetKeyIndex {
        self.net_key_index
    }

    pub fn key_refresh(&self) -> bool {
        self.key_refresh
    }

    pub fn old_key(&self) -> NetworkKey {
        self.old
    }

    pub fn new_key(&self) -> Option<NetworkKey> {
        self.new
    }

    /// The key the key-refresh flag selects.
    pub fn active_key(&self) -> NetworkKey {
        match (self.key_refresh, self.new) {
            (true, Some(new)) => new,
            _ => self.old,
        }
    }

    /// Key refresh phase 1: distribute the new key without using it yet.
    pub fn update_key(&mut self, network_key: NetworkKey) {
        self.new.replace(network_key);
    }

    /// Key refresh phase 2: start using the new key.
    pub fn use_new_key(&mut self) -> Result<(), ProvisionerError> {
        if self.new.is_none() {
            return Err(ProvisionerError::InvalidState);
        }
        self.key_refresh = true;
        Ok(())
    }

    /// Key refresh phase 3: the new key replaces the old one.
    pub fn revoke_old_key(&mut self) -> Result<(), ProvisionerError> {
        let new = self.new.take().ok_or(ProvisionerError::InvalidState)?;
        self.old = new;
        self.key_refresh = false;
        Ok(())
    }
}

#[derive(Clone, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct Subnets<const N: usize = 4> {
    entries: Vec<Option<Subnet>, N>,
}

impl<const N: usize> Default for Subnets<N> {
    fn default() -> Self {
        let mut entries = Vec::new();
        entries.resize(N, None).ok();
        Self { entries }
    }
}

impl<const N: usize> Subnets<N> {
    /// Every slot, free ones included, in table order.
    pub fn slots(&self) -> &[Option<Subnet>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subnet> + '_ {
        self.entries.iter().flatten()
    }

    pub fn by_index(&self, net_key_index: NetKeyIndex) -> Option<&Subnet> {
        self.iter()
            .find(|subnet| subnet.net_key_index == net_key_index)
    }

    pub fn by_index_mut(&mut self, net_key_index: NetKeyIndex) -> Option<&mut Subnet> {
        self.entries
            .iter_mut()
            .flatten()
            .find(|subnet| subnet.net_key_index == net_key_index)
    }

    pub fn add(&mut self, subnet: Subnet) -> Result<(), ProvisionerError> {
        if self.by_index(subnet.net_key_index).is_some() {
            return Err(ProvisionerError::NetKeyIndexAlreadyStored);
        }

        let slot = self
            .entries
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(ProvisionerError::InsufficientSpace)?;
        slot.replace(subnet);
        Ok(())
    }

    pub fn remove(&mut self, net_key_index: NetKeyIndex) -> Option<Subnet> {
        self.entries
            .iter_mut()
            .find(|slot| matches!(slot, Some(subnet) if subnet.net_key_index == net_key_index))
            .and_then(Option::take)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
