use crate::ProvisionerError;
use btmesh_common::address::UnicastAddress;
use btmesh_common::crypto::device::DeviceKey;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod application;
pub mod network;

pub use application::{AppKey, AppKeys};
pub use network::{Subnet, Subnets};

/// Addressing of this node's own elements.
#[derive(Copy, Clone, Hash, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct DeviceInfo {
    number_of_elements: u8,
    primary_unicast_address: UnicastAddress,
}

impl DeviceInfo {
    pub fn new(
        primary_unicast_address: UnicastAddress,
        number_of_elements: u8,
    ) -> Result<Self, ProvisionerError> {
        if number_of_elements == 0
            || primary_unicast_address
                .checked_add(number_of_elements - 1)
                .is_none()
        {
            return Err(ProvisionerError::InvalidAddress);
        }
        Ok(Self {
            number_of_elements,
            primary_unicast_address,
        })
    }

    pub fn primary_unicast_address(&self) -> UnicastAddress {
        self.primary_unicast_address
    }

    pub fn number_of_elements(&self) -> u8 {
        self.number_of_elements
    }
}

/// The keys this node holds as an ordinary network member.
#[derive(Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Secrets {
    device_key: DeviceKey,
    network_keys: Subnets,
    application_keys: AppKeys,
}

impl Secrets {
    pub fn new(device_key: DeviceKey) -> Self {
        Self {
            device_key,
            network_keys: Default::default(),
            application_keys: Default::default(),
        }
    }

    pub fn device_key(&self) -> DeviceKey {
        self.device_key
    }

    pub fn network_keys(&self) -> &Subnets {
        &self.network_keys
    }

    pub fn network_keys_mut(&mut self) -> &mut Subnets {
        &mut self.network_keys
    }

    pub fn application_keys(&self) -> &AppKeys {
        &self.application_keys
    }

    pub fn application_keys_mut(&mut self) -> &mut AppKeys {
        &mut self.application_keys
    }
}
