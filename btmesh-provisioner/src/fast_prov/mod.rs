//! Fast provisioning: a node that temporarily acts as a provisioner to
//! enroll many devices with a pre-selected network key.
//!
//! [`FastProv`] coordinates the role switch between the beacon subsystem,
//! the PB-GATT bearer, the provisioner and the shared role flags.
//! [`KeyResolver`] finds keys in either the node's own tables or the
//! provisioner's, the node's own taking priority.

use crate::config::FastProvConfig;
use crate::flags::MeshFlags;
use crate::provisioner::Provisioner;
use crate::secrets::{DeviceInfo, Secrets};
use crate::ProvisionerError;
use btmesh_bearer::{BeaconControl, PbGattControl};
use btmesh_common::NetKeyIndex;
use core::fmt;

mod mode;
mod net_key;
mod resolver;

pub use resolver::KeyResolver;

/// One-byte status returned to the configuration client.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FastProvStatus {
    Success = 0x00,
    Failure = 0x01,
}

impl From<FastProvStatus> for u8 {
    fn from(status: FastProvStatus) -> Self {
        status as u8
    }
}

impl From<&ProvisionerError> for FastProvStatus {
    fn from(_: &ProvisionerError) -> Self {
        // failure causes are not distinguished on the wire
        Self::Failure
    }
}

impl<T> From<&Result<T, ProvisionerError>> for FastProvStatus {
    fn from(result: &Result<T, ProvisionerError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => err.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FastProvAction {
    Enter = 0x01,
    Suspend = 0x02,
    Exit = 0x03,
}

impl FastProvAction {
    pub fn parse(action: u8) -> Result<Self, ProvisionerError> {
        match action {
            0x01 => Ok(Self::Enter),
            0x02 => Ok(Self::Suspend),
            0x03 => Ok(Self::Exit),
            _ => Err(ProvisionerError::InvalidAction),
        }
    }

    /// The mode this action leaves the node in.
    pub fn target_mode(&self) -> FastProvMode {
        match self {
            Self::Enter => FastProvMode::ProvisionerActive,
            Self::Suspend | Self::Exit => FastProvMode::Normal,
        }
    }
}

impl fmt::Display for FastProvAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Suspend => f.write_str("suspend"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FastProvMode {
    Normal,
    ProvisionerActive,
}

impl From<&MeshFlags> for FastProvMode {
    fn from(flags: &MeshFlags) -> Self {
        if flags.contains(crate::flags::Flags::PROVISIONER) {
            Self::ProvisionerActive
        } else {
            Self::Normal
        }
    }
}

/// Fast provisioning control surface of one node.
pub struct FastProv<'f, B: BeaconControl, G: PbGattControl, P: Provisioner> {
    config: FastProvConfig,
    flags: &'f MeshFlags,
    device_info: DeviceInfo,
    secrets: Secrets,
    beacon: B,
    pb_gatt: G,
    provisioner: P,
    next_net_key_index: Option<NetKeyIndex>,
}

impl<'f, B: BeaconControl, G: PbGattControl, P: Provisioner> FastProv<'f, B, G, P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: FastProvConfig,
        flags: &'f MeshFlags,
        device_info: DeviceInfo,
        secrets: Secrets,
        beacon: B,
        pb_gatt: G,
        provisioner: P,
    ) -> Self {
        Self {
            config,
            flags,
            device_info,
            secrets,
            beacon,
            pb_gatt,
            provisioner,
            next_net_key_index: None,
        }
    }

    pub fn config(&self) -> FastProvConfig {
        self.config
    }

    pub fn mode(&self) -> FastProvMode {
        self.flags.into()
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn secrets_mut(&mut self) -> &mut Secrets {
        &mut self.secrets
    }

    pub fn beacon(&self) -> &B {
        &self.beacon
    }

    pub fn pb_gatt(&self) -> &G {
        &self.pb_gatt
    }

    pub fn provisioner(&self) -> &P {
        &self.provisioner
    }

    pub fn provisioner_mut(&mut self) -> &mut P {
        &mut self.provisioner
    }

    /// The index most recently requested for a fast provisioning net key.
    pub fn next_net_key_index(&self) -> Option<NetKeyIndex> {
        self.next_net_key_index
    }

    pub fn resolver(&self) -> KeyResolver<'_, P> {
        KeyResolver::new(&self.device_info, &self.secrets, &self.provisioner)
    }
}
