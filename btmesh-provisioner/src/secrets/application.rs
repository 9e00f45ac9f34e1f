use crate::ProvisionerError;
use btmesh_common::crypto::application::ApplicationKey;
use btmesh_common::{AppKeyIndex, NetKeyIndex};
use heapless::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An application key record, bound to the network key it was added under.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct AppKey {
    /// `None` once the owning network key has been deleted.
    net_key_index: Option<NetKeyIndex>,
    app_key_index: AppKeyIndex,
    old: ApplicationKey,
    new: Option<ApplicationKey>,
}

impl AppKey {
    pub fn new(
        net_key_index: NetKeyIndex,
        app_key_index: AppKeyIndex,
        application_key: ApplicationKey,
    ) -> Self {
        Self {
            net_key_index: Some(net_key_index),
            app_key_index,
            old: application_key,
            new: None,
        }
    }

    pub fn net_key_index(&self) -> Option<NetKeyIndex> {
        self.net_key_index
    }

    pub fn app_key_index(&self) -> AppKeyIndex {
        self.app_key_index
    }

    pub fn is_bound(&self) -> bool {
        self.net_key_index.is_some()
    }

    pub fn updated(&self) -> bool {
        self.new.is_some()
    }

    /// The key the "updated" flag selects.
    pub fn active_key(&self) -> ApplicationKey {
        self.new.unwrap_or(self.old)
    }

    pub fn update(&mut self, application_key: ApplicationKey) {
        self.new.replace(application_key);
    }

    pub fn revoke_old_key(&mut self) -> Result<(), ProvisionerError> {
        self.old = self.new.take().ok_or(ProvisionerError::InvalidState)?;
        Ok(())
    }

    pub fn unbind(&mut self) {
        self.net_key_index.take();
    }
}

#[derive(Clone, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
pub struct AppKeys<const N: usize = 4> {
    entries: Vec<Option<AppKey>, N>,
}

impl<const N: usize> Default for AppKeys<N> {
    fn default() -> Self {
        let mut entries = Vec::new();
        entries.resize(N, None).ok();
        Self { entries }
    }
}

impl<const N: usize> AppKeys<N> {
    pub fn slots(&self) -> &[Option<AppKey>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppKey> + '_ {
        self.entries.iter().flatten()
    }

    /// Only keys still bound to a network key are found.
    pub fn by_index(&self, app_key_index: AppKeyIndex) -> Option<&AppKey> {
        self.iter()
            .find(|key| key.is_bound() && key.app_key_index == app_key_index)
    }

    pub fn by_index_mut(&mut self, app_key_index: AppKeyIndex) -> Option<&mut AppKey> {
        self.entries
            .iter_mut()
            .flatten()
            .find(|key| key.is_bound() && key.app_key_index == app_key_index)
    }

    pub fn add(&mut self, app_key: AppKey) -> Result<(), ProvisionerError> {
        if self.by_index(app_key.app_key_index).is_some() {
            return Err(ProvisionerError::AppKeyIndexAlreadyStored);
        }

        // an unbound record is as good as a free slot
        let slot = self
            .entries
            .iter_mut()
            .find(|slot| !matches!(slot, Some(key) if key.is_bound()))
            .ok_or(ProvisionerError::InsufficientSpace)?;
        slot.replace(app_key);
        Ok(())
    }

    pub fn remove(&mut self, app_key_index: AppKeyIndex) -> Option<AppKey> {
        self.entries
            .iter_mut()
            .find(|slot| {
                matches!(slot, Some(key) if key.is_bound() && key.app_key_index == app_key_index)
            })
            .and_then(Option::take)
    }

    /// Mark every key bound to `net_key_index` as unused.
    pub fn unbind_net_key(&mut self, net_key_index: NetKeyIndex) {
        self.entries
            .iter_mut()
            .flatten()
            .filter(|key| key.net_key_index == Some(net_key_index))
            .for_each(AppKey::unbind);
    }
}
