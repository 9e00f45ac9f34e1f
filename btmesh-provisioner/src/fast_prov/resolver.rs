use crate::provisioner::Provisioner;
use crate::secrets::{AppKey, DeviceInfo, Secrets, Subnet};
use crate::ProvisionerError;
use btmesh_common::address::{Address, UnicastAddress};
use btmesh_common::crypto::device::DeviceKey;
use btmesh_common::{AppKeyIndex, NetKeyIndex};

/// Looks keys up in the node's own tables, then in the provisioner's.
///
/// An index present in both resolves to the node's own entry.
pub struct KeyResolver<'r, P: Provisioner> {
    device_info: &'r DeviceInfo,
    local: &'r Secrets,
    provisioner: &'r P,
}

/// First entry matching `predicate`, scanning `tables` in order and
/// skipping free slots.
fn first_match<'t, T>(
    tables: [&'t [Option<T>]; 2],
    predicate: impl Fn(&T) -> bool,
) -> Option<&'t T> {
    tables
        .into_iter()
        .flat_map(|table| table.iter().flatten())
        .find(|entry| predicate(entry))
}

impl<'r, P: Provisioner> KeyResolver<'r, P> {
    pub fn new(device_info: &'r DeviceInfo, local: &'r Secrets, provisioner: &'r P) -> Self {
        Self {
            device_info,
            local,
            provisioner,
        }
    }

    /// The device key for `address`: this node's own for its primary
    /// element address, otherwise the one recorded for a provisioned node.
    pub fn device_key<A: Into<Address>>(
        &self,
        address: A,
    ) -> Result<Option<DeviceKey>, ProvisionerError> {
        let address = address.into();
        let address = UnicastAddress::try_from(address).map_err(|err| {
            error!("not a unicast address: {:#x}", u16::from(address));
            err
        })?;

        if address == self.device_info.primary_unicast_address() {
            return Ok(Some(self.local.device_key()));
        }

        Ok(self.provisioner.device_key(address))
    }

    pub fn subnet(&self, net_key_index: NetKeyIndex) -> Option<&'r Subnet> {
        first_match(
            [
                self.local.network_keys().slots(),
                self.provisioner.subnets(),
            ],
            |subnet| subnet.net_key_index() == net_key_index,
        )
    }

    /// Application keys bound to a deleted network key never match.
    pub fn app_key(&self, app_key_index: AppKeyIndex) -> Option<&'r AppKey> {
        first_match(
            [
                self.local.application_keys().slots(),
                self.provisioner.app_keys(),
            ],
            |app_key| app_key.is_bound() && app_key.app_key_index() == app_key_index,
        )
    }

    /// Bytes of the network key the subnet's key-refresh flag selects.
    pub fn net_key_bytes(&self, net_key_index: NetKeyIndex) -> Option<[u8; 16]> {
        let subnet = self.subnet(net_key_index);
        if subnet.is_none() {
            warn!("net key index {} does not exist", net_key_index);
        }
        subnet.map(|subnet| subnet.active_key().key_bytes())
    }

    /// Bytes of the application key its "updated" flag selects.
    ///
    /// The lookup is keyed by `app_key_index` alone; `net_key_index` is not
    /// used to narrow it.
    pub fn app_key_bytes(
        &self,
        net_key_index: NetKeyIndex,
        app_key_index: AppKeyIndex,
    ) -> Option<[u8; 16]> {
        let app_key = self.app_key(app_key_index);
        if app_key.is_none() {
            warn!(
                "app key index {} (net key index {}) does not exist",
                app_key_index, net_key_index
            );
        }
        app_key.map(|app_key| app_key.active_key().key_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::KeyResolver;
    use crate::provisioner::{MemoryProvisioner, Node, Provisioner};
    use crate::secrets::{AppKey, DeviceInfo, Secrets, Subnet};
    use crate::ProvisionerError;
    use btmesh_common::address::{Address, UnicastAddress};
    use btmesh_common::crypto::application::ApplicationKey;
    use btmesh_common::crypto::device::DeviceKey;
    use btmesh_common::crypto::network::NetworkKey;
    use btmesh_common::{AppKeyIndex, NetKeyIndex};
    use rand_core::{OsRng, RngCore};

    const OWN_DEVICE_KEY: [u8; 16] = [0xDD; 16];

    fn net(index: u16) -> NetKeyIndex {
        NetKeyIndex::new(index).unwrap()
    }

    fn app(index: u16) -> AppKeyIndex {
        AppKeyIndex::new(index).unwrap()
    }

    fn random_key() -> [u8; 16] {
        let mut key = [0; 16];
        OsRng.fill_bytes(&mut key);
        key
    }

    fn device_info() -> DeviceInfo {
        DeviceInfo::new(UnicastAddress::new(0x0001).unwrap(), 2).unwrap()
    }

    fn local_with_subnets(indexes: &[(u16, [u8; 16])]) -> Secrets {
        let mut secrets = Secrets::new(DeviceKey::new(OWN_DEVICE_KEY));
        for (index, key) in indexes {
            secrets
                .network_keys_mut()
                .add(Subnet::new(net(*index), NetworkKey::new(*key)))
                .unwrap();
        }
        secrets
    }

    #[test]
    fn subnet_priority() {
        let local_key = random_key();
        let shared_local_key = random_key();
        let provisioner_key = random_key();
        let shared_provisioner_key = random_key();

        let local = local_with_subnets(&[(1, local_key), (5, shared_local_key)]);
        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner.add_local_net_key(provisioner_key, net(2)).unwrap();
        provisioner
            .add_local_net_key(shared_provisioner_key, net(5))
            .unwrap();

        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);

        // local only
        assert_eq!(Some(local_key), resolver.net_key_bytes(net(1)));
        // provisioner only
        assert_eq!(Some(provisioner_key), resolver.net_key_bytes(net(2)));
        // both: local wins
        assert_eq!(Some(shared_local_key), resolver.net_key_bytes(net(5)));
        // neither
        assert!(resolver.subnet(net(3)).is_none());
        assert_eq!(None, resolver.net_key_bytes(net(3)));
    }

    #[test]
    fn free_local_slots_are_skipped() {
        let provisioner_key = random_key();
        let mut local = local_with_subnets(&[(0, random_key()), (1, random_key())]);
        local.network_keys_mut().remove(net(0));

        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner.add_local_net_key(provisioner_key, net(0)).unwrap();

        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);
        assert_eq!(Some(provisioner_key), resolver.net_key_bytes(net(0)));
    }

    #[test]
    fn net_key_bytes_follow_key_refresh_flag() {
        let old = random_key();
        let new = random_key();
        let mut local = local_with_subnets(&[(0, old)]);
        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner.add_local_net_key(old, net(1)).unwrap();

        let subnet = local.network_keys_mut().by_index_mut(net(0)).unwrap();
        subnet.update_key(NetworkKey::new(new));
        let provisioner_subnet = provisioner.subnet_mut(net(1)).unwrap();
        provisioner_subnet.update_key(NetworkKey::new(new));

        {
            let info = device_info();
            let resolver = KeyResolver::new(&info, &local, &provisioner);
            assert_eq!(Some(old), resolver.net_key_bytes(net(0)));
            assert_eq!(Some(old), resolver.net_key_bytes(net(1)));
        }

        local
            .network_keys_mut()
            .by_index_mut(net(0))
            .unwrap()
            .use_new_key()
            .unwrap();
        provisioner.subnet_mut(net(1)).unwrap().use_new_key().unwrap();

        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);
        assert_eq!(Some(new), resolver.net_key_bytes(net(0)));
        assert_eq!(Some(new), resolver.net_key_bytes(net(1)));
    }

    #[test]
    fn app_key_priority_and_binding() {
        let local_app = random_key();
        let provisioner_app = random_key();
        let mut local = local_with_subnets(&[(0, random_key())]);
        local
            .application_keys_mut()
            .add(AppKey::new(
                net(0),
                app(1),
                ApplicationKey::new(local_app),
            ))
            .unwrap();

        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner.add_local_net_key(random_key(), net(2)).unwrap();
        provisioner
            .add_local_app_key(net(2), app(1), provisioner_app)
            .unwrap();
        provisioner
            .add_local_app_key(net(2), app(7), provisioner_app)
            .unwrap();

        {
            let info = device_info();
            let resolver = KeyResolver::new(&info, &local, &provisioner);
            assert_eq!(Some(local_app), resolver.app_key_bytes(net(0), app(1)));
            // the net key index argument does not narrow the lookup
            assert_eq!(Some(local_app), resolver.app_key_bytes(net(9), app(1)));
            assert_eq!(Some(provisioner_app), resolver.app_key_bytes(net(2), app(7)));
            assert_eq!(None, resolver.app_key_bytes(net(0), app(8)));
        }

        // the local key loses its network key: the provisioner's entry is next
        local.application_keys_mut().unbind_net_key(net(0));
        {
            let info = device_info();
            let resolver = KeyResolver::new(&info, &local, &provisioner);
            assert_eq!(Some(provisioner_app), resolver.app_key_bytes(net(0), app(1)));
        }

        provisioner.delete_local_net_key(net(2)).unwrap();
        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);
        assert!(resolver.app_key(app(1)).is_none());
        assert!(resolver.app_key(app(7)).is_none());
    }

    #[test]
    fn app_key_bytes_follow_updated_flag() {
        let old = random_key();
        let new = random_key();
        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner.add_local_net_key(random_key(), net(0)).unwrap();
        provisioner.add_local_app_key(net(0), app(3), old).unwrap();

        let local = Secrets::new(DeviceKey::new(OWN_DEVICE_KEY));
        {
            let info = device_info();
            let resolver = KeyResolver::new(&info, &local, &provisioner);
            assert_eq!(Some(old), resolver.app_key_bytes(net(0), app(3)));
        }

        provisioner
            .app_key_mut(app(3))
            .unwrap()
            .update(ApplicationKey::new(new));
        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);
        assert_eq!(Some(new), resolver.app_key_bytes(net(0), app(3)));
    }

    #[test]
    fn device_key_resolution() {
        let node_key = random_key();
        let local = Secrets::new(DeviceKey::new(OWN_DEVICE_KEY));
        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        provisioner
            .add_node(
                Node::new(
                    UnicastAddress::new(0x0010).unwrap(),
                    2,
                    net(0),
                    DeviceKey::new(node_key),
                )
                .unwrap(),
            )
            .unwrap();

        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);

        assert_eq!(
            Ok(Some(DeviceKey::new(OWN_DEVICE_KEY))),
            resolver.device_key(UnicastAddress::new(0x0001).unwrap())
        );
        assert_eq!(
            Ok(Some(DeviceKey::new(node_key))),
            resolver.device_key(Address::from(0x0011))
        );
        assert_eq!(Ok(None), resolver.device_key(Address::from(0x0020)));
    }

    #[test]
    fn own_primary_address_never_reaches_provisioner_table() {
        let local = Secrets::new(DeviceKey::new(OWN_DEVICE_KEY));
        let mut provisioner: MemoryProvisioner = MemoryProvisioner::new();
        // a stale record claiming this node's own address
        provisioner
            .add_node(
                Node::new(
                    UnicastAddress::new(0x0001).unwrap(),
                    1,
                    net(0),
                    DeviceKey::new([0x11; 16]),
                )
                .unwrap(),
            )
            .unwrap();

        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);
        assert_eq!(
            Ok(Some(DeviceKey::new(OWN_DEVICE_KEY))),
            resolver.device_key(Address::from(0x0001))
        );
    }

    #[test]
    fn device_key_rejects_non_unicast() {
        let local = Secrets::new(DeviceKey::new(OWN_DEVICE_KEY));
        let provisioner = PanickingProvisioner;
        let info = device_info();
        let resolver = KeyResolver::new(&info, &local, &provisioner);

        for address in [0x0000, 0x8000, 0xC000, 0xFFFF] {
            assert_eq!(
                Err(ProvisionerError::InvalidAddress),
                resolver.device_key(Address::from(address))
            );
        }
    }

    /// Fails the test if any table is consulted.
    struct PanickingProvisioner;

    impl Provisioner for PanickingProvisioner {
        fn primary_element_address(&self) -> Option<UnicastAddress> {
            unreachable!()
        }

        fn set_primary_element_address(&mut self, _: UnicastAddress) {
            unreachable!()
        }

        fn set_provisioning_bearer(&mut self, _: btmesh_bearer::ProvisioningBearer, _: bool) {
            unreachable!()
        }

        fn set_fast_prov_enabled(&mut self, _: bool) {
            unreachable!()
        }

        fn fast_prov_net_key_index(&self) -> NetKeyIndex {
            unreachable!()
        }

        fn set_fast_prov_net_key_index(&mut self, _: Option<NetworkKey>, _: NetKeyIndex) {
            unreachable!()
        }

        fn add_local_net_key(
            &mut self,
            _: [u8; 16],
            _: NetKeyIndex,
        ) -> Result<NetKeyIndex, ProvisionerError> {
            unreachable!()
        }

        fn local_net_key(&self, _: NetKeyIndex) -> Option<NetworkKey> {
            unreachable!()
        }

        fn remove_all_nodes(&mut self) {
            unreachable!()
        }

        fn device_key(&self, _: UnicastAddress) -> Option<DeviceKey> {
            unreachable!("non-unicast address reached the device key table")
        }

        fn subnets(&self) -> &[Option<Subnet>] {
            unreachable!()
        }

        fn app_keys(&self) -> &[Option<AppKey>] {
            unreachable!()
        }
    }
}
