use log::trace;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NetInterfaceFamily {
    IP,
    IPV6,
}

/// One address entry of the OS interface table.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct NetInterface {
    pub name: String,
    pub family: NetInterfaceFamily,
    pub address: String,
    /// Loopback or otherwise host-local, as reported by the OS.
    pub internal: bool,
}

impl NetInterface {
    pub fn new(name: &str, family: NetInterfaceFamily, address: &str, internal: bool) -> NetInterface {
        NetInterface {
            name: name.to_string(),
            family,
            address: address.to_string(),
            internal,
        }
    }

    fn is_external_ipv4(&self) -> bool {
        self.family == NetInterfaceFamily::IP && !self.internal
    }
}

/// Returns all external IPv4 interfaces, keeping the given order.
pub fn local_ipv4_candidates(interfaces: &[NetInterface]) -> Vec<&NetInterface> {
    interfaces
        .iter()
        .filter(|iface| {
            trace!(
                "NET: {} {:?} {} internal={}",
                iface.name,
                iface.family,
                iface.address,
                iface.internal
            );
            iface.is_external_ipv4()
        })
        .collect()
}

/// Address of the first external IPv4 interface, or None if there is none.
pub fn find_local_ipv4(interfaces: &[NetInterface]) -> Option<String> {
    interfaces
        .iter()
        .find(|iface| iface.is_external_ipv4())
        .map(|iface| iface.address.clone())
}
