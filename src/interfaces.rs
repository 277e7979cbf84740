use crate::{
    error::Result,
    net::{NetInterface, NetInterfaceFamily},
};
use log::{debug, trace};
use nix::{
    ifaddrs::{getifaddrs, InterfaceAddress},
    net::if_::InterfaceFlags,
};
use std::net::Ipv4Addr;

/// Anything that can hand out an interface table in OS order.
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<NetInterface>>;
}

/// The host's interface table, read with getifaddrs(3) on every call.
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetInterface>> {
        let interfaces: Vec<NetInterface> = getifaddrs()?
            .filter_map(|ifaddr| to_net_interface(&ifaddr))
            .collect();
        debug!("IF: {} address entries found", interfaces.len());
        Ok(interfaces)
    }
}

impl InterfaceSource for [NetInterface] {
    fn interfaces(&self) -> Result<Vec<NetInterface>> {
        Ok(self.to_vec())
    }
}

impl InterfaceSource for Vec<NetInterface> {
    fn interfaces(&self) -> Result<Vec<NetInterface>> {
        self.as_slice().interfaces()
    }
}

/// Converts one getifaddrs entry. Entries of interfaces that are down or have
/// no carrier, and entries without an IP address (link layer, no address
/// assigned), are dropped.
fn to_net_interface(ifaddr: &InterfaceAddress) -> Option<NetInterface> {
    if !ifaddr
        .flags
        .contains(InterfaceFlags::IFF_UP | InterfaceFlags::IFF_RUNNING)
    {
        trace!("IF: {} skipped, not up and running", ifaddr.interface_name);
        return None;
    }
    let address = ifaddr.address.as_ref()?;
    let internal = ifaddr.flags.contains(InterfaceFlags::IFF_LOOPBACK);

    if let Some(sin) = address.as_sockaddr_in() {
        let ip = Ipv4Addr::from(sin.ip());
        return Some(NetInterface::new(
            &ifaddr.interface_name,
            NetInterfaceFamily::IP,
            &ip.to_string(),
            internal,
        ));
    }
    if let Some(sin6) = address.as_sockaddr_in6() {
        return Some(NetInterface::new(
            &ifaddr.interface_name,
            NetInterfaceFamily::IPV6,
            &sin6.ip().to_string(),
            internal,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{to_net_interface, InterfaceSource, SystemInterfaces};
    use crate::net::{find_local_ipv4, NetInterface, NetInterfaceFamily};
    use nix::{ifaddrs::InterfaceAddress, net::if_::InterfaceFlags, sys::socket::SockaddrStorage};
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

    fn up_running() -> InterfaceFlags {
        InterfaceFlags::IFF_UP | InterfaceFlags::IFF_RUNNING
    }

    fn v4_addr(a: u8, b: u8, c: u8, d: u8) -> SockaddrStorage {
        SockaddrStorage::from(SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), 0))
    }

    fn ifaddr(name: &str, flags: InterfaceFlags, address: Option<SockaddrStorage>) -> InterfaceAddress {
        InterfaceAddress {
            interface_name: name.to_string(),
            flags,
            address,
            netmask: None,
            broadcast: None,
            destination: None,
        }
    }

    #[test]
    fn test_ipv4_entry() {
        let entry = ifaddr("eth0", up_running(), Some(v4_addr(192, 168, 0, 12)));
        assert_eq!(
            Some(NetInterface::new("eth0", NetInterfaceFamily::IP, "192.168.0.12", false)),
            to_net_interface(&entry)
        );
    }

    #[test]
    fn test_loopback_is_internal() {
        let entry = ifaddr(
            "lo",
            up_running() | InterfaceFlags::IFF_LOOPBACK,
            Some(v4_addr(127, 0, 0, 1)),
        );
        let iface = to_net_interface(&entry).unwrap();
        assert!(iface.internal);
        assert_eq!("127.0.0.1", iface.address);
    }

    #[test]
    fn test_ipv6_entry() {
        let addr = SockaddrStorage::from(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 0, 0, 0));
        let entry = ifaddr("lo", up_running() | InterfaceFlags::IFF_LOOPBACK, Some(addr));
        let iface = to_net_interface(&entry).unwrap();
        assert_eq!(NetInterfaceFamily::IPV6, iface.family);
        assert_eq!("::1", iface.address);
    }

    #[test]
    fn test_entry_without_address() {
        let entry = ifaddr("eth1", up_running(), None);
        assert_eq!(None, to_net_interface(&entry));
    }

    #[test]
    fn test_down_or_not_running_entries_dropped() {
        let entries = vec![
            ifaddr("docker0", InterfaceFlags::IFF_UP, Some(v4_addr(172, 17, 0, 1))),
            ifaddr("eth1", InterfaceFlags::empty(), Some(v4_addr(10, 9, 9, 9))),
            ifaddr("eth2", InterfaceFlags::IFF_RUNNING, Some(v4_addr(10, 8, 8, 8))),
            ifaddr("wlan0", up_running(), Some(v4_addr(192, 168, 1, 20))),
        ];
        let table: Vec<NetInterface> = entries.iter().filter_map(to_net_interface).collect();
        let names: Vec<&str> = table.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(vec!["wlan0"], names);
        assert_eq!(Some("192.168.1.20".to_string()), find_local_ipv4(&table));
    }

    #[test]
    fn test_only_stale_entries_give_none() {
        let entries = vec![
            ifaddr("lo", up_running() | InterfaceFlags::IFF_LOOPBACK, Some(v4_addr(127, 0, 0, 1))),
            ifaddr("docker0", InterfaceFlags::IFF_UP, Some(v4_addr(172, 17, 0, 1))),
        ];
        let table: Vec<NetInterface> = entries.iter().filter_map(to_net_interface).collect();
        assert_eq!(None, find_local_ipv4(&table));
    }

    #[test]
    fn test_captured_table() {
        let table = vec![
            NetInterface::new("lo", NetInterfaceFamily::IP, "127.0.0.1", true),
            NetInterface::new("eth0", NetInterfaceFamily::IP, "10.0.0.5", false),
        ];
        assert_eq!(table, table.interfaces().unwrap());
        assert_eq!(table[1..].to_vec(), table[1..].interfaces().unwrap());
    }

    #[test]
    fn test_system_lookup_is_idempotent() {
        let first = SystemInterfaces.interfaces().unwrap();
        let second = SystemInterfaces.interfaces().unwrap();
        assert_eq!(find_local_ipv4(&first), find_local_ipv4(&second));
        assert!(first.iter().all(|i| !i.address.is_empty()));
    }
}
