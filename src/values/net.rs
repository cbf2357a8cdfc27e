use crate::{Bound, Field, Value, ValueError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};

impl Value for SocketAddr {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        if let Ok(addr) = raw.parse::<SocketAddr>() {
            *self = addr;
            return Ok(());
        }
        // Not a literal, so try resolving it, e.g. `localhost:8080`
        let mut resolved = raw
            .to_socket_addrs()
            .map_err(|err| ValueError::parse("tcpAddr", raw, err))?;
        *self = resolved
            .next()
            .ok_or_else(|| ValueError::parse("tcpAddr", raw, "no addresses found"))?;
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string()
    }
    fn type_name(&self) -> String {
        "tcpAddr".into()
    }
}

macro_rules! ip_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Value for $ty {
                fn set(&mut self, raw: &str) -> Result<(), ValueError> {
                    *self = raw.parse::<$ty>().map_err(|err| ValueError::parse($name, raw, err))?;
                    Ok(())
                }
                fn render(&self) -> String {
                    self.to_string()
                }
                fn type_name(&self) -> String {
                    $name.into()
                }
            }
        )*
    };
}

ip_value! {
    IpAddr => "ip",
    Ipv4Addr => "ipv4",
    Ipv6Addr => "ipv6",
}

// Addresses have no `Default`, an absent `Option` of one starts out unspecified
macro_rules! addr_field {
    ($($ty:ty => $unspecified:expr),* $(,)?) => {
        $(
            impl Field for $ty {
                fn bind(&mut self) -> Bound<'_> {
                    Bound::Value(Box::new(self))
                }

                fn absent() -> Option<Self> {
                    Some($unspecified)
                }
            }
        )*
    };
}

addr_field! {
    SocketAddr => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
    IpAddr => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    Ipv4Addr => Ipv4Addr::UNSPECIFIED,
    Ipv6Addr => Ipv6Addr::UNSPECIFIED,
}
