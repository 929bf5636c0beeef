//! Listening socket setup.
//!
//! Built through socket2 rather than `TcpListener::bind` so the socket
//! options match the address family: SO_REUSEADDR for quick restarts,
//! and IPV6_V6ONLY on IPv6 binds (no dual-stack mapping of IPv4 peers).

use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create a TCP listener bound to `addr` with the configured backlog.
pub fn bind(addr: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog as i32)?;

    TcpListener::from_std(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_v4() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = bind(addr, 16).unwrap();
        let local = listener.local_addr().unwrap();
        assert!(local.is_ipv4());
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_ephemeral_v6() {
        let addr: SocketAddr = "[::1]:0".parse().unwrap();
        // Environments without IPv6 loopback can't exercise this path
        let Ok(listener) = bind(addr, 16) else { return };
        assert!(listener.local_addr().unwrap().is_ipv6());
    }
}
