//! OS 리졸버를 사용하는 DNS 조회 어댑터.

use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::application::error::CommandError;
use crate::application::ports::HostResolver;

pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>, CommandError> {
        let lookup_failed = |reason: String| CommandError::Lookup {
            name: name.to_string(),
            reason,
        };

        let addrs = timeout(self.timeout, tokio::net::lookup_host((name, 0)))
            .await
            .map_err(|_| CommandError::timeout(format!("lookup of '{name}'"), self.timeout))?
            .map_err(|err| lookup_failed(err.to_string()))?;

        let mut ips = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }
        if ips.is_empty() {
            return Err(lookup_failed("no addresses".to_string()));
        }
        Ok(ips)
    }

    async fn reverse(&self, ip: IpAddr) -> Result<Option<String>, CommandError> {
        let task = tokio::task::spawn_blocking(move || reverse_blocking(ip));
        timeout(self.timeout, task)
            .await
            .map_err(|_| CommandError::timeout(format!("reverse lookup of {ip}"), self.timeout))?
            .map_err(|err| CommandError::Io(io::Error::other(err)))
    }
}

#[cfg(unix)]
fn reverse_blocking(ip: IpAddr) -> Option<String> {
    use std::ffi::CStr;
    use std::mem;

    const MAX_HOST: usize = 1025;
    let mut host = [0 as libc::c_char; MAX_HOST];

    // SAFETY: sockaddr 구조체는 0으로 초기화한 뒤 필요한 필드만 채운다.
    // host 버퍼 길이를 그대로 넘기므로 getnameinfo가 범위를 넘겨 쓰지 않는다.
    let rc = unsafe {
        match ip {
            IpAddr::V4(v4) => {
                let mut sa: libc::sockaddr_in = mem::zeroed();
                sa.sin_family = libc::AF_INET as libc::sa_family_t;
                sa.sin_addr = libc::in_addr {
                    s_addr: u32::from_ne_bytes(v4.octets()),
                };
                libc::getnameinfo(
                    &sa as *const libc::sockaddr_in as *const libc::sockaddr,
                    mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
                    host.as_mut_ptr(),
                    MAX_HOST as _,
                    std::ptr::null_mut(),
                    0,
                    libc::NI_NAMEREQD,
                )
            }
            IpAddr::V6(v6) => {
                let mut sa: libc::sockaddr_in6 = mem::zeroed();
                sa.sin6_family = libc::AF_INET6 as libc::sa_family_t;
                sa.sin6_addr = libc::in6_addr {
                    s6_addr: v6.octets(),
                };
                libc::getnameinfo(
                    &sa as *const libc::sockaddr_in6 as *const libc::sockaddr,
                    mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t,
                    host.as_mut_ptr(),
                    MAX_HOST as _,
                    std::ptr::null_mut(),
                    0,
                    libc::NI_NAMEREQD,
                )
            }
        }
    };
    if rc != 0 {
        return None;
    }

    // SAFETY: 성공 시 host는 NUL로 끝나는 문자열이다.
    let name = unsafe { CStr::from_ptr(host.as_ptr()) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn reverse_blocking(_ip: IpAddr) -> Option<String> {
    None
}
