//! Per-process signature byte.
//!
//! Every ID generated by a process carries the same signature byte: the first
//! byte of `SHA-256(host_id + decimal(pid))`. The host id is looked up once,
//! through a fallback chain:
//!
//! 1. the platform machine id ([`MachineId`]),
//! 2. the hostname ([`Hostname`]),
//! 3. a random `u32` drawn from the operating system.
//!
//! Lookup failures are not errors; only failing the last step is, which
//! yields [`Error::InitializationFault`].

use crate::{Error, Result};
use ::rand::TryRngCore;
use ::rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use std::io;
use std::sync::OnceLock;

static PROCESS_SIGNATURE: OnceLock<Result<Signature>> = OnceLock::new();

/// A host lookup used as input to the process signature.
///
/// Implementations return an opaque string identifying the host. Empty
/// strings are treated as a failed lookup.
pub trait HostId {
    /// Reads the host identifier.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the identifier is unavailable on this host.
    fn read_host_id(&self) -> io::Result<String>;
}

/// The platform machine identifier.
///
/// - Linux: `/var/lib/dbus/machine-id`, then `/etc/machine-id`
/// - macOS: `IOPlatformUUID` as reported by `ioreg`
/// - FreeBSD: `/etc/hostid`, then the `smbios.system.uuid` kernel variable
/// - Windows: the `MachineGuid` registry value
///
/// Other platforms report [`io::ErrorKind::Unsupported`].
#[derive(Default, Clone, Copy, Debug)]
pub struct MachineId;

impl HostId for MachineId {
    fn read_host_id(&self) -> io::Result<String> {
        platform::machine_id()
    }
}

/// The system hostname.
#[derive(Default, Clone, Copy, Debug)]
pub struct Hostname;

impl HostId for Hostname {
    fn read_host_id(&self) -> io::Result<String> {
        platform::hostname()
    }
}

/// The signature byte embedded at offset 6 of every [`Rid`](crate::Rid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Signature(u8);

impl Signature {
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Hashes a host identifier and process id into a signature.
    ///
    /// # Example
    ///
    /// ```
    /// use rid::Signature;
    ///
    /// let a = Signature::from_host("build-box", 4242);
    /// let b = Signature::from_host("build-box", 4242);
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn from_host(host_id: &str, pid: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(host_id.as_bytes());
        hasher.update(pid.to_string().as_bytes());
        Self(hasher.finalize()[0])
    }

    /// Derives a signature from the first host lookup that succeeds, falling
    /// back to a random `u32` from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InitializationFault`] if both lookups fail and the
    /// operating system cannot supply randomness.
    pub fn derive<M, H>(machine: &M, hostname: &H, pid: u32) -> Result<Self>
    where
        M: HostId,
        H: HostId,
    {
        Self::derive_with_fallback(machine, hostname, pid, || {
            OsRng
                .try_next_u32()
                .map_err(|e| Error::InitializationFault {
                    reason: e.to_string(),
                })
        })
    }

    /// Like [`Signature::derive`], with a caller-supplied last-resort source.
    ///
    /// # Errors
    ///
    /// Propagates the error of `fallback` when both lookups fail.
    pub fn derive_with_fallback<M, H, F>(
        machine: &M,
        hostname: &H,
        pid: u32,
        fallback: F,
    ) -> Result<Self>
    where
        M: HostId,
        H: HostId,
        F: FnOnce() -> Result<u32>,
    {
        let host_id = match read_non_empty(machine) {
            Ok(id) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("process signature derived from machine id");
                id
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("machine id unavailable ({_e}), falling back to hostname");
                match read_non_empty(hostname) {
                    Ok(name) => name,
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("hostname unavailable ({_e}), using a random host id");
                        fallback()?.to_string()
                    }
                }
            }
        };
        Ok(Self::from_host(&host_id, pid))
    }

    /// Returns the signature of the running process, deriving it on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns the [`Error::InitializationFault`] recorded by the first
    /// derivation attempt. The outcome is cached; later calls never retry.
    pub fn try_current() -> Result<Self> {
        PROCESS_SIGNATURE
            .get_or_init(|| {
                let signature = Self::derive(&MachineId, &Hostname, std::process::id());
                #[cfg(feature = "tracing")]
                match &signature {
                    Ok(s) => tracing::debug!(signature = s.get(), "process signature initialized"),
                    Err(e) => tracing::error!("process signature initialization failed: {e}"),
                }
                signature
            })
            .clone()
    }

    /// Returns the signature of the running process.
    ///
    /// # Panics
    ///
    /// Panics if the signature cannot be derived. This only happens when no
    /// host id is readable **and** the operating system random source fails,
    /// which leaves the process unable to generate IDs at all.
    #[must_use]
    pub fn current() -> Self {
        match Self::try_current() {
            Ok(signature) => signature,
            Err(e) => panic!("rid: {e}"),
        }
    }
}

impl From<u8> for Signature {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Signature> for u8 {
    fn from(value: Signature) -> Self {
        value.0
    }
}

fn read_non_empty<H: HostId>(source: &H) -> io::Result<String> {
    let id = source.read_host_id()?;
    let id = id.trim();
    if id.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "empty host id"));
    }
    Ok(id.to_owned())
}

mod platform {
    use std::io;

    #[cfg(target_os = "linux")]
    pub fn machine_id() -> io::Result<String> {
        std::fs::read_to_string("/var/lib/dbus/machine-id")
            .or_else(|_| std::fs::read_to_string("/etc/machine-id"))
    }

    #[cfg(target_os = "macos")]
    pub fn machine_id() -> io::Result<String> {
        let out = std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()?;
        // `  "IOPlatformUUID" = "XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX"`
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .find(|line| line.contains("IOPlatformUUID"))
            .and_then(|line| line.split('"').nth(3))
            .map(str::to_owned)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "IOPlatformUUID not found"))
    }

    #[cfg(target_os = "freebsd")]
    pub fn machine_id() -> io::Result<String> {
        std::fs::read_to_string("/etc/hostid").or_else(|_| {
            let out = std::process::Command::new("kenv")
                .args(["-q", "smbios.system.uuid"])
                .output()?;
            Ok(String::from_utf8_lossy(&out.stdout).into_owned())
        })
    }

    #[cfg(windows)]
    pub fn machine_id() -> io::Result<String> {
        let out = std::process::Command::new("reg")
            .args([
                "query",
                r"HKLM\SOFTWARE\Microsoft\Cryptography",
                "/v",
                "MachineGuid",
            ])
            .output()?;
        // `    MachineGuid    REG_SZ    xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .find(|line| line.contains("MachineGuid"))
            .and_then(|line| line.split_whitespace().last())
            .map(str::to_owned)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "MachineGuid not found"))
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "freebsd",
        windows
    )))]
    pub fn machine_id() -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no machine id on this platform",
        ))
    }

    #[cfg(unix)]
    pub fn hostname() -> io::Result<String> {
        nix::unistd::gethostname()
            .map_err(io::Error::from)?
            .into_string()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "hostname is not utf-8"))
    }

    #[cfg(windows)]
    pub fn hostname() -> io::Result<String> {
        std::env::var("COMPUTERNAME").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))
    }

    #[cfg(not(any(unix, windows)))]
    pub fn hostname() -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no hostname on this platform",
        ))
    }
}
