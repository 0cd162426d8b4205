//! The syscall seam.
//!
//! Bridged cores are generic over [`NativeOps`] so tests can substitute a
//! deterministic backend; [`LibcOps`] is the real one. Each method performs
//! exactly one native attempt per invocation, routed through
//! [`errno::guarded`] so the failure slot is captured uncorrupted. Blocking
//! behavior of the underlying call is passed through untouched; this layer
//! adds no cancellation and no retries.

#[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
use crate::feature::{feature_failure, Feature};
#[cfg(any(target_os = "linux", target_os = "android"))]
use crate::errno;
use crate::{Errno, WaitStatus};

pub trait NativeOps {
    /// One `waitid`-style query. May block per the options given.
    fn waitid(&self, idtype: i32, id: i32, options: i32) -> Result<WaitStatus, Errno>;
    fn epoll_create(&self, size: i32) -> Result<i32, Errno>;
    fn epoll_create1(&self, flags: i32) -> Result<i32, Errno>;
    /// Pure classification over an already-obtained status word. No OS
    /// call, no errno interaction.
    fn wifcontinued(&self, status: i32) -> bool;
}

/// The production backend. Methods for primitives absent on this target are
/// compiled as fatal stubs; entry points gate on [`Feature::available`]
/// before ever dispatching here.
pub struct LibcOps;

#[cfg(any(target_os = "linux", target_os = "android"))]
fn wait_status_from_siginfo(info: &libc::siginfo_t) -> WaitStatus {
    WaitStatus {
        pid: unsafe { info.si_pid() },
        uid: unsafe { info.si_uid() },
        signo: info.si_signo,
        status: unsafe { info.si_status() },
        code: info.si_code,
    }
}

#[cfg(unix)]
impl NativeOps for LibcOps {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn waitid(&self, idtype: i32, id: i32, options: i32) -> Result<WaitStatus, Errno> {
        let mut info: libc::siginfo_t = unsafe { std::mem::zeroed() };
        let (rv, saved) = errno::guarded(|| unsafe {
            libc::waitid(
                idtype as libc::idtype_t,
                id as libc::id_t,
                &mut info,
                options,
            )
        });
        if rv >= 0 {
            Ok(wait_status_from_siginfo(&info))
        } else {
            Err(saved)
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn waitid(&self, _idtype: i32, _id: i32, _options: i32) -> Result<WaitStatus, Errno> {
        feature_failure(Feature::Waitid.name())
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn epoll_create(&self, size: i32) -> Result<i32, Errno> {
        let (rv, saved) = errno::guarded(|| unsafe { libc::epoll_create(size) });
        if rv != -1 {
            Ok(rv)
        } else {
            Err(saved)
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn epoll_create(&self, _size: i32) -> Result<i32, Errno> {
        feature_failure(Feature::EpollCreate.name())
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn epoll_create1(&self, flags: i32) -> Result<i32, Errno> {
        let (rv, saved) = errno::guarded(|| unsafe { libc::epoll_create1(flags) });
        if rv != -1 {
            Ok(rv)
        } else {
            Err(saved)
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn epoll_create1(&self, _flags: i32) -> Result<i32, Errno> {
        feature_failure(Feature::EpollCreate1.name())
    }

    fn wifcontinued(&self, status: i32) -> bool {
        libc::WIFCONTINUED(status)
    }
}
