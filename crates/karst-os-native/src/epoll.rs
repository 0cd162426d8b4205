//! Epoll descriptor-creation bridge operations.
//!
//! Two exported arities (matching the two OS entry points), one shared
//! shape: decode at most one fixnum, perform the call, encode the new
//! descriptor handle or translate the failure.

use karst_tagged::Tagged;

use crate::errno::Errno;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
use crate::feature::{feature_failure, Feature};
#[cfg(any(target_os = "linux", target_os = "android"))]
use crate::native::LibcOps;
use crate::native::NativeOps;

fn descriptor_result(outcome: Result<i32, Errno>) -> Tagged {
    match outcome {
        Ok(fd) => Tagged::from_raw_fd(fd),
        Err(saved) => saved.to_condition(),
    }
}

pub fn epoll_create_core<N: NativeOps>(ops: &N, size: Tagged) -> Tagged {
    descriptor_result(ops.epoll_create(size.to_fixnum() as i32))
}

pub fn epoll_create1_core<N: NativeOps>(ops: &N, flags: Tagged) -> Tagged {
    descriptor_result(ops.epoll_create1(flags.to_fixnum() as i32))
}

#[no_mangle]
pub extern "C" fn karst_linux_epoll_create(size: Tagged) -> Tagged {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        epoll_create_core(&LibcOps, size)
    }
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        let _ = size;
        feature_failure(Feature::EpollCreate.name())
    }
}

#[no_mangle]
pub extern "C" fn karst_linux_epoll_create1(flags: Tagged) -> Tagged {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        epoll_create1_core(&LibcOps, flags)
    }
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        let _ = flags;
        feature_failure(Feature::EpollCreate1.name())
    }
}
