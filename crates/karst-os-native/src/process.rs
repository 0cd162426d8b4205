//! Process-status bridge operations: the `waitid` query and the
//! wait-status classification predicates.

use karst_tagged::Tagged;

use crate::marshal::marshal_wait_status;
use crate::native::NativeOps;
#[cfg(any(target_os = "linux", target_os = "android"))]
use crate::native::LibcOps;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
use crate::feature::{feature_failure, Feature};

/// Decode three fixnum arguments, run the query, and either fill the
/// caller's five-slot record or translate the failure. `dest` must be a
/// record reference with at least five writable slots.
pub unsafe fn waitid_core<N: NativeOps>(
    ops: &N,
    idtype: Tagged,
    id: Tagged,
    dest: Tagged,
    options: Tagged,
) -> Tagged {
    let idtype = idtype.to_fixnum() as i32;
    let id = id.to_fixnum() as i32;
    let options = options.to_fixnum() as i32;
    match ops.waitid(idtype, id, options) {
        Ok(info) => marshal_wait_status(&info, dest),
        Err(saved) => saved.to_condition(),
    }
}

/// Pure predicate: no OS call, no errno, no failure arm.
pub fn wifcontinued_core<N: NativeOps>(ops: &N, status: Tagged) -> Tagged {
    Tagged::bool(ops.wifcontinued(status.to_fixnum() as i32))
}

#[no_mangle]
pub unsafe extern "C" fn karst_linux_waitid(
    idtype: Tagged,
    id: Tagged,
    dest: Tagged,
    options: Tagged,
) -> Tagged {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        waitid_core(&LibcOps, idtype, id, dest, options)
    }
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        let _ = (idtype, id, dest, options);
        feature_failure(Feature::Waitid.name())
    }
}

#[no_mangle]
pub extern "C" fn karst_linux_wifcontinued(status: Tagged) -> Tagged {
    #[cfg(unix)]
    {
        wifcontinued_core(&crate::native::LibcOps, status)
    }
    #[cfg(not(unix))]
    {
        let _ = status;
        feature_failure(Feature::Wifcontinued.name())
    }
}
