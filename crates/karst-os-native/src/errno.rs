//! Errno capture and translation.
//!
//! The OS failure slot is ambient, per-thread state: any intervening
//! operation can clobber it. All bridged syscalls go through [`guarded`],
//! which clears the slot, runs the call, and snapshots the slot before
//! anything else executes. Call sites never touch errno directly.

use karst_tagged::Tagged;

/// A captured OS failure classification. `Errno(0)` means the slot was
/// untouched by the guarded call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Errno(pub i32);

impl Errno {
    /// The condition value the runtime's signaling mechanism consumes:
    /// the negated errno as a fixnum.
    pub fn to_condition(self) -> Tagged {
        Tagged::fixnum(-(self.0 as isize))
    }
}

#[cfg(unix)]
fn errno_slot() -> *mut libc::c_int {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    unsafe {
        libc::__errno_location()
    }
    #[cfg(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd"
    ))]
    unsafe {
        libc::__error()
    }
}

/// Clear the errno slot, run `call`, and snapshot the slot immediately
/// after. Nothing may run between the call and the read.
#[cfg(unix)]
pub fn guarded<R>(call: impl FnOnce() -> R) -> (R, Errno) {
    let slot = errno_slot();
    unsafe { slot.write(0) };
    let ret = call();
    let saved = unsafe { slot.read() };
    (ret, Errno(saved))
}
