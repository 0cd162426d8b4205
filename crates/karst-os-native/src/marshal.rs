//! Field-by-field marshaling of native result structures into runtime
//! records.
//!
//! Native memory never crosses into the managed heap: the bridge copies a
//! stack-local snapshot of the OS result, and this module decomposes that
//! snapshot into tagged slots of a record the managed caller already owns.

use karst_tagged::Tagged;

/// Bridge-local copy of a wait-status info block. Populated by the native
/// backend, discarded when the bridge function returns.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct WaitStatus {
    pub pid: i32,
    pub uid: u32,
    pub signo: i32,
    pub status: i32,
    pub code: i32,
}

/// Slot layout of the destination record, fixed:
/// `[0]=pid [1]=uid [2]=signo [3]=status [4]=code`.
pub const WAIT_STATUS_SLOTS: usize = 5;

/// Write all five fields of `info` into `dest` and return the same record
/// reference. Runs only after a successful native call; the errno path and
/// this path are mutually exclusive for any one invocation.
///
/// `dest` must be a record reference with at least [`WAIT_STATUS_SLOTS`]
/// writable slots.
pub unsafe fn marshal_wait_status(info: &WaitStatus, dest: Tagged) -> Tagged {
    dest.record_write(0, Tagged::fixnum(info.pid as isize));
    dest.record_write(1, Tagged::fixnum(info.uid as isize));
    dest.record_write(2, Tagged::fixnum(info.signo as isize));
    dest.record_write(3, Tagged::fixnum(info.status as isize));
    dest.record_write(4, Tagged::fixnum(info.code as isize));
    dest
}
