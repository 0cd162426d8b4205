//! Bridge cores against a deterministic fake backend: encode/decode
//! behavior, marshaling order, and the success/failure split, with no real
//! syscalls involved.

use std::cell::RefCell;

use karst_os::{epoll, process, Errno, NativeOps, WaitStatus};
use karst_tagged::{RecordBuf, Tagged, FALSE_OBJECT, TRUE_OBJECT, VOID_OBJECT};

struct FakeOps {
    waitid_result: Result<WaitStatus, Errno>,
    epoll_create_result: Result<i32, Errno>,
    epoll_create1_result: Result<i32, Errno>,
    continued: bool,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeOps {
    fn new() -> FakeOps {
        FakeOps {
            waitid_result: Err(Errno(libc::ECHILD)),
            epoll_create_result: Err(Errno(libc::EINVAL)),
            epoll_create1_result: Err(Errno(libc::EINVAL)),
            continued: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl NativeOps for FakeOps {
    fn waitid(&self, _idtype: i32, _id: i32, _options: i32) -> Result<WaitStatus, Errno> {
        self.calls.borrow_mut().push("waitid");
        self.waitid_result
    }

    fn epoll_create(&self, _size: i32) -> Result<i32, Errno> {
        self.calls.borrow_mut().push("epoll_create");
        self.epoll_create_result
    }

    fn epoll_create1(&self, _flags: i32) -> Result<i32, Errno> {
        self.calls.borrow_mut().push("epoll_create1");
        self.epoll_create1_result
    }

    fn wifcontinued(&self, status: i32) -> bool {
        self.calls.borrow_mut().push("wifcontinued");
        self.continued && status != 0
    }
}

#[test]
fn waitid_success_fills_the_callers_record_in_order() {
    let mut ops = FakeOps::new();
    ops.waitid_result = Ok(WaitStatus {
        pid: 42,
        uid: 7,
        signo: 17,
        status: 0,
        code: 1,
    });

    let mut buf = RecordBuf::<5>::new();
    let dest = buf.as_tagged();
    let out = unsafe {
        process::waitid_core(
            &ops,
            Tagged::fixnum(1),
            Tagged::fixnum(42),
            dest,
            Tagged::fixnum(4),
        )
    };

    assert_eq!(out, dest, "success must return the destination record");
    let got: Vec<isize> = buf.slots().iter().map(|s| s.to_fixnum()).collect();
    assert_eq!(got, vec![42, 7, 17, 0, 1]);
    assert_eq!(ops.calls(), vec!["waitid"]);
}

#[test]
fn waitid_failure_translates_errno_and_leaves_the_record_alone() {
    let mut ops = FakeOps::new();
    ops.waitid_result = Err(Errno(libc::ECHILD));

    let mut buf = RecordBuf::<5>::new();
    let dest = buf.as_tagged();
    let out = unsafe {
        process::waitid_core(
            &ops,
            Tagged::fixnum(1),
            Tagged::fixnum(42),
            dest,
            Tagged::fixnum(4),
        )
    };

    assert_eq!(out, Tagged::fixnum(-(libc::ECHILD as isize)));
    assert!(!out.is_record());
    for slot in buf.slots() {
        assert_eq!(*slot, VOID_OBJECT, "failure must not touch the record");
    }
}

#[test]
fn epoll_create_success_encodes_the_new_handle() {
    let mut ops = FakeOps::new();
    ops.epoll_create_result = Ok(5);

    let out = epoll::epoll_create_core(&ops, Tagged::fixnum(16));
    assert_eq!(out, Tagged::fixnum(5));
    assert_eq!(out.to_raw_fd(), 5);
}

#[test]
fn epoll_create1_failure_carries_the_exact_classification() {
    let mut ops = FakeOps::new();
    ops.epoll_create1_result = Err(Errno(libc::EMFILE));

    let out = epoll::epoll_create1_core(&ops, Tagged::fixnum(0));
    assert_eq!(out, Tagged::fixnum(-(libc::EMFILE as isize)));
    assert_eq!(ops.calls(), vec!["epoll_create1"]);
}

#[test]
fn success_and_failure_shapes_are_mutually_exclusive() {
    let mut ops = FakeOps::new();
    ops.epoll_create_result = Ok(3);
    let ok = epoll::epoll_create_core(&ops, Tagged::fixnum(1));
    assert!(ok.is_fixnum() && ok.to_fixnum() >= 0);

    ops.epoll_create_result = Err(Errno(libc::ENFILE));
    let err = epoll::epoll_create_core(&ops, Tagged::fixnum(1));
    assert!(err.is_fixnum() && err.to_fixnum() < 0);
}

#[test]
fn wifcontinued_returns_the_false_singleton_for_status_zero() {
    let ops = FakeOps::new();
    let out = process::wifcontinued_core(&ops, Tagged::fixnum(0));
    assert_eq!(out, FALSE_OBJECT);
    // The predicate is the only seam touched: no syscall, no errno capture.
    assert_eq!(ops.calls(), vec!["wifcontinued"]);
}

#[test]
fn wifcontinued_returns_the_true_singleton_when_classified_true() {
    let mut ops = FakeOps::new();
    ops.continued = true;
    let out = process::wifcontinued_core(&ops, Tagged::fixnum(0xFFFF));
    assert_eq!(out, TRUE_OBJECT);
}
