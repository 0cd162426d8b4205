//! Tagged value representation shared by the karst runtime and its native
//! extension crates.
//!
//! Every value crossing the native boundary is one machine word. Low bits
//! select the representation:
//!
//! - fixnums: low `FX_SHIFT` bits zero, payload shifted left;
//! - immediates: the boolean singletons and the void object;
//! - heap records: an aligned slot pointer with `RECORD_TAG` in the low bits.
//!
//! The managed allocator owns every heap object. This crate only converts
//! between representations; it never allocates on the managed heap and never
//! retains a value past the call that produced it.

#![allow(clippy::missing_safety_doc)]

/// Fixnum payload shift: 2 on 32-bit words, 3 on 64-bit words.
pub const FX_SHIFT: u32 = if std::mem::size_of::<usize>() == 4 {
    2
} else {
    3
};

/// Largest encodable fixnum.
pub const FX_MAX: isize = isize::MAX >> FX_SHIFT;
/// Smallest encodable fixnum.
pub const FX_MIN: isize = isize::MIN >> FX_SHIFT;

const TAG_MASK: usize = 0b111;

/// Low-bits pattern of a tagged record reference.
pub const RECORD_TAG: usize = 0b101;

/// One machine word of the runtime's uniform value representation.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Tagged(usize);

/// The false singleton. Never reconstructed, only referenced.
pub const FALSE_OBJECT: Tagged = Tagged(0x2F);
/// The true singleton.
pub const TRUE_OBJECT: Tagged = Tagged(0x3F);
/// Canonical "no useful value" immediate.
pub const VOID_OBJECT: Tagged = Tagged(0x7F);

impl Tagged {
    /// Raw word, for FFI plumbing and diagnostics.
    pub const fn raw(self) -> usize {
        self.0
    }

    /// Reinterpret a raw word received from the runtime.
    pub const fn from_raw(bits: usize) -> Tagged {
        Tagged(bits)
    }

    /// Encode a small integer. Total over `FX_MIN..=FX_MAX`; anything wider
    /// belongs to the runtime's numeric tower, not this boundary.
    pub fn fixnum(n: isize) -> Tagged {
        debug_assert!(
            (FX_MIN..=FX_MAX).contains(&n),
            "fixnum out of range: {n}"
        );
        Tagged((n << FX_SHIFT) as usize)
    }

    /// Decode a fixnum. Requires a value produced by [`Tagged::fixnum`];
    /// call sites are trusted, checked in debug builds only.
    pub fn to_fixnum(self) -> isize {
        debug_assert!(self.is_fixnum(), "not a fixnum: {:#x}", self.0);
        (self.0 as isize) >> FX_SHIFT
    }

    pub const fn is_fixnum(self) -> bool {
        self.0 & ((1 << FX_SHIFT) - 1) == 0
    }

    /// Either of the two process-wide boolean singletons.
    pub const fn bool(b: bool) -> Tagged {
        if b {
            TRUE_OBJECT
        } else {
            FALSE_OBJECT
        }
    }

    pub fn is_true(self) -> bool {
        self == TRUE_OBJECT
    }

    pub fn is_false(self) -> bool {
        self == FALSE_OBJECT
    }

    /// Same numeric encoding as [`Tagged::fixnum`], kept as a distinct
    /// operation because its domain is OS handle space, not arithmetic.
    pub fn from_raw_fd(fd: i32) -> Tagged {
        Tagged::fixnum(fd as isize)
    }

    pub fn to_raw_fd(self) -> i32 {
        self.to_fixnum() as i32
    }

    /// Tag an allocator-provided slot array as a record reference. The
    /// pointer must be word-aligned with the low three bits free.
    pub fn record_from_ptr(slots: *mut Tagged) -> Tagged {
        debug_assert!(slots as usize & TAG_MASK == 0, "unaligned record slots");
        Tagged(slots as usize | RECORD_TAG)
    }

    pub const fn is_record(self) -> bool {
        self.0 & TAG_MASK == RECORD_TAG
    }

    pub unsafe fn record_slot_ptr(self, index: usize) -> *mut Tagged {
        debug_assert!(self.is_record(), "not a record: {:#x}", self.0);
        ((self.0 & !TAG_MASK) as *mut Tagged).add(index)
    }

    pub unsafe fn record_read(self, index: usize) -> Tagged {
        self.record_slot_ptr(index).read()
    }

    pub unsafe fn record_write(self, index: usize, value: Tagged) {
        self.record_slot_ptr(index).write(value);
    }
}

/// Owned backing storage for a record, for hosts (tests, probes) that stand
/// in for the managed allocator. Alignment keeps the tag bits free on every
/// word size.
#[repr(C, align(8))]
pub struct RecordBuf<const N: usize> {
    slots: [Tagged; N],
}

impl<const N: usize> RecordBuf<N> {
    pub fn new() -> RecordBuf<N> {
        RecordBuf {
            slots: [VOID_OBJECT; N],
        }
    }

    /// Tagged reference to this buffer. Valid only while the buffer lives
    /// and does not move.
    pub fn as_tagged(&mut self) -> Tagged {
        Tagged::record_from_ptr(self.slots.as_mut_ptr())
    }

    pub fn slots(&self) -> &[Tagged; N] {
        &self.slots
    }
}

impl<const N: usize> Default for RecordBuf<N> {
    fn default() -> Self {
        RecordBuf::new()
    }
}
