//! Native OS bridge for the karst runtime: process-status queries, epoll
//! descriptor creation, and wait-status classification predicates.
//!
//! Every exported entry point follows the same shape: tagged arguments in,
//! one tagged value out. Arguments are decoded, the native call runs exactly
//! once, and the outcome is either encoded (directly, or field-by-field into
//! a caller-supplied record) or translated from the captured errno into a
//! condition value. Primitives absent on the build target compile to a fatal
//! stub instead; see [`feature`].

#![allow(clippy::missing_safety_doc)]

pub mod epoll;
pub mod errno;
pub mod feature;
pub mod marshal;
pub mod native;
pub mod process;

pub use errno::Errno;
pub use feature::Feature;
pub use marshal::WaitStatus;
pub use native::{LibcOps, NativeOps};
