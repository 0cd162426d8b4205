//! Build-time availability of bridged primitives.
//!
//! Each primitive maps to one compile-time fact, fixed per build. Callers
//! are expected to branch on [`Feature::available`] (or the exported
//! capability query) before invoking an entry point; a call that reaches an
//! unavailable primitive anyway is a contract violation in the calling
//! layer and terminates the process.

use std::collections::BTreeMap;

use karst_tagged::Tagged;
use once_cell::sync::Lazy;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Feature {
    Waitid,
    EpollCreate,
    EpollCreate1,
    Wifcontinued,
}

pub const ALL: [Feature; 4] = [
    Feature::Waitid,
    Feature::EpollCreate,
    Feature::EpollCreate1,
    Feature::Wifcontinued,
];

impl Feature {
    /// Resolved once per build, never re-checked against the running kernel.
    pub const fn available(self) -> bool {
        match self {
            Feature::Waitid | Feature::EpollCreate | Feature::EpollCreate1 => {
                cfg!(any(target_os = "linux", target_os = "android"))
            }
            Feature::Wifcontinued => cfg!(unix),
        }
    }

    /// Diagnostic name: the exported entry-point symbol.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Waitid => "karst_linux_waitid",
            Feature::EpollCreate => "karst_linux_epoll_create",
            Feature::EpollCreate1 => "karst_linux_epoll_create1",
            Feature::Wifcontinued => "karst_linux_wifcontinued",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        NAME_TABLE.get(name).copied()
    }
}

static NAME_TABLE: Lazy<BTreeMap<&'static str, Feature>> =
    Lazy::new(|| ALL.iter().map(|f| (f.name(), *f)).collect());

/// Fatal stub body for primitives absent on this build target. Not a
/// recoverable condition: the capability check belonged in the caller.
pub fn feature_failure(name: &str) -> ! {
    eprintln!("karst: called unavailable OS primitive: {name}");
    std::process::abort();
}

/// Capability query over a feature name, as a boolean singleton. Unknown
/// names answer false.
pub fn has_feature(name: &str) -> Tagged {
    Tagged::bool(Feature::from_name(name).is_some_and(|f| f.available()))
}

/// Exported capability query. `ptr`/`len` must describe a valid UTF-8
/// byte range owned by the caller for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn karst_linux_has_feature(ptr: *const u8, len: u32) -> Tagged {
    let bytes = std::slice::from_raw_parts(ptr, len as usize);
    match std::str::from_utf8(bytes) {
        Ok(name) => has_feature(name),
        Err(_) => Tagged::bool(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_feature_resolves_its_own_name() {
        for f in ALL {
            assert_eq!(Feature::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn unknown_name_is_not_a_feature() {
        assert_eq!(Feature::from_name("karst_linux_madvise"), None);
        assert!(has_feature("karst_linux_madvise").is_false());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_build_has_the_full_set() {
        for f in ALL {
            assert!(f.available(), "{} should be available", f.name());
            assert!(has_feature(f.name()).is_true());
        }
    }

    #[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
    #[test]
    fn non_linux_unix_keeps_only_the_portable_predicates() {
        assert!(Feature::Wifcontinued.available());
        assert!(!Feature::EpollCreate.available());
    }
}
