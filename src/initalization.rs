//! Marker types and traits relating to initialization
//!
//! The display drivers carry one of these markers as a type parameter. A freshly constructed
//! driver is `Uninitalized` and only exposes buffer mutation; bus operations such as flushing or
//! formatting numbers become available once `initialize()` has brought the chip up and handed
//! back an `Initialized` driver.

/// A marker type signaling an initalized state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Initialized;
/// A marker type signaling an uninitalized state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uninitalized;

/// A sealed marker trait used for stating which types have been initialized
///
/// It should be noted that since this trait is sealed, no further implementations can be made
/// beyond this crate.
pub trait InitializationState: sealed::Sealed {}

mod sealed {
    use super::{Initialized, Uninitalized};

    pub trait Sealed {}
    impl Sealed for Initialized {}
    impl Sealed for Uninitalized {}
}

impl InitializationState for Initialized {}
impl InitializationState for Uninitalized {}

/// Returned by `initialize()` when one of the bring-up commands fails on the bus
///
/// The driver is handed back in its uninitialized state so the caller keeps the bus and may
/// retry. Commands sent before the failing one are not rolled back.
pub struct InitializationError<D, E> {
    /// The driver that failed to initialize
    pub driver: D,
    /// The bus error reported by the failing command
    pub error: E,
}

impl<D, E: core::fmt::Debug> core::fmt::Debug for InitializationError<D, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitializationError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<D, E: core::fmt::Debug> core::fmt::Display for InitializationError<D, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "display initialization failed: {:?}", self.error)
    }
}
