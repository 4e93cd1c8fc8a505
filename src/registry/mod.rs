//! Ecosystem adapters: normalize registry CLI/API output into [`RegistryData`].
//!
//! Each module exposes a single `gather` function that returns a (possibly
//! empty) [`RegistryData`]. An empty record means the primary data source was
//! unavailable; that is not an evaluation error, only reduced coverage.
//! Whatever went wrong along the way lands in the run's diagnostics.
//!
//! [`RegistryData`]: crate::models::RegistryData

pub mod crates_io;
pub mod go;
pub mod npm;
pub mod pypi;
