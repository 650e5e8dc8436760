pub mod config;
pub mod logging;
pub mod stats;
pub mod volume;
pub mod workout;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
