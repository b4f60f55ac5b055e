//! The hardware contract, its value records and the desktop backend.
//!
//! This module provides the [`HardwareBackend`] trait, the thermal sampling
//! model shared by every backend, the low-level readers for memory, storage
//! and GPU accounting, and [`PcBackend`], the reference backend for generic
//! Linux machines.

pub mod data;
pub mod gpu;
pub mod memory;
pub mod pc;
pub mod sampler;
pub mod storage;
pub(crate) mod sysfs;
pub mod thermal;
pub mod traits;

// Re-export commonly used items
pub use data::{LpaProfile, NetworkInfo, NetworkStrength, NetworkType, SimInfo};
pub use pc::PcBackend;
pub use sampler::{telemetry_stream, TelemetrySnapshot};
pub use thermal::{ThermalConfig, ThermalReadings, ThermalZone, ZoneReading, ZoneSource};
pub use traits::{HardwareBackend, Lpa};
