//! # Device HAL - Platform-agnostic hardware access
//!
//! A hardware abstraction layer that lets a device-management process read
//! platform state (memory, disk, thermal zones, GPU load, network and SIM
//! status, power draw, brightness) through one trait, whatever machine it
//! runs on.
//!
//! ## Features
//!
//! - **One contract**: every platform implements [`HardwareBackend`]
//! - **Total queries**: missing or broken sensors flatline to documented
//!   sentinels instead of failing the caller
//! - **Thermal discovery**: sysfs sensors are found by glob and re-read on
//!   every sample
//! - **Polling stream**: [`telemetry_stream`] yields whole-device snapshots
//!   at a fixed interval
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use device_hal::{HardwareBackend, PcBackend};
//!
//! let backend = PcBackend::new();
//! println!("memory: {}%", backend.get_memory_usage_percent());
//! for zone in backend.get_thermal_config().cpu {
//!     println!("{}: {:?}°C", zone.label(), zone.sample());
//! }
//! ```

pub mod config;
pub mod error;
pub mod hardware;

// Re-export public API
pub use config::{BackendConfig, SensorSource};
pub use error::{HalError, Result, SensorError};
pub use hardware::{
    data::{LpaProfile, NetworkInfo, NetworkStrength, NetworkType, SimInfo},
    pc::PcBackend,
    sampler::{telemetry_stream, TelemetrySnapshot},
    thermal::{ThermalConfig, ThermalReadings, ThermalZone, ZoneReading},
    traits::{HardwareBackend, Lpa},
};

/// The default polling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
