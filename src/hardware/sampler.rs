//! Whole-contract telemetry snapshots and a polling stream.

use crate::hardware::data::{NetworkStrength, NetworkType, SimInfo};
use crate::hardware::thermal::ThermalReadings;
use crate::hardware::traits::HardwareBackend;
use futures_util::stream::{self, BoxStream};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time;

/// Shortest period the polling stream will sample at.
pub const MIN_STREAM_INTERVAL: Duration = Duration::from_millis(1);

/// Every polled value of a backend at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Timestamp when this snapshot was taken (Unix timestamp in milliseconds)
    pub timestamp: u64,
    /// Platform tag
    pub device_type: String,
    /// OS version, if known
    pub os_version: Option<String>,
    /// Used memory, 0–100
    pub memory_usage_percent: u8,
    /// Free space on the primary volume, 0.0–100.0
    pub free_space_percent: f64,
    /// Highest GPU busy percentage
    pub gpu_usage_percent: u8,
    /// Thermal zone readings
    pub thermal: ThermalReadings,
    /// Modem temperatures in Celsius
    pub modem_temperatures: Vec<i64>,
    /// NVMe temperatures in Celsius
    pub nvme_temperatures: Vec<i64>,
    /// Active network type
    pub network_type: NetworkType,
    /// Signal strength of the active network
    pub network_strength: NetworkStrength,
    /// SIM status
    pub sim: SimInfo,
    /// Whole-device power draw in milliwatts
    pub power_draw_mw: u32,
    /// System-on-module power draw in milliwatts
    pub som_power_draw_mw: u32,
    /// Screen brightness in percent
    pub screen_brightness: u8,
}

impl TelemetrySnapshot {
    /// Query every read operation of `backend` once.
    pub fn collect(backend: &dyn HardwareBackend) -> Self {
        let network_type = backend.get_network_type();
        Self {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            device_type: backend.get_device_type().to_string(),
            os_version: backend.get_os_version(),
            memory_usage_percent: backend.get_memory_usage_percent(),
            free_space_percent: backend.get_free_space_percent(),
            gpu_usage_percent: backend.get_gpu_usage_percent(),
            thermal: backend.get_thermal_config().readings(),
            modem_temperatures: backend.get_modem_temperatures(),
            nvme_temperatures: backend.get_nvme_temperatures(),
            network_type,
            network_strength: backend.get_network_strength(network_type),
            sim: backend.get_sim_info(),
            power_draw_mw: backend.get_current_power_draw(),
            som_power_draw_mw: backend.get_som_power_draw(),
            screen_brightness: backend.get_screen_brightness(),
        }
    }
}

/// Snapshots of `backend` taken every `interval`, starting immediately.
///
/// Periods shorter than [`MIN_STREAM_INTERVAL`] (including zero) are raised
/// to it. Must be polled inside a Tokio runtime. The stream never ends on its
/// own; backend queries are total, so there is no error to stop on.
pub fn telemetry_stream(
    backend: Arc<dyn HardwareBackend>,
    interval: Duration,
) -> BoxStream<'static, TelemetrySnapshot> {
    let interval = interval.max(MIN_STREAM_INTERVAL);
    let stream = stream::unfold(
        (backend, time::interval(interval)),
        |(backend, mut interval)| async move {
            interval.tick().await;
            let snapshot = TelemetrySnapshot::collect(backend.as_ref());
            Some((snapshot, (backend, interval)))
        },
    );

    Box::pin(stream)
}
