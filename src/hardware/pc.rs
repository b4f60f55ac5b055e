//! Backend for generic desktop and developer machines.
//!
//! Reads what a stock Linux box exposes (hwmon, DRM, `/proc/meminfo`, mounted
//! disks) and reports fixed sentinels for everything a PC has no hardware
//! for: no modem, no SIM, no controllable display, no power rails.

use crate::config::BackendConfig;
use crate::error::{HalError, Result};
use crate::hardware::data::{NetworkInfo, NetworkStrength, NetworkType, SimInfo};
use crate::hardware::thermal::{self, ThermalConfig};
use crate::hardware::traits::{HardwareBackend, Lpa};
use crate::hardware::{gpu, memory, storage};
use std::process::Command;
use tracing::{debug, info, warn};

/// Platform tag reported by [`PcBackend`].
pub const PC_DEVICE_TYPE: &str = "pc";

/// Hardware backend for a desktop machine.
#[derive(Debug, Clone, Default)]
pub struct PcBackend {
    config: BackendConfig,
}

impl PcBackend {
    /// Create a backend with the default Linux paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend from an explicit configuration.
    pub fn with_config(config: BackendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

impl HardwareBackend for PcBackend {
    fn get_os_version(&self) -> Option<String> {
        None
    }

    fn get_device_type(&self) -> &'static str {
        PC_DEVICE_TYPE
    }

    fn get_serial(&self) -> String {
        self.config.serial.clone()
    }

    fn get_imei(&self, _slot: u8) -> String {
        synthesize_imei()
    }

    fn reboot(&self, reason: Option<&str>) -> Result<()> {
        info!("Reboot requested (reason: {})", reason.unwrap_or("none"));
        run_command(&self.config.reboot_command)
    }

    fn shutdown(&self) -> Result<()> {
        info!("Shutdown requested");
        run_command(&self.config.shutdown_command)
    }

    fn uninstall(&self) {
        info!("Uninstall requested, nothing to remove on {}", PC_DEVICE_TYPE);
    }

    fn get_current_power_draw(&self) -> u32 {
        0
    }

    fn get_som_power_draw(&self) -> u32 {
        0
    }

    fn get_memory_usage_percent(&self) -> u8 {
        memory::usage_percent_from(&self.config.meminfo_path).unwrap_or_else(|err| {
            debug!("Memory usage unavailable: {}", err);
            0
        })
    }

    fn get_free_space_percent(&self) -> f64 {
        storage::free_percent_at(&self.config.storage_mount).unwrap_or_else(|err| {
            debug!("Free space unavailable: {}", err);
            0.0
        })
    }

    fn get_gpu_usage_percent(&self) -> u8 {
        gpu::max_busy_percent(&self.config.gpu_busy_pattern)
    }

    fn get_thermal_config(&self) -> ThermalConfig {
        ThermalConfig::cpu_only(thermal::discover_cpu_zones(&self.config.thermal_sources))
    }

    fn get_modem_temperatures(&self) -> Vec<i64> {
        Vec::new()
    }

    fn get_nvme_temperatures(&self) -> Vec<i64> {
        thermal::sample_sources(&self.config.nvme_sources)
    }

    fn get_network_type(&self) -> NetworkType {
        NetworkType::Wifi
    }

    fn get_network_strength(&self, _network_type: NetworkType) -> NetworkStrength {
        NetworkStrength::Unknown
    }

    fn get_network_info(&self) -> Option<NetworkInfo> {
        None
    }

    fn get_networks(&self) -> Option<Vec<NetworkInfo>> {
        None
    }

    fn get_sim_info(&self) -> SimInfo {
        SimInfo::absent()
    }

    fn get_sim_lpa(&self) -> Result<Box<dyn Lpa>> {
        Err(HalError::unsupported("SIM LPA", PC_DEVICE_TYPE))
    }

    fn set_screen_brightness(&self, percent: u8) {
        debug!("Ignoring screen brightness {}% on {}", percent, PC_DEVICE_TYPE);
    }

    fn get_screen_brightness(&self) -> u8 {
        0
    }

    fn set_power_save(&self, enabled: bool) {
        debug!("Ignoring power save {} on {}", enabled, PC_DEVICE_TYPE);
    }

    fn initialize_hardware(&self) {}
}

/// A random 15-digit IMEI-shaped string for machines without a modem.
fn synthesize_imei() -> String {
    format!("{:015}", rand::random_range(0..=1u64 << 32))
}

/// Run a privileged command, failing on spawn errors and non-zero exits.
fn run_command(argv: &[String]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| HalError::config_error("empty command"))?;
    let command_line = argv.join(" ");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| HalError::command_error(&command_line, e.to_string()))?;

    if output.status.success() {
        info!("Issued `{}`", command_line);
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    warn!("`{}` failed with {}: {}", command_line, output.status, stderr);
    let detail = if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, stderr)
    };
    Err(HalError::command_error(command_line, detail))
}
