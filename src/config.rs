//! Backend configuration.
//!
//! Every path, glob pattern and command a backend touches lives here, so a
//! deployment (or a test) can point the backend at a different tree.

use crate::error::{HalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default memory accounting source.
pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";

/// Default hwmon temperature inputs (milli-degrees Celsius).
///
/// This matches every hwmon chip, including NVMe, GPU and wireless sensors.
/// The default sources narrow it per slot with [`SensorSource::devices`].
pub const DEFAULT_HWMON_PATTERN: &str = "/sys/class/hwmon/hwmon*/temp*_input";

/// hwmon driver names reporting CPU package or core temperatures.
pub const CPU_HWMON_DEVICES: &[&str] =
    &["coretemp", "k10temp", "zenpower", "cpu_thermal", "soc_thermal"];

/// hwmon driver name of NVMe controllers.
pub const NVME_HWMON_DEVICE: &str = "nvme";

/// Default DRM busy-percent files.
pub const DEFAULT_GPU_BUSY_PATTERN: &str = "/sys/class/drm/card*/device/gpu_busy_percent";

/// Placeholder serial for machines without a hardware ID.
pub const DEFAULT_SERIAL: &str = "cccccccc";

/// A glob of temperature files sharing one raw-to-Celsius divisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSource {
    /// Glob pattern matching raw sensor files
    pub pattern: String,
    /// Divisor converting the raw integer to whole degrees Celsius
    pub scale: i64,
    /// Accepted device names (the hwmon `name` file); empty accepts any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<String>,
}

impl SensorSource {
    pub fn new(pattern: impl Into<String>, scale: i64) -> Self {
        Self {
            pattern: pattern.into(),
            scale,
            devices: Vec::new(),
        }
    }

    /// A source reporting milli-degrees, the sysfs convention.
    pub fn millidegrees(pattern: impl Into<String>) -> Self {
        Self::new(pattern, 1000)
    }

    /// Only accept sensors whose device name is one of `devices`.
    pub fn with_devices<S: Into<String>>(mut self, devices: impl IntoIterator<Item = S>) -> Self {
        self.devices = devices.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a sensor of device `name` belongs to this source.
    pub fn accepts_device(&self, name: Option<&str>) -> bool {
        self.devices.is_empty()
            || name.is_some_and(|name| self.devices.iter().any(|d| d == name))
    }
}

/// Configuration for a hardware backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Path of the `/proc/meminfo`-format memory listing
    pub meminfo_path: PathBuf,
    /// CPU thermal sensor globs, probed in order
    pub thermal_sources: Vec<SensorSource>,
    /// NVMe thermal sensor globs
    pub nvme_sources: Vec<SensorSource>,
    /// Glob of GPU busy-percent files
    pub gpu_busy_pattern: String,
    /// A path on the primary storage volume; the volume containing it is measured
    pub storage_mount: PathBuf,
    /// Reboot command and arguments
    pub reboot_command: Vec<String>,
    /// Power-off command and arguments
    pub shutdown_command: Vec<String>,
    /// Serial reported when no hardware ID exists
    pub serial: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            meminfo_path: PathBuf::from(DEFAULT_MEMINFO_PATH),
            thermal_sources: vec![SensorSource::millidegrees(DEFAULT_HWMON_PATTERN)
                .with_devices(CPU_HWMON_DEVICES.iter().copied())],
            nvme_sources: vec![SensorSource::millidegrees(DEFAULT_HWMON_PATTERN)
                .with_devices([NVME_HWMON_DEVICE])],
            gpu_busy_pattern: DEFAULT_GPU_BUSY_PATTERN.to_string(),
            storage_mount: PathBuf::from("/"),
            reboot_command: vec!["sudo".to_string(), "reboot".to_string()],
            shutdown_command: vec!["sudo".to_string(), "poweroff".to_string()],
            serial: DEFAULT_SERIAL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            HalError::config_error(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the memory accounting source.
    pub fn with_meminfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meminfo_path = path.into();
        self
    }

    /// Replace the thermal sensor sources.
    pub fn with_thermal_sources(mut self, sources: Vec<SensorSource>) -> Self {
        self.thermal_sources = sources;
        self
    }

    /// Replace the NVMe sensor sources.
    pub fn with_nvme_sources(mut self, sources: Vec<SensorSource>) -> Self {
        self.nvme_sources = sources;
        self
    }

    /// Set the GPU busy-percent glob.
    pub fn with_gpu_busy_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.gpu_busy_pattern = pattern.into();
        self
    }

    /// Set the path whose containing volume is the primary storage.
    pub fn with_storage_mount(mut self, mount: impl Into<PathBuf>) -> Self {
        self.storage_mount = mount.into();
        self
    }

    /// Set the reboot command.
    pub fn with_reboot_command<S: Into<String>>(mut self, argv: impl IntoIterator<Item = S>) -> Self {
        self.reboot_command = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Set the power-off command.
    pub fn with_shutdown_command<S: Into<String>>(
        mut self,
        argv: impl IntoIterator<Item = S>,
    ) -> Self {
        self.shutdown_command = argv.into_iter().map(Into::into).collect();
        self
    }

    /// Set the placeholder serial.
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = serial.into();
        self
    }

    /// Reject configurations no backend could act on.
    pub fn validate(&self) -> Result<()> {
        let mut sources = self.thermal_sources.iter().chain(&self.nvme_sources);
        if let Some(source) = sources.find(|s| s.scale <= 0) {
            return Err(HalError::config_error(format!(
                "thermal source `{}` has non-positive scale {}",
                source.pattern, source.scale
            )));
        }
        if self.reboot_command.is_empty() {
            return Err(HalError::config_error("reboot command is empty"));
        }
        if self.shutdown_command.is_empty() {
            return Err(HalError::config_error("shutdown command is empty"));
        }
        Ok(())
    }
}
