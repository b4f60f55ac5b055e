//! Thermal zones and sensor discovery.
//!
//! Discovery runs when a backend builds its [`ThermalConfig`]: it expands the
//! configured globs, binds each readable file to a [`ThermalZone`] and falls
//! back to a single placeholder CPU zone when nothing is found. Only the path
//! is fixed at discovery time; every sample re-reads the file.

use crate::config::SensorSource;
use crate::error::SensorError;
use crate::hardware::sysfs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Label of the zone synthesized when no sensor is discovered.
pub const FALLBACK_ZONE_LABEL: &str = "thermal_zone0";

/// Where a zone's raw value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneSource {
    /// A sysfs file containing one integer
    File(PathBuf),
    /// Nothing backs this zone; every sample is unavailable
    Unavailable,
}

/// A single named temperature sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalZone {
    label: String,
    scale: i64,
    source: ZoneSource,
}

impl ThermalZone {
    /// Bind a zone to a raw sensor file.
    ///
    /// A non-positive `scale` is treated as 1.
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, scale: i64) -> Self {
        Self {
            label: label.into(),
            scale: scale.max(1),
            source: ZoneSource::File(path.into()),
        }
    }

    /// A zone with no backing sensor.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scale: 1,
            source: ZoneSource::Unavailable,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn source(&self) -> &ZoneSource {
        &self.source
    }

    /// Read the current temperature in whole degrees Celsius.
    ///
    /// The raw value is divided by the scale, rounding toward negative
    /// infinity.
    pub fn try_sample(&self) -> Result<i64, SensorError> {
        match &self.source {
            ZoneSource::File(path) => Ok(sysfs::read_int(path)?.div_euclid(self.scale)),
            ZoneSource::Unavailable => Err(SensorError::NoSource {
                label: self.label.clone(),
            }),
        }
    }

    /// Read the current temperature, or `None` if it cannot be determined.
    pub fn sample(&self) -> Option<i64> {
        match self.try_sample() {
            Ok(celsius) => Some(celsius),
            Err(err) => {
                debug!("Thermal zone `{}` unavailable: {}", self.label, err);
                None
            }
        }
    }

    /// Sample this zone into a serializable reading.
    pub fn reading(&self) -> ZoneReading {
        ZoneReading {
            label: self.label.clone(),
            celsius: self.sample(),
        }
    }
}

/// Thermal zones grouped by subsystem.
///
/// `cpu` always holds at least one zone. The other slots are `None` when the
/// platform has no such subsystem, which is distinct from an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalConfig {
    pub cpu: Vec<ThermalZone>,
    pub gpu: Option<Vec<ThermalZone>>,
    pub memory: Option<Vec<ThermalZone>>,
    pub pmic: Option<Vec<ThermalZone>>,
}

impl ThermalConfig {
    /// A configuration with only CPU zones.
    ///
    /// An empty `cpu` list is replaced by the fallback zone.
    pub fn cpu_only(cpu: Vec<ThermalZone>) -> Self {
        Self {
            cpu: ensure_cpu_zone(cpu),
            gpu: None,
            memory: None,
            pmic: None,
        }
    }

    /// Sample every zone once.
    pub fn readings(&self) -> ThermalReadings {
        let sample_all = |zones: &[ThermalZone]| -> Vec<ZoneReading> {
            zones.iter().map(ThermalZone::reading).collect()
        };
        ThermalReadings {
            cpu: sample_all(self.cpu.as_slice()),
            gpu: self.gpu.as_deref().map(sample_all),
            memory: self.memory.as_deref().map(sample_all),
            pmic: self.pmic.as_deref().map(sample_all),
        }
    }
}

/// One sampled zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneReading {
    /// Zone label
    pub label: String,
    /// Temperature in whole degrees Celsius, `None` if unavailable
    pub celsius: Option<i64>,
}

/// A point-in-time sample of a whole [`ThermalConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermalReadings {
    pub cpu: Vec<ZoneReading>,
    pub gpu: Option<Vec<ZoneReading>>,
    pub memory: Option<Vec<ZoneReading>>,
    pub pmic: Option<Vec<ZoneReading>>,
}

impl ThermalReadings {
    /// Hottest available CPU reading.
    pub fn max_cpu_celsius(&self) -> Option<i64> {
        self.cpu.iter().filter_map(|r| r.celsius).max()
    }
}

/// Discover every readable zone across `sources`, in pattern order.
///
/// Sources restricted to named devices skip files whose [`device_name`] is
/// not listed.
pub fn discover_zones(sources: &[SensorSource]) -> Vec<ThermalZone> {
    sources
        .iter()
        .flat_map(|source| {
            sysfs::expand(&source.pattern)
                .into_iter()
                .filter(move |path| source.accepts_device(device_name(path).as_deref()))
                .filter_map(move |path| probe_zone(&path, source.scale))
        })
        .collect()
}

/// Sample every zone discovered across `sources`, dropping unavailable ones.
pub fn sample_sources(sources: &[SensorSource]) -> Vec<i64> {
    discover_zones(sources)
        .iter()
        .filter_map(ThermalZone::sample)
        .collect()
}

/// Driver name of the device exposing a sensor file.
///
/// hwmon chips publish it in a `name` file beside their inputs, thermal zones
/// in `type`.
pub fn device_name(path: &Path) -> Option<String> {
    ["name", "type"]
        .into_iter()
        .find_map(|file| sysfs::read_trimmed(&path.with_file_name(file)).ok())
        .filter(|name| !name.is_empty())
}

/// Discover zones for the CPU slot, guaranteeing it is never empty.
pub fn discover_cpu_zones(sources: &[SensorSource]) -> Vec<ThermalZone> {
    ensure_cpu_zone(discover_zones(sources))
}

fn ensure_cpu_zone(mut zones: Vec<ThermalZone>) -> Vec<ThermalZone> {
    if zones.is_empty() {
        tracing::info!(
            "No thermal sensors discovered, using placeholder zone `{}`",
            FALLBACK_ZONE_LABEL
        );
        zones.push(ThermalZone::placeholder(FALLBACK_ZONE_LABEL));
    }
    zones
}

/// Bind `path` to a zone if it currently holds a readable integer.
fn probe_zone(path: &Path, scale: i64) -> Option<ThermalZone> {
    if let Err(err) = sysfs::read_int(path) {
        debug!("Skipping thermal candidate: {}", err);
        return None;
    }
    Some(ThermalZone::new(zone_label(path), path, scale))
}

/// Label for a raw sensor file.
///
/// Prefers the co-located label file (`tempN_label` beside `tempN_input`,
/// `type` beside a thermal-zone `temp`), else derives one from the path.
pub fn zone_label(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (label_file, derived) = match file_name.strip_suffix("_input") {
        Some(stem) => (Some(format!("{stem}_label")), stem.to_string()),
        None if file_name == "temp" => {
            let zone_dir = path
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(file_name.clone());
            (Some("type".to_string()), zone_dir)
        }
        None => (None, file_name.clone()),
    };

    label_file
        .and_then(|name| sysfs::read_trimmed(&path.with_file_name(name)).ok())
        .filter(|label| !label.is_empty())
        .unwrap_or(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sample_scales_millidegrees() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "temp1_input", "54321\n");
        let zone = ThermalZone::new("Package id 0", &path, 1000);
        assert_eq!(zone.sample(), Some(54));
        assert_eq!(zone.label(), "Package id 0");
    }

    #[test]
    fn test_sample_floors_negative() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "temp1_input", "-1500");
        let zone = ThermalZone::new("ambient", &path, 1000);
        assert_eq!(zone.sample(), Some(-2));
    }

    #[test]
    fn test_sample_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "temp1_input", "40000");
        let zone = ThermalZone::new("cpu", &path, 1000);
        assert_eq!(zone.sample(), Some(40));

        fs::write(&path, "71000").unwrap();
        assert_eq!(zone.sample(), Some(71));
    }

    #[test]
    fn test_removed_source_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "temp1_input", "40000");
        let zone = ThermalZone::new("cpu", &path, 1000);
        fs::remove_file(&path).unwrap();

        assert_eq!(zone.sample(), None);
        assert!(matches!(zone.try_sample(), Err(SensorError::NotFound { .. })));
    }

    #[test]
    fn test_placeholder() {
        let zone = ThermalZone::placeholder(FALLBACK_ZONE_LABEL);
        assert_eq!(zone.sample(), None);
        assert!(matches!(zone.try_sample(), Err(SensorError::NoSource { .. })));
        assert_eq!(zone.source(), &ZoneSource::Unavailable);
    }

    #[test]
    fn test_zone_label_prefers_label_file() {
        let dir = TempDir::new().unwrap();
        let input = write(dir.path(), "hwmon1/temp1_input", "45000");
        write(dir.path(), "hwmon1/temp1_label", "Tctl\n");
        assert_eq!(zone_label(&input), "Tctl");

        let input = write(dir.path(), "hwmon1/temp2_input", "45000");
        assert_eq!(zone_label(&input), "temp2");

        let input = write(dir.path(), "hwmon1/temp3_input", "45000");
        write(dir.path(), "hwmon1/temp3_label", "  \n");
        assert_eq!(zone_label(&input), "temp3");
    }

    #[test]
    fn test_zone_label_thermal_zone() {
        let dir = TempDir::new().unwrap();
        let temp = write(dir.path(), "thermal_zone3/temp", "45000");
        assert_eq!(zone_label(&temp), "thermal_zone3");

        write(dir.path(), "thermal_zone3/type", "x86_pkg_temp\n");
        assert_eq!(zone_label(&temp), "x86_pkg_temp");
    }

    #[test]
    fn test_discovery_skips_unreadable_candidates() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "hwmon0/temp1_input", "38000");
        write(dir.path(), "hwmon0/temp1_label", "edge");
        write(dir.path(), "hwmon1/temp1_input", "garbage");
        write(dir.path(), "hwmon1/temp2_input", "61999");

        let pattern = format!("{}/hwmon*/temp*_input", dir.path().display());
        let zones = discover_zones(&[SensorSource::millidegrees(pattern)]);

        let labels: Vec<&str> = zones.iter().map(ThermalZone::label).collect();
        assert_eq!(labels, vec!["edge", "temp2"]);
        assert_eq!(zones[1].sample(), Some(61));
    }

    #[test]
    fn test_discovery_filters_by_device() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "hwmon0/name", "coretemp\n");
        write(dir.path(), "hwmon0/temp1_input", "52000");
        write(dir.path(), "hwmon1/name", "nvme\n");
        write(dir.path(), "hwmon1/temp1_input", "41000");
        write(dir.path(), "hwmon2/name", "amdgpu\n");
        write(dir.path(), "hwmon2/temp1_input", "67000");
        write(dir.path(), "hwmon3/temp1_input", "30000");

        let pattern = format!("{}/hwmon*/temp*_input", dir.path().display());
        let source = SensorSource::millidegrees(pattern.as_str());

        let cpu = discover_zones(&[source.clone().with_devices(["coretemp", "k10temp"])]);
        assert_eq!(cpu.len(), 1);
        assert_eq!(cpu[0].sample(), Some(52));

        assert_eq!(sample_sources(&[source.clone().with_devices(["nvme"])]), vec![41]);

        // Unfiltered sources keep every chip, named or not
        assert_eq!(discover_zones(&[source]).len(), 4);
    }

    #[test]
    fn test_device_name() {
        let dir = TempDir::new().unwrap();
        let input = write(dir.path(), "hwmon0/temp1_input", "45000");
        assert_eq!(device_name(&input), None);

        write(dir.path(), "hwmon0/name", "k10temp\n");
        assert_eq!(device_name(&input).as_deref(), Some("k10temp"));

        let temp = write(dir.path(), "thermal_zone0/temp", "45000");
        write(dir.path(), "thermal_zone0/type", "cpu_thermal\n");
        assert_eq!(device_name(&temp).as_deref(), Some("cpu_thermal"));
    }

    #[test]
    fn test_discovery_fallback() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/hwmon*/temp*_input", dir.path().display());

        let zones = discover_cpu_zones(&[SensorSource::millidegrees(pattern)]);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].label(), FALLBACK_ZONE_LABEL);

        let zones = discover_cpu_zones(&[]);
        assert_eq!(zones.len(), 1);
    }

    #[test]
    fn test_readings() {
        let dir = TempDir::new().unwrap();
        let a = write(dir.path(), "a_input", "50000");
        let b = write(dir.path(), "b_input", "65000");
        let config = ThermalConfig::cpu_only(vec![
            ThermalZone::new("a", a, 1000),
            ThermalZone::new("b", b, 1000),
            ThermalZone::placeholder("c"),
        ]);

        let readings = config.readings();
        assert_eq!(readings.cpu.len(), 3);
        assert_eq!(readings.cpu[2].celsius, None);
        assert_eq!(readings.max_cpu_celsius(), Some(65));
        assert!(readings.gpu.is_none());
        assert!(readings.pmic.is_none());
    }

    #[test]
    fn test_cpu_only_never_empty() {
        let config = ThermalConfig::cpu_only(Vec::new());
        assert_eq!(config.cpu.len(), 1);
        assert!(config.gpu.is_none() && config.memory.is_none() && config.pmic.is_none());
    }
}
