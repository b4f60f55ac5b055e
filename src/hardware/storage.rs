//! Primary-volume disk usage.

use crate::error::SensorError;
use std::path::Path;
use sysinfo::Disks;

/// Space on one mounted volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    /// Total space in bytes
    pub total_bytes: u64,
    /// Space available to unprivileged users in bytes
    pub available_bytes: u64,
}

impl DiskUsage {
    /// Query the volume that contains `path`.
    ///
    /// The volume is the mounted disk whose mount point is the longest
    /// component-wise prefix of `path`. Relative paths match nothing.
    pub fn for_path(path: &Path) -> Result<Self, SensorError> {
        let disks = Disks::new_with_refreshed_list();
        let volumes = disks.iter().map(|disk| {
            (
                disk.mount_point(),
                Self {
                    total_bytes: disk.total_space(),
                    available_bytes: disk.available_space(),
                },
            )
        });
        containing_volume(volumes, path).ok_or_else(|| SensorError::NotFound {
            path: path.display().to_string(),
        })
    }

    /// Free space as a percentage in `[0.0, 100.0]`.
    pub fn free_percent(&self, mount: &Path) -> Result<f64, SensorError> {
        if self.total_bytes == 0 {
            return Err(SensorError::invalid(mount, "volume reports zero total space"));
        }
        let percent = self.available_bytes as f64 / self.total_bytes as f64 * 100.0;
        Ok(percent.clamp(0.0, 100.0))
    }
}

/// Pick the usage of the deepest mount point containing `path`.
fn containing_volume<'a>(
    volumes: impl IntoIterator<Item = (&'a Path, DiskUsage)>,
    path: &Path,
) -> Option<DiskUsage> {
    volumes
        .into_iter()
        .filter(|(mount, _)| path.starts_with(mount))
        .max_by_key(|(mount, _)| mount.components().count())
        .map(|(_, usage)| usage)
}

/// Free-space percentage of the volume containing `path`.
pub fn free_percent_at(path: &Path) -> Result<f64, SensorError> {
    DiskUsage::for_path(path)?.free_percent(path)
}
