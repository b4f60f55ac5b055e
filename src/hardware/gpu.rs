//! GPU utilisation from DRM busy-percent files.

use crate::hardware::sysfs;
use tracing::debug;

/// Highest busy percentage across every file matching `pattern`.
///
/// Unreadable devices are skipped; no devices yields 0.
pub fn max_busy_percent(pattern: &str) -> u8 {
    sysfs::expand(pattern)
        .iter()
        .filter_map(|path| match sysfs::read_int(path) {
            Ok(busy) => Some(busy.clamp(0, 100) as u8),
            Err(err) => {
                debug!("Skipping GPU busy source: {}", err);
                None
            }
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn card(dir: &TempDir, name: &str, busy: &str) {
        let device = dir.path().join(name).join("device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("gpu_busy_percent"), busy).unwrap();
    }

    fn pattern(dir: &TempDir) -> String {
        format!("{}/card*/device/gpu_busy_percent", dir.path().display())
    }

    #[test]
    fn test_max_across_cards() {
        let dir = TempDir::new().unwrap();
        card(&dir, "card0", "12\n");
        card(&dir, "card1", "87\n");
        card(&dir, "card2", "40\n");
        assert_eq!(max_busy_percent(&pattern(&dir)), 87);
    }

    #[test]
    fn test_no_cards() {
        let dir = TempDir::new().unwrap();
        assert_eq!(max_busy_percent(&pattern(&dir)), 0);
    }

    #[test]
    fn test_unreadable_card_is_skipped() {
        let dir = TempDir::new().unwrap();
        card(&dir, "card0", "busy");
        card(&dir, "card1", "33");
        assert_eq!(max_busy_percent(&pattern(&dir)), 33);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let dir = TempDir::new().unwrap();
        card(&dir, "card0", "250");
        assert_eq!(max_busy_percent(&pattern(&dir)), 100);
    }
}
