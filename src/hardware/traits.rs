//! The capability contract every platform backend implements.

use crate::error::Result;
use crate::hardware::data::{LpaProfile, NetworkInfo, NetworkStrength, NetworkType, SimInfo};
use crate::hardware::thermal::ThermalConfig;

/// Uniform view of one platform's hardware.
///
/// A caller picks one implementation at startup and only ever talks to this
/// trait. Query methods are total: when a value cannot be determined they
/// return a documented sentinel (0, 0.0, empty, `None`, `Unknown`) instead of
/// an error, so a polling loop never stalls on a missing sensor. Only
/// [`reboot`](Self::reboot) and [`shutdown`](Self::shutdown) report failure,
/// and [`get_sim_lpa`](Self::get_sim_lpa) reports a missing capability.
///
/// Implementations hold no state across calls and must be safe to share
/// between threads.
pub trait HardwareBackend: Send + Sync {
    /// OS version string, `None` when undeterminable.
    fn get_os_version(&self) -> Option<String>;

    /// Fixed platform tag.
    fn get_device_type(&self) -> &'static str;

    /// Stable per-device identifier.
    fn get_serial(&self) -> String;

    /// 15-digit IMEI for the given SIM slot.
    fn get_imei(&self, slot: u8) -> String;

    /// Request an OS reboot.
    fn reboot(&self, reason: Option<&str>) -> Result<()>;

    /// Request an OS power-off.
    fn shutdown(&self) -> Result<()>;

    /// Request removal of the installed software.
    fn uninstall(&self);

    /// Whole-device power draw in milliwatts, 0 when unmeasurable.
    fn get_current_power_draw(&self) -> u32;

    /// System-on-module power draw in milliwatts, 0 when unmeasurable.
    fn get_som_power_draw(&self) -> u32;

    /// Used memory, 0–100.
    fn get_memory_usage_percent(&self) -> u8;

    /// Free space on the primary volume, 0.0–100.0.
    fn get_free_space_percent(&self) -> f64;

    /// Highest GPU busy percentage, 0–100.
    fn get_gpu_usage_percent(&self) -> u8;

    /// Discover the platform's thermal zones.
    fn get_thermal_config(&self) -> ThermalConfig;

    /// Modem temperatures in Celsius; empty without a modem.
    fn get_modem_temperatures(&self) -> Vec<i64>;

    /// NVMe temperatures in Celsius; empty without NVMe drives.
    fn get_nvme_temperatures(&self) -> Vec<i64>;

    fn get_network_type(&self) -> NetworkType;

    fn get_network_strength(&self, network_type: NetworkType) -> NetworkStrength;

    /// Details of the active cellular link, if any.
    fn get_network_info(&self) -> Option<NetworkInfo>;

    /// Visible networks, `None` when scanning is not possible.
    fn get_networks(&self) -> Option<Vec<NetworkInfo>>;

    fn get_sim_info(&self) -> SimInfo;

    /// The eSIM profile assistant, or [`HalError::Unsupported`] on platforms
    /// without eSIM.
    ///
    /// [`HalError::Unsupported`]: crate::error::HalError::Unsupported
    fn get_sim_lpa(&self) -> Result<Box<dyn Lpa>>;

    /// Set screen brightness in percent. No-op without a display.
    fn set_screen_brightness(&self, percent: u8);

    /// Screen brightness in percent, 0 without a display.
    fn get_screen_brightness(&self) -> u8;

    /// Toggle the platform power-save mode. No-op where unsupported.
    fn set_power_save(&self, enabled: bool);

    /// One-time platform setup. Calling it again has no further effect.
    fn initialize_hardware(&self);
}

/// Read surface of an eSIM local profile assistant.
pub trait Lpa: Send {
    /// All profiles installed on the eUICC.
    fn list_profiles(&self) -> Result<Vec<LpaProfile>>;

    /// The currently enabled profile, if any.
    fn active_profile(&self) -> Result<Option<LpaProfile>> {
        Ok(self.list_profiles()?.into_iter().find(|p| p.enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLpa(Vec<LpaProfile>);

    impl Lpa for FixedLpa {
        fn list_profiles(&self) -> Result<Vec<LpaProfile>> {
            Ok(self.0.clone())
        }
    }

    fn profile(iccid: &str, enabled: bool) -> LpaProfile {
        LpaProfile {
            iccid: iccid.to_string(),
            nickname: None,
            enabled,
            provider: "test".to_string(),
        }
    }

    #[test]
    fn test_active_profile() {
        let lpa = FixedLpa(vec![profile("8901", false), profile("8902", true)]);
        assert_eq!(lpa.active_profile().unwrap().unwrap().iccid, "8902");

        let lpa = FixedLpa(vec![profile("8901", false)]);
        assert!(lpa.active_profile().unwrap().is_none());
    }
}
