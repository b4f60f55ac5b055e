//! Value records shared by every backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of network link the device is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NetworkType {
    None,
    Wifi,
    Cell2G,
    Cell3G,
    Cell4G,
    Cell5G,
    Ethernet,
}

impl NetworkType {
    /// Whether the link goes through a cellular modem.
    pub fn is_cellular(&self) -> bool {
        matches!(
            self,
            Self::Cell2G | Self::Cell3G | Self::Cell4G | Self::Cell5G
        )
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Wifi => "wifi",
            Self::Cell2G => "cell2G",
            Self::Cell3G => "cell3G",
            Self::Cell4G => "cell4G",
            Self::Cell5G => "cell5G",
            Self::Ethernet => "ethernet",
        };
        f.write_str(name)
    }
}

/// Coarse signal quality of a network link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStrength {
    Unknown,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl fmt::Display for NetworkStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Poor => "poor",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        };
        f.write_str(name)
    }
}

/// Details of the active cellular link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Radio access technology (e.g., "LTE")
    pub technology: String,
    /// Operator code (MCC+MNC)
    pub operator: String,
    /// Band name
    pub band: String,
    /// Channel number
    pub channel: u32,
    /// Registration state reported by the modem
    pub state: String,
}

/// SIM card status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimInfo {
    /// ICCID of the inserted SIM, empty when none
    pub sim_id: String,
    /// Home network MCC+MNC
    pub mcc_mnc: Option<String>,
    /// Network types advertised per slot
    pub network_type: Vec<String>,
    /// SIM state per slot (e.g., "READY", "ABSENT")
    pub sim_state: Vec<String>,
    /// Whether mobile data is connected
    pub data_connected: bool,
}

impl SimInfo {
    /// Status reported when no SIM hardware exists.
    pub fn absent() -> Self {
        Self {
            sim_id: String::new(),
            mcc_mnc: None,
            network_type: vec!["Unknown".to_string()],
            sim_state: vec!["ABSENT".to_string()],
            data_connected: false,
        }
    }

    pub fn is_present(&self) -> bool {
        !self.sim_id.is_empty()
    }
}

/// One eSIM profile as reported by a local profile assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpaProfile {
    pub iccid: String,
    pub nickname: Option<String>,
    pub enabled: bool,
    pub provider: String,
}
