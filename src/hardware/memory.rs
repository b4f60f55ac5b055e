//! System memory accounting via `/proc/meminfo`.

use crate::error::SensorError;
use std::collections::HashMap;
use std::path::Path;

/// The `/proc/meminfo` fields the usage calculation needs, in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: Option<u64>,
    pub free_kb: Option<u64>,
}

impl MemInfo {
    /// Reads memory information from a `/proc/meminfo`-format file.
    pub fn read_from(path: &Path) -> Result<Self, SensorError> {
        let content = std::fs::read_to_string(path).map_err(|e| SensorError::from_io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parses `Key: value kB` lines.
    ///
    /// Every line with at least two fields must carry an integer value; a
    /// single malformed line rejects the whole listing. `MemTotal` is required.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self, SensorError> {
        let mut fields = HashMap::new();

        for line in content.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                continue;
            }
            let key = parts[0].trim_end_matches(':');
            let value = parts[1].parse::<u64>().map_err(|_| {
                SensorError::parse_error(
                    source_path,
                    format!("expected integer kB value for {key}, got '{}'", parts[1]),
                )
            })?;
            fields.insert(key, value);
        }

        let total_kb = fields
            .get("MemTotal")
            .copied()
            .ok_or_else(|| SensorError::parse_error(source_path, "MemTotal not found"))?;

        Ok(Self {
            total_kb,
            available_kb: fields.get("MemAvailable").copied(),
            free_kb: fields.get("MemFree").copied(),
        })
    }

    /// Memory that can still be handed out, approximated by `MemFree` on
    /// kernels that do not report `MemAvailable`.
    pub fn effective_available_kb(&self) -> u64 {
        self.available_kb.or(self.free_kb).unwrap_or(0)
    }

    /// Used memory as a whole percentage, truncated toward zero.
    pub fn usage_percent(&self, source_path: &Path) -> Result<u8, SensorError> {
        if self.total_kb == 0 {
            return Err(SensorError::invalid(source_path, "MemTotal is zero"));
        }
        let used = u128::from(self.total_kb.saturating_sub(self.effective_available_kb()));
        let percent = used * 100 / u128::from(self.total_kb);
        Ok(percent.min(100) as u8)
    }
}

/// Reads `path` and computes the used-memory percentage.
pub fn usage_percent_from(path: &Path) -> Result<u8, SensorError> {
    MemInfo::read_from(path)?.usage_percent(path)
}
