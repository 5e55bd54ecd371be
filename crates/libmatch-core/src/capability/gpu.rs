//! GPU compute capability types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `(major, minor)` compute capability, e.g. `7.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComputeCapability {
    pub major: u32,
    pub minor: u32,
}

impl ComputeCapability {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a comma-separated list such as `7.5,8.0`.
    ///
    /// An empty input yields an empty list (no GPU restriction). Duplicates
    /// are dropped, keeping the first occurrence.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ComputeCapabilityParseError> {
        let mut list: Vec<Self> = Vec::new();
        if input.is_empty() {
            return Ok(list);
        }
        for item in input.split(',') {
            let cc: Self = item.parse()?;
            if !list.contains(&cc) {
                list.push(cc);
            }
        }
        Ok(list)
    }
}

impl fmt::Display for ComputeCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A compute capability list item did not look like `<major>.<minor>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't parse gpu compute capability: {input:?}")]
pub struct ComputeCapabilityParseError {
    pub input: String,
}

impl FromStr for ComputeCapability {
    type Err = ComputeCapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ComputeCapabilityParseError {
            input: s.to_string(),
        };
        let (major, minor) = s.split_once('.').ok_or_else(err)?;
        Ok(Self {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

/// One enumerated GPU device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDevice {
    /// Device ordinal as reported by the driver.
    pub index: u32,
    /// Marketing name, when the probe reports one.
    pub name: Option<String>,
    pub compute_capability: ComputeCapability,
}

/// All GPUs visible to this process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInventory {
    pub driver_version: Option<String>,
    pub devices: Vec<GpuDevice>,
}

impl GpuInventory {
    /// Inventory of a machine without GPUs.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices whose compute capability is not in `supported`.
    ///
    /// An empty `supported` list means the artifact is GPU-agnostic, so no
    /// device is ever reported.
    pub fn unsupported_by<'a>(
        &'a self,
        supported: &'a [ComputeCapability],
    ) -> impl Iterator<Item = &'a GpuDevice> + 'a {
        self.devices.iter().filter(move |device| {
            !supported.is_empty() && !supported.contains(&device.compute_capability)
        })
    }
}
