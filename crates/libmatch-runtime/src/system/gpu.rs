//! GPU enumeration through `nvidia-smi`.
//!
//! The probe asks the driver for one CSV line per device. Any failure
//! degrades to an empty inventory. A missing tool is a normal CPU-only host
//! and is logged at debug; a tool that runs and fails is logged as a warning.

use std::process::Command;

use libmatch_core::{ComputeCapability, GpuDevice, GpuInventory};
use tracing::{debug, info, warn};

use crate::error::GpuQueryError;

const NVIDIA_SMI: &str = "nvidia-smi";
const QUERY_ARGS: [&str; 2] = [
    "--query-gpu=index,name,compute_cap,driver_version",
    "--format=csv,noheader",
];

/// Run `nvidia-smi` and return its raw CSV output.
fn query_nvidia_smi() -> Result<String, GpuQueryError> {
    let output = Command::new(NVIDIA_SMI)
        .args(QUERY_ARGS)
        .output()
        .map_err(GpuQueryError::Unavailable)?;

    if !output.status.success() {
        return Err(GpuQueryError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Enumerate GPUs, logging the driver version and every device found.
pub fn enumerate() -> GpuInventory {
    let inventory = match query_nvidia_smi() {
        Ok(stdout) => parse_query_output(&stdout),
        Err(e) if e.is_expected() => {
            debug!("GPU query skipped: {e}");
            GpuInventory::none()
        }
        Err(e) => {
            warn!("GPU query failed, continuing as CPU-only: {e}");
            GpuInventory::none()
        }
    };

    if inventory.is_empty() {
        info!("No GPUs detected");
        return inventory;
    }

    if let Some(version) = &inventory.driver_version {
        info!("GPU driver version: {version}");
    }
    for device in &inventory.devices {
        info!(
            "GPU{}: {} (compute capability {})",
            device.index,
            device.name.as_deref().unwrap_or("unknown"),
            device.compute_capability
        );
    }
    inventory
}

/// Parse `index, name, compute_cap, driver_version` lines.
///
/// Malformed lines are skipped with a warning. The driver version comes
/// from the first device that reports one.
pub fn parse_query_output(stdout: &str) -> GpuInventory {
    let mut inventory = GpuInventory::none();

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_device_line(line) {
            Some((device, driver)) => {
                if inventory.driver_version.is_none() {
                    inventory.driver_version = driver;
                }
                inventory.devices.push(device);
            }
            None => warn!("Skipping unrecognized GPU entry: {line}"),
        }
    }

    inventory
}

fn parse_device_line(line: &str) -> Option<(GpuDevice, Option<String>)> {
    // Device names may contain commas; peel fixed fields off both ends.
    let (index, rest) = line.split_once(',')?;
    let (rest, driver) = rest.rsplit_once(',')?;
    let (name, capability) = rest.rsplit_once(',')?;

    let index = index.trim().parse().ok()?;
    let compute_capability: ComputeCapability = capability.trim().parse().ok()?;
    let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
    let driver = Some(driver.trim().to_string()).filter(|d| !d.is_empty());

    Some((
        GpuDevice {
            index,
            name,
            compute_capability,
        },
        driver,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_devices() {
        let stdout = "0, NVIDIA GeForce RTX 3090, 8.6, 535.104.05\n\
                      1, Tesla T4, 7.5, 535.104.05\n";
        let inventory = parse_query_output(stdout);
        assert_eq!(inventory.driver_version.as_deref(), Some("535.104.05"));
        assert_eq!(inventory.devices.len(), 2);
        assert_eq!(inventory.devices[0].index, 0);
        assert_eq!(
            inventory.devices[0].name.as_deref(),
            Some("NVIDIA GeForce RTX 3090")
        );
        assert_eq!(
            inventory.devices[1].compute_capability,
            ComputeCapability::new(7, 5)
        );
    }

    #[test]
    fn name_may_contain_commas() {
        let inventory = parse_query_output("3, Acme, Inc. Accelerator, 9.0, 550.54\n");
        let device = &inventory.devices[0];
        assert_eq!(device.index, 3);
        assert_eq!(device.name.as_deref(), Some("Acme, Inc. Accelerator"));
        assert_eq!(device.compute_capability, ComputeCapability::new(9, 0));
    }

    #[test]
    fn skips_malformed_lines() {
        let stdout = "0, Quadro K600, [N/A], 470.57\n\
                      garbage\n\
                      \n\
                      1, Tesla V100, 7.0, 470.57\n";
        let inventory = parse_query_output(stdout);
        assert_eq!(inventory.devices.len(), 1);
        assert_eq!(inventory.devices[0].index, 1);
        assert_eq!(inventory.driver_version.as_deref(), Some("470.57"));
    }

    #[test]
    fn empty_output_is_empty_inventory() {
        let inventory = parse_query_output("");
        assert!(inventory.is_empty());
        assert!(inventory.driver_version.is_none());
    }
}
