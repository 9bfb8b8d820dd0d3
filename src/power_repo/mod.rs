// Battery readings and device identity from the host OS

mod linux;

use crate::models::{DeviceInfo, RawBatteryStatus};
use std::path::{Path, PathBuf};
use sysinfo::System;
use tracing::instrument;

/// Default location of the kernel power_supply class.
pub const DEFAULT_POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Source of raw battery readings (the OS power-management service).
/// Every method returns `None` when the property is unavailable; callers pick the default.
pub trait PowerSource {
    /// Instantaneous battery current in microamps, in the OS's own sign convention.
    fn current_now_ua(&self) -> Option<i32>;

    /// Last-broadcast battery status. `None` when no status is available at all.
    fn battery_status(&self) -> Option<RawBatteryStatus>;
}

impl<P: PowerSource + ?Sized> PowerSource for Box<P> {
    fn current_now_ua(&self) -> Option<i32> {
        (**self).current_now_ua()
    }

    fn battery_status(&self) -> Option<RawBatteryStatus> {
        (**self).battery_status()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SysfsError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {value:?} is not an integer")]
    Parse { path: PathBuf, value: String },
    #[error("{path}: {value} out of range")]
    OutOfRange { path: PathBuf, value: i64 },
}

/// `PowerSource` backed by one `/sys/class/power_supply/<name>` directory.
#[derive(Debug, Clone)]
pub struct SysfsPowerSource {
    dir: PathBuf,
}

impl SysfsPowerSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// First battery-type supply under `root`, if any.
    pub fn detect(root: &Path) -> Option<Self> {
        linux::find_battery_dir(root).map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_attr(&self, name: &str) -> Result<String, SysfsError> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path)
            .map(|s| s.trim().to_string())
            .map_err(|source| SysfsError::Io { path, source })
    }

    fn read_i32(&self, name: &str) -> Result<i32, SysfsError> {
        let raw = self.read_attr(name)?;
        let value: i64 = raw.parse().map_err(|_| SysfsError::Parse {
            path: self.dir.join(name),
            value: raw.clone(),
        })?;
        i32::try_from(value).map_err(|_| SysfsError::OutOfRange {
            path: self.dir.join(name),
            value,
        })
    }
}

impl PowerSource for SysfsPowerSource {
    fn current_now_ua(&self) -> Option<i32> {
        self.read_i32("current_now").ok()
    }

    fn battery_status(&self) -> Option<RawBatteryStatus> {
        if !self.dir.is_dir() {
            return None;
        }
        let level = self.read_i32("capacity").ok();
        Some(RawBatteryStatus {
            level,
            // sysfs capacity is already a percentage
            scale: level.map(|_| 100),
            temperature_tenths: self.read_i32("temp").ok(),
            voltage_mv: self.read_i32("voltage_now").ok().map(microvolts_to_millivolts),
            health_code: self
                .read_attr("health")
                .ok()
                .map(|h| linux::health_code_from_sysfs(&h)),
        })
    }
}

/// sysfs reports microvolts; round to the nearest millivolt rather than truncating.
fn microvolts_to_millivolts(uv: i32) -> i32 {
    (f64::from(uv) / 1000.0).round() as i32
}

/// Stand-in when the host has no battery: every property is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingPowerSource;

impl PowerSource for MissingPowerSource {
    fn current_now_ua(&self) -> Option<i32> {
        None
    }

    fn battery_status(&self) -> Option<RawBatteryStatus> {
        None
    }
}

/// Resolve the configured power supply. Falls back to `MissingPowerSource` so the display still runs.
pub fn open_power_source(root: &Path, name: Option<&str>) -> Box<dyn PowerSource + Send> {
    let found = match name {
        Some(n) => {
            let dir = root.join(n);
            dir.is_dir().then(|| SysfsPowerSource::new(dir))
        }
        None => SysfsPowerSource::detect(root),
    };
    match found {
        Some(src) => {
            tracing::info!(supply = %src.dir().display(), "Using power supply");
            Box::new(src)
        }
        None => {
            tracing::warn!(
                root = %root.display(),
                name = name.unwrap_or("<auto>"),
                "No battery power supply found; readings will show defaults"
            );
            Box::new(MissingPowerSource)
        }
    }
}

/// Static device identity. Read once at startup; missing values become "Unknown".
#[instrument(fields(repo = "power", operation = "read_device_info"))]
pub fn read_device_info() -> DeviceInfo {
    let model = linux::read_product_name_linux()
        .or_else(linux::read_device_tree_model_linux)
        .unwrap_or_else(|| "Unknown".into());
    let manufacturer = linux::read_sys_vendor_linux().unwrap_or_else(|| "Unknown".into());
    let name = System::name().unwrap_or_else(|| std::env::consts::OS.into());
    let os_version = match System::os_version() {
        Some(v) if !v.is_empty() => format!("{} {}", name, v),
        _ => name,
    };
    let kernel_version = System::kernel_version()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "Unknown".into());
    DeviceInfo {
        model,
        manufacturer,
        os_version,
        kernel_version,
    }
}
