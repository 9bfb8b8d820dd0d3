// Battery telemetry models

use serde::{Deserialize, Serialize};

use super::DeviceInfo;

/// Coarse battery condition as classified by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatteryHealth {
    #[default]
    Unknown,
    Good,
    Overheat,
    Dead,
    OverVoltage,
    Failure,
    Cold,
}

impl BatteryHealth {
    /// Maps an OS health code (1..=7) to a variant. Anything else is `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Good,
            3 => Self::Overheat,
            4 => Self::Dead,
            5 => Self::OverVoltage,
            6 => Self::Failure,
            7 => Self::Cold,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => 1,
            Self::Good => 2,
            Self::Overheat => 3,
            Self::Dead => 4,
            Self::OverVoltage => 5,
            Self::Failure => 6,
            Self::Cold => 7,
        }
    }
}

/// Last-broadcast battery status in raw OS units. `None` means the property is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawBatteryStatus {
    pub level: Option<i32>,
    pub scale: Option<i32>,
    /// Tenths of a degree Celsius.
    pub temperature_tenths: Option<i32>,
    pub voltage_mv: Option<i32>,
    pub health_code: Option<i32>,
}

/// One immutable telemetry reading, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySnapshot {
    /// Positive = charging, negative = discharging.
    pub current_now_ma: i32,
    pub min_current_ma: i32,
    pub max_current_ma: i32,
    pub level_percent: i32,
    pub temperature_celsius: f64,
    pub voltage_volts: f64,
    pub health: BatteryHealth,
    pub device: DeviceInfo,
}

impl BatterySnapshot {
    pub fn is_charging(&self) -> bool {
        self.current_now_ma > 0
    }
}
