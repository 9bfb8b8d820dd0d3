// Telemetry sampling: unit conversion and running current extrema.
// Unavailable properties degrade to defaults; nothing here returns an error.

use crate::models::{BatteryHealth, BatterySnapshot, DeviceInfo, RawBatteryStatus};
use crate::power_repo::PowerSource;

pub struct Sampler<S> {
    source: S,
    device: DeviceInfo,
    /// (min, max) over non-zero samples since the last reset; `None` until the first one.
    extrema: Option<(i32, i32)>,
}

impl<S: PowerSource> Sampler<S> {
    pub fn new(source: S, device: DeviceInfo) -> Self {
        Self {
            source,
            device,
            extrema: None,
        }
    }

    /// Instantaneous current in mA, positive while charging.
    ///
    /// The raw reading is negated. Whether the OS reports discharge as positive depends on
    /// the platform and fuel-gauge driver, so the sign is an assumption rather than a contract.
    pub fn read_current(&self) -> i32 {
        self.source
            .current_now_ua()
            .map(|ua| -(ua / 1000))
            .unwrap_or(0)
    }

    /// Widen the extrema to include `current`. Zero means "no reading" and is ignored.
    pub fn observe(&mut self, current: i32) {
        if current == 0 {
            return;
        }
        self.extrema = Some(match self.extrema {
            Some((min, max)) => (min.min(current), max.max(current)),
            None => (current, current),
        });
    }

    pub fn read_level(&self) -> i32 {
        level_percent(self.source.battery_status())
    }

    pub fn read_temperature(&self) -> f64 {
        temperature_celsius(self.source.battery_status())
    }

    pub fn read_voltage(&self) -> f64 {
        voltage_volts(self.source.battery_status())
    }

    pub fn read_health(&self) -> BatteryHealth {
        health(self.source.battery_status())
    }

    /// Read everything once and fold the current into the extrema.
    pub fn snapshot(&mut self) -> BatterySnapshot {
        let current = self.read_current();
        self.observe(current);
        let (min, max) = self.extrema.unwrap_or((current, current));
        let status = self.source.battery_status();

        BatterySnapshot {
            current_now_ma: current,
            min_current_ma: min,
            max_current_ma: max,
            level_percent: level_percent(status),
            temperature_celsius: temperature_celsius(status),
            voltage_volts: voltage_volts(status),
            health: health(status),
            device: self.device.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.extrema = None;
    }

    pub fn min_current(&self) -> Option<i32> {
        self.extrema.map(|(min, _)| min)
    }

    pub fn max_current(&self) -> Option<i32> {
        self.extrema.map(|(_, max)| max)
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }
}

fn level_percent(status: Option<RawBatteryStatus>) -> i32 {
    match status.map(|s| (s.level, s.scale)) {
        Some((Some(level), Some(scale))) if level >= 0 && scale > 0 => {
            (i64::from(level) * 100 / i64::from(scale)) as i32
        }
        _ => 0,
    }
}

fn temperature_celsius(status: Option<RawBatteryStatus>) -> f64 {
    status
        .and_then(|s| s.temperature_tenths)
        .map_or(0.0, |t| f64::from(t) / 10.0)
}

fn voltage_volts(status: Option<RawBatteryStatus>) -> f64 {
    status
        .and_then(|s| s.voltage_mv)
        .map_or(0.0, |mv| f64::from(mv) / 1000.0)
}

fn health(status: Option<RawBatteryStatus>) -> BatteryHealth {
    status
        .and_then(|s| s.health_code)
        .map_or(BatteryHealth::Unknown, BatteryHealth::from_code)
}
