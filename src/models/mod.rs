// Domain models: battery telemetry and device identity

mod battery;
mod device;

pub use battery::{BatteryHealth, BatterySnapshot, RawBatteryStatus};
pub use device::DeviceInfo;
