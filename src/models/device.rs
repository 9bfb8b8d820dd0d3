// Static device identity

use serde::{Deserialize, Serialize};

/// Static device identity; read once at startup and attached to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub model: String,
    pub manufacturer: String,
    pub os_version: String,
    pub kernel_version: String,
}

impl DeviceInfo {
    /// "manufacturer model", skipping whichever half is empty.
    pub fn full_name(&self) -> String {
        match (self.manufacturer.is_empty(), self.model.is_empty()) {
            (false, false) => format!("{} {}", self.manufacturer, self.model),
            (false, true) => self.manufacturer.clone(),
            _ => self.model.clone(),
        }
    }
}
